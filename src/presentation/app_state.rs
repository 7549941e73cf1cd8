// Application state for HTTP handlers
use crate::application::contact_service::ContactService;
use crate::application::statistics_service::StatisticsService;
use crate::application::streaming_service::StreamingService;

#[derive(Clone)]
pub struct AppState {
    pub statistics: StatisticsService,
    pub streaming: StreamingService,
    pub contacts: ContactService,
}
