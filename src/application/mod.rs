// Application layer - Services and the statistics source seam
pub mod cancellation;
pub mod contact_service;
pub mod statistics_service;
pub mod statistics_source;
pub mod streaming_service;
