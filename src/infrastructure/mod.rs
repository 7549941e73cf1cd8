// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod disease_client;
pub mod frame_stream;
pub mod http_response;
