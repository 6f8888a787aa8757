// Adapters for the app-layer ports: HTTP fetching, HTML extraction, file input and export

pub mod export;
pub mod html_extractor;
pub mod http_client;
pub mod input;
