pub mod constants;
pub mod error;
pub mod logging;
pub mod types;

pub mod config;
pub mod pipeline;

// Layered boundaries for application logic and its adapters
pub mod app;
pub mod infra;

pub mod observability;
