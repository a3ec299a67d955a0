//! Extraction of Litesizer 500 particle analyzer exports.
//!
//! The core lives in [`services::litesizer`]: a cell grid, label lookups
//! and the distribution table isolator. [`services::file_processor`] wraps
//! it for files and directories; [`routes`] exposes it over HTTP.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Application state
#[derive(Clone)]
pub struct AppState {
    config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self { config }
    }
}
