pub mod api;
pub mod codec;
pub mod config;
pub mod models;
pub mod redirect;
pub mod service;
pub mod storage;
pub mod validation;

pub use service::{CreatedUrl, ServiceError, ServiceResult, UrlService};

/// Install the global tracing subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
