/// Application-level constants
pub const APP_NAME: &str = "Dorra EMR";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the backend base address.
pub const API_URL_VAR: &str = "DORRA_API_URL";

/// Backend address used when the environment does not override it.
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// Base address of the Dorra EMR backend.
///
/// This is the only piece of environment configuration the workstation
/// reads. Trailing slashes are trimmed so endpoint paths can be joined
/// uniformly.
pub fn api_base_url() -> String {
    std::env::var(API_URL_VAR)
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME").replace('-', "_"))
}
