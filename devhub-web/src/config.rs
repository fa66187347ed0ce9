//! Frontend configuration module
//!
//! Values are baked in at compile time from `DEVHUB_*` environment variables
//! so the same bundle can be built for different deployments.

use log::LevelFilter;

/// Origin assumed for a relative API base when no browser location exists.
pub const FALLBACK_ORIGIN: &str = "http://localhost:8080";

/// Frontend configuration for the backend location, logging and links.
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL every REST call is resolved against
    pub api_base_url: String,
    /// Documentation URL
    pub documentation_url: String,
    /// Console log level
    pub log_level: LevelFilter,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self::from_values(
            option_env!("DEVHUB_API_BASE_URL"),
            option_env!("DEVHUB_DOCUMENTATION_URL"),
            option_env!("DEVHUB_LOG_LEVEL"),
        )
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    fn from_values(
        api_base_url: Option<&str>,
        documentation_url: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: api_base_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or("/api")
                .to_string(),
            documentation_url: documentation_url.unwrap_or("/docs").to_string(),
            log_level: log_level
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }

    /// Get the documentation URL
    pub fn documentation_url(&self) -> &str {
        &self.documentation_url
    }

    /// Absolute API base URL. A relative base such as `/api` is joined to the
    /// page origin, or to [`FALLBACK_ORIGIN`] outside a browser.
    pub fn resolved_api_base_url(&self) -> String {
        resolve_base_url(&self.api_base_url, browser_origin().as_deref())
    }
}

#[cfg(target_arch = "wasm32")]
fn browser_origin() -> Option<String> {
    web_sys::window().and_then(|window| window.location().origin().ok())
}

#[cfg(not(target_arch = "wasm32"))]
fn browser_origin() -> Option<String> {
    None
}

fn resolve_base_url(base: &str, origin: Option<&str>) -> String {
    let base = base.trim();
    if base.starts_with("http://") || base.starts_with("https://") {
        return base.to_string();
    }
    let origin = origin
        .filter(|origin| !origin.is_empty() && *origin != "null")
        .unwrap_or(FALLBACK_ORIGIN)
        .trim_end_matches('/');
    format!("{origin}/{}", base.trim_start_matches('/'))
}
