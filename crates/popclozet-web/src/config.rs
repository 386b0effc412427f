//! Page configuration

use serde::Deserialize;
use thiserror::Error;
use web_sys::Document;

/// Meta tag naming the signup endpoint
pub const SIGNUP_ENDPOINT_META: &str = "popclozet-signup-endpoint";

/// Meta tag naming the console log level (`error` .. `trace`)
pub const LOG_LEVEL_META: &str = "popclozet-log-level";

/// Settings the page reads at boot
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingConfig {
    /// URL that accepts `POST {"email","source"}`; forms stay unbound without it
    pub signup_endpoint: Option<String>,
    /// Scroll distance before the navigation bar turns compact
    pub nav_scrolled_threshold_px: Option<u32>,
    /// Console log level; `info` when unset
    pub log_level: Option<String>,
}

impl LandingConfig {
    pub fn from_json(json: &str) -> Result<Self, BootError> {
        serde_json::from_str(json).map_err(|e| BootError::InvalidConfig(e.to_string()))
    }

    /// Read settings from `<meta>` tags
    pub fn from_document(document: &Document) -> Self {
        Self {
            signup_endpoint: meta_content(document, SIGNUP_ENDPOINT_META),
            log_level: meta_content(document, LOG_LEVEL_META),
            ..Default::default()
        }
    }
}

fn meta_content(document: &Document, name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Errors that stop the page from booting
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BootError {
    #[error("no window object")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("invalid page config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json() {
        let config = LandingConfig::from_json(r#"{"signupEndpoint": "/api/signups"}"#).unwrap();
        assert_eq!(config.signup_endpoint.as_deref(), Some("/api/signups"));
        assert_eq!(config.nav_scrolled_threshold_px, None);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_config_log_level() {
        let config = LandingConfig::from_json(r#"{"logLevel": "debug"}"#).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_config_json_error() {
        assert!(matches!(LandingConfig::from_json("[]"), Err(BootError::InvalidConfig(_))));
    }
}
