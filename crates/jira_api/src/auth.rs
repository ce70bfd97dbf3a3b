//! Authorization header construction for Jira credentials.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;

use crate::config::{AuthMethod, JiraConfig};
use crate::error::{JiraError, Result};

/// Encodes `email:token` the way Jira Cloud expects basic credentials.
pub fn basic_credentials(email: &str, token: &str) -> String {
    BASE64_STANDARD.encode(format!("{}:{}", email, token))
}

/// Builds the `Authorization` header value for the configured auth method.
pub fn authorization_header(config: &JiraConfig) -> Result<HeaderValue> {
    let credentials = match config.auth_method {
        AuthMethod::Basic => basic_credentials(&config.email, &config.token),
        AuthMethod::Bearer => config.token.clone(),
    };
    let mut value = HeaderValue::from_str(&format!("{} {}", config.auth_method.as_str(), credentials))
        .map_err(|err| JiraError::Configuration(err.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
