use std::fmt;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "sprint-worklog-report";
pub const DEFAULT_COOLDOWN_MS: u64 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthMethod {
    /// `email:token` pair sent as HTTP basic credentials (Jira Cloud API tokens).
    #[default]
    Basic,
    /// Personal access token sent as a bearer token (Jira Data Center).
    Bearer,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Basic => "Basic",
            AuthMethod::Bearer => "Bearer",
        }
    }
}

#[derive(Clone)]
pub struct JiraConfig {
    /// REST root including the API version, e.g. `https://acme.atlassian.net/rest/api/2/`.
    pub api_root: String,
    pub email: String,
    pub token: String,
    pub user_agent: String,
    pub cooldown: Duration,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub auth_method: AuthMethod,
}

impl JiraConfig {
    pub fn new(
        api_root: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            api_root: api_root.into(),
            email: email.into(),
            token: token.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cooldown: Duration::from_millis(DEFAULT_COOLDOWN_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            auth_method: AuthMethod::Basic,
        }
    }

    /// Minimum spacing the client keeps between two requests.
    pub fn with_cooldown(mut self, duration: Duration) -> Self {
        self.cooldown = duration;
        self
    }

    pub fn with_auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = method;
        self
    }

    /// Root URL normalized to end with exactly one `/`.
    pub fn normalized_root(&self) -> String {
        format!("{}/", self.api_root.trim().trim_end_matches('/'))
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("api_root", &self.api_root)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("cooldown", &self.cooldown)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_root_has_single_trailing_slash() {
        let config = JiraConfig::new("https://acme.atlassian.net/rest/api/2//", "a@b.c", "t");
        assert_eq!(config.normalized_root(), "https://acme.atlassian.net/rest/api/2/");

        let config = JiraConfig::new("https://acme.atlassian.net/rest/api/2", "a@b.c", "t");
        assert_eq!(config.normalized_root(), "https://acme.atlassian.net/rest/api/2/");
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = JiraConfig::new("https://x/", "dev@example.com", "super-secret");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("dev@example.com"));
        assert!(!rendered.contains("super-secret"));
    }
}
