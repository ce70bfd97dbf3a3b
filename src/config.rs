//! Startup configuration read from the process environment.

use std::fmt;
use std::time::Duration;

use jira_api::{AuthMethod, JiraConfig};
use thiserror::Error;

use crate::pipeline::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_DAYS};

pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_COOLDOWN_MS: u64 = jira_api::DEFAULT_COOLDOWN_MS;

/// A setting problem found at startup. None of these stop the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No {variable} environment variable set")]
    Missing { variable: &'static str },
    #[error("Invalid value {value:?} for {variable}; using the default")]
    Invalid { variable: &'static str, value: String },
}

#[derive(Clone, Default)]
pub struct JiraSettings {
    pub api_root: String,
    /// Only used with basic auth.
    pub email: String,
    pub token: String,
    pub project: String,
    pub auth_method: AuthMethod,
    /// Minimum spacing between two Jira requests.
    pub cooldown: Duration,
}

#[derive(Clone, Default)]
pub struct SheetsSettings {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    pub service_account_email: String,
    pub private_key: String,
}

#[derive(Clone)]
pub enum SinkSettings {
    Sheets(SheetsSettings),
    Console,
}

/// Everything a run needs, built once at startup and passed down explicitly.
#[derive(Clone)]
pub struct AppConfig {
    pub jira: JiraSettings,
    pub sink: SinkSettings,
    pub window_days: u32,
    pub page_size: u64,
    /// `None` runs the report once and exits.
    pub interval: Option<Duration>,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `lookup`, collecting one problem per missing or invalid variable.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut problems = Vec::new();

        let auth_method = match optional(&lookup, "JIRA_AUTH_METHOD").map(|kind| kind.to_lowercase()).as_deref() {
            Some("bearer") => AuthMethod::Bearer,
            kind => {
                if let Some(other) = kind.filter(|kind| *kind != "basic") {
                    problems.push(ConfigError::Invalid {
                        variable: "JIRA_AUTH_METHOD",
                        value: other.to_string(),
                    });
                }
                AuthMethod::Basic
            }
        };
        let api_root = required(&lookup, &mut problems, "JIRA_API_ROOT");
        let email = match auth_method {
            AuthMethod::Basic => required(&lookup, &mut problems, "JIRA_API_EMAIL"),
            AuthMethod::Bearer => optional(&lookup, "JIRA_API_EMAIL").unwrap_or_default(),
        };
        let cooldown_ms = numeric(&lookup, &mut problems, "JIRA_REQUEST_COOLDOWN_MS", DEFAULT_COOLDOWN_MS);
        let jira = JiraSettings {
            api_root,
            email,
            token: required(&lookup, &mut problems, "JIRA_API_TOKEN"),
            project: required(&lookup, &mut problems, "JIRA_API_PROJECT"),
            auth_method,
            cooldown: Duration::from_millis(cooldown_ms),
        };

        let sink = match optional(&lookup, "REPORT_SINK").map(|kind| kind.to_lowercase()).as_deref() {
            Some("console") => SinkSettings::Console,
            kind => {
                if let Some(other) = kind.filter(|kind| *kind != "sheets") {
                    problems.push(ConfigError::Invalid {
                        variable: "REPORT_SINK",
                        value: other.to_string(),
                    });
                }
                SinkSettings::Sheets(SheetsSettings {
                    spreadsheet_id: required(&lookup, &mut problems, "GOOGLE_SHEET_ID"),
                    service_account_email: required(&lookup, &mut problems, "GOOGLE_SERVICE_ACCOUNT_EMAIL"),
                    private_key: required(&lookup, &mut problems, "GOOGLE_PRIVATE_KEY"),
                    sheet_name: optional(&lookup, "GOOGLE_SHEET_NAME")
                        .unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
                })
            }
        };

        let window_days = numeric(
            &lookup,
            &mut problems,
            "REPORT_WINDOW_DAYS",
            u64::from(DEFAULT_WINDOW_DAYS),
        );
        let window_days = u32::try_from(window_days).unwrap_or_else(|_| {
            problems.push(ConfigError::Invalid {
                variable: "REPORT_WINDOW_DAYS",
                value: window_days.to_string(),
            });
            DEFAULT_WINDOW_DAYS
        });
        let page_size = match numeric(&lookup, &mut problems, "REPORT_PAGE_SIZE", DEFAULT_PAGE_SIZE) {
            0 => {
                problems.push(ConfigError::Invalid {
                    variable: "REPORT_PAGE_SIZE",
                    value: "0".to_string(),
                });
                DEFAULT_PAGE_SIZE
            }
            size => size,
        };
        let interval_secs = numeric(&lookup, &mut problems, "REPORT_INTERVAL_SECS", DEFAULT_INTERVAL_SECS);

        let config = AppConfig {
            jira,
            sink,
            window_days,
            page_size,
            interval: (interval_secs > 0).then(|| Duration::from_secs(interval_secs)),
        };
        (config, problems)
    }

    /// Client settings for the Jira API crate.
    pub fn jira_client_config(&self) -> JiraConfig {
        JiraConfig::new(&self.jira.api_root, &self.jira.email, &self.jira.token)
            .with_auth_method(self.jira.auth_method.clone())
            .with_cooldown(self.jira.cooldown)
    }

    /// JQL selecting issues of the project's open sprints.

    pub fn issue_query(&self) -> String {
        format!("sprint in openSprints() AND project = {}", self.jira.project)
    }

    /// JQL selecting every subtask of the project.
    pub fn subtask_query(&self) -> String {
        format!("type in subTaskIssueTypes() and project = {}", self.jira.project)
    }
}

/// Trimmed value, or `None` when unset or blank.
fn optional<F>(lookup: &F, variable: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(variable)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, problems: &mut Vec<ConfigError>, variable: &'static str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, variable).unwrap_or_else(|| {
        problems.push(ConfigError::Missing { variable });
        String::new()
    })
}

fn numeric<F>(lookup: &F, problems: &mut Vec<ConfigError>, variable: &'static str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, variable) {
        None => default,
        Some(value) => value.parse().unwrap_or_else(|_| {
            problems.push(ConfigError::Invalid { variable, value });
            default
        }),
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sink = match &self.sink {
            SinkSettings::Sheets(sheets) => format!("sheets({}/{})", sheets.spreadsheet_id, sheets.sheet_name),
            SinkSettings::Console => "console".to_string(),
        };
        f.debug_struct("AppConfig")
            .field("jira_api_root", &self.jira.api_root)
            .field("jira_email", &self.jira.email)
            .field("jira_project", &self.jira.project)
            .field("jira_auth_method", &self.jira.auth_method)
            .field("jira_cooldown", &self.jira.cooldown)
            .field("sink", &sink)
            .field("window_days", &self.window_days)
            .field("page_size", &self.page_size)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
