//! Publishes the time each team member logged on open-sprint Jira issues.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use jira_api::JiraClient;
use log::{debug, error, info, warn};

pub mod config;
pub mod error;
pub mod issue_set;
pub mod pipeline;
pub mod runner;
pub mod scheduler;
pub mod sink;
pub mod tracker;

use config::{AppConfig, ConfigError, SinkSettings};
use runner::{ReportRunner, RunSettings};
use scheduler::{run_scheduled, Schedule};
use sink::{ConsoleSink, ServiceAccountAuth, ServiceAccountKey, SheetsSink, TabularSink};

const SHEETS_TIMEOUT_SECS: u64 = 30;

fn run_settings(config: &AppConfig) -> RunSettings {
    RunSettings {
        issue_query: config.issue_query(),
        subtask_query: config.subtask_query(),
        window_days: config.window_days,
        page_size: config.page_size,
    }
}

fn build_sink(config: &AppConfig) -> anyhow::Result<Arc<dyn TabularSink>> {
    match &config.sink {
        SinkSettings::Console => Ok(Arc::new(ConsoleSink::new())),
        SinkSettings::Sheets(sheets) => {
            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(SHEETS_TIMEOUT_SECS))
                .build()
                .context("failed to build Sheets HTTP client")?;
            let key = ServiceAccountKey::new(&sheets.service_account_email, &sheets.private_key);
            let auth = ServiceAccountAuth::new(http.clone(), key);
            Ok(Arc::new(SheetsSink::new(
                http,
                auth,
                &sheets.spreadsheet_id,
                &sheets.sheet_name,
            )))
        }
    }
}

fn report_config_problems(problems: &[ConfigError]) {
    for problem in problems {
        match problem {
            ConfigError::Missing { .. } => error!("{}", problem),
            ConfigError::Invalid { .. } => warn!("{}", problem),
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }
}

/// Process entry point: configures logging, then runs the report on its schedule.
pub async fn run() -> anyhow::Result<()> {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .try_init();

    info!("Starting sprint worklog report");

    let (config, problems) = AppConfig::from_env();
    report_config_problems(&problems);
    debug!("Configuration: {:?}", config);

    let tracker = JiraClient::new(config.jira_client_config()).context("failed to build Jira client")?;
    let sink = build_sink(&config)?;
    let runner = Arc::new(ReportRunner::new(Arc::new(tracker), sink, run_settings(&config)));
    let schedule = Schedule::from_interval(config.interval);
    let last_failed = Arc::new(AtomicBool::new(false));

    let job_failed = last_failed.clone();
    let runs = run_scheduled(schedule, shutdown_signal(), move || {
        let runner = runner.clone();
        let failed = job_failed.clone();
        async move {
            match runner.run_once().await {
                Ok(_) => failed.store(false, Ordering::SeqCst),
                Err(err) => {
                    failed.store(true, Ordering::SeqCst);
                    warn!("Report run failed: {}", err);
                }
            }
        }
    })
    .await;

    info!("Stopped after {} run(s)", runs);
    if schedule == Schedule::Once && last_failed.load(Ordering::SeqCst) {
        anyhow::bail!("report run failed");
    }
    Ok(())
}
