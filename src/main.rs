#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sprint_worklog_report::run().await
}
