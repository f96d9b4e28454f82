//! Run the digest once from the command line and print it.
//! Pass `--send` to also post it to the configured Slack hook.

use std::sync::Arc;

use anyhow::Context;
use lunch_digest::notify::SlackChannel;
use lunch_digest::report::TracingReporter;
use lunch_digest::transport::{ReqwestTransport, Transport};
use lunch_digest::{build_digest, AppConfig, Lineup, MenuDay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let send = std::env::args().any(|a| a == "--send");
    let config = AppConfig::load()?;
    let day = MenuDay::today();
    if !day.is_workday() {
        println!("{}", lunch_digest::api::WEEKEND_MESSAGE);
        return Ok(());
    }

    let http: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config.fetch_timeout())?);
    let lineup = Lineup::standard(http.clone(), &config);
    let digest = build_digest(&lineup, day, &config, Arc::new(TracingReporter))
        .await
        .context("building digest")?;

    println!("{digest}");

    if send {
        let hook = config
            .slack_hook
            .clone()
            .context("--send needs SLACK_HOOK")?;
        SlackChannel::new(hook, http)
            .with_channel(config.slack_channel.clone())
            .send(&digest.render())
            .await
            .context("posting to slack")?;
    }
    Ok(())
}
