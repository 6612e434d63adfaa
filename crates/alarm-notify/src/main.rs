//! Lambda binary: relays SNS-delivered CloudWatch alarms to Slack.

use anyhow::Context;
use lambda_runtime::{service_fn, LambdaEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

use alarm_notify::channels::slack::SlackWebhook;
use alarm_notify::events::SnsEnvelope;
use alarm_notify::handler::function_handler;
use alarm_notify::NotifyConfig;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // CloudWatch stamps every line, so no timestamps here
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("alarm_notify=info,warn")),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = NotifyConfig::from_env().context("failed to load configuration")?;
    let channel = SlackWebhook::from_config(&config).context("failed to build webhook client")?;

    info!(
        status_policy = ?config.status_policy,
        record_mode = ?config.record_mode,
        timeout_secs = config.timeout.as_secs(),
        "Alarm forwarder initialized"
    );

    let config = &config;
    let channel = &channel;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<SnsEnvelope>| async move {
        function_handler(event, config, channel).await
    }))
    .await
}
