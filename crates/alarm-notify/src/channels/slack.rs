//! Slack incoming webhook channel.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use tracing::{debug, warn};

use crate::config::{NotifyConfig, StatusPolicy};
use crate::error::NotifyError;
use crate::message::SlackMessage;
use crate::NotifyChannel;

/// Slack incoming webhook channel.
pub struct SlackWebhook {
    webhook_url: Url,
    status_policy: StatusPolicy,
    client: reqwest::Client,
}

impl SlackWebhook {
    /// Create a webhook channel from resolved configuration.
    pub fn from_config(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            webhook_url: config.webhook_url.clone(),
            status_policy: config.status_policy,
            client,
        })
    }

    #[must_use]
    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }
}

impl std::fmt::Debug for SlackWebhook {
    // The webhook URL embeds its secret token.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackWebhook")
            .field("host", &self.webhook_url.host_str())
            .field("status_policy", &self.status_policy)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl NotifyChannel for SlackWebhook {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(&self, message: &SlackMessage) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(message)?;

        debug!(channel = "slack", target = %message.channel, "Sending notification");

        let response = self
            .client
            .post(self.webhook_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(channel = "slack", "Notification sent successfully");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        match self.status_policy {
            StatusPolicy::Strict => {
                warn!(
                    channel = "slack",
                    status = %status,
                    body = %body,
                    "Slack webhook request failed"
                );
                Err(NotifyError::Status { status, body })
            }
            StatusPolicy::Lenient => {
                warn!(
                    channel = "slack",
                    status = %status,
                    body = %body,
                    "Slack webhook request failed, ignoring status"
                );
                Ok(())
            }
        }
    }
}
