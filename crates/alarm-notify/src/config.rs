//! Runtime configuration, resolved once at cold start.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Default channel for the notification, overridable by the payload.
pub const ENV_SLACK_CHANNEL: &str = "SLACK_CHANNEL";

/// Bot display name.
pub const ENV_SLACK_USERNAME: &str = "SLACK_USERNAME";

/// Bot icon emoji.
pub const ENV_SLACK_EMOJI: &str = "SLACK_EMOJI";

/// Incoming webhook URL.
pub const ENV_SLACK_WEBHOOK: &str = "SLACK_WEBHOOK";

/// Channel used when neither the environment nor the payload names one.
pub const ENV_SLACK_FALLBACK_CHANNEL: &str = "SLACK_FALLBACK_CHANNEL";

/// Request timeout in whole seconds.
pub const ENV_SLACK_TIMEOUT_SECS: &str = "SLACK_TIMEOUT_SECS";

/// Treat non-200 webhook responses as success.
pub const ENV_SLACK_IGNORE_HTTP_STATUS: &str = "SLACK_IGNORE_HTTP_STATUS";

/// Process every SNS record instead of only the first.
pub const ENV_NOTIFY_ALL_RECORDS: &str = "NOTIFY_ALL_RECORDS";

/// Username applied when none is configured.
pub const DEFAULT_USERNAME: &str = "AWS";

/// Channel applied when none is configured or decoded.
pub const DEFAULT_FALLBACK_CHANNEL: &str = "@dicruzg";

/// Icon applied when none is configured.
pub const DEFAULT_ICON_EMOJI: &str = ":cloudform:";

/// Default webhook request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// How non-200 webhook responses are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Any status other than 200 fails the invocation
    #[default]
    Strict,
    /// Non-200 is logged and the delivery counts as sent
    Lenient,
}

/// Which records of an SNS envelope are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    /// Only the first record; the rest are ignored
    #[default]
    First,
    /// Every record, in order
    All,
}

/// Configuration for the alarm forwarder.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Channel applied before the payload is decoded. May be empty.
    pub channel: String,
    /// Bot display name. May be empty.
    pub username: String,
    /// Bot icon emoji. May be empty.
    pub icon_emoji: String,
    /// Destination for every message.
    pub webhook_url: Url,
    /// Channel used when the resolved channel is empty.
    pub fallback_channel: String,
    /// Deadline for one webhook request.
    pub timeout: Duration,
    pub status_policy: StatusPolicy,
    pub record_mode: RecordMode,
}

impl NotifyConfig {
    /// Create configuration from environment variables.
    ///
    /// # Required Environment Variables
    /// - `SLACK_WEBHOOK`: Slack incoming webhook URL
    ///
    /// # Optional Environment Variables
    /// - `SLACK_CHANNEL`, `SLACK_USERNAME`, `SLACK_EMOJI`: message defaults
    /// - `SLACK_FALLBACK_CHANNEL`: last-resort channel (default: @dicruzg)
    /// - `SLACK_TIMEOUT_SECS`: request timeout (default: 10)
    /// - `SLACK_IGNORE_HTTP_STATUS`: `true` to swallow non-200 responses
    /// - `NOTIFY_ALL_RECORDS`: `true` to process every SNS record
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).unwrap_or_default();

        let raw_webhook = var(ENV_SLACK_WEBHOOK);
        if raw_webhook.trim().is_empty() {
            return Err(ConfigError::Missing(ENV_SLACK_WEBHOOK));
        }
        let webhook_url = Url::parse(raw_webhook.trim()).map_err(|e| ConfigError::Invalid {
            name: ENV_SLACK_WEBHOOK,
            reason: e.to_string(),
        })?;

        let fallback_channel = lookup(ENV_SLACK_FALLBACK_CHANNEL)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FALLBACK_CHANNEL.to_string());

        let timeout = match lookup(ENV_SLACK_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: ENV_SLACK_TIMEOUT_SECS,
                    reason: format!("expected whole seconds, got {raw:?}"),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: ENV_SLACK_TIMEOUT_SECS,
                        reason: "timeout must be at least one second".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let status_policy = if is_truthy(&var(ENV_SLACK_IGNORE_HTTP_STATUS)) {
            StatusPolicy::Lenient
        } else {
            StatusPolicy::Strict
        };

        let record_mode = if is_truthy(&var(ENV_NOTIFY_ALL_RECORDS)) {
            RecordMode::All
        } else {
            RecordMode::First
        };

        Ok(Self {
            channel: var(ENV_SLACK_CHANNEL),
            username: var(ENV_SLACK_USERNAME),
            icon_emoji: var(ENV_SLACK_EMOJI),
            webhook_url,
            fallback_channel,
            timeout,
            status_policy,
            record_mode,
        })
    }

    /// Configuration with only a webhook URL set and every other value at its default.
    #[must_use]
    pub fn with_webhook(webhook_url: Url) -> Self {
        Self {
            channel: String::new(),
            username: String::new(),
            icon_emoji: String::new(),
            webhook_url,
            fallback_channel: DEFAULT_FALLBACK_CHANNEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            status_policy: StatusPolicy::default(),
            record_mode: RecordMode::default(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
