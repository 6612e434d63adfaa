//! CloudWatch alarm forwarder for Slack.
//!
//! An SNS topic fans CloudWatch alarm notifications out to a Lambda function
//! built from this crate. Each invocation decodes the alarm carried by the
//! SNS record, maps it onto a Slack message and POSTs it to an incoming
//! webhook.
//!
//! # Usage
//!
//! ```no_run
//! use alarm_notify::channels::slack::SlackWebhook;
//! use alarm_notify::events::SnsEnvelope;
//! use alarm_notify::{handle_envelope, NotifyConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NotifyConfig::from_env()?;
//! let slack = SlackWebhook::from_config(&config)?;
//!
//! let envelope = SnsEnvelope::from_messages(["HighCPU,#ops,CPU above threshold"]);
//! handle_envelope(&envelope, &config, &slack).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! Resolved once by [`NotifyConfig::from_env`]:
//!
//! - `SLACK_WEBHOOK`: incoming webhook URL (required)
//! - `SLACK_CHANNEL`: default channel, overridden by the payload
//! - `SLACK_USERNAME` / `SLACK_EMOJI`: bot name and icon
//! - `SLACK_FALLBACK_CHANNEL`: channel when nothing else names one
//! - `SLACK_TIMEOUT_SECS`: webhook request timeout
//! - `SLACK_IGNORE_HTTP_STATUS`: treat non-200 responses as delivered
//! - `NOTIFY_ALL_RECORDS`: process every SNS record, not just the first
//!
//! # Payloads
//!
//! The SNS message is either CloudWatch alarm JSON or the positional form
//! `<alarm name>,<channel>,<reason...>`. See [`alarm::AlarmPayload`].

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod alarm;
pub mod channels;
pub mod config;
pub mod error;
pub mod events;
pub mod handler;
pub mod message;

pub use alarm::{AlarmEvent, AlarmPayload};
pub use channels::slack::SlackWebhook;
pub use channels::NotifyChannel;
pub use config::{NotifyConfig, RecordMode, StatusPolicy};
pub use error::{ConfigError, DecodeError, NotifyError};
pub use events::SnsEnvelope;
pub use handler::handle_envelope;
pub use message::{SlackAttachment, SlackMessage};
