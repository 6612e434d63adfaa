//! Outbound Slack webhook message.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::alarm::AlarmEvent;
use crate::config::{NotifyConfig, DEFAULT_ICON_EMOJI, DEFAULT_USERNAME};

/// Attachment color for alarm reasons.
pub const ATTACHMENT_COLOR: &str = "danger";

/// Attachment title for alarm reasons.
pub const ATTACHMENT_TITLE: &str = "Reason";

/// Body POSTed to the incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub text: String,
    pub attachments: Vec<SlackAttachment>,
    pub channel: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon_emoji: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub text: String,
    pub color: String,
    pub title: String,
}

impl SlackMessage {
    /// Map an alarm onto a message. Username and icon come from `config`
    /// and may still be empty; see [`SlackMessage::with_defaults`].
    #[must_use]
    pub fn from_alarm(event: &AlarmEvent, config: &NotifyConfig) -> Self {
        info!(
            alarm = %event.alarm_name,
            reason = %event.new_state_reason,
            "New alarm"
        );

        Self {
            text: format!("`{}`", event.alarm_name),
            attachments: vec![SlackAttachment {
                text: event.new_state_reason.clone(),
                color: ATTACHMENT_COLOR.to_string(),
                title: ATTACHMENT_TITLE.to_string(),
            }],
            channel: event.channel.clone(),
            icon_emoji: config.icon_emoji.clone(),
            username: config.username.clone(),
        }
    }

    /// Fill empty username, channel and icon with their fallbacks.
    #[must_use]
    pub fn with_defaults(mut self, config: &NotifyConfig) -> Self {
        if self.username.is_empty() {
            self.username = DEFAULT_USERNAME.to_string();
        }
        if self.channel.is_empty() {
            self.channel.clone_from(&config.fallback_channel);
        }
        if self.icon_emoji.is_empty() {
            self.icon_emoji = DEFAULT_ICON_EMOJI.to_string();
        }
        self
    }

    /// Build the final message for an alarm.
    #[must_use]
    pub fn build(event: &AlarmEvent, config: &NotifyConfig) -> Self {
        Self::from_alarm(event, config).with_defaults(config)
    }
}
