//! Delivery channel implementations.

pub mod slack;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::message::SlackMessage;

/// Trait for message delivery targets.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Deliver one message.
    async fn send(&self, message: &SlackMessage) -> Result<(), NotifyError>;
}
