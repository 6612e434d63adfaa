//! Per-invocation pipeline: decode, build, deliver.

use lambda_runtime::LambdaEvent;
use tracing::{debug, info};

use crate::alarm;
use crate::config::{NotifyConfig, RecordMode};
use crate::error::NotifyError;
use crate::events::{SnsEnvelope, SnsRecord};
use crate::message::SlackMessage;
use crate::NotifyChannel;

/// Process one SNS envelope and return the number of messages delivered.
pub async fn handle_envelope(
    envelope: &SnsEnvelope,
    config: &NotifyConfig,
    channel: &dyn NotifyChannel,
) -> Result<usize, NotifyError> {
    let records: &[SnsRecord] = match config.record_mode {
        RecordMode::First => {
            let first = envelope
                .records
                .first()
                .ok_or(NotifyError::EmptyEnvelope)?;
            if envelope.records.len() > 1 {
                debug!(
                    ignored = envelope.records.len() - 1,
                    "Only the first SNS record is processed"
                );
            }
            std::slice::from_ref(first)
        }
        RecordMode::All => {
            if envelope.records.is_empty() {
                return Err(NotifyError::EmptyEnvelope);
            }
            &envelope.records
        }
    };

    for record in records {
        let event = alarm::decode(&record.sns.message, &config.channel)?;
        let message = SlackMessage::build(&event, config);

        debug!(
            sns_type = %record.sns.kind,
            sns_timestamp = %record.sns.timestamp,
            channel = %message.channel,
            username = %message.username,
            "Built notification"
        );

        channel.send(&message).await?;
        info!(channel = channel.name(), "Notification has been sent");
    }

    Ok(records.len())
}

/// Lambda entry point bound to a resolved configuration and channel.
pub async fn function_handler(
    event: LambdaEvent<SnsEnvelope>,
    config: &NotifyConfig,
    channel: &dyn NotifyChannel,
) -> Result<(), lambda_runtime::Error> {
    debug!(request_id = %event.context.request_id, "Handling SNS event");
    handle_envelope(&event.payload, config, channel).await?;
    Ok(())
}
