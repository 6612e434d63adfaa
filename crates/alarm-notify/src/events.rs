//! Inbound SNS event types.
//!
//! Only the fields the forwarder reads are modelled; signatures, topic ARNs
//! and message attributes are ignored during deserialization.

use serde::{Deserialize, Serialize};

/// The event Lambda hands to an SNS-triggered function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

/// One delivery within the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

/// The SNS notification body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnsNotification {
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,
    /// Alarm payload: CloudWatch alarm JSON or `<name>,<channel>,<reason>`.
    #[serde(rename = "Message", default)]
    pub message: String,
}

impl SnsEnvelope {
    /// Build an envelope with one `Notification` record per message.
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: messages
                .into_iter()
                .map(|message| SnsRecord {
                    sns: SnsNotification {
                        kind: "Notification".to_string(),
                        timestamp: String::new(),
                        message: message.into(),
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_lambda_sns_event() {
        let raw = r#"{
            "Records": [
                {
                    "EventSource": "aws:sns",
                    "EventVersion": "1.0",
                    "Sns": {
                        "Type": "Notification",
                        "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                        "TopicArn": "arn:aws:sns:us-east-1:123456789012:alarms",
                        "Timestamp": "2019-01-02T12:45:07.000Z",
                        "Message": "{\"AlarmName\":\"HighCPU\"}",
                        "MessageAttributes": {}
                    }
                },
                { "Sns": { "Message": "second" } }
            ]
        }"#;

        let envelope: SnsEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.records.len(), 2);

        let first = &envelope.records[0].sns;
        assert_eq!(first.kind, "Notification");
        assert_eq!(first.timestamp, "2019-01-02T12:45:07.000Z");
        assert_eq!(first.message, r#"{"AlarmName":"HighCPU"}"#);

        assert_eq!(envelope.records[1].sns.message, "second");
        assert_eq!(envelope.records[1].sns.kind, "");
    }

    #[test]
    fn test_missing_records_is_empty() {
        let envelope: SnsEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.records.is_empty());
    }
}
