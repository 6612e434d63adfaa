//! CloudWatch alarm payload decoding.
//!
//! An SNS message carries either the CloudWatch alarm JSON or the legacy
//! positional form `<alarm name>,<channel>,<reason...>`. Structured decoding
//! is attempted first; the positional form is only consulted when that fails.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DecodeError;

/// Alarm fields the forwarder relays.
///
/// Keys match case-insensitively and the last occurrence wins. A `null`
/// value leaves the field as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlarmEvent {
    #[serde(rename = "AlarmName")]
    pub alarm_name: String,
    #[serde(rename = "NewStateValue")]
    pub new_state_value: String,
    #[serde(rename = "NewStateReason")]
    pub new_state_reason: String,
    /// Target channel, after resolution against the configured default.
    #[serde(rename = "Channel")]
    pub channel: String,
}

impl<'de> Deserialize<'de> for AlarmEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AlarmEventVisitor)
    }
}

struct AlarmEventVisitor;

impl<'de> Visitor<'de> for AlarmEventVisitor {
    type Value = AlarmEvent;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a CloudWatch alarm object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<AlarmEvent, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut event = AlarmEvent::default();

        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("AlarmName") {
                &mut event.alarm_name
            } else if key.eq_ignore_ascii_case("NewStateValue") {
                &mut event.new_state_value
            } else if key.eq_ignore_ascii_case("NewStateReason") {
                &mut event.new_state_reason
            } else if key.eq_ignore_ascii_case("Channel") {
                &mut event.channel
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }

        Ok(event)
    }
}

/// A payload tagged with the format it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmPayload {
    /// CloudWatch alarm JSON
    Structured(AlarmEvent),
    /// `<alarm name>,<channel>,<reason...>`
    Positional(AlarmEvent),
}

impl AlarmPayload {
    /// Decode a raw SNS message.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        match serde_json::from_str::<AlarmEvent>(raw) {
            Ok(event) => Ok(Self::Structured(event)),
            Err(_) => parse_positional(raw).map(Self::Positional),
        }
    }

    /// Resolve the channel against `default_channel` and return the event.
    ///
    /// A structured payload keeps its own channel only when it is non-empty.
    /// A positional payload always keeps field 1, even when empty.
    #[must_use]
    pub fn resolve(self, default_channel: &str) -> AlarmEvent {
        match self {
            Self::Structured(mut event) => {
                if event.channel.is_empty() {
                    event.channel = default_channel.to_string();
                }
                event
            }
            Self::Positional(event) => event,
        }
    }

    #[must_use]
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

/// Decode a raw SNS message and resolve its channel in one step.
pub fn decode(raw: &str, default_channel: &str) -> Result<AlarmEvent, DecodeError> {
    AlarmPayload::parse(raw).map(|payload| payload.resolve(default_channel))
}

fn parse_positional(raw: &str) -> Result<AlarmEvent, DecodeError> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() < 2 {
        return Err(DecodeError::TooFewFields {
            found: fields.len(),
        });
    }

    Ok(AlarmEvent {
        alarm_name: fields[0].to_string(),
        new_state_value: String::new(),
        new_state_reason: fields[2..].join(","),
        channel: fields[1].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_payload() {
        let raw = r##"{"AlarmName":"HighCPU","NewStateValue":"ALARM","NewStateReason":"CPU > 90%","Channel":"#ops"}"##;
        let payload = AlarmPayload::parse(raw).unwrap();
        assert!(payload.is_structured());

        let event = payload.resolve("#default");
        assert_eq!(event.alarm_name, "HighCPU");
        assert_eq!(event.new_state_value, "ALARM");
        assert_eq!(event.new_state_reason, "CPU > 90%");
        assert_eq!(event.channel, "#ops");
    }

    #[test]
    fn test_structured_payload_without_channel_uses_default() {
        let raw = r#"{"AlarmName":"HighCPU","NewStateValue":"ALARM","NewStateReason":"CPU > 90%"}"#;
        let event = decode(raw, "#default").unwrap();
        assert_eq!(event.channel, "#default");

        let raw = r#"{"AlarmName":"HighCPU","Channel":""}"#;
        let event = decode(raw, "#default").unwrap();
        assert_eq!(event.channel, "#default");
        assert_eq!(event.new_state_reason, "");
    }

    #[test]
    fn test_structured_payload_lowercase_channel() {
        let event = decode(r##"{"AlarmName":"Disk","channel":"#infra"}"##, "").unwrap();
        assert_eq!(event.channel, "#infra");
    }

    #[test]
    fn test_positional_payload_rejoins_reason() {
        let payload = AlarmPayload::parse("HighCPU,#ops,CPU above threshold,again").unwrap();
        assert!(!payload.is_structured());

        let event = payload.resolve("#default");
        assert_eq!(event.alarm_name, "HighCPU");
        assert_eq!(event.channel, "#ops");
        assert_eq!(event.new_state_reason, "CPU above threshold,again");
        assert_eq!(event.new_state_value, "");
    }

    #[test]
    fn test_positional_payload_overrides_default_even_when_empty() {
        let event = decode("HighCPU,,reason", "#default").unwrap();
        assert_eq!(event.channel, "");
        assert_eq!(event.new_state_reason, "reason");
    }

    #[test]
    fn test_positional_payload_with_two_fields_has_empty_reason() {
        let event = decode("HighCPU,#ops", "#default").unwrap();
        assert_eq!(event.channel, "#ops");
        assert_eq!(event.new_state_reason, "");
    }

    #[test]
    fn test_single_field_payload_is_rejected() {
        assert_eq!(
            AlarmPayload::parse("HighCPU").unwrap_err(),
            DecodeError::TooFewFields { found: 1 }
        );
        assert_eq!(
            decode("", "#default").unwrap_err(),
            DecodeError::TooFewFields { found: 1 }
        );
    }

    #[test]
    fn test_non_object_json_falls_back_to_positional() {
        // Valid JSON, but not an alarm object
        assert!(matches!(
            AlarmPayload::parse("42"),
            Err(DecodeError::TooFewFields { found: 1 })
        ));

        let payload = AlarmPayload::parse("[1,2,3]").unwrap();
        assert_eq!(
            payload,
            AlarmPayload::Positional(AlarmEvent {
                alarm_name: "[1".to_string(),
                new_state_value: String::new(),
                new_state_reason: "3]".to_string(),
                channel: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_null_fields_decode_as_structured() {
        let raw = r#"{"AlarmName":"HighCPU","NewStateValue":"ALARM","NewStateReason":null}"#;
        let payload = AlarmPayload::parse(raw).unwrap();
        assert!(payload.is_structured());

        let event = payload.resolve("#default");
        assert_eq!(event.alarm_name, "HighCPU");
        assert_eq!(event.new_state_value, "ALARM");
        assert_eq!(event.new_state_reason, "");
        assert_eq!(event.channel, "#default");

        let event = decode(r#"{"AlarmName":"HighCPU","Channel":null}"#, "#default").unwrap();
        assert_eq!(event.channel, "#default");
    }

    #[test]
    fn test_repeated_channel_keys_last_wins() {
        let raw = r##"{"AlarmName":"HighCPU","NewStateReason":"CPU > 90%","Channel":"#ops","channel":"#infra"}"##;
        let payload = AlarmPayload::parse(raw).unwrap();
        assert!(payload.is_structured());

        let event = payload.resolve("#default");
        assert_eq!(event.channel, "#infra");
        assert_eq!(event.new_state_reason, "CPU > 90%");

        let event = decode(r##"{"channel":"#infra","CHANNEL":"#ops"}"##, "").unwrap();
        assert_eq!(event.channel, "#ops");
    }

    #[test]
    fn test_null_keeps_earlier_value() {
        let event = decode(r##"{"AlarmName":"HighCPU","Channel":"#ops","channel":null}"##, "")
            .unwrap();
        assert_eq!(event.channel, "#ops");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let raw = r#"{"AlarmName":"HighCPU","Trigger":{"Threshold":90.0},"AWSAccountId":"123"}"#;
        let event = decode(raw, "").unwrap();
        assert_eq!(event.alarm_name, "HighCPU");
    }

    #[test]
    fn test_non_string_field_falls_back_to_positional() {
        let payload = AlarmPayload::parse(r#"{"AlarmName":42,"NewStateReason":"x"}"#).unwrap();
        assert!(!payload.is_structured());
    }
}
