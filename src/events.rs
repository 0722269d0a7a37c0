//! Wire events exchanged on the campaign channel.
//!
//! Inbound messages are JSON objects discriminated by a `type` field:
//! `{"type": "contribution_update", "contribution": {...}}` and so on.
//! Unknown `type` values must never crash the reconciler — they are logged
//! and dropped so newer servers can ship event types older clients ignore.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{CampaignPatch, Contribution, Milestone};

/// Event types this client knows how to apply.
const KNOWN_EVENT_TYPES: &[&str] = &["contribution_update", "milestone_update", "campaign_update"];

/// A server-pushed event on the campaign channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CampaignEvent {
    /// A new contribution was recorded; appended to the local sequence.
    ContributionUpdate { contribution: Contribution },
    /// A milestone changed; replaces the matching entry by id.
    MilestoneUpdate { milestone: Milestone },
    /// Campaign fields changed; shallow-merged into the local campaign.
    CampaignUpdate { campaign: CampaignPatch },
}

/// Decode one inbound text frame.
///
/// Returns `Ok(None)` for well-formed messages of an unrecognized type (the
/// forward-compatibility path) and `Err` only for malformed JSON or a known
/// type with a bad payload. Callers log and drop errors; they never abort
/// the event loop.
pub fn decode_event(raw: &str) -> Result<Option<CampaignEvent>, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    match value.get("type").and_then(Value::as_str) {
        Some(event_type) if KNOWN_EVENT_TYPES.contains(&event_type) => {
            serde_json::from_value(value).map(Some)
        }
        Some(other) => {
            tracing::warn!(event_type = other, "ignoring unknown campaign event type");
            Ok(None)
        }
        None => {
            tracing::warn!("ignoring campaign event without a type discriminator");
            Ok(None)
        }
    }
}

/// Outbound request asking the server to rebroadcast a resource's current
/// state. Exists for completeness of the channel contract; the dashboard
/// path never sends it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefreshRequest {
    Contribution { data: ResourceRef },
    Milestone { data: ResourceRef },
    Update { data: ResourceRef },
}

/// Reference to a single resource by server-assigned id.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_contribution_update() {
        let raw = r#"{
            "type": "contribution_update",
            "contribution": {"id": "k2", "amount": 20.0, "currency": "USD"}
        }"#;
        let event = decode_event(raw).unwrap().unwrap();
        match event {
            CampaignEvent::ContributionUpdate { contribution } => {
                assert_eq!(contribution.id, "k2");
                assert_eq!(contribution.amount, 20.0);
            }
            _ => panic!("Expected ContributionUpdate"),
        }
    }

    #[test]
    fn decodes_milestone_update() {
        let raw = r#"{
            "type": "milestone_update",
            "milestone": {"id": "m1", "title": "First well", "target_amount": 10000.0, "progress": 55.0}
        }"#;
        let event = decode_event(raw).unwrap().unwrap();
        match event {
            CampaignEvent::MilestoneUpdate { milestone } => {
                assert_eq!(milestone.id, "m1");
                assert_eq!(milestone.progress, 55.0);
            }
            _ => panic!("Expected MilestoneUpdate"),
        }
    }

    #[test]
    fn decodes_campaign_update_as_partial_patch() {
        let raw = r#"{"type": "campaign_update", "campaign": {"title": "T2"}}"#;
        let event = decode_event(raw).unwrap().unwrap();
        match event {
            CampaignEvent::CampaignUpdate { campaign } => {
                assert_eq!(campaign.title.as_deref(), Some("T2"));
                assert!(campaign.fund_amount.is_none());
            }
            _ => panic!("Expected CampaignUpdate"),
        }
    }

    #[test]
    fn unknown_event_type_is_dropped_not_an_error() {
        let raw = r#"{"type": "comment_update", "comment": {"id": "x"}}"#;
        assert_eq!(decode_event(raw).unwrap(), None);
    }

    #[test]
    fn missing_type_discriminator_is_dropped() {
        let raw = r#"{"contribution": {"id": "k1", "amount": 1.0}}"#;
        assert_eq!(decode_event(raw).unwrap(), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(decode_event("not json").is_err());
    }

    #[test]
    fn known_type_with_bad_payload_is_an_error() {
        let raw = r#"{"type": "milestone_update", "milestone": {"title": 7}}"#;
        assert!(decode_event(raw).is_err());
    }

    #[test]
    fn event_serializes_with_snake_case_tag() {
        let event = CampaignEvent::CampaignUpdate {
            campaign: CampaignPatch {
                title: Some("T2".to_string()),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"campaign_update""#));
        assert!(json.contains(r#""campaign":{"title":"T2"}"#));
    }

    #[test]
    fn refresh_request_matches_channel_contract() {
        let request = RefreshRequest::Milestone {
            data: ResourceRef {
                id: "m1".to_string(),
            },
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"milestone","data":{"id":"m1"}}"#);
    }
}
