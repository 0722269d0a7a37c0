//! Client-side data model for one campaign's aggregate state.
//!
//! Field names mirror the backend's JSON representation. All entities live
//! in memory for the lifetime of a mounted campaign view; nothing here is
//! persisted locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Campaign lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Funded,
    Completed,
    Cancelled,
}

/// The top-level crowdfunding project entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub story: Option<String>,
    /// Funding target in `currency` units.
    pub fund_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub token_symbol: Option<String>,
    pub status: CampaignStatus,
    /// Whether the viewing user owns this campaign.
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Ordered; socket events replace entries in place, never reorder.
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    /// Ordered news posts for the campaign.
    #[serde(default)]
    pub updates: Vec<CampaignUpdate>,
}

/// A sub-goal of a campaign with its own target amount and completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: f64,
    /// Completion percentage, 0–100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// A single funding event against a campaign. Append-only from the client's
/// perspective: insertion order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Display reference to the contributor, absent for anonymous donors.
    #[serde(default)]
    pub contributor: Option<String>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A news post published by the campaign owner (the `updates` sub-resource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignUpdate {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The merged aggregate a campaign view renders: campaign fields plus the
/// contribution sequence. Seeded by the initial fetch, then mutated by the
/// reconciliation reducer and by store CRUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignState {
    pub campaign: Campaign,
    pub contributions: Vec<Contribution>,
}

// ── Patch types ──────────────────────────────────────────────────────
//
// All-optional field sets. They serve two roles: PATCH request bodies
// (absent fields are not serialized) and the shallow-merge payload of
// `campaign_update` events (absent fields leave the current value alone).

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}

impl CampaignPatch {
    /// Shallow merge: only fields present in the patch overwrite the
    /// campaign's values. Milestone and update lists are never touched by a
    /// campaign-level patch.
    pub fn apply(&self, campaign: &mut Campaign) {
        if let Some(title) = &self.title {
            campaign.title = title.clone();
        }
        if let Some(description) = &self.description {
            campaign.description = description.clone();
        }
        if let Some(story) = &self.story {
            campaign.story = Some(story.clone());
        }
        if let Some(fund_amount) = self.fund_amount {
            campaign.fund_amount = fund_amount;
        }
        if let Some(currency) = &self.currency {
            campaign.currency = currency.clone();
        }
        if let Some(status) = self.status {
            campaign.status = status;
        }
        if let Some(contract_address) = &self.contract_address {
            campaign.contract_address = Some(contract_address.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.story.is_none()
            && self.fund_amount.is_none()
            && self.currency.is_none()
            && self.status.is_none()
            && self.contract_address.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestonePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// ── Create request bodies ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContribution {
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
    pub target_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Body for posting a news update. Image and attachment bytes, when present,
/// are sent as multipart form parts alongside the text fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUpdate {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_campaign() -> Campaign {
        Campaign {
            id: "c1".to_string(),
            title: "Clean Water for Kampala".to_string(),
            description: "Dig three wells".to_string(),
            story: None,
            fund_amount: 50_000.0,
            currency: "USD".to_string(),
            token_symbol: Some("LAK".to_string()),
            status: CampaignStatus::Active,
            is_owner: false,
            contract_address: None,
            created_at: None,
            milestones: vec![Milestone {
                id: "m1".to_string(),
                title: "First well".to_string(),
                description: String::new(),
                target_amount: 10_000.0,
                progress: 10.0,
                completed: false,
                due_date: None,
            }],
            updates: vec![],
        }
    }

    #[test]
    fn campaign_deserializes_with_missing_optional_fields() {
        let json = r#"{
            "id": "c1",
            "title": "T",
            "description": "D",
            "fund_amount": 100.0,
            "currency": "USD",
            "status": "active"
        }"#;
        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.id, "c1");
        assert!(campaign.milestones.is_empty());
        assert!(campaign.updates.is_empty());
        assert!(!campaign.is_owner);
    }

    #[test]
    fn campaign_status_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&CampaignStatus::Active).unwrap(),
            r#""active""#
        );
        let status: CampaignStatus = serde_json::from_str(r#""cancelled""#).unwrap();
        assert_eq!(status, CampaignStatus::Cancelled);
    }

    #[test]
    fn contribution_defaults_currency_to_usd() {
        let json = r#"{"id": "k1", "amount": 5.0}"#;
        let contribution: Contribution = serde_json::from_str(json).unwrap();
        assert_eq!(contribution.currency, "USD");
        assert!(!contribution.is_anonymous);
    }

    #[test]
    fn patch_skips_absent_fields_when_serialized() {
        let patch = CampaignPatch {
            title: Some("T2".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"title":"T2"}"#);
    }

    #[test]
    fn patch_apply_is_a_shallow_merge() {
        let mut campaign = sample_campaign();
        let patch = CampaignPatch {
            title: Some("T2".to_string()),
            fund_amount: Some(60_000.0),
            ..Default::default()
        };
        patch.apply(&mut campaign);
        assert_eq!(campaign.title, "T2");
        assert_eq!(campaign.fund_amount, 60_000.0);
        // Fields absent from the patch retain their prior value.
        assert_eq!(campaign.description, "Dig three wells");
        assert_eq!(campaign.status, CampaignStatus::Active);
        assert_eq!(campaign.milestones.len(), 1);
    }

    #[test]
    fn empty_patch_applies_as_a_no_op() {
        let mut campaign = sample_campaign();
        let before = campaign.clone();
        let patch = CampaignPatch::default();
        assert!(patch.is_empty());
        patch.apply(&mut campaign);
        assert_eq!(campaign, before);
    }

    #[test]
    fn milestone_patch_round_trips() {
        let patch = MilestonePatch {
            progress: Some(55.0),
            completed: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        let parsed: MilestonePatch = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, patch);
    }
}
