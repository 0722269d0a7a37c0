use crate::api::client::{CampaignApi, FilePart};
use crate::errors::ApiError;
use crate::models::{
    Campaign, CampaignPatch, CampaignState, CampaignUpdate, Contribution, Milestone,
    MilestonePatch, NewContribution, NewMilestone, NewUpdate, UpdatePatch,
};

/// Authoritative local copy of one campaign's aggregate state.
///
/// The store never applies an optimistic guess: mutations write to the
/// server first and fold the server's canonical response into local state
/// afterwards — full replace for the campaign, append for creates,
/// replace-in-place for edits, filter-out for deletes.
///
/// Every failure is recorded as a human-readable string in `last_error`
/// (for banner/alert rendering) and propagated as a typed [`ApiError`] so
/// the initiating UI action can show contextual feedback.
pub struct CampaignStore {
    api: CampaignApi,
    campaign_id: String,
    state: Option<CampaignState>,
    last_error: Option<String>,
}

impl CampaignStore {
    pub fn new(api: CampaignApi, campaign_id: impl Into<String>) -> Self {
        Self {
            api,
            campaign_id: campaign_id.into(),
            state: None,
            last_error: None,
        }
    }

    /// Initial load: campaign detail and contribution list are fetched in
    /// parallel. On success local state is populated and any stored error
    /// cleared; on failure the error is recorded and state stays empty.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let result = tokio::try_join!(
            self.api.fetch_campaign(&self.campaign_id),
            self.api.fetch_contributions(&self.campaign_id),
        );
        let (campaign, contributions) = self.record(result)?;
        self.state = Some(CampaignState {
            campaign,
            contributions,
        });
        self.last_error = None;
        Ok(())
    }

    // ── Campaign ─────────────────────────────────────────────────────

    /// PATCH the campaign. The local campaign is replaced wholesale by the
    /// server's response, overriding any local guess.
    pub async fn update_campaign(&mut self, patch: &CampaignPatch) -> Result<Campaign, ApiError> {
        self.ensure_loaded()?;
        let result = self.api.patch_campaign(&self.campaign_id, patch).await;
        let fresh = self.record(result)?;
        if let Some(state) = self.state.as_mut() {
            state.campaign = fresh.clone();
        }
        Ok(fresh)
    }

    // ── Contributions ────────────────────────────────────────────────

    /// Create a contribution and append the server's canonical
    /// representation (with its server-assigned id) to the local sequence.
    pub async fn add_contribution(
        &mut self,
        body: &NewContribution,
    ) -> Result<Contribution, ApiError> {
        self.ensure_loaded()?;
        let result = self.api.create_contribution(&self.campaign_id, body).await;
        let fresh = self.record(result)?;
        if let Some(state) = self.state.as_mut() {
            state.contributions.push(fresh.clone());
        }
        Ok(fresh)
    }

    // ── Milestones ───────────────────────────────────────────────────

    pub async fn add_milestone(&mut self, body: &NewMilestone) -> Result<Milestone, ApiError> {
        self.ensure_loaded()?;
        let result = self.api.create_milestone(&self.campaign_id, body).await;
        let fresh = self.record(result)?;
        if let Some(state) = self.state.as_mut() {
            state.campaign.milestones.push(fresh.clone());
        }
        Ok(fresh)
    }

    /// Edit a milestone; the matching local entry is replaced in place by
    /// the server's response. List order is preserved.
    pub async fn update_milestone(
        &mut self,
        milestone_id: &str,
        patch: &MilestonePatch,
    ) -> Result<Milestone, ApiError> {
        self.ensure_loaded()?;
        let result = self
            .api
            .patch_milestone(&self.campaign_id, milestone_id, patch)
            .await;
        let fresh = self.record(result)?;
        if let Some(state) = self.state.as_mut()
            && let Some(slot) = state
                .campaign
                .milestones
                .iter_mut()
                .find(|m| m.id == fresh.id)
        {
            *slot = fresh.clone();
        }
        Ok(fresh)
    }

    pub async fn delete_milestone(&mut self, milestone_id: &str) -> Result<(), ApiError> {
        self.ensure_loaded()?;
        let result = self
            .api
            .delete_milestone(&self.campaign_id, milestone_id)
            .await;
        self.record(result)?;
        if let Some(state) = self.state.as_mut() {
            state.campaign.milestones.retain(|m| m.id != milestone_id);
        }
        Ok(())
    }

    // ── Updates ──────────────────────────────────────────────────────

    pub async fn add_update(
        &mut self,
        body: &NewUpdate,
        image: Option<FilePart>,
        attachment: Option<FilePart>,
    ) -> Result<CampaignUpdate, ApiError> {
        self.ensure_loaded()?;
        let result = self
            .api
            .create_update(&self.campaign_id, body, image, attachment)
            .await;
        let fresh = self.record(result)?;
        if let Some(state) = self.state.as_mut() {
            state.campaign.updates.push(fresh.clone());
        }
        Ok(fresh)
    }

    pub async fn edit_update(
        &mut self,
        update_id: &str,
        patch: &UpdatePatch,
    ) -> Result<CampaignUpdate, ApiError> {
        self.ensure_loaded()?;
        let result = self
            .api
            .patch_update(&self.campaign_id, update_id, patch)
            .await;
        let fresh = self.record(result)?;
        if let Some(state) = self.state.as_mut()
            && let Some(slot) = state.campaign.updates.iter_mut().find(|u| u.id == fresh.id)
        {
            *slot = fresh.clone();
        }
        Ok(fresh)
    }

    pub async fn delete_update(&mut self, update_id: &str) -> Result<(), ApiError> {
        self.ensure_loaded()?;
        let result = self.api.delete_update(&self.campaign_id, update_id).await;
        self.record(result)?;
        if let Some(state) = self.state.as_mut() {
            state.campaign.updates.retain(|u| u.id != update_id);
        }
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn state(&self) -> Option<&CampaignState> {
        self.state.as_ref()
    }

    /// Mutable access for the reconciliation reducer.
    pub fn state_mut(&mut self) -> Option<&mut CampaignState> {
        self.state.as_mut()
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.state.as_ref().map(|s| &s.campaign)
    }

    pub fn contributions(&self) -> &[Contribution] {
        self.state
            .as_ref()
            .map(|s| s.contributions.as_slice())
            .unwrap_or_default()
    }

    /// Human-readable description of the most recent failure, cleared by a
    /// successful load.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Internals ────────────────────────────────────────────────────

    fn ensure_loaded(&mut self) -> Result<(), ApiError> {
        if self.state.is_none() {
            return self.record(Err(ApiError::NotLoaded));
        }
        Ok(())
    }

    fn record<T>(&mut self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                tracing::error!(campaign = %self.campaign_id, %error, "campaign API call failed");
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;

    fn store() -> CampaignStore {
        CampaignStore::new(CampaignApi::new(SyncConfig::default()), "c1")
    }

    #[test]
    fn fresh_store_has_no_state_and_no_error() {
        let store = store();
        assert!(store.state().is_none());
        assert!(store.campaign().is_none());
        assert!(store.contributions().is_empty());
        assert!(store.last_error().is_none());
        assert_eq!(store.campaign_id(), "c1");
    }

    #[tokio::test]
    async fn mutation_before_load_fails_without_a_request() {
        let mut store = store();
        let result = store.update_campaign(&CampaignPatch::default()).await;
        assert!(matches!(result, Err(ApiError::NotLoaded)));
        // The failure is also recorded for banner rendering.
        assert_eq!(
            store.last_error(),
            Some("Campaign state is not loaded yet")
        );
    }

    #[tokio::test]
    async fn delete_before_load_fails_without_a_request() {
        let mut store = store();
        let result = store.delete_milestone("m1").await;
        assert!(matches!(result, Err(ApiError::NotLoaded)));
    }
}
