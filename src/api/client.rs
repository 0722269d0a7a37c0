use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::SyncConfig;
use crate::errors::ApiError;
use crate::models::{
    Campaign, CampaignPatch, CampaignUpdate, Contribution, Milestone, MilestonePatch,
    NewContribution, NewMilestone, NewUpdate, UpdatePatch,
};

/// A file attached to an update post, sent as a multipart form part.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    fn into_part(self) -> Part {
        Part::bytes(self.bytes).file_name(self.filename)
    }
}

/// HTTP client for the campaign REST API.
///
/// All endpoints exchange JSON bodies except file-bearing update creation,
/// which switches to multipart form encoding. Every request carries the
/// configured per-request timeout.
#[derive(Debug, Clone)]
pub struct CampaignApi {
    http: reqwest::Client,
    config: SyncConfig,
}

impl CampaignApi {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    // ── Campaign ─────────────────────────────────────────────────────

    pub async fn fetch_campaign(&self, campaign_id: &str) -> Result<Campaign, ApiError> {
        let url = self.config.campaign_url(campaign_id);
        self.send_json(self.http.get(&url), &url).await
    }

    pub async fn fetch_contributions(
        &self,
        campaign_id: &str,
    ) -> Result<Vec<Contribution>, ApiError> {
        let url = self.config.contributions_url(campaign_id);
        self.send_json(self.http.get(&url), &url).await
    }

    /// Partial update. The server's response is the authoritative post-write
    /// representation.
    pub async fn patch_campaign(
        &self,
        campaign_id: &str,
        patch: &CampaignPatch,
    ) -> Result<Campaign, ApiError> {
        let url = self.config.campaign_url(campaign_id);
        self.send_json(self.http.patch(&url).json(patch), &url).await
    }

    // ── Contributions ────────────────────────────────────────────────

    pub async fn create_contribution(
        &self,
        campaign_id: &str,
        body: &NewContribution,
    ) -> Result<Contribution, ApiError> {
        let url = self.config.contributions_url(campaign_id);
        self.send_json(self.http.post(&url).json(body), &url).await
    }

    // ── Milestones ───────────────────────────────────────────────────

    pub async fn create_milestone(
        &self,
        campaign_id: &str,
        body: &NewMilestone,
    ) -> Result<Milestone, ApiError> {
        let url = self.config.milestones_url(campaign_id);
        self.send_json(self.http.post(&url).json(body), &url).await
    }

    pub async fn patch_milestone(
        &self,
        campaign_id: &str,
        milestone_id: &str,
        patch: &MilestonePatch,
    ) -> Result<Milestone, ApiError> {
        let url = self.config.milestone_url(campaign_id, milestone_id);
        self.send_json(self.http.patch(&url).json(patch), &url).await
    }

    pub async fn delete_milestone(
        &self,
        campaign_id: &str,
        milestone_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.config.milestone_url(campaign_id, milestone_id);
        self.send(self.http.delete(&url), &url).await?;
        Ok(())
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Post a news update. With an image or attachment present the request
    /// is encoded as a multipart form; otherwise plain JSON.
    pub async fn create_update(
        &self,
        campaign_id: &str,
        body: &NewUpdate,
        image: Option<FilePart>,
        attachment: Option<FilePart>,
    ) -> Result<CampaignUpdate, ApiError> {
        let url = self.config.updates_url(campaign_id);
        let request = if image.is_some() || attachment.is_some() {
            let mut form = Form::new()
                .text("title", body.title.clone())
                .text("content", body.content.clone());
            if let Some(file) = image {
                form = form.part("image", file.into_part());
            }
            if let Some(file) = attachment {
                form = form.part("attachment", file.into_part());
            }
            self.http.post(&url).multipart(form)
        } else {
            self.http.post(&url).json(body)
        };
        self.send_json(request, &url).await
    }

    pub async fn patch_update(
        &self,
        campaign_id: &str,
        update_id: &str,
        patch: &UpdatePatch,
    ) -> Result<CampaignUpdate, ApiError> {
        let url = self.config.update_url(campaign_id, update_id);
        self.send_json(self.http.patch(&url).json(patch), &url).await
    }

    pub async fn delete_update(&self, campaign_id: &str, update_id: &str) -> Result<(), ApiError> {
        let url = self.config.update_url(campaign_id, update_id);
        self.send(self.http.delete(&url), &url).await?;
        Ok(())
    }

    // ── Request plumbing ─────────────────────────────────────────────

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, ApiError> {
        let response = request
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound {
                url: url.to_string(),
            }),
            status if !status.is_success() => Err(ApiError::Status {
                status,
                url: url.to_string(),
            }),
            _ => Ok(response),
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        let response = self.send(request, url).await?;
        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
