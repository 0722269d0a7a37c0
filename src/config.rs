//! Runtime configuration for the sync client.

use std::time::Duration;

/// Default REST API base when `LAKKHI_API_URL` is unset.
const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Default WebSocket base when `LAKKHI_WS_URL` is unset.
const DEFAULT_WS_BASE: &str = "ws://localhost:8000";

/// Per-request timeout applied to every REST call.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoint configuration for one deployment of the Lakkhi API.
///
/// Bases are stored without a trailing slash; the URL helpers append the
/// resource paths the backend exposes (`/api/campaigns/<id>/...` for REST,
/// `/ws/campaigns/<id>/` for the event channel).
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_base: String,
    pub ws_base: String,
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_WS_BASE)
    }
}

impl SyncConfig {
    pub fn new(api_base: &str, ws_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            ws_base: ws_base.trim_end_matches('/').to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read endpoints from `LAKKHI_API_URL` / `LAKKHI_WS_URL`, falling back
    /// to the localhost development defaults.
    pub fn from_env() -> Self {
        let api_base =
            std::env::var("LAKKHI_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let ws_base =
            std::env::var("LAKKHI_WS_URL").unwrap_or_else(|_| DEFAULT_WS_BASE.to_string());
        Self::new(&api_base, &ws_base)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Campaign detail resource.
    pub fn campaign_url(&self, campaign_id: &str) -> String {
        format!("{}/api/campaigns/{}/", self.api_base, campaign_id)
    }

    pub fn contributions_url(&self, campaign_id: &str) -> String {
        format!("{}/api/campaigns/{}/contributions/", self.api_base, campaign_id)
    }

    pub fn milestones_url(&self, campaign_id: &str) -> String {
        format!("{}/api/campaigns/{}/milestones/", self.api_base, campaign_id)
    }

    pub fn milestone_url(&self, campaign_id: &str, milestone_id: &str) -> String {
        format!(
            "{}/api/campaigns/{}/milestones/{}/",
            self.api_base, campaign_id, milestone_id
        )
    }

    pub fn updates_url(&self, campaign_id: &str) -> String {
        format!("{}/api/campaigns/{}/updates/", self.api_base, campaign_id)
    }

    pub fn update_url(&self, campaign_id: &str, update_id: &str) -> String {
        format!(
            "{}/api/campaigns/{}/updates/{}/",
            self.api_base, campaign_id, update_id
        )
    }

    /// Campaign-scoped event channel.
    pub fn channel_url(&self, campaign_id: &str) -> String {
        format!("{}/ws/campaigns/{}/", self.ws_base, campaign_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = SyncConfig::default();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.ws_base, "ws://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn new_strips_trailing_slash() {
        let config = SyncConfig::new("http://example.com/", "ws://example.com/");
        assert_eq!(config.api_base, "http://example.com");
        assert_eq!(config.ws_base, "ws://example.com");
    }

    #[test]
    fn campaign_urls_follow_backend_layout() {
        let config = SyncConfig::default();
        assert_eq!(
            config.campaign_url("c1"),
            "http://localhost:8000/api/campaigns/c1/"
        );
        assert_eq!(
            config.contributions_url("c1"),
            "http://localhost:8000/api/campaigns/c1/contributions/"
        );
        assert_eq!(
            config.milestone_url("c1", "m1"),
            "http://localhost:8000/api/campaigns/c1/milestones/m1/"
        );
        assert_eq!(
            config.update_url("c1", "u1"),
            "http://localhost:8000/api/campaigns/c1/updates/u1/"
        );
    }

    #[test]
    fn channel_url_is_campaign_scoped() {
        let config = SyncConfig::default();
        assert_eq!(
            config.channel_url("c1"),
            "ws://localhost:8000/ws/campaigns/c1/"
        );
    }

    // Override and fallback live in one test so no parallel test observes
    // the variables half-set.
    #[test]
    fn from_env_overrides_then_falls_back() {
        unsafe {
            std::env::set_var("LAKKHI_API_URL", "https://api.lakkhi.example/");
            std::env::set_var("LAKKHI_WS_URL", "wss://api.lakkhi.example");
        }
        let config = SyncConfig::from_env();
        assert_eq!(config.api_base, "https://api.lakkhi.example");
        assert_eq!(config.ws_base, "wss://api.lakkhi.example");

        unsafe {
            std::env::remove_var("LAKKHI_API_URL");
            std::env::remove_var("LAKKHI_WS_URL");
        }
        let config = SyncConfig::from_env();
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.ws_base, "ws://localhost:8000");
    }

    #[test]
    fn with_request_timeout_overrides_default() {
        let config = SyncConfig::default().with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }
}
