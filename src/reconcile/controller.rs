use tokio_util::sync::CancellationToken;

use crate::api::{CampaignApi, CampaignStore, FilePart};
use crate::config::SyncConfig;
use crate::errors::{ApiError, SyncError};
use crate::events::CampaignEvent;
use crate::models::{
    Campaign, CampaignPatch, CampaignState, CampaignUpdate, Contribution, Milestone,
    MilestonePatch, NewContribution, NewMilestone, NewUpdate, UpdatePatch,
};
use crate::reconcile::notify::{Notification, NotificationQueue};
use crate::reconcile::reducer::apply_event;
use crate::transport::CampaignSocket;

/// Banner text shown while the real-time channel is down.
pub const REALTIME_BANNER: &str =
    "Real-time updates unavailable. Refresh to see the latest activity.";

/// Lifecycle of one mounted campaign view.
///
/// `Error` is terminal for the mount: recovery means constructing a fresh
/// controller. Within `Ready`, socket open/close only toggles the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardPhase {
    Loading,
    Error(String),
    Ready,
}

/// Owns one campaign view's store, socket, and notification queue, and
/// drives the reconciliation loop between them.
///
/// Exactly one controller instance owns one socket connection and one local
/// state; nothing is shared across concurrently mounted views of the same
/// campaign. Call [`DashboardController::shutdown`] on teardown: it cancels
/// in-flight user actions (their responses become no-ops) and closes the
/// socket so the connection cannot outlive the view.
pub struct DashboardController {
    store: CampaignStore,
    socket: CampaignSocket,
    notifications: NotificationQueue,
    phase: DashboardPhase,
    cancel: CancellationToken,
}

impl DashboardController {
    pub fn new(config: SyncConfig, campaign_id: &str) -> Self {
        let channel_url = config.channel_url(campaign_id);
        Self {
            store: CampaignStore::new(CampaignApi::new(config), campaign_id),
            socket: CampaignSocket::new(channel_url),
            notifications: NotificationQueue::new(),
            phase: DashboardPhase::Loading,
            cancel: CancellationToken::new(),
        }
    }

    /// Initial fetch plus socket connect.
    ///
    /// The fetch drives the phase transition (`Loading → Ready`, or
    /// `Loading → Error` on failure). A socket connect failure is non-fatal:
    /// the view degrades to REST state with the banner visible.
    pub async fn start(&mut self) -> Result<(), SyncError> {
        match self.store.load().await {
            Ok(()) => self.phase = DashboardPhase::Ready,
            Err(error) => {
                self.phase = DashboardPhase::Error(error.to_string());
                return Err(SyncError::LoadFailed(error));
            }
        }
        if let Err(error) = self.socket.connect().await {
            tracing::warn!(%error, "real-time channel unavailable; continuing with REST state only");
            self.notifications.push(Notification::warning(REALTIME_BANNER));
        }
        Ok(())
    }

    /// Drive the event loop until the socket closes or the controller is
    /// shut down. Local state is left exactly as it was at the moment of
    /// disconnection; the banner becomes visible.
    pub async fn run_until_disconnect(&mut self) {
        loop {
            let cancel = self.cancel.clone();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = self.socket.next_event() => match event {
                    Some(event) => self.apply(event),
                    None => break,
                },
            }
        }
    }

    /// Fold one inbound event into local state and enqueue its notification.
    pub fn apply(&mut self, event: CampaignEvent) {
        let Some(state) = self.store.state_mut() else {
            tracing::warn!("dropping event delivered before initial load");
            return;
        };
        if let Some(notification) = apply_event(state, event) {
            self.notifications.push(notification);
        }
    }

    // ── User actions ─────────────────────────────────────────────────
    //
    // Each passes through to the store, raced against the cancellation
    // token so a response arriving after teardown is discarded instead of
    // written into dead state. Failures become an error notification and
    // propagate one level for action-specific feedback.

    pub async fn update_campaign(&mut self, patch: &CampaignPatch) -> Result<Campaign, SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.update_campaign(patch) => result,
        };
        self.finish_action(result)
    }

    pub async fn add_contribution(
        &mut self,
        body: &NewContribution,
    ) -> Result<Contribution, SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.add_contribution(body) => result,
        };
        self.finish_action(result)
    }

    pub async fn add_milestone(&mut self, body: &NewMilestone) -> Result<Milestone, SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.add_milestone(body) => result,
        };
        self.finish_action(result)
    }

    pub async fn update_milestone(
        &mut self,
        milestone_id: &str,
        patch: &MilestonePatch,
    ) -> Result<Milestone, SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.update_milestone(milestone_id, patch) => result,
        };
        self.finish_action(result)
    }

    pub async fn delete_milestone(&mut self, milestone_id: &str) -> Result<(), SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.delete_milestone(milestone_id) => result,
        };
        self.finish_action(result)
    }

    pub async fn post_update(
        &mut self,
        body: &NewUpdate,
        image: Option<FilePart>,
        attachment: Option<FilePart>,
    ) -> Result<CampaignUpdate, SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.add_update(body, image, attachment) => result,
        };
        self.finish_action(result)
    }

    pub async fn edit_update(
        &mut self,
        update_id: &str,
        patch: &UpdatePatch,
    ) -> Result<CampaignUpdate, SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.edit_update(update_id, patch) => result,
        };
        self.finish_action(result)
    }

    pub async fn delete_update(&mut self, update_id: &str) -> Result<(), SyncError> {
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SyncError::ShutDown),
            result = self.store.delete_update(update_id) => result,
        };
        self.finish_action(result)
    }

    // ── Connectivity ─────────────────────────────────────────────────

    /// Force a fresh connection to the same channel. The only recovery
    /// mechanism for a dropped socket; typically wired to a user action.
    pub async fn reconnect(&mut self) -> Result<(), SyncError> {
        self.socket.reconnect().await.map_err(Into::into)
    }

    /// Banner text when real-time updates are unavailable.
    pub fn realtime_banner(&self) -> Option<&'static str> {
        (!self.socket.is_open()).then_some(REALTIME_BANNER)
    }

    /// Cancel in-flight work and close the socket. Idempotent.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        self.socket.close().await;
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn phase(&self) -> &DashboardPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == DashboardPhase::Ready
    }

    pub fn state(&self) -> Option<&CampaignState> {
        self.store.state()
    }

    pub fn campaign(&self) -> Option<&Campaign> {
        self.store.campaign()
    }

    pub fn contributions(&self) -> &[Contribution] {
        self.store.contributions()
    }

    /// Visible (non-expired) notifications, newest last.
    pub fn notifications(&mut self) -> Vec<Notification> {
        self.notifications.visible()
    }

    /// Display string for the most recent store failure.
    pub fn last_error(&self) -> Option<&str> {
        self.store.last_error()
    }

    fn finish_action<T>(&mut self, result: Result<T, ApiError>) -> Result<T, SyncError> {
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                self.notifications.push(Notification::error(error.to_string()));
                Err(error.into())
            }
        }
    }
}
