//! Real-time campaign synchronization client for the Lakkhi crowdfunding
//! platform.
//!
//! ## Overview
//!
//! A mounted campaign view owns three cooperating pieces:
//!
//! - [`api::CampaignStore`] — the REST accessor holding the authoritative
//!   local copy of one campaign's aggregate state (campaign fields plus the
//!   contribution list), with CRUD against the remote API.
//! - [`transport::CampaignSocket`] — a single WebSocket connection to the
//!   campaign's event channel, decoding server-pushed
//!   [`events::CampaignEvent`]s.
//! - [`reconcile::DashboardController`] — the one place where remote truth
//!   and live push are combined: it seeds local state from the initial fetch,
//!   folds every inbound event into that state with a pure reducer, and
//!   surfaces transient notifications plus the connectivity banner.
//!
//! ## Typical flow
//!
//! 1. [`reconcile::DashboardController::start`] performs the initial parallel
//!    fetch (campaign detail + contribution list) and opens the socket.
//! 2. [`reconcile::DashboardController::run_until_disconnect`] drives the
//!    event loop: each decoded event is folded into
//!    [`models::CampaignState`] by [`reconcile::apply_event`].
//! 3. User actions (patch the campaign, add a milestone, post an update) pass
//!    through the controller to the store; the server response is always the
//!    post-write source of truth.
//! 4. [`reconcile::DashboardController::shutdown`] cancels in-flight work and
//!    closes the socket; a response arriving after teardown is a no-op.

pub mod api;
pub mod config;
pub mod errors;
pub mod events;
pub mod models;
pub mod reconcile;
pub mod transport;
