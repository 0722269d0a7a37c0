//! The reconciliation layer: the single place where remote truth (REST) and
//! live push (WebSocket) are combined into what a campaign view renders.
//!
//! The merge rules live in a pure reducer ([`apply_event`]) so they are
//! unit-testable in isolation; the transport is reduced to "deliver typed
//! events to the reducer". [`DashboardController`] wires the reducer to the
//! store and socket and owns the per-view lifecycle.

mod controller;
mod notify;
mod reducer;

pub use controller::{DashboardController, DashboardPhase, REALTIME_BANNER};
pub use notify::{NOTIFICATION_TTL, Notification, NotificationQueue, Severity};
pub use reducer::apply_event;
