//! REST data access for the campaign resource and its sub-resources.
//!
//! [`CampaignApi`] is the thin HTTP client; [`CampaignStore`] layers the
//! authoritative local copy of one campaign's aggregate state on top of it.

mod client;
mod store;

pub use client::{CampaignApi, FilePart};
pub use store::CampaignStore;
