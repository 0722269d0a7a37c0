//! WebSocket transport for the campaign event channel.
//!
//! One [`CampaignSocket`] owns exactly one live connection per active
//! campaign view. There is no automatic retry: a dropped connection stays
//! closed until the consumer calls [`CampaignSocket::reconnect`].

mod socket;

pub use socket::{CampaignSocket, ConnectionState};
