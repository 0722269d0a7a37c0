use crate::events::CampaignEvent;
use crate::models::CampaignState;
use crate::reconcile::notify::Notification;

/// Fold one server-pushed event into the local campaign state.
///
/// Pure with respect to I/O: the only effects are the state mutation and the
/// returned notification. Merge rules per event type:
///
/// - `contribution_update` — append to the end of the contribution sequence
///   in arrival order. No de-duplication: contribution ids are
///   server-assigned and taken as unique.
/// - `milestone_update` — replace the entry with a matching id in place,
///   preserving list order and length; an event with no matching entry is
///   dropped with no visible effect.
/// - `campaign_update` — shallow merge: only fields present in the payload
///   overwrite the local campaign.
pub fn apply_event(state: &mut CampaignState, event: CampaignEvent) -> Option<Notification> {
    match event {
        CampaignEvent::ContributionUpdate { contribution } => {
            let message = format!(
                "New contribution of {:.2} {} received!",
                contribution.amount, contribution.currency
            );
            state.contributions.push(contribution);
            Some(Notification::success(message))
        }
        CampaignEvent::MilestoneUpdate { milestone } => {
            match state
                .campaign
                .milestones
                .iter_mut()
                .find(|m| m.id == milestone.id)
            {
                Some(slot) => {
                    let title = milestone.title.clone();
                    *slot = milestone;
                    Some(Notification::info(format!("Milestone \"{}\" updated!", title)))
                }
                None => {
                    tracing::debug!(
                        milestone = %milestone.id,
                        "dropping milestone event with no matching entry"
                    );
                    None
                }
            }
        }
        CampaignEvent::CampaignUpdate { campaign } => {
            campaign.apply(&mut state.campaign);
            Some(Notification::info("Campaign details updated!"))
        }
    }
}
