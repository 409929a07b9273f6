pub mod booking;
pub mod participant;
pub mod volunteer;

use crate::models::{ProfileUpdateTicket, RegistrationCommand};
use booking::ToggleOutcome;

/// What a toggle did, plus the outbound command when the transition actually
/// applied and a user session exists to key it on.
#[derive(Debug, Clone)]
pub struct ToggleResult {
    pub outcome: ToggleOutcome,
    pub command: Option<RegistrationCommand>,
}

/// Snapshot kept while a profile write is in flight. `previous` is the last
/// confirmed profile; a failed resolution restores it.
#[derive(Debug, Clone)]
pub(crate) struct PendingProfileUpdate<P> {
    pub(crate) ticket: ProfileUpdateTicket,
    pub(crate) previous: P,
}
