use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::models::{
    ActivityFilters, CommandAction, FilterPatch, ProfileUpdateTicket, RegistrationCommand,
    SessionContext, Toast, VolunteerActivity, VolunteerActivityRow, VolunteerProfile,
    VolunteerProfilePatch, VolunteerRole,
};
use crate::store::booking::{self, BookingPolicy, ToggleOutcome};
use crate::store::{PendingProfileUpdate, ToggleResult};

/// Volunteer-facing state container. Same engine as the participant store
/// under the volunteer policy: no waitlist, no weekly cap, role stamping on
/// confirmed sign-up.
pub struct VolunteerActivityStore {
    session: SessionContext,
    activities: Vec<VolunteerActivity>,
    filters: ActivityFilters,
    toast: Option<Toast>,
    profile: VolunteerProfile,
    pending_profile: Option<PendingProfileUpdate<VolunteerProfile>>,
}

impl VolunteerActivityStore {
    pub fn new(
        session: SessionContext,
        profile: VolunteerProfile,
        activities: Vec<VolunteerActivity>,
    ) -> Self {
        Self {
            session,
            activities,
            filters: ActivityFilters::default(),
            toast: None,
            profile,
            pending_profile: None,
        }
    }

    pub fn from_rows(
        session: SessionContext,
        profile: VolunteerProfile,
        rows: Vec<VolunteerActivityRow>,
    ) -> Self {
        let activities = rows
            .into_iter()
            .filter_map(VolunteerActivityRow::into_activity)
            .collect();
        Self::new(session, profile, activities)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn profile(&self) -> &VolunteerProfile {
        &self.profile
    }

    pub fn filters(&self) -> &ActivityFilters {
        &self.filters
    }

    pub fn activities(&self) -> &[VolunteerActivity] {
        &self.activities
    }

    pub fn locations(&self) -> Vec<String> {
        booking::distinct_locations(&self.activities)
    }

    pub fn filtered_activities(&self, now: OffsetDateTime) -> Vec<VolunteerActivity> {
        booking::filter_activities(&self.activities, &self.filters, now, |_| true)
    }

    /// The volunteer's confirmed sign-ups, ascending by start time.
    pub fn commitments(&self) -> Vec<VolunteerActivity> {
        booking::booked_subset(&self.activities)
    }

    pub fn weekly_count(&self, now: OffsetDateTime) -> u32 {
        booking::weekly_confirmed_count(&self.activities, now)
    }

    /// Stamp a role choice on an activity before signing up. Independent of
    /// capacity and overlap rules; unknown ids are ignored.
    pub fn set_my_role(&mut self, id: &str, role: VolunteerRole) {
        let Some(activity) = self.activities.iter_mut().find(|a| a.id == id) else {
            debug!("role choice ignored, unknown activity id {}", id);
            return;
        };
        activity.my_role = role;
    }

    pub fn toggle_signup(&mut self, id: &str, now: OffsetDateTime) -> ToggleResult {
        let policy = BookingPolicy::volunteer();
        let outcome = booking::toggle(&mut self.activities, id, &policy, now);

        let mut confirmed_role = None;
        if let Some(activity) = self.activities.iter_mut().find(|a| a.id == id) {
            match outcome {
                ToggleOutcome::Confirmed if policy.roles_enabled => {
                    // Snapshot the role choice at the moment of confirmation.
                    activity.assigned_role = Some(activity.my_role);
                    confirmed_role = activity.assigned_role;
                }
                ToggleOutcome::Cancelled { .. } => {
                    activity.assigned_role = None;
                }
                _ => {}
            }
        }

        let title = self.title_of(id);
        match outcome {
            ToggleOutcome::Confirmed => {
                let role = confirmed_role.unwrap_or_default();
                self.toast = Some(Toast::success(
                    format!("Signed up for '{}' as {}.", title, role.as_str()),
                    now,
                ));
            }
            ToggleOutcome::Cancelled { .. } => {
                self.toast = Some(Toast::success(
                    format!("Sign-up for '{}' cancelled.", title),
                    now,
                ));
            }
            ToggleOutcome::RejectedOverlap => {
                warn!("sign-up rejected for {}: schedule clash", id);
                self.toast = Some(Toast::warning(
                    "This activity overlaps with another commitment.",
                    now,
                ));
            }
            ToggleOutcome::RejectedFull => {
                warn!("sign-up rejected for {}: no volunteer slots left", id);
                self.toast = Some(Toast::warning(
                    format!("'{}' already has enough volunteers.", title),
                    now,
                ));
            }
            ToggleOutcome::Waitlisted | ToggleOutcome::RejectedWeeklyCap => {
                // Unreachable under the volunteer policy.
            }
            ToggleOutcome::NotFound => {}
        }

        let command = self.command_for(id, outcome, confirmed_role);
        ToggleResult { outcome, command }
    }

    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
    }

    pub fn current_toast(&self, now: OffsetDateTime) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| !t.is_expired(now))
    }

    pub fn clear_toast(&mut self) {
        self.toast = None;
    }

    pub fn update_profile(
        &mut self,
        patch: VolunteerProfilePatch,
        now: OffsetDateTime,
    ) -> ProfileUpdateTicket {
        let previous = match self.pending_profile.take() {
            Some(pending) => pending.previous,
            None => self.profile.clone(),
        };
        patch.apply(&mut self.profile);

        let ticket = ProfileUpdateTicket::new();
        self.pending_profile = Some(PendingProfileUpdate { ticket, previous });
        self.toast = Some(Toast::success("Profile updated.", now));
        ticket
    }

    pub fn resolve_profile_update(
        &mut self,
        ticket: ProfileUpdateTicket,
        result: Result<(), String>,
        now: OffsetDateTime,
    ) {
        match &self.pending_profile {
            Some(pending) if pending.ticket == ticket => {}
            _ => return,
        }
        let Some(pending) = self.pending_profile.take() else {
            return;
        };

        match result {
            Ok(()) => debug!("profile update confirmed"),
            Err(message) => {
                warn!("profile update failed, rolling back: {}", message);
                self.profile = pending.previous;
                self.toast = Some(Toast::error(
                    format!("Could not save your profile: {}", message),
                    now,
                ));
            }
        }
    }

    fn title_of(&self, id: &str) -> String {
        self.activities
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.title.clone())
            .unwrap_or_default()
    }

    fn command_for(
        &self,
        id: &str,
        outcome: ToggleOutcome,
        role: Option<VolunteerRole>,
    ) -> Option<RegistrationCommand> {
        let user_id = self.session.user_id()?;
        let action = match outcome {
            ToggleOutcome::Confirmed => CommandAction::Join,
            ToggleOutcome::Cancelled { .. } => CommandAction::Leave,
            _ => return None,
        };
        Some(RegistrationCommand::new(id, user_id, action, role))
    }
}
