use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::models::{
    ActivityFilters, CommandAction, FilterPatch, ParticipantActivity, ParticipantActivityRow,
    ParticipantProfile, ParticipantProfilePatch, ProfileUpdateTicket, RegistrationCommand,
    SessionContext, Toast,
};
use crate::services::eligibility;
use crate::store::booking::{self, BookingPolicy, ToggleOutcome};
use crate::store::{PendingProfileUpdate, ToggleResult};

/// Participant-facing state container: the activity collection, the session
/// filter state, the single toast slot and the participant's own profile.
/// All mutation goes through the methods below; views are recomputed from
/// current state on every call.
pub struct ParticipantActivityStore {
    session: SessionContext,
    activities: Vec<ParticipantActivity>,
    filters: ActivityFilters,
    toast: Option<Toast>,
    profile: ParticipantProfile,
    pending_profile: Option<PendingProfileUpdate<ParticipantProfile>>,
}

impl ParticipantActivityStore {
    pub fn new(
        session: SessionContext,
        profile: ParticipantProfile,
        activities: Vec<ParticipantActivity>,
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

    /// Build the store from backend rows; rows with an unusable schedule are
    /// dropped.
    pub fn from_rows(
        session: SessionContext,
        profile: ParticipantProfile,
        rows: Vec<ParticipantActivityRow>,
    ) -> Self {
        let activities = rows
            .into_iter()
            .filter_map(ParticipantActivityRow::into_activity)
            .collect();
        Self::new(session, profile, activities)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn profile(&self) -> &ParticipantProfile {
        &self.profile
    }

    pub fn filters(&self) -> &ActivityFilters {
        &self.filters
    }

    pub fn activities(&self) -> &[ParticipantActivity] {
        &self.activities
    }

    pub fn locations(&self) -> Vec<String> {
        booking::distinct_locations(&self.activities)
    }

    /// Date window, suitability for the participant's own disability,
    /// location, availability; ascending by start time.
    pub fn filtered_activities(&self, now: OffsetDateTime) -> Vec<ParticipantActivity> {
        let category = self.profile.disability;
        booking::filter_activities(&self.activities, &self.filters, now, |a| {
            eligibility::is_suitable(a, category)
        })
    }

    /// Confirmed registrations, ascending by start time. Waitlisted entries
    /// are not confirmed and do not appear here.
    pub fn my_activities(&self) -> Vec<ParticipantActivity> {
        booking::booked_subset(&self.activities)
    }

    pub fn weekly_count(&self, now: OffsetDateTime) -> u32 {
        booking::weekly_confirmed_count(&self.activities, now)
    }

    pub fn toggle_registration(&mut self, id: &str, now: OffsetDateTime) -> ToggleResult {
        let policy = BookingPolicy::participant();
        let outcome = booking::toggle(&mut self.activities, id, &policy, now);
        let title = self.title_of(id);

        match outcome {
            ToggleOutcome::Confirmed => {
                self.toast = Some(Toast::success(
                    format!("You are registered for '{}'.", title),
                    now,
                ));
            }
            ToggleOutcome::Waitlisted => {
                self.toast = Some(Toast::success(
                    format!("'{}' is full. You are on the waitlist.", title),
                    now,
                ));
            }
            ToggleOutcome::Cancelled { was_confirmed } => {
                let message = if was_confirmed {
                    format!("Registration for '{}' cancelled.", title)
                } else {
                    format!("Removed from the waitlist for '{}'.", title)
                };
                self.toast = Some(Toast::success(message, now));
            }
            ToggleOutcome::RejectedOverlap => {
                warn!("registration rejected for {}: schedule clash", id);
                self.toast = Some(Toast::warning(
                    "This activity overlaps with one you are already registered for.",
                    now,
                ));
            }
            ToggleOutcome::RejectedWeeklyCap => {
                warn!("registration rejected for {}: weekly cap reached", id);
                self.toast = Some(Toast::warning(
                    format!(
                        "You have reached the limit of {} activities this week.",
                        policy.weekly_cap.unwrap_or_default()
                    ),
                    now,
                ));
            }
            ToggleOutcome::RejectedFull | ToggleOutcome::NotFound => {
                // RejectedFull cannot happen under the participant policy;
                // an unknown id stays silent.
            }
        }

        let command = self.command_for(id, outcome);
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

    /// Optimistic, two-phase profile update: the patch lands locally right
    /// away and the returned ticket identifies the in-flight remote write.
    /// A second update while one is pending supersedes it; rollback always
    /// restores the last confirmed profile.
    pub fn update_profile(
        &mut self,
        patch: ParticipantProfilePatch,
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

    /// Report the remote write's result back. A stale or unknown ticket is
    /// ignored; a failure rolls the profile back and raises an error toast.
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

    fn command_for(&self, id: &str, outcome: ToggleOutcome) -> Option<RegistrationCommand> {
        let user_id = self.session.user_id()?;
        let action = match outcome {
            ToggleOutcome::Confirmed => CommandAction::Join,
            ToggleOutcome::Waitlisted => CommandAction::SetWaitlisted,
            ToggleOutcome::Cancelled { was_confirmed: true } => CommandAction::Leave,
            ToggleOutcome::Cancelled {
                was_confirmed: false,
            } => CommandAction::RemoveWaitlist,
            _ => return None,
        };
        Some(RegistrationCommand::new(id, user_id, action, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccessibilityFeatures, DateWindow, DisabilityCategory, PortalRole, SuitabilityFilter,
        ToastSeverity,
    };
    use time::macros::datetime;
    use time::Duration;

    const NOW: OffsetDateTime = datetime!(2026-09-02 08:00:00 +02:00);

    fn profile() -> ParticipantProfile {
        ParticipantProfile {
            name: "Anna".to_string(),
            email: "anna@example.com".to_string(),
            phone: "0600000000".to_string(),
            disability: DisabilityCategory::Physical,
            caregiver_contact: None,
        }
    }

    fn activity(id: &str, start: OffsetDateTime, end: OffsetDateTime) -> ParticipantActivity {
        ParticipantActivity {
            id: id.to_string(),
            title: format!("Activity {}", id),
            description: String::new(),
            location: "Community center".to_string(),
            meeting_point: String::new(),
            meals_provided: false,
            starts_at: start,
            ends_at: end,
            capacity: 5,
            filled: 1,
            accessibility: AccessibilityFeatures::default(),
            suitable_for: Vec::new(),
            is_registered: false,
            waitlisted: false,
        }
    }

    fn signed_in_store(activities: Vec<ParticipantActivity>) -> ParticipantActivityStore {
        let mut session = SessionContext::signed_out();
        session.sign_in("u-1", PortalRole::Participant);
        ParticipantActivityStore::new(session, profile(), activities)
    }

    fn fixture() -> Vec<ParticipantActivity> {
        vec![
            activity(
                "a1",
                datetime!(2026-09-02 10:00:00 +02:00),
                datetime!(2026-09-02 12:00:00 +02:00),
            ),
            activity(
                "a2",
                datetime!(2026-09-02 11:00:00 +02:00),
                datetime!(2026-09-02 13:00:00 +02:00),
            ),
        ]
    }

    #[test]
    fn confirm_emits_join_command_and_toast() {
        let mut store = signed_in_store(fixture());
        let result = store.toggle_registration("a1", NOW);

        assert_eq!(result.outcome, ToggleOutcome::Confirmed);
        let command = result.command.unwrap();
        assert_eq!(command.action, CommandAction::Join);
        assert_eq!(command.activity_id, "a1");
        assert_eq!(command.user_id, "u-1");

        let toast = store.current_toast(NOW).unwrap();
        assert_eq!(toast.severity, ToastSeverity::Success);
    }

    #[test]
    fn no_session_means_local_only() {
        let mut store =
            ParticipantActivityStore::new(SessionContext::signed_out(), profile(), fixture());
        let result = store.toggle_registration("a1", NOW);

        assert_eq!(result.outcome, ToggleOutcome::Confirmed);
        assert!(result.command.is_none());
        assert!(store.activities()[0].is_registered);
    }

    #[test]
    fn overlap_rejection_is_warning_only() {
        let mut store = signed_in_store(fixture());
        store.toggle_registration("a1", NOW);
        let result = store.toggle_registration("a2", NOW);

        assert_eq!(result.outcome, ToggleOutcome::RejectedOverlap);
        assert!(result.command.is_none());
        assert!(!store.activities()[1].is_registered);
        assert_eq!(
            store.current_toast(NOW).unwrap().severity,
            ToastSeverity::Warning
        );
    }

    #[test]
    fn waitlist_cancel_emits_remove_waitlist() {
        let mut items = fixture();
        items[0].filled = items[0].capacity;
        let mut store = signed_in_store(items);

        let result = store.toggle_registration("a1", NOW);
        assert_eq!(result.outcome, ToggleOutcome::Waitlisted);
        assert_eq!(result.command.unwrap().action, CommandAction::SetWaitlisted);

        let result = store.toggle_registration("a1", NOW);
        assert_eq!(
            result.outcome,
            ToggleOutcome::Cancelled {
                was_confirmed: false
            }
        );
        assert_eq!(result.command.unwrap().action, CommandAction::RemoveWaitlist);
    }

    #[test]
    fn stale_id_is_silent() {
        let mut store = signed_in_store(fixture());
        let result = store.toggle_registration("gone", NOW);

        assert_eq!(result.outcome, ToggleOutcome::NotFound);
        assert!(result.command.is_none());
        assert!(store.current_toast(NOW).is_none());
    }

    #[test]
    fn suitability_filter_uses_own_profile() {
        let mut items = fixture();
        items[0].accessibility.wheelchair_accessible = true;
        let mut store = signed_in_store(items);
        store.set_filters(FilterPatch {
            suitability: Some(SuitabilityFilter::Suitable),
            ..FilterPatch::default()
        });

        let shown = store.filtered_activities(NOW);
        let ids: Vec<&str> = shown.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a1"]);
    }

    #[test]
    fn date_window_filter_via_patch() {
        let mut items = fixture();
        items.push(activity(
            "next-month",
            datetime!(2026-10-15 10:00:00 +02:00),
            datetime!(2026-10-15 12:00:00 +02:00),
        ));
        let mut store = signed_in_store(items);
        store.set_filters(FilterPatch {
            date_window: Some(DateWindow::Week),
            ..FilterPatch::default()
        });

        let shown = store.filtered_activities(NOW);
        assert!(shown.iter().all(|a| a.id != "next-month"));
        assert_eq!(shown.len(), 2);
    }

    #[test]
    fn toast_slot_is_last_write_wins_and_expires() {
        let mut store = signed_in_store(fixture());
        store.toggle_registration("a1", NOW);
        let later = NOW + Duration::seconds(2);
        store.toggle_registration("a1", later); // cancel, overwrites the slot

        let toast = store.current_toast(later).unwrap();
        assert!(toast.message.contains("cancelled"));
        assert!(store.current_toast(later + Duration::seconds(5)).is_none());

        store.toggle_registration("a1", later);
        store.clear_toast();
        assert!(store.current_toast(later).is_none());
    }

    #[test]
    fn profile_update_rolls_back_on_failure() {
        let mut store = signed_in_store(fixture());
        let ticket = store.update_profile(
            ParticipantProfilePatch {
                phone: Some("0699999999".to_string()),
                ..ParticipantProfilePatch::default()
            },
            NOW,
        );
        assert_eq!(store.profile().phone, "0699999999");

        store.resolve_profile_update(ticket, Err("connection lost".to_string()), NOW);
        assert_eq!(store.profile().phone, "0600000000");
        assert_eq!(
            store.current_toast(NOW).unwrap().severity,
            ToastSeverity::Error
        );
    }

    #[test]
    fn profile_update_confirms_and_ignores_stale_tickets() {
        let mut store = signed_in_store(fixture());
        let stale = store.update_profile(
            ParticipantProfilePatch {
                name: Some("Anne".to_string()),
                ..ParticipantProfilePatch::default()
            },
            NOW,
        );
        // Superseding update: rollback target stays the original profile.
        let current = store.update_profile(
            ParticipantProfilePatch {
                name: Some("Anne-Marie".to_string()),
                ..ParticipantProfilePatch::default()
            },
            NOW,
        );

        store.resolve_profile_update(stale, Err("too late".to_string()), NOW);
        assert_eq!(store.profile().name, "Anne-Marie");

        store.resolve_profile_update(current, Ok(()), NOW);
        assert_eq!(store.profile().name, "Anne-Marie");

        // Failed resolution after confirmation has nothing to roll back.
        store.resolve_profile_update(current, Err("duplicate".to_string()), NOW);
        assert_eq!(store.profile().name, "Anne-Marie");
    }

    #[test]
    fn superseded_update_rolls_back_to_original() {
        let mut store = signed_in_store(fixture());
        store.update_profile(
            ParticipantProfilePatch {
                name: Some("Anne".to_string()),
                ..ParticipantProfilePatch::default()
            },
            NOW,
        );
        let second = store.update_profile(
            ParticipantProfilePatch {
                name: Some("Anne-Marie".to_string()),
                ..ParticipantProfilePatch::default()
            },
            NOW,
        );

        store.resolve_profile_update(second, Err("nope".to_string()), NOW);
        assert_eq!(store.profile().name, "Anna");
    }
}
