use time::OffsetDateTime;
use tracing::debug;

use crate::models::{ActivityFilters, DateWindow, LocationFilter, SuitabilityFilter};
use crate::services::time_windows::{
    end_of_day, end_of_next_days, end_of_week, overlaps, start_of_day, start_of_week,
};

/// The slice of an activity the booking engine needs. Both the participant
/// and the volunteer shape implement this; the volunteer shape reports
/// `is_waitlisted()` as always false.
pub trait Bookable {
    fn id(&self) -> &str;
    fn location(&self) -> &str;
    fn starts_at(&self) -> OffsetDateTime;
    fn ends_at(&self) -> OffsetDateTime;
    fn capacity(&self) -> u32;
    fn filled(&self) -> u32;
    fn set_filled(&mut self, filled: u32);
    fn is_booked(&self) -> bool;
    fn set_booked(&mut self, booked: bool);
    fn is_waitlisted(&self) -> bool;
    fn set_waitlisted(&mut self, waitlisted: bool);
}

/// Rule deltas between the two store variants. The engine is otherwise the
/// same state machine for both.
#[derive(Debug, Clone, Copy)]
pub struct BookingPolicy {
    pub allow_waitlist: bool,
    pub weekly_cap: Option<u32>,
    pub roles_enabled: bool,
}

impl BookingPolicy {
    pub fn participant() -> Self {
        Self {
            allow_waitlist: true,
            weekly_cap: Some(3),
            roles_enabled: false,
        }
    }

    pub fn volunteer() -> Self {
        Self {
            allow_waitlist: false,
            weekly_cap: None,
            roles_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Confirmed,
    Waitlisted,
    Cancelled { was_confirmed: bool },
    RejectedOverlap,
    RejectedWeeklyCap,
    RejectedFull,
    NotFound,
}

impl ToggleOutcome {
    /// True when the toggle changed state (as opposed to a rejection or a
    /// stale id).
    pub fn applied(self) -> bool {
        matches!(
            self,
            ToggleOutcome::Confirmed | ToggleOutcome::Waitlisted | ToggleOutcome::Cancelled { .. }
        )
    }
}

/// Toggle the current user's booking on one activity. A single synchronous
/// state transition: every rejection leaves the collection untouched, and an
/// unknown id is a silent no-op (stale UI reference, not a fault).
pub fn toggle<B: Bookable>(
    items: &mut [B],
    id: &str,
    policy: &BookingPolicy,
    now: OffsetDateTime,
) -> ToggleOutcome {
    let Some(idx) = items.iter().position(|a| a.id() == id) else {
        debug!("toggle ignored, unknown activity id {}", id);
        return ToggleOutcome::NotFound;
    };

    if items[idx].is_booked() || items[idx].is_waitlisted() {
        let was_confirmed = items[idx].is_booked();
        let item = &mut items[idx];
        item.set_booked(false);
        item.set_waitlisted(false);
        if was_confirmed {
            let filled = item.filled();
            item.set_filled(filled.saturating_sub(1));
        }
        return ToggleOutcome::Cancelled { was_confirmed };
    }

    let candidate_start = items[idx].starts_at();
    let candidate_end = items[idx].ends_at();

    let clashes = items.iter().enumerate().any(|(i, other)| {
        i != idx
            && other.is_booked()
            && overlaps(
                candidate_start,
                candidate_end,
                other.starts_at(),
                other.ends_at(),
            )
    });
    if clashes {
        return ToggleOutcome::RejectedOverlap;
    }

    if let Some(cap) = policy.weekly_cap {
        let week_start = start_of_week(now);
        let week_end = end_of_week(now);
        let in_current_week = candidate_start >= week_start && candidate_start < week_end;
        if in_current_week && weekly_confirmed_count(items, now) >= cap {
            return ToggleOutcome::RejectedWeeklyCap;
        }
    }

    let item = &mut items[idx];
    if item.filled() >= item.capacity() {
        if policy.allow_waitlist {
            item.set_waitlisted(true);
            return ToggleOutcome::Waitlisted;
        }
        return ToggleOutcome::RejectedFull;
    }

    item.set_booked(true);
    item.set_waitlisted(false);
    let filled = item.filled();
    item.set_filled((filled + 1).min(item.capacity()));
    ToggleOutcome::Confirmed
}

/// Filter pipeline: date window, then suitability, then location, then
/// availability. Each stage narrows the previous one; the result is sorted
/// ascending by start time for both variants.
pub fn filter_activities<B, F>(
    items: &[B],
    filters: &ActivityFilters,
    now: OffsetDateTime,
    suitable: F,
) -> Vec<B>
where
    B: Bookable + Clone,
    F: Fn(&B) -> bool,
{
    let window = match filters.date_window {
        DateWindow::All => None,
        DateWindow::Today => Some((start_of_day(now), end_of_day(now))),
        DateWindow::Week => Some((start_of_day(now), end_of_next_days(now, 7))),
        DateWindow::Month => Some((start_of_day(now), end_of_next_days(now, 30))),
    };

    let mut out: Vec<B> = items
        .iter()
        .filter(|a| match window {
            Some((from, until)) => a.starts_at() >= from && a.starts_at() < until,
            None => true,
        })
        .filter(|a| match filters.suitability {
            SuitabilityFilter::All => true,
            SuitabilityFilter::Suitable => suitable(a),
        })
        .filter(|a| match &filters.location {
            LocationFilter::All => true,
            LocationFilter::Only(location) => a.location() == location,
        })
        .filter(|a| {
            !filters.only_available
                || (a.filled() < a.capacity() && !a.is_booked() && !a.is_waitlisted())
        })
        .cloned()
        .collect();

    out.sort_by_key(|a| a.starts_at());
    out
}

/// Distinct location strings across the whole collection, sorted.
pub fn distinct_locations<B: Bookable>(items: &[B]) -> Vec<String> {
    let mut locations: Vec<String> = items
        .iter()
        .map(|a| a.location().to_string())
        .filter(|l| !l.trim().is_empty())
        .collect();
    locations.sort();
    locations.dedup();
    locations
}

/// The user's confirmed bookings, ascending by start time.
pub fn booked_subset<B: Bookable + Clone>(items: &[B]) -> Vec<B> {
    let mut out: Vec<B> = items.iter().filter(|a| a.is_booked()).cloned().collect();
    out.sort_by_key(|a| a.starts_at());
    out
}

/// Confirmed bookings whose start falls inside the current calendar week.
pub fn weekly_confirmed_count<B: Bookable>(items: &[B], now: OffsetDateTime) -> u32 {
    let week_start = start_of_week(now);
    let week_end = end_of_week(now);
    items
        .iter()
        .filter(|a| a.is_booked() && a.starts_at() >= week_start && a.starts_at() < week_end)
        .count() as u32
}
