use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, Time};

/// Lenient RFC 3339 parse; the backend stores instants with explicit
/// offsets. All window math below keeps the offset of the supplied "now",
/// so "local time" is whatever offset the caller resolved — a known
/// limitation inherited from the surrounding system, not fixed here.
pub fn parse_instant(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()
}

pub fn start_of_day(now: OffsetDateTime) -> OffsetDateTime {
    now.replace_time(Time::MIDNIGHT)
}

/// Start of the next day; today is the half-open range
/// `[start_of_day, end_of_day)`.
pub fn end_of_day(now: OffsetDateTime) -> OffsetDateTime {
    start_of_day(now) + Duration::days(1)
}

/// End of the rolling n-day window starting today.
pub fn end_of_next_days(now: OffsetDateTime, days: i64) -> OffsetDateTime {
    start_of_day(now) + Duration::days(days)
}

/// Start of the current calendar week. Weeks start on Sunday.
pub fn start_of_week(now: OffsetDateTime) -> OffsetDateTime {
    let days_since_sunday = i64::from(now.weekday().number_days_from_sunday());
    start_of_day(now) - Duration::days(days_since_sunday)
}

pub fn end_of_week(now: OffsetDateTime) -> OffsetDateTime {
    start_of_week(now) + Duration::days(7)
}

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
/// Intervals that merely touch (one ends exactly when the other begins) do
/// not clash.
pub fn overlaps(
    a_start: OffsetDateTime,
    a_end: OffsetDateTime,
    b_start: OffsetDateTime,
    b_end: OffsetDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    // 2026-08-30 is a Sunday.
    const NOW: OffsetDateTime = datetime!(2026-09-02 14:30:00 +02:00);

    #[test]
    fn day_bounds() {
        assert_eq!(start_of_day(NOW), datetime!(2026-09-02 00:00:00 +02:00));
        assert_eq!(end_of_day(NOW), datetime!(2026-09-03 00:00:00 +02:00));
    }

    #[test]
    fn rolling_windows() {
        assert_eq!(
            end_of_next_days(NOW, 7),
            datetime!(2026-09-09 00:00:00 +02:00)
        );
        assert_eq!(
            end_of_next_days(NOW, 30),
            datetime!(2026-10-02 00:00:00 +02:00)
        );
    }

    #[test]
    fn calendar_week_starts_sunday() {
        assert_eq!(start_of_week(NOW), datetime!(2026-08-30 00:00:00 +02:00));
        assert_eq!(end_of_week(NOW), datetime!(2026-09-06 00:00:00 +02:00));

        // A Sunday is the start of its own week.
        let sunday = datetime!(2026-08-30 09:00:00 +02:00);
        assert_eq!(start_of_week(sunday), datetime!(2026-08-30 00:00:00 +02:00));
    }

    #[test]
    fn overlap_is_half_open() {
        let a_start = datetime!(2026-09-02 10:00:00 +02:00);
        let a_end = datetime!(2026-09-02 12:00:00 +02:00);

        // Overlapping.
        assert!(overlaps(
            a_start,
            a_end,
            datetime!(2026-09-02 11:00:00 +02:00),
            datetime!(2026-09-02 13:00:00 +02:00),
        ));
        // Contained.
        assert!(overlaps(
            a_start,
            a_end,
            datetime!(2026-09-02 10:30:00 +02:00),
            datetime!(2026-09-02 11:00:00 +02:00),
        ));
        // Exactly adjacent: no clash.
        assert!(!overlaps(
            a_start,
            a_end,
            datetime!(2026-09-02 12:00:00 +02:00),
            datetime!(2026-09-02 14:00:00 +02:00),
        ));
        assert!(!overlaps(
            a_start,
            a_end,
            datetime!(2026-09-02 08:00:00 +02:00),
            datetime!(2026-09-02 10:00:00 +02:00),
        ));
    }

    #[test]
    fn parse_instant_wants_explicit_offset() {
        assert!(parse_instant("2026-09-02T10:00:00+02:00").is_some());
        assert!(parse_instant(" 2026-09-02T10:00:00Z ").is_some());
        assert!(parse_instant("2026-09-02T10:00:00").is_none());
        assert!(parse_instant("next tuesday").is_none());
    }
}
