use crate::models::{DisabilityCategory, ParticipantActivity};

/// Whether an activity should be shown as suitable for a participant with
/// the given disability category. Total: an explicit `suitable_for` listing
/// wins, then the fixed per-category accessibility rule, and "Other" is
/// never filtered.
pub fn is_suitable(activity: &ParticipantActivity, category: DisabilityCategory) -> bool {
    if activity.suitable_for.contains(&category) {
        return true;
    }

    let features = &activity.accessibility;
    match category {
        DisabilityCategory::Physical => features.wheelchair_accessible,
        DisabilityCategory::Visual => features.visual_support,
        DisabilityCategory::Hearing => features.hearing_support,
        DisabilityCategory::Intellectual => {
            features.cognitive_support && features.quiet_environment
        }
        DisabilityCategory::Multiple => {
            features.wheelchair_accessible && features.visual_support
        }
        DisabilityCategory::Other => true,
    }
}
