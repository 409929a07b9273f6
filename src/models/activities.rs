use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::services::time_windows::parse_instant;
use crate::store::booking::Bookable;

/// The five independent accessibility flags an activity can advertise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityFeatures {
    pub wheelchair_accessible: bool,
    pub visual_support: bool,
    pub hearing_support: bool,
    pub cognitive_support: bool,
    pub quiet_environment: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisabilityCategory {
    #[serde(rename = "Physical Disability")]
    Physical,
    #[serde(rename = "Visual Impairment")]
    Visual,
    #[serde(rename = "Hearing Impairment")]
    Hearing,
    #[serde(rename = "Intellectual Disability")]
    Intellectual,
    #[serde(rename = "Multiple Disabilities")]
    Multiple,
    #[serde(rename = "Other")]
    Other,
}

impl DisabilityCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DisabilityCategory::Physical => "Physical Disability",
            DisabilityCategory::Visual => "Visual Impairment",
            DisabilityCategory::Hearing => "Hearing Impairment",
            DisabilityCategory::Intellectual => "Intellectual Disability",
            DisabilityCategory::Multiple => "Multiple Disabilities",
            DisabilityCategory::Other => "Other",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Physical Disability" => Some(DisabilityCategory::Physical),
            "Visual Impairment" => Some(DisabilityCategory::Visual),
            "Hearing Impairment" => Some(DisabilityCategory::Hearing),
            "Intellectual Disability" => Some(DisabilityCategory::Intellectual),
            "Multiple Disabilities" => Some(DisabilityCategory::Multiple),
            "Other" => Some(DisabilityCategory::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolunteerRole {
    #[default]
    #[serde(rename = "General support")]
    GeneralSupport,
    #[serde(rename = "Wheelchair assistance")]
    WheelchairAssistance,
    #[serde(rename = "Visual guidance")]
    VisualGuidance,
    #[serde(rename = "Sign language")]
    SignLanguage,
    #[serde(rename = "First aid")]
    FirstAid,
}

impl VolunteerRole {
    pub fn as_str(self) -> &'static str {
        match self {
            VolunteerRole::GeneralSupport => "General support",
            VolunteerRole::WheelchairAssistance => "Wheelchair assistance",
            VolunteerRole::VisualGuidance => "Visual guidance",
            VolunteerRole::SignLanguage => "Sign language",
            VolunteerRole::FirstAid => "First aid",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "General support" => Some(VolunteerRole::GeneralSupport),
            "Wheelchair assistance" => Some(VolunteerRole::WheelchairAssistance),
            "Visual guidance" => Some(VolunteerRole::VisualGuidance),
            "Sign language" => Some(VolunteerRole::SignLanguage),
            "First aid" => Some(VolunteerRole::FirstAid),
            _ => None,
        }
    }
}

/// Participant-facing activity. `filled` counts confirmed registrations only;
/// the current user's waitlisted state is tracked separately and never counts
/// against capacity.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub meeting_point: String,
    pub meals_provided: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    pub capacity: u32,
    pub filled: u32,
    pub accessibility: AccessibilityFeatures,
    pub suitable_for: Vec<DisabilityCategory>,
    pub is_registered: bool,
    pub waitlisted: bool,
}

impl ParticipantActivity {
    pub fn is_full(&self) -> bool {
        self.filled >= self.capacity
    }
}

impl Bookable for ParticipantActivity {
    fn id(&self) -> &str {
        &self.id
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn starts_at(&self) -> OffsetDateTime {
        self.starts_at
    }
    fn ends_at(&self) -> OffsetDateTime {
        self.ends_at
    }
    fn capacity(&self) -> u32 {
        self.capacity
    }
    fn filled(&self) -> u32 {
        self.filled
    }
    fn set_filled(&mut self, filled: u32) {
        self.filled = filled;
    }
    fn is_booked(&self) -> bool {
        self.is_registered
    }
    fn set_booked(&mut self, booked: bool) {
        self.is_registered = booked;
    }
    fn is_waitlisted(&self) -> bool {
        self.waitlisted
    }
    fn set_waitlisted(&mut self, waitlisted: bool) {
        self.waitlisted = waitlisted;
    }
}

/// Volunteer-facing activity. `my_role` is the user's role choice and can be
/// changed freely; `assigned_role` is the snapshot frozen when the sign-up
/// was confirmed.
#[derive(Debug, Clone, Serialize)]
pub struct VolunteerActivity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub ends_at: OffsetDateTime,
    pub capacity: u32,
    pub filled: u32,
    pub is_signed_up: bool,
    pub my_role: VolunteerRole,
    pub assigned_role: Option<VolunteerRole>,
}

impl VolunteerActivity {
    pub fn is_full(&self) -> bool {
        self.filled >= self.capacity
    }
}

impl Bookable for VolunteerActivity {
    fn id(&self) -> &str {
        &self.id
    }
    fn location(&self) -> &str {
        &self.location
    }
    fn starts_at(&self) -> OffsetDateTime {
        self.starts_at
    }
    fn ends_at(&self) -> OffsetDateTime {
        self.ends_at
    }
    fn capacity(&self) -> u32 {
        self.capacity
    }
    fn filled(&self) -> u32 {
        self.filled
    }
    fn set_filled(&mut self, filled: u32) {
        self.filled = filled;
    }
    fn is_booked(&self) -> bool {
        self.is_signed_up
    }
    fn set_booked(&mut self, booked: bool) {
        self.is_signed_up = booked;
    }
    fn is_waitlisted(&self) -> bool {
        false
    }
    fn set_waitlisted(&mut self, _waitlisted: bool) {
        // Volunteer activities have no waitlist.
    }
}

/// Row shape as the hosted backend returns it. List-ish columns arrive as
/// JSON string blobs and are parsed leniently: bad JSON degrades to
/// empty/false, a bad timestamp drops the row.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantActivityRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub meeting_point: Option<String>,
    pub meals_provided: Option<bool>,
    pub starts_at: String,
    pub ends_at: String,
    pub capacity: i64,
    pub filled: i64,
    pub accessibility: Option<String>,
    pub suitable_for: Option<String>,
    pub is_registered: Option<bool>,
    pub waitlisted: Option<bool>,
}

impl ParticipantActivityRow {
    pub fn into_activity(self) -> Option<ParticipantActivity> {
        let starts_at = parse_instant(&self.starts_at)?;
        let ends_at = parse_instant(&self.ends_at)?;
        if starts_at >= ends_at {
            return None;
        }

        let capacity = self.capacity.max(0) as u32;
        let filled = self.filled.clamp(0, capacity as i64) as u32;

        let accessibility = self
            .accessibility
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        let suitable_for = parse_category_list(self.suitable_for.as_deref());

        Some(ParticipantActivity {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            meeting_point: self.meeting_point.unwrap_or_default(),
            meals_provided: self.meals_provided.unwrap_or(false),
            starts_at,
            ends_at,
            capacity,
            filled,
            accessibility,
            suitable_for,
            is_registered: self.is_registered.unwrap_or(false),
            waitlisted: self.waitlisted.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolunteerActivityRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    pub capacity: i64,
    pub filled: i64,
    pub is_signed_up: Option<bool>,
    pub assigned_role: Option<String>,
}

impl VolunteerActivityRow {
    pub fn into_activity(self) -> Option<VolunteerActivity> {
        let starts_at = parse_instant(&self.starts_at)?;
        let ends_at = parse_instant(&self.ends_at)?;
        if starts_at >= ends_at {
            return None;
        }

        let capacity = self.capacity.max(0) as u32;
        let filled = self.filled.clamp(0, capacity as i64) as u32;
        let assigned_role = self.assigned_role.as_deref().and_then(VolunteerRole::parse);

        Some(VolunteerActivity {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            starts_at,
            ends_at,
            capacity,
            filled,
            is_signed_up: self.is_signed_up.unwrap_or(false),
            my_role: assigned_role.unwrap_or_default(),
            assigned_role,
        })
    }
}

fn parse_category_list(raw: Option<&str>) -> Vec<DisabilityCategory> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };
    let labels: Vec<String> = serde_json::from_str(raw).unwrap_or_default();
    labels
        .iter()
        .filter_map(|l| DisabilityCategory::parse(l))
        .collect()
}
