use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityFilter {
    #[default]
    All,
    Suitable,
}

/// UI-session filter state. Never persisted; replaced via shallow-merge
/// patches only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilters {
    pub date_window: DateWindow,
    pub location: LocationFilter,
    pub suitability: SuitabilityFilter,
    pub only_available: bool,
}

impl ActivityFilters {
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(date_window) = patch.date_window {
            self.date_window = date_window;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(suitability) = patch.suitability {
            self.suitability = suitability;
        }
        if let Some(only_available) = patch.only_available {
            self.only_available = only_available;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterPatch {
    pub date_window: Option<DateWindow>,
    pub location: Option<LocationFilter>,
    pub suitability: Option<SuitabilityFilter>,
    pub only_available: Option<bool>,
}
