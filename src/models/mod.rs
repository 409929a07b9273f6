pub mod activities;
pub mod commands;
pub mod filters;
pub mod profiles;
pub mod session;
pub mod toast;

pub use activities::{
    AccessibilityFeatures, DisabilityCategory, ParticipantActivity, ParticipantActivityRow,
    VolunteerActivity, VolunteerActivityRow, VolunteerRole,
};
pub use commands::{CommandAction, RegistrationCommand};
pub use filters::{ActivityFilters, DateWindow, FilterPatch, LocationFilter, SuitabilityFilter};
pub use profiles::{
    ParticipantProfile, ParticipantProfilePatch, ProfileUpdateTicket, VolunteerProfile,
    VolunteerProfilePatch,
};
pub use session::{PortalRole, SessionContext};
pub use toast::{Toast, ToastSeverity, TOAST_TTL};
