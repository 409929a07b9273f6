//! In-memory core for the activity portal: the participant and volunteer
//! activity stores, their filtering/eligibility rules, and the
//! capacity/waitlist bookkeeping they share. Persistence, auth and all
//! rendering live outside this crate; the stores only emit commands toward
//! the data layer and accept resolutions back.

pub mod models;
pub mod services;
pub mod store;

pub use models::{
    AccessibilityFeatures, ActivityFilters, CommandAction, DateWindow, DisabilityCategory,
    FilterPatch, LocationFilter, ParticipantActivity, ParticipantProfile, PortalRole,
    RegistrationCommand, SessionContext, SuitabilityFilter, Toast, ToastSeverity,
    VolunteerActivity, VolunteerRole,
};
pub use store::booking::{Bookable, BookingPolicy, ToggleOutcome};
pub use store::participant::ParticipantActivityStore;
pub use store::volunteer::VolunteerActivityStore;
pub use store::ToggleResult;
