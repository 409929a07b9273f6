pub mod eligibility;
pub mod time_windows;
