use serde::Serialize;
use uuid::Uuid;

use super::activities::VolunteerRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Join,
    Leave,
    SetWaitlisted,
    RemoveWaitlist,
}

impl CommandAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandAction::Join => "join",
            CommandAction::Leave => "leave",
            CommandAction::SetWaitlisted => "set_waitlisted",
            CommandAction::RemoveWaitlist => "remove_waitlist",
        }
    }
}

/// Outbound record for the persistence layer: one applied toggle becomes one
/// insert-or-update keyed on `(activity_id, user_id)`. Fire-and-forget from
/// the store's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationCommand {
    pub id: Uuid,
    pub activity_id: String,
    pub user_id: String,
    pub action: CommandAction,
    pub role: Option<VolunteerRole>,
}

impl RegistrationCommand {
    pub fn new(
        activity_id: impl Into<String>,
        user_id: impl Into<String>,
        action: CommandAction,
        role: Option<VolunteerRole>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            activity_id: activity_id.into(),
            user_id: user_id.into(),
            action,
            role,
        }
    }
}
