use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalRole {
    Participant,
    Volunteer,
    Staff,
}

impl PortalRole {
    pub fn as_str(self) -> &'static str {
        match self {
            PortalRole::Participant => "participant",
            PortalRole::Volunteer => "volunteer",
            PortalRole::Staff => "staff",
        }
    }
}

/// The one source of truth for "is someone logged in and as what". Built
/// from the auth service's session and handed to the stores at
/// construction; nothing else writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    logged_in: bool,
    user_id: Option<String>,
    role: Option<PortalRole>,
}

impl SessionContext {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, user_id: impl Into<String>, role: PortalRole) {
        self.logged_in = true;
        self.user_id = Some(user_id.into());
        self.role = Some(role);
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn role(&self) -> Option<PortalRole> {
        self.role
    }
}
