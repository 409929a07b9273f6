use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activities::DisabilityCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub disability: DisabilityCategory,
    pub caregiver_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParticipantProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub disability: Option<DisabilityCategory>,
    pub caregiver_contact: Option<Option<String>>,
}

impl ParticipantProfilePatch {
    pub fn apply(self, profile: &mut ParticipantProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(disability) = self.disability {
            profile.disability = disability;
        }
        if let Some(caregiver_contact) = self.caregiver_contact {
            profile.caregiver_contact = caregiver_contact;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub experience: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolunteerProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<String>,
    pub languages: Option<Vec<String>>,
}

impl VolunteerProfilePatch {
    pub fn apply(self, profile: &mut VolunteerProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(experience) = self.experience {
            profile.experience = experience;
        }
        if let Some(languages) = self.languages {
            profile.languages = languages;
        }
    }
}

/// Handle for an in-flight profile write. The store applies the patch
/// locally right away; the caller pushes the write out and reports back
/// with this ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileUpdateTicket(Uuid);

impl ProfileUpdateTicket {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
