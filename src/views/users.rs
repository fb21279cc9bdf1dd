//! Member directory — static roster with name/role search.

use serde::Serialize;

use super::matches_query;
use crate::config::ImageUrls;
use crate::schema::resolve_image;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Mentor,
    Learner,
    Organizer,
}

impl MemberRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Learner => "learner",
            Self::Organizer => "organizer",
        }
    }
}

/// Roster entry as stored in the binary.
struct Member {
    id: &'static str,
    name: &'static str,
    role: MemberRole,
    bio: &'static str,
    avatar: Option<&'static str>,
}

const ROSTER: &[Member] = &[
    Member {
        id: "amara-okafor",
        name: "Amara Okafor",
        role: MemberRole::Organizer,
        bio: "Runs the Thursday study nights and the project showcase.",
        avatar: Some("amara.jpg"),
    },
    Member {
        id: "lucas-moreau",
        name: "Lucas Moreau",
        role: MemberRole::Mentor,
        bio: "Backend engineer; mentors the web development track.",
        avatar: Some("lucas.jpg"),
    },
    Member {
        id: "mei-tanaka",
        name: "Mei Tanaka",
        role: MemberRole::Mentor,
        bio: "Data scientist helping with statistics and notebooks.",
        avatar: None,
    },
    Member {
        id: "jonas-berg",
        name: "Jonas Berg",
        role: MemberRole::Learner,
        bio: "Career switcher working through the frontend course.",
        avatar: Some("jonas.jpg"),
    },
    Member {
        id: "priya-raman",
        name: "Priya Raman",
        role: MemberRole::Learner,
        bio: "Building a budgeting app as her capstone project.",
        avatar: None,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCard {
    pub id: String,
    pub name: String,
    pub role: MemberRole,
    pub bio: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UserDirectory {
    pub users: Vec<UserCard>,
}

impl UserDirectory {
    /// Build the full directory with avatars resolved.
    #[must_use]
    pub fn load(urls: &ImageUrls) -> Self {
        let users = ROSTER
            .iter()
            .map(|m| UserCard {
                id: m.id.to_owned(),
                name: m.name.to_owned(),
                role: m.role,
                bio: m.bio.to_owned(),
                avatar_url: resolve_image(m.avatar, urls),
            })
            .collect();
        Self { users }
    }

    /// Keep members whose name or role contains `query`.
    #[must_use]
    pub fn filter(mut self, query: Option<&str>) -> Self {
        self.users.retain(|u| matches_query(&[u.name.as_str(), u.role.as_str()], query));
        self
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&UserCard> {
        self.users.iter().find(|u| u.id == id)
    }
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
