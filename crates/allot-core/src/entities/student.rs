use serde::{Deserialize, Serialize};

use crate::enums::Role;

/// A student awaiting (or holding) a supervisor and a moderator.
///
/// `supervisor` and `moderator` hold staff document IDs. Only assignment
/// operations mutate them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub supervisor: Option<String>,
    #[serde(default)]
    pub moderator: Option<String>,
}

impl Student {
    /// Display name in `"Surname, First"` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}, {}", self.surname, self.first_name)
    }

    /// Staff ID currently holding `role`, if any. Empty strings count as unset.
    #[must_use]
    pub fn holder(&self, role: Role) -> Option<&str> {
        let slot = match role {
            Role::Supervisor => &self.supervisor,
            Role::Moderator => &self.moderator,
        };
        slot.as_deref().filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn lacks(&self, role: Role) -> bool {
        self.holder(role).is_none()
    }

    pub fn set_holder(&mut self, role: Role, staff_id: Option<String>) {
        let staff_id = staff_id.filter(|id| !id.is_empty());
        match role {
            Role::Supervisor => self.supervisor = staff_id,
            Role::Moderator => self.moderator = staff_id,
        }
    }

    /// Course code with surrounding whitespace removed; `None` when blank.
    #[must_use]
    pub fn course(&self) -> Option<&str> {
        self.course_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}
