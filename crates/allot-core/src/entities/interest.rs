use serde::{Deserialize, Serialize};

/// Free-text interest tags and project ideas for one staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestRecord {
    pub staff_id: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub project_ideas: Vec<String>,
}
