use serde::{Deserialize, Serialize};

/// A member of staff who can supervise or moderate.
///
/// `quota` is a seed value only; the quota record collection takes
/// precedence when an entry exists. `avoid` is carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaffMember {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub quota: u32,
    #[serde(default)]
    pub avoid: Vec<String>,
}
