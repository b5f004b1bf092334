use serde::{Deserialize, Serialize};

/// Canonical per-role capacity for one staff member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaRecord {
    pub staff_id: String,
    pub quota: u32,
}
