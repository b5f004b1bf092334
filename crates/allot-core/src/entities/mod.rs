//! Entity structs for the Allot roster.
//!
//! Each entity is stored as a JSON document in one collection (see
//! `Collection`). All structs derive `Serialize` and `Deserialize`; optional
//! fields default when absent so partially-filled documents still load.

mod interest;
mod quota;
mod staff;
mod student;

pub use interest::InterestRecord;
pub use quota::QuotaRecord;
pub use staff::StaffMember;
pub use student::Student;
