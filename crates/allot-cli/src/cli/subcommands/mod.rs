mod allocate;
mod staff;
mod student;

pub use allocate::AllocateCommands;
pub use staff::StaffCommands;
pub use student::StudentCommands;
