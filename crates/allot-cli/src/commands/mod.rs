pub mod allocate;
pub mod dispatch;
pub mod export;
pub mod init;
pub mod shared;
pub mod staff;
pub mod student;
