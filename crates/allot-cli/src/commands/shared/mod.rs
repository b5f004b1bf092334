pub mod limit;
pub mod parse;
pub mod records;
pub mod source;
