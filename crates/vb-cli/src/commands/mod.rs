pub mod dispatch;
pub mod fields;
pub mod records;
pub mod security;
pub mod summary;
