pub mod record;
pub mod security;

pub use record::RecordCommands;
pub use security::SecurityCommands;
