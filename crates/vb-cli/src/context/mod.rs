mod app_context;
mod config_warnings;
pub mod gate;

pub use app_context::AppContext;
pub use config_warnings::warn_mistyped_env;
