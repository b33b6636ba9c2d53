pub mod cli;
pub mod error_log;
pub mod logger;
pub mod session;
pub mod tag;

pub use session::{edit, view, EditConfig, EditOutcome};
