pub mod log;
pub mod severity;
pub mod systime;

pub use log::{init, log, min_severity};
pub use severity::LogSeverity;
