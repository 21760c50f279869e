use crate::severity::LogSeverity;
use crate::systime::now;
use once_cell::sync::OnceCell;

static MIN_SEVERITY: OnceCell<LogSeverity> = OnceCell::new();

/// Sets the process-wide minimum severity. Only the first call wins; returns whether this
/// call was the one that set it.
pub fn init(min: LogSeverity) -> bool {
    MIN_SEVERITY.set(min).is_ok()
}

/// The minimum severity in effect, `Info` until [`init`] is called.
pub fn min_severity() -> LogSeverity {
    MIN_SEVERITY.get().copied().unwrap_or(LogSeverity::Info)
}

pub fn format_line(msg: &str, log_severity: LogSeverity, timestamp: &str) -> String {
    format!("[{}] {} {}", log_severity, timestamp, msg)
}

pub fn log(msg: String, log_severity: LogSeverity) {
    if log_severity < min_severity() {
        return;
    }
    let line = format_line(&msg, log_severity, &now());
    if log_severity.is_problem() {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}
