// Readout formatting for the timer, best time and target number

/// Shown in place of a best time when no record exists
pub const NO_RECORD: &str = "--:--";

/// Shown in place of the target number once the board is cleared
pub const COMPLETION_MARKER: &str = "✓";

/// Format milliseconds as `MM:SS.HH`; minutes do not wrap at 60
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms / 1000) % 60;
    let hundredths = (ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, hundredths)
}

/// Format a stored best time, or the placeholder
pub fn format_best(best_ms: Option<u64>) -> String {
    match best_ms {
        Some(ms) => format_time(ms),
        None => NO_RECORD.to_string(),
    }
}

/// Format the target readout: the next number, or the completion marker
pub fn format_target(target: u32, finished: bool) -> String {
    if finished {
        COMPLETION_MARKER.to_string()
    } else {
        target.to_string()
    }
}
