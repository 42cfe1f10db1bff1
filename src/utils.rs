use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone};

/// Split a path into its ordered components. Leading, trailing, and repeated
/// separators are ignored, so `"/"` and `""` both yield no components.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|c| !c.is_empty()).collect()
}

/// Seconds since the Unix epoch.
pub fn timestamp_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Human-readable byte count, one decimal above 1 KiB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["K", "M", "G", "T"];
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}

/// Render a timestamp the way `ls -l` does, e.g. `Aug 29 14:05`.
pub fn format_time(secs: u64) -> String {
    match Local.timestamp_opt(secs as i64, 0) {
        chrono::LocalResult::Single(t) => t.format("%b %e %H:%M").to_string(),
        _ => "???".to_owned(),
    }
}
