//! Number and clock formatting for human-readable reports.

/// Format match seconds as a game clock, `mm:ss`.
///
/// Negative values (a ward placed in the first 10ms) clamp to zero.
///
/// # Examples
/// ```
/// use lolstats_types::formatting::format_clock;
/// assert_eq!(format_clock(0.0), "00:00");
/// assert_eq!(format_clock(754.9), "12:34");
/// assert_eq!(format_clock(3725.0), "62:05");
/// ```
pub fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a percentage with one decimal place.
///
/// # Examples
/// ```
/// use lolstats_types::formatting::format_pct;
/// assert_eq!(format_pct(2.777), "2.8%");
/// assert_eq!(format_pct(100.0), "100.0%");
/// ```
pub fn format_pct(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a large number with K suffix for compact display.
///
/// # Examples
/// ```
/// use lolstats_types::formatting::format_compact;
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(12_345.0), "12.3K");
/// ```
pub fn format_compact(n: f64) -> String {
    if n.abs() >= 1_000.0 {
        format!("{:.1}K", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    }
}
