//! Time formatting for the position label and the playlist duration column.

/// Format a millisecond count as `M:SS`, or `H:MM:SS` once it reaches an hour.
pub fn format_ms(ms: u64) -> String {
    let seconds = (ms / 1000) % 60;
    let minutes = (ms / 60_000) % 60;
    let hours = ms / 3_600_000;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Same as [`format_ms`] for callers holding signed values.
///
/// Panics on negative input: a negative position is a bug upstream and
/// rendering it as a clock would only hide it.
pub fn format_signed_ms(ms: i64) -> String {
    match u64::try_from(ms) {
        Ok(ms) => format_ms(ms),
        Err(_) => panic!("negative time value: {ms}ms"),
    }
}
