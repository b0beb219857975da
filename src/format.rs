//! Compact notation for engagement counts.

/// Formats a count using K/M suffixes the way social feeds abbreviate them.
///
/// | Range               | Output                      |
/// |---------------------|-----------------------------|
/// | `0..=999`           | exact value                 |
/// | `1_000..=9_999`     | one decimal, floored (`1.2K`) |
/// | `10_000..=999_999`  | whole thousands (`15K`)     |
/// | `1_000_000..`       | one decimal, floored (`1.5M`) |
///
/// A trailing `.0` is always dropped, so `1000` becomes `1K`.
///
/// ```
/// use postmock::format_compact;
///
/// assert_eq!(format_compact(1234), "1.2K");
/// assert_eq!(format_compact(999_999), "999K");
/// assert_eq!(format_compact(2_000_000), "2M");
/// ```
pub fn format_compact(n: u64) -> String {
    match n {
        0..=999 => n.to_string(),
        1_000..=9_999 => with_tenths(n / 100, 'K'),
        10_000..=999_999 => format!("{}K", n / 1_000),
        _ => with_tenths(n / 100_000, 'M'),
    }
}

/// Renders `tenths / 10` with one decimal place, dropping a zero fraction.
fn with_tenths(tenths: u64, suffix: char) -> String {
    let whole = tenths / 10;
    match tenths % 10 {
        0 => format!("{whole}{suffix}"),
        frac => format!("{whole}.{frac}{suffix}"),
    }
}

/// Returns the display text for a metric.
///
/// Metric values are free text. When `compact` is set and the text is a plain
/// unsigned integer it is abbreviated with [`format_compact`]; anything else
/// (including already abbreviated values like `"12.3K"`) is shown verbatim.
pub fn display_metric(text: &str, compact: bool) -> String {
    if compact {
        if let Ok(n) = text.trim().parse::<u64>() {
            return format_compact(n);
        }
    }
    text.to_string()
}
