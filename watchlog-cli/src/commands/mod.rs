pub(crate) mod add;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod remove;
pub(crate) mod stats;
pub(crate) mod update;

use watchlog_lib::Media;

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Format a runtime in minutes as `1h 58m`.
pub(crate) fn format_minutes(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {:02}m", h, m),
    }
}

/// The id column value; unsaved entries never reach the output.
pub(crate) fn id_label(media: &Media) -> String {
    media
        .id()
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Rating column: blank until rated.
pub(crate) fn rating_label(rating: f64) -> String {
    if rating > 0.0 {
        format!("{:.1}", rating)
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Heat", 10), "Heat");
        assert_eq!(truncate_str("The Good, the Bad and the Ugly", 10), "The Goo...");
        assert_eq!(truncate_str("Amélie", 3), "Amé");
    }

    #[test]
    fn minutes_format() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(154), "2h 34m");
    }

    #[test]
    fn rating_label_blank_until_rated() {
        assert_eq!(rating_label(0.0), "-");
        assert_eq!(rating_label(9.5), "9.5");
    }
}
