use crate::types::HealthcheckSummary;
use colored::{Color, Colorize};

pub(crate) const TITLE: &str = "React Compiler Healthcheck";
pub(crate) const ALL_OPTIMIZED: &str = "All components are optimized by React Compiler!";

/// Pass rate with one decimal, `0.0` when no components were found.
pub(crate) fn display_rate(summary: &HealthcheckSummary) -> String {
    format!("{:.1}", summary.display_pass_rate())
}

/// Applies `color` when styling is enabled, otherwise returns the plain text.
pub(crate) fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

pub(crate) fn bold(text: &str, enabled: bool) -> String {
    if enabled {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rate_rounds_to_one_decimal() {
        let s = HealthcheckSummary {
            total_components: 3,
            passed_components: 2,
            failed_components: 1,
            ..HealthcheckSummary::default()
        };
        assert_eq!(display_rate(&s), "66.7");
        assert_eq!(display_rate(&HealthcheckSummary::default()), "0.0");
    }

    #[test]
    fn test_paint_disabled_is_plain() {
        assert_eq!(paint("x", Color::Red, false), "x");
        assert_eq!(bold("x", false), "x");
    }
}
