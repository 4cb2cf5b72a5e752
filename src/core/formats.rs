use serde::{Deserialize, Serialize};

/// Descriptors used when turning text into dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseFormats {
    pub date_only: String,
    pub date_time: String,
}

/// Descriptors used when rendering dates as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormats {
    pub date_only: String,
    pub date_time: String,
    pub month_year_label: String,
    pub date_accessibility_label: String,
    pub month_year_accessibility_label: String,
    pub date_header: String,
}

/// Opaque format descriptors handed straight to the date adapter.
///
/// The picker never inspects these strings. The defaults are strftime
/// patterns understood by [`ChronoAdapter`](crate::core::chrono_adapter::ChronoAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    pub parse: ParseFormats,
    pub display: DisplayFormats,
}

impl Default for ParseFormats {
    fn default() -> Self {
        Self {
            date_only: "%Y-%m-%d".to_string(),
            date_time: "%Y-%m-%d %H:%M".to_string(),
        }
    }
}

impl Default for DisplayFormats {
    fn default() -> Self {
        Self {
            date_only: "%Y-%m-%d".to_string(),
            date_time: "%Y-%m-%d %H:%M".to_string(),
            month_year_label: "%b %Y".to_string(),
            date_accessibility_label: "%B %-d, %Y".to_string(),
            month_year_accessibility_label: "%B %Y".to_string(),
            date_header: "%a, %b %-d".to_string(),
        }
    }
}

impl DateFormatConfig {
    /// Parse descriptor for an input, depending on whether time entry is hidden.
    pub fn parse_format(&self, hide_time: bool) -> &str {
        if hide_time {
            &self.parse.date_only
        } else {
            &self.parse.date_time
        }
    }

    /// Display descriptor for an input, depending on whether time entry is hidden.
    pub fn display_format(&self, hide_time: bool) -> &str {
        if hide_time {
            &self.display.date_only
        } else {
            &self.display.date_time
        }
    }
}
