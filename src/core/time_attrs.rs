use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const ATTR_HIDE_TIME: &str = "hide-time";
pub const ATTR_HOUR: &str = "hour";
pub const ATTR_MINUTE: &str = "minute";

/// Per-input time configuration.
///
/// `hide_time` turns the picker into a date-only picker. `default_hour` and
/// `default_minute` are applied to dates the picker creates from scratch
/// (opening on "today" with an empty input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeAttributes {
    pub hide_time: bool,
    pub default_hour: u32,
    pub default_minute: u32,
}

impl Default for TimeAttributes {
    fn default() -> Self {
        Self {
            hide_time: false,
            default_hour: 0,
            default_minute: 0,
        }
    }
}

impl TimeAttributes {
    pub fn new(hide_time: bool, default_hour: u32, default_minute: u32) -> Self {
        Self {
            hide_time,
            default_hour: default_hour % 24,
            default_minute: default_minute % 60,
        }
    }

    /// Reads `hide-time`, `hour` and `minute` from element-style attributes.
    ///
    /// A missing or `"false"` `hide-time` keeps time entry on; any other
    /// non-empty value hides it. Hour and minute fall back to the supplied
    /// current time when absent, unparseable or out of range.
    pub fn from_attributes(
        attributes: &IndexMap<String, String>,
        now_hour: u32,
        now_minute: u32,
    ) -> Self {
        let hide_time = match attributes.get(ATTR_HIDE_TIME).map(|v| v.trim()) {
            None | Some("") | Some("false") => false,
            Some(_) => true,
        };
        let default_hour = parse_in_range(attributes.get(ATTR_HOUR), 23).unwrap_or(now_hour % 24);
        let default_minute =
            parse_in_range(attributes.get(ATTR_MINUTE), 59).unwrap_or(now_minute % 60);

        Self {
            hide_time,
            default_hour,
            default_minute,
        }
    }

    pub fn time_enabled(&self) -> bool {
        !self.hide_time
    }
}

fn parse_in_range(raw: Option<&String>, max: u32) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|value| *value <= max)
}
