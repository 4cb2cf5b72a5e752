use serde::{Deserialize, Serialize};

/// Read-only label table for buttons and screen-reader text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntlLabels {
    pub open_calendar: String,
    pub prev_month: String,
    pub next_month: String,
    pub prev_year: String,
    pub next_year: String,
    pub switch_to_month_view: String,
    pub switch_to_year_view: String,
    pub increase_hours: String,
    pub decrease_hours: String,
    pub increase_minutes: String,
    pub decrease_minutes: String,
    pub toggle_meridiem: String,
    pub cancel: String,
    pub submit: String,
}

impl Default for IntlLabels {
    fn default() -> Self {
        Self {
            open_calendar: "Open calendar".to_string(),
            prev_month: "Previous month".to_string(),
            next_month: "Next month".to_string(),
            prev_year: "Previous year".to_string(),
            next_year: "Next year".to_string(),
            switch_to_month_view: "Change to month view".to_string(),
            switch_to_year_view: "Change to year view".to_string(),
            increase_hours: "Increase Hours".to_string(),
            decrease_hours: "Decrease Hours".to_string(),
            increase_minutes: "Increase Minutes".to_string(),
            decrease_minutes: "Decrease Minutes".to_string(),
            toggle_meridiem: "Toggle AM and PM".to_string(),
            cancel: "Cancel".to_string(),
            submit: "Submit".to_string(),
        }
    }
}
