/// One selectable position in a month or year grid.
///
/// `value` is the 1-indexed day of the month in month view and the
/// 0-indexed month in year view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub value: u32,
    pub display_value: String,
    pub aria_label: String,
    pub enabled: bool,
}

impl CalendarCell {
    pub fn new(
        value: u32,
        display_value: impl Into<String>,
        aria_label: impl Into<String>,
        enabled: bool,
    ) -> Self {
        Self {
            value,
            display_value: display_value.into(),
            aria_label: aria_label.into(),
            enabled,
        }
    }

    /// The value a click on this cell selects, if any.
    ///
    /// Disabled cells are inert unless `allow_disabled_selection` is set.
    pub fn clicked(&self, allow_disabled_selection: bool) -> Option<u32> {
        if !self.enabled && !allow_disabled_selection {
            return None;
        }
        Some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::CalendarCell;

    #[test]
    fn disabled_cell_ignores_clicks_by_default() {
        let cell = CalendarCell::new(4, "4", "January 4, 2017", false);
        assert_eq!(cell.clicked(false), None);
        assert_eq!(cell.clicked(true), Some(4));

        let enabled = CalendarCell::new(5, "5", "January 5, 2017", true);
        assert_eq!(enabled.clicked(false), Some(5));
    }
}
