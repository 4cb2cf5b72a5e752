use crate::core::adapter::{DateAdapter, NameStyle};
use crate::core::formats::DateFormatConfig;
use crate::widgets::calendar::cell::CalendarCell;

pub const DAYS_PER_WEEK: usize = 7;

/// Months per year-grid row. The first row is short so the year label fits
/// in its two trailing slots.
pub const YEAR_ROWS: [&[u32]; 2] = [&[0, 1, 2, 3, 4], &[5, 6, 7, 8, 9, 10, 11]];

/// Cells the year label needs at the end of the first row.
pub const YEAR_LABEL_CELLS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayLabel {
    pub long: String,
    pub narrow: String,
}

/// Rendered model of one month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    /// Short month name, upper-cased (e.g. `JAN`).
    pub label: String,
    pub weeks: Vec<Vec<CalendarCell>>,
    /// Blank slots before the 1st of the month.
    pub first_week_offset: usize,
    /// Day of the month to highlight as selected, if the selection is in this month.
    pub selected_date: Option<u32>,
    /// Day of the month that is today, if today is in this month.
    pub today_date: Option<u32>,
    /// Index of the keyboard-focused cell (day - 1).
    pub active_cell: usize,
    /// Weekday header rotated to start at the locale's first day of week.
    pub weekdays: Vec<WeekdayLabel>,
}

impl MonthGrid {
    pub fn cell_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }

    /// Row and column of the cell at `index`, counting blank slots.
    pub fn position(&self, index: usize) -> (usize, usize) {
        let slot = index + self.first_week_offset;
        (slot / DAYS_PER_WEEK, slot % DAYS_PER_WEEK)
    }

    pub fn cell(&self, index: usize) -> Option<&CalendarCell> {
        let (row, col) = self.position(index);
        let col = if row == 0 {
            col.checked_sub(self.first_week_offset)?
        } else {
            col
        };
        self.weeks.get(row)?.get(col)
    }

    pub fn is_active_cell(&self, row: usize, col: usize) -> bool {
        self.position(self.active_cell) == (row, col)
    }
}

/// Rendered model of one year.
#[derive(Debug, Clone)]
pub struct YearGrid {
    /// Year name (e.g. `2017`).
    pub label: String,
    /// Five months in the first row, seven in the second.
    pub rows: Vec<Vec<CalendarCell>>,
    pub selected_month: Option<u32>,
    pub today_month: Option<u32>,
    /// 0-indexed month that has keyboard focus.
    pub active_cell: usize,
}

impl YearGrid {
    pub fn position(month: u32) -> (usize, usize) {
        let first_row = YEAR_ROWS[0].len() as u32;
        if month < first_row {
            (0, month as usize)
        } else {
            (1, (month - first_row) as usize)
        }
    }

    pub fn cell(&self, month: u32) -> Option<&CalendarCell> {
        let (row, col) = Self::position(month);
        self.rows.get(row)?.get(col)
    }

    pub fn is_active_cell(&self, row: usize, col: usize) -> bool {
        Self::position(self.active_cell as u32) == (row, col)
    }
}

/// Blank slots before the 1st of `active`'s month for the adapter's week start.
pub fn first_week_offset<A: DateAdapter>(adapter: &A, active: &A::Date) -> usize {
    let first_of_month = first_of_month(adapter, active);
    let day_of_week = adapter.day_of_week(&first_of_month) as usize;
    let first_day = adapter.first_day_of_week() as usize % DAYS_PER_WEEK;
    (DAYS_PER_WEEK + day_of_week - first_day) % DAYS_PER_WEEK
}

pub fn weekday_labels<A: DateAdapter>(adapter: &A) -> Vec<WeekdayLabel> {
    let long = adapter.day_of_week_names(NameStyle::Long);
    let narrow = adapter.day_of_week_names(NameStyle::Narrow);
    let mut labels: Vec<WeekdayLabel> = long
        .into_iter()
        .zip(narrow)
        .map(|(long, narrow)| WeekdayLabel { long, narrow })
        .collect();
    if !labels.is_empty() {
        let first_day = adapter.first_day_of_week() as usize % labels.len();
        labels.rotate_left(first_day);
    }
    labels
}

/// Builds the month grid around `active`.
///
/// Every cell keeps `active`'s hour and minute so that filters comparing
/// full date-times see the same time the selection would get.
pub fn build_month_grid<A: DateAdapter>(
    adapter: &A,
    formats: &DateFormatConfig,
    active: &A::Date,
    selected: Option<&A::Date>,
    filter: Option<&dyn Fn(&A::Date) -> bool>,
) -> MonthGrid {
    let offset = first_week_offset(adapter, active);
    let days_in_month = adapter.days_in_month(active);
    let date_names = adapter.date_names();
    let (year, month) = (adapter.year(active), adapter.month(active) as i32);
    let (hours, minutes) = (adapter.hours(active), adapter.minutes(active));

    let mut weeks: Vec<Vec<CalendarCell>> = vec![Vec::new()];
    let mut slot = offset;
    for day in 1..=days_in_month {
        if slot == DAYS_PER_WEEK {
            weeks.push(Vec::new());
            slot = 0;
        }
        let date = adapter.create_date(year, month, day, hours, minutes);
        let enabled = filter.is_none_or(|accept| accept(&date));
        let aria_label = adapter.format(&date, &formats.display.date_accessibility_label);
        let display = date_names
            .get(day as usize - 1)
            .cloned()
            .unwrap_or_else(|| day.to_string());
        if let Some(week) = weeks.last_mut() {
            week.push(CalendarCell::new(day, display, aria_label, enabled));
        }
        slot += 1;
    }

    let month_names = adapter.month_names(NameStyle::Short);
    let label = month_names
        .get(month as usize)
        .map(|name| name.to_uppercase())
        .unwrap_or_default();
    let today = adapter.today();

    MonthGrid {
        label,
        weeks,
        first_week_offset: offset,
        selected_date: day_in_month_of(adapter, selected, active),
        today_date: day_in_month_of(adapter, Some(&today), active),
        active_cell: adapter.day(active).saturating_sub(1) as usize,
        weekdays: weekday_labels(adapter),
    }
}

/// Builds the year grid around `active`.
pub fn build_year_grid<A: DateAdapter>(
    adapter: &A,
    formats: &DateFormatConfig,
    active: &A::Date,
    selected: Option<&A::Date>,
    filter: Option<&dyn Fn(&A::Date) -> bool>,
) -> YearGrid {
    let month_names = adapter.month_names(NameStyle::Short);
    let year = adapter.year(active);
    let (hours, minutes) = (adapter.hours(active), adapter.minutes(active));

    let rows = YEAR_ROWS
        .iter()
        .map(|row| {
            row.iter()
                .map(|&month| {
                    let first = adapter.create_date(year, month as i32, 1, hours, minutes);
                    let aria_label =
                        adapter.format(&first, &formats.display.month_year_accessibility_label);
                    let display = month_names
                        .get(month as usize)
                        .map(|name| name.to_uppercase())
                        .unwrap_or_default();
                    let enabled = is_month_enabled(adapter, first, filter);
                    CalendarCell::new(month, display, aria_label, enabled)
                })
                .collect()
        })
        .collect();

    let today = adapter.today();
    YearGrid {
        label: adapter.year_name(active),
        rows,
        selected_month: month_in_year_of(adapter, selected, active),
        today_month: month_in_year_of(adapter, Some(&today), active),
        active_cell: adapter.month(active) as usize,
    }
}

/// A month is enabled when any of its days passes the filter.
fn is_month_enabled<A: DateAdapter>(
    adapter: &A,
    first_of_month: A::Date,
    filter: Option<&dyn Fn(&A::Date) -> bool>,
) -> bool {
    let Some(accept) = filter else {
        return true;
    };
    let month = adapter.month(&first_of_month);
    let mut date = first_of_month;
    while adapter.month(&date) == month {
        if accept(&date) {
            return true;
        }
        let next = adapter.add_calendar_days(&date, 1);
        if adapter.compare_date(&next, &date).is_le() {
            break;
        }
        date = next;
    }
    false
}

fn first_of_month<A: DateAdapter>(adapter: &A, date: &A::Date) -> A::Date {
    adapter.create_date(
        adapter.year(date),
        adapter.month(date) as i32,
        1,
        adapter.hours(date),
        adapter.minutes(date),
    )
}

fn day_in_month_of<A: DateAdapter>(
    adapter: &A,
    date: Option<&A::Date>,
    active: &A::Date,
) -> Option<u32> {
    date.filter(|date| adapter.same_month_and_year(date, active))
        .map(|date| adapter.day(date))
}

fn month_in_year_of<A: DateAdapter>(
    adapter: &A,
    date: Option<&A::Date>,
    active: &A::Date,
) -> Option<u32> {
    date.filter(|date| adapter.year(date) == adapter.year(active))
        .map(|date| adapter.month(date))
}
