use crate::core::adapter::DateAdapter;
use crate::terminal::{KeyCode, KeyEvent};

/// Outcome of a navigation key in one of the calendar grids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<D> {
    /// New active date, not yet clamped.
    Move(D),
    /// Enter on the active cell.
    Commit,
    /// Key is not a grid key; let it through.
    Ignored,
}

/// Month view: arrows move by day or week, Home/End jump within the month,
/// PageUp/PageDown move by month (by year with Alt).
pub fn month_view_key<A: DateAdapter>(
    adapter: &A,
    active: &A::Date,
    key: KeyEvent,
) -> Navigation<A::Date> {
    let target = match key.code {
        KeyCode::Left => adapter.add_calendar_days(active, -1),
        KeyCode::Right => adapter.add_calendar_days(active, 1),
        KeyCode::Up => adapter.add_calendar_days(active, -7),
        KeyCode::Down => adapter.add_calendar_days(active, 7),
        KeyCode::Home => adapter.add_calendar_days(active, 1 - adapter.day(active) as i32),
        KeyCode::End => adapter.add_calendar_days(
            active,
            adapter.days_in_month(active) as i32 - adapter.day(active) as i32,
        ),
        KeyCode::PageUp if key.has_alt() => adapter.add_calendar_years(active, -1),
        KeyCode::PageUp => adapter.add_calendar_months(active, -1),
        KeyCode::PageDown if key.has_alt() => adapter.add_calendar_years(active, 1),
        KeyCode::PageDown => adapter.add_calendar_months(active, 1),
        KeyCode::Enter => return Navigation::Commit,
        _ => return Navigation::Ignored,
    };
    Navigation::Move(target)
}

/// Year view: arrows move by month or by grid column, Home/End jump to
/// January/December, PageUp/PageDown move by year (by decade with Alt).
pub fn year_view_key<A: DateAdapter>(
    adapter: &A,
    active: &A::Date,
    key: KeyEvent,
) -> Navigation<A::Date> {
    let month = adapter.month(active);
    let target = match key.code {
        KeyCode::Left => adapter.add_calendar_months(active, -1),
        KeyCode::Right => adapter.add_calendar_months(active, 1),
        KeyCode::Up => adapter.add_calendar_months(active, prev_month_in_same_col(month)),
        KeyCode::Down => adapter.add_calendar_months(active, next_month_in_same_col(month)),
        KeyCode::Home => adapter.add_calendar_months(active, -(month as i32)),
        KeyCode::End => adapter.add_calendar_months(active, 11 - month as i32),
        KeyCode::PageUp => adapter.add_calendar_years(active, if key.has_alt() { -10 } else { -1 }),
        KeyCode::PageDown => adapter.add_calendar_years(active, if key.has_alt() { 10 } else { 1 }),
        KeyCode::Enter => return Navigation::Commit,
        _ => return Navigation::Ignored,
    };
    Navigation::Move(target)
}

// The first row holds months 0..=4 and the year label; the second holds 5..=11.
// Columns 5 and 6 only exist in the second row, so those months jump a full year.

/// Month offset for moving down one row in the year grid.
pub fn next_month_in_same_col(month: u32) -> i32 {
    match month {
        0..=4 => 5,
        5..=9 => 7,
        _ => 12,
    }
}

/// Month offset for moving up one row in the year grid.
pub fn prev_month_in_same_col(month: u32) -> i32 {
    match month {
        0..=4 => -7,
        5..=9 => -5,
        _ => -12,
    }
}
