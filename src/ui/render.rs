use crate::core::adapter::DateAdapter;
use crate::core::view_state::{PeriodView, PickerStage};
use crate::widgets::calendar::cell::CalendarCell;
use crate::widgets::calendar::controller::CalendarController;
use crate::widgets::calendar::grid::{DAYS_PER_WEEK, MonthGrid, YEAR_LABEL_CELLS, YearGrid};
use crate::widgets::time_of_day::TimeOfDayController;
use unicode_width::UnicodeWidthStr;

const CELL_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellMark {
    Active,
    Selected,
    Disabled,
    Today,
    Plain,
}

impl CellMark {
    fn brackets(self) -> (char, char) {
        match self {
            Self::Active => ('[', ']'),
            Self::Selected => ('<', '>'),
            Self::Disabled => ('(', ')'),
            Self::Today => ('\'', '\''),
            Self::Plain => (' ', ' '),
        }
    }
}

/// Plain-text lines for an open picker.
pub fn render_picker<A: DateAdapter>(calendar: &CalendarController<A>) -> Vec<String> {
    let mut lines = Vec::new();
    match calendar.stage() {
        PickerStage::Calendar => {
            lines.push(render_header(calendar));
            lines.push(String::new());
            match calendar.period_view() {
                PeriodView::Month => lines.extend(render_month(&calendar.month_grid())),
                PeriodView::Year => lines.extend(render_year(&calendar.year_grid())),
            }
            lines.push(String::new());
            lines.push("arrows move · enter select · tab switch view · esc close".to_string());
        }
        PickerStage::Time => {
            lines.push(calendar.timesheet_header().join(", "));
            lines.push(String::new());
            if let Some(time_of_day) = calendar.time_view() {
                lines.push(render_time(time_of_day));
            }
            lines.push(String::new());
            let labels = calendar.labels();
            lines.push(format!(
                "up/down hours · left/right minutes · a/p {} · enter {} · backspace back · esc {}",
                labels.toggle_meridiem.to_lowercase(),
                labels.submit.to_lowercase(),
                labels.cancel.to_lowercase(),
            ));
        }
    }
    lines
}

fn render_header<A: DateAdapter>(calendar: &CalendarController<A>) -> String {
    let prev = if calendar.previous_enabled() { "<" } else { " " };
    let next = if calendar.next_enabled() { ">" } else { " " };
    let title = calendar.period_button_text();
    let width = CELL_WIDTH * DAYS_PER_WEEK;
    let inner = width.saturating_sub(4);
    format!("{prev} {} {next}", center(&title, inner))
}

fn render_month(grid: &MonthGrid) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.weeks.len() + 2);
    lines.push(format!("{:^width$}", grid.label, width = CELL_WIDTH * DAYS_PER_WEEK));
    lines.push(
        grid.weekdays
            .iter()
            .map(|weekday| center(&weekday.narrow, CELL_WIDTH))
            .collect(),
    );
    for (row, week) in grid.weeks.iter().enumerate() {
        let mut line = String::new();
        let lead = if row == 0 { grid.first_week_offset } else { 0 };
        line.push_str(&" ".repeat(lead * CELL_WIDTH));
        for (col, cell) in week.iter().enumerate() {
            let mark = if grid.is_active_cell(row, col + lead) {
                CellMark::Active
            } else if grid.selected_date == Some(cell.value) {
                CellMark::Selected
            } else if !cell.enabled {
                CellMark::Disabled
            } else if grid.today_date == Some(cell.value) {
                CellMark::Today
            } else {
                CellMark::Plain
            };
            line.push_str(&render_cell(cell, mark));
        }
        lines.push(line.trim_end().to_string());
    }
    lines
}

fn render_year(grid: &YearGrid) -> Vec<String> {
    grid.rows
        .iter()
        .enumerate()
        .map(|(row, months)| {
            let mut line: String = months
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let mark = if grid.is_active_cell(row, col) {
                        CellMark::Active
                    } else if grid.selected_month == Some(cell.value) {
                        CellMark::Selected
                    } else if !cell.enabled {
                        CellMark::Disabled
                    } else if grid.today_month == Some(cell.value) {
                        CellMark::Today
                    } else {
                        CellMark::Plain
                    };
                    render_cell(cell, mark)
                })
                .collect();
            if row == 0 {
                line.push_str(&center(&grid.label, CELL_WIDTH * YEAR_LABEL_CELLS));
            }
            line.trim_end().to_string()
        })
        .collect()
}

fn render_time<A: DateAdapter>(time_of_day: &TimeOfDayController<A>) -> String {
    let clock = format!(
        "{:02} : {:02}",
        time_of_day.clock_hours(),
        time_of_day.clock_minutes()
    );
    if time_of_day.is_12_hour() {
        format!("{clock} {}", time_of_day.meridiem_label())
    } else {
        clock
    }
}

fn render_cell(cell: &CalendarCell, mark: CellMark) -> String {
    let (open, close) = mark.brackets();
    let text = format!("{open}{}{close}", pad_left(&cell.display_value, 3));
    pad_right(&text, CELL_WIDTH)
}

fn pad_left(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{text}", " ".repeat(width.saturating_sub(used)))
}

fn pad_right(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

fn center(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let total = width.saturating_sub(used);
    let left = total / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(total - left))
}
