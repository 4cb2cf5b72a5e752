use crate::core::adapter::DateAdapter;
use crate::core::error::{DATE_ADAPTER, DATE_FORMATS, PickerError, PickerResult};
use crate::core::formats::DateFormatConfig;
use crate::core::intl::IntlLabels;
use crate::core::time_attrs::TimeAttributes;
use crate::core::view_state::{PeriodView, PickerStage};
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::calendar::grid::{MonthGrid, YearGrid, build_month_grid, build_year_grid};
use crate::widgets::calendar::keys::{Navigation, month_view_key, year_view_key};
use crate::widgets::time_of_day::TimeOfDayController;
use crate::widgets::traits::{InteractionResult, PickerAction};
use crate::widgets::validators::DateFilter;
use std::cmp::Ordering;
use std::sync::Arc;

// ── Builder ─────────────────────────────────────────────────────────────

pub struct CalendarControllerBuilder<A: DateAdapter> {
    adapter: Option<Arc<A>>,
    formats: Option<DateFormatConfig>,
    labels: IntlLabels,
    min: Option<A::Date>,
    max: Option<A::Date>,
    filter: Option<DateFilter<A::Date>>,
    time: TimeAttributes,
    start_view: PeriodView,
    start_at: Option<A::Date>,
    selected: Option<A::Date>,
}

impl<A: DateAdapter> Default for CalendarControllerBuilder<A> {
    fn default() -> Self {
        Self {
            adapter: None,
            formats: None,
            labels: IntlLabels::default(),
            min: None,
            max: None,
            filter: None,
            time: TimeAttributes::default(),
            start_view: PeriodView::Month,
            start_at: None,
            selected: None,
        }
    }
}

impl<A: DateAdapter> CalendarControllerBuilder<A> {
    pub fn with_adapter(mut self, adapter: Arc<A>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn with_formats(mut self, formats: DateFormatConfig) -> Self {
        self.formats = Some(formats);
        self
    }

    pub fn with_labels(mut self, labels: IntlLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_min(mut self, min: Option<A::Date>) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: Option<A::Date>) -> Self {
        self.max = max;
        self
    }

    pub fn with_filter(mut self, filter: Option<DateFilter<A::Date>>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_time_attributes(mut self, time: TimeAttributes) -> Self {
        self.time = time;
        self
    }

    pub fn with_start_view(mut self, start_view: PeriodView) -> Self {
        self.start_view = start_view;
        self
    }

    pub fn with_start_at(mut self, start_at: Option<A::Date>) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn with_selected(mut self, selected: Option<A::Date>) -> Self {
        self.selected = selected;
        self
    }

    /// Fails when the adapter or the format config was never supplied.
    pub fn build(self) -> PickerResult<CalendarController<A>> {
        let adapter = self.adapter.ok_or(PickerError::MissingProvider(DATE_ADAPTER))?;
        let formats = self.formats.ok_or(PickerError::MissingProvider(DATE_FORMATS))?;

        let initial = match self.start_at.or_else(|| self.selected.clone()) {
            Some(date) => date,
            None => {
                let today = adapter.today();
                adapter.create_date(
                    adapter.year(&today),
                    adapter.month(&today) as i32,
                    adapter.day(&today),
                    self.time.default_hour,
                    self.time.default_minute,
                )
            }
        };
        let active = adapter.clamp_date(initial, self.min.as_ref(), self.max.as_ref());

        Ok(CalendarController {
            adapter,
            formats,
            labels: self.labels,
            min: self.min,
            max: self.max,
            filter: self.filter,
            time: self.time,
            period_view: self.start_view,
            stage: PickerStage::Calendar,
            active,
            selected: self.selected,
            time_of_day: None,
        })
    }
}

// ── Controller ──────────────────────────────────────────────────────────

/// View-state machine for one open picker.
///
/// `period_view` picks the grid (month or year) and `stage` picks between
/// the grid and the time screen. The active date drives paging and keyboard
/// focus and is clamped into `[min, max]` on every write. The selected date
/// is what the user committed to and is only emitted on confirm.
pub struct CalendarController<A: DateAdapter> {
    adapter: Arc<A>,
    formats: DateFormatConfig,
    labels: IntlLabels,
    min: Option<A::Date>,
    max: Option<A::Date>,
    filter: Option<DateFilter<A::Date>>,
    time: TimeAttributes,
    period_view: PeriodView,
    stage: PickerStage,
    active: A::Date,
    selected: Option<A::Date>,
    time_of_day: Option<TimeOfDayController<A>>,
}

impl<A: DateAdapter> CalendarController<A> {
    pub fn builder() -> CalendarControllerBuilder<A> {
        CalendarControllerBuilder::default()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn formats(&self) -> &DateFormatConfig {
        &self.formats
    }

    pub fn labels(&self) -> &IntlLabels {
        &self.labels
    }

    pub fn active_date(&self) -> &A::Date {
        &self.active
    }

    pub fn selected(&self) -> Option<&A::Date> {
        self.selected.as_ref()
    }

    pub fn min_date(&self) -> Option<&A::Date> {
        self.min.as_ref()
    }

    pub fn max_date(&self) -> Option<&A::Date> {
        self.max.as_ref()
    }

    pub fn period_view(&self) -> PeriodView {
        self.period_view
    }

    pub fn stage(&self) -> PickerStage {
        self.stage
    }

    pub fn time_enabled(&self) -> bool {
        self.time.time_enabled()
    }

    pub fn time_view(&self) -> Option<&TimeOfDayController<A>> {
        match self.stage {
            PickerStage::Time => self.time_of_day.as_ref(),
            PickerStage::Calendar => None,
        }
    }

    /// Moves the active date, clamped into `[min, max]`.
    pub fn set_active_date(&mut self, date: A::Date) {
        self.active = self
            .adapter
            .clamp_date(date, self.min.as_ref(), self.max.as_ref());
    }

    /// Filter combined with the min/max bounds; what the grids enable.
    pub fn view_filter(&self, date: &A::Date) -> bool {
        if let Some(filter) = &self.filter
            && !filter(date)
        {
            return false;
        }
        if let Some(min) = &self.min
            && self.adapter.compare_date(date, min) == Ordering::Less
        {
            return false;
        }
        if let Some(max) = &self.max
            && self.adapter.compare_date(date, max) == Ordering::Greater
        {
            return false;
        }
        true
    }

    // ── Grids ───────────────────────────────────────────────────────────

    pub fn month_grid(&self) -> MonthGrid {
        let filter = |date: &A::Date| self.view_filter(date);
        build_month_grid(
            self.adapter.as_ref(),
            &self.formats,
            &self.active,
            self.selected.as_ref(),
            Some(&filter),
        )
    }

    pub fn year_grid(&self) -> YearGrid {
        let filter = |date: &A::Date| self.view_filter(date);
        build_year_grid(
            self.adapter.as_ref(),
            &self.formats,
            &self.active,
            self.selected.as_ref(),
            Some(&filter),
        )
    }

    // ── Header ──────────────────────────────────────────────────────────

    pub fn current_period_clicked(&mut self) {
        self.period_view = self.period_view.toggled();
    }

    pub fn previous_clicked(&mut self) {
        let previous = self.step_period(-1);
        self.set_active_date(previous);
    }

    pub fn next_clicked(&mut self) {
        let next = self.step_period(1);
        self.set_active_date(next);
    }

    /// False once the active date shares the current period with `min`.
    pub fn previous_enabled(&self) -> bool {
        match &self.min {
            Some(min) => !self.same_period(&self.active, min),
            None => true,
        }
    }

    /// False once the active date shares the current period with `max`.
    pub fn next_enabled(&self) -> bool {
        match &self.max {
            Some(max) => !self.same_period(&self.active, max),
            None => true,
        }
    }

    pub fn period_button_text(&self) -> String {
        match self.period_view {
            PeriodView::Month => self
                .adapter
                .format(&self.active, &self.formats.display.month_year_label)
                .to_uppercase(),
            PeriodView::Year => self.adapter.year_name(&self.active),
        }
    }

    pub fn period_button_label(&self) -> &str {
        match self.period_view {
            PeriodView::Month => &self.labels.switch_to_year_view,
            PeriodView::Year => &self.labels.switch_to_month_view,
        }
    }

    pub fn prev_button_label(&self) -> &str {
        match self.period_view {
            PeriodView::Month => &self.labels.prev_month,
            PeriodView::Year => &self.labels.prev_year,
        }
    }

    pub fn next_button_label(&self) -> &str {
        match self.period_view {
            PeriodView::Month => &self.labels.next_month,
            PeriodView::Year => &self.labels.next_year,
        }
    }

    /// Selected (or active) date in the header format, split on commas.
    pub fn timesheet_header(&self) -> Vec<String> {
        let date = self.selected.as_ref().unwrap_or(&self.active);
        self.adapter
            .format(date, &self.formats.display.date_header)
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    }

    /// Selected time as the locale shows it, if anything is selected.
    pub fn selected_time_text(&self) -> Option<String> {
        self.selected
            .as_ref()
            .map(|date| self.adapter.locale_time_string(date))
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Click on a grid cell. Month cells ignore disabled clicks; year cells
    /// accept them since a month is only a way to navigate.
    pub fn cell_clicked(&mut self, value: u32) -> InteractionResult<A::Date> {
        match self.period_view {
            PeriodView::Month => {
                let grid = self.month_grid();
                let Some(day) = grid
                    .cell(value.saturating_sub(1) as usize)
                    .and_then(|cell| cell.clicked(false))
                else {
                    log::debug!("ignoring click on disabled day {value}");
                    return InteractionResult::ignored();
                };
                self.date_selected(day)
            }
            PeriodView::Year => {
                let grid = self.year_grid();
                match grid.cell(value).and_then(|cell| cell.clicked(true)) {
                    Some(month) => self.month_selected(month),
                    None => InteractionResult::ignored(),
                }
            }
        }
    }

    /// Selects a day of the active month, keeping the active time.
    ///
    /// With time entry enabled this moves on to the time stage; otherwise the
    /// selection is confirmed right away.
    pub fn date_selected(&mut self, day: u32) -> InteractionResult<A::Date> {
        let date = self.adapter.create_date(
            self.adapter.year(&self.active),
            self.adapter.month(&self.active) as i32,
            day,
            self.adapter.hours(&self.active),
            self.adapter.minutes(&self.active),
        );
        if !self.adapter.same_date(Some(&date), self.selected.as_ref()) {
            self.selected = Some(date.clone());
        }
        self.set_active_date(date.clone());

        if !self.time.time_enabled() {
            log::debug!("date selected with time hidden, confirming");
            return self.confirm();
        }

        // A meridiem shift must not carry the picked day outside min/max.
        let synced = self
            .time_of_day
            .as_mut()
            .map(|time_of_day| time_of_day.sync_selected(date.clone()));
        let selected = match synced {
            Some(shifted) if self.view_filter(&shifted) => shifted,
            synced => {
                if synced.is_some() {
                    log::debug!("meridiem shift leaves the allowed range, keeping the picked time");
                }
                self.time_of_day = Some(TimeOfDayController::new(Arc::clone(&self.adapter), date.clone()));
                date
            }
        };
        self.selected = Some(selected);
        self.stage = PickerStage::Time;
        InteractionResult::handled()
    }

    /// Jumps to `month` of the active year and shows its month grid.
    pub fn month_selected(&mut self, month: u32) -> InteractionResult<A::Date> {
        let date = self.adapter.create_date(
            self.adapter.year(&self.active),
            month as i32,
            self.adapter.day(&self.active),
            self.adapter.hours(&self.active),
            self.adapter.minutes(&self.active),
        );
        self.set_active_date(date);
        self.period_view = PeriodView::Month;
        InteractionResult::moved_focus()
    }

    // ── Time stage ──────────────────────────────────────────────────────

    pub fn increase_hours(&mut self) -> InteractionResult<A::Date> {
        self.update_time(TimeOfDayController::increase_hours)
    }

    pub fn decrease_hours(&mut self) -> InteractionResult<A::Date> {
        self.update_time(TimeOfDayController::decrease_hours)
    }

    pub fn increase_minutes(&mut self) -> InteractionResult<A::Date> {
        self.update_time(TimeOfDayController::increase_minutes)
    }

    pub fn decrease_minutes(&mut self) -> InteractionResult<A::Date> {
        self.update_time(TimeOfDayController::decrease_minutes)
    }

    pub fn toggle_meridiem(&mut self) -> InteractionResult<A::Date> {
        self.update_time(TimeOfDayController::toggle_meridiem)
    }

    pub fn enter_hours(&mut self, text: &str) -> InteractionResult<A::Date> {
        self.update_time(|time_of_day| {
            time_of_day
                .enter_hours(text)
                .unwrap_or_else(|| time_of_day.selected().clone())
        })
    }

    pub fn enter_minutes(&mut self, text: &str) -> InteractionResult<A::Date> {
        self.update_time(|time_of_day| {
            time_of_day
                .enter_minutes(text)
                .unwrap_or_else(|| time_of_day.selected().clone())
        })
    }

    /// Leaves the time screen for the grid, keeping the selection.
    pub fn back_to_calendar(&mut self) -> InteractionResult<A::Date> {
        if self.stage == PickerStage::Calendar {
            return InteractionResult::ignored();
        }
        self.stage = PickerStage::Calendar;
        InteractionResult::moved_focus()
    }

    /// Emits the selection. Without one there is nothing to confirm.
    pub fn confirm(&mut self) -> InteractionResult<A::Date> {
        match &self.selected {
            Some(selected) => {
                log::debug!("confirming selection {selected:?}");
                InteractionResult::with_action(PickerAction::Confirmed(selected.clone()))
            }
            None => {
                log::debug!("confirm without a selection ignored");
                InteractionResult::ignored()
            }
        }
    }

    pub fn cancel(&mut self) -> InteractionResult<A::Date> {
        InteractionResult::with_action(PickerAction::CloseRequested)
    }

    // ── Keyboard ────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) -> InteractionResult<A::Date> {
        match self.stage {
            PickerStage::Calendar => self.handle_grid_key(key),
            PickerStage::Time => self.handle_time_key(key),
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) -> InteractionResult<A::Date> {
        let navigation = match self.period_view {
            PeriodView::Month => month_view_key(self.adapter.as_ref(), &self.active, key),
            PeriodView::Year => year_view_key(self.adapter.as_ref(), &self.active, key),
        };
        match navigation {
            Navigation::Move(date) => {
                self.set_active_date(date);
                InteractionResult::moved_focus()
            }
            Navigation::Commit => match self.period_view {
                PeriodView::Month if self.view_filter(&self.active) => {
                    self.date_selected(self.adapter.day(&self.active))
                }
                PeriodView::Month => InteractionResult::ignored(),
                PeriodView::Year => self.month_selected(self.adapter.month(&self.active)),
            },
            Navigation::Ignored => InteractionResult::ignored(),
        }
    }

    fn handle_time_key(&mut self, key: KeyEvent) -> InteractionResult<A::Date> {
        match key.code {
            KeyCode::Up => self.increase_hours(),
            KeyCode::Down => self.decrease_hours(),
            KeyCode::Right => self.increase_minutes(),
            KeyCode::Left => self.decrease_minutes(),
            KeyCode::Char('a' | 'p' | 'A' | 'P' | ' ') => self.toggle_meridiem(),
            KeyCode::Enter => self.confirm(),
            KeyCode::Backspace => self.back_to_calendar(),
            _ => InteractionResult::ignored(),
        }
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn update_time(
        &mut self,
        change: impl FnOnce(&mut TimeOfDayController<A>) -> A::Date,
    ) -> InteractionResult<A::Date> {
        if self.stage != PickerStage::Time {
            return InteractionResult::ignored();
        }
        let Some(time_of_day) = self.time_of_day.as_mut() else {
            return InteractionResult::ignored();
        };
        let updated = change(time_of_day);
        self.selected = Some(updated.clone());
        self.set_active_date(updated);
        InteractionResult::handled()
    }

    fn step_period(&self, delta: i32) -> A::Date {
        match self.period_view {
            PeriodView::Month => self.adapter.add_calendar_months(&self.active, delta),
            PeriodView::Year => self.adapter.add_calendar_years(&self.active, delta),
        }
    }

    fn same_period(&self, first: &A::Date, second: &A::Date) -> bool {
        match self.period_view {
            PeriodView::Month => self.adapter.same_month_and_year(first, second),
            PeriodView::Year => self.adapter.year(first) == self.adapter.year(second),
        }
    }
}
