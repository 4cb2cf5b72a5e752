use crate::core::adapter::DateAdapter;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("Invalid regex pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn from_hours(hours: u32) -> Self {
        if hours >= 12 { Self::Pm } else { Self::Am }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

/// Hour/minute/AM-PM stepping over a selected date-time.
///
/// The meridiem is never stored apart from the hour: every mutation goes
/// through [`Self::commit`], which re-derives it from the new value. Every
/// mutation returns the full updated date-time for the owning controller.
pub struct TimeOfDayController<A: DateAdapter> {
    adapter: Arc<A>,
    selected: A::Date,
    meridiem: Meridiem,
}

impl<A: DateAdapter> TimeOfDayController<A> {
    pub fn new(adapter: Arc<A>, selected: A::Date) -> Self {
        let meridiem = Meridiem::from_hours(adapter.hours(&selected));
        Self {
            adapter,
            selected,
            meridiem,
        }
    }

    pub fn selected(&self) -> &A::Date {
        &self.selected
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    pub fn meridiem_label(&self) -> &'static str {
        self.meridiem.label()
    }

    pub fn is_12_hour(&self) -> bool {
        self.adapter.is_12_hour()
    }

    /// Hour as shown on the clock: 1..=12 in 12-hour locales, 0..=23 otherwise.
    pub fn clock_hours(&self) -> u32 {
        let hours = self.adapter.hours(&self.selected);
        if !self.is_12_hour() {
            return hours;
        }
        match hours % 12 {
            0 => 12,
            h => h,
        }
    }

    pub fn clock_minutes(&self) -> u32 {
        self.adapter.minutes(&self.selected)
    }

    // ── Steppers ────────────────────────────────────────────────────────

    pub fn increase_hours(&mut self) -> A::Date {
        self.step_hours(1)
    }

    pub fn decrease_hours(&mut self) -> A::Date {
        self.step_hours(-1)
    }

    pub fn increase_minutes(&mut self) -> A::Date {
        self.step_minutes(1)
    }

    pub fn decrease_minutes(&mut self) -> A::Date {
        self.step_minutes(-1)
    }

    /// Moves the value by twelve hours and flips AM/PM with it.
    pub fn toggle_meridiem(&mut self) -> A::Date {
        let delta = match self.meridiem {
            Meridiem::Am => 12,
            Meridiem::Pm => -12,
        };
        let hours = self.adapter.hours(&self.selected) as i32 + delta;
        let next = self.adapter.set_hours(&self.selected, hours);
        self.commit(next)
    }

    // ── Typed entry ─────────────────────────────────────────────────────

    /// Applies typed hour text. Only the last two digits count; values out of
    /// range snap to the lowest valid hour. In 12-hour locales the hour is read
    /// in the current meridiem. Returns `None` when the text has no digits.
    pub fn enter_hours(&mut self, text: &str) -> Option<A::Date> {
        let typed = last_two_digits(text)?;
        let hours = if self.is_12_hour() {
            let clock = if (1..=12).contains(&typed) { typed } else { 1 };
            let base = clock % 12;
            match self.meridiem {
                Meridiem::Am => base,
                Meridiem::Pm => base + 12,
            }
        } else if typed <= 23 {
            typed
        } else {
            0
        };
        let next = self.adapter.set_hours(&self.selected, hours as i32);
        Some(self.commit(next))
    }

    /// Applies typed minute text, with the same last-two-digits rule.
    pub fn enter_minutes(&mut self, text: &str) -> Option<A::Date> {
        let typed = last_two_digits(text)?;
        let minutes = if typed <= 59 { typed } else { 0 };
        let next = self.adapter.set_minutes(&self.selected, minutes as i32);
        Some(self.commit(next))
    }

    // ── Selection sync ──────────────────────────────────────────────────

    /// Takes a new selection from the calendar, shifting it by twelve hours
    /// when needed so it stays on the side of noon currently shown.
    pub fn sync_selected(&mut self, date: A::Date) -> A::Date {
        let hours = self.adapter.hours(&date);
        let shifted = match (self.meridiem, hours >= 12) {
            (Meridiem::Pm, false) => self.adapter.set_hours(&date, hours as i32 + 12),
            (Meridiem::Am, true) => self.adapter.set_hours(&date, hours as i32 - 12),
            _ => date,
        };
        self.commit(shifted)
    }

    fn step_hours(&mut self, delta: i32) -> A::Date {
        let hours = self.adapter.hours(&self.selected) as i32 + delta;
        let next = self.adapter.set_hours(&self.selected, hours);
        self.commit(next)
    }

    fn step_minutes(&mut self, delta: i32) -> A::Date {
        let minutes = self.adapter.minutes(&self.selected) as i32 + delta;
        let next = self.adapter.set_minutes(&self.selected, minutes);
        self.commit(next)
    }

    fn commit(&mut self, next: A::Date) -> A::Date {
        self.meridiem = Meridiem::from_hours(self.adapter.hours(&next));
        self.selected = next.clone();
        next
    }
}

fn last_two_digits(text: &str) -> Option<u32> {
    let digits: Vec<&str> = DIGIT.find_iter(text).map(|m| m.as_str()).collect();
    if digits.is_empty() {
        return None;
    }
    let tail = digits[digits.len().saturating_sub(2)..].concat();
    tail.parse().ok()
}
