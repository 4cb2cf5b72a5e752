use std::cmp::Ordering;
use std::fmt::Debug;

/// Naming style for month and weekday tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStyle {
    /// `January`, `Sunday`
    Long,
    /// `Jan`, `Sun`
    Short,
    /// `J`, `S`
    Narrow,
}

/// Capability set the picker needs from a concrete date representation.
///
/// Months are 0-indexed (0 = January), days of the month are 1-indexed and
/// days of the week are 0-indexed starting at Sunday. Arithmetic is calendar
/// aware: adding a month to Jan 31 lands on the last day of February, never a
/// fixed number of days later.
///
/// Format descriptors are opaque strings handed through from
/// [`DateFormatConfig`](crate::core::formats::DateFormatConfig); only the
/// adapter interprets them.
pub trait DateAdapter: Send + Sync {
    type Date: Clone + Debug + Send + Sync + 'static;

    // --- extraction ---

    fn year(&self, date: &Self::Date) -> i32;
    fn month(&self, date: &Self::Date) -> u32;
    fn day(&self, date: &Self::Date) -> u32;
    fn day_of_week(&self, date: &Self::Date) -> u32;
    fn hours(&self, date: &Self::Date) -> u32;
    fn minutes(&self, date: &Self::Date) -> u32;
    fn days_in_month(&self, date: &Self::Date) -> u32;

    // --- names & locale ---

    fn month_names(&self, style: NameStyle) -> Vec<String>;
    fn date_names(&self) -> Vec<String>;
    fn day_of_week_names(&self, style: NameStyle) -> Vec<String>;
    fn year_name(&self, date: &Self::Date) -> String;
    fn first_day_of_week(&self) -> u32;
    fn is_12_hour(&self) -> bool;
    fn locale_time_string(&self, date: &Self::Date) -> String;

    // --- construction & arithmetic ---

    fn today(&self) -> Self::Date;

    /// Builds a date. `month` rolls into neighbouring years when outside
    /// `0..=11`; `day` is clamped into the resulting month.
    fn create_date(&self, year: i32, month: i32, day: u32, hours: u32, minutes: u32)
    -> Self::Date;

    fn add_calendar_years(&self, date: &Self::Date, years: i32) -> Self::Date;
    fn add_calendar_months(&self, date: &Self::Date, months: i32) -> Self::Date;
    fn add_calendar_days(&self, date: &Self::Date, days: i32) -> Self::Date;

    /// Sets the hour, wrapping into `0..24`. The date component is untouched.
    fn set_hours(&self, date: &Self::Date, hours: i32) -> Self::Date;

    /// Sets the minute, wrapping into `0..60`. Hour and date are untouched.
    fn set_minutes(&self, date: &Self::Date, minutes: i32) -> Self::Date;

    fn is_pm(&self, date: &Self::Date) -> bool {
        self.hours(date) >= 12
    }

    // --- text ---

    fn parse(&self, text: &str, format: &str) -> Option<Self::Date>;
    fn format(&self, date: &Self::Date, format: &str) -> String;
    fn iso_date_string(&self, date: &Self::Date) -> String;

    // --- provided ---

    /// Lexicographic comparison on (year, month, day, hour, minute).
    fn compare_date(&self, first: &Self::Date, second: &Self::Date) -> Ordering {
        self.year(first)
            .cmp(&self.year(second))
            .then_with(|| self.month(first).cmp(&self.month(second)))
            .then_with(|| self.day(first).cmp(&self.day(second)))
            .then_with(|| self.hours(first).cmp(&self.hours(second)))
            .then_with(|| self.minutes(first).cmp(&self.minutes(second)))
    }

    /// Null-safe equality: two `None`s are the same date.
    fn same_date(&self, first: Option<&Self::Date>, second: Option<&Self::Date>) -> bool {
        match (first, second) {
            (Some(a), Some(b)) => self.compare_date(a, b) == Ordering::Equal,
            (None, None) => true,
            _ => false,
        }
    }

    /// Clamps into `[min, max]`. The min check wins when both would apply.
    fn clamp_date(
        &self,
        date: Self::Date,
        min: Option<&Self::Date>,
        max: Option<&Self::Date>,
    ) -> Self::Date {
        if let Some(min) = min
            && self.compare_date(&date, min) == Ordering::Less
        {
            return min.clone();
        }
        if let Some(max) = max
            && self.compare_date(&date, max) == Ordering::Greater
        {
            return max.clone();
        }
        date
    }

    /// Whether both dates fall in the same month of the same year.
    fn same_month_and_year(&self, first: &Self::Date, second: &Self::Date) -> bool {
        self.year(first) == self.year(second) && self.month(first) == self.month(second)
    }
}

#[cfg(test)]
mod tests {
    use super::DateAdapter;
    use crate::core::chrono_adapter::ChronoAdapter;
    use std::cmp::Ordering;

    fn adapter() -> ChronoAdapter {
        ChronoAdapter::new()
    }

    #[test]
    fn compare_is_lexicographic_down_to_minutes() {
        let a = adapter();
        let base = a.create_date(2017, 0, 15, 10, 30);
        assert_eq!(a.compare_date(&base, &base), Ordering::Equal);

        let later_minute = a.set_minutes(&base, 31);
        assert_eq!(a.compare_date(&base, &later_minute), Ordering::Less);

        let earlier_year_later_month = a.create_date(2016, 11, 31, 23, 59);
        assert_eq!(
            a.compare_date(&base, &earlier_year_later_month),
            Ordering::Greater
        );
    }

    #[test]
    fn same_date_is_null_safe() {
        let a = adapter();
        let d = a.create_date(2020, 5, 1, 8, 0);
        assert!(a.same_date(Some(&d), Some(&d)));
        assert!(a.same_date(None, None));
        assert!(!a.same_date(Some(&d), None));
        assert!(!a.same_date(None, Some(&d)));
    }

    #[test]
    fn same_date_ignores_seconds() {
        let a = adapter();
        let d = a.create_date(2020, 5, 1, 8, 0);
        let with_seconds = d + chrono::Duration::seconds(42);
        assert!(a.same_date(Some(&d), Some(&with_seconds)));
    }

    #[test]
    fn clamp_prefers_min_and_is_idempotent() {
        let a = adapter();
        let min = a.create_date(2017, 0, 10, 0, 0);
        let max = a.create_date(2017, 0, 20, 0, 0);

        let early = a.create_date(2016, 11, 1, 0, 0);
        let clamped = a.clamp_date(early, Some(&min), Some(&max));
        assert_eq!(clamped, min);

        let late = a.create_date(2018, 0, 1, 0, 0);
        let once = a.clamp_date(late, Some(&min), Some(&max));
        let twice = a.clamp_date(once, Some(&min), Some(&max));
        assert_eq!(once, max);
        assert_eq!(once, twice);

        let inside = a.create_date(2017, 0, 15, 0, 0);
        assert_eq!(a.clamp_date(inside, Some(&min), Some(&max)), inside);
        assert_eq!(a.clamp_date(inside, None, None), inside);
    }
}
