use crate::core::adapter::{DateAdapter, NameStyle};
use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, Timelike};
use std::fmt::Write;

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Tried in order when a parse descriptor is empty.
const FALLBACK_PARSE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d",
];

/// Days in a 1-indexed month, or `None` when chrono has no such month.
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    (28..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
}

/// [`DateAdapter`] over `chrono::NaiveDateTime` with English name tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChronoAdapter {
    first_day_of_week: u32,
    twelve_hour: bool,
}

impl Default for ChronoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChronoAdapter {
    pub fn new() -> Self {
        Self {
            first_day_of_week: 0,
            twelve_hour: false,
        }
    }

    /// 0 = Sunday .. 6 = Saturday; larger values wrap.
    pub fn with_first_day_of_week(mut self, day: u32) -> Self {
        self.first_day_of_week = day % 7;
        self
    }

    pub fn with_twelve_hour(mut self, twelve_hour: bool) -> Self {
        self.twelve_hour = twelve_hour;
        self
    }

    fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
    }
}

fn shorten(names: &[&str], len: usize) -> Vec<String> {
    names
        .iter()
        .map(|name| name.chars().take(len).collect())
        .collect()
}

fn names(table: &[&str], style: NameStyle) -> Vec<String> {
    match style {
        NameStyle::Long => table.iter().map(|name| name.to_string()).collect(),
        NameStyle::Short => shorten(table, 3),
        NameStyle::Narrow => shorten(table, 1),
    }
}

impl DateAdapter for ChronoAdapter {
    type Date = NaiveDateTime;

    fn year(&self, date: &NaiveDateTime) -> i32 {
        date.year()
    }

    fn month(&self, date: &NaiveDateTime) -> u32 {
        date.month0()
    }

    fn day(&self, date: &NaiveDateTime) -> u32 {
        date.day()
    }

    fn day_of_week(&self, date: &NaiveDateTime) -> u32 {
        date.weekday().num_days_from_sunday()
    }

    fn hours(&self, date: &NaiveDateTime) -> u32 {
        date.hour()
    }

    fn minutes(&self, date: &NaiveDateTime) -> u32 {
        date.minute()
    }

    fn days_in_month(&self, date: &NaiveDateTime) -> u32 {
        month_length(date.year(), date.month()).unwrap_or(date.day())
    }

    fn month_names(&self, style: NameStyle) -> Vec<String> {
        names(&MONTHS_LONG, style)
    }

    fn date_names(&self) -> Vec<String> {
        (1..=31).map(|day: u32| day.to_string()).collect()
    }

    fn day_of_week_names(&self, style: NameStyle) -> Vec<String> {
        names(&WEEKDAYS_LONG, style)
    }

    fn year_name(&self, date: &NaiveDateTime) -> String {
        date.year().to_string()
    }

    fn first_day_of_week(&self) -> u32 {
        self.first_day_of_week
    }

    fn is_12_hour(&self) -> bool {
        self.twelve_hour
    }

    fn locale_time_string(&self, date: &NaiveDateTime) -> String {
        if self.twelve_hour {
            self.format(date, "%I:%M %p")
        } else {
            self.format(date, "%H:%M")
        }
    }

    fn today(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn create_date(
        &self,
        year: i32,
        month: i32,
        day: u32,
        hours: u32,
        minutes: u32,
    ) -> NaiveDateTime {
        let year = year.saturating_add(month.div_euclid(12));
        let month = month.rem_euclid(12) as u32 + 1;
        let day = match month_length(year, month) {
            Some(length) => day.clamp(1, length),
            None => day,
        };

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hours % 24, minutes % 60, 0))
            .unwrap_or(if year < 0 {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            })
    }

    fn add_calendar_years(&self, date: &NaiveDateTime, years: i32) -> NaiveDateTime {
        self.add_calendar_months(date, years.saturating_mul(12))
    }

    fn add_calendar_months(&self, date: &NaiveDateTime, months: i32) -> NaiveDateTime {
        let shifted = if months >= 0 {
            date.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.unwrap_or(*date)
    }

    fn add_calendar_days(&self, date: &NaiveDateTime, days: i32) -> NaiveDateTime {
        let shifted = if days >= 0 {
            date.checked_add_days(Days::new(u64::from(days.unsigned_abs())))
        } else {
            date.checked_sub_days(Days::new(u64::from(days.unsigned_abs())))
        };
        shifted.unwrap_or(*date)
    }

    fn set_hours(&self, date: &NaiveDateTime, hours: i32) -> NaiveDateTime {
        date.with_hour(hours.rem_euclid(24) as u32).unwrap_or(*date)
    }

    fn set_minutes(&self, date: &NaiveDateTime, minutes: i32) -> NaiveDateTime {
        date.with_minute(minutes.rem_euclid(60) as u32)
            .unwrap_or(*date)
    }

    fn parse(&self, text: &str, format: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if !format.is_empty() {
            return Self::parse_with(text, format);
        }
        chrono::DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.naive_local())
            .ok()
            .or_else(|| {
                FALLBACK_PARSE_FORMATS
                    .iter()
                    .find_map(|candidate| Self::parse_with(text, candidate))
            })
    }

    fn format(&self, date: &NaiveDateTime, format: &str) -> String {
        // An invalid descriptor makes the Display impl error instead of panicking here.
        let mut out = String::new();
        match write!(out, "{}", date.format(format)) {
            Ok(()) => out,
            Err(_) => String::new(),
        }
    }

    fn iso_date_string(&self, date: &NaiveDateTime) -> String {
        self.format(date, "%Y-%m-%d")
    }
}

#[cfg(test)]
mod tests {
    use super::{ChronoAdapter, month_length};
    use crate::core::adapter::{DateAdapter, NameStyle};

    #[test]
    fn month_length_follows_the_calendar_and_rejects_bad_months() {
        assert_eq!(month_length(2016, 2), Some(29));
        assert_eq!(month_length(2017, 2), Some(28));
        assert_eq!(month_length(1900, 2), Some(28));
        assert_eq!(month_length(2000, 2), Some(29));
        assert_eq!(month_length(2017, 4), Some(30));
        assert_eq!(month_length(2017, 12), Some(31));
        assert_eq!(month_length(2017, 0), None);
        assert_eq!(month_length(2017, 13), None);
    }

    #[test]
    fn add_year_from_leap_day_clamps_to_feb_28() {
        let a = ChronoAdapter::new();
        let leap_day = a.create_date(2016, 1, 29, 0, 0);
        assert_eq!(a.days_in_month(&leap_day), 29);

        let next = a.add_calendar_years(&leap_day, 1);
        assert_eq!((a.year(&next), a.month(&next), a.day(&next)), (2017, 1, 28));
    }

    #[test]
    fn add_month_from_jan_31_lands_on_last_day_of_feb() {
        let a = ChronoAdapter::new();
        let jan_31 = a.create_date(2017, 0, 31, 9, 15);
        let feb = a.add_calendar_months(&jan_31, 1);
        assert_eq!((a.month(&feb), a.day(&feb)), (1, 28));
        assert_eq!((a.hours(&feb), a.minutes(&feb)), (9, 15));

        let back = a.add_calendar_months(&jan_31, -2);
        assert_eq!((a.year(&back), a.month(&back), a.day(&back)), (2016, 10, 30));
    }

    #[test]
    fn create_date_rolls_month_and_clamps_day() {
        let a = ChronoAdapter::new();
        let rolled = a.create_date(2017, 12, 1, 0, 0);
        assert_eq!((a.year(&rolled), a.month(&rolled)), (2018, 0));

        let negative = a.create_date(2017, -1, 31, 0, 0);
        assert_eq!((a.year(&negative), a.month(&negative), a.day(&negative)), (2016, 11, 31));

        let clamped = a.create_date(2017, 1, 31, 0, 0);
        assert_eq!(a.day(&clamped), 28);
    }

    #[test]
    fn set_hours_and_minutes_wrap_without_touching_the_date() {
        let a = ChronoAdapter::new();
        let d = a.create_date(2017, 5, 30, 23, 59);

        let wrapped = a.set_hours(&d, 24);
        assert_eq!(a.hours(&wrapped), 0);
        assert_eq!(a.day(&wrapped), 30);

        let back = a.set_hours(&d, -1);
        assert_eq!(a.hours(&back), 23);

        let minute = a.set_minutes(&d, 60);
        assert_eq!((a.hours(&minute), a.minutes(&minute)), (23, 0));
        assert_eq!(a.day(&minute), 30);
    }

    #[test]
    fn parse_format_round_trip_keeps_same_date() {
        let a = ChronoAdapter::new();
        let d = a.create_date(2021, 3, 9, 14, 5);

        let text = a.format(&d, "%Y-%m-%d %H:%M");
        let parsed = a.parse(&text, "%Y-%m-%d %H:%M").expect("parse");
        assert!(a.same_date(Some(&d), Some(&parsed)));

        let date_only = a.parse(&a.format(&d, "%Y-%m-%d"), "%Y-%m-%d").expect("parse");
        assert_eq!(
            (a.year(&date_only), a.month(&date_only), a.day(&date_only)),
            (2021, 3, 9)
        );
    }

    #[test]
    fn parse_rejects_garbage_and_uses_fallbacks() {
        let a = ChronoAdapter::new();
        assert!(a.parse("not a date", "%Y-%m-%d").is_none());
        assert!(a.parse("   ", "").is_none());

        let fallback = a.parse("2020-02-29", "").expect("fallback");
        assert_eq!(a.day(&fallback), 29);
        let with_time = a.parse("2020-02-29T10:30", "").expect("fallback");
        assert_eq!(a.hours(&with_time), 10);
    }

    #[test]
    fn invalid_format_descriptor_yields_empty_text() {
        let a = ChronoAdapter::new();
        let d = a.create_date(2021, 0, 1, 0, 0);
        assert_eq!(a.format(&d, "%Q"), "");
    }

    #[test]
    fn name_tables_and_locale_flags() {
        let a = ChronoAdapter::new()
            .with_first_day_of_week(8)
            .with_twelve_hour(true);
        assert_eq!(a.first_day_of_week(), 1);
        assert_eq!(a.month_names(NameStyle::Short)[8], "Sep");
        assert_eq!(a.day_of_week_names(NameStyle::Narrow)[0], "S");
        assert_eq!(a.date_names().len(), 31);

        let evening = a.create_date(2021, 0, 1, 18, 7);
        assert!(a.is_pm(&evening));
        assert_eq!(a.locale_time_string(&evening), "06:07 PM");
    }
}
