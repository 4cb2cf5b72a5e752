pub mod calendar;
pub mod picker;
pub mod time_of_day;
pub mod traits;
pub mod validators;
