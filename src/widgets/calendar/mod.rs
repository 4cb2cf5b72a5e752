pub mod cell;
pub mod controller;
pub mod grid;
pub mod keys;

pub use cell::CalendarCell;
pub use controller::{CalendarController, CalendarControllerBuilder};
