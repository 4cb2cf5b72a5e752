pub mod core;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use core::adapter::{DateAdapter, NameStyle};
pub use core::chrono_adapter::ChronoAdapter;
pub use core::config::PickerConfig;
pub use core::error::{PickerError, PickerResult};
pub use core::formats::DateFormatConfig;
pub use core::time_attrs::TimeAttributes;
pub use core::view_state;

pub use widgets::calendar::{CalendarCell, CalendarController};
pub use widgets::picker::{DatetimeInput, OverlayHost, PickerSession};
pub use widgets::time_of_day::TimeOfDayController;
pub use widgets::validators;
