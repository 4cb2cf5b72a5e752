pub mod host;
pub mod input;
pub mod session;

pub use host::{HostEvent, OverlayHandle, OverlayHost};
pub use input::{DatetimeInput, InputEvent};
pub use session::PickerSession;
