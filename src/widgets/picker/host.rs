use crate::core::ElementId;

/// Host-assigned identifier for one shown popup or dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Notifications the host delivers for a shown overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The overlay went away on the host side (dialog dismissed, popup detached).
    Closed(OverlayHandle),
    /// The user clicked outside the overlay.
    BackdropClicked(OverlayHandle),
}

/// Whatever actually shows pickers on screen and owns focus.
pub trait OverlayHost {
    /// Shows `content` anchored to `anchor`.
    fn show_popup(&mut self, anchor: &ElementId, content: &ElementId) -> OverlayHandle;

    /// Shows `content` as a full dialog.
    fn show_dialog(&mut self, content: &ElementId) -> OverlayHandle;

    /// Detaches a shown overlay. Closing an unknown handle is a no-op.
    fn close(&mut self, handle: OverlayHandle);

    fn focused_element(&self) -> Option<ElementId>;

    /// Moves focus. Unknown elements are ignored.
    fn focus(&mut self, element: &ElementId);
}
