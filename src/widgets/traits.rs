// ---------------------------------------------------------------------------
// Picker actions
// ---------------------------------------------------------------------------

/// Outward effect of an interaction, consumed by the owning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction<D> {
    /// The user confirmed this selection.
    Confirmed(D),
    /// The picker should close without emitting a selection.
    CloseRequested,
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionResult<D> {
    /// The event was consumed; the host should suppress its default handling.
    pub handled: bool,
    /// The active cell moved and should receive focus after the next render.
    pub focus_active_cell: bool,
    pub actions: Vec<PickerAction<D>>,
}

impl<D> Default for InteractionResult<D> {
    fn default() -> Self {
        Self {
            handled: false,
            focus_active_cell: false,
            actions: Vec::new(),
        }
    }
}

impl<D> InteractionResult<D> {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    pub fn moved_focus() -> Self {
        Self {
            handled: true,
            focus_active_cell: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: PickerAction<D>) -> Self {
        Self {
            handled: true,
            focus_active_cell: false,
            actions: vec![action],
        }
    }

    pub fn confirmed(&self) -> Option<&D> {
        self.actions.iter().find_map(|action| match action {
            PickerAction::Confirmed(date) => Some(date),
            PickerAction::CloseRequested => None,
        })
    }
}
