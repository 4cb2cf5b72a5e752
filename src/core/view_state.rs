use serde::{Deserialize, Serialize};

/// Which grid the calendar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodView {
    #[default]
    Month,
    Year,
}

impl PeriodView {
    pub fn toggled(self) -> Self {
        match self {
            Self::Month => Self::Year,
            Self::Year => Self::Month,
        }
    }
}

/// Whether the picker shows a date grid or the time confirmation screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerStage {
    #[default]
    Calendar,
    Time,
}

/// How an open session is presented by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Anchored to the bound input.
    Popup,
    /// Full dialog with larger touch targets.
    Dialog,
}
