use crate::core::ElementId;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct PendingFocus {
    guard: Guard,
    target: ElementId,
}

/// Focus moves deferred until the current render pass has settled.
///
/// Requests are keyed: a newer request under the same key supersedes the
/// older one, and `cancel` invalidates whatever is pending for a key.
#[derive(Debug, Default)]
pub struct FocusScheduler {
    pending: Vec<PendingFocus>,
    key_versions: HashMap<String, u64>,
}

impl FocusScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, key: impl Into<String>, target: ElementId) {
        let key = key.into();
        let version = self.bump_version(&key);
        self.pending.push(PendingFocus {
            guard: Guard { key, version },
            target,
        });
    }

    pub fn cancel(&mut self, key: &str) {
        self.bump_version(key);
    }

    /// Drains every still-valid request, oldest first.
    pub fn render_complete(&mut self) -> Vec<ElementId> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .filter(|task| self.task_is_valid(task))
            .map(|task| task.target)
            .collect()
    }

    fn task_is_valid(&self, task: &PendingFocus) -> bool {
        let current = *self.key_versions.get(&task.guard.key).unwrap_or(&0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
