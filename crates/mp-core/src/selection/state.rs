use std::collections::HashSet;

use crate::ids::AssetUri;

/// Result of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Inserted at the end; `order` is its 1-based selection number.
    Selected { order: usize },
    /// Removed; `previous_order` is the number it used to carry.
    Deselected { previous_order: usize },
    /// Selection already holds `maximum` items, nothing changed.
    MaximumReached,
    /// Selection is disabled, nothing changed.
    Disabled,
}

impl ToggleOutcome {
    pub fn is_change(self) -> bool {
        matches!(
            self,
            ToggleOutcome::Selected { .. } | ToggleOutcome::Deselected { .. }
        )
    }
}

/// Outcome of seeding an initial selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub accepted: usize,
    pub duplicates: usize,
    /// Ids that did not fit under `maximum`, in the order they were offered.
    pub dropped: Vec<AssetUri>,
}

/// Ordered set of selected asset ids with a hard cap.
///
/// Insertion order is selection order and drives the numbering shown on
/// tiles. `|selected| <= maximum` holds after every operation.
///
/// 选择顺序即插入顺序，数量永远不超过 `maximum`。
#[derive(Debug, Clone)]
pub struct SelectionState {
    ordered: Vec<AssetUri>,
    members: HashSet<AssetUri>,
    maximum: usize,
    enabled: bool,
}

impl SelectionState {
    /// `maximum` is raised to 1 if given as 0.
    pub fn new(maximum: usize) -> Self {
        Self {
            ordered: Vec::new(),
            members: HashSet::new(),
            maximum: maximum.max(1),
            enabled: true,
        }
    }

    /// Pre-populate the selection.
    ///
    /// Duplicates are skipped. Ids beyond `maximum` are dropped and listed in
    /// the report so the caller can warn about them.
    pub fn seed<I>(&mut self, ids: I) -> SeedReport
    where
        I: IntoIterator<Item = AssetUri>,
    {
        let mut report = SeedReport::default();
        for id in ids {
            if self.members.contains(&id) {
                report.duplicates += 1;
            } else if self.ordered.len() < self.maximum {
                self.members.insert(id.clone());
                self.ordered.push(id);
                report.accepted += 1;
            } else {
                report.dropped.push(id);
            }
        }
        report
    }

    pub fn toggle(&mut self, id: &AssetUri) -> ToggleOutcome {
        if !self.enabled {
            return ToggleOutcome::Disabled;
        }

        if self.members.remove(id.as_str()) {
            let index = self.ordered.iter().position(|selected| selected == id);
            if let Some(index) = index {
                self.ordered.remove(index);
            }
            return ToggleOutcome::Deselected {
                previous_order: index.map_or(0, |index| index + 1),
            };
        }

        if self.ordered.len() >= self.maximum {
            return ToggleOutcome::MaximumReached;
        }

        self.members.insert(id.clone());
        self.ordered.push(id.clone());
        ToggleOutcome::Selected {
            order: self.ordered.len(),
        }
    }

    /// 1-based selection number, or 0 when `id` is not selected.
    pub fn order(&self, id: &str) -> usize {
        if !self.members.contains(id) {
            return 0;
        }
        self.ordered
            .iter()
            .position(|selected| selected.as_str() == id)
            .map_or(0, |index| index + 1)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn selected(&self) -> &[AssetUri] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    pub fn is_full(&self) -> bool {
        self.ordered.len() >= self.maximum
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn into_selected(self) -> Vec<AssetUri> {
        self.ordered
    }
}
