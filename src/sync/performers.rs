//! Performer assignment diffing.
//!
//! When the assignment editor is committed, only the delta between the
//! previous and the selected performer sets goes over the wire: adds and
//! removes are issued as concurrent calls, and an unchanged selection makes
//! no calls at all.

use std::collections::HashSet;

/// Minimal add/remove sets between two performer selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformerDiff {
    pub to_add: Vec<String>,
    pub to_remove: Vec<String>,
}

impl PerformerDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Set difference over opaque ids, preserving each input's order so the
/// resulting calls are deterministic.
pub fn diff(previous: &[String], selected: &[String]) -> PerformerDiff {
    let previous_set: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let selected_set: HashSet<&str> = selected.iter().map(String::as_str).collect();
    PerformerDiff {
        to_add: selected
            .iter()
            .filter(|id| !previous_set.contains(id.as_str()))
            .cloned()
            .collect(),
        to_remove: previous
            .iter()
            .filter(|id| !selected_set.contains(id.as_str()))
            .cloned()
            .collect(),
    }
}
