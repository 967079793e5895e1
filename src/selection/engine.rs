//! Selection state machine

use super::types::{Modifiers, SelectionAction};
use crate::types::PhotoId;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::trace;

/// Selected ids, the range anchor and the select-mode flag for one view
///
/// Invariant: `select_mode()` is false whenever the selection is empty.
#[derive(Debug, Clone)]
pub struct SelectionEngine<Id = PhotoId> {
    selected: HashSet<Id>,
    anchor: Option<Id>,
    select_mode: bool,
}

impl<Id> Default for SelectionEngine<Id> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
            anchor: None,
            select_mode: false,
        }
    }
}

impl<Id: Eq + Hash + Clone> SelectionEngine<Id> {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one activation of `id` against the visible ordering
    pub fn toggle(&mut self, id: Id, modifiers: Modifiers, visible: &[Id]) -> SelectionAction {
        let action = match (&self.anchor, modifiers) {
            (Some(anchor), Modifiers { range: true, .. }) => {
                let from = visible.iter().position(|v| v == anchor);
                let to = visible.iter().position(|v| *v == id);
                match (from, to) {
                    (Some(from), Some(to)) => {
                        let (start, end) = (from.min(to), from.max(to));
                        let range = &visible[start..=end];
                        self.selected.extend(range.iter().cloned());
                        SelectionAction::RangeAdded { len: range.len() }
                    }
                    _ => SelectionAction::AnchorMoved,
                }
            }
            (_, Modifiers { multi: true, .. }) => {
                if self.selected.remove(&id) {
                    SelectionAction::Toggled(false)
                } else {
                    self.selected.insert(id.clone());
                    SelectionAction::Toggled(true)
                }
            }
            _ => {
                self.selected.clear();
                self.selected.insert(id.clone());
                SelectionAction::Replaced
            }
        };

        if action != SelectionAction::AnchorMoved {
            self.select_mode = !self.selected.is_empty();
        }
        self.anchor = Some(id);
        trace!(?action, selected = self.selected.len(), "Selection updated");
        action
    }

    /// Empty the selection and leave select mode
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
        self.select_mode = false;
    }

    /// Select exactly the visible photos
    pub fn select_all(&mut self, visible: &[Id]) {
        self.selected = visible.iter().cloned().collect();
        self.anchor = None;
        self.select_mode = !self.selected.is_empty();
    }

    /// Drop selected ids that are no longer visible
    ///
    /// Returns how many ids were removed.
    pub fn retain_visible(&mut self, visible: &[Id]) -> usize {
        let present: HashSet<&Id> = visible.iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| present.contains(id));
        if self.anchor.as_ref().is_some_and(|a| !present.contains(a)) {
            self.anchor = None;
        }
        if self.selected.is_empty() {
            self.select_mode = false;
        }
        before - self.selected.len()
    }

    /// Whether `id` is selected
    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    /// The selected ids, unordered
    pub fn selected_ids(&self) -> &HashSet<Id> {
        &self.selected
    }

    /// The selected ids in visible order
    pub fn selected_in_order(&self, visible: &[Id]) -> Vec<Id> {
        visible
            .iter()
            .filter(|id| self.selected.contains(*id))
            .cloned()
            .collect()
    }

    /// Whether the view is in bulk-action presentation
    pub fn select_mode(&self) -> bool {
        self.select_mode
    }

    /// Most recently activated id
    pub fn anchor(&self) -> Option<&Id> {
        self.anchor.as_ref()
    }

    /// Number of selected ids
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
