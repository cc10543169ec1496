//! Editable history combo
//!
//! Couples the item list with the suggestion slot and the snapshot codec:
//! the headless form of an editable combo box whose typed entries are kept
//! for future selection, deletable from the popup, and persisted between
//! sessions.

use crate::completer::{CompleterSlot, SuggestAction};
use crate::list::{ComboList, InsertPolicy};
use crate::state::{SavedState, StateError};

/// Headless editable combo box with deletable history items.
#[derive(Debug, Clone)]
pub struct HistoryCombo<D> {
    pub list: ComboList<D>,
    pub completer: CompleterSlot,
    insert_policy: InsertPolicy,
}

impl<D> Default for HistoryCombo<D> {
    fn default() -> Self {
        Self {
            list: ComboList::new(),
            completer: CompleterSlot::default(),
            insert_policy: InsertPolicy::default(),
        }
    }
}

impl<D> HistoryCombo<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_policy(&self) -> InsertPolicy {
        self.insert_policy
    }

    pub fn set_insert_policy(&mut self, policy: InsertPolicy) {
        self.insert_policy = policy;
    }

    /// Record a confirmed line of input as a history entry, honoring the
    /// insert policy.
    pub fn confirm_entry(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.list.insert_edited(vec![text.to_owned()], self.insert_policy);
    }

    /// Mirror of the edit-text-changed hook: clearing the text deselects.
    /// Returns true when the selection moved.
    pub fn on_edit_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            self.list.set_current_index(None)
        } else {
            false
        }
    }

    /// Suggestion candidates for the in-progress text, from the active
    /// engine over every item text.
    pub fn suggestions(&self, input: &str) -> Vec<String> {
        match self.completer.current() {
            Some(engine) => {
                engine.candidates(input, self.list.items().iter().map(|i| i.text.as_str()))
            }
            None => Vec::new(),
        }
    }

    /// Dispatch one suggestion-options menu toggle.
    pub fn apply(&mut self, action: SuggestAction) {
        self.completer.apply(action);
    }

    /// Snapshot the user-entered items and current suggestion options.
    pub fn save_state(&self) -> Vec<u8> {
        let state = SavedState {
            items: self.list.edited_items(),
            options: self.completer.options(),
        };
        state.encode()
    }

    /// Restore a snapshot produced by [`save_state`](Self::save_state).
    ///
    /// `Ok(false)` means the buffer was empty and nothing was touched.
    /// Restored items are inserted via the configured insert policy, and
    /// each option is applied only when it differs from the live value. A
    /// structural decode failure leaves all state untouched.
    pub fn restore_state(&mut self, bytes: &[u8]) -> Result<bool, StateError> {
        let live = self.completer.options();
        let state = match SavedState::decode(bytes, live) {
            Ok(Some(state)) => state,
            Ok(None) => return Ok(false),
            Err(err) => {
                tracing::warn!("Discarding unreadable combo state snapshot: {}", err);
                return Err(err);
            }
        };

        if !state.items.is_empty() {
            tracing::debug!("Restoring {} saved history items", state.items.len());
            self.list.insert_edited(state.items, self.insert_policy);
        }

        if state.options.filter != live.filter {
            self.completer.set_filter(state.options.filter);
        }
        if state.options.completion != live.completion {
            self.completer.set_completion(state.options.completion);
        }
        // Only the disable direction is explicit; restoring a differing
        // filter or completion mode already re-enables.
        if state.options.enabled != live.enabled && !state.options.enabled {
            self.completer.set_enabled(false);
        }

        Ok(true)
    }
}
