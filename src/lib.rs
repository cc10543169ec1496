//! histbox - headless editable combo box state
//!
//! This crate provides the model layer for an editable combo box with
//! deletable history items: the item list with its data values, the
//! typing-suggestion options, and the binary snapshot codec that persists
//! user-entered entries between sessions. A toolkit layer renders the
//! widget and forwards input; every decision lives here.

pub mod combo;
pub mod completer;
pub mod list;
pub mod state;

// Re-export commonly used types
pub use combo::HistoryCombo;
pub use completer::{
    Completer, CompleterSlot, CompletionMode, FilterMode, SuggestAction, SuggestOptions,
};
pub use list::{ComboItem, ComboList, InsertPolicy};
pub use state::{SavedState, StateError};
