//! Editable item list with data roles
//!
//! The headless item storage behind a combo box: ordered entries, each a
//! display text plus an optional structured value. Entries the user typed
//! and confirmed carry no value; preset entries do, and only the former
//! count as deletable history.

use serde::{Deserialize, Serialize};

use crate::completer::{fold_case, FilterMode};

/// A single list entry: display text plus the optional value behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboItem<D> {
    pub text: String,
    pub data: Option<D>,
}

impl<D> ComboItem<D> {
    /// A user-entered entry with no structured value.
    pub fn entry(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
        }
    }

    /// A preset entry carrying a structured value.
    pub fn with_data(text: impl Into<String>, data: D) -> Self {
        Self {
            text: text.into(),
            data: Some(data),
        }
    }

    /// User-entered entries are the deletable, persistable ones.
    pub fn is_user_entry(&self) -> bool {
        self.data.is_none()
    }
}

/// Where newly inserted entries are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertPolicy {
    /// Reject inserts entirely
    NoInsert,
    /// New entries go first
    #[default]
    AtTop,
    /// New entries go last
    AtBottom,
    /// Keep the whole list sorted by text
    Alphabetical,
    /// Insert at the selected row
    AfterCurrent,
    /// Insert one row above the selection
    BeforeCurrent,
}

/// Ordered item list with an optional current selection.
///
/// Duplicates are allowed and insertion order is meaningful. `D` is the
/// structured value type behind preset entries.
#[derive(Debug, Clone)]
pub struct ComboList<D> {
    items: Vec<ComboItem<D>>,
    current: Option<usize>,
}

impl<D> Default for ComboList<D> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
        }
    }
}

impl<D> ComboList<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ComboItem<D>] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ComboItem<D>> {
        self.items.get(index)
    }

    /// Append a user-entered entry.
    pub fn push_entry(&mut self, text: impl Into<String>) {
        self.items.push(ComboItem::entry(text));
    }

    /// Append a preset entry with its value.
    pub fn push_with_data(&mut self, text: impl Into<String>, data: D) {
        self.items.push(ComboItem::with_data(text, data));
    }

    /// Drop every entry and the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.current = None;
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_item(&self) -> Option<&ComboItem<D>> {
        self.current.and_then(|index| self.items.get(index))
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current_item().map(|item| item.text.as_str())
    }

    /// The value behind the current selection, if it carries one.
    pub fn current_data(&self) -> Option<&D> {
        self.current_item().and_then(|item| item.data.as_ref())
    }

    /// Move the selection. Out-of-range indexes clear it.
    ///
    /// Returns true when the selection actually moved, the cue for a
    /// data-changed notification; the new value is [`current_data`](Self::current_data).
    pub fn set_current_index(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.items.len());
        if index == self.current {
            return false;
        }
        self.current = index;
        true
    }

    /// Texts of the user-entered, non-empty entries, in list order.
    pub fn edited_items(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_user_entry() && !item.text.is_empty())
            .map(|item| item.text.clone())
            .collect()
    }

    /// First entry whose text matches under the given rule.
    pub fn find_text(&self, text: &str, mode: FilterMode, case_sensitive: bool) -> Option<usize> {
        let needle = fold_case(text, case_sensitive);
        self.items.iter().position(|item| {
            let hay = fold_case(&item.text, case_sensitive);
            match mode {
                FilterMode::StartsWith => hay.starts_with(&needle),
                FilterMode::Contains => hay.contains(&needle),
                FilterMode::EndsWith => hay.ends_with(&needle),
            }
        })
    }

    /// Remove the entry at `index` if it is a user-entered one.
    ///
    /// Preset entries are not deletable. Removing the selected entry clears
    /// the selection; removing one above it shifts the selection up.
    pub fn remove_deletable(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) if item.is_user_entry() => {}
            _ => return false,
        }
        self.items.remove(index);
        self.current = match self.current {
            Some(cur) if cur == index => None,
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        true
    }

    /// Insert confirmed or restored entries according to `policy`.
    ///
    /// The batch is sorted before positional insertion; `Alphabetical`
    /// re-sorts the entire list by text. The selection keeps tracking the
    /// item it was on.
    pub fn insert_edited(&mut self, entries: Vec<String>, policy: InsertPolicy) {
        if entries.is_empty() {
            return;
        }
        let at = match policy {
            InsertPolicy::NoInsert => return,
            InsertPolicy::Alphabetical => {
                self.items.extend(entries.into_iter().map(ComboItem::entry));
                self.sort_by_text();
                return;
            }
            InsertPolicy::AtTop => 0,
            InsertPolicy::AtBottom => self.items.len(),
            InsertPolicy::AfterCurrent => self.current.unwrap_or(0),
            InsertPolicy::BeforeCurrent => {
                self.current.map(|cur| cur.saturating_sub(1)).unwrap_or(0)
            }
        };
        let mut batch = entries;
        batch.sort();
        let count = batch.len();
        self.items
            .splice(at..at, batch.into_iter().map(ComboItem::entry));
        if let Some(cur) = self.current {
            if at <= cur {
                self.current = Some(cur + count);
            }
        }
    }

    fn sort_by_text(&mut self) {
        let mut indexed: Vec<(usize, ComboItem<D>)> = self.items.drain(..).enumerate().collect();
        indexed.sort_by(|(_, a), (_, b)| a.text.cmp(&b.text));
        if let Some(cur) = self.current {
            self.current = indexed.iter().position(|(old, _)| *old == cur);
        }
        self.items = indexed.into_iter().map(|(_, item)| item).collect();
    }
}

impl<D: PartialEq> ComboList<D> {
    /// First entry carrying exactly this value.
    pub fn find_data(&self, data: &D) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.data.as_ref() == Some(data))
    }

    /// Select the entry carrying this value, clearing the selection when no
    /// entry matches. Returns true when the selection moved.
    pub fn set_current_data(&mut self, data: &D) -> bool {
        let found = self.find_data(data);
        self.set_current_index(found)
    }
}

impl ComboList<i32> {
    /// Populate a selection list from a named range: each label is paired
    /// with a sequential value starting at `start`.
    pub fn from_labels<I, S>(labels: I, start: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new();
        for (offset, label) in labels.into_iter().enumerate() {
            list.push_with_data(label, start + offset as i32);
        }
        list
    }
}
