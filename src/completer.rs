//! Typing-suggestion options and matching
//!
//! Models the suggestion side of an editable combo box: how candidates are
//! matched against typed text, how matches are presented, and whether
//! suggestions are active at all. The widget owns one default engine and may
//! hold a caller-supplied custom one; "current" is a selector between the
//! two, never a shared mutable instance.

use serde::{Deserialize, Serialize};

/// How candidate suggestions are matched against typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Candidate begins with the typed text
    StartsWith,
    /// Candidate contains the typed text anywhere
    Contains,
    /// Candidate ends with the typed text
    EndsWith,
}

impl FilterMode {
    /// All modes, in menu order
    pub const ALL: [FilterMode; 3] = [
        FilterMode::StartsWith,
        FilterMode::Contains,
        FilterMode::EndsWith,
    ];

    /// Stable integer value used by the snapshot codec
    pub fn as_raw(self) -> i32 {
        match self {
            FilterMode::StartsWith => 0,
            FilterMode::Contains => 1,
            FilterMode::EndsWith => 2,
        }
    }

    /// Inverse of [`as_raw`](Self::as_raw)
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(FilterMode::StartsWith),
            1 => Some(FilterMode::Contains),
            2 => Some(FilterMode::EndsWith),
            _ => None,
        }
    }
}

/// How matched suggestions are presented while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionMode {
    /// Best match completed inline in the edit field
    Inline,
    /// Matches listed in a popup below the field
    Popup,
    /// Popup listing every item regardless of the typed text
    UnfilteredPopup,
}

impl CompletionMode {
    /// All modes, in menu order
    pub const ALL: [CompletionMode; 3] = [
        CompletionMode::Inline,
        CompletionMode::Popup,
        CompletionMode::UnfilteredPopup,
    ];

    /// Stable integer value used by the snapshot codec
    pub fn as_raw(self) -> i32 {
        match self {
            CompletionMode::Inline => 0,
            CompletionMode::Popup => 1,
            CompletionMode::UnfilteredPopup => 2,
        }
    }

    /// Inverse of [`as_raw`](Self::as_raw)
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(CompletionMode::Inline),
            1 => Some(CompletionMode::Popup),
            2 => Some(CompletionMode::UnfilteredPopup),
            _ => None,
        }
    }
}

/// The option triple captured in a state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestOptions {
    pub filter: FilterMode,
    pub completion: CompletionMode,
    pub enabled: bool,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            filter: FilterMode::StartsWith,
            completion: CompletionMode::Popup,
            enabled: true,
        }
    }
}

/// One suggestion engine: matching rule plus presentation mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completer {
    pub filter: FilterMode,
    pub completion: CompletionMode,
    /// Whether matching compares case-sensitively. Off by default.
    pub case_sensitive: bool,
}

impl Default for Completer {
    fn default() -> Self {
        Self {
            filter: FilterMode::StartsWith,
            completion: CompletionMode::Popup,
            case_sensitive: false,
        }
    }
}

impl Completer {
    /// Collect the items that should be suggested for `input`.
    ///
    /// `UnfilteredPopup` ignores the typed text entirely. Empty input
    /// suggests nothing inline but lists everything in the popup modes.
    pub fn candidates<'a, I>(&self, input: &str, items: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let list_all = match self.completion {
            CompletionMode::UnfilteredPopup => true,
            CompletionMode::Popup => input.is_empty(),
            CompletionMode::Inline => false,
        };
        if list_all {
            return items.into_iter().map(str::to_owned).collect();
        }
        if input.is_empty() {
            return Vec::new();
        }
        let needle = fold_case(input, self.case_sensitive);
        items
            .into_iter()
            .filter(|item| {
                let hay = fold_case(item, self.case_sensitive);
                match self.filter {
                    FilterMode::StartsWith => hay.starts_with(&needle),
                    FilterMode::Contains => hay.contains(&needle),
                    FilterMode::EndsWith => hay.ends_with(&needle),
                }
            })
            .map(str::to_owned)
            .collect()
    }
}

/// Lowercase `text` unless matching is case-sensitive.
pub(crate) fn fold_case(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_owned()
    } else {
        text.to_lowercase()
    }
}

/// A toggle in the suggestion-options menu.
///
/// The toggles are mutually exclusive within their group: either
/// suggestions are off, or exactly one filter mode and one completion mode
/// are active. Dispatched by [`CompleterSlot::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestAction {
    /// Turn suggestions off entirely
    Disable,
    /// Switch how candidates are matched
    SetFilter(FilterMode),
    /// Switch how matches are presented
    SetCompletion(CompletionMode),
}

/// Owns the default suggestion engine plus an optional custom one.
///
/// The selector points at the default engine, the custom engine, or neither
/// (disabled). Filter and completion settings survive a disable so
/// re-enabling restores them.
#[derive(Debug, Clone, Default)]
pub struct CompleterSlot {
    default_engine: Completer,
    custom: Option<Completer>,
    use_custom: bool,
    disabled: bool,
}

impl CompleterSlot {
    /// The active engine, if suggestions are enabled.
    pub fn current(&self) -> Option<&Completer> {
        if self.disabled {
            return None;
        }
        Some(self.engine())
    }

    /// Whether any engine is active.
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    /// The remembered option triple, as captured by a state snapshot.
    pub fn options(&self) -> SuggestOptions {
        let engine = self.engine();
        SuggestOptions {
            filter: engine.filter,
            completion: engine.completion,
            enabled: !self.disabled,
        }
    }

    /// The engine the selector points at, active or not.
    fn engine(&self) -> &Completer {
        match self.custom {
            Some(ref custom) if self.use_custom => custom,
            _ => &self.default_engine,
        }
    }

    fn engine_mut(&mut self) -> &mut Completer {
        match self.custom {
            Some(ref mut custom) if self.use_custom => custom,
            _ => &mut self.default_engine,
        }
    }

    /// Install a caller-supplied engine and make it current.
    ///
    /// Passing an engine equal to the built-in default resets the selector
    /// to the default instead. Unless `adopt_options` is set, the new engine
    /// inherits the currently remembered filter and completion modes.
    pub fn set_custom(&mut self, mut completer: Completer, adopt_options: bool) {
        if completer == self.default_engine {
            self.reset();
            return;
        }
        if !adopt_options {
            let remembered = self.options();
            completer.filter = remembered.filter;
            completer.completion = remembered.completion;
        }
        self.custom = Some(completer);
        if !self.disabled || adopt_options {
            self.disabled = false;
            self.use_custom = true;
        }
    }

    /// Point the selector back at the built-in default engine.
    ///
    /// The custom engine is retained; a later enable picks it up again.
    pub fn reset(&mut self) {
        self.use_custom = false;
        self.disabled = false;
    }

    /// Turn suggestions on or off. Enabling prefers a previously installed
    /// custom engine.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.use_custom = self.custom.is_some();
            self.disabled = false;
        } else {
            self.disabled = true;
        }
    }

    /// Switch the matching rule, enabling suggestions if they were off.
    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.disabled {
            self.set_enabled(true);
        }
        self.engine_mut().filter = mode;
    }

    /// Switch the presentation mode, enabling suggestions if they were off.
    pub fn set_completion(&mut self, mode: CompletionMode) {
        if self.disabled {
            self.set_enabled(true);
        }
        self.engine_mut().completion = mode;
    }

    /// Dispatch one menu toggle.
    pub fn apply(&mut self, action: SuggestAction) {
        match action {
            SuggestAction::Disable => self.set_enabled(false),
            SuggestAction::SetFilter(mode) => self.set_filter(mode),
            SuggestAction::SetCompletion(mode) => self.set_completion(mode),
        }
    }

    /// Checked state for every menu toggle, in menu order.
    ///
    /// Exactly one filter toggle and one completion toggle are checked
    /// while enabled; only the disable toggle is checked otherwise.
    pub fn action_states(&self) -> Vec<(SuggestAction, bool)> {
        let opts = self.options();
        let mut states = vec![(SuggestAction::Disable, !opts.enabled)];
        for mode in FilterMode::ALL {
            states.push((
                SuggestAction::SetFilter(mode),
                opts.enabled && opts.filter == mode,
            ));
        }
        for mode in CompletionMode::ALL {
            states.push((
                SuggestAction::SetCompletion(mode),
                opts.enabled && opts.completion == mode,
            ));
        }
        states
    }
}
