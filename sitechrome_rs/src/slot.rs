//! Slot specs and lifecycle.

use std::fmt;

/// Where a slot's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentSource {
    /// Fetch from a relative URL.
    Url(String),
    /// Use the compiled-in fragment for this slot.
    Inline,
}

/// A named placeholder and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSpec {
    /// Id of the placeholder element
    pub name: String,
    /// Content source
    pub source: FragmentSource,
}

impl SlotSpec {
    /// Slot filled from `url`.
    pub fn url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FragmentSource::Url(url.into()),
        }
    }

    /// Slot filled from the catalog's inline fragment.
    pub fn inline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: FragmentSource::Inline,
        }
    }
}

/// Lifecycle of one slot during a page view.
///
/// `Empty → Loading → Filled | FallbackFilled`. `Missing` is terminal for
/// slots whose placeholder does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Not yet attempted
    Empty,
    /// Fetch in flight
    Loading,
    /// Real content injected
    Filled,
    /// Fallback content injected after a failure
    FallbackFilled,
    /// No placeholder element on this page
    Missing,
}

impl SlotState {
    /// Whether the slot will not change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SlotState::Filled | SlotState::FallbackFilled | SlotState::Missing
        )
    }

    /// Lowercase label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SlotState::Empty => "empty",
            SlotState::Loading => "loading",
            SlotState::Filled => "filled",
            SlotState::FallbackFilled => "fallback-filled",
            SlotState::Missing => "missing",
        }
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
