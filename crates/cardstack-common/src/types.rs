use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of one stacked element on the visual surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// The two ways the top item can leave the stack. Both advance the index the
/// same way; they differ only in exit tag and pre-animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackAction {
    Accept,
    Reject,
}

impl StackAction {
    pub fn tag(self) -> StackTag {
        match self {
            StackAction::Accept => StackTag::Accept,
            StackAction::Reject => StackTag::Reject,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StackAction::Accept => "accept",
            StackAction::Reject => "reject",
        }
    }
}

impl fmt::Display for StackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers the controller puts on items. The surface maps them to whatever
/// styling it uses (class names, flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackTag {
    Current,
    Accept,
    Reject,
}

impl StackTag {
    /// Class-style name, e.g. `stack__item--current`.
    pub fn class_name(self) -> &'static str {
        match self {
            StackTag::Current => "stack__item--current",
            StackTag::Accept => "stack__item--accept",
            StackTag::Reject => "stack__item--reject",
        }
    }
}
