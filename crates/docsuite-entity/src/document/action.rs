//! Bulk and single-record document actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Flag actions applicable to one or many documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    /// Set the archived flag.
    Archive,
    /// Clear the archived flag.
    Unarchive,
    /// Set the approved flag.
    Approve,
    /// Clear the approved flag.
    Unapprove,
    /// Set the highlighted flag.
    Highlight,
    /// Clear the highlighted flag.
    Unhighlight,
}

impl DocumentAction {
    /// The flag column this action touches.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Archive | Self::Unarchive => "archived",
            Self::Approve | Self::Unapprove => "approved",
            Self::Highlight | Self::Unhighlight => "highlighted",
        }
    }

    /// The value this action writes.
    pub fn value(&self) -> bool {
        matches!(self, Self::Archive | Self::Approve | Self::Highlight)
    }
}

/// Direction for moving a document within its category ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderDirection {
    /// Swap with the previous sibling (lower sort order).
    Up,
    /// Swap with the next sibling (higher sort order).
    Down,
}

impl fmt::Display for DocumentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Archive => "archive",
            Self::Unarchive => "unarchive",
            Self::Approve => "approve",
            Self::Unapprove => "unapprove",
            Self::Highlight => "highlight",
            Self::Unhighlight => "unhighlight",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_map_to_flag_columns() {
        assert_eq!(DocumentAction::Archive.column(), "archived");
        assert!(DocumentAction::Archive.value());
        assert_eq!(DocumentAction::Unapprove.column(), "approved");
        assert!(!DocumentAction::Unapprove.value());
    }
}
