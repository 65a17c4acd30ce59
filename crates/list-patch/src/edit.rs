//! Edits applied to a snapshot during a batch update.

use crate::snapshot::Position;

/// One mutation of a working snapshot.
///
/// Edits are applied sequentially against a mutating working copy, so every
/// position refers to the list as it stands when the edit is reached, not to
/// the original prior snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace the value at `pos` in place. Length and positions unchanged.
    Assign { pos: Position, value: String },
    /// Remove the item at `pos`; later items in the section shift left.
    Remove { pos: Position },
}

impl Edit {
    pub fn assign(section: usize, item: usize, value: impl Into<String>) -> Self {
        Edit::Assign {
            pos: Position::new(section, item),
            value: value.into(),
        }
    }

    pub fn remove(section: usize, item: usize) -> Self {
        Edit::Remove {
            pos: Position::new(section, item),
        }
    }

    /// Wire name of the edit, as used by the JSON codec.
    pub fn op_name(&self) -> &'static str {
        match self {
            Edit::Assign { .. } => "assign",
            Edit::Remove { .. } => "remove",
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            Edit::Assign { pos, .. } => *pos,
            Edit::Remove { pos } => *pos,
        }
    }
}
