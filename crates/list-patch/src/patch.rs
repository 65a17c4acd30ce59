//! Patch instruction sets and their invariants.
//!
//! A [`Patch`] describes how a render host animates from one snapshot to the
//! next: positions to delete (pre-edit index space), positions to insert
//! (post-edit index space), and positions to reload in place (pre-edit index
//! space, restricted to items that survive the deletions).

use std::collections::BTreeSet;

use thiserror::Error;

use crate::snapshot::{ListSnapshot, Position};

// ── Error ─────────────────────────────────────────────────────────────────

/// A patch that violates the instruction-set invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatchInvariantError {
    #[error("position {0} appears in both deletions and reloads")]
    DeleteReloadOverlap(Position),
    #[error("deletion {0} does not exist in the prior snapshot")]
    DeletionOutsidePrior(Position),
    #[error("insertion {0} does not exist in the posterior snapshot")]
    InsertionOutsidePosterior(Position),
    #[error("reload {0} does not exist in the prior snapshot")]
    ReloadOutsidePrior(Position),
}

// ── Patch ─────────────────────────────────────────────────────────────────

/// Instruction sets for one prior-to-posterior transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    /// Positions removed, in the pre-edit index space.
    pub deletions: BTreeSet<Position>,
    /// Positions inserted, in the post-edit index space.
    pub insertions: BTreeSet<Position>,
    /// Surviving positions to refresh, in the pre-edit index space.
    pub reloads: BTreeSet<Position>,
}

impl Patch {
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty() && self.insertions.is_empty() && self.reloads.is_empty()
    }

    /// Check the instruction-set invariants against both snapshots.
    ///
    /// A position may not be both deleted and reloaded, every deletion and
    /// reload must exist in the prior, and every insertion must exist in the
    /// posterior.
    pub fn validate(
        &self,
        prior: &ListSnapshot,
        posterior: &ListSnapshot,
    ) -> Result<(), PatchInvariantError> {
        if let Some(&pos) = self.deletions.intersection(&self.reloads).next() {
            return Err(PatchInvariantError::DeleteReloadOverlap(pos));
        }
        for &pos in &self.deletions {
            if !prior.contains(pos) {
                return Err(PatchInvariantError::DeletionOutsidePrior(pos));
            }
        }
        for &pos in &self.insertions {
            if !posterior.contains(pos) {
                return Err(PatchInvariantError::InsertionOutsidePosterior(pos));
            }
        }
        for &pos in &self.reloads {
            if !prior.contains(pos) {
                return Err(PatchInvariantError::ReloadOutsidePrior(pos));
            }
        }
        Ok(())
    }

    /// Map a surviving pre-edit position to its post-edit position.
    ///
    /// Returns `None` when the position is named in `deletions`. Otherwise
    /// the item index shifts left past every earlier deletion in the same
    /// section, then right past every insertion at or before the shifted
    /// index.
    pub fn posterior_position(&self, pos: Position) -> Option<Position> {
        if self.deletions.contains(&pos) {
            return None;
        }
        let removed_before = self
            .deletions
            .iter()
            .filter(|d| d.section == pos.section && d.item < pos.item)
            .count();
        let mut item = pos.item - removed_before;
        for ins in &self.insertions {
            if ins.section == pos.section && ins.item <= item {
                item += 1;
            }
        }
        Some(Position::new(pos.section, item))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(pairs: &[(usize, usize)]) -> BTreeSet<Position> {
        pairs.iter().map(|&(s, i)| Position::new(s, i)).collect()
    }

    #[test]
    fn validate_accepts_consistent_patch() {
        let prior = ListSnapshot::single_section(["a", "b", "c"]);
        let posterior = ListSnapshot::single_section(["a", "c"]);
        let patch = Patch {
            deletions: positions(&[(0, 1)]),
            insertions: BTreeSet::new(),
            reloads: positions(&[(0, 0)]),
        };
        assert_eq!(patch.validate(&prior, &posterior), Ok(()));
    }

    #[test]
    fn validate_rejects_delete_reload_overlap() {
        let prior = ListSnapshot::single_section(["a", "b"]);
        let posterior = ListSnapshot::single_section(["a"]);
        let patch = Patch {
            deletions: positions(&[(0, 1)]),
            insertions: BTreeSet::new(),
            reloads: positions(&[(0, 1)]),
        };
        assert_eq!(
            patch.validate(&prior, &posterior),
            Err(PatchInvariantError::DeleteReloadOverlap(Position::new(0, 1)))
        );
    }

    #[test]
    fn validate_rejects_insertion_outside_posterior() {
        let prior = ListSnapshot::single_section(["a"]);
        let posterior = ListSnapshot::single_section(["a"]);
        let patch = Patch {
            insertions: positions(&[(0, 5)]),
            ..Patch::default()
        };
        assert_eq!(
            patch.validate(&prior, &posterior),
            Err(PatchInvariantError::InsertionOutsidePosterior(
                Position::new(0, 5)
            ))
        );
    }

    #[test]
    fn posterior_position_shifts_past_deletions() {
        let patch = Patch {
            deletions: positions(&[(0, 2), (0, 3)]),
            ..Patch::default()
        };
        assert_eq!(
            patch.posterior_position(Position::new(0, 4)),
            Some(Position::new(0, 2))
        );
        assert_eq!(
            patch.posterior_position(Position::new(0, 1)),
            Some(Position::new(0, 1))
        );
        assert_eq!(patch.posterior_position(Position::new(0, 3)), None);
    }

    #[test]
    fn posterior_position_bumps_past_insertions() {
        // delete-and-reinsert shape: items 4..=6 re-enter at 2..=4, so the
        // surviving tail item 7 lands at 5.
        let patch = Patch {
            deletions: positions(&[(0, 2), (0, 3), (0, 4), (0, 5), (0, 6)]),
            insertions: positions(&[(0, 2), (0, 3), (0, 4)]),
            ..Patch::default()
        };
        assert_eq!(
            patch.posterior_position(Position::new(0, 7)),
            Some(Position::new(0, 5))
        );
    }

    #[test]
    fn posterior_position_ignores_other_sections() {
        let patch = Patch {
            deletions: positions(&[(0, 0)]),
            ..Patch::default()
        };
        assert_eq!(
            patch.posterior_position(Position::new(1, 3)),
            Some(Position::new(1, 3))
        );
    }
}
