//! Replay a patch's instruction sets against a prior snapshot.
//!
//! Separating the pure computation ([`crate::builder::build_patch`]) from
//! patch application means the instruction sets can be checked without any
//! render host present: deleting at `deletions`, inserting posterior content
//! at `insertions`, and refreshing each reload target must reconstruct the
//! posterior exactly.

use thiserror::Error;

use crate::patch::Patch;
use crate::snapshot::{ListSnapshot, Position};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatchApplyError {
    #[error("delete instruction {0} is out of bounds")]
    DeleteOutOfBounds(Position),
    #[error("insert instruction {0} is out of bounds")]
    InsertOutOfBounds(Position),
    #[error("reload instruction {0} has no surviving target")]
    ReloadOutOfBounds(Position),
}

// ── Application ───────────────────────────────────────────────────────────

/// Apply `patch` to `prior`, taking inserted and reloaded content from
/// `posterior`. Returns the reconstructed snapshot.
///
/// Deletions are replayed in descending order so earlier removals do not
/// shift later pre-edit indices; insertions ascend in post-edit order.
pub fn apply_patch(
    prior: &ListSnapshot,
    patch: &Patch,
    posterior: &ListSnapshot,
) -> Result<ListSnapshot, PatchApplyError> {
    let mut working = prior.clone();

    for &pos in patch.deletions.iter().rev() {
        working
            .remove(pos)
            .ok_or(PatchApplyError::DeleteOutOfBounds(pos))?;
    }

    for &pos in &patch.insertions {
        let value = posterior
            .get(pos)
            .ok_or(PatchApplyError::InsertOutOfBounds(pos))?;
        if !working.insert(pos, value.to_string()) {
            return Err(PatchApplyError::InsertOutOfBounds(pos));
        }
    }

    for &pre in &patch.reloads {
        let target = patch
            .posterior_position(pre)
            .ok_or(PatchApplyError::ReloadOutOfBounds(pre))?;
        let value = posterior
            .get(target)
            .ok_or(PatchApplyError::ReloadOutOfBounds(pre))?;
        working
            .set(target, value.to_string())
            .ok_or(PatchApplyError::ReloadOutOfBounds(pre))?;
    }

    Ok(working)
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_patch, UpdatePolicy};
    use crate::edit::Edit;

    fn prior_a_to_h() -> ListSnapshot {
        ListSnapshot::single_section(["a", "b", "c", "d", "e", "f", "g", "h"])
    }

    fn demo_edits() -> Vec<Edit> {
        vec![
            Edit::assign(0, 0, "a*"),
            Edit::assign(0, 1, "b*"),
            Edit::assign(0, 4, "e*"),
            Edit::assign(0, 5, "f*"),
            Edit::assign(0, 6, "g*"),
            Edit::remove(0, 3),
            Edit::remove(0, 2),
        ]
    }

    #[test]
    fn round_trip_reconstructs_posterior_under_both_policies() {
        let intent: Vec<Position> = [0, 1, 4, 5, 6].map(|i| Position::new(0, i)).to_vec();
        for policy in [UpdatePolicy::ReloadInPlace, UpdatePolicy::DeleteAndReinsert] {
            let (patch, posterior) =
                build_patch(&prior_a_to_h(), &demo_edits(), &intent, policy).unwrap();
            let rebuilt = apply_patch(&prior_a_to_h(), &patch, &posterior).unwrap();
            assert_eq!(rebuilt, posterior, "policy {policy:?}");
        }
    }

    #[test]
    fn round_trip_with_multiple_sections() {
        let prior = ListSnapshot::from_sections(vec![
            vec!["a".into(), "b".into()],
            vec!["c".into(), "d".into(), "e".into()],
        ]);
        let edits = vec![
            Edit::assign(1, 2, "e*"),
            Edit::remove(1, 0),
            Edit::remove(0, 0),
        ];
        let intent = [Position::new(1, 2)];
        for policy in [UpdatePolicy::ReloadInPlace, UpdatePolicy::DeleteAndReinsert] {
            let (patch, posterior) = build_patch(&prior, &edits, &intent, policy).unwrap();
            assert_eq!(apply_patch(&prior, &patch, &posterior).unwrap(), posterior);
        }
    }

    #[test]
    fn delete_out_of_bounds_is_reported() {
        let prior = ListSnapshot::single_section(["a"]);
        let patch = Patch {
            deletions: [Position::new(0, 4)].into_iter().collect(),
            ..Patch::default()
        };
        assert_eq!(
            apply_patch(&prior, &patch, &prior),
            Err(PatchApplyError::DeleteOutOfBounds(Position::new(0, 4)))
        );
    }

    #[test]
    fn insert_without_posterior_content_is_reported() {
        let prior = ListSnapshot::single_section(["a"]);
        let posterior = ListSnapshot::single_section(["a"]);
        let patch = Patch {
            insertions: [Position::new(0, 1)].into_iter().collect(),
            ..Patch::default()
        };
        assert_eq!(
            apply_patch(&prior, &patch, &posterior),
            Err(PatchApplyError::InsertOutOfBounds(Position::new(0, 1)))
        );
    }
}
