//! Patch construction from an edit log.
//!
//! [`build_patch`] turns a prior snapshot, an ordered edit log, and a set of
//! reload-intent positions into a validated [`Patch`] plus the posterior
//! snapshot. It is a pure function: no state survives between calls, and
//! identical inputs produce identical output.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::edit::Edit;
use crate::patch::Patch;
use crate::snapshot::{ListSnapshot, Position};

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatchBuildError {
    /// An edit referenced a position outside the working snapshot at the
    /// time it was applied. Programmer error; never recovered.
    #[error("edit `{op}` targets out-of-bounds position {pos}")]
    InvalidEdit { op: &'static str, pos: Position },
    /// A reload-intent position does not exist in the prior snapshot.
    #[error("reload intent targets out-of-bounds position {0}")]
    InvalidReload(Position),
    /// The computed patch named a position in both deletions and reloads.
    /// Indicates a bug in policy handling; unreachable for a correct build.
    #[error("position {0} appears in both deletions and reloads")]
    ConflictingPatch(Position),
}

// ── Policy ────────────────────────────────────────────────────────────────

/// How changed-but-kept positions are represented in the patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Emit only deletions plus in-place reloads. Minimal instruction set,
    /// smoothest animation. Known hazard: some hosts fail to refresh a
    /// reloaded position that sits beyond a deleted run until an unrelated
    /// full re-render occurs.
    #[default]
    ReloadInPlace,
    /// Represent each changed position that also shifts as a delete+insert
    /// pair, reloading only positions that change value without moving.
    /// Non-minimal and a coarser animation, but hosts with the reload
    /// defect above still refresh every changed cell.
    DeleteAndReinsert,
}

// ── Builder ───────────────────────────────────────────────────────────────

/// Build the patch and posterior snapshot for one batch update.
///
/// `edits` apply in order against a mutating working copy, so each edit's
/// position refers to the list as already reshaped by earlier edits.
/// `reload_intent` names positions in the original prior snapshot whose
/// displayed value the caller wants refreshed; intents that were removed by
/// the edit log are dropped rather than emitted alongside a deletion.
pub fn build_patch(
    prior: &ListSnapshot,
    edits: &[Edit],
    reload_intent: &[Position],
    policy: UpdatePolicy,
) -> Result<(Patch, ListSnapshot), PatchBuildError> {
    let mut working = prior.clone();

    // alive[s][w] = prior item index of the item currently at working
    // position (s, w). Lets a removal in working space be recorded in the
    // prior (pre-edit) index space the host expects.
    let mut alive: Vec<Vec<usize>> = (0..prior.section_count())
        .map(|s| (0..prior.section_len(s).unwrap_or(0)).collect())
        .collect();

    let mut deletions: BTreeSet<Position> = BTreeSet::new();
    for edit in edits {
        match edit {
            Edit::Assign { pos, value } => {
                if working.set(*pos, value.clone()).is_none() {
                    return Err(PatchBuildError::InvalidEdit {
                        op: edit.op_name(),
                        pos: *pos,
                    });
                }
            }
            Edit::Remove { pos } => {
                if working.remove(*pos).is_none() {
                    return Err(PatchBuildError::InvalidEdit {
                        op: edit.op_name(),
                        pos: *pos,
                    });
                }
                let prior_item = alive[pos.section].remove(pos.item);
                deletions.insert(Position::new(pos.section, prior_item));
            }
        }
    }

    let mut reloads: BTreeSet<Position> = BTreeSet::new();
    for &pos in reload_intent {
        if !prior.contains(pos) {
            return Err(PatchBuildError::InvalidReload(pos));
        }
        if !deletions.contains(&pos) {
            reloads.insert(pos);
        }
    }

    let mut insertions: BTreeSet<Position> = BTreeSet::new();
    if policy == UpdatePolicy::DeleteAndReinsert {
        // A surviving reload target that shifts position becomes a
        // delete (pre-edit) + insert (post-edit) pair instead of a reload.
        // Untouched survivors still shift for free on the host side.
        let moved: Vec<(Position, Position)> = reloads
            .iter()
            .filter_map(|&pos| {
                let shift = deletions
                    .iter()
                    .filter(|d| d.section == pos.section && d.item < pos.item)
                    .count();
                (shift > 0).then(|| (pos, Position::new(pos.section, pos.item - shift)))
            })
            .collect();
        for (pre, post) in moved {
            reloads.remove(&pre);
            deletions.insert(pre);
            insertions.insert(post);
        }
    }

    if let Some(&pos) = deletions.intersection(&reloads).next() {
        return Err(PatchBuildError::ConflictingPatch(pos));
    }

    let patch = Patch {
        deletions,
        insertions,
        reloads,
    };
    Ok((patch, working))
}

// ── Tests ─────────────────────────────────────────────────────────────────
