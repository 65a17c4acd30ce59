//! Render host boundary and baseline ownership.
//!
//! The host is the external layer that animates a visual list. This module
//! only defines the seam: a [`RenderHost`] receives validated instruction
//! sets together with the posterior snapshot, so it can never observe
//! pre-finalize content, and a [`ListController`] owns the baseline snapshot
//! and drives batches through the builder.

use crate::builder::{build_patch, PatchBuildError, UpdatePolicy};
use crate::edit::Edit;
use crate::patch::Patch;
use crate::snapshot::{ListSnapshot, Position};

// ── RenderHost ────────────────────────────────────────────────────────────

/// A consumer of patch instruction sets.
///
/// `content` is always the posterior snapshot. The host must query content
/// only for positions not named in `patch.deletions`; a pre-edit reload
/// index refers to content at its mapped post-edit position
/// ([`Patch::posterior_position`]).
pub trait RenderHost {
    /// Discard all visual state and re-render `content` wholesale.
    fn reload_data(&mut self, content: &ListSnapshot);

    /// Animate one batch update between the previous content and `content`.
    fn perform_batch_update(&mut self, patch: &Patch, content: &ListSnapshot);
}

// ── ListController ────────────────────────────────────────────────────────

/// Owns the baseline snapshot and feeds updates to a render host.
///
/// One update must be accepted (the controller advances its baseline) before
/// the next is built; `perform_update` does both in one synchronous step, so
/// overlapping patches against the same prior cannot occur.
#[derive(Debug)]
pub struct ListController<H: RenderHost> {
    host: H,
    data: ListSnapshot,
}

impl<H: RenderHost> ListController<H> {
    /// A controller with an empty baseline. The host is not notified until
    /// data arrives.
    pub fn new(host: H) -> Self {
        Self {
            host,
            data: ListSnapshot::new(),
        }
    }

    /// Current baseline snapshot.
    pub fn data(&self) -> &ListSnapshot {
        &self.data
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Replace the baseline wholesale and fully re-render. Any in-flight
    /// update intent is abandoned; no patch is computed.
    pub fn apply_initial_data(&mut self, snapshot: ListSnapshot) {
        self.data = snapshot;
        self.host.reload_data(&self.data);
    }

    /// Build a patch for one batch of edits, commit the posterior as the new
    /// baseline, then hand the patch to the host. Returns the patch that was
    /// issued. On error the baseline is left untouched and the host sees
    /// nothing.
    pub fn perform_update(
        &mut self,
        edits: &[Edit],
        reload_intent: &[Position],
        policy: UpdatePolicy,
    ) -> Result<Patch, PatchBuildError> {
        let (patch, posterior) = build_patch(&self.data, edits, reload_intent, policy)?;
        self.data = posterior;
        self.host.perform_batch_update(&patch, &self.data);
        Ok(patch)
    }

    /// Fully re-render the current baseline (pull-to-refresh path).
    pub fn reload_all(&mut self) {
        self.host.reload_data(&self.data);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CallLog {
        reload_data_calls: usize,
        batches: Vec<(Patch, ListSnapshot)>,
    }

    impl RenderHost for CallLog {
        fn reload_data(&mut self, _content: &ListSnapshot) {
            self.reload_data_calls += 1;
        }

        fn perform_batch_update(&mut self, patch: &Patch, content: &ListSnapshot) {
            self.batches.push((patch.clone(), content.clone()));
        }
    }

    #[test]
    fn initial_data_triggers_full_reload() {
        let mut ctrl = ListController::new(CallLog::default());
        ctrl.apply_initial_data(ListSnapshot::single_section(["a", "b"]));
        assert_eq!(ctrl.host().reload_data_calls, 1);
        assert!(ctrl.host().batches.is_empty());
        assert_eq!(ctrl.data().section_len(0), Some(2));
    }

    #[test]
    fn update_commits_baseline_before_notifying_host() {
        let mut ctrl = ListController::new(CallLog::default());
        ctrl.apply_initial_data(ListSnapshot::single_section(["a", "b", "c"]));
        let patch = ctrl
            .perform_update(
                &[Edit::assign(0, 0, "a*"), Edit::remove(0, 2)],
                &[Position::new(0, 0)],
                UpdatePolicy::ReloadInPlace,
            )
            .unwrap();
        let expected = ListSnapshot::single_section(["a*", "b"]);
        assert_eq!(ctrl.data(), &expected);
        // the host saw the committed posterior, not the prior
        let (issued, seen) = &ctrl.host().batches[0];
        assert_eq!(issued, &patch);
        assert_eq!(seen, &expected);
    }

    #[test]
    fn failed_update_leaves_baseline_and_host_untouched() {
        let mut ctrl = ListController::new(CallLog::default());
        ctrl.apply_initial_data(ListSnapshot::single_section(["a"]));
        let err = ctrl.perform_update(
            &[Edit::remove(0, 9)],
            &[],
            UpdatePolicy::ReloadInPlace,
        );
        assert!(err.is_err());
        assert_eq!(ctrl.data(), &ListSnapshot::single_section(["a"]));
        assert!(ctrl.host().batches.is_empty());
    }

    #[test]
    fn reload_all_rerenders_current_baseline() {
        let mut ctrl = ListController::new(CallLog::default());
        ctrl.apply_initial_data(ListSnapshot::single_section(["a"]));
        ctrl.reload_all();
        assert_eq!(ctrl.host().reload_data_calls, 2);
    }
}
