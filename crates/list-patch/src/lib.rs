//! list-patch — sectioned list snapshots and batch-update patch computation.
//!
//! Given a prior [`ListSnapshot`], an ordered log of [`Edit`]s, and the set
//! of positions whose displayed value should refresh, [`build_patch`]
//! produces the instruction sets ([`Patch`]) a render host needs to animate
//! to the posterior snapshot, under one of two [`UpdatePolicy`] choices:
//!
//! - [`UpdatePolicy::ReloadInPlace`] — deletions plus in-place reloads; the
//!   minimal instruction set, with a documented hazard on hosts that fail
//!   to refresh reloaded positions beyond a deleted run.
//! - [`UpdatePolicy::DeleteAndReinsert`] — changed positions that shift are
//!   re-issued as delete+insert pairs; more instructions, defect-proof.
//!
//! The computation is pure; applying the patch against a host is a separate
//! step (see [`host`]), so instruction sets are unit-testable with no
//! rendering layer present ([`apply::apply_patch`] replays them directly).
//!
//! # Example
//!
//! ```
//! use list_patch::{build_patch, Edit, ListSnapshot, Position, UpdatePolicy};
//!
//! let prior = ListSnapshot::single_section(["a", "b", "c"]);
//! let edits = [Edit::assign(0, 0, "a*"), Edit::remove(0, 2)];
//! let intent = [Position::new(0, 0)];
//! let (patch, posterior) =
//!     build_patch(&prior, &edits, &intent, UpdatePolicy::ReloadInPlace)?;
//! assert_eq!(posterior, ListSnapshot::single_section(["a*", "b"]));
//! assert_eq!(patch.deletions.len(), 1);
//! assert_eq!(patch.reloads.len(), 1);
//! # Ok::<(), list_patch::PatchBuildError>(())
//! ```

pub mod apply;
pub mod builder;
pub mod codec;
pub mod edit;
pub mod host;
pub mod patch;
pub mod snapshot;

pub use apply::{apply_patch, PatchApplyError};
pub use builder::{build_patch, PatchBuildError, UpdatePolicy};
pub use codec::json::{edit_from_json, edit_to_json, patch_from_json, patch_to_json, CodecError};
pub use edit::Edit;
pub use host::{ListController, RenderHost};
pub use patch::{Patch, PatchInvariantError};
pub use snapshot::{ListSnapshot, Position};
