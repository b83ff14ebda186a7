// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed model of a repository and its refs.
//!
//! ```text
//!                         Repo
//!          +---------------+----------------+
//!          v               v                v
//!       Remote        Submodule(Repo)   AllBranches
//!     +----+----+                    local/remote/tracking
//!     v         v
//! RemoteBranch RemoteTag
//!
//!  Ref = Commit | LocalBranch | RemoteBranch
//!      | TrackingBranch | LocalTag | RemoteTag
//!        (all implement GitRef)
//!
//!  factory: offline/online queries --> sorted, deduplicated entities
//! ```
//!
//! Entities are cheap query handles: existence and state are re-read from
//! git on every call. Mutating methods log their intent, skip when the
//! target state already holds, and log failures before returning them.

use tracing::{error, info};

use crate::error::GoodleResult;

pub mod branch;
pub mod commit;
pub mod factory;
pub mod refs;
pub mod remote;
pub mod repo;
pub mod submodule;
pub mod tag;

pub use branch::{LocalBranch, RemoteBranch, TrackingBranch};
pub use commit::Commit;
pub use factory::AllBranches;
pub use refs::{GitRef, Ref};
pub use remote::Remote;
pub use repo::Repo;
pub use submodule::Submodule;
pub use tag::{LocalTag, RemoteTag};

/// Announce a mutation, run it, and log a failure before returning it.
pub(crate) fn announce<T>(
    action: &str,
    what: &str,
    op: impl FnOnce() -> GoodleResult<T>,
) -> GoodleResult<T> {
    info!(what, "{action}");
    op().inspect_err(|err| error!(what, error = %err, "failed to {action}"))
}

/// Report a mutation skipped because its target state already holds.
pub(crate) fn skip(reason: &str, what: &str) {
    info!(what, "{reason}, skipping");
}

#[cfg(test)]
mod tests;
