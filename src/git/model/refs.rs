// goodle: Git Repository Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The closed set of git pointers.

use std::fmt;
use std::path::Path;

use super::{Commit, LocalBranch, LocalTag, RemoteBranch, RemoteTag, TrackingBranch, announce};
use crate::error::{GitError, GoodleResult};
use crate::git::offline;

/// Capabilities shared by every kind of ref.
pub trait GitRef {
    /// Working tree the ref belongs to.
    fn path(&self) -> &Path;

    /// Name as typed on the command line (`main`, `v1.0`, a sha).
    fn short_ref(&self) -> String;

    /// Fully qualified name (`refs/heads/main`, `refs/tags/v1.0`, a sha).
    fn formatted_ref(&self) -> String;

    /// Check the ref out.
    ///
    /// # Errors
    ///
    /// Returns an error if `git checkout` fails.
    fn checkout(&self) -> GoodleResult<()> {
        let short = self.short_ref();
        announce("checkout", &short, || offline::checkout(self.path(), &short))
    }
}

/// Validate a formatted ref with `git check-ref-format`.
pub(crate) fn validate(formatted: &str) -> GoodleResult<()> {
    if offline::check_ref_format(formatted)? {
        Ok(())
    } else {
        Err(GitError::InvalidRefName {
            name: formatted.to_string(),
        }
        .into())
    }
}

/// Any addressable git pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ref {
    Commit(Commit),
    LocalBranch(LocalBranch),
    RemoteBranch(RemoteBranch),
    TrackingBranch(TrackingBranch),
    LocalTag(LocalTag),
    RemoteTag(RemoteTag),
}

impl Ref {
    fn as_git_ref(&self) -> &dyn GitRef {
        match self {
            Self::Commit(r) => r,
            Self::LocalBranch(r) => r,
            Self::RemoteBranch(r) => r,
            Self::TrackingBranch(r) => r,
            Self::LocalTag(r) => r,
            Self::RemoteTag(r) => r,
        }
    }

    /// Short description of the ref kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Commit(_) => "commit",
            Self::LocalBranch(_) => "local branch",
            Self::RemoteBranch(_) => "remote branch",
            Self::TrackingBranch(_) => "tracking branch",
            Self::LocalTag(_) => "local tag",
            Self::RemoteTag(_) => "remote tag",
        }
    }
}

impl GitRef for Ref {
    fn path(&self) -> &Path {
        self.as_git_ref().path()
    }

    fn short_ref(&self) -> String {
        self.as_git_ref().short_ref()
    }

    fn formatted_ref(&self) -> String {
        self.as_git_ref().formatted_ref()
    }

    fn checkout(&self) -> GoodleResult<()> {
        self.as_git_ref().checkout()
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.short_ref())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Ref {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_variant!(Commit, LocalBranch, RemoteBranch, TrackingBranch, LocalTag, RemoteTag);
