//! Error types for path resolution and tree mutation.

use thiserror::Error;

use crate::fs::path::TokenPath;

/// Errors produced by the filesystem tree.
///
/// `NotFound` and `NoTarget` are user-input class: commands report them and
/// carry on. `AnchorMismatch` is contract-violation class: it means a caller
/// resolved an absolute path from a node that is not the tree root, which is
/// a bug in the caller, not bad user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FsError {
    /// The path does not name an existing node.
    #[error("path \"{path}\" not found")]
    NotFound { path: String },

    /// An absolute path was resolved from a non-root directory.
    #[error("absolute path \"{path}\" must be resolved from the root directory")]
    AnchorMismatch { path: String },

    /// The path has no final name segment to create or remove.
    #[error("path \"{path}\" does not name a target")]
    NoTarget { path: String },
}

impl FsError {
    pub(crate) fn not_found(path: &TokenPath) -> Self {
        FsError::NotFound {
            path: path.render(),
        }
    }

    pub(crate) fn no_target(path: &TokenPath) -> Self {
        FsError::NoTarget {
            path: path.render(),
        }
    }
}
