//! Resource guard: maps a validated request target to a filesystem outcome.
//!
//! The checks here are advisory and operate on metadata only; the file is
//! never opened. A later open failure (race, permission change) is still
//! handled by the transfer scheduler as a fatal transfer error.

use crate::http::response::Status;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Why a request target was rejected by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// Target contains a parent-directory traversal segment (403)
    PathTraversal,
    /// Target exists but is not a regular, world-readable file (403)
    PermissionDenied,
    /// Resolved path does not exist (404)
    ResourceMissing,
}

impl GuardError {
    pub fn status(self) -> Status {
        match self {
            GuardError::PathTraversal | GuardError::PermissionDenied => Status::Forbidden,
            GuardError::ResourceMissing => Status::NotFound,
        }
    }
}

/// Resolves a request target under the document root.
pub fn rooted(root: &Path, target: &str) -> PathBuf {
    root.join(target.trim_start_matches('/'))
}

/// Validates a request target against the document root.
///
/// Rejects traversal (`..` anywhere in the unrooted target), missing paths,
/// non-regular files, and files without world-read permission. On success
/// returns the file's byte length.
pub async fn check_target(root: &Path, target: &str) -> Result<u64, GuardError> {
    // Checked on the original target, before rooting, so it holds whether or
    // not the resolved path exists.
    if target.contains("..") {
        return Err(GuardError::PathTraversal);
    }

    let path = rooted(root, target);
    let meta = tokio::fs::metadata(&path)
        .await
        .map_err(|_| GuardError::ResourceMissing)?;

    if !meta.is_file() || meta.permissions().mode() & 0o004 == 0 {
        return Err(GuardError::PermissionDenied);
    }

    Ok(meta.len())
}
