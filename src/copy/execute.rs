//! Sending the copy request and removing replaced files.

use tracing::{debug, error, info};

use crate::api::{DeleteBatch, NodeEntry, NodeTransport};
use crate::error::{MegaError, Result};
use crate::fs::path::join_path;
use crate::fs::Node;

use super::resolve::Destination;

/// A source and the path its copy got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedNode {
    pub source_path: String,
    pub dest_path: String,
}

/// What happened to the files replaced by `-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStatus {
    /// No file was replaced.
    NotNeeded,
    /// Replaced files were deleted.
    Removed,
    /// Deletion failed; stale files remain next to the copies.
    Failed,
}

/// Result of a successful copy.
#[derive(Debug, Clone)]
pub struct CopyReport {
    pub copied: Vec<CopiedNode>,
    /// Number of nodes created on the server, descendants included.
    pub entries: usize,
    /// Handles of replaced files scheduled for deletion.
    pub removed: Vec<String>,
    pub cleanup: CleanupStatus,
}

/// Issue the put-nodes call for `entries`.
///
/// # Errors
/// [`MegaError::CopyFailed`] wrapping the transport error.
pub async fn send_copy<T: NodeTransport + ?Sized>(
    api: &mut T,
    dest: &Destination<'_>,
    sources: &[&Node],
    entries: &[NodeEntry],
) -> Result<Vec<CopiedNode>> {
    if let Err(e) = api.put_nodes(&dest.folder.handle, entries).await {
        error!("Failed to copy files and folders: {}", e);
        return Err(MegaError::CopyFailed(Box::new(e)));
    }

    let folder_path = dest.folder.display_path();
    let copied = sources
        .iter()
        .map(|node| {
            let copied = CopiedNode {
                source_path: node.display_path().to_string(),
                dest_path: join_path(folder_path, dest.effective_name(node)),
            };
            debug!("Copied {} to {}", copied.source_path, copied.dest_path);
            copied
        })
        .collect();

    Ok(copied)
}

/// Delete the files replaced by the copy.
///
/// Best effort: a failure is logged and reported, never returned.
pub async fn remove_overwritten<T: NodeTransport + ?Sized>(
    api: &mut T,
    overwritten: &[&Node],
) -> CleanupStatus {
    if overwritten.is_empty() {
        return CleanupStatus::NotNeeded;
    }

    let mut batch = DeleteBatch::new();
    for node in overwritten {
        batch.delete_node(&node.handle);
    }

    match batch.send(api).await {
        Ok(()) => {
            info!("Removed {} overwritten files", batch.len());
            CleanupStatus::Removed
        }
        Err(e) => {
            error!("Failed to remove overwritten files: {}", e);
            CleanupStatus::Failed
        }
    }
}
