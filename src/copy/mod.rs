//! Server-side copy of files and folders.
//!
//! A copy never moves file contents. The server is asked to create new
//! nodes that point at the existing encrypted data; each new node carries
//! the source's raw key re-wrapped under the account's master key, so the
//! data encryption keys stay the same.
//!
//! The pipeline runs in fixed stages, each of which may stop it:
//!
//! 1. [`Invocation::parse`] checks the argument shape (no lookups yet).
//! 2. [`resolve_destination`] picks the receiving folder and optional new name.
//! 3. [`select_sources`] drops sources that can't or shouldn't be copied.
//! 4. [`flatten`] expands folder sources into their subtree (`-r`).
//! 5. [`build_entries`] re-wraps keys and, on rename, rebuilds attributes.
//! 6. [`send_copy`] issues one put-nodes request.
//! 7. [`remove_overwritten`] deletes the files replaced under `-f`.
//!
//! Stages 1 to 5 are pure functions of the filesystem snapshot; only the
//! last two talk to the server, strictly one after the other.

mod args;
mod execute;
mod flatten;
mod request;
mod resolve;
mod select;

pub use args::{DestinationMode, Invocation};
pub use execute::{remove_overwritten, send_copy, CleanupStatus, CopiedNode, CopyReport};
pub use flatten::{flatten, FlatNode};
pub use request::build_entries;
pub use resolve::{resolve_destination, Destination};
pub use select::{select_sources, Selection};

use tracing::debug;

use crate::api::{NodeEntry, NodeTransport};
use crate::error::Result;
use crate::fs::{Filesystem, Node};

/// Per-invocation switches (`-r`, `-f`, `-t <folder>`, `-T`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Copy folders with everything below them; folders are skipped otherwise.
    pub recursive: bool,
    /// Replace existing files of the same name. Folders are never replaced.
    pub force: bool,
    /// Copy every positional argument into this existing folder.
    pub target_folder: Option<String>,
    /// Treat the destination as a folder path plus a new name.
    pub no_target_folder: bool,
}

/// What a single invocation will do.
#[derive(Debug, Clone)]
pub struct CopyPlan<'a> {
    pub destination: Destination<'a>,
    /// Accepted sources, in argument order.
    pub sources: Vec<&'a Node>,
    /// Existing files to delete after the copy succeeds.
    pub overwritten: Vec<&'a Node>,
    /// Every node to copy, sources first in each subtree.
    pub nodes: Vec<FlatNode<'a>>,
}

impl<'a> CopyPlan<'a> {
    /// Run the in-memory stages against a snapshot.
    ///
    /// # Errors
    /// Argument and destination errors, or [`MegaError::NothingToDo`](crate::MegaError::NothingToDo)
    /// when every source was filtered out.
    pub fn prepare(fs: &'a Filesystem, args: &[String], opts: &CopyOptions) -> Result<Self> {
        let invocation = Invocation::parse(args, opts)?;
        let destination = resolve_destination(fs, &invocation)?;

        let candidates = fs.resolve_paths(&invocation.sources);
        let Selection {
            sources,
            overwritten,
        } = select_sources(fs, &destination, candidates, opts)?;

        let nodes = flatten(fs, &sources, opts.recursive);
        debug!(
            "Copy plan: {} sources, {} nodes into {}",
            sources.len(),
            nodes.len(),
            destination.folder_path
        );

        Ok(Self {
            destination,
            sources,
            overwritten,
            nodes,
        })
    }

    /// Request entries for this plan.
    pub fn entries(&self, master_key: &[u8; 16]) -> Result<Vec<NodeEntry>> {
        build_entries(&self.nodes, self.destination.name.as_deref(), master_key)
    }

    /// Send the copy, then clean up replaced files.
    pub async fn execute<T: NodeTransport + ?Sized>(
        &self,
        api: &mut T,
        master_key: &[u8; 16],
    ) -> Result<CopyReport> {
        let entries = self.entries(master_key)?;
        let copied = send_copy(api, &self.destination, &self.sources, &entries).await?;
        let cleanup = remove_overwritten(api, &self.overwritten).await;

        Ok(CopyReport {
            copied,
            entries: entries.len(),
            removed: self.overwritten.iter().map(|n| n.handle.clone()).collect(),
            cleanup,
        })
    }
}

/// Everything a copy needs from the session.
pub struct CopyContext<'a, T: NodeTransport + ?Sized> {
    pub fs: &'a Filesystem,
    pub master_key: &'a [u8; 16],
    pub api: &'a mut T,
}

/// Copy files and folders as the `cp` command line describes.
///
/// # Errors
/// - [`MegaError::InvalidArguments`](crate::MegaError::InvalidArguments) for a malformed command line
/// - destination errors from [`resolve_destination`]
/// - [`MegaError::NothingToDo`](crate::MegaError::NothingToDo) when nothing is left to copy
/// - [`MegaError::CopyFailed`](crate::MegaError::CopyFailed) when the server rejects the copy
pub async fn copy<T: NodeTransport + ?Sized>(
    ctx: CopyContext<'_, T>,
    args: &[String],
    opts: &CopyOptions,
) -> Result<CopyReport> {
    let plan = CopyPlan::prepare(ctx.fs, args, opts)?;
    plan.execute(ctx.api, ctx.master_key).await
}
