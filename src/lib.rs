//! # megacp
//!
//! Server-side copy of files and folders on Mega.nz.
//!
//! A copy creates new nodes that reference the existing encrypted file data,
//! so nothing is downloaded or uploaded. Each copied node keeps its data key,
//! re-wrapped under the account's master key.
//!
//! ## Features
//!
//! - `cp`-style invocations: copy into a folder, copy under a new name, or
//!   copy many sources into a target folder (`-t`, `-T`).
//! - Recursive copy of folders (`-r`) in a single request.
//! - Replacing existing files (`-f`), with the old files removed after the
//!   copy succeeds.
//! - Fetching and decrypting the account's node tree, including folders
//!   reached through AES share keys.
//!
//! ## Example
//!
//! ```no_run
//! use megacp::{ApiClient, CopyOptions, Session};
//!
//! # async fn example(master_key: [u8; 16]) -> megacp::Result<()> {
//! let mut api = ApiClient::new();
//! api.set_session_id("SESSION_ID".to_string());
//!
//! let mut session = Session::new(api, "USERHNDL", master_key);
//! session.refresh().await?;
//!
//! // Same as `cp /Root/report.pdf /Root/report-2024.pdf`
//! let args = vec!["/Root/report.pdf".to_string(), "/Root/report-2024.pdf".to_string()];
//! let report = session.cp(&args, &CopyOptions::default()).await?;
//! for copied in &report.copied {
//!     println!("{} -> {}", copied.source_path, copied.dest_path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod base64;
pub mod copy;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod http;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, ApiConfig, NodeTransport};
pub use copy::{CleanupStatus, CopiedNode, CopyOptions, CopyReport};
pub use error::{ErrorCategory, MegaError, Result};
pub use fs::{Filesystem, Node, NodeType};
pub use session::Session;
