//! Logged-in session: API client, account keys and the cached node tree.

use serde_json::json;
use tracing::info;

use crate::api::ApiClient;
use crate::copy::{self, CopyContext, CopyOptions, CopyReport};
use crate::error::Result;
use crate::fs::Filesystem;

/// An authenticated session.
///
/// Path-based operations rely on the cached tree, so call
/// [`Session::refresh`] before copying and after remote changes.
#[derive(Debug)]
pub struct Session {
    api: ApiClient,
    /// User's handle; node keys wrapped under it use the master key.
    pub user_handle: String,
    master_key: [u8; 16],
    fs: Filesystem,
}

impl Session {
    /// Wrap an API client that already carries a session id.
    ///
    /// The node tree starts out empty apart from the virtual roots.
    pub fn new(api: ApiClient, user_handle: impl Into<String>, master_key: [u8; 16]) -> Self {
        Self {
            api,
            user_handle: user_handle.into(),
            master_key,
            fs: Filesystem::new(Vec::new()),
        }
    }

    /// Replace the cached tree.
    pub fn with_filesystem(mut self, fs: Filesystem) -> Self {
        self.fs = fs;
        self
    }

    /// The cached node tree.
    pub fn filesystem(&self) -> &Filesystem {
        &self.fs
    }

    /// Fetch every node from the server and rebuild the tree.
    pub async fn refresh(&mut self) -> Result<()> {
        let response = self.api.request(json!({"a": "f", "c": 1, "r": 1})).await?;
        self.fs = Filesystem::from_fetch(&response, &self.user_handle, &self.master_key)?;
        info!("Loaded {} nodes", self.fs.len());
        Ok(())
    }

    /// Copy files and folders; `args` are the positional `cp` arguments.
    ///
    /// # Example
    /// ```no_run
    /// # use megacp::{ApiClient, CopyOptions, Session};
    /// # async fn example(master_key: [u8; 16]) -> megacp::Result<()> {
    /// let mut api = ApiClient::new();
    /// api.set_session_id("SESSION_ID".to_string());
    /// let mut session = Session::new(api, "USERHNDL", master_key);
    /// session.refresh().await?;
    ///
    /// let opts = CopyOptions {
    ///     recursive: true,
    ///     ..CopyOptions::default()
    /// };
    /// let args = vec!["/Root/photos".to_string(), "/Root/backup".to_string()];
    /// let report = session.cp(&args, &opts).await?;
    /// println!("{} nodes copied", report.entries);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn cp(&mut self, args: &[String], opts: &CopyOptions) -> Result<CopyReport> {
        let ctx = CopyContext {
            fs: &self.fs,
            master_key: &self.master_key,
            api: &mut self.api,
        };
        copy::copy(ctx, args, opts).await
    }
}
