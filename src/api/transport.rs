//! Tree mutation calls used by the copy pipeline.
//!
//! [`NodeTransport`] is the narrow contract the copy core depends on; the
//! [`ApiClient`] implementation speaks the MEGA `p` (put nodes) and `d`
//! (delete node) commands.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::client::{make_request_tag, ApiClient};
use super::error::{api_error, first_error_code};
use crate::error::Result;

/// One node in a put-nodes request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeEntry {
    /// Handle of the source node.
    #[serde(rename = "h")]
    pub handle: String,
    /// Wire node type.
    #[serde(rename = "t")]
    pub node_type: i64,
    /// Encrypted attribute blob.
    #[serde(rename = "a")]
    pub attrs: String,
    /// Node key wrapped under the master key.
    #[serde(rename = "k")]
    pub key: String,
    /// Source parent handle; absent for entries placed directly in the target.
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Backend operations needed to copy nodes and clean up afterwards.
///
/// Both calls are all-or-nothing from the caller's point of view.
#[async_trait]
pub trait NodeTransport: Send {
    /// Create copies of `nodes` under the folder `target`.
    async fn put_nodes(&mut self, target: &str, nodes: &[NodeEntry]) -> Result<()>;

    /// Delete every node in `handles`.
    async fn delete_nodes(&mut self, handles: &[String]) -> Result<()>;
}

/// A group of node deletions sent as one request.
#[derive(Debug, Default, Clone)]
pub struct DeleteBatch {
    handles: Vec<String>,
}

impl DeleteBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue deletion of one node.
    pub fn delete_node(&mut self, handle: &str) {
        self.handles.push(handle.to_string());
    }

    /// Number of queued deletions.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The `d` commands making up this batch.
    pub fn commands(&self) -> Vec<Value> {
        self.handles
            .iter()
            .map(|h| json!({"a": "d", "n": h, "i": make_request_tag()}))
            .collect()
    }

    /// Send the batch; an empty batch succeeds without a request.
    pub async fn send<T: NodeTransport + ?Sized>(&self, api: &mut T) -> Result<()> {
        if self.handles.is_empty() {
            return Ok(());
        }
        api.delete_nodes(&self.handles).await
    }
}

/// Build the put-nodes command copying `nodes` into `target`.
pub fn put_nodes_command(target: &str, nodes: &[NodeEntry]) -> Value {
    json!({
        "a": "p",
        "t": target,
        "n": nodes,
        "i": make_request_tag(),
    })
}

#[async_trait]
impl NodeTransport for ApiClient {
    async fn put_nodes(&mut self, target: &str, nodes: &[NodeEntry]) -> Result<()> {
        let response = self.request(put_nodes_command(target, nodes)).await?;
        if let Some(code) = first_error_code(&response) {
            return Err(api_error(code));
        }
        debug!("Server created {} nodes under {}", nodes.len(), target);
        Ok(())
    }

    async fn delete_nodes(&mut self, handles: &[String]) -> Result<()> {
        let mut batch = DeleteBatch::new();
        for h in handles {
            batch.delete_node(h);
        }
        let response = self.request_batch(batch.commands()).await?;
        if let Some(code) = first_error_code(&response) {
            return Err(api_error(code));
        }
        Ok(())
    }
}
