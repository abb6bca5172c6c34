//! In-memory transport recording every call.

use async_trait::async_trait;

use super::transport::{NodeEntry, NodeTransport};
use crate::error::{MegaError, Result};

#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub puts: Vec<(String, Vec<NodeEntry>)>,
    pub deletes: Vec<Vec<String>>,
    pub fail_put: bool,
    pub fail_delete: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Self::default()
        }
    }

    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.puts.len() + self.deletes.len()
    }
}

#[async_trait]
impl NodeTransport for RecordingTransport {
    async fn put_nodes(&mut self, target: &str, nodes: &[NodeEntry]) -> Result<()> {
        self.puts.push((target.to_string(), nodes.to_vec()));
        if self.fail_put {
            return Err(MegaError::ApiError {
                code: -9,
                message: "Node does not exist".to_string(),
            });
        }
        Ok(())
    }

    async fn delete_nodes(&mut self, handles: &[String]) -> Result<()> {
        self.deletes.push(handles.to_vec());
        if self.fail_delete {
            return Err(MegaError::ApiError {
                code: -11,
                message: "Access violation".to_string(),
            });
        }
        Ok(())
    }
}
