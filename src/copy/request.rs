//! Put-nodes entries for a copy.

use crate::api::NodeEntry;
use crate::crypto::{renamed_attrs, wrap_node_key};
use crate::error::{MegaError, Result};
use crate::fs::Node;

use super::flatten::FlatNode;

/// Build one request entry per flattened node.
///
/// Each entry keeps the node's type and attribute blob and carries its raw
/// key re-wrapped under `master_key`. With `rename`, the top-level entries
/// get a fresh attribute blob encrypted under their own node key.
pub fn build_entries(
    nodes: &[FlatNode<'_>],
    rename: Option<&str>,
    master_key: &[u8; 16],
) -> Result<Vec<NodeEntry>> {
    nodes
        .iter()
        .map(|flat| {
            let node = flat.node;
            let attrs = match rename {
                Some(name) if flat.is_top_level() => {
                    renamed_attrs(&node.attributes, name, &node.key_full)?
                }
                _ => node.attrs.clone(),
            };

            Ok(NodeEntry {
                handle: node.handle.clone(),
                node_type: wire_type(node)?,
                attrs,
                key: rewrap_key(node, master_key)?,
                parent: flat.parent.map(str::to_string),
            })
        })
        .collect()
}

fn wire_type(node: &Node) -> Result<i64> {
    node.node_type.as_i64().ok_or_else(|| {
        MegaError::Custom(format!("Node {} has no wire type", node.display_path()))
    })
}

fn rewrap_key(node: &Node, master_key: &[u8; 16]) -> Result<String> {
    if node.key_full.is_empty() {
        return Err(MegaError::CryptoError(format!(
            "Node {} has no decrypted key",
            node.display_path()
        )));
    }
    wrap_node_key(&node.key_full, master_key)
}
