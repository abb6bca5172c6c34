//! Building a [`Filesystem`] from a fetch-nodes (`a: "f"`) response.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::crypto::{decrypt_attrs, unwrap_node_key, NodeAttrs};
use crate::error::{MegaError, Result};
use crate::fs::{Filesystem, Node, NodeType};

/// Keys able to unwrap node keys: the master key plus decrypted share keys.
struct KeyChain<'a> {
    user_handle: &'a str,
    master_key: &'a [u8; 16],
    share_keys: HashMap<String, [u8; 16]>,
}

impl KeyChain<'_> {
    fn key_for(&self, key_handle: &str) -> Option<&[u8; 16]> {
        if key_handle == self.user_handle {
            Some(self.master_key)
        } else {
            self.share_keys.get(key_handle)
        }
    }

    /// Parse share keys from the `ok` array.
    ///
    /// Only keys wrapped with the master key (22 base64 chars) are handled;
    /// RSA-wrapped keys from other users are skipped.
    fn add_share_keys(&mut self, ok_array: &[Value]) {
        for ok in ok_array {
            let (Some(h), Some(k)) = (
                ok.get("h").and_then(|v| v.as_str()),
                ok.get("k").and_then(|v| v.as_str()),
            ) else {
                continue;
            };

            if k.len() > 22 {
                debug!("Skipping RSA-wrapped share key for {}", h);
                continue;
            }

            match unwrap_node_key(k, self.master_key) {
                Ok(key) if key.len() >= 16 => {
                    let mut share_key = [0u8; 16];
                    share_key.copy_from_slice(&key[..16]);
                    self.share_keys.entry(h.to_string()).or_insert(share_key);
                }
                Ok(_) => warn!("Bad share key for {}: too short", h),
                Err(e) => warn!("Bad share key for {}: {}", h, e),
            }
        }
    }

    /// Unwrap a node key from the `k` field.
    ///
    /// Format: `handle:wrapped` entries separated by `/`; the first entry
    /// whose handle names a known key wins.
    fn unwrap(&self, key_str: &str) -> Option<Vec<u8>> {
        key_str.split('/').find_map(|part| {
            let (key_handle, wrapped) = part.split_once(':')?;
            let key = self.key_for(key_handle)?;
            unwrap_node_key(wrapped, key).ok()
        })
    }
}

impl Filesystem {
    /// Decrypt a fetch-nodes response into a filesystem snapshot.
    ///
    /// Nodes whose key or attributes can't be decrypted are left out.
    pub fn from_fetch(response: &Value, user_handle: &str, master_key: &[u8; 16]) -> Result<Self> {
        let nodes_array = response
            .get("f")
            .and_then(|v| v.as_array())
            .ok_or(MegaError::InvalidResponse)?;

        let mut keys = KeyChain {
            user_handle,
            master_key,
            share_keys: HashMap::new(),
        };
        if let Some(ok_array) = response.get("ok").and_then(|v| v.as_array()) {
            keys.add_share_keys(ok_array);
        }

        let nodes: Vec<Node> = nodes_array
            .iter()
            .filter_map(|json| {
                let node = parse_node(json, &keys);
                if node.is_none() {
                    let handle = json.get("h").and_then(|v| v.as_str()).unwrap_or("?");
                    warn!("Skipping undecryptable node {}", handle);
                }
                node
            })
            .collect();

        debug!("Loaded {} nodes", nodes.len());
        Ok(Filesystem::new(nodes))
    }
}

fn parse_node(json: &Value, keys: &KeyChain<'_>) -> Option<Node> {
    let handle = json.get("h")?.as_str()?;
    let parent_handle = json.get("p").and_then(|v| v.as_str());
    let node_type = NodeType::from_i64(json.get("t")?.as_i64()?)?;

    if node_type.is_special() {
        // Account roots carry no key; contacts are named after their user handle.
        let name = match node_type {
            NodeType::Contact => json.get("m").and_then(|v| v.as_str()).unwrap_or(handle),
            _ => "",
        };
        let mut node = Node::special(handle, parent_handle, node_type, name);
        node.timestamp = json.get("ts").and_then(|v| v.as_i64()).unwrap_or(0);
        return Some(node);
    }

    let attrs = json.get("a")?.as_str()?;
    let key = json.get("k")?.as_str()?;
    let key_full = keys.unwrap(key)?;
    let attributes: NodeAttrs = decrypt_attrs(attrs, &key_full).ok()?;
    let name = attributes.get("n")?.as_str()?.to_string();

    Some(Node {
        name,
        handle: handle.to_string(),
        parent_handle: parent_handle.map(str::to_string),
        node_type,
        size: json.get("s").and_then(|v| v.as_u64()).unwrap_or(0),
        timestamp: json.get("ts").and_then(|v| v.as_i64()).unwrap_or(0),
        attrs: attrs.to_string(),
        attributes,
        key: key.to_string(),
        key_full,
        path: None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::base64::base64url_encode;
    use crate::crypto::{
        aes128_ecb_encrypt, encrypt_attrs, make_random_key, name_attrs, wrap_node_key,
    };
    use crate::fs::testing::TreeBuilder;

    #[test]
    fn test_load_decrypts_tree() {
        let mut tree = TreeBuilder::new();
        let docs = tree.folder(TreeBuilder::ROOT, "docs");
        let file = tree.file(&docs, "a.txt");

        let fs =
            Filesystem::from_fetch(&tree.fetch_response(), &tree.user_handle, &tree.master_key)
                .unwrap();

        let node = fs.resolve("/Root/docs/a.txt").unwrap();
        assert_eq!(node.handle, file);
        assert_eq!(node.key_full.len(), 32);
        assert_eq!(node.size, 1024);
        assert_eq!(
            fs.resolve("/Trash").map(|n| n.node_type),
            Some(NodeType::Trash)
        );
    }

    #[test]
    fn test_load_requires_node_list() {
        let err = Filesystem::from_fetch(&json!({"ok": []}), "U", &[0u8; 16]).unwrap_err();
        assert!(matches!(err, MegaError::InvalidResponse));
    }

    #[test]
    fn test_wrong_master_key_skips_nodes() {
        let mut tree = TreeBuilder::new();
        tree.file(TreeBuilder::ROOT, "a.txt");

        let fs =
            Filesystem::from_fetch(&tree.fetch_response(), &tree.user_handle, &make_random_key())
                .unwrap();
        assert!(fs.resolve("/Root/a.txt").is_none());
        assert!(fs.resolve("/Root").is_some());
    }

    #[test]
    fn test_share_key_unwraps_node() {
        let master_key = make_random_key();
        let share_key = make_random_key();
        let node_key = make_random_key();

        let response = json!({
            "f": [
                {"h": "ROOTHNDL", "t": 2},
                {
                    "h": "SHAREDFO",
                    "p": "ROOTHNDL",
                    "t": 1,
                    "a": encrypt_attrs(&name_attrs("shared"), &node_key).unwrap(),
                    "k": format!("SHAREDFO:{}", wrap_node_key(&node_key, &share_key).unwrap()),
                }
            ],
            "ok": [{
                "h": "SHAREDFO",
                "k": base64url_encode(&aes128_ecb_encrypt(&share_key, &master_key).unwrap()),
            }]
        });

        let fs = Filesystem::from_fetch(&response, "USERHNDL", &master_key).unwrap();
        let node = fs.resolve("/Root/shared").unwrap();
        assert_eq!(node.key_full, node_key);
    }
}
