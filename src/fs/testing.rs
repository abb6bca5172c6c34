//! Test fixtures: trees of genuinely encrypted nodes.

use serde_json::{json, Value};

use crate::crypto::{
    encrypt_attrs, make_random_file_key, make_random_key, name_attrs, wrap_node_key,
};
use crate::fs::{Filesystem, Node, NodeType};

pub(crate) struct TreeBuilder {
    pub master_key: [u8; 16],
    pub user_handle: String,
    nodes: Vec<Node>,
    next: usize,
}

impl TreeBuilder {
    pub const ROOT: &'static str = "ROOTHNDL";
    pub const TRASH: &'static str = "TRASHHND";

    pub fn new() -> Self {
        let nodes = vec![
            Node::special(Self::ROOT, None, NodeType::Root, "Root"),
            Node::special(Self::TRASH, None, NodeType::Trash, "Trash"),
        ];
        Self {
            master_key: make_random_key(),
            user_handle: "USERHNDL".to_string(),
            nodes,
            next: 0,
        }
    }

    pub fn folder(&mut self, parent: &str, name: &str) -> String {
        let key = make_random_key();
        self.push(parent, NodeType::Folder, name, key.to_vec())
    }

    pub fn file(&mut self, parent: &str, name: &str) -> String {
        let key = make_random_file_key();
        self.push(parent, NodeType::File, name, key.to_vec())
    }

    /// A contact, listed under `/Contacts` by its email.
    pub fn contact(&mut self, email: &str) -> String {
        self.next += 1;
        let handle = format!("C{:07}", self.next);
        self.nodes
            .push(Node::special(&handle, None, NodeType::Contact, email));
        handle
    }

    fn push(&mut self, parent: &str, node_type: NodeType, name: &str, key_full: Vec<u8>) -> String {
        self.next += 1;
        let handle = format!("H{:07}", self.next);
        let attributes = name_attrs(name);
        let attrs = encrypt_attrs(&attributes, &key_full).unwrap();
        let wrapped = wrap_node_key(&key_full, &self.master_key).unwrap();

        self.nodes.push(Node {
            name: name.to_string(),
            handle: handle.clone(),
            parent_handle: Some(parent.to_string()),
            node_type,
            size: if node_type == NodeType::File { 1024 } else { 0 },
            timestamp: 1_700_000_000,
            attrs,
            attributes,
            key: format!("{}:{}", self.user_handle, wrapped),
            key_full,
            path: None,
        });
        handle
    }

    pub fn build(&self) -> Filesystem {
        Filesystem::new(self.nodes.clone())
    }

    /// The tree as the server would send it in a fetch-nodes response.
    pub fn fetch_response(&self) -> Value {
        let f: Vec<Value> = self
            .nodes
            .iter()
            .map(|n| {
                let t = n.node_type.as_i64().unwrap();
                if n.node_type == NodeType::Contact {
                    json!({ "h": n.handle, "t": t, "m": n.name, "ts": n.timestamp })
                } else if n.node_type.is_special() {
                    json!({ "h": n.handle, "t": t, "ts": n.timestamp })
                } else {
                    json!({
                        "h": n.handle,
                        "p": n.parent_handle,
                        "t": t,
                        "a": n.attrs,
                        "k": n.key,
                        "s": n.size,
                        "ts": n.timestamp,
                    })
                }
            })
            .collect();
        json!({ "f": f, "ok": [], "sn": "SEQNUM00" })
    }
}
