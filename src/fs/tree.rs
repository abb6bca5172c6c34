//! In-memory filesystem snapshot.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::node::{Node, NodeType};
use super::path::{join_path, normalize_path};

/// Handle of the virtual `/` node.
pub const TOP_HANDLE: &str = "TOP";
/// Handle of the virtual `/Contacts` node, used when the server sends none.
pub const NETWORK_HANDLE: &str = "NETWORK";

/// Snapshot of one session's node tree.
///
/// The snapshot is read-only: copies and deletions are requested from the
/// server and only show up here after the next refresh.
#[derive(Debug, Clone)]
pub struct Filesystem {
    nodes: Vec<Node>,
    by_handle: HashMap<String, usize>,
    by_path: HashMap<String, usize>,
    children: HashMap<String, Vec<usize>>,
}

impl Filesystem {
    /// Build a snapshot from decrypted nodes.
    ///
    /// The virtual top node is always added, and a `/Contacts` network node
    /// is added unless one is present. Account roots hang off the top node,
    /// contacts off the network node. Nodes whose parent is unknown are
    /// listed directly under `/`.
    pub fn new(nodes: Vec<Node>) -> Self {
        let mut all = vec![Node::special(TOP_HANDLE, None, NodeType::Top, "")];

        let network_handle = nodes
            .iter()
            .find(|n| n.node_type == NodeType::Network)
            .map(|n| n.handle.clone());
        if network_handle.is_none() {
            all.push(Node::special(
                NETWORK_HANDLE,
                Some(TOP_HANDLE),
                NodeType::Network,
                "Contacts",
            ));
        }
        let network_handle = network_handle.unwrap_or_else(|| NETWORK_HANDLE.to_string());

        for mut node in nodes {
            match node.node_type {
                NodeType::Top => continue,
                NodeType::Root | NodeType::Inbox | NodeType::Trash | NodeType::Network => {
                    node.parent_handle = Some(TOP_HANDLE.to_string());
                    if node.name.is_empty() {
                        node.name = default_root_name(node.node_type).to_string();
                    }
                }
                NodeType::Contact if node.parent_handle.is_none() => {
                    node.parent_handle = Some(network_handle.clone());
                }
                _ => {}
            }
            all.push(node);
        }

        let by_handle: HashMap<String, usize> = all
            .iter()
            .enumerate()
            .map(|(i, n)| (n.handle.clone(), i))
            .collect();

        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, node) in all.iter().enumerate().skip(1) {
            let parent = node
                .parent_handle
                .as_deref()
                .filter(|p| by_handle.contains_key(*p))
                .unwrap_or(TOP_HANDLE);
            children.entry(parent.to_string()).or_default().push(i);
        }

        let mut fs = Self {
            nodes: all,
            by_handle,
            by_path: HashMap::new(),
            children,
        };
        fs.build_paths();
        fs
    }

    fn build_paths(&mut self) {
        let mut paths: Vec<Option<String>> = vec![None; self.nodes.len()];
        paths[0] = Some("/".to_string());

        // Breadth-first from the top so each parent path exists before its
        // children. A node gets a path once, which also stops parent cycles.
        let mut queue = vec![0usize];
        while !queue.is_empty() {
            let mut next = Vec::new();
            for idx in queue {
                let parent_path = paths[idx].clone().unwrap_or_else(|| "/".to_string());
                let handle = self.nodes[idx].handle.clone();
                for &child in self.children.get(&handle).into_iter().flatten() {
                    if paths[child].is_none() {
                        paths[child] = Some(join_path(&parent_path, &self.nodes[child].name));
                        next.push(child);
                    }
                }
            }
            queue = next;
        }

        for (i, path) in paths.into_iter().enumerate() {
            if let Some(path) = path {
                self.by_path.entry(path.clone()).or_insert(i);
                self.nodes[i].path = Some(path);
            }
        }
    }

    /// The virtual `/` node.
    pub fn top(&self) -> &Node {
        &self.nodes[0]
    }

    /// Number of nodes, virtual ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the top node is always present.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look a node up by path.
    pub fn resolve(&self, path: &str) -> Option<&Node> {
        self.by_path
            .get(&normalize_path(path))
            .map(|&i| &self.nodes[i])
    }

    /// Look up every path, keeping only the ones that exist.
    pub fn resolve_paths<S: AsRef<str>>(&self, paths: &[S]) -> Vec<&Node> {
        paths
            .iter()
            .filter_map(|p| {
                let node = self.resolve(p.as_ref());
                if node.is_none() {
                    warn!("Path not found: {}", p.as_ref());
                }
                node
            })
            .collect()
    }

    /// Get a node by its handle.
    pub fn get_node_by_handle(&self, handle: &str) -> Option<&Node> {
        self.by_handle.get(handle).map(|&i| &self.nodes[i])
    }

    /// Child of `folder` called `name`.
    pub fn child_by_name(&self, folder: &Node, name: &str) -> Option<&Node> {
        self.children
            .get(&folder.handle)?
            .iter()
            .map(|&i| &self.nodes[i])
            .find(|n| n.name == name)
    }

    /// Every descendant of `node`, parents before their children.
    ///
    /// `node` itself is not included. Each descendant appears exactly once,
    /// however deep the subtree goes.
    pub fn descendants(&self, node: &Node) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        if let Some(&idx) = self.by_handle.get(&node.handle) {
            seen.insert(idx);
        }

        // Explicit stack: children are pushed in reverse so they pop in load order.
        let mut stack: Vec<usize> = self.child_indexes(&node.handle).rev().collect();
        while let Some(i) = stack.pop() {
            if !seen.insert(i) {
                continue;
            }
            let child = &self.nodes[i];
            out.push(child);
            stack.extend(self.child_indexes(&child.handle).rev());
        }
        out
    }

    fn child_indexes(&self, handle: &str) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.children.get(handle).into_iter().flatten().copied()
    }
}

fn default_root_name(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Root => "Root",
        NodeType::Inbox => "Inbox",
        NodeType::Trash => "Trash",
        NodeType::Network => "Contacts",
        _ => "",
    }
}
