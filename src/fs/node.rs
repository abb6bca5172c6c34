//! Filesystem node types.

use crate::crypto::NodeAttrs;

/// Node type enumeration matching MEGA's internal types.
///
/// `Top` has no wire representation: it is the virtual `/` that holds the
/// account's root folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Virtual filesystem root (`/`)
    Top,
    /// Regular file
    File,
    /// Folder/directory
    Folder,
    /// Root folder (Cloud Drive)
    Root,
    /// Inbox folder
    Inbox,
    /// Trash folder
    Trash,
    /// Contact node
    Contact,
    /// Network/Contacts root
    Network,
}

impl NodeType {
    /// Create from integer type value.
    pub fn from_i64(t: i64) -> Option<Self> {
        match t {
            0 => Some(NodeType::File),
            1 => Some(NodeType::Folder),
            2 => Some(NodeType::Root),
            3 => Some(NodeType::Inbox),
            4 => Some(NodeType::Trash),
            8 => Some(NodeType::Contact),
            9 => Some(NodeType::Network),
            _ => None,
        }
    }

    /// Integer type value used on the wire. `None` for the virtual top node.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NodeType::Top => None,
            NodeType::File => Some(0),
            NodeType::Folder => Some(1),
            NodeType::Root => Some(2),
            NodeType::Inbox => Some(3),
            NodeType::Trash => Some(4),
            NodeType::Contact => Some(8),
            NodeType::Network => Some(9),
        }
    }

    /// Special nodes are the account's fixed roots and the virtual nodes.
    /// They carry no key of their own and can never be copied.
    pub fn is_special(&self) -> bool {
        !matches!(self, NodeType::File | NodeType::Folder)
    }
}

/// A node in the MEGA filesystem.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node name (decrypted)
    pub name: String,
    /// Node handle (unique identifier)
    pub handle: String,
    /// Parent node handle
    pub parent_handle: Option<String>,
    /// Node type
    pub node_type: NodeType,
    /// File size in bytes (0 for folders)
    pub size: u64,
    /// Timestamp (Unix epoch)
    pub timestamp: i64,
    /// Encrypted attribute blob (`a`), exactly as the server sent it
    pub attrs: String,
    /// Decrypted attributes
    pub attributes: NodeAttrs,
    /// Wrapped node key (`k`), exactly as the server sent it
    pub key: String,
    /// Raw node key; empty for special nodes
    pub key_full: Vec<u8>,
    /// Full path (computed when the tree is built)
    pub(crate) path: Option<String>,
}

impl Node {
    /// Create a keyless special node (account roots, contacts).
    pub fn special(handle: &str, parent_handle: Option<&str>, node_type: NodeType, name: &str) -> Self {
        Self {
            name: name.to_string(),
            handle: handle.to_string(),
            parent_handle: parent_handle.map(str::to_string),
            node_type,
            size: 0,
            timestamp: 0,
            attrs: String::new(),
            attributes: NodeAttrs::new(),
            key: String::new(),
            key_full: Vec::new(),
            path: None,
        }
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }

    /// Get the full path of this node.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Path for log messages; falls back to the bare name.
    pub(crate) fn display_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.name)
    }
}
