//! Remote filesystem model.

mod load;
pub(crate) mod node;
pub mod path;
mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use node::{Node, NodeType};
pub use tree::{Filesystem, NETWORK_HANDLE, TOP_HANDLE};
