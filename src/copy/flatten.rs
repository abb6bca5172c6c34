//! Expansion of folder sources into their whole subtree.

use crate::fs::{Filesystem, Node};

/// A node scheduled for copying.
#[derive(Debug, Clone, Copy)]
pub struct FlatNode<'a> {
    pub node: &'a Node,
    /// Original parent of a descendant. `None` for selected sources, which
    /// go straight into the destination folder.
    pub parent: Option<&'a str>,
}

impl FlatNode<'_> {
    /// Whether this is one of the selected sources.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }
}

/// List every node to copy: each source, followed (when `recursive`) by all
/// of its descendants, parents before children.
pub fn flatten<'a>(fs: &'a Filesystem, sources: &[&'a Node], recursive: bool) -> Vec<FlatNode<'a>> {
    let mut out = Vec::new();
    for &source in sources {
        out.push(FlatNode {
            node: source,
            parent: None,
        });
        if !recursive {
            continue;
        }
        out.extend(fs.descendants(source).into_iter().map(|node| FlatNode {
            node,
            parent: node.parent_handle.as_deref(),
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::fs::testing::TreeBuilder;

    #[test]
    fn test_folder_with_descendants() {
        let mut tree = TreeBuilder::new();
        let a = tree.folder(TreeBuilder::ROOT, "a");
        let b = tree.folder(&a, "b");
        tree.file(&b, "c");
        tree.file(&a, "d");
        tree.folder(&b, "empty");
        let fs = tree.build();

        let source = fs.get_node_by_handle(&a).unwrap();
        let flat = flatten(&fs, &[source], true);

        // Folder plus its four descendants.
        assert_eq!(flat.len(), 5);
        assert!(flat[0].is_top_level());
        assert_eq!(flat[0].node.handle, a);
        assert!(flat[1..].iter().all(|f| !f.is_top_level()));

        let handles: HashSet<&str> = flat.iter().map(|f| f.node.handle.as_str()).collect();
        assert_eq!(handles.len(), 5);

        // Every parent reference names an entry that comes earlier.
        for (i, entry) in flat.iter().enumerate().skip(1) {
            let parent = entry.parent.unwrap();
            let pos = flat.iter().position(|f| f.node.handle == parent).unwrap();
            assert!(pos < i);
        }
    }

    #[test]
    fn test_non_recursive_keeps_sources_only() {
        let mut tree = TreeBuilder::new();
        let a = tree.folder(TreeBuilder::ROOT, "a");
        tree.file(&a, "x");
        let f = tree.file(TreeBuilder::ROOT, "f");
        let fs = tree.build();

        let sources = [
            fs.get_node_by_handle(&f).unwrap(),
            fs.get_node_by_handle(&a).unwrap(),
        ];
        let flat = flatten(&fs, &sources, false);
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().all(|f| f.is_top_level()));
    }

    #[test]
    fn test_recursive_file_has_no_descendants() {
        let mut tree = TreeBuilder::new();
        let f = tree.file(TreeBuilder::ROOT, "f");
        let fs = tree.build();

        let flat = flatten(&fs, &[fs.get_node_by_handle(&f).unwrap()], true);
        assert_eq!(flat.len(), 1);
    }
}
