//! Destination resolution: which folder receives the copies, and under
//! what name.

use crate::error::{MegaError, Result};
use crate::fs::path::{normalize_path, path_name, path_up};
use crate::fs::{Filesystem, Node, NodeType};

use super::args::{DestinationMode, Invocation};

/// Resolved destination of a copy.
#[derive(Debug, Clone)]
pub struct Destination<'a> {
    /// Path of the receiving folder, as derived from the arguments.
    pub folder_path: String,
    /// The receiving folder.
    pub folder: &'a Node,
    /// New name for the copied node, when the destination names one.
    pub name: Option<String>,
}

impl Destination<'_> {
    /// Whether the copy gets a new name.
    pub fn is_rename(&self) -> bool {
        self.name.is_some()
    }

    /// Name `node` will have under the destination folder.
    pub fn effective_name<'n>(&'n self, node: &'n Node) -> &'n str {
        self.name.as_deref().unwrap_or(&node.name)
    }
}

/// Split a destination path into its folder and the new name.
///
/// A trailing slash marks the path as a folder, leaving the name empty.
fn split_destination(path: &str) -> Result<(String, String)> {
    let normalized = normalize_path(path);
    if path.ends_with('/') && normalized != "/" {
        return Ok((normalized, String::new()));
    }

    let folder = path_up(&normalized)
        .filter(|folder| *folder != normalized)
        .ok_or_else(|| MegaError::InvalidDestination(path.to_string()))?;
    Ok((folder, path_name(&normalized)))
}

/// Resolve the destination folder and optional new name.
///
/// # Errors
/// - [`MegaError::InvalidDestination`] when a rename target has no parent
/// - [`MegaError::DestinationNotFound`] when the folder doesn't exist
/// - [`MegaError::NotAFolder`] when the folder is a file
/// - [`MegaError::NotWritable`] for `/` and `/Contacts`
/// - [`MegaError::NameUndetermined`] when a rename target has no name
pub fn resolve_destination<'a>(fs: &'a Filesystem, inv: &Invocation) -> Result<Destination<'a>> {
    let dest_path = inv.destination.as_str();

    let (folder_path, name) = match inv.mode {
        DestinationMode::TargetFolder | DestinationMode::Auto { many_sources: true } => {
            (dest_path.to_string(), None)
        }
        DestinationMode::NoTargetFolder => {
            let (folder, name) = split_destination(dest_path)?;
            (folder, Some(name))
        }
        DestinationMode::Auto { many_sources: false } => match fs.resolve(dest_path) {
            Some(node) if !node.is_file() => (dest_path.to_string(), None),
            _ => {
                let (folder, name) = split_destination(dest_path)?;
                (folder, Some(name))
            }
        },
    };

    let folder = fs
        .resolve(&folder_path)
        .ok_or_else(|| MegaError::DestinationNotFound(folder_path.clone()))?;

    match folder.node_type {
        NodeType::File => return Err(MegaError::NotAFolder(folder_path)),
        NodeType::Top | NodeType::Network => {
            return Err(MegaError::NotWritable(folder.display_path().to_string()))
        }
        // A contact receives the copies in its inbox.
        NodeType::Folder
        | NodeType::Root
        | NodeType::Inbox
        | NodeType::Trash
        | NodeType::Contact => {}
    }

    if name.as_deref() == Some("") {
        return Err(MegaError::NameUndetermined(dest_path.to_string()));
    }

    Ok(Destination {
        folder_path,
        folder,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::CopyOptions;
    use crate::fs::testing::TreeBuilder;

    fn invocation(args: &[&str], opts: &CopyOptions) -> Invocation {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        Invocation::parse(&args, opts).unwrap()
    }

    fn fixture() -> Filesystem {
        let mut tree = TreeBuilder::new();
        tree.file(TreeBuilder::ROOT, "file");
        let folder = tree.folder(TreeBuilder::ROOT, "folder");
        tree.file(&folder, "inner");
        tree.build()
    }

    #[test]
    fn test_existing_folder_is_used_as_is() {
        let fs = fixture();
        let inv = invocation(&["/Root/file", "/Root/folder"], &CopyOptions::default());
        let dest = resolve_destination(&fs, &inv).unwrap();
        assert_eq!(dest.folder.path(), Some("/Root/folder"));
        assert!(!dest.is_rename());
        let file = fs.resolve("/Root/file").unwrap();
        assert_eq!(dest.effective_name(file), "file");
    }

    #[test]
    fn test_missing_destination_becomes_rename() {
        let fs = fixture();
        let inv = invocation(&["/Root/file", "/Root/file-copy"], &CopyOptions::default());
        let dest = resolve_destination(&fs, &inv).unwrap();
        assert_eq!(dest.folder.path(), Some("/Root"));
        assert_eq!(dest.name.as_deref(), Some("file-copy"));
    }

    #[test]
    fn test_existing_file_destination_becomes_rename() {
        let fs = fixture();
        let inv = invocation(&["/Root/folder/inner", "/Root/file"], &CopyOptions::default());
        let dest = resolve_destination(&fs, &inv).unwrap();
        assert_eq!(dest.folder.path(), Some("/Root"));
        assert_eq!(dest.name.as_deref(), Some("file"));
    }

    #[test]
    fn test_no_target_folder_forces_rename() {
        let fs = fixture();
        let opts = CopyOptions {
            no_target_folder: true,
            ..CopyOptions::default()
        };
        let inv = invocation(&["/Root/file", "/Root/folder"], &opts);
        let dest = resolve_destination(&fs, &inv).unwrap();
        assert_eq!(dest.folder.path(), Some("/Root"));
        assert_eq!(dest.name.as_deref(), Some("folder"));

        let inv = invocation(&["/Root/file", "/"], &opts);
        assert!(matches!(
            resolve_destination(&fs, &inv),
            Err(MegaError::InvalidDestination(_))
        ));

        let inv = invocation(&["/Root/file", "/Root/folder/"], &opts);
        assert!(matches!(
            resolve_destination(&fs, &inv),
            Err(MegaError::NameUndetermined(_))
        ));
    }

    #[test]
    fn test_target_folder_must_exist() {
        let fs = fixture();
        let opts = CopyOptions {
            target_folder: Some("/Root/nope".into()),
            ..CopyOptions::default()
        };
        let inv = invocation(&["/Root/file"], &opts);
        let err = resolve_destination(&fs, &inv).unwrap_err();
        assert_eq!(err.to_string(), "Destination folder not found /Root/nope");
    }

    #[test]
    fn test_many_sources_need_a_folder() {
        let fs = fixture();
        let opts = CopyOptions::default();

        let inv = invocation(&["/Root/file", "/Root/folder/inner", "/Root/missing"], &opts);
        assert!(matches!(
            resolve_destination(&fs, &inv),
            Err(MegaError::DestinationNotFound(_))
        ));

        let inv = invocation(&["/Root/folder", "/Root/folder/inner", "/Root/file"], &opts);
        assert!(matches!(
            resolve_destination(&fs, &inv),
            Err(MegaError::NotAFolder(_))
        ));
    }

    #[test]
    fn test_virtual_roots_are_not_writable() {
        let fs = fixture();
        for target in ["/", "/Contacts"] {
            let opts = CopyOptions {
                target_folder: Some(target.into()),
                ..CopyOptions::default()
            };
            let inv = invocation(&["/Root/file"], &opts);
            assert!(matches!(
                resolve_destination(&fs, &inv),
                Err(MegaError::NotWritable(_))
            ));
        }

        // "/Root" renamed would land directly under "/".
        let opts = CopyOptions {
            no_target_folder: true,
            ..CopyOptions::default()
        };
        let inv = invocation(&["/Root/file", "/Root"], &opts);
        assert!(matches!(
            resolve_destination(&fs, &inv),
            Err(MegaError::NotWritable(_))
        ));
    }

    #[test]
    fn test_account_roots_are_writable() {
        let fs = fixture();
        let opts = CopyOptions {
            target_folder: Some("/Trash".into()),
            ..CopyOptions::default()
        };
        let inv = invocation(&["/Root/file"], &opts);
        let dest = resolve_destination(&fs, &inv).unwrap();
        assert_eq!(dest.folder.node_type, NodeType::Trash);
    }

    #[test]
    fn test_contact_is_writable() {
        let mut tree = TreeBuilder::new();
        tree.file(TreeBuilder::ROOT, "file");
        let bob = tree.contact("bob@example.com");
        let fs = tree.build();

        let opts = CopyOptions {
            target_folder: Some("/Contacts/bob@example.com".into()),
            ..CopyOptions::default()
        };
        let inv = invocation(&["/Root/file"], &opts);
        let dest = resolve_destination(&fs, &inv).unwrap();
        assert_eq!(dest.folder.handle, bob);
        assert_eq!(dest.folder.node_type, NodeType::Contact);
        assert!(!dest.is_rename());
    }
}
