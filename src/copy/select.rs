//! Source selection and conflict filtering.

use tracing::warn;

use crate::error::{MegaError, Result};
use crate::fs::{Filesystem, Node, NodeType};

use super::resolve::Destination;
use super::CopyOptions;

/// Sources that survived filtering, plus the destination files they replace.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub sources: Vec<&'a Node>,
    /// Existing files to delete once the copy went through.
    pub overwritten: Vec<&'a Node>,
}

/// Keep the candidates that can be copied into `dest`.
///
/// Unusable sources are skipped with a warning. Only `-f` lets a source
/// replace an existing file; folders are never replaced.
///
/// # Errors
/// [`MegaError::NothingToDo`] when no candidate survives.
pub fn select_sources<'a>(
    fs: &'a Filesystem,
    dest: &Destination<'a>,
    candidates: Vec<&'a Node>,
    opts: &CopyOptions,
) -> Result<Selection<'a>> {
    let mut sources = Vec::new();
    let mut overwritten: Vec<&'a Node> = Vec::new();

    for node in candidates {
        let path = node.display_path();

        match node.node_type {
            NodeType::File => {}
            NodeType::Folder if opts.recursive => {}
            NodeType::Folder => {
                warn!(
                    "Folder {} can't be copied in non-recursive mode, skipping",
                    path
                );
                continue;
            }
            NodeType::Top
            | NodeType::Root
            | NodeType::Inbox
            | NodeType::Trash
            | NodeType::Contact
            | NodeType::Network => {
                warn!("Special folder {} can't be copied, skipping", path);
                continue;
            }
        }

        if let Some(existing) = fs.child_by_name(dest.folder, dest.effective_name(node)) {
            if existing.handle == node.handle {
                warn!("Self-copy detected at {}, skipping", path);
                continue;
            }

            match existing.node_type {
                NodeType::File if opts.force => {
                    if !overwritten.iter().any(|n| n.handle == existing.handle) {
                        overwritten.push(existing);
                    }
                }
                NodeType::File => {
                    warn!(
                        "File already exists at {}, skipping",
                        existing.display_path()
                    );
                    continue;
                }
                _ => {
                    warn!(
                        "Folder already exists at {}, skipping",
                        existing.display_path()
                    );
                    continue;
                }
            }
        }

        sources.push(node);
    }

    if sources.is_empty() {
        return Err(MegaError::NothingToDo);
    }

    Ok(Selection {
        sources,
        overwritten,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::args::Invocation;
    use crate::copy::resolve::resolve_destination;
    use crate::fs::testing::TreeBuilder;

    struct Fixture {
        fs: Filesystem,
        file: String,
        folder: String,
        dest_file: String,
    }

    fn fixture() -> Fixture {
        let mut tree = TreeBuilder::new();
        let file = tree.file(TreeBuilder::ROOT, "file");
        let folder = tree.folder(TreeBuilder::ROOT, "folder");
        tree.file(&folder, "child");
        let dest = tree.folder(TreeBuilder::ROOT, "dest");
        let dest_file = tree.file(&dest, "file");
        tree.folder(&dest, "folder");
        Fixture {
            fs: tree.build(),
            file,
            folder,
            dest_file,
        }
    }

    fn select<'a>(
        fs: &'a Filesystem,
        args: &[&str],
        opts: &CopyOptions,
    ) -> Result<Selection<'a>> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let inv = Invocation::parse(&args, opts)?;
        let dest = resolve_destination(fs, &inv)?;
        let candidates = fs.resolve_paths(&inv.sources);
        select_sources(fs, &dest, candidates, opts)
    }

    #[test]
    fn test_plain_file_is_accepted() {
        let f = fixture();
        let sel = select(&f.fs, &["/Root/file", "/Root/copy"], &CopyOptions::default()).unwrap();
        assert_eq!(sel.sources.len(), 1);
        assert_eq!(sel.sources[0].handle, f.file);
        assert!(sel.overwritten.is_empty());
    }

    #[test]
    fn test_folder_needs_recursive() {
        let f = fixture();
        let err = select(&f.fs, &["/Root/folder", "/Root/copy"], &CopyOptions::default())
            .unwrap_err();
        assert!(err.is_nop());

        let opts = CopyOptions {
            recursive: true,
            ..CopyOptions::default()
        };
        let sel = select(&f.fs, &["/Root/folder", "/Root/copy"], &opts).unwrap();
        assert_eq!(sel.sources[0].handle, f.folder);
    }

    #[test]
    fn test_special_nodes_are_skipped() {
        let f = fixture();
        let opts = CopyOptions {
            recursive: true,
            target_folder: Some("/Root/dest".into()),
            ..CopyOptions::default()
        };
        let err = select(&f.fs, &["/Trash", "/Contacts", "/"], &opts).unwrap_err();
        assert!(matches!(err, MegaError::NothingToDo));
    }

    #[test]
    fn test_self_copy_is_skipped() {
        let f = fixture();
        let opts = CopyOptions {
            force: true,
            target_folder: Some("/Root".into()),
            ..CopyOptions::default()
        };
        let err = select(&f.fs, &["/Root/file"], &opts).unwrap_err();
        assert!(err.is_nop());
    }

    #[test]
    fn test_existing_file_needs_force() {
        let f = fixture();
        let err = select(&f.fs, &["/Root/file", "/Root/dest"], &CopyOptions::default())
            .unwrap_err();
        assert!(err.is_nop());

        let opts = CopyOptions {
            force: true,
            ..CopyOptions::default()
        };
        let sel = select(&f.fs, &["/Root/file", "/Root/dest"], &opts).unwrap();
        assert_eq!(sel.sources[0].handle, f.file);
        assert_eq!(sel.overwritten.len(), 1);
        assert_eq!(sel.overwritten[0].handle, f.dest_file);
    }

    #[test]
    fn test_folders_are_never_overwritten() {
        let f = fixture();
        let opts = CopyOptions {
            force: true,
            recursive: true,
            ..CopyOptions::default()
        };
        let err = select(&f.fs, &["/Root/folder", "/Root/dest"], &opts).unwrap_err();
        assert!(err.is_nop());

        // An existing folder as destination receives the file instead.
        let sel = select(&f.fs, &["/Root/file", "/Root/dest/folder/"], &opts).unwrap();
        assert_eq!(sel.sources[0].handle, f.file);

        // A file can't replace a folder either.
        let opts = CopyOptions {
            force: true,
            no_target_folder: true,
            ..CopyOptions::default()
        };
        let err = select(&f.fs, &["/Root/file", "/Root/dest/folder"], &opts).unwrap_err();
        assert!(err.is_nop());
    }

    #[test]
    fn test_partial_selection_keeps_valid_sources() {
        let f = fixture();
        let opts = CopyOptions {
            target_folder: Some("/Root/dest".into()),
            ..CopyOptions::default()
        };
        // "file" collides, "folder" needs -r, "child" is fine.
        let sel = select(
            &f.fs,
            &["/Root/file", "/Root/folder", "/Root/folder/child", "/Root/missing"],
            &opts,
        )
        .unwrap();
        let names: Vec<&str> = sel.sources.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["child"]);
    }
}
