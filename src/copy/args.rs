//! Command line shape checks, done before touching the filesystem.

use crate::error::{MegaError, Result};

use super::CopyOptions;

/// How the destination argument is to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationMode {
    /// `-t <folder>`: the destination is an existing folder.
    TargetFolder,
    /// `-T`: the destination is a folder path plus a new name.
    NoTargetFolder,
    /// Decided from the argument count and what the destination resolves to.
    Auto {
        /// More than one source was given.
        many_sources: bool,
    },
}

/// Positional arguments split into sources and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub sources: Vec<String>,
    pub destination: String,
    pub mode: DestinationMode,
}

impl Invocation {
    /// Split `args` according to the `-t`/`-T` flags.
    ///
    /// # Errors
    /// [`MegaError::InvalidArguments`] when the flags conflict or the
    /// argument count doesn't fit the selected form.
    pub fn parse(args: &[String], opts: &CopyOptions) -> Result<Self> {
        let nargs = args.len();

        match (&opts.target_folder, opts.no_target_folder) {
            (Some(_), true) => Err(MegaError::InvalidArguments(
                "Options -t <folder> and -T are not compatible".to_string(),
            )),
            (Some(folder), false) => {
                if nargs < 1 {
                    return Err(MegaError::InvalidArguments(
                        "When -t <folder> is used you must pass <sources>...".to_string(),
                    ));
                }
                Ok(Self {
                    sources: args.to_vec(),
                    destination: folder.clone(),
                    mode: DestinationMode::TargetFolder,
                })
            }
            (None, true) => {
                if nargs != 2 {
                    return Err(MegaError::InvalidArguments(
                        "Option -T requires exactly two arguments: <source> <destination>"
                            .to_string(),
                    ));
                }
                Ok(Self {
                    sources: vec![args[0].clone()],
                    destination: args[1].clone(),
                    mode: DestinationMode::NoTargetFolder,
                })
            }
            (None, false) => {
                if nargs < 1 {
                    return Err(MegaError::InvalidArguments(
                        "You need to specify files and folders to copy".to_string(),
                    ));
                }
                if nargs < 2 {
                    return Err(MegaError::InvalidArguments(
                        "You need to specify destination path".to_string(),
                    ));
                }
                Ok(Self {
                    sources: args[..nargs - 1].to_vec(),
                    destination: args[nargs - 1].clone(),
                    mode: DestinationMode::Auto {
                        many_sources: nargs > 2,
                    },
                })
            }
        }
    }
}
