//! Example: Copy files and folders within a MEGA account
//!
//! Usage:
//!   cargo run --example cp -- --session SID --master-key KEY --user-handle HANDLE [--proxy PROXY] \
//!       [-r] [-f] [-T] SOURCE DEST
//!   cargo run --example cp -- ... [-r] [-f] SOURCE... FOLDER
//!   cargo run --example cp -- ... [-r] [-f] -t FOLDER SOURCE...
//!
//! Exit status: 0 on success, 3 when there was nothing to copy, 2 on bad
//! arguments, 1 on any other failure. Set `RUST_LOG=megacp=debug` to list
//! every copied node.

mod cli;

use std::process;

use cli::{session_from_parser, ArgParser};
use megacp::copy::Invocation;
use megacp::{CleanupStatus, CopyOptions, ErrorCategory, MegaError};
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "Usage: cargo run --example cp -- --session SID --master-key KEY --user-handle HANDLE [--proxy PROXY] [-r] [-f] [-t FOLDER | -T] SOURCE... [DEST]";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("megacp=info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn exit_code(err: &MegaError) -> i32 {
    match err.category() {
        ErrorCategory::Nop => 3,
        ErrorCategory::Args => 2,
        ErrorCategory::Err => 1,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let mut parser = ArgParser::new(USAGE);
    let session_args = session_from_parser(&mut parser, USAGE);
    let opts = CopyOptions {
        target_folder: parser.take_value(&["-t", "--target-folder", "--target-directory"]),
        no_target_folder: parser.take_flag(&["-T", "--no-target-folder", "--no-target-directory"]),
        recursive: parser.take_flag(&["-r", "-R", "--recursive"]),
        force: parser.take_flag(&["-f", "--force"]),
    };
    let args = parser.remaining();

    let result = async {
        // Catch argument mistakes before fetching the tree.
        Invocation::parse(&args, &opts)?;
        let mut session = session_args.open()?;
        session.refresh().await?;
        session.cp(&args, &opts).await
    }
    .await;

    match result {
        Ok(report) => {
            for copied in &report.copied {
                println!("{} -> {}", copied.source_path, copied.dest_path);
            }
            if report.cleanup == CleanupStatus::Failed {
                eprintln!(
                    "Copied, but {} overwritten files could not be removed",
                    report.removed.len()
                );
            }
        }
        Err(e) => {
            eprintln!("{}: {}", e.category(), e);
            process::exit(exit_code(&e));
        }
    }
}
