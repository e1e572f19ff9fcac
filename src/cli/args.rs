//! Command line argument parsing and validation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bind several files into one executable that opens them all
#[derive(Parser, Debug)]
#[command(
    name = "file_binder",
    version,
    about = "Bind several files into one executable that opens them all",
    long_about = "Bundles the given files into a single self-extracting executable.

Running the produced executable opens every bundled file with its default
application. The executable is built by an external packaging tool
(PyInstaller by default), which must be installed.

Usage:
  file_binder bind report.pdf notes.txt --output bundle.exe
  file_binder bind a.txt b.png --icon icons/star.ico --output star.exe
  file_binder icons ./icons
  file_binder check

Exit code 0 = executable guaranteed to exist at the output path."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: <config dir>/file_binder/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Packaging tool program name or path
    #[arg(long, global = true, env = "FILE_BINDER_PACKAGER", value_name = "PROGRAM")]
    pub packager: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bind files into one executable
    Bind(BindArgs),

    /// List .ico files available in an icon directory
    Icons {
        /// Directory to search (default: icons.directory from config, else ./icons)
        dir: Option<PathBuf>,
    },

    /// Check that the packaging tool is installed
    Check,
}

#[derive(clap::Args, Debug)]
pub struct BindArgs {
    /// Files to bundle, opened in this order
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Where the executable is written; an existing file is replaced
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Icon (.ico, or .icns on macOS) for the executable
    #[arg(short, long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) {
        self.output.warn(message)
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        self.output.error(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) {
        self.output.progress(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        self.output.indent(message)
    }
}
