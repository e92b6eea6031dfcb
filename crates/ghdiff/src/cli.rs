//! Command line arguments and how they map onto a diff target.

use clap::{ArgAction, Parser};
use ghdiff_config::app_config::MIN_COLUMN_WIDTH;
use ghdiff_config::{AppConfig, OutputFormat, ViewMode};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Arguments:
  (none)         diff working tree against merge-base with main/master
  .              diff working tree against HEAD
  <commit>       diff the working tree against <commit>
  <ref1> <ref2>  diff between two refs
  -              read unified diff from stdin";

#[derive(Debug, Parser)]
#[command(
    name = "ghdiff",
    version,
    about = "Display git diffs in a GitHub-style split or unified view",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// Base ref, `.` for HEAD, or `-` to read a diff from stdin
    pub base: Option<String>,

    /// Target ref to compare the base against
    pub target: Option<String>,

    /// View mode: split or unified
    #[arg(long, value_name = "MODE")]
    pub mode: Option<ViewMode>,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Column width for split view
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Repository to run git in
    #[arg(short = 'C', long = "repo", value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,

    /// Config file to use instead of the default lookup
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Where the diff text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffTarget {
    /// Working tree against the merge-base of HEAD and the main branch
    MergeBase,
    /// Unified diff piped on stdin
    Stdin,
    /// Working tree against HEAD
    WorkingTree,
    /// Working tree against the given ref
    Commit(String),
    /// First ref against second ref
    Compare(String, String),
}

/// Output settings after merging config file values with flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub mode: ViewMode,
    pub format: OutputFormat,
    pub width: usize,
}

impl Cli {
    pub fn diff_target(&self) -> DiffTarget {
        match (self.base.as_deref(), self.target.as_deref()) {
            (None, _) => DiffTarget::MergeBase,
            (Some(base), Some(target)) => DiffTarget::Compare(base.to_string(), target.to_string()),
            (Some("-"), None) => DiffTarget::Stdin,
            (Some("."), None) => DiffTarget::WorkingTree,
            (Some(base), None) => DiffTarget::Commit(base.to_string()),
        }
    }

    /// Flags win over config values.
    pub fn settings(&self, config: &AppConfig) -> Settings {
        Settings {
            mode: self.mode.unwrap_or(config.view_mode),
            format: self.format.unwrap_or(config.format),
            width: self
                .width
                .unwrap_or(config.column_width)
                .max(MIN_COLUMN_WIDTH),
        }
    }
}
