//! Data models for diff representation.

mod diff;

pub use diff::{DEV_NULL, DiffLine, DiffResult, FileEntry, FileStatus, Hunk, LineKind};
