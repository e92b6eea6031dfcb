//! # ghdiff-core
//!
//! Turns unified diff text into a structured model and lays that model out
//! for side-by-side viewing.
//!
//! ## Design Principles
//!
//! Everything in this crate is a pure function over its input: nothing here
//! spawns processes, touches the filesystem or logs. Getting diff text and
//! drawing it on screen belong to the caller.
//!
//! - [`parse_unified_diff`] consumes `git diff` style output and produces a
//!   [`DiffResult`].
//! - [`align_for_split`] projects one [`Hunk`] into rows that pair deleted
//!   lines with the added lines that replaced them.
//! - [`unified_rows`] is the trivial one-row-per-line projection.
//!
//! ## Usage
//!
//! ```rust
//! use ghdiff_core::{RowKind, SplitRow, align_for_split, parse_unified_diff};
//!
//! let text = "\
//! diff --git a/hello.txt b/hello.txt
//! --- a/hello.txt
//! +++ b/hello.txt
//! @@ -1 +1,2 @@
//! -hello
//! +hello, world
//! +goodbye
//! ";
//!
//! let diff = parse_unified_diff(text)?;
//! let rows = align_for_split(&diff.files[0].hunks[0]);
//!
//! assert_eq!(rows.len(), 3); // header + two body rows
//! assert_eq!(rows[1].kind(), Some(RowKind::PairedChange));
//! assert_eq!(rows[2].kind(), Some(RowKind::AddOnly));
//! assert!(matches!(rows[0], SplitRow::Header(_)));
//! # Ok::<(), ghdiff_core::ParseError>(())
//! ```

pub mod align;
pub mod model;
pub mod parser;

pub use align::{RowKind, SplitRow, UnifiedRow, align_for_split, unified_rows};
pub use model::{DEV_NULL, DiffLine, DiffResult, FileEntry, FileStatus, Hunk, LineKind};
pub use parser::{ParseError, parse_unified_diff};
