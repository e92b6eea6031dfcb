//! Display row projections of a hunk.
//!
//! [`align_for_split`] lays a hunk out for side-by-side viewing. A run of
//! deletions directly followed by a run of additions is treated as one
//! modification block and zipped positionally: row `j` holds the `j`-th
//! deletion on the left and the `j`-th addition on the right, and the shorter
//! run leaves its side empty. No content comparison takes place, so every
//! line of the hunk lands in exactly one row.
//!
//! Rows borrow from the hunk and are meant to be built per render pass.

use crate::model::{DiffLine, Hunk, LineKind};

/// What a split row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Unchanged line, same record on both sides.
    Context,
    /// A deletion paired with the addition that replaced it.
    PairedChange,
    /// Deletion with nothing on the new side.
    DeleteOnly,
    /// Addition with nothing on the old side.
    AddOnly,
}

/// One row of the split (side-by-side) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRow<'a> {
    /// The hunk header, shown across both columns.
    Header(&'a str),
    Line {
        kind: RowKind,
        old: Option<&'a DiffLine>,
        new: Option<&'a DiffLine>,
    },
}

impl<'a> SplitRow<'a> {
    fn context(line: &'a DiffLine) -> Self {
        SplitRow::Line {
            kind: RowKind::Context,
            old: Some(line),
            new: Some(line),
        }
    }

    /// Row of a modification block. At least one side is present.
    fn change(old: Option<&'a DiffLine>, new: Option<&'a DiffLine>) -> Self {
        let kind = match (old, new) {
            (Some(_), Some(_)) => RowKind::PairedChange,
            (Some(_), None) => RowKind::DeleteOnly,
            _ => RowKind::AddOnly,
        };
        SplitRow::Line { kind, old, new }
    }

    /// Row kind, `None` for the header row.
    pub fn kind(&self) -> Option<RowKind> {
        match self {
            SplitRow::Header(_) => None,
            SplitRow::Line { kind, .. } => Some(*kind),
        }
    }

    /// Old-side (left) record.
    pub fn old_line(&self) -> Option<&'a DiffLine> {
        match self {
            SplitRow::Header(_) => None,
            SplitRow::Line { old, .. } => *old,
        }
    }

    /// New-side (right) record.
    pub fn new_line(&self) -> Option<&'a DiffLine> {
        match self {
            SplitRow::Header(_) => None,
            SplitRow::Line { new, .. } => *new,
        }
    }
}

/// Lay out a hunk for split view: the header row followed by the body rows.
///
/// Single pass, linear in the number of lines.
pub fn align_for_split(hunk: &Hunk) -> Vec<SplitRow<'_>> {
    let lines = &hunk.lines;
    let mut rows = Vec::with_capacity(lines.len() + 1);
    rows.push(SplitRow::Header(&hunk.header));

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        match line.kind {
            LineKind::Context => {
                rows.push(SplitRow::context(line));
                i += 1;
            }
            LineKind::Add => {
                rows.push(SplitRow::change(None, Some(line)));
                i += 1;
            }
            LineKind::Delete => {
                let deletes_end = run_end(lines, i, LineKind::Delete);
                let adds_end = run_end(lines, deletes_end, LineKind::Add);
                let deletes = &lines[i..deletes_end];
                let adds = &lines[deletes_end..adds_end];

                for j in 0..deletes.len().max(adds.len()) {
                    rows.push(SplitRow::change(deletes.get(j), adds.get(j)));
                }
                i = adds_end;
            }
        }
    }

    rows
}

/// End index (exclusive) of the run of `kind` lines starting at `start`.
fn run_end(lines: &[DiffLine], start: usize, kind: LineKind) -> usize {
    lines[start..]
        .iter()
        .position(|l| l.kind != kind)
        .map_or(lines.len(), |offset| start + offset)
}

/// One row of the unified (single column) view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnifiedRow<'a> {
    Header(&'a str),
    Line(&'a DiffLine),
}

/// Lay out a hunk for unified view: the header row, then one row per line.
pub fn unified_rows(hunk: &Hunk) -> Vec<UnifiedRow<'_>> {
    std::iter::once(UnifiedRow::Header(hunk.header.as_str()))
        .chain(hunk.lines.iter().map(UnifiedRow::Line))
        .collect()
}
