//! Diff data structures produced by the unified diff parser.
//!
//! Field names serialize in camelCase (`oldName`, `isBinary`, `oldNum`, ...)
//! because the JSON shape is consumed by rendering frontends.

use serde::{Deserialize, Serialize};

/// Path marker for the side of a diff where the file does not exist.
pub const DEV_NULL: &str = "/dev/null";

/// All files of one unified diff, in the order they appear in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub files: Vec<FileEntry>,
}

impl DiffResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total (additions, deletions) across all files.
    pub fn totals(&self) -> (usize, usize) {
        self.files.iter().fold((0, 0), |(adds, dels), file| {
            (adds + file.additions(), dels + file.deletions())
        })
    }
}

/// A single file's diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Path before the change, or [`DEV_NULL`] for added files.
    pub old_name: String,
    /// Path after the change, or [`DEV_NULL`] for deleted files.
    pub new_name: String,
    pub status: FileStatus,
    /// Set when git reported "Binary files ... differ" instead of hunks.
    pub is_binary: bool,
    /// Change hunks. Empty for binary files and pure renames.
    pub hunks: Vec<Hunk>,
}

impl FileEntry {
    /// Create a modified, non-binary file entry without hunks.
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
            status: FileStatus::Modified,
            is_binary: false,
            hunks: Vec::new(),
        }
    }

    /// Name to show for this file (handles renames, additions and deletions).
    pub fn display_name(&self) -> String {
        match self.status {
            FileStatus::Renamed if self.old_name != self.new_name => {
                format!("{} → {}", self.old_name, self.new_name)
            }
            FileStatus::Deleted => self.old_name.clone(),
            _ => self.new_name.clone(),
        }
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.hunks.iter().map(Hunk::additions).sum()
    }

    /// Number of deleted lines.
    pub fn deletions(&self) -> usize {
        self.hunks.iter().map(Hunk::deletions).sum()
    }
}

/// File status in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl FileStatus {
    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Deleted => 'D',
            FileStatus::Modified => 'M',
            FileStatus::Renamed => 'R',
        }
    }

    /// Derive the status from the two sides of a file header.
    pub fn from_names(old_name: &str, new_name: &str) -> Self {
        if old_name == DEV_NULL {
            FileStatus::Added
        } else if new_name == DEV_NULL {
            FileStatus::Deleted
        } else {
            FileStatus::Modified
        }
    }
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version (1 when the header omits it).
    pub old_lines: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version (1 when the header omits it).
    pub new_lines: u32,
    /// Header line as written, e.g. `@@ -10,5 +10,7 @@ fn example()`.
    pub header: String,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create an empty hunk with the given header info.
    pub fn new(
        old_start: u32,
        old_lines: u32,
        new_start: u32,
        new_lines: u32,
        header: impl Into<String>,
    ) -> Self {
        Self {
            old_start,
            old_lines,
            new_start,
            new_lines,
            header: header.into(),
            lines: Vec::new(),
        }
    }

    pub fn additions(&self) -> usize {
        self.count(LineKind::Add)
    }

    pub fn deletions(&self) -> usize {
        self.count(LineKind::Delete)
    }

    /// Old-side and new-side line counts of the parsed body.
    pub fn body_line_counts(&self) -> (usize, usize) {
        let context = self.count(LineKind::Context);
        (context + self.deletions(), context + self.additions())
    }

    /// Whether the body covers exactly the line counts announced by the header.
    ///
    /// The body can fall short (parsing stopped on malformed input) or run
    /// past the header when the header counts are wrong.
    pub fn is_well_formed(&self) -> bool {
        self.body_line_counts() == (self.old_lines as usize, self.new_lines as usize)
    }

    fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Delete).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_num: Option<u32>,
    /// Line number in new file (for Context and Add).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_num: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_num: u32, new_num: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_num: Some(old_num),
            new_num: Some(new_num),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_num: u32) -> Self {
        Self {
            kind: LineKind::Add,
            content: content.into(),
            old_num: None,
            new_num: Some(new_num),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_num: u32) -> Self {
        Self {
            kind: LineKind::Delete,
            content: content.into(),
            old_num: Some(old_num),
            new_num: None,
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Add,
    /// Removed line (-).
    Delete,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Add => '+',
            LineKind::Delete => '-',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_name() {
        let mut file = FileEntry::new("src/old.rs", "src/new.rs");
        file.status = FileStatus::Renamed;
        assert_eq!(file.display_name(), "src/old.rs → src/new.rs");

        // Same path shouldn't show arrow
        let mut file = FileEntry::new("src/new.rs", "src/new.rs");
        file.status = FileStatus::Renamed;
        assert_eq!(file.display_name(), "src/new.rs");

        let mut file = FileEntry::new("gone.rs", DEV_NULL);
        file.status = FileStatus::Deleted;
        assert_eq!(file.display_name(), "gone.rs");

        let mut file = FileEntry::new(DEV_NULL, "fresh.rs");
        file.status = FileStatus::Added;
        assert_eq!(file.display_name(), "fresh.rs");
    }

    #[test]
    fn test_status_from_names() {
        assert_eq!(FileStatus::from_names(DEV_NULL, "a.txt"), FileStatus::Added);
        assert_eq!(FileStatus::from_names("a.txt", DEV_NULL), FileStatus::Deleted);
        assert_eq!(FileStatus::from_names("a.txt", "a.txt"), FileStatus::Modified);
    }

    #[test]
    fn test_diff_line_kinds() {
        let ctx = DiffLine::context("unchanged", 5, 5);
        assert_eq!(ctx.kind, LineKind::Context);
        assert_eq!(ctx.old_num, Some(5));
        assert_eq!(ctx.new_num, Some(5));

        let add = DiffLine::addition("new line", 10);
        assert_eq!(add.kind, LineKind::Add);
        assert_eq!(add.old_num, None);
        assert_eq!(add.new_num, Some(10));

        let del = DiffLine::deletion("removed line", 8);
        assert_eq!(del.kind, LineKind::Delete);
        assert_eq!(del.old_num, Some(8));
        assert_eq!(del.new_num, None);
    }

    #[test]
    fn test_hunk_stats_and_shape() {
        let mut hunk = Hunk::new(1, 2, 1, 3, "@@ -1,2 +1,3 @@");
        hunk.lines.push(DiffLine::context("a", 1, 1));
        hunk.lines.push(DiffLine::deletion("b", 2));
        hunk.lines.push(DiffLine::addition("c", 2));
        assert_eq!(hunk.additions(), 1);
        assert_eq!(hunk.deletions(), 1);
        assert!(!hunk.is_well_formed());

        hunk.lines.push(DiffLine::addition("d", 3));
        assert!(hunk.is_well_formed());
        assert_eq!(hunk.body_line_counts(), (2, 3));

        // a body longer than its header is not well formed either
        hunk.lines.push(DiffLine::context("e", 3, 4));
        assert_eq!(hunk.body_line_counts(), (3, 4));
        assert!(!hunk.is_well_formed());
    }

    #[test]
    fn test_totals() {
        let mut hunk = Hunk::new(1, 1, 1, 2, "@@ -1 +1,2 @@");
        hunk.lines.push(DiffLine::deletion("x", 1));
        hunk.lines.push(DiffLine::addition("y", 1));
        hunk.lines.push(DiffLine::addition("z", 2));
        let mut file = FileEntry::new("f", "f");
        file.hunks.push(hunk);

        let mut result = DiffResult::new();
        assert_eq!(result.totals(), (0, 0));
        result.files.push(file.clone());
        result.files.push(file);
        assert_eq!(result.totals(), (4, 2));
    }

    #[test]
    fn test_json_field_names() {
        let mut file = FileEntry::new(DEV_NULL, "new.txt");
        file.status = FileStatus::Added;
        let mut hunk = Hunk::new(0, 0, 1, 1, "@@ -0,0 +1 @@");
        hunk.lines.push(DiffLine::addition("hello", 1));
        file.hunks.push(hunk);

        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "oldName": "/dev/null",
                "newName": "new.txt",
                "status": "added",
                "isBinary": false,
                "hunks": [{
                    "oldStart": 0,
                    "oldLines": 0,
                    "newStart": 1,
                    "newLines": 1,
                    "header": "@@ -0,0 +1 @@",
                    "lines": [{ "type": "add", "content": "hello", "newNum": 1 }]
                }]
            })
        );
    }
}
