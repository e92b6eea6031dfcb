//! Parse unified diff format (as produced by `git diff`).

use crate::model::{DEV_NULL, DiffLine, DiffResult, FileEntry, FileStatus, Hunk};
use regex::{Captures, Regex};
use std::num::ParseIntError;
use std::sync::OnceLock;
use thiserror::Error;

const DIFF_PREFIX: &str = "diff --git ";
const HUNK_PREFIX: &str = "@@ ";
const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Errors that can occur during diff parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A number in a hunk header does not fit the line number type.
    #[error("Invalid {field} in hunk header {header:?}: {source}")]
    InvalidHunkNumber {
        field: &'static str,
        header: String,
        #[source]
        source: ParseIntError,
    },
}

fn diff_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^diff --git a/(.+) b/(.+)$").expect("valid diff header regex"))
}

fn hunk_header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // @@ -old_start[,old_lines] +new_start[,new_lines] @@[ function context]
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(.*)$")
            .expect("valid hunk header regex")
    })
}

fn binary_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Binary files (.+) and (.+) differ$").expect("valid binary marker regex")
    })
}

/// Parse a unified diff string into a structured [`DiffResult`].
///
/// Empty input yields an empty result. Text outside of a `diff --git` block
/// is ignored, and a hunk body ends quietly at the first blank line or line
/// with an unknown prefix. The only hard failure is a hunk header number
/// that cannot be represented, which aborts the whole parse.
///
/// # Example
/// ```
/// # use ghdiff_core::parse_unified_diff;
/// let diff = parse_unified_diff("diff --git a/x b/x\nBinary files a/x and b/x differ\n")?;
/// assert!(diff.files[0].is_binary);
/// # Ok::<(), ghdiff_core::ParseError>(())
/// ```
pub fn parse_unified_diff(input: &str) -> Result<DiffResult, ParseError> {
    let mut result = DiffResult::new();
    if input.is_empty() {
        return Ok(result);
    }

    let mut cursor = LineCursor::new(input);
    while let Some(line) = cursor.peek() {
        let Some(caps) = diff_header_regex().captures(line) else {
            // Preamble or a header we do not understand
            cursor.advance();
            continue;
        };
        cursor.advance();

        let mut file = FileBuilder::new(&caps[1], &caps[2]);
        cursor.parse_extended_headers(&mut file);
        if file.is_binary {
            cursor.skip_to_next_file();
        } else {
            cursor.parse_hunks(&mut file)?;
        }
        result.files.push(file.finish());
    }

    Ok(result)
}

/// A file entry under construction. The status stays unset until some
/// header line determines it.
struct FileBuilder {
    old_name: String,
    new_name: String,
    status: Option<FileStatus>,
    is_binary: bool,
    hunks: Vec<Hunk>,
}

impl FileBuilder {
    fn new(old_name: &str, new_name: &str) -> Self {
        Self {
            old_name: old_name.to_string(),
            new_name: new_name.to_string(),
            status: None,
            is_binary: false,
            hunks: Vec::new(),
        }
    }

    fn finish(self) -> FileEntry {
        let mut entry = FileEntry::new(self.old_name, self.new_name);
        if let Some(status) = self.status {
            entry.status = status;
        }
        entry.is_binary = self.is_binary;
        entry.hunks = self.hunks;
        entry
    }
}

/// Forward-only cursor over the input lines.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.split('\n').collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Consume `rename`, `Binary files` and `---`/`+++` lines up to the first hunk.
    fn parse_extended_headers(&mut self, file: &mut FileBuilder) {
        while let Some(line) = self.peek() {
            if line.starts_with(DIFF_PREFIX) || line.starts_with(HUNK_PREFIX) {
                return;
            }

            if let Some(path) = line.strip_prefix("rename from ").filter(|p| !p.is_empty()) {
                file.old_name = path.to_string();
                file.status = Some(FileStatus::Renamed);
                self.advance();
                continue;
            }
            if let Some(path) = line.strip_prefix("rename to ").filter(|p| !p.is_empty()) {
                file.new_name = path.to_string();
                file.status = Some(FileStatus::Renamed);
                self.advance();
                continue;
            }

            if let Some(caps) = binary_regex().captures(line) {
                file.is_binary = true;
                file.old_name = binary_side_name(&caps[1], "a/");
                file.new_name = binary_side_name(&caps[2], "b/");
                // a new side of /dev/null wins when both sides are /dev/null
                if file.new_name == DEV_NULL {
                    file.status = Some(FileStatus::Deleted);
                } else if file.old_name == DEV_NULL {
                    file.status = Some(FileStatus::Added);
                } else if file.status.is_none() {
                    file.status = Some(FileStatus::Modified);
                }
                self.advance();
                return;
            }

            if let Some(old) = line.strip_prefix("--- ") {
                file.old_name = parse_file_name(old);
                self.advance();
                if let Some(new) = self.peek().and_then(|l| l.strip_prefix("+++ ")) {
                    file.new_name = parse_file_name(new);
                    self.advance();
                }
                if file.status.is_none() {
                    file.status = Some(FileStatus::from_names(&file.old_name, &file.new_name));
                }
                return;
            }

            // index, mode and similarity lines carry nothing we keep
            self.advance();
        }
    }

    /// Parse every hunk until the next file header or end of input.
    fn parse_hunks(&mut self, file: &mut FileBuilder) -> Result<(), ParseError> {
        while let Some(line) = self.peek() {
            if line.starts_with(DIFF_PREFIX) {
                break;
            }
            match hunk_header_regex().captures(line) {
                Some(caps) => {
                    let hunk = self.parse_hunk(line, &caps)?;
                    file.hunks.push(hunk);
                }
                None => self.advance(),
            }
        }
        Ok(())
    }

    /// Parse a single hunk starting at the `@@` header line.
    fn parse_hunk(&mut self, raw_header: &str, caps: &Captures<'_>) -> Result<Hunk, ParseError> {
        let old_start = parse_number(caps, 1, "old start", raw_header)?.unwrap_or(0);
        let old_lines = parse_number(caps, 2, "old lines", raw_header)?.unwrap_or(1);
        let new_start = parse_number(caps, 3, "new start", raw_header)?.unwrap_or(0);
        let new_lines = parse_number(caps, 4, "new lines", raw_header)?.unwrap_or(1);

        let mut hunk = Hunk::new(
            old_start,
            old_lines,
            new_start,
            new_lines,
            rebuild_header(caps),
        );

        let mut old_num = old_start;
        let mut new_num = new_start;
        self.advance();

        while let Some(line) = self.peek() {
            if line.starts_with(HUNK_PREFIX) || line.starts_with(DIFF_PREFIX) {
                break;
            }
            if line.starts_with(NO_NEWLINE_MARKER) {
                self.advance();
                continue;
            }
            if line.is_empty() {
                // Blank line ends the hunk. It is consumed, not reinterpreted.
                self.advance();
                break;
            }

            if let Some(content) = line.strip_prefix(' ') {
                hunk.lines.push(DiffLine::context(content, old_num, new_num));
                old_num = old_num.saturating_add(1);
                new_num = new_num.saturating_add(1);
            } else if let Some(content) = line.strip_prefix('+') {
                hunk.lines.push(DiffLine::addition(content, new_num));
                new_num = new_num.saturating_add(1);
            } else if let Some(content) = line.strip_prefix('-') {
                hunk.lines.push(DiffLine::deletion(content, old_num));
                old_num = old_num.saturating_add(1);
            } else {
                break;
            }
            self.advance();
        }

        Ok(hunk)
    }

    fn skip_to_next_file(&mut self) {
        while let Some(line) = self.peek() {
            if line.starts_with(DIFF_PREFIX) {
                break;
            }
            self.advance();
        }
    }
}

/// Parse an optional numeric capture group of a hunk header.
fn parse_number(
    caps: &Captures<'_>,
    group: usize,
    field: &'static str,
    raw_header: &str,
) -> Result<Option<u32>, ParseError> {
    caps.get(group)
        .map(|m| {
            m.as_str()
                .parse::<u32>()
                .map_err(|source| ParseError::InvalidHunkNumber {
                    field,
                    header: raw_header.to_string(),
                    source,
                })
        })
        .transpose()
}

/// Rebuild the header from the captured groups, keeping omitted counts omitted.
fn rebuild_header(caps: &Captures<'_>) -> String {
    let mut header = format!("@@ -{}", &caps[1]);
    if let Some(count) = caps.get(2) {
        header.push(',');
        header.push_str(count.as_str());
    }
    header.push_str(" +");
    header.push_str(&caps[3]);
    if let Some(count) = caps.get(4) {
        header.push(',');
        header.push_str(count.as_str());
    }
    header.push_str(" @@");

    let context = caps.get(5).map_or("", |m| m.as_str().trim());
    if !context.is_empty() {
        header.push(' ');
        header.push_str(context);
    }
    header
}

/// Extract the file name from a `---`/`+++` marker, stripping the `a/`/`b/` prefix.
fn parse_file_name(marker: &str) -> String {
    let marker = marker.trim();
    if marker == DEV_NULL {
        return marker.to_string();
    }
    marker
        .strip_prefix("a/")
        .or_else(|| marker.strip_prefix("b/"))
        .unwrap_or(marker)
        .to_string()
}

fn binary_side_name(side: &str, prefix: &str) -> String {
    if side == DEV_NULL {
        return side.to_string();
    }
    side.strip_prefix(prefix).unwrap_or(side).to_string()
}
