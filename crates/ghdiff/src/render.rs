//! Text and JSON presentation of a parsed diff.

use ghdiff_config::ViewMode;
use ghdiff_core::{
    DiffLine, DiffResult, FileEntry, Hunk, SplitRow, UnifiedRow, align_for_split, unified_rows,
};
use std::io::{self, Write};

const COLUMN_SEPARATOR: &str = " │ ";
const TRUNCATION_MARKER: char = '…';
const TAB_WIDTH: usize = 4;

/// Write the diff as pretty-printed JSON followed by a newline.
pub fn render_json<W: Write>(diff: &DiffResult, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, diff)?;
    writeln!(out)
}

/// Plain text renderer for split or unified layout.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    mode: ViewMode,
    column_width: usize,
}

impl TextRenderer {
    pub fn new(mode: ViewMode, column_width: usize) -> Self {
        Self { mode, column_width }
    }

    pub fn render<W: Write>(&self, diff: &DiffResult, out: &mut W) -> io::Result<()> {
        for (i, file) in diff.files.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            self.render_file(file, out)?;
        }
        if !diff.is_empty() {
            writeln!(out)?;
        }
        writeln!(out, "{}", summary(diff))
    }

    fn render_file<W: Write>(&self, file: &FileEntry, out: &mut W) -> io::Result<()> {
        let status = file.status.as_char();
        let name = file.display_name();

        if file.is_binary {
            return writeln!(out, "{status} {name}  (binary)");
        }
        writeln!(
            out,
            "{status} {name}  +{} -{}",
            file.additions(),
            file.deletions()
        )?;

        let line_no_width = line_no_width(file);
        for hunk in &file.hunks {
            match self.mode {
                ViewMode::Split => self.render_split_hunk(hunk, line_no_width, out)?,
                ViewMode::Unified => render_unified_hunk(hunk, line_no_width, out)?,
            }
        }
        Ok(())
    }

    fn render_split_hunk<W: Write>(
        &self,
        hunk: &Hunk,
        line_no_width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        for row in align_for_split(hunk) {
            match row {
                SplitRow::Header(header) => writeln!(out, "{header}")?,
                SplitRow::Line { old, new, .. } => {
                    let left = self.split_cell(old, |l| l.old_num, line_no_width);
                    let right = self.split_cell(new, |l| l.new_num, line_no_width);
                    let row = format!("{left}{COLUMN_SEPARATOR}{right}");
                    writeln!(out, "{}", row.trim_end())?;
                }
            }
        }
        Ok(())
    }

    fn split_cell(
        &self,
        line: Option<&DiffLine>,
        number: impl Fn(&DiffLine) -> Option<u32>,
        line_no_width: usize,
    ) -> String {
        match line {
            Some(line) => format!(
                "{} {}{}",
                format_line_no(number(line), line_no_width),
                line.kind.prefix(),
                fit(&line.content, self.column_width)
            ),
            None => " ".repeat(line_no_width + 2 + self.column_width),
        }
    }
}

fn render_unified_hunk<W: Write>(hunk: &Hunk, line_no_width: usize, out: &mut W) -> io::Result<()> {
    for row in unified_rows(hunk) {
        match row {
            UnifiedRow::Header(header) => writeln!(out, "{header}")?,
            UnifiedRow::Line(line) => writeln!(
                out,
                "{} {} {}{}",
                format_line_no(line.old_num, line_no_width),
                format_line_no(line.new_num, line_no_width),
                line.kind.prefix(),
                expand_tabs(&line.content)
            )?,
        }
    }
    Ok(())
}

/// Digits needed for the largest line number in `file`, at least 4.
fn line_no_width(file: &FileEntry) -> usize {
    let max_line_no = file
        .hunks
        .iter()
        .flat_map(|h| &h.lines)
        .flat_map(|l| [l.old_num, l.new_num])
        .flatten()
        .max()
        .unwrap_or(0);
    max_line_no.to_string().len().max(4)
}

fn format_line_no(number: Option<u32>, width: usize) -> String {
    match number {
        Some(n) => format!("{n:>width$}"),
        None => " ".repeat(width),
    }
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Truncate or pad `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let text = expand_tabs(text);
    let len = text.chars().count();
    if len > width {
        let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        truncated.push(TRUNCATION_MARKER);
        truncated
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

fn summary(diff: &DiffResult) -> String {
    if diff.is_empty() {
        return "No changes".to_string();
    }
    let files = diff.files.len();
    let (additions, deletions) = diff.totals();
    format!(
        "{files} {} changed, {additions} {}(+), {deletions} {}(-)",
        plural(files, "file", "files"),
        plural(additions, "insertion", "insertions"),
        plural(deletions, "deletion", "deletions"),
    )
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
