//! Invariants that must hold for any well-formed diff.

use ghdiff_core::{DiffLine, Hunk, LineKind, RowKind, align_for_split, parse_unified_diff};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct GenHunk {
    old_start: u32,
    new_start: u32,
    body: Vec<(LineKind, String)>,
}

impl GenHunk {
    fn counts(&self) -> (u32, u32) {
        self.body.iter().fold((0, 0), |(old, new), (kind, _)| match kind {
            LineKind::Context => (old + 1, new + 1),
            LineKind::Delete => (old + 1, new),
            LineKind::Add => (old, new + 1),
        })
    }

    fn write(&self, out: &mut String) {
        let (old_lines, new_lines) = self.counts();
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            self.old_start, old_lines, self.new_start, new_lines
        ));
        for (kind, content) in &self.body {
            out.push(kind.prefix());
            out.push_str(content);
            out.push('\n');
        }
    }
}

fn line_kind() -> impl Strategy<Value = LineKind> {
    prop_oneof![
        Just(LineKind::Context),
        Just(LineKind::Add),
        Just(LineKind::Delete),
    ]
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("diff --git a/x b/x".to_string()),
        Just("--- a/x".to_string()),
        Just("+++ b/x".to_string()),
        Just("--- /dev/null".to_string()),
        Just("rename from y".to_string()),
        Just("Binary files a/x and /dev/null differ".to_string()),
        Just("@@ -1,2 +1 @@ fn f()".to_string()),
        Just("@@ -4294967295 +4294967295 @@".to_string()),
        Just("\\ No newline at end of file".to_string()),
        Just(String::new()),
        "[-+ ?@]?[a-z]{0,4}",
    ]
}

fn gen_hunk() -> impl Strategy<Value = GenHunk> {
    (
        1u32..5000,
        1u32..5000,
        prop::collection::vec((line_kind(), "[a-zA-Z0-9 (){};=]{0,12}"), 0..30),
    )
        .prop_map(|(old_start, new_start, body)| GenHunk {
            old_start,
            new_start,
            body,
        })
}

fn gen_diff() -> impl Strategy<Value = (String, Vec<Vec<GenHunk>>)> {
    prop::collection::vec(prop::collection::vec(gen_hunk(), 1..4), 0..4).prop_map(|files| {
        let mut text = String::new();
        for (i, hunks) in files.iter().enumerate() {
            text.push_str(&format!("diff --git a/file{i}.txt b/file{i}.txt\n"));
            text.push_str(&format!("--- a/file{i}.txt\n+++ b/file{i}.txt\n"));
            for hunk in hunks {
                hunk.write(&mut text);
            }
        }
        (text, files)
    })
}

fn assert_sequential_numbers(hunk: &Hunk) {
    let old: Vec<u32> = hunk.lines.iter().filter_map(|l| l.old_num).collect();
    let new: Vec<u32> = hunk.lines.iter().filter_map(|l| l.new_num).collect();
    let expected_old: Vec<u32> = (hunk.old_start..hunk.old_start + old.len() as u32).collect();
    let expected_new: Vec<u32> = (hunk.new_start..hunk.new_start + new.len() as u32).collect();
    assert_eq!(old, expected_old);
    assert_eq!(new, expected_new);
}

proptest! {
    #[test]
    fn parsed_hunks_match_header_counts((text, generated) in gen_diff()) {
        let diff = parse_unified_diff(&text).unwrap();
        prop_assert_eq!(diff.files.len(), generated.len());

        for (file, gen_hunks) in diff.files.iter().zip(&generated) {
            prop_assert_eq!(file.hunks.len(), gen_hunks.len());
            for (hunk, gen_hunk) in file.hunks.iter().zip(gen_hunks) {
                prop_assert!(hunk.is_well_formed());
                prop_assert_eq!(hunk.lines.len(), gen_hunk.body.len());
                for (line, (kind, content)) in hunk.lines.iter().zip(&gen_hunk.body) {
                    prop_assert_eq!(line.kind, *kind);
                    prop_assert_eq!(&line.content, content);
                }
            }
        }
    }

    #[test]
    fn line_numbers_are_sequential((text, _) in gen_diff()) {
        let diff = parse_unified_diff(&text).unwrap();
        for hunk in diff.files.iter().flat_map(|f| &f.hunks) {
            assert_sequential_numbers(hunk);
            for line in &hunk.lines {
                match line.kind {
                    LineKind::Context => prop_assert!(line.old_num.is_some() && line.new_num.is_some()),
                    LineKind::Add => prop_assert!(line.old_num.is_none() && line.new_num.is_some()),
                    LineKind::Delete => prop_assert!(line.old_num.is_some() && line.new_num.is_none()),
                }
            }
        }
    }

    #[test]
    fn split_rows_cover_every_line_once((text, _) in gen_diff()) {
        let diff = parse_unified_diff(&text).unwrap();
        for hunk in diff.files.iter().flat_map(|f| &f.hunks) {
            let rows = align_for_split(hunk);
            prop_assert!(rows[0].kind().is_none());

            let mut seen: Vec<*const DiffLine> = Vec::new();
            for row in &rows[1..] {
                match row.kind() {
                    Some(RowKind::Context) => {
                        let line = row.old_line().unwrap();
                        prop_assert!(std::ptr::eq(line, row.new_line().unwrap()));
                        prop_assert_eq!(line.kind, LineKind::Context);
                        seen.push(line);
                    }
                    Some(_) => {
                        prop_assert!(row.old_line().is_some() || row.new_line().is_some());
                        if let Some(old) = row.old_line() {
                            prop_assert_eq!(old.kind, LineKind::Delete);
                            seen.push(old);
                        }
                        if let Some(new) = row.new_line() {
                            prop_assert_eq!(new.kind, LineKind::Add);
                            seen.push(new);
                        }
                    }
                    None => prop_assert!(false, "header row inside the body"),
                }
            }

            let mut expected: Vec<*const DiffLine> =
                hunk.lines.iter().map(|l| l as *const DiffLine).collect();
            let before_dedup = seen.len();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), before_dedup);
            expected.sort();
            prop_assert_eq!(seen, expected);
        }
    }

    #[test]
    fn fragment_soup_never_panics(fragments in prop::collection::vec(fragment(), 0..40)) {
        let _ = parse_unified_diff(&fragments.join("\n"));
    }
}

#[test]
fn empty_input_is_an_empty_result() {
    let diff = parse_unified_diff("").unwrap();
    assert!(diff.files.is_empty());
}
