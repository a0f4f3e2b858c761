mod types;
pub use types::*;

use crate::myers::Edit;

/// Groups a script into hunks with up to `context` equal edits on each side.
///
/// Two changes end up in the same hunk when at most `2 * context` equal
/// edits separate them.
pub fn hunks<T: Clone>(edits: &[Edit<T>], context: usize) -> Vec<Hunk<T>> {
    let changed: Vec<usize> = edits
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_change())
        .map(|(i, _)| i)
        .collect();

    let mut groups: Vec<(usize, usize)> = vec![];
    for &i in &changed {
        match groups.last_mut() {
            Some((_, last)) if i - *last - 1 <= 2 * context => *last = i,
            _ => groups.push((i, i)),
        }
    }

    groups
        .into_iter()
        .map(|(first, last)| {
            let start = first.saturating_sub(context);
            let end = (last + 1 + context).min(edits.len());
            let before = &edits[..start];
            Hunk {
                old_start: before
                    .iter()
                    .filter(|e| !matches!(e, Edit::Insert(_)))
                    .count(),
                new_start: before
                    .iter()
                    .filter(|e| !matches!(e, Edit::Delete(_)))
                    .count(),
                changes: edits[start..end].to_vec(),
            }
        })
        .collect()
}

/// Renders hunks as a unified diff. Hunk headers use 1-based line numbers.
pub fn render_unified<T: AsRef<str>>(hunks: &[Hunk<T>], old_name: &str, new_name: &str) -> String {
    if hunks.is_empty() {
        return String::new();
    }

    let body = hunks
        .iter()
        .map(|h| {
            let header = format!(
                "@@ -{},{} +{},{} @@",
                h.old_start + 1,
                h.old_len(),
                h.new_start + 1,
                h.new_len()
            );
            let lines = h
                .changes
                .iter()
                .map(|e| format!("{}{}", e.prefix(), e.value().as_ref()))
                .collect::<Vec<String>>();
            format!("{}\n{}", header, lines.join("\n"))
        })
        .collect::<Vec<String>>();

    format!("--- {}\n+++ {}\n{}", old_name, new_name, body.join("\n"))
}
