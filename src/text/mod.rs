mod types;
pub use types::*;

use crate::hunk;
use crate::myers::{self, Edit};

/// Diffs two texts line by line.
///
/// Never fails: empty and identical inputs are ordinary inputs.
///
/// ```
/// let result = snapdiff::text::diff_text("X", "X\nY");
/// assert_eq!((result.additions, result.removals, result.unchanged), (1, 0, 1));
/// assert_eq!(result.diff, "  X\n+ Y");
/// ```
pub fn diff_text(before: &str, after: &str) -> TextDiffResult {
    let script = myers::diff_lines(before, after);

    let (mut additions, mut removals, mut unchanged) = (0, 0, 0);
    for edit in &script {
        match edit {
            Edit::Insert(_) => additions += 1,
            Edit::Delete(_) => removals += 1,
            Edit::Equal(_) => unchanged += 1,
        }
    }

    tracing::debug!(additions, removals, unchanged, "computed text diff");

    TextDiffResult {
        diff: render(&script),
        additions,
        removals,
        unchanged,
        changed: additions > 0 || removals > 0,
        script,
    }
}

/// Prints every edit on its own line with its two-character prefix.
pub fn render<T: AsRef<str>>(script: &[Edit<T>]) -> String {
    script
        .iter()
        .map(|e| format!("{}{}", e.prefix(), e.value().as_ref()))
        .collect::<Vec<String>>()
        .join("\n")
}

impl TextDiffResult {
    /// Unified-diff rendering with `context` equal lines around each hunk.
    /// Empty when nothing changed.
    pub fn unified(&self, context: usize) -> String {
        let hunks = hunk::hunks(&self.script, context);
        hunk::render_unified(&hunks, "before", "after")
    }
}
