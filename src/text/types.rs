use crate::myers::Edit;
use serde::Serialize;

/// Outcome of a line-level text diff.
///
/// `additions + removals + unchanged` always equals `script.len()`, and
/// `changed` is set exactly when there is at least one addition or removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextDiffResult {
    /// Every line of the script, prefixed with `"  "`, `"+ "` or `"- "`.
    pub diff: String,
    pub additions: usize,
    pub removals: usize,
    pub unchanged: usize,
    pub changed: bool,
    #[serde(skip)]
    pub script: Vec<Edit<String>>,
}
