use crate::myers::Edit;

/// A run of changes from a Myers diff plus the equal lines around it.
/// `old_start` and `new_start` are 0-based positions of the first edit in
/// `changes`, context included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    pub old_start: usize,
    pub new_start: usize,
    pub changes: Vec<Edit<T>>,
}

impl<T> Hunk<T> {
    /// Lines this hunk spans in the old sequence.
    pub fn old_len(&self) -> usize {
        self.changes
            .iter()
            .filter(|e| !matches!(e, Edit::Insert(_)))
            .count()
    }

    /// Lines this hunk spans in the new sequence.
    pub fn new_len(&self) -> usize {
        self.changes
            .iter()
            .filter(|e| !matches!(e, Edit::Delete(_)))
            .count()
    }
}
