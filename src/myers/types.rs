/// Alias for a vector of Edit
/// Result of the Myers diff function
pub type Diff<T> = Vec<Edit<T>>;

/// Each element in a diff can be
/// new (Insert)
/// removed (Delete)
/// equal (Equal)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Insert(T),
    Delete(T),
    Equal(T),
}

impl<T> Edit<T> {
    /// The element carried by this edit, whatever its kind.
    pub fn value(&self) -> &T {
        match self {
            Edit::Insert(v) | Edit::Delete(v) | Edit::Equal(v) => v,
        }
    }

    /// `true` for Insert and Delete.
    pub fn is_change(&self) -> bool {
        !matches!(self, Edit::Equal(_))
    }

    /// Two-character prefix used when printing a line-level script.
    pub fn prefix(&self) -> &'static str {
        match self {
            Edit::Equal(_) => "  ",
            Edit::Insert(_) => "+ ",
            Edit::Delete(_) => "- ",
        }
    }
}

/// Recovers the first input sequence from a script.
pub fn old_side<T: Clone>(script: &[Edit<T>]) -> Vec<T> {
    script
        .iter()
        .filter_map(|e| match e {
            Edit::Insert(_) => None,
            Edit::Delete(v) | Edit::Equal(v) => Some(v.clone()),
        })
        .collect()
}

/// Recovers the second input sequence from a script.
pub fn new_side<T: Clone>(script: &[Edit<T>]) -> Vec<T> {
    script
        .iter()
        .filter_map(|e| match e {
            Edit::Delete(_) => None,
            Edit::Insert(v) | Edit::Equal(v) => Some(v.clone()),
        })
        .collect()
}
