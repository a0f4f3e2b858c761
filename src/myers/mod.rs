pub mod types;
pub use types::*;

/// Furthest-reaching x for every diagonal `k` in `[-size, size]`.
#[derive(Clone)]
struct V {
    data: Box<[usize]>,
    offset: isize,
}

impl V {
    fn new(size: usize) -> Self {
        V {
            data: vec![0; 2 * size + 1].into_boxed_slice(),
            offset: size as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, val: usize) {
        self.data[(k + self.offset) as usize] = val;
    }
}

/// Append-only arena of `V` snapshots.
/// Entry `d` is the state as it was *before* step `d` of the search ran.
struct Trace {
    snapshots: Vec<V>,
}

impl Trace {
    fn new() -> Self {
        Trace { snapshots: vec![] }
    }

    fn record(&mut self, v: &V) {
        self.snapshots.push(v.clone());
    }

    fn depths(&self) -> impl DoubleEndedIterator<Item = (isize, &V)> {
        self.snapshots
            .iter()
            .enumerate()
            .map(|(d, v)| (d as isize, v))
    }
}

/// Whether diagonal `k` at depth `d` is reached from `k + 1` (a move down,
/// i.e. an insertion) rather than from `k - 1` (a move right, a deletion).
fn from_above(v: &V, k: isize, d: isize) -> bool {
    k == -d || (k != d && v.get(k - 1) < v.get(k + 1))
}

/// Computes the diff between two strings after breaking them into newlines
/// and running `diff`.
///
/// An empty string is a single empty line, never zero lines.
pub fn diff_lines(old: &str, new: &str) -> Diff<String> {
    let old_lines: Vec<String> = old.split('\n').map(ToString::to_string).collect();
    let new_lines: Vec<String> = new.split('\n').map(ToString::to_string).collect();
    diff(&old_lines, &new_lines)
}

/// Computes the diff between two sequences using the Myers algorithm.
///
/// # Examples
///
/// ```
/// use snapdiff::myers::{diff, Edit};
///
/// let old = vec![1, 2, 3];
/// let new = vec![1, 3, 4];
/// let result = diff(&old, &new);
/// assert_eq!(result, vec![
///     Edit::Equal(1),
///     Edit::Delete(2),
///     Edit::Equal(3),
///     Edit::Insert(4),
/// ]);
/// ```
///
/// # Arguments
///
/// * `old` - The original sequence
/// * `new` - The new sequence
pub fn diff<T: Eq + Clone>(old: &[T], new: &[T]) -> Diff<T> {
    if old == new {
        return old.iter().map(|e| Edit::Equal(e.clone())).collect();
    }
    if old.is_empty() {
        return new.iter().map(|e| Edit::Insert(e.clone())).collect();
    }
    if new.is_empty() {
        return old.iter().map(|e| Edit::Delete(e.clone())).collect();
    }

    let trace = shortest_edit(old, new);
    traceback(old, new, &trace)
}

fn shortest_edit<T: Eq>(old: &[T], new: &[T]) -> Trace {
    let n = old.len();
    let m = new.len();
    let maxi = n + m;
    let mut v = V::new(maxi);
    let mut trace = Trace::new();

    for d in 0..=maxi as isize {
        trace.record(&v);
        for k in (-d..=d).step_by(2) {
            let mut x = if from_above(&v, k, d) {
                v.get(k + 1)
            } else {
                v.get(k - 1) + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            if x >= n && y >= m {
                return trace;
            }
        }
    }
    trace
}

fn traceback<T: Clone>(old: &[T], new: &[T], trace: &Trace) -> Diff<T> {
    let mut x = old.len() as isize;
    let mut y = new.len() as isize;
    let mut changes: Diff<T> = Vec::with_capacity(old.len() + new.len());

    for (d, v) in trace.depths().rev() {
        let k = x - y;
        let prev_k = if from_above(v, k, d) { k + 1 } else { k - 1 };
        let prev_x = v.get(prev_k) as isize;
        let prev_y = prev_x - prev_k;
        while x > prev_x && y > prev_y {
            changes.push(Edit::Equal(old[(x - 1) as usize].clone()));
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if prev_k == k + 1 {
                changes.push(Edit::Insert(new[(y - 1) as usize].clone()));
            } else {
                changes.push(Edit::Delete(old[(x - 1) as usize].clone()));
            }
        }
        x = prev_x;
        y = prev_y;
    }

    changes.reverse();
    changes
}
