// Line covers of the zero cells of a working matrix.
//
// The zero cells of a reduced matrix form a bipartite graph between rows and
// columns. A set of row/column lines touching every zero is a vertex cover
// of that graph, and by König's theorem the smallest such cover has exactly
// as many lines as the largest set of independent zeros (zeros no two of
// which share a row or column). N lines therefore means a zero-cost
// assignment exists.

use crate::{is_zero, Col, Row, Weights, UNASSIGNED};

/// Row and column lines. In the cover search a `true` entry is a drawn line;
/// during extraction the same vectors mark rows and columns already assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub rows: Vec<bool>,
    pub cols: Vec<bool>,
}

impl Cover {
    pub fn empty(n: usize) -> Cover {
        Cover {
            rows: vec![false; n],
            cols: vec![false; n],
        }
    }

    /// Number of lines drawn.
    pub fn lines(&self) -> usize {
        self.rows.iter().filter(|&&r| r).count() + self.cols.iter().filter(|&&c| c).count()
    }

    #[inline]
    pub fn is_uncovered(&self, i: Row, j: Col) -> bool {
        !self.rows[i] && !self.cols[j]
    }

    #[inline]
    pub fn is_covered_twice(&self, i: Row, j: Col) -> bool {
        self.rows[i] && self.cols[j]
    }

    /// True if every zero of `working` lies on at least one line.
    pub fn covers_zeros(&self, working: &Weights) -> bool {
        working.iter().enumerate().all(|(i, row)| {
            row.iter()
                .enumerate()
                .all(|(j, &w)| !is_zero(w) || !self.is_uncovered(i, j))
        })
    }
}

/// Cover the zeros with two greedy sweeps and keep the cheaper one.
/// On a tie the rows-first sweep wins.
pub fn greedy(working: &Weights) -> Cover {
    let rows_first = sweep_rows_first(working);
    let cols_first = sweep_cols_first(working);
    if cols_first.lines() < rows_first.lines() {
        cols_first
    } else {
        rows_first
    }
}

// Top to bottom: draw a row line through every row holding an uncovered
// zero, then a column line through every zero still uncovered.
fn sweep_rows_first(working: &Weights) -> Cover {
    let n = working.len();
    let mut cover = Cover::empty(n);
    for i in 0..n {
        for j in 0..n {
            if is_zero(working[i][j]) && cover.is_uncovered(i, j) {
                cover.rows[i] = true;
            }
        }
    }
    for i in 0..n {
        for j in 0..n {
            if is_zero(working[i][j]) && cover.is_uncovered(i, j) {
                cover.cols[j] = true;
            }
        }
    }
    cover
}

// Bottom to top: draw a column line through every uncovered zero, then a
// row line through every zero still uncovered.
fn sweep_cols_first(working: &Weights) -> Cover {
    let n = working.len();
    let mut cover = Cover::empty(n);
    for i in (0..n).rev() {
        for j in 0..n {
            if is_zero(working[i][j]) && cover.is_uncovered(i, j) {
                cover.cols[j] = true;
            }
        }
    }
    for i in (0..n).rev() {
        for j in 0..n {
            if is_zero(working[i][j]) && cover.is_uncovered(i, j) {
                cover.rows[i] = true;
            }
        }
    }
    cover
}

/// Minimum line cover: a maximum zero matching, then König's construction.
pub fn konig(working: &Weights) -> Cover {
    let n = working.len();
    let mut row_mate = vec![UNASSIGNED; n];
    let mut col_mate = vec![UNASSIGNED; n];
    extend_zero_matching(working, &mut row_mate, &mut col_mate, None);

    // Walk alternating paths (zero edge out of a row, matched edge back
    // from a column) starting at every unmatched row.
    let mut row_seen = vec![false; n];
    let mut col_seen = vec![false; n];
    let mut stack: Vec<Row> = (0..n).filter(|&i| row_mate[i] == UNASSIGNED).collect();
    for &i in &stack {
        row_seen[i] = true;
    }
    while let Some(i) = stack.pop() {
        for j in 0..n {
            if is_zero(working[i][j]) && !col_seen[j] {
                col_seen[j] = true;
                // A free column here would be an augmenting path, which
                // cannot exist beside a maximum matching.
                let mate = col_mate[j];
                debug_assert!(mate != UNASSIGNED);
                if mate != UNASSIGNED && !row_seen[mate] {
                    row_seen[mate] = true;
                    stack.push(mate);
                }
            }
        }
    }

    // Unreached rows plus reached columns.
    Cover {
        rows: row_seen.iter().map(|&seen| !seen).collect(),
        cols: col_seen,
    }
}

/// Size of a maximum set of independent zeros.
pub fn independent_zeros(working: &Weights) -> usize {
    let n = working.len();
    let mut row_mate = vec![UNASSIGNED; n];
    let mut col_mate = vec![UNASSIGNED; n];
    extend_zero_matching(working, &mut row_mate, &mut col_mate, None)
}

/// Grow a matching over zero cells by augmenting paths from every unmatched
/// row. Pairs already present in `row_mate`/`col_mate` must be zeros; they
/// may be rerouted but never dropped. Columns flagged in `blocked` are never
/// entered. Returns the final matching size.
pub fn extend_zero_matching(
    working: &Weights,
    row_mate: &mut [Col],
    col_mate: &mut [Row],
    blocked: Option<&[bool]>,
) -> usize {
    let n = working.len();
    for i in 0..n {
        if row_mate[i] != UNASSIGNED {
            continue;
        }
        let mut visited = vec![false; n];
        if let Some(blocked) = blocked {
            visited.copy_from_slice(blocked);
        }
        augment(working, i, &mut visited, row_mate, col_mate);
    }
    row_mate.iter().filter(|&&j| j != UNASSIGNED).count()
}

// Look for an augmenting path out of row i; flip it if found.
fn augment(
    working: &Weights,
    i: Row,
    visited: &mut [bool],
    row_mate: &mut [Col],
    col_mate: &mut [Row],
) -> bool {
    for j in 0..working.len() {
        if !is_zero(working[i][j]) || visited[j] {
            continue;
        }
        visited[j] = true;
        let mate = col_mate[j];
        if mate == UNASSIGNED || augment(working, mate, visited, row_mate, col_mate) {
            row_mate[i] = j;
            col_mate[j] = i;
            return true;
        }
    }
    false
}
