// Maximum-weight assignment between two equal-size sets.

// The solver is the matrix form of the Hungarian method, due to H.W. Kuhn,
// "The Hungarian Method for the assignment problem", Naval Research
// Logistics Quarterly, 1955, with the covering-lines formulation of
// J. Munkres, "Algorithms for the Assignment and Transportation Problems",
// SIAM Journal, 1957.
//
// Weights are maximized. The solver turns the problem into a minimization
// by subtracting every weight from the largest one, reduces rows (and
// columns) so each holds a zero, and then moves zeros around with the
// covering-lines adjustment until N independent zeros exist. Those zeros
// are the optimal pairs.

/// Compute a maximum-weight perfect assignment for the square weight
/// matrix "weights", where weights[i][j] is the value of pairing row i
/// with column j. Any finite real weights are allowed, negative included.

/// Return an assignment "a" such that a[i] == j if row i is paired with
/// column j, together with the total original weight of those pairs.

/// This function takes time O(n ** 4) in the worst case; the greedy
/// cover strategy keeps each adjustment at O(n ** 2).

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub mod config;
pub mod cover;
mod error;
pub mod extract;

pub use config::{CoverStrategy, SolverConfig, TieBreak};
pub use cover::Cover;
pub use error::{Error, Result, ShapeError};

pub type Row        = usize;
pub type Col        = usize;
pub type Weight     = f64;
pub type WeightRow  = Vec<Weight>;
pub type Weights    = Vec<WeightRow>;
pub type Assignment = Vec<Col>; // assignment[row] = col

pub const UNASSIGNED: Col = Col::MAX;

const CHECK_ASSIGNMENT: bool = true;

#[inline]
pub(crate) fn is_zero(w: Weight) -> bool {
    w == 0.0
}

/// Subtract every weight from `maxweight`. Applying this twice with the
/// same maximum gives back the input, so a solve must apply it only once.
pub fn to_minimization(weights: &Weights, maxweight: Weight) -> Weights {
    weights
        .iter()
        .map(|row| row.iter().map(|&w| maxweight - w).collect())
        .collect()
}

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// assignment[row] == col, a bijection on 0..n.
    pub assignment: Assignment,
    /// Sum of the original weights of the assigned pairs.
    pub total: Weight,
    /// Number of covering-lines adjustments performed.
    pub iterations: usize,
    /// Pairs committed on a non-zero reduced cell while breaking ties.
    /// Non-zero means the total may be below the optimum.
    pub off_zero_pairs: usize,
}

impl Solution {
    pub fn pairs(&self) -> impl Iterator<Item = (Row, Col)> + '_ {
        self.assignment.iter().copied().enumerate()
    }

    pub fn is_bijection(&self) -> bool {
        let n = self.assignment.len();
        let mut seen = vec![false; n];
        for &j in &self.assignment {
            if j >= n || seen[j] {
                return false;
            }
            seen[j] = true;
        }
        true
    }
}

/// Entities paired by [`pair_up`], each with the weight of its pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairing<'a, R, C> {
    pub pairs: Vec<(&'a R, &'a C, Weight)>,
    pub total: Weight,
}

/// Score every (row, col) entity pair and return the maximum-weight
/// pairing under the default solver options.
pub fn pair_up<'a, R, C, F>(rows: &'a [R], cols: &'a [C], score: F) -> Result<Pairing<'a, R, C>>
where
    F: FnMut(&R, &C) -> Weight,
{
    let mut solver = Hungarian::from_scores(rows, cols, score)?;
    let solution = solver.solve();
    let pairs = solution
        .pairs()
        .map(|(i, j)| (&rows[i], &cols[j], solver.original[i][j]))
        .collect();
    Ok(Pairing {
        pairs,
        total: solution.total,
    })
}

#[derive(Debug, Clone)]
pub struct Hungarian {
    n:              usize,
    maxweight:      Weight,
    original:       Weights,
    working:        Weights,
    row_min:        WeightRow,
    col_min:        WeightRow,
    cover:          Cover,
    cover_strategy: CoverStrategy,
    tie_break:      TieBreak,
    reduce_columns: bool,
    iterations:     usize,
}

impl Hungarian {
    pub fn new(weights: Weights) -> Result<Hungarian> {
        let n = weights.len();
        if n == 0 {
            return Err(ShapeError::Empty.into());
        }
        for (row, r) in weights.iter().enumerate() {
            if r.len() != n {
                // every row the same length but not n: plain rectangle
                if weights.iter().all(|other| other.len() == r.len()) {
                    return Err(ShapeError::NotSquare { rows: n, cols: r.len() }.into());
                }
                return Err(ShapeError::Ragged { row, len: r.len(), expected: n }.into());
            }
            if let Some((col, &value)) = r.iter().enumerate().find(|(_, w)| !w.is_finite()) {
                return Err(Error::NonFinite { row, col, value });
            }
        }

        // Find the maximum weight.
        let maxweight = weights
            .iter()
            .flatten()
            .copied()
            .fold(Weight::NEG_INFINITY, Weight::max);

        Ok(Hungarian {
            n,
            maxweight,
            working: weights.clone(),
            original: weights,
            row_min: vec![Weight::INFINITY; n],
            col_min: vec![Weight::INFINITY; n],
            cover: Cover::empty(n),
            cover_strategy: CoverStrategy::default(),
            tie_break: TieBreak::default(),
            reduce_columns: true,
            iterations: 0,
        })
    }

    /// Build the weight matrix by scoring every row entity against every
    /// column entity. Both lists must be non-empty and of equal length.
    pub fn from_scores<R, C, F>(rows: &[R], cols: &[C], mut score: F) -> Result<Hungarian>
    where
        F: FnMut(&R, &C) -> Weight,
    {
        if rows.len() != cols.len() {
            return Err(ShapeError::NotSquare { rows: rows.len(), cols: cols.len() }.into());
        }
        let weights = rows
            .iter()
            .map(|r| cols.iter().map(|c| score(r, c)).collect())
            .collect();
        Hungarian::new(weights)
    }

    pub fn cover_strategy(&mut self, strategy: CoverStrategy) -> &mut Self {
        self.cover_strategy = strategy;
        self
    }

    pub fn tie_break(&mut self, tie_break: TieBreak) -> &mut Self {
        self.tie_break = tie_break;
        self
    }

    pub fn reduce_columns(&mut self, reduce: bool) -> &mut Self {
        self.reduce_columns = reduce;
        self
    }

    pub fn configure(&mut self, config: &SolverConfig) -> &mut Self {
        self.cover_strategy = config.effective_cover_strategy();
        self.tie_break = config.effective_tie_break();
        self.reduce_columns = config.effective_reduce_columns();
        self
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn original(&self) -> &Weights {
        &self.original
    }

    /// The reduced matrix as left by the last solve.
    pub fn working(&self) -> &Weights {
        &self.working
    }

    pub fn row_min(&self) -> &[Weight] {
        &self.row_min
    }

    pub fn col_min(&self) -> &[Weight] {
        &self.col_min
    }

    pub fn solve(&mut self) -> Solution {
        debug!(
            n = self.n,
            maxweight = self.maxweight,
            strategy = ?self.cover_strategy,
            tie_break = ?self.tie_break,
            "solving assignment"
        );

        self.convert_to_min();
        self.set_mins();
        self.subtract_row_mins();
        if self.reduce_columns {
            self.subtract_col_mins();
        }
        self.cover_zeros();

        let extraction = extract::extract(&self.working, self.tie_break);
        if CHECK_ASSIGNMENT {
            self.verify_assignment(&extraction.assignment);
        }

        let total = self.score(&extraction.assignment);
        debug!(
            total,
            iterations = self.iterations,
            off_zero_pairs = extraction.off_zero,
            "assignment found"
        );
        Solution {
            assignment: extraction.assignment,
            total,
            iterations: self.iterations,
            off_zero_pairs: extraction.off_zero,
        }
    }

    // Restart from the original weights, so that the transform is applied
    // exactly once however many times solve is called.
    fn convert_to_min(&mut self) {
        self.working = to_minimization(&self.original, self.maxweight);
        self.iterations = 0;
    }

    fn set_mins(&mut self) {
        for i in 0..self.n {
            let mut rmin = Weight::INFINITY;
            let mut cmin = Weight::INFINITY;
            for j in 0..self.n {
                rmin = rmin.min(self.working[i][j]);
                cmin = cmin.min(self.working[j][i]);
            }
            self.row_min[i] = rmin;
            self.col_min[i] = cmin;
        }
    }

    fn subtract_row_mins(&mut self) {
        for (row, &min) in self.working.iter_mut().zip(&self.row_min) {
            for w in row.iter_mut() {
                *w -= min;
            }
        }
        self.set_mins();
    }

    fn subtract_col_mins(&mut self) {
        for row in self.working.iter_mut() {
            for (w, &min) in row.iter_mut().zip(&self.col_min) {
                *w -= min;
            }
        }
        self.set_mins();
    }

    // Draw lines over the zeros with the configured strategy.
    fn find_cover(&mut self) -> usize {
        self.cover = match self.cover_strategy {
            CoverStrategy::Greedy => cover::greedy(&self.working),
            CoverStrategy::Konig  => cover::konig(&self.working),
        };
        debug_assert!(self.cover.covers_zeros(&self.working));
        self.cover.lines()
    }

    // Adjust until n lines are needed to cover all zeros.
    fn cover_zeros(&mut self) {
        let mut lines = self.find_cover();
        while lines < self.n {
            let delta = self.adjust();
            self.iterations += 1;
            trace!(iteration = self.iterations, lines, delta, "adjusted uncovered cells");
            lines = self.find_cover();
        }
        debug!(lines, iterations = self.iterations, "zeros covered");
    }

    // One covering-lines step: take the smallest uncovered value off every
    // uncovered cell and add it to every cell covered twice.
    fn adjust(&mut self) -> Weight {
        let delta = self.find_min_uncovered();
        debug_assert!(delta > 0.0 && delta.is_finite());
        self.reduce_uncovered(delta);
        self.add_to_covered(delta);
        debug_assert!(self.working.iter().flatten().all(|&w| w >= 0.0));
        delta
    }

    fn find_min_uncovered(&self) -> Weight {
        let mut min = Weight::INFINITY;
        for i in 0..self.n {
            if self.cover.rows[i] {
                continue;
            }
            for j in 0..self.n {
                if !self.cover.cols[j] && self.working[i][j] < min {
                    min = self.working[i][j];
                }
            }
        }
        min
    }

    fn reduce_uncovered(&mut self, delta: Weight) {
        for i in 0..self.n {
            for j in 0..self.n {
                if self.cover.is_uncovered(i, j) {
                    let w = self.working[i][j] - delta;
                    self.working[i][j] = w;
                    if w < self.row_min[i] {
                        self.row_min[i] = w;
                    }
                    if w < self.col_min[j] {
                        self.col_min[j] = w;
                    }
                }
            }
        }
    }

    fn add_to_covered(&mut self, delta: Weight) {
        for i in 0..self.n {
            for j in 0..self.n {
                if self.cover.is_covered_twice(i, j) {
                    self.working[i][j] += delta;
                }
            }
        }
    }

    fn score(&self, assignment: &Assignment) -> Weight {
        assignment
            .iter()
            .enumerate()
            .map(|(i, &j)| self.original[i][j])
            .sum()
    }

    /// Verify that every row got its own column.
    fn verify_assignment(&self, assignment: &Assignment) {
        assert!(assignment.len() == self.n);
        let mut taken = vec![false; self.n];
        for &j in assignment {
            assert!(j < self.n);
            assert!(!taken[j]);
            taken[j] = true;
        }
    }
}
