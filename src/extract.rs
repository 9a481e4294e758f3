// Reading an assignment off a reduced matrix whose zeros admit one.

use tracing::{debug, warn};

use crate::config::TieBreak;
use crate::cover::{extend_zero_matching, Cover};
use crate::{is_zero, Assignment, Col, Row, Weights, UNASSIGNED};

/// Result of extraction: `assignment[row] == col` for every row, plus the
/// number of pairs that had to be committed on a non-zero cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub assignment: Assignment,
    pub off_zero: usize,
}

pub fn extract(working: &Weights, tie_break: TieBreak) -> Extraction {
    let n = working.len();
    let mut assigned = Cover::empty(n);
    let mut assignment = vec![UNASSIGNED; n];

    let forced = forced_moves(working, &mut assigned, &mut assignment);
    debug!(forced, remaining = n - forced, "forced moves done");

    if tie_break == TieBreak::ZeroCells && forced < n {
        match_remaining_zeros(working, &mut assigned, &mut assignment);
    }
    let off_zero = pair_first_free(working, &mut assigned, &mut assignment);

    Extraction {
        assignment,
        off_zero,
    }
}

// Commit every zero that is the only candidate left in its row, then in its
// column, and sweep again until a full pass commits nothing.
fn forced_moves(working: &Weights, assigned: &mut Cover, assignment: &mut Assignment) -> usize {
    let n = working.len();
    let mut total = 0;
    loop {
        let mut found = 0;
        for i in 0..n {
            for j in 0..n {
                if unique_zero_in_row(working, assigned, i, j) {
                    commit(assigned, assignment, i, j);
                    found += 1;
                }
            }
        }
        for i in 0..n {
            for j in 0..n {
                if unique_zero_in_col(working, assigned, i, j) {
                    commit(assigned, assignment, i, j);
                    found += 1;
                }
            }
        }
        if found == 0 {
            return total;
        }
        total += found;
    }
}

/// True iff (i, j) is a free zero and row i has no other zero in a free column.
fn unique_zero_in_row(working: &Weights, assigned: &Cover, i: Row, j: Col) -> bool {
    if !is_zero(working[i][j]) || !assigned.is_uncovered(i, j) {
        return false;
    }
    (0..working.len()).all(|k| k == j || assigned.cols[k] || !is_zero(working[i][k]))
}

/// True iff (i, j) is a free zero and column j has no other zero in a free row.
fn unique_zero_in_col(working: &Weights, assigned: &Cover, i: Row, j: Col) -> bool {
    if !is_zero(working[i][j]) || !assigned.is_uncovered(i, j) {
        return false;
    }
    (0..working.len()).all(|k| k == i || assigned.rows[k] || !is_zero(working[k][j]))
}

// Complete the assignment over zero cells with augmenting paths. Earlier
// pairs may be moved to another zero of their row but are never dropped.
fn match_remaining_zeros(working: &Weights, assigned: &mut Cover, assignment: &mut Assignment) {
    let n = working.len();
    let mut col_mate = vec![UNASSIGNED; n];
    for (i, &j) in assignment.iter().enumerate() {
        if j != UNASSIGNED {
            col_mate[j] = i;
        }
    }
    let matched = extend_zero_matching(working, assignment, &mut col_mate, None);
    debug!(matched, "zero cells matched");

    for (i, &j) in assignment.iter().enumerate() {
        assigned.rows[i] = j != UNASSIGNED;
    }
    for (j, &i) in col_mate.iter().enumerate() {
        assigned.cols[j] = i != UNASSIGNED;
    }
}

// Pair each free row with the first free column. Returns how many of those
// pairs landed off a zero.
fn pair_first_free(working: &Weights, assigned: &mut Cover, assignment: &mut Assignment) -> usize {
    let n = working.len();
    let mut off_zero = 0;
    for i in 0..n {
        if assigned.rows[i] {
            continue;
        }
        let Some(j) = (0..n).find(|&j| !assigned.cols[j]) else {
            break;
        };
        if !is_zero(working[i][j]) {
            warn!(
                row = i,
                col = j,
                reduced_cost = working[i][j],
                "tie resolved on a non-zero cell, total may be below optimum"
            );
            off_zero += 1;
        }
        commit(assigned, assignment, i, j);
    }
    off_zero
}

#[inline]
fn commit(assigned: &mut Cover, assignment: &mut Assignment, i: Row, j: Col) {
    assigned.rows[i] = true;
    assigned.cols[j] = true;
    assignment[i] = j;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeros(pattern: &[&str]) -> Weights {
        pattern
            .iter()
            .map(|row| row.chars().map(|c| if c == '0' { 0.0 } else { 1.0 }).collect())
            .collect()
    }

    #[test]
    fn unique_zeros_are_forced() {
        let m = zeros(&["x0x", "xx0", "0xx"]);
        let result = extract(&m, TieBreak::Arbitrary);
        assert_eq!(result.assignment, vec![1, 2, 0]);
        assert_eq!(result.off_zero, 0);
    }

    #[test]
    fn forced_moves_propagate() {
        // row 0 is forced, which leaves row 1 a single free zero
        let m = zeros(&["0x", "00"]);
        assert_eq!(extract(&m, TieBreak::Arbitrary).assignment, vec![0, 1]);
    }

    #[test]
    fn unique_in_column() {
        // every row has two zeros, but column 2 has only one
        let m = zeros(&["00x", "00x", "x00"]);
        let result = extract(&m, TieBreak::Arbitrary);
        assert_eq!(result.assignment[2], 2);
        assert_eq!(result.off_zero, 0);
    }

    #[test]
    fn arbitrary_ties_can_miss_zeros() {
        let m = zeros(&["x00", "0x0", "00x"]);
        let result = extract(&m, TieBreak::Arbitrary);
        assert_eq!(result.assignment, vec![0, 1, 2]);
        assert_eq!(result.off_zero, 3);
    }

    #[test]
    fn zero_cells_ties_stay_on_zeros() {
        let m = zeros(&["x00", "0x0", "00x"]);
        let result = extract(&m, TieBreak::ZeroCells);
        assert_eq!(result.off_zero, 0);
        for (i, &j) in result.assignment.iter().enumerate() {
            assert!(is_zero(m[i][j]));
        }
    }

    #[test]
    fn missing_zeros_fall_back_to_first_free() {
        let m = zeros(&["0x", "0x"]);
        for tie_break in [TieBreak::Arbitrary, TieBreak::ZeroCells] {
            let result = extract(&m, tie_break);
            assert_eq!(result.assignment, vec![0, 1]);
            assert_eq!(result.off_zero, 1);
        }
    }
}
