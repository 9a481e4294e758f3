use kmassignment::{CoverStrategy, Hungarian, TieBreak, Weight, Weights};
use proptest::prelude::*;

fn integer_square(max_n: usize) -> impl Strategy<Value = Weights> {
    (1..=max_n)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(-50i32..50, n), n))
        .prop_map(|m| -> Weights {
            m.into_iter()
                .map(|row| row.into_iter().map(Weight::from).collect())
                .collect()
        })
}

fn real_square(max_n: usize) -> impl Strategy<Value = Weights> {
    (1..=max_n).prop_flat_map(|n| prop::collection::vec(prop::collection::vec(-1e3f64..1e3, n), n))
}

fn options() -> impl Strategy<Value = (CoverStrategy, TieBreak, bool)> {
    (
        prop_oneof![Just(CoverStrategy::Greedy), Just(CoverStrategy::Konig)],
        prop_oneof![Just(TieBreak::Arbitrary), Just(TieBreak::ZeroCells)],
        any::<bool>(),
    )
}

/// Best total over every permutation.
fn brute_force(weights: &Weights) -> Weight {
    fn best(weights: &Weights, row: usize, used: &mut Vec<bool>) -> Weight {
        if row == weights.len() {
            return 0.0;
        }
        let mut top = Weight::NEG_INFINITY;
        for col in 0..weights.len() {
            if used[col] {
                continue;
            }
            used[col] = true;
            top = top.max(weights[row][col] + best(weights, row + 1, used));
            used[col] = false;
        }
        top
    }
    best(weights, 0, &mut vec![false; weights.len()])
}

proptest! {
    #[test]
    fn always_a_bijection(weights in real_square(8), (strategy, tie_break, reduce) in options()) {
        let n = weights.len();
        let solution = Hungarian::new(weights)
            .unwrap()
            .cover_strategy(strategy)
            .tie_break(tie_break)
            .reduce_columns(reduce)
            .solve();
        prop_assert_eq!(solution.assignment.len(), n);
        prop_assert!(solution.is_bijection());
    }

    #[test]
    fn total_reads_original_weights(weights in real_square(8), (strategy, tie_break, reduce) in options()) {
        let solution = Hungarian::new(weights.clone())
            .unwrap()
            .cover_strategy(strategy)
            .tie_break(tie_break)
            .reduce_columns(reduce)
            .solve();
        let expected: Weight = solution.pairs().map(|(i, j)| weights[i][j]).sum();
        prop_assert_eq!(solution.total, expected);
    }

    #[test]
    fn exact_options_reach_optimum(weights in integer_square(6), reduce in any::<bool>()) {
        let solution = Hungarian::new(weights.clone())
            .unwrap()
            .cover_strategy(CoverStrategy::Konig)
            .tie_break(TieBreak::ZeroCells)
            .reduce_columns(reduce)
            .solve();
        prop_assert_eq!(solution.off_zero_pairs, 0);
        prop_assert_eq!(solution.total, brute_force(&weights));
    }

    #[test]
    fn never_beats_optimum(weights in integer_square(6), (strategy, tie_break, reduce) in options()) {
        let solution = Hungarian::new(weights.clone())
            .unwrap()
            .cover_strategy(strategy)
            .tie_break(tie_break)
            .reduce_columns(reduce)
            .solve();
        prop_assert!(solution.total <= brute_force(&weights));
        if solution.off_zero_pairs == 0 && strategy == CoverStrategy::Konig {
            prop_assert_eq!(solution.total, brute_force(&weights));
        }
    }

    #[test]
    fn unique_zero_optimum_is_returned(
        (perm, noise) in (1usize..=7).prop_flat_map(|n| (
            Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            prop::collection::vec(prop::collection::vec(0i32..50, n), n),
        )),
        (strategy, tie_break, reduce) in options(),
    ) {
        let weights: Weights = noise
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &w)| if perm[i] == j { 100.0 } else { Weight::from(w) })
                    .collect()
            })
            .collect();
        let solution = Hungarian::new(weights)
            .unwrap()
            .cover_strategy(strategy)
            .tie_break(tie_break)
            .reduce_columns(reduce)
            .solve();
        prop_assert_eq!(solution.assignment, perm);
        prop_assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn repeated_solves_agree(weights in real_square(6)) {
        let mut solver = Hungarian::new(weights).unwrap();
        let first = solver.solve();
        prop_assert_eq!(first, solver.solve());
    }
}
