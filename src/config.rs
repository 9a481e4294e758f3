//! Solver options.

use serde::{Deserialize, Serialize};

/// How the cover search picks the lines that cover every zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverStrategy {
    /// Two greedy sweeps (rows first top-down, columns first bottom-up);
    /// the one using fewer lines wins. Cheap, but may overcount lines and
    /// stop the adjustment loop before a perfect zero assignment exists.
    Greedy,
    /// Minimum vertex cover of the zero graph, from a maximum matching
    /// and König's theorem.
    #[default]
    Konig,
}

/// What extraction does with rows left over once no forced move remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Pair the first free row with the first free column, whatever the
    /// cell holds. Can commit a non-zero cell and lose optimality when
    /// several equally good zeros remain.
    #[default]
    Arbitrary,
    /// Match the free rows over zero cells only.
    ZeroCells,
}

/// Serializable solver configuration. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SolverConfig {
    /// Line cover strategy. Default: konig.
    pub cover_strategy: Option<CoverStrategy>,
    /// Tie resolution after the forced moves. Default: arbitrary.
    pub tie_break: Option<TieBreak>,
    /// Subtract column minima explicitly after the row pass. Default: true.
    pub reduce_columns: Option<bool>,
}

impl SolverConfig {
    pub fn effective_cover_strategy(&self) -> CoverStrategy {
        self.cover_strategy.unwrap_or_default()
    }

    pub fn effective_tie_break(&self) -> TieBreak {
        self.tie_break.unwrap_or_default()
    }

    pub fn effective_reduce_columns(&self) -> bool {
        self.reduce_columns.unwrap_or(true)
    }
}
