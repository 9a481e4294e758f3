//! Input validation errors.
//!
//! Everything is checked once, when the solver is built. `solve` itself
//! cannot fail.

use crate::{Col, Row, Weight};

/// The weight matrix (or the two entity lists behind it) is not N×N with N ≥ 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("weight matrix is empty")]
    Empty,

    #[error("row {row} has {len} weights, expected {expected}")]
    Ragged { row: Row, len: usize, expected: usize },

    #[error("{rows} rows cannot be paired with {cols} columns")]
    NotSquare { rows: usize, cols: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("weight at ({row}, {col}) is not finite: {value}")]
    NonFinite { row: Row, col: Col, value: Weight },
}

pub type Result<T> = std::result::Result<T, Error>;
