//! Error and issue types of the balancing core.
//!
//! Two layers: the `*Issue` enums are recoverable conditions collected by the permissive
//! parser and aggregator and returned as values next to the result, the `*Error` enums are
//! what the strict entry points return instead of a result.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// something the permissive formula parser skipped or repaired. Positions are char indices
/// into the formula as the caller passed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FormulaIssue {
    /// closing bracket with no open group to close
    UnmatchedClose { position: usize },
    /// groups still open at the end of the formula, folded into their parent with multiplier 1
    UnclosedGroup { depth: usize },
    /// character that is neither an element, a bracket, a count nor whitespace
    SkippedCharacter { position: usize, character: char },
    /// count at `position` does not fit into u64: an over-long digit run (read as 1), or the
    /// element or group there pushes a total past u64. The atoms of the formula are not exact
    CountOverflow { position: usize },
    /// formula without a single element symbol
    NoElements,
}

impl fmt::Display for FormulaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaIssue::UnmatchedClose { position } => {
                write!(f, "unmatched closing bracket at position {}", position)
            }
            FormulaIssue::UnclosedGroup { depth } => {
                write!(f, "{} group(s) left open at end of formula", depth)
            }
            FormulaIssue::SkippedCharacter {
                position,
                character,
            } => write!(f, "skipped character '{}' at position {}", character, position),
            FormulaIssue::CountOverflow { position } => {
                write!(f, "atom count at position {} does not fit into u64", position)
            }
            FormulaIssue::NoElements => write!(f, "formula contains no element symbols"),
        }
    }
}

impl FormulaIssue {
    /// true if the atom counts of the parsed formula cannot be trusted
    pub fn makes_counts_inexact(&self) -> bool {
        matches!(self, FormulaIssue::CountOverflow { .. })
    }
}

/// atom count arithmetic that left the u64 range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("number of {element} atoms does not fit into u64")]
pub struct AtomCountOverflow {
    pub element: String,
}

/// strict parser failure: the first issue found in the formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed formula '{formula}': {issue}")]
pub struct FormulaError {
    pub formula: String,
    pub issue: FormulaIssue,
}

/// side of a chemical equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Reactants,
    Products,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reactants => write!(f, "reactants"),
            Side::Products => write!(f, "products"),
        }
    }
}

/// recoverable condition met while aggregating one side of an equation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    /// the part at `index` was rejected and contributed no atoms
    InvalidCoefficient {
        side: Option<Side>,
        index: usize,
        formula: String,
        coefficient: i64,
    },
    /// the formula of the part at `index` was parsed with an issue. The part is rejected
    /// when the issue makes its atom counts inexact
    Formula {
        side: Option<Side>,
        index: usize,
        formula: String,
        issue: FormulaIssue,
    },
    /// the part at `index` times its coefficient does not fit into u64 atoms, it was rejected
    AtomCountOverflow {
        side: Option<Side>,
        index: usize,
        formula: String,
        element: String,
    },
    /// the side contributes no atoms at all
    EmptySide { side: Option<Side> },
}

impl ValidationIssue {
    pub fn side(&self) -> Option<Side> {
        match self {
            ValidationIssue::InvalidCoefficient { side, .. } => *side,
            ValidationIssue::Formula { side, .. } => *side,
            ValidationIssue::AtomCountOverflow { side, .. } => *side,
            ValidationIssue::EmptySide { side } => *side,
        }
    }

    pub(crate) fn with_side(self, new_side: Side) -> Self {
        match self {
            ValidationIssue::InvalidCoefficient {
                index,
                formula,
                coefficient,
                ..
            } => ValidationIssue::InvalidCoefficient {
                side: Some(new_side),
                index,
                formula,
                coefficient,
            },
            ValidationIssue::Formula {
                index,
                formula,
                issue,
                ..
            } => ValidationIssue::Formula {
                side: Some(new_side),
                index,
                formula,
                issue,
            },
            ValidationIssue::AtomCountOverflow {
                index,
                formula,
                element,
                ..
            } => ValidationIssue::AtomCountOverflow {
                side: Some(new_side),
                index,
                formula,
                element,
            },
            ValidationIssue::EmptySide { .. } => ValidationIssue::EmptySide {
                side: Some(new_side),
            },
        }
    }

    /// true for issues that removed a part from the atom totals
    pub fn rejects_part(&self) -> bool {
        match self {
            ValidationIssue::InvalidCoefficient { .. } => true,
            ValidationIssue::AtomCountOverflow { .. } => true,
            ValidationIssue::Formula { issue, .. } => issue.makes_counts_inexact(),
            ValidationIssue::EmptySide { .. } => false,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |s: &Option<Side>| s.map(|s| format!("{} ", s)).unwrap_or_default();
        match self {
            ValidationIssue::InvalidCoefficient {
                side: s,
                index,
                formula,
                coefficient,
            } => write!(
                f,
                "{}part {} ({}): invalid coefficient {}",
                side(s),
                index,
                formula,
                coefficient
            ),
            ValidationIssue::Formula {
                side: s,
                index,
                formula,
                issue,
            } => write!(f, "{}part {} ({}): {}", side(s), index, formula, issue),
            ValidationIssue::AtomCountOverflow {
                side: s,
                index,
                formula,
                element,
            } => write!(
                f,
                "{}part {} ({}): number of {} atoms does not fit into u64",
                side(s),
                index,
                formula,
                element
            ),
            ValidationIssue::EmptySide { side: s } => write!(f, "{}side has no atoms", side(s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("invalid coefficient {coefficient} for '{formula}': coefficients must be positive integers")]
    InvalidCoefficient { formula: String, coefficient: i64 },
    #[error("{side} expect {expected} coefficients, got {got}")]
    CoefficientCountMismatch {
        side: Side,
        expected: usize,
        got: usize,
    },
    #[error("equation has no {0}")]
    EmptySide(Side),
    #[error("maximal coefficient must be at least 1 and keep the coefficient sum within u32")]
    InvalidBound,
    #[error("no balancing coefficients up to {max_coefficient}")]
    NoSolution { max_coefficient: u32 },
    #[error("atoms of '{formula}' overflow: {overflow}")]
    AtomCountOverflow {
        formula: String,
        overflow: AtomCountOverflow,
    },
    #[error(transparent)]
    Formula(#[from] FormulaError),
}
