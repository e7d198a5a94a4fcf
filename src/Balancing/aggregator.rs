//! Applies coefficients to parsed formulae and sums atoms over one side of an equation.
use crate::Balancing::atom_count::AtomCount;
use crate::Balancing::errors::{BalanceError, FormulaIssue, ValidationIssue};
use crate::Balancing::formula_parser::{parse_formula_detailed, parse_formula_strict};
use log::warn;
use serde::{Deserialize, Serialize};

/// formula with the number of molecules taking part in the reaction. The coefficient is
/// signed so that the values the aggregator must reject (0, negative) can reach it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedFormula {
    pub formula: String,
    pub coefficient: i64,
}

impl WeightedFormula {
    pub fn new(formula: &str, coefficient: i64) -> Self {
        Self {
            formula: formula.to_string(),
            coefficient,
        }
    }
}

impl From<(&str, i64)> for WeightedFormula {
    fn from((formula, coefficient): (&str, i64)) -> Self {
        Self::new(formula, coefficient)
    }
}

/// builds a side of an equation from (formula, coefficient) pairs
pub fn weighted(parts: &[(&str, i64)]) -> Vec<WeightedFormula> {
    parts.iter().map(|&part| WeightedFormula::from(part)).collect()
}

/// atom totals of one side together with the issues met on the way
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Aggregate {
    pub atoms: AtomCount,
    pub issues: Vec<ValidationIssue>,
}

impl Aggregate {
    /// true if some part did not contribute to `atoms`
    pub fn has_rejected_parts(&self) -> bool {
        self.issues.iter().any(ValidationIssue::rejects_part)
    }
}

/// Sums coefficient * atoms over all parts. A part with a coefficient below 1 is rejected:
/// it adds nothing to the totals and an `InvalidCoefficient` issue is recorded, while the
/// remaining parts are still counted. Parts whose atom counts overflow u64, in the formula
/// itself or after scaling, are rejected the same way. A side left without atoms gets an
/// `EmptySide` issue.
pub fn aggregate(parts: &[WeightedFormula]) -> Aggregate {
    let mut total = Aggregate::default();
    for (index, part) in parts.iter().enumerate() {
        if part.coefficient < 1 {
            warn!(
                "rejected {} with coefficient {}",
                part.formula, part.coefficient
            );
            total.issues.push(ValidationIssue::InvalidCoefficient {
                side: None,
                index,
                formula: part.formula.clone(),
                coefficient: part.coefficient,
            });
            continue;
        }
        let parsed = parse_formula_detailed(&part.formula);
        let inexact = parsed.issues.iter().any(FormulaIssue::makes_counts_inexact);
        total.issues.extend(parsed.issues.into_iter().map(|issue| {
            ValidationIssue::Formula {
                side: None,
                index,
                formula: part.formula.clone(),
                issue,
            }
        }));
        if inexact {
            warn!("rejected {}: atom counts overflow", part.formula);
            continue;
        }
        if let Err(overflow) = total
            .atoms
            .merge_scaled(&parsed.atoms, part.coefficient as u64)
        {
            warn!("rejected {} x {}: {}", part.coefficient, part.formula, overflow);
            total.issues.push(ValidationIssue::AtomCountOverflow {
                side: None,
                index,
                formula: part.formula.clone(),
                element: overflow.element,
            });
        }
    }
    if total.atoms.is_empty() {
        total.issues.push(ValidationIssue::EmptySide { side: None });
    }
    total
}

/// Strict variant of `aggregate` for formulae that do not come from the curated catalog:
/// the first invalid coefficient or malformed formula is an error.
pub fn try_aggregate(parts: &[WeightedFormula]) -> Result<AtomCount, BalanceError> {
    let mut total = AtomCount::new();
    for part in parts {
        if part.coefficient < 1 {
            return Err(BalanceError::InvalidCoefficient {
                formula: part.formula.clone(),
                coefficient: part.coefficient,
            });
        }
        let atoms = parse_formula_strict(&part.formula)?;
        total
            .merge_scaled(&atoms, part.coefficient as u64)
            .map_err(|overflow| BalanceError::AtomCountOverflow {
                formula: part.formula.clone(),
                overflow,
            })?;
    }
    Ok(total)
}
