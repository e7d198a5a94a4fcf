//! Single entry point for balance checks: aggregates both sides, compares them and assembles
//! a `BalanceVerdict` for the presentation layer.
//!
//! Pure function of its inputs: no state is kept between calls, so it can be rerun on every
//! coefficient change.
use crate::Balancing::aggregator::{WeightedFormula, aggregate};
use crate::Balancing::atom_count::AtomCount;
use crate::Balancing::comparator::compare;
use crate::Balancing::errors::{BalanceError, Side, ValidationIssue};
use crate::Game::equations::Equation;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceVerdict {
    /// same atoms on both sides, no rejected part and no empty side. It can be false with an
    /// empty `unbalanced_elements`; `issues` then names the rejected part or the empty side
    pub balanced: bool,
    pub reactant_atoms: AtomCount,
    pub product_atoms: AtomCount,
    /// elements with unequal counts on the two sides, alphabetical
    pub unbalanced_elements: Vec<String>,
    /// recoverable conditions from parsing and aggregation, reactants first
    pub issues: Vec<ValidationIssue>,
}

impl BalanceVerdict {
    /// true if some reactant or product was rejected for its coefficient
    pub fn has_rejected_parts(&self) -> bool {
        self.issues.iter().any(ValidationIssue::rejects_part)
    }
}

/// Checks whether the reactants and products, each scaled by its coefficient, contain the
/// same atoms. An equation with an empty side or with a rejected part is never balanced.
pub fn validate(reactants: &[WeightedFormula], products: &[WeightedFormula]) -> BalanceVerdict {
    let reactant_side = aggregate(reactants);
    let product_side = aggregate(products);
    let comparison = compare(&reactant_side.atoms, &product_side.atoms);

    let rejected = reactant_side.has_rejected_parts() || product_side.has_rejected_parts();
    let empty_side = reactant_side.atoms.is_empty() || product_side.atoms.is_empty();
    let balanced = comparison.equal && !rejected && !empty_side;

    let issues: Vec<ValidationIssue> = reactant_side
        .issues
        .into_iter()
        .map(|issue| issue.with_side(Side::Reactants))
        .chain(
            product_side
                .issues
                .into_iter()
                .map(|issue| issue.with_side(Side::Products)),
        )
        .collect();
    debug!(
        "validated {:?} -> {:?}: balanced {}, mismatched {:?}",
        reactants, products, balanced, comparison.differing_elements
    );
    BalanceVerdict {
        balanced,
        reactant_atoms: reactant_side.atoms,
        product_atoms: product_side.atoms,
        unbalanced_elements: comparison.differing_elements,
        issues,
    }
}

pub fn is_balanced(reactants: &[WeightedFormula], products: &[WeightedFormula]) -> bool {
    validate(reactants, products).balanced
}

/// validates a catalog equation with coefficients the player is trying
pub fn validate_equation(
    equation: &Equation,
    reactant_coefficients: &[i64],
    product_coefficients: &[i64],
) -> Result<BalanceVerdict, BalanceError> {
    let reactants = equation.weighted_reactants(reactant_coefficients)?;
    let products = equation.weighted_products(product_coefficients)?;
    Ok(validate(&reactants, &products))
}
