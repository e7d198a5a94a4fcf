//! Search of the smallest integer coefficients that balance an equation.
//!
//! Atom conservation is written with the element composition matrix A (rows are substances,
//! reactants first, product rows taken with minus sign): coefficients x balance the equation
//! iff A^T x = 0. Coefficient vectors are enumerated by increasing sum and, within one sum,
//! lexicographically, so the first hit is the smallest solution and is already reduced.
//! The search is exhaustive in 1..=max_coefficient for every substance, it is meant for the
//! handful of substances a textbook equation has.
use crate::Balancing::aggregator::WeightedFormula;
use crate::Balancing::errors::{BalanceError, Side};
use crate::Balancing::molmass::create_elem_composition_matrix;
use log::{debug, info};
use nalgebra::{DMatrix, DVector};
use std::fmt;

/// range of coefficients the player may choose from
pub const MAX_COEFFICIENT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedCoefficients {
    pub reactants: Vec<(String, u32)>,
    pub products: Vec<(String, u32)>,
}

impl BalancedCoefficients {
    pub fn reactant_coefficients(&self) -> Vec<i64> {
        self.reactants.iter().map(|(_, c)| *c as i64).collect()
    }

    pub fn product_coefficients(&self) -> Vec<i64> {
        self.products.iter().map(|(_, c)| *c as i64).collect()
    }

    pub fn weighted_reactants(&self) -> Vec<WeightedFormula> {
        to_weighted(&self.reactants)
    }

    pub fn weighted_products(&self) -> Vec<WeightedFormula> {
        to_weighted(&self.products)
    }

    /// "C3H8 + 5O2 -> 3CO2 + 4H2O", coefficient 1 is not written
    pub fn to_equation_string(&self) -> String {
        format!("{} -> {}", side_string(&self.reactants), side_string(&self.products))
    }
}

impl fmt::Display for BalancedCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_equation_string())
    }
}

fn to_weighted(side: &[(String, u32)]) -> Vec<WeightedFormula> {
    side.iter()
        .map(|(formula, c)| WeightedFormula::new(formula, *c as i64))
        .collect()
}

fn side_string(side: &[(String, u32)]) -> String {
    side.iter()
        .map(|(formula, c)| {
            if *c == 1 {
                formula.clone()
            } else {
                format!("{}{}", c, formula)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// elements x substances matrix, product columns negated
fn conservation_matrix(reactants: &[&str], products: &[&str]) -> DMatrix<f64> {
    let all: Vec<&str> = reactants.iter().chain(products.iter()).copied().collect();
    let (composition, elements) = create_elem_composition_matrix(&all);
    debug!("composition matrix over {:?}: {}", elements, composition);
    let mut signed = composition;
    for i in reactants.len()..all.len() {
        signed.row_mut(i).neg_mut();
    }
    signed.transpose()
}

fn is_conserved(conservation: &DMatrix<f64>, coefficients: &[u32]) -> bool {
    let x = DVector::from_iterator(coefficients.len(), coefficients.iter().map(|&c| c as f64));
    let residual = conservation * x;
    // all entries are exact small integers
    residual.iter().all(|r| r.abs() < 0.5)
}

/// Visits coefficient vectors of length `n` with entries in 1..=max and the given sum, in
/// lexicographic order, stopping at the first one accepted by `accept`.
fn search_with_sum(
    current: &mut Vec<u32>,
    n: usize,
    remaining: u32,
    max: u32,
    accept: &mut impl FnMut(&[u32]) -> bool,
) -> bool {
    let left = (n - current.len()) as u32;
    if left == 0 {
        return remaining == 0 && accept(current);
    }
    // every later position needs at least 1 and at most max
    let low = 1u32.max(remaining.saturating_sub(max.saturating_mul(left - 1)));
    let high = max.min(remaining.saturating_sub(left - 1));
    for c in low..=high {
        current.push(c);
        if search_with_sum(current, n, remaining - c, max, accept) {
            return true;
        }
        current.pop();
    }
    false
}

/// Finds the smallest positive integer coefficients, none above `max_coefficient`, that
/// balance `reactants -> products`. A bound whose coefficient sum does not fit into u32 is
/// `InvalidBound`.
pub fn find_balancing_coefficients(
    reactants: &[&str],
    products: &[&str],
    max_coefficient: u32,
) -> Result<BalancedCoefficients, BalanceError> {
    if reactants.is_empty() {
        return Err(BalanceError::EmptySide(Side::Reactants));
    }
    if products.is_empty() {
        return Err(BalanceError::EmptySide(Side::Products));
    }
    if max_coefficient == 0 {
        return Err(BalanceError::InvalidBound);
    }
    let n = reactants.len() + products.len();
    let min_sum = u32::try_from(n).map_err(|_| BalanceError::InvalidBound)?;
    let max_sum = max_coefficient
        .checked_mul(min_sum)
        .ok_or(BalanceError::InvalidBound)?;
    let conservation = conservation_matrix(reactants, products);

    for sum in min_sum..=max_sum {
        let mut current = Vec::with_capacity(n);
        let mut found = None;
        let hit = search_with_sum(&mut current, n, sum, max_coefficient, &mut |candidate: &[u32]| {
            if is_conserved(&conservation, candidate) {
                found = Some(candidate.to_vec());
                true
            } else {
                false
            }
        });
        if let (true, Some(coefficients)) = (hit, found) {
            let (left, right) = coefficients.split_at(reactants.len());
            let result = BalancedCoefficients {
                reactants: reactants
                    .iter()
                    .map(|f| f.to_string())
                    .zip(left.iter().copied())
                    .collect(),
                products: products
                    .iter()
                    .map(|f| f.to_string())
                    .zip(right.iter().copied())
                    .collect(),
            };
            info!("balanced equation: {}", result);
            return Ok(result);
        }
    }
    Err(BalanceError::NoSolution { max_coefficient })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balancing::validation::validate;

    #[test]
    fn test_water_synthesis() {
        let result = find_balancing_coefficients(&["H2", "O2"], &["H2O"], MAX_COEFFICIENT).unwrap();
        assert_eq!(result.reactant_coefficients(), vec![2, 1]);
        assert_eq!(result.product_coefficients(), vec![2]);
        assert_eq!(result.to_equation_string(), "2H2 + O2 -> 2H2O");
    }

    #[test]
    fn test_propane_combustion() {
        let result =
            find_balancing_coefficients(&["C3H8", "O2"], &["CO2", "H2O"], MAX_COEFFICIENT).unwrap();
        assert_eq!(result.reactant_coefficients(), vec![1, 5]);
        assert_eq!(result.product_coefficients(), vec![3, 4]);
        assert_eq!(result.to_string(), "C3H8 + 5O2 -> 3CO2 + 4H2O");
    }

    #[test]
    fn test_solution_validates() {
        let cases: [(&[&str], &[&str]); 4] = [
            (&["Fe", "O2"], &["Fe2O3"]),
            (&["Al", "HCl"], &["AlCl3", "H2"]),
            (&["Ca(OH)2", "H3PO4"], &["Ca3(PO4)2", "H2O"]),
            (&["H₂O₂"], &["H₂O", "O₂"]),
        ];
        for (reactants, products) in cases {
            let result = find_balancing_coefficients(reactants, products, MAX_COEFFICIENT).unwrap();
            let verdict = validate(&result.weighted_reactants(), &result.weighted_products());
            assert!(verdict.balanced, "{}", result);
        }
    }

    #[test]
    fn test_no_solution_within_bound() {
        // 4Fe + 3O2 -> 2Fe2O3 needs 4
        assert_eq!(
            find_balancing_coefficients(&["Fe", "O2"], &["Fe2O3"], 3).unwrap_err(),
            BalanceError::NoSolution { max_coefficient: 3 }
        );
        // no oxygen on the right at all
        assert!(find_balancing_coefficients(&["H2", "O2"], &["H2"], 5).is_err());
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            find_balancing_coefficients(&[], &["H2O"], 5).unwrap_err(),
            BalanceError::EmptySide(Side::Reactants)
        );
        assert_eq!(
            find_balancing_coefficients(&["H2"], &[], 5).unwrap_err(),
            BalanceError::EmptySide(Side::Products)
        );
        assert_eq!(
            find_balancing_coefficients(&["H2"], &["H2"], 0).unwrap_err(),
            BalanceError::InvalidBound
        );
        // 3 * u32::MAX does not fit the coefficient sum
        assert_eq!(
            find_balancing_coefficients(&["H2", "O2"], &["H2O"], u32::MAX).unwrap_err(),
            BalanceError::InvalidBound
        );
    }

    #[test]
    fn test_large_bound_still_finds_smallest() {
        // 3 * (u32::MAX / 3) fits, the search stops at the first sum that balances
        let result = find_balancing_coefficients(&["H2", "Cl2"], &["HCl"], u32::MAX / 3).unwrap();
        assert_eq!(result.to_equation_string(), "H2 + Cl2 -> 2HCl");
    }
}
