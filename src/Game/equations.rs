//! Catalog of equations the player balances.
//!
//! Records are read-only: the coefficients a player is trying are passed in with every
//! check and never stored on the equation.
use crate::Balancing::aggregator::WeightedFormula;
use crate::Balancing::errors::{BalanceError, Side};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhysicalState {
    Solid,
    Liquid,
    Gas,
    Aqueous,
}

impl PhysicalState {
    /// mark used in formulae: (s), (l), (g), (aq)
    pub fn mark(&self) -> &'static str {
        match self {
            PhysicalState::Solid => "(s)",
            PhysicalState::Liquid => "(l)",
            PhysicalState::Gas => "(g)",
            PhysicalState::Aqueous => "(aq)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReactionType {
    Synthesis,
    Decomposition,
    Combustion,
    SingleReplacement,
    DoubleReplacement,
    AcidBase,
    Redox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub id: String,
    pub formula: String,
    pub name: Option<String>,
    pub state: Option<PhysicalState>,
}

impl Molecule {
    pub fn new(id: &str, formula: &str, name: &str, state: PhysicalState) -> Self {
        Self {
            id: id.to_string(),
            formula: formula.to_string(),
            name: Some(name.to_string()),
            state: Some(state),
        }
    }

    /// formula followed by its state mark, e.g. H₂O(l)
    pub fn formula_with_state(&self) -> String {
        match self.state {
            Some(state) => format!("{}{}", self.formula, state.mark()),
            None => self.formula.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equation {
    pub id: String,
    pub reactants: Vec<Molecule>,
    pub products: Vec<Molecule>,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub difficulty: Difficulty,
    pub hints: Vec<String>,
    pub explanation: Option<String>,
}

fn pair_with(
    molecules: &[Molecule],
    coefficients: &[i64],
    side: Side,
) -> Result<Vec<WeightedFormula>, BalanceError> {
    if molecules.len() != coefficients.len() {
        return Err(BalanceError::CoefficientCountMismatch {
            side,
            expected: molecules.len(),
            got: coefficients.len(),
        });
    }
    Ok(molecules
        .iter()
        .zip(coefficients.iter())
        .map(|(molecule, &c)| WeightedFormula::new(&molecule.formula_with_state(), c))
        .collect())
}

impl Equation {
    /// reactants paired with the coefficients being tried, one coefficient per molecule
    pub fn weighted_reactants(&self, coefficients: &[i64]) -> Result<Vec<WeightedFormula>, BalanceError> {
        pair_with(&self.reactants, coefficients, Side::Reactants)
    }

    pub fn weighted_products(&self, coefficients: &[i64]) -> Result<Vec<WeightedFormula>, BalanceError> {
        pair_with(&self.products, coefficients, Side::Products)
    }

    pub fn reactant_formulas(&self) -> Vec<&str> {
        self.reactants.iter().map(|m| m.formula.as_str()).collect()
    }

    pub fn product_formulas(&self) -> Vec<&str> {
        self.products.iter().map(|m| m.formula.as_str()).collect()
    }

    /// "H₂ + O₂ → H₂O", the form shown before the player sets coefficients
    pub fn skeleton(&self) -> String {
        format!(
            "{} → {}",
            self.reactant_formulas().join(" + "),
            self.product_formulas().join(" + ")
        )
    }
}

fn hints(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

static EQUATIONS: LazyLock<Vec<Equation>> = LazyLock::new(|| {
    use PhysicalState::*;
    vec![
        Equation {
            id: "eq-001".to_string(),
            reactants: vec![
                Molecule::new("h2", "H₂", "Hydrogen gas", Gas),
                Molecule::new("o2", "O₂", "Oxygen gas", Gas),
            ],
            products: vec![Molecule::new("h2o", "H₂O", "Water", Liquid)],
            reaction_type: ReactionType::Synthesis,
            difficulty: Difficulty::Beginner,
            hints: hints(&[
                "Count the hydrogen atoms on each side",
                "Count the oxygen atoms on each side",
                "You need 2 H₂ molecules to balance the hydrogen",
                "The balanced equation is: 2H₂ + O₂ → 2H₂O",
            ]),
            explanation: Some(
                "Hydrogen combines with oxygen to form water. This is a synthesis reaction where two elements combine to form a compound.".to_string(),
            ),
        },
        Equation {
            id: "eq-002".to_string(),
            reactants: vec![Molecule::new("h2o2", "H₂O₂", "Hydrogen peroxide", Liquid)],
            products: vec![
                Molecule::new("h2o", "H₂O", "Water", Liquid),
                Molecule::new("o2", "O₂", "Oxygen gas", Gas),
            ],
            reaction_type: ReactionType::Decomposition,
            difficulty: Difficulty::Beginner,
            hints: hints(&[
                "Count all hydrogen atoms",
                "Count all oxygen atoms",
                "You need 2 H₂O₂ molecules",
                "The balanced equation is: 2H₂O₂ → 2H₂O + O₂",
            ]),
            explanation: Some(
                "Hydrogen peroxide decomposes into water and oxygen gas.".to_string(),
            ),
        },
        Equation {
            id: "eq-003".to_string(),
            reactants: vec![
                Molecule::new("c3h8", "C₃H₈", "Propane", Gas),
                Molecule::new("o2", "O₂", "Oxygen gas", Gas),
            ],
            products: vec![
                Molecule::new("co2", "CO₂", "Carbon dioxide", Gas),
                Molecule::new("h2o", "H₂O", "Water", Gas),
            ],
            reaction_type: ReactionType::Combustion,
            difficulty: Difficulty::Advanced,
            hints: hints(&[
                "Balance carbon atoms first",
                "Then balance hydrogen atoms",
                "Finally balance oxygen atoms",
                "The balanced equation is: C₃H₈ + 5O₂ → 3CO₂ + 4H₂O",
            ]),
            explanation: Some(
                "Propane burns in oxygen to produce carbon dioxide and water.".to_string(),
            ),
        },
    ]
});

pub fn equations() -> &'static [Equation] {
    &EQUATIONS
}

pub fn get_equation_by_id(id: &str) -> Option<&'static Equation> {
    EQUATIONS.iter().find(|equation| equation.id == id)
}
