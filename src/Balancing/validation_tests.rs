/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Balancing::aggregator::{WeightedFormula, weighted};
    use crate::Balancing::atom_count::AtomCount;
    use crate::Balancing::coefficient_solver::{MAX_COEFFICIENT, find_balancing_coefficients};
    use crate::Balancing::errors::{BalanceError, FormulaIssue, Side, ValidationIssue};
    use crate::Balancing::validation::{is_balanced, validate, validate_equation};
    use crate::Game::equations::{equations, get_equation_by_id};
    use regex::Regex;

    #[test]
    fn test_water_synthesis_balanced() {
        let verdict = validate(&weighted(&[("H2", 2), ("O2", 1)]), &weighted(&[("H2O", 2)]));
        assert!(verdict.balanced);
        assert!(verdict.unbalanced_elements.is_empty());
        assert_eq!(
            verdict.reactant_atoms,
            AtomCount::from_pairs([("H", 4), ("O", 2)])
        );
        assert_eq!(verdict.product_atoms, verdict.reactant_atoms);
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn test_water_synthesis_unbalanced() {
        let verdict = validate(&weighted(&[("H2", 1), ("O2", 1)]), &weighted(&[("H2O", 1)]));
        assert!(!verdict.balanced);
        // H: 2 = 2, O: 2 != 1
        assert_eq!(verdict.unbalanced_elements, vec!["O"]);
        assert_eq!(verdict.reactant_atoms.get("O"), 2);
        assert_eq!(verdict.product_atoms.get("O"), 1);
    }

    #[test]
    fn test_propane_combustion() {
        let verdict = validate(
            &weighted(&[("C3H8", 1), ("O2", 5)]),
            &weighted(&[("CO2", 3), ("H2O", 4)]),
        );
        assert!(verdict.balanced);
        assert_eq!(
            verdict.product_atoms,
            AtomCount::from_pairs([("C", 3), ("H", 8), ("O", 10)])
        );
        assert!(is_balanced(
            &weighted(&[("C3H8", 1), ("O2", 5)]),
            &weighted(&[("CO2", 3), ("H2O", 4)]),
        ));
    }

    #[test]
    fn test_several_mismatches_are_sorted() {
        let verdict = validate(
            &weighted(&[("C3H8", 1), ("O2", 1)]),
            &weighted(&[("CO2", 1), ("H2O", 1)]),
        );
        assert!(!verdict.balanced);
        assert_eq!(verdict.unbalanced_elements, vec!["C", "H", "O"]);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let reactants = weighted(&[("Ca(OH)2", 3), ("H3PO4", 2)]);
        let products = weighted(&[("Ca3(PO4)2", 1), ("H2O", 6)]);
        let first = validate(&reactants, &products);
        let second = validate(&reactants, &products);
        assert_eq!(first, second);
        assert!(first.balanced);
    }

    #[test]
    fn test_state_marks_and_subscripts() {
        let verdict = validate(
            &weighted(&[("H₂(g)", 2), ("O₂(g)", 1)]),
            &weighted(&[("H₂O(l)", 2)]),
        );
        assert!(verdict.balanced);
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn test_invalid_coefficient_is_reported_not_hidden() {
        // 0 H2 is rejected, other parts are still counted
        let verdict = validate(&weighted(&[("H2", 0), ("O2", 1)]), &weighted(&[("H2O", 2)]));
        assert!(!verdict.balanced);
        assert!(verdict.has_rejected_parts());
        assert_eq!(verdict.reactant_atoms, AtomCount::from_pairs([("O", 2)]));
        assert_eq!(verdict.unbalanced_elements, vec!["H"]);
        assert_eq!(
            verdict.issues,
            vec![ValidationIssue::InvalidCoefficient {
                side: Some(Side::Reactants),
                index: 0,
                formula: "H2".to_string(),
                coefficient: 0
            }]
        );
    }

    #[test]
    fn test_rejected_part_blocks_balance_even_if_atoms_match() {
        // the rejected part has no atoms worth counting, totals match, still not balanced
        let verdict = validate(
            &[WeightedFormula::new("H2", 1), WeightedFormula::new("He", -1)],
            &weighted(&[("H2", 1)]),
        );
        assert!(verdict.unbalanced_elements.is_empty());
        assert!(!verdict.balanced);
    }

    #[test]
    fn test_formula_issues_keep_their_side() {
        let verdict = validate(&weighted(&[("H2", 1)]), &weighted(&[("H2)", 1)]));
        assert!(verdict.balanced);
        assert_eq!(
            verdict.issues,
            vec![ValidationIssue::Formula {
                side: Some(Side::Products),
                index: 0,
                formula: "H2)".to_string(),
                issue: FormulaIssue::UnmatchedClose { position: 2 },
            }]
        );
        assert_eq!(verdict.issues[0].side(), Some(Side::Products));
    }

    #[test]
    fn test_empty_sides_are_not_balanced() {
        let verdict = validate(&[], &[]);
        assert!(!verdict.balanced);
        assert!(verdict.unbalanced_elements.is_empty());
        assert_eq!(
            verdict.issues,
            vec![
                ValidationIssue::EmptySide {
                    side: Some(Side::Reactants)
                },
                ValidationIssue::EmptySide {
                    side: Some(Side::Products)
                },
            ]
        );

        let verdict = validate(&weighted(&[("H2", 1)]), &[]);
        assert!(!verdict.balanced);
        assert_eq!(
            verdict.issues,
            vec![ValidationIssue::EmptySide {
                side: Some(Side::Products)
            }]
        );
    }

    #[test]
    fn test_overflowing_counts_never_balance() {
        // clamped at u64::MAX both sides would look equal
        let verdict = validate(
            &weighted(&[("H9223372036854775808", 2)]),
            &weighted(&[("H9223372036854775808", 3)]),
        );
        assert!(!verdict.balanced);
        assert!(verdict.has_rejected_parts());
        assert!(verdict.issues.contains(&ValidationIssue::AtomCountOverflow {
            side: Some(Side::Reactants),
            index: 0,
            formula: "H9223372036854775808".to_string(),
            element: "H".to_string(),
        }));
        assert!(verdict.issues.contains(&ValidationIssue::AtomCountOverflow {
            side: Some(Side::Products),
            index: 0,
            formula: "H9223372036854775808".to_string(),
            element: "H".to_string(),
        }));

        // over-long digit runs are not read as 1 on one side and 1 on the other
        let verdict = validate(
            &weighted(&[("H99999999999999999999999", 1)]),
            &weighted(&[("H", 1)]),
        );
        assert!(!verdict.balanced);
        assert!(verdict.has_rejected_parts());
    }

    #[test]
    fn test_verdict_json_shape() {
        let verdict = validate(&weighted(&[("H2", 1), ("O2", 1)]), &weighted(&[("H2O", 1)]));
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["balanced"], false);
        assert_eq!(json["reactantAtoms"]["O"], 2);
        assert_eq!(json["productAtoms"]["H"], 2);
        assert_eq!(json["unbalancedElements"][0], "O");
    }

    #[test]
    fn test_validate_catalog_equation() {
        let propane = get_equation_by_id("eq-003").unwrap();
        assert!(validate_equation(propane, &[1, 5], &[3, 4]).unwrap().balanced);
        assert!(!validate_equation(propane, &[1, 1], &[1, 1]).unwrap().balanced);
        assert_eq!(
            validate_equation(propane, &[1, 5, 1], &[3, 4]).unwrap_err(),
            BalanceError::CoefficientCountMismatch {
                side: Side::Reactants,
                expected: 2,
                got: 3
            }
        );
    }

    #[test]
    fn test_catalog_hints_match_smallest_solution() {
        // the last hint of every catalog equation spells out the balanced equation
        let coefficient = Regex::new(r"^(\d*)(.+)$").unwrap();
        for equation in equations() {
            let solution = find_balancing_coefficients(
                &equation.reactant_formulas(),
                &equation.product_formulas(),
                MAX_COEFFICIENT,
            )
            .unwrap();
            assert!(
                validate_equation(
                    equation,
                    &solution.reactant_coefficients(),
                    &solution.product_coefficients()
                )
                .unwrap()
                .balanced
            );

            let last_hint = equation.hints.last().unwrap();
            let balanced = last_hint.split(": ").nth(1).unwrap();
            let (left, right) = balanced.split_once(" → ").unwrap();
            let parse_side = |side: &str| -> Vec<i64> {
                side.split(" + ")
                    .map(|term| {
                        let caps = coefficient.captures(term).unwrap();
                        caps[1].parse().unwrap_or(1)
                    })
                    .collect()
            };
            assert_eq!(parse_side(left), solution.reactant_coefficients(), "{}", equation.id);
            assert_eq!(parse_side(right), solution.product_coefficients(), "{}", equation.id);
        }
    }
}
