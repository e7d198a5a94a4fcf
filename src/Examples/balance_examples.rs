use crate::Balancing::aggregator::weighted;
use crate::Balancing::coefficient_solver::{MAX_COEFFICIENT, find_balancing_coefficients};
use crate::Balancing::formula_display::{atom_table, beautify_formula, format_atom_counts};
use crate::Balancing::formula_parser::parse_formula_detailed;
use crate::Balancing::molmass::{calculate_molar_mass, create_elem_composition_matrix};
use crate::Balancing::validation::validate;
use crate::Game::equations::equations;
use crate::Game::progress_store::{ProgressStore, StoreError};
use log::{info, warn};

pub fn balance_examples(task: usize) -> Result<(), StoreError> {
    match task {
        0 => {
            // ATOMIC COMPOSITION AND MOLAR MASSES
            for formula in ["H2O", "Ca(OH)2", "K4[Fe(CN)6]", "Al2(SO4)3(aq)", "SO4^2-", "Ca(OH"] {
                let parsed = parse_formula_detailed(formula);
                let (molar_mass, _) = calculate_molar_mass(formula);
                println!(
                    "{:<16} {:<28} {:>9.3} g/mol",
                    beautify_formula(formula),
                    format_atom_counts(&parsed.atoms),
                    molar_mass
                );
                for issue in parsed.issues {
                    warn!("{}: {}", formula, issue);
                }
            }
            let (matrix, elements) = create_elem_composition_matrix(&["H2O", "NaCl", "C3H8", "CH4"]);
            println!("elements: {:?}{}", elements, matrix);
        }
        1 => {
            // BALANCE CHECKS
            let attempts = [
                (weighted(&[("H2", 2), ("O2", 1)]), weighted(&[("H2O", 2)])),
                (weighted(&[("H2", 1), ("O2", 1)]), weighted(&[("H2O", 1)])),
                (weighted(&[("C3H8", 1), ("O2", 5)]), weighted(&[("CO2", 3), ("H2O", 4)])),
                (weighted(&[("C3H8", 0), ("O2", 5)]), weighted(&[("CO2", 3), ("H2O", 4)])),
            ];
            for (reactants, products) in attempts.iter() {
                let verdict = validate(reactants, products);
                println!(
                    "balanced: {}, mismatched: {:?}",
                    verdict.balanced, verdict.unbalanced_elements
                );
                atom_table(&verdict).printstd();
                for issue in verdict.issues.iter() {
                    warn!("{}", issue);
                }
            }
        }
        2 => {
            // SMALLEST COEFFICIENTS FOR THE CATALOG
            for equation in equations() {
                match find_balancing_coefficients(
                    &equation.reactant_formulas(),
                    &equation.product_formulas(),
                    MAX_COEFFICIENT,
                ) {
                    Ok(solution) => println!("{}: {}", equation.id, solution),
                    Err(e) => warn!("{}: {}", equation.id, e),
                }
            }
        }
        3 => {
            // A SHORT GAME SESSION, progress kept in memory
            let mut store = ProgressStore::new();
            for equation in equations() {
                store.set_current_equation(equation.clone());
                info!("{}: {}", equation.id, equation.skeleton());
                if let Some(hint) = store.use_hint() {
                    println!("hint: {}", hint);
                }
                let wrong_r = vec![1i64; equation.reactants.len()];
                let wrong_p = vec![1i64; equation.products.len()];
                let verdict = store.submit_solution(&wrong_r, &wrong_p)?;
                println!("all ones balanced: {}", verdict.balanced);

                let solution = find_balancing_coefficients(
                    &equation.reactant_formulas(),
                    &equation.product_formulas(),
                    MAX_COEFFICIENT,
                )?;
                let verdict = store.submit_solution(
                    &solution.reactant_coefficients(),
                    &solution.product_coefficients(),
                )?;
                println!("{} balanced: {}", solution, verdict.balanced);
            }
            println!("{}", serde_json::to_string_pretty(store.state())?);
        }
        _ => {
            warn!("no example with number {}", task);
        }
    }
    Ok(())
}
