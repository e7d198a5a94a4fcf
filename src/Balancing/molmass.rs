//! Element data: molar masses of formulae, check of element symbols and the element
//! composition matrix of a set of substances
use crate::Balancing::atom_count::AtomCount;
use crate::Balancing::formula_parser::parse_formula;
use log::{info, warn};
use nalgebra::DMatrix;
use std::collections::BTreeSet;

// Define a struct to hold element data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub atomic_number: u8,
    pub atomic_mass: f64,
}

const fn el(symbol: &'static str, name: &'static str, atomic_number: u8, atomic_mass: f64) -> Element {
    Element {
        symbol,
        name,
        atomic_number,
        atomic_mass,
    }
}

// Elements 1-54 (H through Xe) and their atomic masses
pub const ELEMENTS: &[Element] = &[
    el("H", "Hydrogen", 1, 1.008),
    el("He", "Helium", 2, 4.0026),
    el("Li", "Lithium", 3, 6.94),
    el("Be", "Beryllium", 4, 9.0122),
    el("B", "Boron", 5, 10.81),
    el("C", "Carbon", 6, 12.011),
    el("N", "Nitrogen", 7, 14.007),
    el("O", "Oxygen", 8, 15.999),
    el("F", "Fluorine", 9, 18.998),
    el("Ne", "Neon", 10, 20.18),
    el("Na", "Sodium", 11, 22.99),
    el("Mg", "Magnesium", 12, 24.305),
    el("Al", "Aluminium", 13, 26.98),
    el("Si", "Silicon", 14, 28.085),
    el("P", "Phosphorus", 15, 30.974),
    el("S", "Sulfur", 16, 32.065),
    el("Cl", "Chlorine", 17, 35.45),
    el("Ar", "Argon", 18, 39.948),
    el("K", "Potassium", 19, 39.098),
    el("Ca", "Calcium", 20, 40.078),
    el("Sc", "Scandium", 21, 44.9559),
    el("Ti", "Titanium", 22, 47.867),
    el("V", "Vanadium", 23, 50.9415),
    el("Cr", "Chromium", 24, 51.9961),
    el("Mn", "Manganese", 25, 54.938),
    el("Fe", "Iron", 26, 55.845),
    el("Co", "Cobalt", 27, 58.933),
    el("Ni", "Nickel", 28, 58.693),
    el("Cu", "Copper", 29, 63.546),
    el("Zn", "Zinc", 30, 65.38),
    el("Ga", "Gallium", 31, 69.723),
    el("Ge", "Germanium", 32, 72.63),
    el("As", "Arsenic", 33, 74.9216),
    el("Se", "Selenium", 34, 78.96),
    el("Br", "Bromine", 35, 79.904),
    el("Kr", "Krypton", 36, 83.798),
    el("Rb", "Rubidium", 37, 85.4678),
    el("Sr", "Strontium", 38, 87.62),
    el("Y", "Yttrium", 39, 88.9059),
    el("Zr", "Zirconium", 40, 91.224),
    el("Nb", "Niobium", 41, 92.9064),
    el("Mo", "Molybdenum", 42, 95.95),
    el("Tc", "Technetium", 43, 98.0),
    el("Ru", "Ruthenium", 44, 101.07),
    el("Rh", "Rhodium", 45, 102.906),
    el("Pd", "Palladium", 46, 106.42),
    el("Ag", "Silver", 47, 107.868),
    el("Cd", "Cadmium", 48, 112.414),
    el("In", "Indium", 49, 114.818),
    el("Sn", "Tin", 50, 118.71),
    el("Sb", "Antimony", 51, 121.76),
    el("Te", "Tellurium", 52, 127.6),
    el("I", "Iodine", 53, 126.904),
    el("Xe", "Xenon", 54, 131.293),
];

pub fn element_by_symbol(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// symbols present in `atoms` that are not in the element table, alphabetical.
/// The parser accepts any capitalized symbol, this is the optional check on top of it
pub fn unknown_elements(atoms: &AtomCount) -> Vec<String> {
    atoms
        .elements()
        .into_iter()
        .filter(|symbol| element_by_symbol(symbol).is_none())
        .collect()
}

// Function to calculate the molar mass of a substance given its chemical formula.
// Elements missing in the table contribute nothing and are logged
pub fn calculate_molar_mass(formula: &str) -> (f64, AtomCount) {
    let counts = parse_formula(formula);
    let mut molar_mass = 0.0;
    for (element, &count) in counts.iter() {
        match element_by_symbol(element) {
            Some(e) => molar_mass += e.atomic_mass * count as f64,
            None => warn!("no atomic mass for element {} in {}", element, formula),
        }
    }
    (molar_mass, counts)
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn calculate_molar_mass_of_vector_of_subs(vec_of_formulae: &[&str]) -> Vec<f64> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula).0)
        .collect()
}

/// Matrix of element composition: row i is substance i, column j is the number of atoms of
/// element j in it. Elements are returned alphabetically.
pub fn create_elem_composition_matrix(vec_of_formulae: &[&str]) -> (DMatrix<f64>, Vec<String>) {
    info!("creating element composition matrix of {:?}", vec_of_formulae);
    let vec_of_compositions: Vec<AtomCount> = vec_of_formulae
        .iter()
        .map(|formula| parse_formula(formula))
        .collect();
    // create a unique sorted list of elements from the given formula vector
    let unique_vec_of_elems: Vec<String> = vec_of_compositions
        .iter()
        .flat_map(|counts| counts.elements())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    let matrix = DMatrix::from_fn(
        vec_of_compositions.len(),
        unique_vec_of_elems.len(),
        |substance_i, element_j| {
            vec_of_compositions[substance_i].get(&unique_vec_of_elems[element_j]) as f64
        },
    );
    (matrix, unique_vec_of_elems)
}
