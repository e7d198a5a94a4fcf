/// element -> number of atoms mapping with absence-as-zero semantics
pub mod atom_count;
/// chemical formula -> atom counts: nested groups "Ca(OH)2", "K4[Fe(CN)6]", multi-letter
/// symbols, unicode subscripts, state marks "(aq)" and charge marks "^2-" are understood.
/// Permissive by default (skipped parts are reported, never fatal), strict on request
/// # Examples
/// ```
/// use ChemMatch::Balancing::formula_parser::parse_formula;
/// let atoms = parse_formula("Ca(OH)2(s)");
/// assert_eq!(atoms.get("Ca"), 1);
/// assert_eq!(atoms.get("O"), 2);
/// assert_eq!(atoms.get("H"), 2);
/// ```
pub mod formula_parser;
/// coefficient * atoms summed over one side of an equation, invalid coefficients reject their part only
pub mod aggregator;
/// element-wise comparison of two atom counts
pub mod comparator;
/// the entry point for balance checks
/// # Examples
/// ```
/// use ChemMatch::Balancing::aggregator::weighted;
/// use ChemMatch::Balancing::validation::validate;
/// let verdict = validate(&weighted(&[("H2", 1), ("O2", 1)]), &weighted(&[("H2O", 1)]));
/// assert!(!verdict.balanced);
/// assert_eq!(verdict.unbalanced_elements, vec!["O"]);
/// ```
pub mod validation;
/// smallest integer coefficients that balance an equation
pub mod coefficient_solver;
/// element table, molar masses, element composition matrix
pub mod molmass;
/// subscripts and superscripts for formulae, text and table forms of atom counts
pub mod formula_display;
pub mod errors;
mod validation_tests;
