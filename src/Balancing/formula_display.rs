//! Text forms of formulae and atom counts for the presentation layer.
use crate::Balancing::atom_count::AtomCount;
use crate::Balancing::validation::BalanceVerdict;
use prettytable::{Cell, Row, Table};
use std::collections::BTreeSet;

fn subscript(d: char) -> char {
    match d {
        '0'..='9' => char::from_u32('₀' as u32 + (d as u32 - '0' as u32)).unwrap_or(d),
        _ => d,
    }
}

fn superscript(c: char) -> char {
    match c {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        other => other,
    }
}

/// H2O -> H₂O, Ca(OH)2 -> Ca(OH)₂, SO4^2- -> SO₄²⁻, Na+ -> Na⁺.
/// Digits are lowered only right after an element symbol or a closing bracket, so a leading
/// coefficient ("2H2O" -> "2H₂O") stays as it is.
pub fn beautify_formula(formula: &str) -> String {
    let chars: Vec<char> = formula.chars().collect();
    let mut out = String::with_capacity(formula.len() * 2);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_uppercase() || matches!(c, ')' | ']' | '}') {
            out.push(c);
            i += 1;
            if c.is_ascii_uppercase() {
                while i < chars.len() && chars[i].is_ascii_lowercase() {
                    out.push(chars[i]);
                    i += 1;
                }
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                out.push(subscript(chars[i]));
                i += 1;
            }
        } else if matches!(c, '^' | '+' | '-') {
            // charge: the caret itself is dropped
            if c != '^' {
                out.push(superscript(c));
            }
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || matches!(chars[i], '+' | '-')) {
                out.push(superscript(chars[i]));
                i += 1;
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}

/// {H: 4, O: 2} -> "4 H, 2 O"
pub fn format_atom_counts(atoms: &AtomCount) -> String {
    atoms
        .iter()
        .map(|(element, count)| format!("{} {}", count, element))
        .collect::<Vec<_>>()
        .join(", ")
}

/// per element breakdown of a verdict: element | reactants | products | status
pub fn atom_table(verdict: &BalanceVerdict) -> Table {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Element"),
        Cell::new("Reactants"),
        Cell::new("Products"),
        Cell::new("Status"),
    ]));
    let elements: BTreeSet<&String> = verdict
        .reactant_atoms
        .iter()
        .chain(verdict.product_atoms.iter())
        .map(|(element, _)| element)
        .collect();
    for element in elements {
        let left = verdict.reactant_atoms.get(element);
        let right = verdict.product_atoms.get(element);
        let status = if left == right { "ok" } else { "unbalanced" };
        table.add_row(Row::new(vec![
            Cell::new(element),
            Cell::new(&left.to_string()),
            Cell::new(&right.to_string()),
            Cell::new(status),
        ]));
    }
    table
}
