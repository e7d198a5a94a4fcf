//! Parser of chemical formulae into atom counts.
//!
//! Single left-to-right scan with a stack of partial counts, so groups nest to any depth:
//! `Ca(OH)2` -> {Ca: 1, O: 2, H: 2}, `K4[Fe(CN)6]` -> {C: 6, Fe: 1, K: 4, N: 6}.
//! An element symbol is an uppercase letter followed by any lowercase letters, its count is
//! the digit run right after it (1 if there is none). Symbols are not checked against the
//! periodic table here, see `molmass::unknown_elements` for that.
//!
//! Before the scan:
//! - unicode subscript digits (H₂O) are turned into ascii digits
//! - trailing physical state marks "(s)", "(l)", "(g)", "(aq)" are removed
//! - a trailing charge mark ("+", "2-", "^2+") is removed
//!
//! The parser is permissive: it never fails and reports everything it had to skip or repair
//! as `FormulaIssue`s. `parse_formula_strict` turns the first issue into an error.
use crate::Balancing::atom_count::AtomCount;
use crate::Balancing::errors::{FormulaError, FormulaIssue};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

static STATE_MARK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\([slgaq]+\)\s*)+$").expect("state mark regex is valid")
});
// "^2+", "^-", "+", "--". A bare digit before the sign stays, it is read as a count
static CHARGE_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\^\d*)?[+\-]+\s*$").expect("charge mark regex is valid"));

/// atom counts of a formula plus everything the scan skipped or repaired
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFormula {
    pub atoms: AtomCount,
    pub issues: Vec<FormulaIssue>,
}

impl ParsedFormula {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

fn subscript_to_ascii(c: char) -> char {
    match c {
        '₀'..='₉' => char::from_u32(c as u32 - '₀' as u32 + '0' as u32).unwrap_or(c),
        _ => c,
    }
}

/// formula with subscripts normalized and state and charge marks removed
pub fn clean_formula(formula: &str) -> String {
    let normalized: String = formula.trim().chars().map(subscript_to_ascii).collect();
    let without_state = STATE_MARK.replace(&normalized, "");
    let without_charge = CHARGE_MARK.replace(without_state.trim_end(), "");
    without_charge.trim_end().to_string()
}

/// reads a run of ascii digits starting at `i`. Returns the parsed number (None if there are
/// no digits or the number overflows), whether any digit was present and the next position
fn read_number(chars: &[char], mut i: usize) -> (Option<u64>, bool, usize) {
    let start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if start == i {
        return (None, false, i);
    }
    let digits: String = chars[start..i].iter().collect();
    (digits.parse::<u64>().ok(), true, i)
}

/// count after an element or a closing bracket: 1 if absent, 1 with an issue on overflow
fn read_count(
    chars: &[char],
    i: usize,
    offset: usize,
    issues: &mut Vec<FormulaIssue>,
) -> (u64, usize) {
    match read_number(chars, i) {
        (Some(n), true, next) => (n, next),
        (None, true, next) => {
            issues.push(FormulaIssue::CountOverflow {
                position: offset + i,
            });
            (1, next)
        }
        (_, false, next) => (1, next),
    }
}

fn is_open(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

fn is_close(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// scans the formula and returns atom counts together with the issues found
pub fn parse_formula_detailed(formula: &str) -> ParsedFormula {
    let cleaned = clean_formula(formula);
    let chars: Vec<char> = cleaned.chars().collect();
    // cleaning only drops leading whitespace in front of the scanned text
    let offset = formula.chars().take_while(|c| c.is_whitespace()).count();
    let mut issues = Vec::new();
    // stack of partial counts, the bottom one is the whole formula
    let mut stack: Vec<AtomCount> = vec![AtomCount::new()];
    let mut found_element = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_open(c) {
            stack.push(AtomCount::new());
            i += 1;
        } else if is_close(c) {
            let (multiplier, next) = read_count(&chars, i + 1, offset, &mut issues);
            if stack.len() > 1 {
                let group = stack.pop().unwrap_or_default();
                if let Some(current) = stack.last_mut() {
                    if current.merge_scaled(&group, multiplier).is_err() {
                        issues.push(FormulaIssue::CountOverflow {
                            position: offset + i,
                        });
                    }
                }
            } else {
                issues.push(FormulaIssue::UnmatchedClose {
                    position: offset + i,
                });
            }
            i = next;
        } else if c.is_ascii_uppercase() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            let element: String = chars[start..i].iter().collect();
            let (count, next) = read_count(&chars, i, offset, &mut issues);
            i = next;
            if let Some(current) = stack.last_mut() {
                if current.add(element, count).is_err() {
                    issues.push(FormulaIssue::CountOverflow {
                        position: offset + start,
                    });
                }
            }
            found_element = true;
        } else if c.is_whitespace() {
            i += 1;
        } else {
            issues.push(FormulaIssue::SkippedCharacter {
                position: offset + i,
                character: c,
            });
            i += 1;
        }
    }

    if stack.len() > 1 {
        issues.push(FormulaIssue::UnclosedGroup {
            depth: stack.len() - 1,
        });
        while stack.len() > 1 {
            let group = stack.pop().unwrap_or_default();
            if let Some(parent) = stack.last_mut() {
                if parent.merge(&group).is_err() {
                    issues.push(FormulaIssue::CountOverflow {
                        position: offset + chars.len(),
                    });
                }
            }
        }
    }
    if !found_element {
        issues.push(FormulaIssue::NoElements);
    }
    let atoms = stack.pop().unwrap_or_default();
    debug!("parsed formula {} -> {:?}, issues: {:?}", formula, atoms, issues);
    ParsedFormula { atoms, issues }
}

/// Permissive parse: atom counts of the formula, never fails. Malformed parts are skipped
/// as described in the module docs.
pub fn parse_formula(formula: &str) -> AtomCount {
    parse_formula_detailed(formula).atoms
}

/// Strict parse for formulae that do not come from a curated source: any skipped or
/// repaired part of the formula is an error.
pub fn parse_formula_strict(formula: &str) -> Result<AtomCount, FormulaError> {
    let ParsedFormula { atoms, issues } = parse_formula_detailed(formula);
    match issues.into_iter().next() {
        Some(issue) => Err(FormulaError {
            formula: formula.to_string(),
            issue,
        }),
        None => Ok(atoms),
    }
}
