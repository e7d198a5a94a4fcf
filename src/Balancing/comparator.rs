//! Compares atom totals of the two sides of an equation.
use crate::Balancing::atom_count::AtomCount;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub equal: bool,
    /// alphabetical
    pub differing_elements: Vec<String>,
}

/// Element-wise comparison over the union of elements of both sides. An element missing on
/// one side counts as 0 there.
pub fn compare(left: &AtomCount, right: &AtomCount) -> Comparison {
    let all_elements: BTreeSet<&String> = left
        .iter()
        .map(|(element, _)| element)
        .chain(right.iter().map(|(element, _)| element))
        .collect();
    let differing_elements: Vec<String> = all_elements
        .into_iter()
        .filter(|element| left.get(element) != right.get(element))
        .cloned()
        .collect();
    Comparison {
        equal: differing_elements.is_empty(),
        differing_elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_counts() {
        let a = AtomCount::from_pairs([("H", 4), ("O", 2)]);
        let b = AtomCount::from_pairs([("O", 2), ("H", 4)]);
        let result = compare(&a, &b);
        assert!(result.equal);
        assert!(result.differing_elements.is_empty());
    }

    #[test]
    fn test_absence_is_zero() {
        let a = AtomCount::from_pairs([("H", 2)]);
        let b = AtomCount::from_pairs([("H", 2), ("O", 0)]);
        assert!(compare(&a, &b).equal);
        assert!(compare(&b, &a).equal);
    }

    #[test]
    fn test_differing_elements_are_sorted() {
        let a = AtomCount::from_pairs([("O", 2), ("Na", 1), ("C", 1)]);
        let b = AtomCount::from_pairs([("O", 1), ("C", 1), ("Cl", 1)]);
        let result = compare(&a, &b);
        assert!(!result.equal);
        assert_eq!(result.differing_elements, vec!["Cl", "Na", "O"]);
    }

    #[test]
    fn test_symmetry() {
        let samples = [
            AtomCount::new(),
            AtomCount::from_pairs([("H", 2)]),
            AtomCount::from_pairs([("H", 2), ("O", 0)]),
            AtomCount::from_pairs([("H", 2), ("O", 1)]),
            AtomCount::from_pairs([("C", 3), ("H", 8)]),
        ];
        for a in &samples {
            for b in &samples {
                let ab = compare(a, b);
                let ba = compare(b, a);
                assert_eq!(ab.equal, ba.equal);
                assert_eq!(ab.differing_elements, ba.differing_elements);
            }
        }
    }
}
