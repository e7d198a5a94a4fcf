//! Element -> number of atoms mapping shared by the parser, the aggregator and the comparator.
//!
//! Backed by a `BTreeMap`, so iteration is always alphabetical by element symbol and every
//! printed or serialized form is reproducible. Explicit zero entries are allowed; for all
//! comparisons an absent element and an element with count 0 are the same thing.
//! Counts are exact: a sum or product that does not fit into u64 is an `AtomCountOverflow`.
use crate::Balancing::errors::AtomCountOverflow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomCount(BTreeMap<String, u64>);

impl AtomCount {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// builds a mapping from (element, count) pairs, a repeated element keeps its last count
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(element, count)| (element.into(), count))
                .collect(),
        )
    }

    /// number of atoms of `element`, 0 if the element is absent
    pub fn get(&self, element: &str) -> u64 {
        self.0.get(element).copied().unwrap_or(0)
    }

    /// adds `count` atoms of `element`. Sums rather than overwrites; on overflow nothing is
    /// changed
    pub fn add<S: Into<String>>(&mut self, element: S, count: u64) -> Result<(), AtomCountOverflow> {
        let element = element.into();
        let sum = self
            .get(&element)
            .checked_add(count)
            .ok_or_else(|| AtomCountOverflow {
                element: element.clone(),
            })?;
        self.0.insert(element, sum);
        Ok(())
    }

    /// element-wise sum of `other` into `self`
    pub fn merge(&mut self, other: &AtomCount) -> Result<(), AtomCountOverflow> {
        self.merge_scaled(other, 1)
    }

    /// element-wise sum of `other` multiplied by `factor` into `self`. Either every element is
    /// added or, on overflow, none is
    pub fn merge_scaled(&mut self, other: &AtomCount, factor: u64) -> Result<(), AtomCountOverflow> {
        let mut sums = Vec::with_capacity(other.0.len());
        for (element, &count) in other.iter() {
            let sum = count
                .checked_mul(factor)
                .and_then(|scaled| scaled.checked_add(self.get(element)))
                .ok_or_else(|| AtomCountOverflow {
                    element: element.clone(),
                })?;
            sums.push((element.clone(), sum));
        }
        self.0.extend(sums);
        Ok(())
    }

    /// a copy with every count multiplied by `factor`
    pub fn scaled(&self, factor: u64) -> Result<AtomCount, AtomCountOverflow> {
        let mut scaled = AtomCount::new();
        scaled.merge_scaled(self, factor)?;
        Ok(scaled)
    }

    /// sum of all counts, None if it does not fit into u64
    pub fn total_atoms(&self) -> Option<u64> {
        self.0
            .values()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    /// element symbols with a non-zero count, alphabetical
    pub fn elements(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(element, _)| element.clone())
            .collect()
    }

    /// true if there is no element with a non-zero count
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|&count| count == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// equality that treats absent keys as zero, unlike the derived `PartialEq`
    pub fn same_atoms(&self, other: &AtomCount) -> bool {
        self.0
            .keys()
            .chain(other.0.keys())
            .all(|element| self.get(element) == other.get(element))
    }
}

impl fmt::Display for AtomCount {
    /// {"H": 2, "O": 1} -> "H2 O1"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(element, count)| format!("{}{}", element, count))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sums_repeated_elements() {
        let mut counts = AtomCount::new();
        counts.add("O", 1).unwrap();
        counts.add("H", 2).unwrap();
        counts.add("O", 2).unwrap();
        assert_eq!(counts.get("O"), 3);
        assert_eq!(counts.get("H"), 2);
        assert_eq!(counts.get("N"), 0);
        assert_eq!(counts.total_atoms(), Some(5));
    }

    #[test]
    fn test_scaled_and_merge() {
        let water = AtomCount::from_pairs([("H", 2), ("O", 1)]);
        let two_waters = water.scaled(2).unwrap();
        assert_eq!(two_waters, AtomCount::from_pairs([("H", 4), ("O", 2)]));

        let mut total = AtomCount::from_pairs([("C", 1), ("O", 2)]);
        total.merge(&two_waters).unwrap();
        assert_eq!(
            total,
            AtomCount::from_pairs([("C", 1), ("H", 4), ("O", 4)])
        );
    }

    #[test]
    fn test_overflow_is_an_error_not_a_clamp() {
        let mut counts = AtomCount::from_pairs([("H", u64::MAX)]);
        assert_eq!(
            counts.add("H", 1),
            Err(AtomCountOverflow {
                element: "H".to_string()
            })
        );
        assert_eq!(counts.get("H"), u64::MAX);

        // all or nothing: O would fit, H does not
        let half = AtomCount::from_pairs([("H", 1u64 << 63), ("O", 1)]);
        let mut total = AtomCount::from_pairs([("O", 1)]);
        assert!(total.merge_scaled(&half, 2).is_err());
        assert_eq!(total, AtomCount::from_pairs([("O", 1)]));
        assert!(half.scaled(2).is_err());
        assert_eq!(AtomCount::from_pairs([("H", u64::MAX), ("O", 1)]).total_atoms(), None);
    }

    #[test]
    fn test_zero_entries_behave_like_absence() {
        let a = AtomCount::from_pairs([("H", 2)]);
        let b = AtomCount::from_pairs([("H", 2), ("O", 0)]);
        assert_ne!(a, b);
        assert!(a.same_atoms(&b));
        assert!(b.same_atoms(&a));
        assert_eq!(b.elements(), vec!["H".to_string()]);
        assert!(AtomCount::from_pairs([("O", 0)]).is_empty());
    }

    #[test]
    fn test_alphabetical_iteration_and_display() {
        let counts = AtomCount::from_pairs([("O", 1), ("Ca", 1), ("H", 2)]);
        let order: Vec<&String> = counts.iter().map(|(e, _)| e).collect();
        assert_eq!(order, vec!["Ca", "H", "O"]);
        assert_eq!(counts.to_string(), "Ca1 H2 O1");
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let counts = AtomCount::from_pairs([("O", 1), ("H", 2)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"H":2,"O":1}"#);
        let back: AtomCount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }
}
