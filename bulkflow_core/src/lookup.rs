//! # Lookup Tables
//!
//! Fixed reference tables keyed by a discrete value (aperture size, incline
//! angle, magnet type, spout diameter). Tables are `static` data defined once
//! and never mutated, so they are shared freely between threads.
//!
//! Three access patterns are supported:
//!
//! - [`LookupTable::lookup_exact`] - the key must be present, otherwise
//!   [`CalcError::KeyNotFound`]
//! - [`LookupTable::lookup_nearest`] - numeric keys only; returns the entry
//!   with the smallest absolute key difference, preferring the smaller key on
//!   a tie
//! - [`LookupTable::first_where`] - threshold scan in table order; `None`
//!   means no row qualifies
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::lookup::LookupTable;
//!
//! static COEFFICIENTS: LookupTable<u32, f64> =
//!     LookupTable::new("coefficients", &[(30, 0.2), (45, 0.3), (60, 0.45)]);
//!
//! assert_eq!(*COEFFICIENTS.lookup_exact(&45).unwrap(), 0.3);
//! assert_eq!(COEFFICIENTS.lookup_nearest(47.0).unwrap().0, 45);
//! assert!(COEFFICIENTS.lookup_exact(&50).is_err());
//! ```

use std::borrow::Borrow;
use std::fmt::Display;

use crate::errors::{CalcError, CalcResult};

/// An ordered, immutable key → value table.
#[derive(Debug)]
pub struct LookupTable<K: 'static, V: 'static> {
    name: &'static str,
    entries: &'static [(K, V)],
}

impl<K: 'static, V: 'static> LookupTable<K, V> {
    /// Define a table over static entries (usable in `static` items)
    pub const fn new(name: &'static str, entries: &'static [(K, V)]) -> Self {
        LookupTable { name, entries }
    }

    /// Table name, used in error messages
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All entries in definition order
    pub fn entries(&self) -> &'static [(K, V)] {
        self.entries
    }

    /// Keys in definition order
    pub fn keys(&self) -> impl Iterator<Item = &'static K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry (in table order) satisfying `predicate`.
    ///
    /// Returns `None` when no row qualifies. Callers treat that as a valid
    /// "no suitable size" outcome rather than an error.
    pub fn first_where<P>(&self, mut predicate: P) -> Option<&'static (K, V)>
    where
        P: FnMut(&K, &V) -> bool,
    {
        self.entries.iter().find(|(k, v)| predicate(k, v))
    }
}

impl<K: 'static, V: 'static> LookupTable<K, V> {
    /// Value for `key`, or `KeyNotFound` if the key is absent.
    ///
    /// String-keyed tables accept a borrowed `&str` of any lifetime.
    pub fn lookup_exact<Q>(&self, key: &Q) -> CalcResult<&'static V>
    where
        K: Borrow<Q>,
        Q: PartialEq + Display + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
            .map(|(_, v)| v)
            .ok_or_else(|| CalcError::key_not_found(self.name, key))
    }

    /// Check whether `key` is present
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries.iter().any(|(k, _)| <K as Borrow<Q>>::borrow(k) == key)
    }
}

impl<K: Copy + Into<f64> + 'static, V: 'static> LookupTable<K, V> {
    /// Entry whose key is numerically closest to `query`.
    ///
    /// Ties go to the smaller key regardless of table order. Only an empty
    /// table fails.
    pub fn lookup_nearest(&self, query: f64) -> CalcResult<(K, &'static V)> {
        let mut best: Option<&'static (K, V)> = None;
        for entry in self.entries {
            let key: f64 = entry.0.into();
            best = match best {
                None => Some(entry),
                Some(current) => {
                    let current_key: f64 = current.0.into();
                    let diff = (key - query).abs();
                    let current_diff = (current_key - query).abs();
                    if diff < current_diff || (diff == current_diff && key < current_key) {
                        Some(entry)
                    } else {
                        Some(current)
                    }
                }
            };
        }

        let (key, value) = best.ok_or_else(|| CalcError::key_not_found(self.name, query))?;
        let resolved: f64 = (*key).into();
        log::trace!("{}: nearest key to {} is {}", self.name, query, resolved);
        Ok((*key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Deliberately unsorted, descending like the belt coefficient table
    static ANGLES: LookupTable<u32, f64> = LookupTable::new(
        "angles",
        &[(90, 0.75), (75, 0.6), (60, 0.45), (45, 0.3), (30, 0.2)],
    );

    static NAMES: LookupTable<&str, u32> =
        LookupTable::new("names", &[("ceramic", 1500), ("rare_earth", 3500)]);

    static EMPTY: LookupTable<u32, f64> = LookupTable::new("empty", &[]);

    #[test]
    fn test_exact_returns_every_tabulated_value() {
        for (key, value) in ANGLES.entries() {
            assert_eq!(ANGLES.lookup_exact(key).unwrap(), value);
        }
        assert_eq!(*NAMES.lookup_exact("rare_earth").unwrap(), 3500);
    }

    #[test]
    fn test_exact_missing_key() {
        let err = ANGLES.lookup_exact(&50).unwrap_err();
        assert_eq!(
            err,
            CalcError::KeyNotFound {
                table: "angles".to_string(),
                key: "50".to_string(),
            }
        );
        assert!(NAMES.lookup_exact("alnico").is_err());
    }

    #[test]
    fn test_nearest() {
        // |47-45| = 2 < |47-60| = 13
        assert_eq!(ANGLES.lookup_nearest(47.0).unwrap(), (45, &0.3));
        assert_eq!(ANGLES.lookup_nearest(0.0).unwrap().0, 30);
        assert_eq!(ANGLES.lookup_nearest(120.0).unwrap().0, 90);
        assert_eq!(ANGLES.lookup_nearest(75.0).unwrap().0, 75);
    }

    #[test]
    fn test_nearest_tie_prefers_smaller_key() {
        assert_eq!(ANGLES.lookup_nearest(52.5).unwrap().0, 45);
        assert_eq!(ANGLES.lookup_nearest(37.5).unwrap().0, 30);
        assert_eq!(ANGLES.lookup_nearest(82.5).unwrap().0, 75);
    }

    #[test]
    fn test_nearest_empty_table() {
        assert!(EMPTY.lookup_nearest(1.0).is_err());
    }

    #[test]
    fn test_first_where() {
        let hit = ANGLES.first_where(|_, v| *v < 0.5);
        assert_eq!(hit, Some(&(60, 0.45)));
        assert!(ANGLES.first_where(|_, v| *v > 1.0).is_none());
    }

    #[test]
    fn test_keys_in_order() {
        let keys: Vec<u32> = ANGLES.keys().copied().collect();
        assert_eq!(keys, vec![90, 75, 60, 45, 30]);
        assert_eq!(ANGLES.len(), 5);
        assert!(!ANGLES.is_empty());
        assert!(ANGLES.contains(&30));
    }
}
