//! Compound registry — the fixed table of structures this service can model.
//!
//! Records are loaded once at startup from an embedded TOML table and are
//! immutable afterwards. Lookup is exact-match on the normalized (trimmed,
//! lowercased) name; no fuzzy or partial matching.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MolvistaError, Result};

/// The registry data compiled into the binary.
pub const EMBEDDED_COMPOUNDS: &str = include_str!("../compounds.toml");

/// One entry in the compound table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundRecord {
    /// Lookup key (normalized form is what is actually matched).
    pub key: String,
    pub smiles: String,
    /// Display name, e.g. "Ethylmagnesium bromide" for "grignard reagent".
    pub name: String,
    pub formula: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct CompoundTable {
    compound: Vec<CompoundRecord>,
}

/// Read-only map from normalized compound name to its record.
#[derive(Debug)]
pub struct CompoundRegistry {
    records: HashMap<String, CompoundRecord>,
}

impl CompoundRegistry {
    /// Build the registry from the embedded TOML table.
    pub fn embedded() -> Result<Self> {
        Self::from_toml(EMBEDDED_COMPOUNDS)
    }

    /// Build the registry from a TOML document with `[[compound]]` entries.
    pub fn from_toml(data: &str) -> Result<Self> {
        let table: CompoundTable = toml::from_str(data)?;
        Self::from_records(table.compound)
    }

    /// Build the registry from a list of records.
    ///
    /// Keys colliding after normalization keep the *first* record; the
    /// collision is a data bug upstream and is logged rather than silently
    /// resolved by overwrite.
    pub fn from_records(records: Vec<CompoundRecord>) -> Result<Self> {
        let mut map: HashMap<String, CompoundRecord> = HashMap::new();

        for record in records {
            let key = normalize(&record.key);
            if key.is_empty() {
                return Err(MolvistaError::Registry(format!(
                    "compound \"{}\" has an empty key",
                    record.name
                )));
            }
            if record.smiles.trim().is_empty() {
                return Err(MolvistaError::Registry(format!(
                    "compound \"{}\" has an empty SMILES",
                    key
                )));
            }
            if map.contains_key(&key) {
                warn!(key = %key, "duplicate registry key, keeping first entry");
                continue;
            }
            map.insert(key, record);
        }

        if map.is_empty() {
            return Err(MolvistaError::Registry("compound table is empty".into()));
        }

        Ok(Self { records: map })
    }

    /// Look up a compound by name. Normalizes before matching.
    pub fn lookup(&self, name: &str) -> Option<&CompoundRecord> {
        self.records.get(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in stable (key-sorted) order, for listings.
    pub fn iter_sorted(&self) -> Vec<&CompoundRecord> {
        let mut records: Vec<&CompoundRecord> = self.records.values().collect();
        records.sort_by(|a, b| normalize(&a.key).cmp(&normalize(&b.key)));
        records
    }
}

/// Canonical form used for registry keys and lookups: trimmed + lowercased.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CompoundRegistry {
        CompoundRegistry::embedded().expect("embedded table should parse")
    }

    #[test]
    fn test_lookup_is_case_and_whitespace_insensitive() {
        let reg = registry();
        let canonical = reg.lookup("methane").expect("methane is registered");
        for variant in ["Methane", "  METHANE  ", "\tmethane\n", "MetHane"] {
            let rec = reg.lookup(variant).expect("variant should resolve");
            assert_eq!(rec.formula, canonical.formula);
            assert_eq!(rec.smiles, canonical.smiles);
        }
    }

    #[test]
    fn test_unknown_compound_is_none() {
        let reg = registry();
        assert!(reg.lookup("unobtainium").is_none());
        assert!(reg.lookup("").is_none());
        assert!(reg.lookup("   ").is_none());
    }

    #[test]
    fn test_multi_word_key() {
        let reg = registry();
        let rec = reg.lookup(" Grignard Reagent ").expect("registered");
        assert_eq!(rec.name, "Ethylmagnesium bromide");
    }

    // The upstream table defines "ferrocene" twice with identical payloads.
    // Known data-duplication smell: the registry must resolve it to exactly
    // one record rather than erroring or keeping both.
    #[test]
    fn test_duplicate_ferrocene_resolves_to_one_record() {
        let reg = registry();
        let matches = reg
            .iter_sorted()
            .into_iter()
            .filter(|r| normalize(&r.key) == "ferrocene")
            .count();
        assert_eq!(matches, 1);
        let rec = reg.lookup("ferrocene").expect("registered");
        assert_eq!(rec.formula, "C10H10Fe");
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let records = vec![CompoundRecord {
            key: "   ".into(),
            smiles: "C".into(),
            name: "Bad".into(),
            formula: "CH4".into(),
            description: String::new(),
        }];
        assert!(CompoundRegistry::from_records(records).is_err());
    }

    #[test]
    fn test_iter_sorted_is_stable() {
        let reg = registry();
        let keys: Vec<String> = reg.iter_sorted().iter().map(|r| normalize(&r.key)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), reg.len());
    }
}
