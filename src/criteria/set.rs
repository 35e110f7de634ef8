//! Criteria set construction
//!
//! A criteria set is built once from a JSON document mapping field names to
//! criterion strings, e.g. `{"TLOD": ">=10", "DP": ">=20"}`, and is read-only
//! afterwards. Declaration order is preserved so records are always evaluated
//! in a reproducible order. Any malformed criterion or duplicate field aborts
//! construction; a partial criteria set is never accepted.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::FilterError;

use super::predicate::Predicate;

/// Ordered mapping from field name to exactly one predicate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaSet {
    entries: Vec<(String, Predicate)>,
}

impl CriteriaSet {
    /// Create an empty criteria set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add one criterion. Field names are case-sensitive and must
    /// be unique.
    pub fn insert(&mut self, field: &str, criterion: &str) -> Result<(), FilterError> {
        if self.entries.iter().any(|(name, _)| name == field) {
            return Err(FilterError::DuplicateField {
                field: field.to_string(),
            });
        }
        let predicate = Predicate::parse(field, criterion)?;
        self.entries.push((field.to_string(), predicate));
        Ok(())
    }

    /// Load a criteria set from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, FilterError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Load a criteria set from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Look up the predicate configured for a field
    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, p)| p)
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.entries.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Number of configured criteria
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no criteria are configured. An empty set passes every record.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for CriteriaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(name, p)| format!("{}{}", name, p))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

// Deserialized through a MapAccess visitor rather than into a map type:
// serde_json hands the visitor every raw entry, so duplicate keys in the
// document itself are caught instead of silently collapsing last-wins.
impl<'de> Deserialize<'de> for CriteriaSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CriteriaVisitor;

        impl<'de> Visitor<'de> for CriteriaVisitor {
            type Value = CriteriaSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to criterion strings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = CriteriaSet::new();
                while let Some((field, criterion)) = map.next_entry::<String, String>()? {
                    set.insert(&field, &criterion).map_err(de::Error::custom)?;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(CriteriaVisitor)
    }
}

impl Serialize for CriteriaSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, predicate) in &self.entries {
            map.serialize_entry(field, &predicate.to_string())?;
        }
        map.end()
    }
}
