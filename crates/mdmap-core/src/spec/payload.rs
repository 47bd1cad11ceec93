/*
 * payload.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The loosely-typed YAML payload of a map block.
 */

use thiserror::Error;
use yaml_rust2::{ScanError, Yaml, YamlLoader};

/// Why block text could not be read as a payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error(transparent)]
    Syntax(#[from] ScanError),

    #[error("expected a single YAML document, found {0}")]
    MultipleDocuments(usize),
}

/// Raw key-value payload parsed from the text of a map block.
///
/// Lookups treat a missing key and an explicit `null` the same way, so
/// callers only ever see values that were actually written.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    root: Yaml,
}

impl Payload {
    /// A payload with no keys.
    pub fn empty() -> Self {
        Payload { root: Yaml::Null }
    }

    /// Parse block text as YAML.
    ///
    /// Text holding more than one document (`---` separators) is rejected.
    /// A document that is not a mapping (a bare scalar or a list) parses to
    /// an empty payload.
    pub fn parse(text: &str) -> Result<Self, PayloadError> {
        let mut docs = YamlLoader::load_from_str(text)?;
        match docs.len() {
            0 => return Ok(Self::empty()),
            1 => {}
            n => return Err(PayloadError::MultipleDocuments(n)),
        }
        let root = docs.swap_remove(0);
        if matches!(root, Yaml::Hash(_)) {
            Ok(Payload { root })
        } else {
            Ok(Self::empty())
        }
    }

    /// Parse block text, falling back to an empty payload when it cannot be read.
    pub fn parse_or_empty(text: &str) -> Self {
        match Self::parse(text) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Map block payload is not valid YAML, using defaults");
                Self::empty()
            }
        }
    }

    /// Look up a key, ignoring `null` values.
    pub fn get(&self, key: &str) -> Option<&Yaml> {
        present(&self.root[key])
    }

    /// Look up the first of several alias keys that holds a value.
    pub fn get_first(&self, keys: &[&str]) -> Option<&Yaml> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.root.as_hash().is_none_or(|hash| hash.is_empty())
    }
}

/// Filter out `null` and missing values.
pub(crate) fn present(value: &Yaml) -> Option<&Yaml> {
    match value {
        Yaml::Null | Yaml::BadValue => None,
        other => Some(other),
    }
}

/// Look up a key of a YAML mapping, ignoring `null` values.
pub(crate) fn field<'a>(value: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    match value {
        Yaml::Hash(_) => present(&value[key]),
        _ => None,
    }
}

/// Whether a value counts as "set" for boolean flags.
///
/// Empty strings, zero, NaN, `false` and `null` are unset; everything else,
/// including empty lists and mappings, is set.
pub(crate) fn is_truthy(value: &Yaml) -> bool {
    match value {
        Yaml::Null | Yaml::BadValue => false,
        Yaml::Boolean(b) => *b,
        Yaml::Integer(i) => *i != 0,
        Yaml::Real(s) => s.parse::<f64>().is_ok_and(|f| f != 0.0 && !f.is_nan()),
        Yaml::String(s) => !s.is_empty(),
        Yaml::Array(_) | Yaml::Hash(_) | Yaml::Alias(_) => true,
    }
}

/// Text of a scalar value. Lists, mappings and `null` have none.
pub(crate) fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
