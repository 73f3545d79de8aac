//! Named key/value metadata records.
//!
//! Kernel construction takes its keyword parameters as a [`KernelArgs`] map
//! and records them, together with the mode, in a [`Metadata`] record named
//! `"kernel"`. Records live in a [`MetadataStore`] owned by the probe.

use std::collections::BTreeMap;
use std::fmt;

/// A single parameter or metadata value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Pair(f64, f64),
    Str(String),
}

impl ParamValue {
    /// Returns the value as a float when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ParamValue::Int(v) => Some(v as f64),
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a pair when it is a 2-tuple.
    pub fn as_pair(&self) -> Option<(f64, f64)> {
        match *self {
            ParamValue::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }

    /// Returns the value as a boolean flag.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Pair(a, b) => write!(f, "({a}, {b})"),
            ParamValue::Str(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<(f64, f64)> for ParamValue {
    fn from((a, b): (f64, f64)) -> Self {
        ParamValue::Pair(a, b)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

/// Keyword parameters passed to kernel construction.
pub type KernelArgs = BTreeMap<String, ParamValue>;

/// A named metadata record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    name: String,
    entries: BTreeMap<String, ParamValue>,
}

impl Metadata {
    /// Creates an empty record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Returns the record name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collection of metadata records keyed by record name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MetadataStore {
    records: BTreeMap<String, Metadata>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record`, replacing any record with the same name.
    pub fn insert(&mut self, record: Metadata) {
        self.records.insert(record.name.clone(), record);
    }

    /// Returns the record called `name`.
    pub fn get(&self, name: &str) -> Option<&Metadata> {
        self.records.get(name)
    }

    /// Iterates records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Metadata> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Metadata, MetadataStore, ParamValue};

    #[test]
    fn insert_overwrites_existing_key() {
        let mut md = Metadata::new("kernel");
        md.insert("sigma", 1.0);
        md.insert("sigma", 2.5);
        assert_eq!(md.len(), 1);
        assert_eq!(md.get("sigma"), Some(&ParamValue::Float(2.5)));
    }

    #[test]
    fn store_replaces_records_by_name() {
        let mut store = MetadataStore::new();
        let mut first = Metadata::new("kernel");
        first.insert("mode", "gaussian");
        first.insert("sigma", 2.0);
        store.insert(first);

        let mut second = Metadata::new("kernel");
        second.insert("mode", "flat");
        store.insert(second.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("kernel"), Some(&second));
        assert!(store.get("kernel").unwrap().get("sigma").is_none());
    }

    #[test]
    fn numeric_accessors_accept_ints() {
        assert_eq!(ParamValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(ParamValue::Pair(1.0, 2.0).as_f64(), None);
        assert_eq!(ParamValue::from((1.0, 2.0)).as_pair(), Some((1.0, 2.0)));
        assert_eq!(ParamValue::from("flat").as_str(), Some("flat"));
        assert_eq!(ParamValue::Pair(1.0, 2.5).to_string(), "(1, 2.5)");
    }
}
