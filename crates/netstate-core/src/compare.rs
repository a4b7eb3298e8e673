//! Generic structural comparator.
//!
//! [`Value`] is the closed set of shapes canonical records are lowered to
//! before a goal/observed pair is checked for equality. [`compare`] is a total
//! order within each kind; ordering values of different kinds (a sequence
//! against a mapping, say) is a caller bug and is reported as
//! `KindMismatch` rather than given an arbitrary answer.

use crate::address::{CanonicalAddress, CanonicalPrefix};
use crate::errors::{NetStateError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Mapping key that switches mapping comparison to the prefix comparator.
pub const PREFIX_KEY: &str = "prefix";
/// Companion key holding the prefix length (IPv6 bit space).
pub const PREFIX_LENGTH_KEY: &str = "prefix_length";

/// Leaf value. Within a variant the native order applies; across variants
/// `Bool < Integer < Text`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Text(String),
}

/// Semi-structured value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null or missing; sorts before anything present
    Absent,
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Text(s.into()))
    }

    pub fn integer(i: i64) -> Self {
        Value::Scalar(Scalar::Integer(i))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Scalar(_) => "scalar",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Build a mapping from `(key, value)` pairs.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    fn carries_prefix(map: &BTreeMap<String, Value>) -> bool {
        map.get(PREFIX_KEY).is_some_and(|v| !v.is_absent())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::integer(i)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::integer(i),
                None => Value::text(n.to_string()),
            },
            serde_json::Value::String(s) => Value::text(s.as_str()),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Lowering of canonical records into [`Value`] trees.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for CanonicalAddress {
    fn to_value(&self) -> Value {
        Value::text(self.canonical_text())
    }
}

impl ToValue for CanonicalPrefix {
    fn to_value(&self) -> Value {
        Value::mapping([
            (PREFIX_KEY, self.address().to_value()),
            (PREFIX_LENGTH_KEY, Value::integer(i64::from(self.length()))),
        ])
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::text(self.as_str())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

/// Order two values.
///
/// - sequences: shorter first, then element by element
/// - mappings carrying a `prefix`: prefix, then `prefix_length`; they sort
///   before every mapping without one, as in [`compare_prefixes`]
/// - mappings without a `prefix`: values under the sorted union of keys, a
///   missing key counting as absent
/// - scalars: native order; absent before anything present
///
/// # Errors
///
/// - `KindMismatch`: the two values (or two values nested at the same
///   position) are of different non-absent kinds
pub fn compare(a: &Value, b: &Value) -> Result<Ordering> {
    match (a, b) {
        (Value::Absent, Value::Absent) => Ok(Ordering::Equal),
        (Value::Absent, _) => Ok(Ordering::Less),
        (_, Value::Absent) => Ok(Ordering::Greater),
        (Value::Scalar(x), Value::Scalar(y)) => Ok(x.cmp(y)),
        (Value::Sequence(x), Value::Sequence(y)) => compare_sequences(x, y),
        (Value::Mapping(x), Value::Mapping(y)) => {
            match (Value::carries_prefix(x), Value::carries_prefix(y)) {
                (true, true) => compare_prefixed_mappings(x, y),
                // A mapping without a prefix sorts after every prefixed one
                (true, false) => Ok(Ordering::Less),
                (false, true) => Ok(Ordering::Greater),
                (false, false) => compare_mappings(x, y),
            }
        }
        _ => Err(NetStateError::KindMismatch {
            left: a.kind_name(),
            right: b.kind_name(),
        }),
    }
}

/// True iff [`compare`] finds the two values equal.
///
/// # Errors
///
/// - `KindMismatch`: see [`compare`]
pub fn values_match(a: &Value, b: &Value) -> Result<bool> {
    Ok(compare(a, b)? == Ordering::Equal)
}

fn compare_sequences(a: &[Value], b: &[Value]) -> Result<Ordering> {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        unequal => return Ok(unequal),
    }
    for (x, y) in a.iter().zip(b) {
        match compare(x, y)? {
            Ordering::Equal => {}
            unequal => return Ok(unequal),
        }
    }
    Ok(Ordering::Equal)
}

fn compare_mappings(a: &BTreeMap<String, Value>, b: &BTreeMap<String, Value>) -> Result<Ordering> {
    let keys: BTreeSet<&String> = a.keys().chain(b.keys()).collect();
    for key in keys {
        let x = a.get(key).unwrap_or(&Value::Absent);
        let y = b.get(key).unwrap_or(&Value::Absent);
        match compare(x, y)? {
            Ordering::Equal => {}
            unequal => return Ok(unequal),
        }
    }
    Ok(Ordering::Equal)
}

fn compare_prefixed_mappings(
    a: &BTreeMap<String, Value>,
    b: &BTreeMap<String, Value>,
) -> Result<Ordering> {
    for key in [PREFIX_KEY, PREFIX_LENGTH_KEY] {
        let x = a.get(key).unwrap_or(&Value::Absent);
        let y = b.get(key).unwrap_or(&Value::Absent);
        match compare(x, y)? {
            Ordering::Equal => {}
            unequal => return Ok(unequal),
        }
    }
    Ok(Ordering::Equal)
}

/// Prefix comparator with an absent prefix sorting *after* every present one.
///
/// This is the ordering the merge-diff engine walks: an exhausted side acts
/// as an absent entry and never wins against a real one.
pub fn compare_prefixes(a: Option<&CanonicalPrefix>, b: Option<&CanonicalPrefix>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x
            .address()
            .cmp(&y.address())
            .then(x.length().cmp(&y.length())),
    }
}
