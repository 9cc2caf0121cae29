//! In-memory execution of compiled filter documents.
//!
//! This is a stand-in for the storage layer: it applies a filter document
//! produced by [`compile::to_filter`](crate::compile::to_filter) to plain
//! JSON records, following MongoDB matching semantics. Comparisons on a
//! missing field never match, except `$ne`, which matches records where the
//! field is missing or different.

use std::cmp::Ordering;

use serde_json::Value;

/// Does `record` satisfy `filter`?
///
/// `filter` must have the shape emitted by the compiler: `$and`/`$or`
/// documents over field conditions. Anything else simply does not match.
pub fn matches(filter: &Value, record: &Value) -> bool {
    let Some(conditions) = filter.as_object() else {
        return false;
    };

    conditions.iter().all(|(key, condition)| match key.as_str() {
        "$and" => as_clauses(condition)
            .map(|clauses| clauses.iter().all(|c| matches(c, record)))
            .unwrap_or(false),
        "$or" => as_clauses(condition)
            .map(|clauses| clauses.iter().any(|c| matches(c, record)))
            .unwrap_or(false),
        field => field_matches(record.get(field), condition),
    })
}

/// Filter a slice of records down to those matching `filter`.
pub fn select<'a>(filter: &Value, records: &'a [Value]) -> Vec<&'a Value> {
    records.iter().filter(|r| matches(filter, r)).collect()
}

fn as_clauses(condition: &Value) -> Option<&Vec<Value>> {
    condition.as_array()
}

fn field_matches(actual: Option<&Value>, condition: &Value) -> bool {
    // `{field: {"$op": operand}}` against exactly one operator, otherwise
    // the implicit equality form `{field: operand}`.
    if let Some(obj) = condition.as_object() {
        if let Some((op, operand)) = single_operator(obj) {
            return match op {
                "$ne" => !compares_equal(actual, operand),
                "$gt" => compare(actual, operand) == Some(Ordering::Greater),
                "$lt" => compare(actual, operand) == Some(Ordering::Less),
                _ => false,
            };
        }
    }
    compares_equal(actual, condition)
}

fn single_operator(obj: &serde_json::Map<String, Value>) -> Option<(&str, &Value)> {
    if obj.len() != 1 {
        return None;
    }
    let (key, value) = obj.iter().next()?;
    key.starts_with('$')
        .then_some((key.as_str(), value))
        .filter(|(key, _)| *key != "$oid" && *key != "$date")
}

fn compares_equal(actual: Option<&Value>, operand: &Value) -> bool {
    compare(actual, operand) == Some(Ordering::Equal)
}

/// Order a record value against a filter operand. `None` means the two are
/// incomparable (missing field, mismatched types), which never matches an
/// ordered operator.
fn compare(actual: Option<&Value>, operand: &Value) -> Option<Ordering> {
    let actual = actual?;

    // Unwrap extended-JSON operands; records may carry either the wrapped
    // or the bare string form.
    if let Some(tagged) = extended_scalar(operand) {
        let actual = extended_scalar(actual).or_else(|| actual.as_str())?;
        // ISO-8601 date-times and object-id hex both order lexicographically.
        return Some(actual.cmp(tagged));
    }

    match (actual, operand) {
        (Value::Number(a), Value::Number(b)) => {
            a.as_f64().partial_cmp(&b.as_f64())
        }
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// The string payload of a `{"$date": ...}` or `{"$oid": ...}` wrapper.
fn extended_scalar(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    let (key, inner) = obj.iter().next()?;
    if key == "$date" || key == "$oid" {
        inner.as_str()
    } else {
        None
    }
}
