//! Testing utilities for collectric pipelines.
//!
//! Assertion helpers and data builders for writing idiomatic tests against
//! pipeline results:
//!
//! - **Assertions**: compare pipeline values with expected results
//! - **Builders**: generate common collection shapes quickly
//!
//! # Quick Start
//!
//! ```
//! use collectric::{collect, vlist};
//! use collectric::testing::*;
//!
//! let mut c = collect(int_list(1..=3));
//! c.concat([vlist![4, 5]])?;
//! assert_value_eq(c.current(), &int_list(1..=5));
//! # Ok::<(), collectric::Error>(())
//! ```

use crate::value::{Callback, Value};
use indexmap::IndexSet;

/// Assert that two values are equal, with both sides printed on failure.
///
/// # Panics
///
/// Panics if the values differ.
pub fn assert_value_eq(actual: &Value, expected: &Value) {
    assert_eq!(
        actual, expected,
        "Value mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that a value's elements equal `expected` in order and content.
///
/// # Panics
///
/// Panics if the value is not iterable or its elements differ.
pub fn assert_elements_equal(actual: &Value, expected: &[Value]) {
    let elems = match actual.to_values() {
        Ok(v) => v,
        Err(e) => panic!("expected an iterable value, got {actual:?}: {e}"),
    };
    assert_eq!(
        elems.len(),
        expected.len(),
        "Element count mismatch:\n  Expected: {expected:?}\n  Actual: {elems:?}"
    );
    for (i, (a, e)) in elems.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Element mismatch at index {i}:\n  Expected: {expected:?}\n  Actual: {elems:?}"
        );
    }
}

/// Assert that a value's elements equal `expected` ignoring order.
///
/// # Panics
///
/// Panics if the value is not iterable or the element sets differ.
pub fn assert_elements_unordered_equal(actual: &Value, expected: &[Value]) {
    let elems = match actual.to_values() {
        Ok(v) => v,
        Err(e) => panic!("expected an iterable value, got {actual:?}: {e}"),
    };
    let actual_set: IndexSet<&Value> = elems.iter().collect();
    let expected_set: IndexSet<&Value> = expected.iter().collect();
    if actual_set != expected_set {
        let missing: Vec<_> = expected_set.difference(&actual_set).collect();
        let extra: Vec<_> = actual_set.difference(&expected_set).collect();
        panic!(
            "Element content mismatch:\n  Missing: {missing:?}\n  Extra: {extra:?}\n  Expected: {expected:?}\n  Actual: {elems:?}"
        );
    }
}

/// A list of consecutive integers, the workhorse fixture.
pub fn int_list<I>(range: I) -> Value
where
    I: IntoIterator<Item = i64>,
{
    Value::List(range.into_iter().map(Value::Int).collect())
}

/// A mapping from single-letter string keys to ascending integers:
/// `letter_map(3)` is `{"a": 0, "b": 1, "c": 2}`.
pub fn letter_map(len: usize) -> Value {
    let mut m = indexmap::IndexMap::new();
    for (i, c) in ('a'..='z').take(len).enumerate() {
        m.insert(Value::Str(c.to_string()), Value::Int(i as i64));
    }
    Value::Map(m)
}

/// A unary callback that doubles an integer element.
pub fn doubler() -> Callback {
    Callback::unary(|v| Value::Int(v.as_i64().unwrap_or(0) * 2))
}

/// A unary callback keeping even integers.
pub fn even() -> Callback {
    Callback::unary(|v| Value::Bool(v.as_i64().unwrap_or(0) % 2 == 0))
}

/// A binary callback summing two integers.
pub fn adder() -> Callback {
    Callback::binary(|a, b| Value::Int(a.as_i64().unwrap_or(0) + b.as_i64().unwrap_or(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{vlist, vmap};

    #[test]
    fn int_list_builds_in_order() {
        assert_value_eq(&int_list(1..=3), &vlist![1, 2, 3]);
    }

    #[test]
    fn letter_map_is_insertion_ordered() {
        assert_value_eq(&letter_map(2), &vmap!["a" => 0, "b" => 1]);
    }

    #[test]
    #[should_panic(expected = "Element mismatch at index 1")]
    fn ordered_assertion_reports_position() {
        assert_elements_equal(&vlist![1, 3, 2], &[Value::Int(1), Value::Int(2), Value::Int(3)]);
    }
}
