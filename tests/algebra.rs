//! Concatenation and the set-algebra operations, including the per-kind
//! dispatch rules.

use anyhow::Result;
use collectric::testing::{assert_value_eq, int_list};
use collectric::{collect, ErrorKind, IterHandle, Value, vlist, vmap, vset, vtuple};

fn iter_of(vals: Vec<Value>) -> Value {
    Value::Iter(IterHandle::new(vals.into_iter()))
}

#[test]
fn concat_appends_sequences() -> Result<()> {
    let mut c = collect(vlist![1, 2]);
    c.concat([vlist![3, 4], vtuple![5]])?;
    assert_value_eq(c.current(), &int_list(1..=5));
    Ok(())
}

#[test]
fn concat_merges_mappings_with_later_keys_winning() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.concat([vmap!["b" => 20, "c" => 3]])?;
    assert_value_eq(c.current(), &vmap!["a" => 1, "b" => 20, "c" => 3]);
    Ok(())
}

#[test]
fn concat_dict_accepts_pair_shaped_iterables() -> Result<()> {
    let mut c = collect(vmap!["a" => 1]);
    c.concat_dict(vlist![vtuple!["b", 2]])?;
    assert_value_eq(c.current(), &vmap!["a" => 1, "b" => 2]);
    Ok(())
}

#[test]
fn concat_rejects_a_mapping_onto_a_sequence() {
    let mut c = collect(vlist![1, 2]);
    let err = c.concat([vmap!["a" => 1]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStructure);
    assert_eq!(err.message(), "invalid iterable structure for a mapping");
}

#[test]
fn concat_accepts_a_mapping_view_onto_a_sequence() -> Result<()> {
    // A bare mapping target is rejected onto a sequence, but its entries
    // view is sequence-like and appends positionally.
    let mut c = collect(vlist![1]);
    c.concat([Value::Items(vec![(Value::from("a"), Value::Int(2))])])?;
    assert_value_eq(c.current(), &vlist![1, vtuple!["a", 2]]);
    Ok(())
}

#[test]
fn concat_onto_a_mapping_treats_it_as_its_key_sequence() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.concat([vlist![3]])?;
    assert_value_eq(c.current(), &vlist!["a", "b", 3]);
    Ok(())
}

#[test]
fn concat_rejects_non_iterable_targets() {
    let mut c = collect(vlist![1]);
    let err = c.concat([Value::Int(5)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn concat_with_an_iterator_stays_lazy() -> Result<()> {
    let mut c = collect(vlist![1, 2]);
    c.concat([iter_of(vec![Value::Int(3), Value::Int(4)])])?;
    assert!(c.current().is_iterator());
    assert_eq!(c.list()?, int_list(1..=4));
    Ok(())
}

#[test]
fn concat_is_associative_over_sequences() -> Result<()> {
    let (a, b, c) = (vlist![1], vlist![2, 3], vlist![4]);

    let mut left = collect(a.clone());
    left.concat([b.clone()])?.concat([c.clone()])?;

    let mut right = collect(a);
    right.concat([b, c])?;

    assert_value_eq(left.current(), right.current());
    Ok(())
}

#[test]
fn diff_of_sequences_is_a_set_difference() -> Result<()> {
    let mut c = collect(vlist![1, 2, 3, 4]);
    c.diff(vlist![2, 4, 5])?;
    assert_value_eq(c.current(), &vset![1, 3]);
    Ok(())
}

#[test]
fn diff_of_a_mapping_operates_over_entry_pairs() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.diff(vmap!["a" => 1, "b" => 99])?;
    assert_value_eq(c.current(), &vset![vtuple!["b", 2]]);
    Ok(())
}

#[test]
fn diff_dict_requires_a_mapping_current() {
    let mut c = collect(vlist![1, 2]);
    let err = c.diff_dict(vmap!["a" => 1]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStructure);
}

#[test]
fn intersect_of_sequences_keeps_common_elements() -> Result<()> {
    let mut c = collect(vlist![1, 2, 3, 4]);
    c.intersect(vlist![2, 4, 5])?;
    assert_value_eq(c.current(), &vset![2, 4]);
    Ok(())
}

#[test]
fn intersect_of_mappings_matches_whole_entries() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.intersect(vmap!["a" => 1, "b" => 99])?;
    assert_value_eq(c.current(), &vset![vtuple!["a", 1]]);
    Ok(())
}

#[test]
fn set_algebra_over_a_set_current_uses_native_elements() -> Result<()> {
    let mut c = collect(vset![1, 2, 3]);
    c.diff(vset![3])?;
    assert_value_eq(c.current(), &vset![1, 2]);
    Ok(())
}

#[test]
fn algebra_rejects_non_iterable_arguments() {
    let mut c = collect(vlist![1]);
    let err = c.diff(Value::Int(3)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}
