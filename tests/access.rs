//! Subscript access, entry views, in-place mutation, queries, and the
//! fixed error messages they normalize to.

use anyhow::Result;
use collectric::testing::{assert_value_eq, even, int_list};
use collectric::{collect, Callback, ErrorKind, IterHandle, Value, vlist, vmap, vset, vtuple};

#[test]
fn first_and_last_on_sequences() -> Result<()> {
    let mut c = collect(vlist![10, 20, 30]);
    assert_eq!(c.first()?, Value::Int(10));
    assert_eq!(c.last()?, Value::Int(30));
    assert_value_eq(c.current(), &vlist![10, 20, 30]);
    Ok(())
}

#[test]
fn first_on_a_mapping_looks_up_the_integer_key() -> Result<()> {
    // A mapping subscripts by key, so `first` means "the key 0".
    let mut c = collect(vmap![0 => "zero", 1 => "one"]);
    assert_eq!(c.first()?, Value::from("zero"));

    let mut missing = collect(vmap!["a" => 1]);
    let err = missing.first().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyOrIndexMissing);
    assert_eq!(err.message(), "iterable contains no key or index 0");
    Ok(())
}

#[test]
fn first_on_an_empty_list_is_out_of_range() {
    let mut c = collect(vlist![]);
    let err = c.first().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyOrIndexMissing);
    assert_eq!(err.message(), "index out of range on iterable");
}

#[test]
fn kind_checks_precede_emptiness_checks() {
    // An empty set is "not subscriptable", never "index out of range".
    let mut c = collect(vset![]);
    let err = c.first().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSubscriptable);
    assert_eq!(err.message(), "iterable is not of a subscriptable type");

    // Likewise an empty iterator.
    let mut it = collect(Value::Iter(IterHandle::new(std::iter::empty())));
    let err = it.first().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSubscriptable);
}

#[test]
fn getitem_by_index_key_and_negative_position() -> Result<()> {
    let mut s = collect("hello");
    assert_eq!(s.getitem(1)?, Value::from("e"));
    assert_eq!(s.getitem(-1)?, Value::from("o"));

    let mut m = collect(vmap!["k" => 42]);
    assert_eq!(m.getitem("k")?, Value::Int(42));
    Ok(())
}

#[test]
fn setitem_writes_lists_and_mappings_in_place() -> Result<()> {
    let mut list = collect(vlist![1, 2, 3]);
    list.setitem(1, 20)?.setitem(-1, 30)?;
    assert_value_eq(list.current(), &vlist![1, 20, 30]);

    let mut map = collect(vmap!["a" => 1]);
    map.setitem("b", 2)?;
    assert_value_eq(map.current(), &vmap!["a" => 1, "b" => 2]);
    Ok(())
}

#[test]
fn setitem_on_a_tuple_is_rejected() {
    let mut c = collect(vtuple![1, 2]);
    let err = c.setitem(0, 9).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotSubscriptable);
    assert_eq!(err.message(), "iterable is not subscriptable for assignment");
}

#[test]
fn pop_materializes_then_removes_the_last_element() -> Result<()> {
    let mut c = collect(vtuple![1, 2, 3]);
    assert_eq!(c.pop()?, Value::Int(3));
    // The tuple was converted to a list in place before popping.
    assert_value_eq(c.current(), &vlist![1, 2]);
    Ok(())
}

#[test]
fn pre_processing_errors_propagate_unnormalized() {
    // pop's list_ pre-op fails on a non-iterable current; the raw
    // type-mismatch surfaces as-is, never rewritten by pop's subscript
    // normalizer.
    let mut c = collect(Value::Int(5));
    let err = c.pop().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.message(), "int is not an iterable type");
}

#[test]
fn pop_from_empty_is_out_of_range() {
    let mut c = collect(vlist![]);
    let err = c.pop().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyOrIndexMissing);
    assert_eq!(err.message(), "index out of range on iterable");
}

#[test]
fn next_converts_in_place_and_consumes() -> Result<()> {
    let mut c = collect(vlist![1, 2]);
    assert_eq!(c.next()?, Value::Int(1));
    assert!(c.current().is_iterator());
    assert_eq!(c.next()?, Value::Int(2));

    let err = c.next().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyOrIndexMissing);
    assert_eq!(err.message(), "iterator is exhausted");
    Ok(())
}

#[test]
fn iterator_identity_is_shared_across_clones() -> Result<()> {
    let h = IterHandle::new(vec![Value::Int(1), Value::Int(2), Value::Int(3)].into_iter());
    let mut a = collect(Value::Iter(h.clone()));
    assert_eq!(a.next()?, Value::Int(1));
    // The original handle observes the consumption.
    assert_eq!(h.next(), Some(Value::Int(2)));
    Ok(())
}

#[test]
fn items_and_nt_items_expose_entries() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.items()?;
    assert_eq!(
        c.current().to_values()?,
        vec![vtuple!["a", 1], vtuple!["b", 2]]
    );

    let mut nt = collect(vmap!["a" => 1]);
    nt.nt_items()?;
    assert_value_eq(nt.current(), &vlist![Value::item("a", 1)]);
    Ok(())
}

#[test]
fn items_of_a_non_pair_shaped_sequence_is_invalid() {
    let mut c = collect(vlist![1, 2, 3]);
    let err = c.items().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStructure);
    assert_eq!(err.message(), "invalid iterable structure for a mapping");
}

#[test]
fn map_items_spreads_key_and_value() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.map_items(Callback::binary(|k, v| {
        Value::Str(format!("{}={}", k.as_str().unwrap_or(""), v.as_i64().unwrap_or(0)))
    }))?;
    assert_value_eq(c.current(), &vlist!["a=1", "b=2"]);
    Ok(())
}

#[test]
fn reduce_items_threads_the_accumulator_first() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2, "c" => 3]);
    let total = c.reduce_items(
        Callback::ternary(|acc, _k, v| {
            Value::Int(acc.as_i64().unwrap_or(0) + v.as_i64().unwrap_or(0))
        }),
        Some(Value::Int(0)),
    )?;
    assert_eq!(total, Value::Int(6));
    Ok(())
}

#[test]
fn nt_item_family_passes_named_entries() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    c.map_nt_items(Callback::unary(|v| match v.as_item() {
        Some(it) => it.value.clone(),
        None => Value::None,
    }))?;
    assert_value_eq(c.current(), &vlist![1, 2]);
    Ok(())
}

#[test]
fn first_and_last_items_come_in_pair_and_named_forms() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2]);
    assert_eq!(c.first_item()?, vtuple!["a", 1]);
    assert_eq!(c.last_item()?, vtuple!["b", 2]);
    assert_eq!(c.first_nt_item()?, Value::item("a", 1));
    assert_eq!(c.last_nt_item()?, Value::item("b", 2));
    Ok(())
}

#[test]
fn first_item_of_an_empty_mapping_is_out_of_range() {
    let mut c = collect(vmap![]);
    let err = c.first_item().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyOrIndexMissing);
    assert_eq!(err.message(), "index out of range on iterable");
}

#[test]
fn join_concatenates_string_elements() -> Result<()> {
    let mut c = collect(vlist!["a", "b", "c"]);
    assert_eq!(c.join("-")?, "a-b-c");

    let mut bad = collect(vlist!["a", 1]);
    let err = bad.join("-").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    Ok(())
}

#[test]
fn queries_cover_membership_emptiness_and_extremes() -> Result<()> {
    let mut c = collect(vlist![3, 1, 2]);
    assert!(c.contains(2)?);
    assert!(!c.contains(9)?);
    assert!(!c.empty()?);
    assert_eq!(c.min()?, Value::Int(1));
    assert_eq!(c.max()?, Value::Int(3));
    assert_eq!(c.len()?, 3);

    // Mapping membership is key membership.
    let mut m = collect(vmap!["a" => 1]);
    assert!(m.contains("a")?);
    assert!(!m.contains(1)?);
    Ok(())
}

#[test]
fn empty_materializes_an_iterator_current() -> Result<()> {
    let mut c = collect(Value::Iter(IterHandle::new(
        vec![Value::Int(1)].into_iter(),
    )));
    assert!(!c.empty()?);
    // The check was not destructive: the element is still there.
    assert_value_eq(c.current(), &vlist![1]);
    Ok(())
}

#[test]
fn len_of_an_iterator_is_a_type_mismatch() {
    let mut c = collect(Value::Iter(IterHandle::new(std::iter::empty())));
    let err = c.len().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn all_and_any_accept_an_optional_predicate() -> Result<()> {
    let mut c = collect(int_list(1..=4));
    assert!(c.all(None)?);
    assert!(!c.all(Some(even()))?);
    assert!(c.any(Some(even()))?);

    let mut with_zero = collect(vlist![0, 1]);
    assert!(!with_zero.all(None)?);
    Ok(())
}

#[test]
fn min_of_empty_is_missing() {
    let mut c = collect(vlist![]);
    let err = c.min().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyOrIndexMissing);
}
