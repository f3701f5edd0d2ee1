//! Element-wise transforms, ordering, grouping, and shape changes.

use anyhow::Result;
use collectric::testing::{adder, assert_value_eq, doubler, even, int_list};
use collectric::{collect, Callback, ErrorKind, Value, vlist, vmap, vtuple};

#[test]
fn map_over_every_iterable_kind() -> Result<()> {
    let mut list = collect(vlist![1, 2, 3]);
    list.map(doubler())?;
    assert_value_eq(list.current(), &vlist![2, 4, 6]);

    // A mapping iterates its keys.
    let mut map = collect(vmap![1 => "a", 2 => "b"]);
    map.map(doubler())?;
    assert_value_eq(map.current(), &vlist![2, 4]);

    // A string iterates one-character strings.
    let mut s = collect("ab");
    s.map(Callback::unary(|v| {
        Value::Str(v.as_str().unwrap_or("").repeat(2))
    }))?;
    assert_value_eq(s.current(), &vlist!["aa", "bb"]);
    Ok(())
}

#[test]
fn emap_spreads_index_and_element() -> Result<()> {
    let mut c = collect(vlist!["a", "b"]);
    c.emap(Callback::binary(|i, v| {
        Value::Str(format!("{}{}", i.as_i64().unwrap_or(0), v.as_str().unwrap_or("")))
    }))?;
    assert_value_eq(c.current(), &vlist!["0a", "1b"]);
    Ok(())
}

#[test]
fn filter_keeps_matching_elements() -> Result<()> {
    let mut c = collect(int_list(1..=6));
    c.filter(even())?;
    assert_value_eq(c.current(), &vlist![2, 4, 6]);
    Ok(())
}

#[test]
fn reduce_with_and_without_initial_value() -> Result<()> {
    let mut c = collect(int_list(1..=4));
    assert_eq!(c.reduce(adder(), None)?, Value::Int(10));
    assert_eq!(c.reduce(adder(), Some(Value::Int(100)))?, Value::Int(110));
    Ok(())
}

#[test]
fn reduce_of_empty_without_initial_fails() {
    let mut c = collect(vlist![]);
    let err = c.reduce(adder(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn sorted_with_and_without_key() -> Result<()> {
    let mut c = collect(vlist![3, 1, 2]);
    c.sorted(None)?;
    assert_value_eq(c.current(), &vlist![1, 2, 3]);

    let mut by_len = collect(vlist!["ccc", "a", "bb"]);
    by_len.sorted(Some(Callback::unary(|v| {
        Value::Int(v.as_str().map_or(0, |s| s.len() as i64))
    })))?;
    assert_value_eq(by_len.current(), &vlist!["a", "bb", "ccc"]);
    Ok(())
}

#[test]
fn sort_is_stable_under_a_key() -> Result<()> {
    let mut c = collect(vlist![vtuple!["b", 1], vtuple!["a", 1], vtuple!["c", 0]]);
    c.sorted(Some(Callback::unary(|v| {
        v.as_pair().map(|(_, n)| n).unwrap_or(Value::None)
    })))?;
    assert_value_eq(
        c.current(),
        &vlist![vtuple!["c", 0], vtuple!["b", 1], vtuple!["a", 1]],
    );
    Ok(())
}

#[test]
fn groupby_groups_consecutive_runs_only() -> Result<()> {
    let mut c = collect(vlist![1, 1, 2, 1]);
    c.groupby(None)?;
    assert_value_eq(
        c.current(),
        &vlist![
            vtuple![1, vlist![1, 1]],
            vtuple![2, vlist![2]],
            vtuple![1, vlist![1]],
        ],
    );
    Ok(())
}

#[test]
fn group_sort_sorts_first_for_a_global_grouping() -> Result<()> {
    let mut c = collect(vlist![1, 1, 2, 1]);
    c.group_sort(None)?;
    assert_value_eq(
        c.current(),
        &vlist![vtuple![1, vlist![1, 1, 1]], vtuple![2, vlist![2]]],
    );
    Ok(())
}

#[test]
fn group_sort_forwards_its_key_to_the_sort() -> Result<()> {
    let key = Callback::unary(|v| Value::Int(v.as_i64().unwrap_or(0) % 2));
    let mut c = collect(vlist![1, 2, 3, 4]);
    c.group_sort(Some(key))?;
    assert_value_eq(
        c.current(),
        &vlist![vtuple![0, vlist![2, 4]], vtuple![1, vlist![1, 3]]],
    );
    Ok(())
}

#[test]
fn unique_preserves_first_seen_order() -> Result<()> {
    let mut c = collect(vlist![2, 1, 2, 3, 1]);
    let out = c.unique()?.list()?;
    assert_eq!(out, vlist![2, 1, 3]);
    Ok(())
}

#[test]
fn zip_pairs_elements_positionally() -> Result<()> {
    let mut c = collect(vlist![1, 2, 3]);
    c.zip(vlist!["a", "b"])?;
    assert_value_eq(c.current(), &vlist![vtuple![1, "a"], vtuple![2, "b"]]);
    Ok(())
}

#[test]
fn enumerate_is_lazy_and_indexed() -> Result<()> {
    let mut c = collect(vlist!["a", "b"]);
    c.enumerate()?;
    assert!(c.current().is_iterator());
    let out = c.list()?;
    assert_eq!(out, vlist![vtuple![0, "a"], vtuple![1, "b"]]);
    Ok(())
}

#[test]
fn flatten_descends_lists_and_tuples_only() -> Result<()> {
    let mut c = collect(vlist![vlist![1, vtuple![2, 3]], vlist![], "ab", 4]);
    c.flatten()?;
    assert_value_eq(c.current(), &vlist![1, 2, 3, "ab", 4]);
    Ok(())
}

#[test]
fn flatten_is_idempotent_on_flat_input() -> Result<()> {
    let mut c = collect(vlist![vlist![1, 2], vlist![3]]);
    c.flatten()?;
    let once = c.current().clone();
    c.flatten()?;
    assert_value_eq(c.current(), &once);
    Ok(())
}

#[test]
fn chunks_produces_ceil_count_with_short_tail() -> Result<()> {
    let mut c = collect(int_list(1..=7));
    c.chunks(3)?;
    assert_value_eq(
        c.current(),
        &vlist![vlist![1, 2, 3], vlist![4, 5, 6], vlist![7]],
    );
    Ok(())
}

#[test]
fn chunks_of_a_mapping_chunk_its_pairs() -> Result<()> {
    let mut c = collect(vmap!["a" => 1, "b" => 2, "c" => 3]);
    c.chunks(2)?;
    assert_value_eq(
        c.current(),
        &vlist![
            vlist![vtuple!["a", 1], vtuple!["b", 2]],
            vlist![vtuple!["c", 3]],
        ],
    );
    Ok(())
}

#[test]
fn chunks_rejects_a_zero_length() {
    let mut c = collect(int_list(1..=3));
    let err = c.chunks(0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn slice_supports_negative_and_open_bounds() -> Result<()> {
    let mut tail = collect(int_list(0..=7));
    tail.slice(4, None)?;
    assert_value_eq(tail.current(), &vlist![4, 5, 6, 7]);

    let mut last = collect(int_list(0..=7));
    last.slice(-2, None)?;
    assert_value_eq(last.current(), &vlist![6, 7]);

    let mut window = collect(int_list(0..=7));
    window.slice(1, Some(-1))?;
    assert_value_eq(window.current(), &int_list(1..=6));

    let mut inverted = collect(int_list(0..=7));
    inverted.slice(5, Some(2))?;
    assert_value_eq(inverted.current(), &vlist![]);
    Ok(())
}

#[test]
fn islice_is_lazy_and_bounded() -> Result<()> {
    let mut c = collect(int_list(0..=9));
    c.islice(2, Some(5))?;
    assert!(c.current().is_iterator());
    assert_eq!(c.list()?, vlist![2, 3, 4]);
    Ok(())
}

#[test]
fn islice_without_a_stop_runs_to_exhaustion() -> Result<()> {
    let mut c = collect(int_list(0..=4));
    let out = c.islice(3, None)?.list()?;
    assert_eq!(out, vlist![3, 4]);
    Ok(())
}

#[test]
fn islice_with_a_single_bound_takes_it_as_the_stop() -> Result<()> {
    let mut c = collect(int_list(0..=9));
    c.call("islice", vec![Value::Int(3)])?;
    assert!(c.current().is_iterator());
    assert_eq!(c.list()?, vlist![0, 1, 2]);
    Ok(())
}
