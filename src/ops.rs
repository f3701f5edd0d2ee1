//! The per-operation dispatch algorithms behind the registry.
//!
//! Every function here has the uniform [`Algo`](crate::registry::Algo)
//! signature: a [`Bound`] target plus the formatted argument vector. For
//! value-bound operations the engine has already spliced the current
//! collection into the arguments (position chosen by the descriptor's
//! binding); pipeline-bound operations receive the [`Collection`] itself
//! and delegate to other registered operations by name.
//!
//! Kind checks follow the fixed priority mapping > set > sequence/view >
//! iterator, so mapping-specific behavior always wins when a value
//! satisfies more than one predicate.

use crate::collection::Collection;
use crate::error::{Condition, Error, Result};
use crate::registry::Bound;
use crate::value::{Callback, DictItem, IterHandle, Kind, Value};
use indexmap::IndexSet;

fn pipeline<'a>(bound: Bound<'a>) -> Result<&'a mut Collection> {
    match bound {
        Bound::Collection(c) => Ok(c),
        Bound::Detached => Err(Error::type_mismatch(
            Condition::Other,
            "operation requires pipeline binding",
        )),
    }
}

fn arg(args: &[Value], p: usize) -> Result<&Value> {
    args.get(p).ok_or_else(|| {
        Error::type_mismatch(Condition::Other, format!("missing argument at position {p}"))
    })
}

fn callback_arg(args: &[Value], p: usize) -> Result<&Callback> {
    arg(args, p)?.as_callback().ok_or_else(|| {
        Error::type_mismatch(Condition::WrongKind, "expected a callable argument")
    })
}

fn opt_callback(args: &[Value], p: usize) -> Result<Option<&Callback>> {
    match args.get(p) {
        None | Some(Value::None) => Ok(None),
        Some(v) => v
            .as_callback()
            .map(Some)
            .ok_or_else(|| Error::type_mismatch(Condition::WrongKind, "expected a callable argument")),
    }
}

fn int_arg(args: &[Value], p: usize) -> Result<i64> {
    arg(args, p)?.as_i64().ok_or_else(|| {
        Error::type_mismatch(Condition::WrongKind, "expected an integer argument")
    })
}

fn length_arg(args: &[Value], p: usize) -> Result<usize> {
    let n = int_arg(args, p)?;
    if n <= 0 {
        return Err(Error::type_mismatch(
            Condition::WrongKind,
            "chunk length must be a positive integer",
        ));
    }
    Ok(n as usize)
}

fn pair_tuple(k: Value, v: Value) -> Value {
    Value::Tuple(vec![k, v])
}

// ---- element-wise transforms ----

pub fn map(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let vals = arg(&args, 1)?.to_values()?;
    let mut out = Vec::with_capacity(vals.len());
    for v in vals {
        out.push(f.call(&[v])?);
    }
    Ok(Value::List(out))
}

/// Enumerated map: the (wrapped) callback receives `(index, element)`.
pub fn emap(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let vals = arg(&args, 1)?.to_values()?;
    let mut out = Vec::with_capacity(vals.len());
    for (i, v) in vals.into_iter().enumerate() {
        out.push(f.call(&[pair_tuple(Value::Int(i as i64), v)])?);
    }
    Ok(Value::List(out))
}

pub fn filter(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let vals = arg(&args, 1)?.to_values()?;
    let mut out = Vec::new();
    for v in vals {
        if f.call(&[v.clone()])?.is_truthy() {
            out.push(v);
        }
    }
    Ok(Value::List(out))
}

fn fold(f: &Callback, items: Vec<Value>, init: Option<Value>) -> Result<Value> {
    let mut it = items.into_iter();
    let mut acc = match init {
        Some(v) => v,
        None => it.next().ok_or_else(|| {
            Error::type_mismatch(
                Condition::Empty,
                "reduce of an empty collection with no initial value",
            )
        })?,
    };
    for v in it {
        acc = f.call(&[acc, v])?;
    }
    Ok(acc)
}

pub fn reduce(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let items = arg(&args, 1)?.to_values()?;
    fold(f, items, args.get(2).cloned())
}

// ---- ordering and grouping ----

pub fn sorted(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let key = opt_callback(&args, 1)?;
    let mut decorated = Vec::with_capacity(vals.len());
    for v in vals {
        let k = match key {
            Some(f) => f.call(&[v.clone()])?,
            None => v.clone(),
        };
        decorated.push((k, v));
    }
    decorated.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Value::List(decorated.into_iter().map(|(_, v)| v).collect()))
}

/// Run-length grouping of consecutive equal keys, never a global grouping.
pub fn groupby(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let key = opt_callback(&args, 1)?;
    let mut out: Vec<Value> = Vec::new();
    let mut run: Vec<Value> = Vec::new();
    let mut run_key: Option<Value> = None;
    for v in vals {
        let k = match key {
            Some(f) => f.call(&[v.clone()])?,
            None => v.clone(),
        };
        match &run_key {
            Some(prev) if *prev == k => run.push(v),
            Some(prev) => {
                out.push(pair_tuple(prev.clone(), Value::List(std::mem::take(&mut run))));
                run.push(v);
                run_key = Some(k);
            }
            None => {
                run.push(v);
                run_key = Some(k);
            }
        }
    }
    if let Some(k) = run_key {
        out.push(pair_tuple(k, Value::List(run)));
    }
    Ok(Value::List(out))
}

pub fn unique(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    Ok(Value::Set(vals.into_iter().collect()))
}

pub fn zip(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let a = arg(&args, 0)?.to_values()?;
    let b = arg(&args, 1)?.to_values()?;
    Ok(Value::List(
        a.into_iter().zip(b).map(|(x, y)| pair_tuple(x, y)).collect(),
    ))
}

/// Lazy enumeration; the result is an iterator-kind value.
pub fn enumerate(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let h = arg(&args, 0)?.to_iter_handle()?;
    let mut i: i64 = 0;
    Ok(Value::Iter(IterHandle::new(std::iter::from_fn(move || {
        h.next().map(|v| {
            let out = pair_tuple(Value::Int(i), v);
            i += 1;
            out
        })
    }))))
}

// ---- concatenation ----

/// Per-target dispatch: mappings merge (onto a mapping current only), sets
/// and sequences append positionally, iterators chain lazily.
pub fn concat(bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let c = pipeline(bound)?;
    for target in args {
        if !target.is_iterable() {
            return Err(Error::type_mismatch(
                Condition::NotIterable,
                "concat argument must be an iterable type",
            ));
        }
        match target.kind() {
            Kind::Map => c.call("concat_dict", vec![target])?,
            Kind::Iter => c.call("concat_iter", vec![target])?,
            _ => c.call("concat_seq", vec![target])?,
        };
    }
    Ok(c.current().clone())
}

pub fn concat_seq(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let current = arg(&args, 0)?;
    let other = arg(&args, 1)?;
    if current.is_iterator() || other.is_iterator() {
        return Ok(Value::Iter(IterHandle::chain(
            current.to_iter_handle()?,
            other.to_iter_handle()?,
        )));
    }
    let mut out = current.to_values()?;
    out.extend(other.to_values()?);
    Ok(Value::List(out))
}

pub fn concat_dict(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let Value::Map(current) = arg(&args, 0)? else {
        return Err(Error::invalid_structure(
            Condition::WrongKind,
            "concat_dict requires a mapping on both sides",
        ));
    };
    let Value::Map(other) = arg(&args, 1)? else {
        return Err(Error::invalid_structure(
            Condition::WrongKind,
            "concat_dict requires a mapping on both sides",
        ));
    };
    let mut merged = current.clone();
    for (k, v) in other {
        merged.insert(k.clone(), v.clone());
    }
    Ok(Value::Map(merged))
}

pub fn concat_iter(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let current = arg(&args, 0)?.to_iter_handle()?;
    let other = arg(&args, 1)?.to_iter_handle()?;
    Ok(Value::Iter(IterHandle::chain(current, other)))
}

// ---- set algebra ----

fn algebra_dispatch(bound: Bound<'_>, args: Vec<Value>, seq_op: &str, dict_op: &str) -> Result<Value> {
    let c = pipeline(bound)?;
    let target = arg(&args, 0)?.clone();
    if !target.is_iterable() {
        return Err(Error::type_mismatch(
            Condition::NotIterable,
            "argument must be an iterable type",
        ));
    }
    match target.kind() {
        Kind::Map => c.call(dict_op, vec![target])?,
        _ => c.call(seq_op, vec![target])?,
    };
    Ok(c.current().clone())
}

pub fn diff(bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    algebra_dispatch(bound, args, "diff_seq", "diff_dict")
}

pub fn intersect(bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    algebra_dispatch(bound, args, "intersect_seq", "intersect_dict")
}

fn other_set(args: &[Value], p: usize) -> Result<IndexSet<Value>> {
    match arg(args, p)? {
        Value::Set(s) => Ok(s.clone()),
        other => Ok(other.to_values()?.into_iter().collect()),
    }
}

pub fn diff_seq(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let cur = arg(&args, 0)?.to_algebra_elements()?;
    let other = other_set(&args, 1)?;
    Ok(Value::Set(cur.difference(&other).cloned().collect()))
}

pub fn intersect_seq(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let cur = arg(&args, 0)?.to_algebra_elements()?;
    let other = other_set(&args, 1)?;
    Ok(Value::Set(cur.intersection(&other).cloned().collect()))
}

fn entry_pairs_set(value: &Value) -> Result<IndexSet<Value>> {
    match value {
        Value::Map(_) | Value::Items(_) => Ok(value
            .to_pairs()?
            .into_iter()
            .map(|(k, v)| pair_tuple(k, v))
            .collect()),
        other => Err(Error::invalid_structure(
            Condition::WrongKind,
            format!("{} is not a mapping or mapping entries view", other.kind()),
        )),
    }
}

pub fn diff_dict(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let cur = entry_pairs_set(arg(&args, 0)?)?;
    let other = other_set(&args, 1)?;
    Ok(Value::Set(cur.difference(&other).cloned().collect()))
}

pub fn intersect_dict(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let cur = entry_pairs_set(arg(&args, 0)?)?;
    let other = other_set(&args, 1)?;
    Ok(Value::Set(cur.intersection(&other).cloned().collect()))
}

// ---- shape changes ----

fn flat_into(value: &Value, out: &mut Vec<Value>) {
    match value {
        // Strings and byte-like leaves are never descended into; neither
        // are sets or mappings.
        Value::List(xs) | Value::Tuple(xs) => {
            for x in xs {
                flat_into(x, out);
            }
        }
        other => out.push(other.clone()),
    }
}

pub fn flatten(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let mut out = Vec::new();
    for v in &vals {
        flat_into(v, &mut out);
    }
    Ok(Value::List(out))
}

pub fn chunks(bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let c = pipeline(bound)?;
    if !c.current().is_iterable() {
        return Err(Error::type_mismatch(
            Condition::NotIterable,
            "chunks requires an iterable collection",
        ));
    }
    let op = if c.current().is_mapping() { "chunks_dict" } else { "chunks_seq" };
    c.call(op, args)?;
    Ok(c.current().clone())
}

fn chunk_values(vals: Vec<Value>, len: usize) -> Value {
    Value::List(
        vals.chunks(len)
            .map(|chunk| Value::List(chunk.to_vec()))
            .collect(),
    )
}

pub fn chunks_seq(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let len = length_arg(&args, 1)?;
    Ok(chunk_values(vals, len))
}

pub fn chunks_dict(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let pairs = arg(&args, 0)?
        .to_pairs()?
        .into_iter()
        .map(|(k, v)| pair_tuple(k, v))
        .collect();
    let len = length_arg(&args, 1)?;
    Ok(chunk_values(pairs, len))
}

pub fn slice(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let len = vals.len() as i64;
    let clamp = |i: i64| -> usize {
        if i < 0 { (len + i).max(0) as usize } else { i.min(len) as usize }
    };
    let start = clamp(int_arg(&args, 1)?);
    let end = match args.get(2) {
        None | Some(Value::None) => vals.len(),
        Some(_) => clamp(int_arg(&args, 2)?),
    };
    if start >= end {
        return Ok(Value::List(Vec::new()));
    }
    Ok(Value::List(vals[start..end].to_vec()))
}

/// Lazy slice: one bound means `stop`, two mean `start`/`stop` (a `None`
/// stop runs to exhaustion). The result is an iterator-kind value.
pub fn islice(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let h = arg(&args, 0)?.to_iter_handle()?;
    let non_negative = |v: i64| -> Result<usize> {
        usize::try_from(v).map_err(|_| {
            Error::type_mismatch(Condition::WrongKind, "islice bounds must be non-negative")
        })
    };
    let (start, stop) = match (args.get(1), args.get(2)) {
        (Some(_), None) => (0, Some(non_negative(int_arg(&args, 1)?)?)),
        (Some(_), Some(Value::None)) => (non_negative(int_arg(&args, 1)?)?, None),
        (Some(_), Some(_)) => (
            non_negative(int_arg(&args, 1)?)?,
            Some(non_negative(int_arg(&args, 2)?)?),
        ),
        _ => {
            return Err(Error::type_mismatch(
                Condition::Other,
                "islice requires at least one bound",
            ));
        }
    };
    let limit = stop.map(|s| s.saturating_sub(start));
    let mut skipped = false;
    let mut taken = 0usize;
    Ok(Value::Iter(IterHandle::new(std::iter::from_fn(move || {
        if !skipped {
            for _ in 0..start {
                h.next()?;
            }
            skipped = true;
        }
        if let Some(limit) = limit {
            if taken >= limit {
                return None;
            }
        }
        taken += 1;
        h.next()
    }))))
}

// ---- queries ----

pub fn contains(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let needle = arg(&args, 1)?;
    let found = match arg(&args, 0)? {
        Value::Map(m) => m.contains_key(needle),
        other => other.to_values()?.contains(needle),
    };
    Ok(Value::Bool(found))
}

/// Emptiness check. An iterator current is materialized (and stored) so
/// the check is not destructive.
pub fn empty(bound: Bound<'_>, _args: Vec<Value>) -> Result<Value> {
    let c = pipeline(bound)?;
    if c.current().is_iterator() {
        let vals = c.current().to_values()?;
        c.set_current(Value::List(vals));
    }
    Ok(Value::Bool(c.current().is_empty()?))
}

pub fn all(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let pred = opt_callback(&args, 1)?;
    for v in vals {
        let truthy = match pred {
            Some(f) => f.call(&[v])?.is_truthy(),
            None => v.is_truthy(),
        };
        if !truthy {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

pub fn any(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let pred = opt_callback(&args, 1)?;
    for v in vals {
        let truthy = match pred {
            Some(f) => f.call(&[v])?.is_truthy(),
            None => v.is_truthy(),
        };
        if truthy {
            return Ok(Value::Bool(true));
        }
    }
    Ok(Value::Bool(false))
}

fn extremum(args: &[Value], pick_greater: bool) -> Result<Value> {
    let vals = arg(args, 0)?.to_values()?;
    let mut best: Option<Value> = None;
    for v in vals {
        best = Some(match best {
            None => v,
            Some(b) => {
                let replace = if pick_greater { v > b } else { v < b };
                if replace { v } else { b }
            }
        });
    }
    best.ok_or_else(|| {
        Error::missing(Condition::Empty, "extremum of an empty collection")
    })
}

pub fn min(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    extremum(&args, false)
}

pub fn max(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    extremum(&args, true)
}

pub fn len(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Int(arg(&args, 0)?.len()? as i64))
}

// ---- subscript access ----

fn seq_index(xs: &[Value], key: &Value) -> Result<Value> {
    let i = key.as_i64().ok_or_else(|| {
        Error::not_subscriptable(Condition::NotIndexable, "sequence index must be an integer")
    })?;
    let len = xs.len() as i64;
    let idx = if i < 0 { len + i } else { i };
    if idx < 0 || idx >= len {
        return Err(Error::missing(
            Condition::IndexOutOfRange,
            format!("index {i} out of range"),
        ));
    }
    Ok(xs[idx as usize].clone())
}

/// Keyed or positional read. Kind checks precede emptiness checks: an
/// empty iterator is still "not subscriptable", not "missing index".
fn subscript(value: &Value, key: &Value) -> Result<Value> {
    match value {
        Value::List(xs) | Value::Tuple(xs) => seq_index(xs, key),
        Value::Str(s) => {
            let chars: Vec<Value> = s.chars().map(|c| Value::Str(c.to_string())).collect();
            seq_index(&chars, key)
        }
        Value::Map(m) => m.get(key).cloned().ok_or_else(|| {
            Error::missing(Condition::MissingKey, format!("mapping contains no key {key}"))
        }),
        other => Err(Error::not_subscriptable(
            Condition::NotIndexable,
            format!("{} is not of a subscriptable type", other.kind()),
        )),
    }
}

pub fn getitem(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    subscript(arg(&args, 0)?, arg(&args, 1)?)
}

pub fn first(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    subscript(arg(&args, 0)?, &Value::Int(0))
}

pub fn last(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    subscript(arg(&args, 0)?, &Value::Int(-1))
}

fn entry_at(args: &[Value], index: i64) -> Result<(Value, Value)> {
    let pairs = arg(args, 0)?.to_pairs()?;
    let len = pairs.len() as i64;
    let idx = if index < 0 { len + index } else { index };
    if idx < 0 || idx >= len {
        return Err(Error::missing(
            Condition::IndexOutOfRange,
            format!("entry index {index} out of range"),
        ));
    }
    Ok(pairs[idx as usize].clone())
}

pub fn first_item(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let (k, v) = entry_at(&args, 0)?;
    Ok(pair_tuple(k, v))
}

pub fn last_item(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let (k, v) = entry_at(&args, -1)?;
    Ok(pair_tuple(k, v))
}

pub fn first_nt_item(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let (k, v) = entry_at(&args, 0)?;
    Ok(Value::Item(Box::new(DictItem { key: k, value: v })))
}

pub fn last_nt_item(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let (k, v) = entry_at(&args, -1)?;
    Ok(Value::Item(Box::new(DictItem { key: k, value: v })))
}

/// In-place keyed or positional write on the current collection.
pub fn setitem(bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let c = pipeline(bound)?;
    let key = arg(&args, 0)?.clone();
    let value = arg(&args, 1)?.clone();
    match c.current_mut() {
        Value::List(xs) => {
            let i = key.as_i64().ok_or_else(|| {
                Error::not_subscriptable(
                    Condition::NotIndexable,
                    "sequence index must be an integer",
                )
            })?;
            let len = xs.len() as i64;
            let idx = if i < 0 { len + i } else { i };
            if idx < 0 || idx >= len {
                return Err(Error::missing(
                    Condition::IndexOutOfRange,
                    format!("index {i} out of range"),
                ));
            }
            xs[idx as usize] = value;
        }
        Value::Map(m) => {
            m.insert(key, value);
        }
        other => {
            return Err(Error::not_subscriptable(
                Condition::NotAssignable,
                format!("{} does not support item assignment", other.kind()),
            ));
        }
    }
    Ok(Value::None)
}

/// Remove and return the last element; pre-processing has already
/// materialized the current collection as a list.
pub fn pop(bound: Bound<'_>, _args: Vec<Value>) -> Result<Value> {
    let c = pipeline(bound)?;
    match c.current_mut() {
        Value::List(xs) => xs
            .pop()
            .ok_or_else(|| Error::missing(Condition::Empty, "pop from an empty iterable")),
        other => Err(Error::not_subscriptable(
            Condition::NotIndexable,
            format!("cannot pop from {}", other.kind()),
        )),
    }
}

/// Advance the current collection as an iterator; pre-processing has
/// already converted it in place.
pub fn next(bound: Bound<'_>, _args: Vec<Value>) -> Result<Value> {
    let c = pipeline(bound)?;
    match c.current() {
        Value::Iter(h) => h
            .next()
            .ok_or_else(|| Error::missing(Condition::Exhausted, "iterator is exhausted")),
        other => Err(Error::type_mismatch(
            Condition::WrongKind,
            format!("{} is not an iterator", other.kind()),
        )),
    }
}

pub fn join(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let vals = arg(&args, 0)?.to_values()?;
    let sep = arg(&args, 1)?.as_str().ok_or_else(|| {
        Error::type_mismatch(Condition::WrongKind, "join separator must be a string")
    })?;
    let mut parts = Vec::with_capacity(vals.len());
    for v in &vals {
        parts.push(
            v.as_str()
                .ok_or_else(|| {
                    Error::type_mismatch(
                        Condition::WrongKind,
                        format!("join requires string elements, got {}", v.kind()),
                    )
                })?
                .to_string(),
        );
    }
    Ok(Value::Str(parts.join(sep)))
}

// ---- entry views and the items family ----

pub fn items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Items(arg(&args, 0)?.to_pairs()?))
}

pub fn nt_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::List(
        arg(&args, 0)?
            .to_pairs()?
            .into_iter()
            .map(|(k, v)| Value::Item(Box::new(DictItem { key: k, value: v })))
            .collect(),
    ))
}

pub fn map_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let pairs = arg(&args, 1)?.to_pairs()?;
    let mut out = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        out.push(f.call(&[pair_tuple(k, v)])?);
    }
    Ok(Value::List(out))
}

pub fn filter_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let pairs = arg(&args, 1)?.to_pairs()?;
    let mut out = Vec::new();
    for (k, v) in pairs {
        let entry = pair_tuple(k, v);
        if f.call(&[entry.clone()])?.is_truthy() {
            out.push(entry);
        }
    }
    Ok(Value::List(out))
}

pub fn reduce_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let items = arg(&args, 1)?
        .to_pairs()?
        .into_iter()
        .map(|(k, v)| pair_tuple(k, v))
        .collect();
    fold(f, items, args.get(2).cloned())
}

pub fn map_nt_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let pairs = arg(&args, 1)?.to_pairs()?;
    let mut out = Vec::with_capacity(pairs.len());
    for (k, v) in pairs {
        out.push(f.call(&[Value::Item(Box::new(DictItem { key: k, value: v }))])?);
    }
    Ok(Value::List(out))
}

pub fn filter_nt_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let pairs = arg(&args, 1)?.to_pairs()?;
    let mut out = Vec::new();
    for (k, v) in pairs {
        let item = Value::Item(Box::new(DictItem { key: k, value: v }));
        if f.call(&[item.clone()])?.is_truthy() {
            out.push(item);
        }
    }
    Ok(Value::List(out))
}

pub fn reduce_nt_items(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    let f = callback_arg(&args, 0)?;
    let items = arg(&args, 1)?
        .to_pairs()?
        .into_iter()
        .map(|(k, v)| Value::Item(Box::new(DictItem { key: k, value: v })))
        .collect();
    fold(f, items, args.get(2).cloned())
}

// ---- conversions ----

pub fn to_list(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::List(arg(&args, 0)?.to_values()?))
}

pub fn to_set(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Set(arg(&args, 0)?.to_values()?.into_iter().collect()))
}

pub fn to_tuple(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Tuple(arg(&args, 0)?.to_values()?))
}

pub fn to_dict(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Map(arg(&args, 0)?.to_map()?))
}

pub fn to_iter(_bound: Bound<'_>, args: Vec<Value>) -> Result<Value> {
    Ok(Value::Iter(arg(&args, 0)?.to_iter_handle()?))
}
