//! The composable policy objects an operation descriptor bundles.
//!
//! Each registered operation combines one choice from every category here:
//! how arguments are pre-shaped ([`ArgFormat`]), where the current
//! collection enters the algorithm call ([`Binding`]), which named
//! operations run first ([`PreOp`]), whether the result replaces the
//! current collection ([`StorePolicy`]), what the caller receives
//! ([`ReturnPolicy`]), and which raw failure conditions are rewritten to
//! fixed messages ([`ErrorNormalizer`]). All of them are stateless values,
//! shared freely between descriptors.

use crate::error::{Condition, Error, ErrorKind, Result};
use crate::value::{Callback, Value};

/// Whether the algorithm's result replaces the pipeline's current
/// collection. Overridable per call via `store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePolicy {
    Store,
    Keep,
}

/// Whether an invocation hands back the pipeline (chaining) or the raw
/// computed result. Overridable per call via `ret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnPolicy {
    Pipeline,
    Result,
}

/// Where the current collection enters the algorithm's argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Prepend the current value (most operations).
    Current,
    /// Append the current value — for algorithms whose native order is
    /// `(callback, collection)`, like map and filter.
    CurrentLast,
    /// Splice the current value at an arbitrary position — reduce's
    /// native order is `(callback, collection, initial)`.
    CurrentAt(usize),
    /// Pass the pipeline itself, so the algorithm can branch on the
    /// current kind and delegate to other registered operations.
    Pipeline,
}

/// One pre-processing step: a registered operation run against the
/// pipeline before the main algorithm. `forward` re-uses the invocation's
/// own arguments (how `group_sort` hands its key to `sorted`).
#[derive(Debug, Clone, Copy)]
pub struct PreOp {
    pub name: &'static str,
    pub forward: bool,
}

impl PreOp {
    pub const fn run(name: &'static str) -> Self {
        Self { name, forward: false }
    }

    pub const fn forwarding(name: &'static str) -> Self {
        Self { name, forward: true }
    }
}

/// Argument formatting rule, applied to the user-supplied arguments before
/// binding and dispatch. Positions index the user arguments only; the
/// current collection is spliced in afterwards by the [`Binding`].
#[derive(Debug, Clone, Copy)]
pub enum ArgFormat {
    Identity,
    /// Coerce the argument at `p` to a mapping.
    ToMap(usize),
    /// Coerce the argument at `p` to a mapping, then replace it with the
    /// set of its `(key, value)` pair tuples.
    PairsToSet(usize),
    /// Convert the argument at `p` to an iterator handle.
    ToIter(usize),
    /// Materialize the argument at `p` as a list.
    ToList(usize),
    /// Convert the argument at `p` to a set.
    ToSet(usize),
    /// Wrap the callback at `func` so that a pair-shaped element at
    /// callback-argument position `at` is spread into two arguments.
    SpreadPair { func: usize, at: usize },
}

fn require(args: &[Value], p: usize) -> Result<&Value> {
    args.get(p).ok_or_else(|| {
        Error::type_mismatch(Condition::Other, format!("missing argument at position {p}"))
    })
}

impl ArgFormat {
    pub fn format(&self, mut args: Vec<Value>) -> Result<Vec<Value>> {
        match *self {
            ArgFormat::Identity => Ok(args),
            ArgFormat::ToMap(p) => {
                let m = require(&args, p)?.to_map()?;
                args[p] = Value::Map(m);
                Ok(args)
            }
            ArgFormat::PairsToSet(p) => {
                let pairs = require(&args, p)?.to_map()?;
                args[p] = Value::Set(
                    pairs
                        .into_iter()
                        .map(|(k, v)| Value::Tuple(vec![k, v]))
                        .collect(),
                );
                Ok(args)
            }
            ArgFormat::ToIter(p) => {
                let h = require(&args, p)?.to_iter_handle()?;
                args[p] = Value::Iter(h);
                Ok(args)
            }
            ArgFormat::ToList(p) => {
                let v = require(&args, p)?.to_values()?;
                args[p] = Value::List(v);
                Ok(args)
            }
            ArgFormat::ToSet(p) => {
                let v = require(&args, p)?.to_values()?;
                args[p] = Value::Set(v.into_iter().collect());
                Ok(args)
            }
            ArgFormat::SpreadPair { func, at } => {
                let cb = require(&args, func)?
                    .as_callback()
                    .ok_or_else(|| {
                        Error::type_mismatch(Condition::WrongKind, "expected a callable argument")
                    })?
                    .clone();
                args[func] = Value::Func(spread_pair(cb, at));
                Ok(args)
            }
        }
    }
}

/// Wrap `cb` so the pair-shaped value at argument position `at` arrives as
/// two separate arguments.
fn spread_pair(cb: Callback, at: usize) -> Callback {
    Callback::new(move |xs: &[Value]| {
        let target = xs.get(at).ok_or_else(|| {
            Error::type_mismatch(
                Condition::Other,
                format!("spread position {at} exceeds the callback's arguments"),
            )
        })?;
        let (k, v) = target.as_pair()?;
        let mut call = Vec::with_capacity(xs.len() + 1);
        call.extend_from_slice(&xs[..at]);
        call.push(k);
        call.push(v);
        call.extend_from_slice(&xs[at + 1..]);
        cb.call(&call)
    })
}

/// Per-operation rewrite table for recognized low-level failures. Anything
/// outside the table passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorNormalizer {
    PassThrough,
    /// Mapping-coercion failures collapse into one invalid-structure error.
    MapConversion,
    /// Keyed/positional read failures: three distinct messages under the
    /// subscript error family.
    Subscript,
    /// Keyed/positional write failures.
    SubscriptAssign,
    /// Entry access: mapping-coercion failures plus positional failures on
    /// the resulting pairs (`first_item` and friends).
    ItemAccess,
}

impl ErrorNormalizer {
    pub fn normalize(&self, err: Error) -> Error {
        match self {
            ErrorNormalizer::PassThrough => err,
            ErrorNormalizer::MapConversion => match err.condition() {
                Condition::NotPairShaped | Condition::WrongKind | Condition::NotIterable => err
                    .rewrite(
                        ErrorKind::InvalidStructure,
                        "invalid iterable structure for a mapping",
                    ),
                _ => err,
            },
            ErrorNormalizer::Subscript => normalize_subscript(err),
            ErrorNormalizer::SubscriptAssign => match err.condition() {
                Condition::NotAssignable | Condition::NotIndexable => err.rewrite(
                    ErrorKind::NotSubscriptable,
                    "iterable is not subscriptable for assignment",
                ),
                _ => err,
            },
            ErrorNormalizer::ItemAccess => match err.condition() {
                Condition::NotPairShaped | Condition::WrongKind | Condition::NotIterable => err
                    .rewrite(
                        ErrorKind::InvalidStructure,
                        "invalid iterable structure for a mapping",
                    ),
                _ => normalize_subscript(err),
            },
        }
    }
}

fn normalize_subscript(err: Error) -> Error {
    match err.condition() {
        Condition::MissingKey => err.rewrite(
            ErrorKind::KeyOrIndexMissing,
            "iterable contains no key or index 0",
        ),
        Condition::NotIndexable => err.rewrite(
            ErrorKind::NotSubscriptable,
            "iterable is not of a subscriptable type",
        ),
        Condition::IndexOutOfRange | Condition::Empty => err.rewrite(
            ErrorKind::KeyOrIndexMissing,
            "index out of range on iterable",
        ),
        Condition::Exhausted => err.rewrite(ErrorKind::KeyOrIndexMissing, "iterator is exhausted"),
        _ => err,
    }
}
