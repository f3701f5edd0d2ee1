//! The closed tagged union of runtime values a pipeline can hold.
//!
//! Every collection kind the pipeline dispatches over is one variant of
//! [`Value`]: ordered sequences ([`Value::List`], [`Value::Tuple`], and
//! strings, which iterate as one-character strings), unordered-but-
//! insertion-ordered sets and mappings, mapping entry views, and shared
//! single-pass iterators. Callbacks travel as values too ([`Value::Func`]),
//! which is what lets argument formatters wrap and re-shape them before an
//! algorithm runs.
//!
//! Sets and maps are backed by `indexmap` so iteration order is always the
//! insertion order and every operation is deterministic. Floats are stored
//! as [`OrderedFloat`] so they can live inside sets and map keys.
//!
//! Equality is structural for data variants and order-independent for sets
//! and maps; iterators and callbacks compare by identity, mirroring the
//! single-pass sharing semantics of [`IterHandle`].

use crate::error::{Condition, Error, Result};
use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// One entry of a mapping with named-field access, produced by the
/// `nt_items` family of operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictItem {
    pub key: Value,
    pub value: Value,
}

impl DictItem {
    pub fn new(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// A shared, single-pass iterator over values.
///
/// Cloning a handle shares iteration state: advancing one clone advances
/// them all. This mirrors the reference semantics a single-pass stream has
/// in the pipeline — converting an iterator-kind collection "to an
/// iterator" yields the same underlying stream, and `next` observably
/// consumes it.
#[derive(Clone)]
pub struct IterHandle(Rc<RefCell<Box<dyn Iterator<Item = Value>>>>);

impl IterHandle {
    pub fn new<I>(inner: I) -> Self
    where
        I: Iterator<Item = Value> + 'static,
    {
        Self(Rc::new(RefCell::new(Box::new(inner))))
    }

    /// Advance the shared iterator by one element.
    pub fn next(&self) -> Option<Value> {
        self.0.borrow_mut().next()
    }

    /// Drain every remaining element into a vector.
    pub fn drain(&self) -> Vec<Value> {
        let mut out = Vec::new();
        while let Some(v) = self.next() {
            out.push(v);
        }
        out
    }

    /// Lazily chain two handles; neither side is consumed until the result
    /// is advanced past it.
    pub fn chain(first: IterHandle, second: IterHandle) -> IterHandle {
        let a = first;
        let b = second;
        IterHandle::new(
            std::iter::from_fn(move || a.next()).chain(std::iter::from_fn(move || b.next())),
        )
    }

    fn ident(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for IterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IterHandle({:#x})", self.ident())
    }
}

impl PartialEq for IterHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for IterHandle {}

/// A callback passed to an operation as an argument.
///
/// Callbacks take a slice of values so argument formatters can wrap them —
/// spreading a pair-shaped element into `(key, value)` arguments, for
/// example — without knowing the inner closure's arity.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&[Value]) -> Result<Value>>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Self(Rc::new(f))
    }

    /// An infallible single-argument callback.
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + 'static,
    {
        Self::new(move |args| {
            let v = args.first().ok_or_else(|| {
                Error::type_mismatch(Condition::Other, "callback expected one argument")
            })?;
            Ok(f(v))
        })
    }

    /// An infallible two-argument callback, e.g. `(key, value)` or
    /// `(accumulator, element)`.
    pub fn binary<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        Self::new(move |args| match args {
            [a, b] => Ok(f(a, b)),
            _ => Err(Error::type_mismatch(
                Condition::Other,
                format!("callback expected two arguments, got {}", args.len()),
            )),
        })
    }

    /// An infallible three-argument callback, e.g. `(acc, key, value)`.
    pub fn ternary<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> Value + 'static,
    {
        Self::new(move |args| match args {
            [a, b, c] => Ok(f(a, b, c)),
            _ => Err(Error::type_mismatch(
                Condition::Other,
                format!("callback expected three arguments, got {}", args.len()),
            )),
        })
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.0)(args)
    }

    fn ident(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:#x})", self.ident())
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.ident() == other.ident()
    }
}

impl Eq for Callback {}

/// The container-kind tag of a [`Value`], used by the dispatch algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Set,
    Map,
    Items,
    Item,
    Iter,
    Func,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::None => "none",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::List => "list",
            Kind::Tuple => "tuple",
            Kind::Set => "set",
            Kind::Map => "map",
            Kind::Items => "items view",
            Kind::Item => "item",
            Kind::Iter => "iterator",
            Kind::Func => "callable",
        };
        f.write_str(s)
    }
}

/// A runtime value: scalar, container, iterator, or callback.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(IndexSet<Value>),
    Map(IndexMap<Value, Value>),
    /// A mapping entries view: sequence-like, pair-shaped.
    Items(Vec<(Value, Value)>),
    /// A single mapping entry with named fields.
    Item(Box<DictItem>),
    Iter(IterHandle),
    Func(Callback),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Tuple(_) => Kind::Tuple,
            Value::Set(_) => Kind::Set,
            Value::Map(_) => Kind::Map,
            Value::Items(_) => Kind::Items,
            Value::Item(_) => Kind::Item,
            Value::Iter(_) => Kind::Iter,
            Value::Func(_) => Kind::Func,
        }
    }

    pub fn func<F>(f: F) -> Value
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Value::Func(Callback::new(f))
    }

    pub fn float(f: f64) -> Value {
        Value::Float(OrderedFloat(f))
    }

    pub fn pair(k: impl Into<Value>, v: impl Into<Value>) -> Value {
        Value::Tuple(vec![k.into(), v.into()])
    }

    pub fn item(k: impl Into<Value>, v: impl Into<Value>) -> Value {
        Value::Item(Box::new(DictItem::new(k, v)))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Sequence-like kinds: positionally ordered element containers,
    /// including mapping entry views.
    pub fn is_sequence_like(&self) -> bool {
        matches!(
            self,
            Value::List(_) | Value::Tuple(_) | Value::Str(_) | Value::Items(_) | Value::Item(_)
        )
    }

    pub fn is_iterator(&self) -> bool {
        matches!(self, Value::Iter(_))
    }

    pub fn is_iterable(&self) -> bool {
        self.is_mapping() || self.is_set() || self.is_sequence_like() || self.is_iterator()
    }

    /// Truthiness: empty containers, zero, the empty string, `None`, and
    /// `false` are falsey; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => f.0 != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(v) | Value::Tuple(v) => !v.is_empty(),
            Value::Set(s) => !s.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Items(v) => !v.is_empty(),
            Value::Item(_) | Value::Iter(_) | Value::Func(_) => true,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(f.0),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_callback(&self) -> Option<&Callback> {
        match self {
            Value::Func(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&DictItem> {
        match self {
            Value::Item(it) => Some(it),
            _ => None,
        }
    }

    /// Element count of a sized container. Iterators and scalars have no
    /// length.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Str(s) => Ok(s.chars().count()),
            Value::List(v) | Value::Tuple(v) => Ok(v.len()),
            Value::Set(s) => Ok(s.len()),
            Value::Map(m) => Ok(m.len()),
            Value::Items(v) => Ok(v.len()),
            Value::Item(_) => Ok(2),
            other => Err(Error::type_mismatch(
                Condition::WrongKind,
                format!("object of {} kind has no length", other.kind()),
            )),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The elements this value yields when iterated, in native order:
    /// mapping → keys, entries view → pair tuples, string → one-character
    /// strings. An iterator is drained (single-pass).
    pub fn to_values(&self) -> Result<Vec<Value>> {
        match self {
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::List(v) | Value::Tuple(v) => Ok(v.clone()),
            Value::Set(s) => Ok(s.iter().cloned().collect()),
            Value::Map(m) => Ok(m.keys().cloned().collect()),
            Value::Items(v) => Ok(v
                .iter()
                .map(|(k, val)| Value::Tuple(vec![k.clone(), val.clone()]))
                .collect()),
            Value::Item(it) => Ok(vec![it.key.clone(), it.value.clone()]),
            Value::Iter(h) => Ok(h.drain()),
            other => Err(Error::type_mismatch(
                Condition::NotIterable,
                format!("{} is not an iterable type", other.kind()),
            )),
        }
    }

    /// An iterator over this value's elements. For iterator-kind values
    /// this is the same shared handle, not a copy.
    pub fn to_iter_handle(&self) -> Result<IterHandle> {
        match self {
            Value::Iter(h) => Ok(h.clone()),
            other => Ok(IterHandle::new(other.to_values()?.into_iter())),
        }
    }

    /// Interpret one element as a `(key, value)` pair.
    pub fn as_pair(&self) -> Result<(Value, Value)> {
        match self {
            Value::Tuple(v) | Value::List(v) if v.len() == 2 => {
                Ok((v[0].clone(), v[1].clone()))
            }
            Value::Item(it) => Ok((it.key.clone(), it.value.clone())),
            other => Err(Error::invalid_structure(
                Condition::NotPairShaped,
                format!("{} element is not a key/value pair", other.kind()),
            )),
        }
    }

    /// The `(key, value)` pairs of a mapping-convertible value: a mapping,
    /// an entries view, or any iterable of pair-shaped elements.
    pub fn to_pairs(&self) -> Result<Vec<(Value, Value)>> {
        match self {
            Value::Map(m) => Ok(m.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            Value::Items(v) => Ok(v.clone()),
            other => other.to_values()?.iter().map(Value::as_pair).collect(),
        }
    }

    /// Coerce to a mapping; on duplicate keys the later entry wins.
    pub fn to_map(&self) -> Result<IndexMap<Value, Value>> {
        Ok(self.to_pairs()?.into_iter().collect())
    }

    /// The elements used by the set-algebra operations: pairs for a
    /// mapping, native elements for everything else.
    pub fn to_algebra_elements(&self) -> Result<IndexSet<Value>> {
        match self {
            Value::Map(m) => Ok(m
                .iter()
                .map(|(k, v)| Value::Tuple(vec![k.clone(), v.clone()]))
                .collect()),
            other => Ok(other.to_values()?.into_iter().collect()),
        }
    }

    /// Build a `Value` from parsed JSON. Objects become insertion-ordered
    /// mappings keyed by strings; numbers become `Int` when integral.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(a) => {
                Value::List(a.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(o) => Value::Map(
                o.into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Render as JSON. Tuples, sets, and entry views serialize as arrays;
    /// mapping keys must be strings; iterators and callbacks do not
    /// serialize.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let seq = |vals: &[Value]| -> Result<serde_json::Value> {
            vals.iter()
                .map(Value::to_json)
                .collect::<Result<Vec<_>>>()
                .map(serde_json::Value::Array)
        };
        match self {
            Value::None => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Int(i) => Ok(serde_json::Value::from(*i)),
            Value::Float(f) => serde_json::Number::from_f64(f.0)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    Error::type_mismatch(Condition::Other, "non-finite float is not valid JSON")
                }),
            Value::Str(s) => Ok(serde_json::Value::String(s.clone())),
            Value::List(v) | Value::Tuple(v) => seq(v),
            Value::Set(s) => seq(&s.iter().cloned().collect::<Vec<_>>()),
            Value::Items(v) => seq(&v
                .iter()
                .map(|(k, val)| Value::Tuple(vec![k.clone(), val.clone()]))
                .collect::<Vec<_>>()),
            Value::Item(it) => seq(&[it.key.clone(), it.value.clone()]),
            Value::Map(m) => {
                let mut out = serde_json::Map::with_capacity(m.len());
                for (k, v) in m {
                    let key = k.as_str().ok_or_else(|| {
                        Error::type_mismatch(
                            Condition::WrongKind,
                            format!("mapping key of {} kind is not a JSON object key", k.kind()),
                        )
                    })?;
                    out.insert(key.to_string(), v.to_json()?);
                }
                Ok(serde_json::Value::Object(out))
            }
            other => Err(Error::type_mismatch(
                Condition::WrongKind,
                format!("{} does not serialize to JSON", other.kind()),
            )),
        }
    }
}

fn hash_one(value: &Value) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Numeric equality crosses the int/float divide.
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == b.0
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Items(a), Value::Items(b)) => a == b,
            (Value::Item(a), Value::Item(b)) => a == b,
            (Value::Iter(a), Value::Iter(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::None => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            // Integral floats hash like their integer value so that
            // cross-type equality stays consistent with Hash.
            Value::Int(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            Value::Float(f) => {
                // The saturating cast round-trips exactly when some i64
                // compares numerically equal to this float, including at
                // the 2^63 boundary where i64::MAX itself rounds up.
                let trunc = f.0 as i64;
                if f.0.fract() == 0.0 && trunc as f64 == f.0 {
                    state.write_u8(2);
                    trunc.hash(state);
                } else {
                    state.write_u8(3);
                    f.hash(state);
                }
            }
            Value::Str(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            Value::List(v) => {
                state.write_u8(5);
                v.hash(state);
            }
            Value::Tuple(v) => {
                state.write_u8(6);
                v.hash(state);
            }
            // Order-independent accumulation keeps Hash consistent with
            // the order-independent equality of sets and maps.
            Value::Set(s) => {
                state.write_u8(7);
                let mut acc: u64 = 0;
                for v in s {
                    acc = acc.wrapping_add(hash_one(v));
                }
                state.write_u64(acc);
            }
            Value::Map(m) => {
                state.write_u8(8);
                let mut acc: u64 = 0;
                for (k, v) in m {
                    acc = acc.wrapping_add(hash_one(k).wrapping_mul(31).wrapping_add(hash_one(v)));
                }
                state.write_u64(acc);
            }
            Value::Items(v) => {
                state.write_u8(9);
                v.hash(state);
            }
            Value::Item(it) => {
                state.write_u8(10);
                it.hash(state);
            }
            Value::Iter(h) => {
                state.write_u8(11);
                state.write_usize(h.ident());
            }
            Value::Func(f) => {
                state.write_u8(12);
                state.write_usize(f.ident());
            }
        }
    }
}

fn rank(value: &Value) -> u8 {
    match value {
        Value::None => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Str(_) => 3,
        Value::Tuple(_) | Value::Item(_) => 4,
        Value::List(_) => 5,
        Value::Set(_) => 6,
        Value::Map(_) => 7,
        Value::Items(_) => 8,
        Value::Iter(_) => 9,
        Value::Func(_) => 10,
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Crate-wide total order: values compare within their natural class
/// (numbers numerically across int/float, strings lexicographically,
/// sequences elementwise) and across classes by a fixed rank, so `sorted`,
/// `min`, and `max` are total over any mix of elements.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => OrderedFloat(*a as f64).cmp(b),
            (Value::Float(a), Value::Int(b)) => a.cmp(&OrderedFloat(*b as f64)),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a.cmp(b),
            (Value::Item(a), Value::Item(b)) => {
                a.key.cmp(&b.key).then_with(|| a.value.cmp(&b.value))
            }
            (Value::Items(a), Value::Items(b)) => a.cmp(b),
            (Value::Set(a), Value::Set(b)) => {
                let mut xs: Vec<_> = a.iter().collect();
                let mut ys: Vec<_> = b.iter().collect();
                xs.sort();
                ys.sort();
                xs.cmp(&ys)
            }
            (Value::Map(a), Value::Map(b)) => {
                let mut xs: Vec<_> = a.iter().collect();
                let mut ys: Vec<_> = b.iter().collect();
                xs.sort();
                ys.sort();
                xs.cmp(&ys)
            }
            (Value::Iter(a), Value::Iter(b)) => a.ident().cmp(&b.ident()),
            (Value::Func(a), Value::Func(b)) => a.ident().cmp(&b.ident()),
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

// Display mirrors Debug; elements rarely need a prettier rendering than
// the structural one.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<DictItem> for Value {
    fn from(it: DictItem) -> Self {
        Value::Item(Box::new(it))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<Callback> for Value {
    fn from(f: Callback) -> Self {
        Value::Func(f)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

/// Build a [`Value::List`] from element expressions.
#[macro_export]
macro_rules! vlist {
    ($($x:expr),* $(,)?) => {
        $crate::Value::List(vec![$($crate::Value::from($x)),*])
    };
}

/// Build a [`Value::Tuple`] from element expressions.
#[macro_export]
macro_rules! vtuple {
    ($($x:expr),* $(,)?) => {
        $crate::Value::Tuple(vec![$($crate::Value::from($x)),*])
    };
}

/// Build a [`Value::Set`]; insertion order is the listed order.
#[macro_export]
macro_rules! vset {
    ($($x:expr),* $(,)?) => {{
        let mut s = $crate::indexmap::IndexSet::new();
        $(s.insert($crate::Value::from($x));)*
        $crate::Value::Set(s)
    }};
}

/// Build a [`Value::Map`]; insertion order is the listed order, later
/// duplicate keys win.
#[macro_export]
macro_rules! vmap {
    ($($k:expr => $v:expr),* $(,)?) => {{
        let mut m = $crate::indexmap::IndexMap::new();
        $(m.insert($crate::Value::from($k), $crate::Value::from($v));)*
        $crate::Value::Map(m)
    }};
}
