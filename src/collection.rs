//! The fluent pipeline façade over a single current collection.
//!
//! A [`Collection`] owns one [`Value`] (the *current collection*) and a
//! reference to the shared operation registry. Every operation runs
//! through the same engine: look the name up, run pre-processing, format
//! the arguments, splice the current collection in per the descriptor's
//! binding, invoke the algorithm, then apply the store and return
//! policies. Transforms hand `&mut Self` back for chaining; terminals
//! hand back the computed value.
//!
//! ```
//! use collectric::{collect, vlist, Callback, Value};
//!
//! let mut c = collect(vlist![3, 1, 2]);
//! c.sorted(None)?.map(Callback::unary(|v| {
//!     Value::Int(v.as_i64().unwrap_or(0) * 10)
//! }))?;
//! assert_eq!(c.list()?, vlist![10, 20, 30]);
//! # Ok::<(), collectric::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::registry::{default_registry, Bound, Descriptor, Registry};
use crate::strategy::{Binding, ReturnPolicy, StorePolicy};
use crate::value::{Callback, IterHandle, Value};
use std::fmt;

/// Per-call overrides for the descriptor's store and return defaults.
/// `None` means "use the default".
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOpts {
    pub store: Option<bool>,
    pub ret: Option<bool>,
}

impl CallOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override whether the result replaces the current collection.
    pub fn store(mut self, on: bool) -> Self {
        self.store = Some(on);
        self
    }

    /// Override whether the raw result is returned instead of the
    /// (chaining) current collection.
    pub fn ret(mut self, on: bool) -> Self {
        self.ret = Some(on);
        self
    }
}

/// Start a pipeline over `initial`.
pub fn collect(initial: impl Into<Value>) -> Collection {
    Collection::new(initial)
}

/// A mutable pipeline wrapper around one current collection.
pub struct Collection {
    current: Value,
    registry: &'static Registry,
}

impl Collection {
    pub fn new(initial: impl Into<Value>) -> Self {
        Self { current: initial.into(), registry: default_registry() }
    }

    /// Build a pipeline from a JSON document.
    pub fn from_json(json: serde_json::Value) -> Self {
        Self::new(Value::from_json(json))
    }

    /// The current collection.
    pub fn current(&self) -> &Value {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut Value {
        &mut self.current
    }

    pub(crate) fn set_current(&mut self, value: Value) {
        self.current = value;
    }

    /// Consume the pipeline, yielding the current collection.
    pub fn into_value(self) -> Value {
        self.current
    }

    /// Serialize the current collection as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.current.to_json()
    }

    /// Iterate the current collection's elements without consuming the
    /// pipeline. Over an iterator current this shares its single pass.
    pub fn iter_values(&self) -> Result<IterHandle> {
        self.current.to_iter_handle()
    }

    /// Invoke a registered operation by name with default policies.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> Result<Value> {
        self.call_with(name, args, CallOpts::default())
    }

    /// Invoke a registered operation by name, optionally overriding the
    /// descriptor's store and return policies for this call only.
    pub fn call_with(&mut self, name: &str, args: Vec<Value>, opts: CallOpts) -> Result<Value> {
        let registry = self.registry;
        let desc = registry
            .get(name)
            .ok_or_else(|| Error::unknown_operation(name))?;
        for pre in desc.pre {
            let pre_args = if pre.forward { args.clone() } else { Vec::new() };
            self.call(pre.name, pre_args)?;
        }
        let formatted = desc
            .format
            .format(args)
            .map_err(|e| desc.errors.normalize(e))?;
        let result = self
            .dispatch(desc, formatted)
            .map_err(|e| desc.errors.normalize(e))?;
        if opts.store.unwrap_or(desc.store == StorePolicy::Store) {
            self.current = result.clone();
        }
        Ok(if opts.ret.unwrap_or(desc.ret == ReturnPolicy::Result) {
            result
        } else {
            self.current.clone()
        })
    }

    fn dispatch(&mut self, desc: &Descriptor, mut args: Vec<Value>) -> Result<Value> {
        match desc.binding {
            Binding::Current => {
                args.insert(0, self.current.clone());
                (desc.algo)(Bound::Detached, args)
            }
            Binding::CurrentLast => {
                args.push(self.current.clone());
                (desc.algo)(Bound::Detached, args)
            }
            Binding::CurrentAt(p) => {
                let at = p.min(args.len());
                args.insert(at, self.current.clone());
                (desc.algo)(Bound::Detached, args)
            }
            Binding::Pipeline => (desc.algo)(Bound::Collection(self), args),
        }
    }

    fn chain(&mut self, name: &str, args: Vec<Value>) -> Result<&mut Self> {
        self.call(name, args)?;
        Ok(self)
    }

    fn keyed_args(key: Option<Callback>) -> Vec<Value> {
        match key {
            Some(f) => vec![f.into()],
            None => Vec::new(),
        }
    }

    fn fold_args(f: Callback, init: Option<Value>) -> Vec<Value> {
        let mut args = vec![f.into()];
        if let Some(v) = init {
            args.push(v);
        }
        args
    }

    // ---- element-wise transforms ----

    pub fn map(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("map", vec![f.into()])
    }

    /// Map with enumeration: `f` receives `(index, element)`.
    pub fn emap(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("emap", vec![f.into()])
    }

    pub fn filter(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("filter", vec![f.into()])
    }

    pub fn reduce(&mut self, f: Callback, init: Option<Value>) -> Result<Value> {
        self.call("reduce", Self::fold_args(f, init))
    }

    // ---- ordering and grouping ----

    pub fn sorted(&mut self, key: Option<Callback>) -> Result<&mut Self> {
        self.chain("sorted", Self::keyed_args(key))
    }

    /// Group consecutive runs of equal keys, itertools-style.
    pub fn groupby(&mut self, key: Option<Callback>) -> Result<&mut Self> {
        self.chain("groupby", Self::keyed_args(key))
    }

    /// Sort by `key`, then group — a global grouping in two steps.
    pub fn group_sort(&mut self, key: Option<Callback>) -> Result<&mut Self> {
        self.chain("group_sort", Self::keyed_args(key))
    }

    pub fn unique(&mut self) -> Result<&mut Self> {
        self.chain("unique", Vec::new())
    }

    pub fn zip(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("zip", vec![other.into()])
    }

    pub fn enumerate(&mut self) -> Result<&mut Self> {
        self.chain("enumerate", Vec::new())
    }

    // ---- concatenation and set algebra ----

    /// Concatenate any number of iterable targets onto the current
    /// collection, dispatching per target kind.
    pub fn concat<I>(&mut self, targets: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.chain("concat", targets.into_iter().map(Into::into).collect())
    }

    pub fn concat_seq(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("concat_seq", vec![other.into()])
    }

    pub fn concat_dict(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("concat_dict", vec![other.into()])
    }

    pub fn concat_iter(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("concat_iter", vec![other.into()])
    }

    pub fn diff(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("diff", vec![other.into()])
    }

    pub fn diff_seq(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("diff_seq", vec![other.into()])
    }

    pub fn diff_dict(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("diff_dict", vec![other.into()])
    }

    pub fn intersect(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("intersect", vec![other.into()])
    }

    pub fn intersect_seq(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("intersect_seq", vec![other.into()])
    }

    pub fn intersect_dict(&mut self, other: impl Into<Value>) -> Result<&mut Self> {
        self.chain("intersect_dict", vec![other.into()])
    }

    // ---- shape changes ----

    pub fn flatten(&mut self) -> Result<&mut Self> {
        self.chain("flatten", Vec::new())
    }

    pub fn chunks(&mut self, len: usize) -> Result<&mut Self> {
        self.chain("chunks", vec![Value::from(len)])
    }

    pub fn slice(&mut self, start: i64, end: Option<i64>) -> Result<&mut Self> {
        let mut args = vec![Value::Int(start)];
        if let Some(e) = end {
            args.push(Value::Int(e));
        }
        self.chain("slice", args)
    }

    /// Lazy slice; a `None` stop runs to exhaustion.
    pub fn islice(&mut self, start: usize, stop: Option<usize>) -> Result<&mut Self> {
        let stop = stop.map(Value::from).unwrap_or(Value::None);
        self.chain("islice", vec![Value::from(start), stop])
    }

    // ---- queries ----

    pub fn contains(&mut self, needle: impl Into<Value>) -> Result<bool> {
        Ok(self.call("contains", vec![needle.into()])? == Value::Bool(true))
    }

    pub fn empty(&mut self) -> Result<bool> {
        Ok(self.call("empty", Vec::new())? == Value::Bool(true))
    }

    pub fn all(&mut self, pred: Option<Callback>) -> Result<bool> {
        Ok(self.call("all", Self::keyed_args(pred))? == Value::Bool(true))
    }

    pub fn any(&mut self, pred: Option<Callback>) -> Result<bool> {
        Ok(self.call("any", Self::keyed_args(pred))? == Value::Bool(true))
    }

    pub fn min(&mut self) -> Result<Value> {
        self.call("min", Vec::new())
    }

    pub fn max(&mut self) -> Result<Value> {
        self.call("max", Vec::new())
    }

    pub fn len(&mut self) -> Result<usize> {
        Ok(self.call("len", Vec::new())?.as_i64().unwrap_or(0) as usize)
    }

    // ---- subscript access ----

    pub fn first(&mut self) -> Result<Value> {
        self.call("first", Vec::new())
    }

    pub fn last(&mut self) -> Result<Value> {
        self.call("last", Vec::new())
    }

    pub fn first_item(&mut self) -> Result<Value> {
        self.call("first_item", Vec::new())
    }

    pub fn last_item(&mut self) -> Result<Value> {
        self.call("last_item", Vec::new())
    }

    pub fn first_nt_item(&mut self) -> Result<Value> {
        self.call("first_nt_item", Vec::new())
    }

    pub fn last_nt_item(&mut self) -> Result<Value> {
        self.call("last_nt_item", Vec::new())
    }

    pub fn getitem(&mut self, key: impl Into<Value>) -> Result<Value> {
        self.call("getitem", vec![key.into()])
    }

    pub fn setitem(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Result<&mut Self> {
        self.chain("setitem", vec![key.into(), value.into()])
    }

    /// Remove and return the last element, materializing the current
    /// collection as a list first.
    pub fn pop(&mut self) -> Result<Value> {
        self.call("pop", Vec::new())
    }

    /// Advance the current collection as an iterator, converting it in
    /// place first.
    pub fn next(&mut self) -> Result<Value> {
        self.call("next", Vec::new())
    }

    pub fn join(&mut self, sep: &str) -> Result<String> {
        let joined = self.call("join", vec![Value::from(sep)])?;
        Ok(joined.as_str().unwrap_or_default().to_string())
    }

    // ---- entry views and the items family ----

    pub fn items(&mut self) -> Result<&mut Self> {
        self.chain("items", Vec::new())
    }

    pub fn nt_items(&mut self) -> Result<&mut Self> {
        self.chain("nt_items", Vec::new())
    }

    /// Map over entries; `f` receives `(key, value)` spread apart.
    pub fn map_items(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("map_items", vec![f.into()])
    }

    pub fn filter_items(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("filter_items", vec![f.into()])
    }

    pub fn reduce_items(&mut self, f: Callback, init: Option<Value>) -> Result<Value> {
        self.call("reduce_items", Self::fold_args(f, init))
    }

    /// Map over entries as named items; `f` receives one item value.
    pub fn map_nt_items(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("map_nt_items", vec![f.into()])
    }

    pub fn filter_nt_items(&mut self, f: Callback) -> Result<&mut Self> {
        self.chain("filter_nt_items", vec![f.into()])
    }

    pub fn reduce_nt_items(&mut self, f: Callback, init: Option<Value>) -> Result<Value> {
        self.call("reduce_nt_items", Self::fold_args(f, init))
    }
}

// Conversions come in pairs: `list()` returns the converted value and
// leaves the current collection alone; `list_()` converts in place and
// chains.
macro_rules! conversions {
    ($($name:ident => $doc:literal),* $(,)?) => {
        impl Collection {
            paste::paste! {
                $(
                    #[doc = concat!("Return the current collection as ", $doc, ".")]
                    pub fn $name(&mut self) -> Result<Value> {
                        self.call(stringify!($name), Vec::new())
                    }

                    #[doc = concat!("Convert the current collection to ", $doc, " in place.")]
                    pub fn [<$name _>](&mut self) -> Result<&mut Self> {
                        self.chain(concat!(stringify!($name), "_"), Vec::new())
                    }
                )*
            }
        }
    };
}

conversions! {
    list => "a list",
    set => "a set",
    tuple => "a tuple",
    dict => "a mapping",
    ordered_dict => "an insertion-ordered mapping",
    iter => "a single-pass iterator",
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection({:?})", self.current)
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}
