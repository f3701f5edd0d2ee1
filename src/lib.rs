//! # Collectric
//!
//! A **fluent pipeline** over one mutable collection for Rust, modeled on
//! method-chaining collection libraries. Collectric wraps a single *current
//! collection* — a list, tuple, set, mapping, entries view, or single-pass
//! iterator — and threads it through a registry of named operations, so a
//! whole transformation reads as one chain.
//!
//! ## Key Features
//!
//! - **Fluent chaining** - transforms store their result and hand the
//!   pipeline back; terminals return the computed value
//! - **One value model** - [`Value`] is a closed union of the container
//!   kinds plus scalars and callbacks, so heterogeneous data flows through
//!   without generics at the call site
//! - **Kind-aware dispatch** - `concat`, `diff`, `intersect`, and `chunks`
//!   branch on the current kind (mapping beats set beats sequence beats
//!   iterator) and delegate to the specific variant
//! - **Declarative registry** - every operation is a [`Descriptor`]
//!   bundling its algorithm with binding, argument-format, pre-processing,
//!   error-normalization, store, and return policies
//! - **Per-call overrides** - any operation can be forced to keep or store
//!   its result, or to return the raw value, via [`CallOpts`]
//! - **Lazy where it counts** - `iter`, `islice`, `enumerate`, and
//!   iterator concatenation build shared single-pass iterators instead of
//!   materializing
//! - **JSON interop** - build a pipeline from `serde_json::Value` and
//!   serialize the current collection back out
//!
//! ## Quick Start
//!
//! ```
//! use collectric::{collect, vlist, Callback, Value};
//!
//! # fn main() -> Result<(), collectric::Error> {
//! let mut c = collect(vlist![3, 1, 2, 2]);
//!
//! let total = c
//!     .sorted(None)?
//!     .unique()?
//!     .map(Callback::unary(|v| Value::Int(v.as_i64().unwrap_or(0) * 10)))?
//!     .reduce(Callback::binary(|a, b| {
//!         Value::Int(a.as_i64().unwrap_or(0) + b.as_i64().unwrap_or(0))
//!     }), None)?;
//!
//! assert_eq!(total, Value::Int(60));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### The current collection
//!
//! A [`Collection`] owns exactly one [`Value`]. Transforms like
//! [`map`](Collection::map) replace it; terminals like
//! [`reduce`](Collection::reduce) leave it alone and return their result.
//! Conversions come in pairs: `list()` returns a list without touching the
//! pipeline, `list_()` converts the current collection in place.
//!
//! ### The registry
//!
//! Operations are resolved by name through a process-wide immutable
//! [`Registry`]. [`Collection::call`] is the string-keyed entry point the
//! typed methods all funnel into; [`Collection::call_with`] additionally
//! takes [`CallOpts`] to override the store/return defaults for one call.
//!
//! ### Errors
//!
//! Every failure is an [`Error`] with a public [`ErrorKind`] and a fixed
//! message; per-operation normalizers rewrite raw conditions (a missing
//! key, an out-of-range index, an exhausted iterator) into the documented
//! messages. Branch on [`Error::kind`], not on the text.
//!
//! ### Iterator identity
//!
//! An iterator-kind [`Value`] holds a shared handle: cloning the value (or
//! storing it as the current collection) shares one single-pass state, so
//! `next` observes prior partial consumption wherever the handle traveled.
//!
//! ## Module Overview
//!
//! - [`collection`] - the [`Collection`] façade and call engine
//! - [`value`] - the [`Value`] union, [`Callback`], and [`IterHandle`]
//! - [`registry`] - operation descriptors and the default registry
//! - [`strategy`] - binding, formatting, store/return, and normalizer policies
//! - [`error`] - the error taxonomy
//! - [`testing`] - assertion helpers and data builders for tests

pub mod collection;
pub mod error;
pub mod ops;
pub mod registry;
pub mod strategy;
pub mod testing;
pub mod value;

pub use collection::{collect, CallOpts, Collection};
pub use error::{Condition, Error, ErrorKind, Result};
pub use registry::{default_registry, Algo, Bound, Descriptor, Registry};
pub use strategy::{ArgFormat, Binding, ErrorNormalizer, PreOp, ReturnPolicy, StorePolicy};
pub use value::{Callback, DictItem, IterHandle, Kind, Value};

// The vset!/vmap! macros expand to indexmap constructors.
pub use indexmap;
