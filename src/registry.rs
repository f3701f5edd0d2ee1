//! The immutable operation registry.
//!
//! Every operation the pipeline can dispatch is described once, up front,
//! by a [`Descriptor`]: the algorithm function plus the policy choices
//! (binding, argument format, pre-processing, error normalization, store
//! and return defaults). The registry is built a single time and shared
//! process-wide; pipelines hold a `&'static` reference to it.
//!
//! Descriptors come in two flavors. A *transform* stores its result as the
//! new current collection and returns the pipeline for chaining. A
//! *terminal* leaves the current collection alone and returns the raw
//! result. Both defaults are overridable per call.

use crate::collection::Collection;
use crate::error::Result;
use crate::ops;
use crate::strategy::{ArgFormat, Binding, ErrorNormalizer, PreOp, ReturnPolicy, StorePolicy};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// What an algorithm receives as its dispatch target.
pub enum Bound<'a> {
    /// Value-bound: the current collection was spliced into the argument
    /// vector and the algorithm never sees the pipeline.
    Detached,
    /// Pipeline-bound: the algorithm branches on the current kind and
    /// delegates to other registered operations.
    Collection(&'a mut Collection),
}

/// The uniform algorithm signature all registered operations share.
pub type Algo = fn(Bound<'_>, Vec<Value>) -> Result<Value>;

/// One registered operation.
pub struct Descriptor {
    pub name: &'static str,
    pub algo: Algo,
    pub binding: Binding,
    pub format: ArgFormat,
    pub pre: &'static [PreOp],
    pub errors: ErrorNormalizer,
    pub store: StorePolicy,
    pub ret: ReturnPolicy,
}

impl Descriptor {
    /// A chaining operation: result becomes the new current collection.
    fn transform(name: &'static str, algo: Algo) -> Self {
        Self {
            name,
            algo,
            binding: Binding::Current,
            format: ArgFormat::Identity,
            pre: &[],
            errors: ErrorNormalizer::PassThrough,
            store: StorePolicy::Store,
            ret: ReturnPolicy::Pipeline,
        }
    }

    /// A query operation: current collection untouched, raw result returned.
    fn terminal(name: &'static str, algo: Algo) -> Self {
        Self {
            store: StorePolicy::Keep,
            ret: ReturnPolicy::Result,
            ..Self::transform(name, algo)
        }
    }

    fn bind(mut self, binding: Binding) -> Self {
        self.binding = binding;
        self
    }

    fn format(mut self, format: ArgFormat) -> Self {
        self.format = format;
        self
    }

    fn pre(mut self, pre: &'static [PreOp]) -> Self {
        self.pre = pre;
        self
    }

    fn errors(mut self, errors: ErrorNormalizer) -> Self {
        self.errors = errors;
        self
    }

    fn returns(mut self, ret: ReturnPolicy) -> Self {
        self.ret = ret;
        self
    }
}

/// Name-indexed descriptor table. Immutable once built.
pub struct Registry {
    ops: HashMap<&'static str, Descriptor>,
}

impl Registry {
    fn add(&mut self, desc: Descriptor) {
        self.ops.insert(desc.name, desc);
    }

    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.ops.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ops.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

const SORT_FIRST: &[PreOp] = &[PreOp::forwarding("sorted")];
const LIST_IN_PLACE: &[PreOp] = &[PreOp::run("list_")];
const ITER_IN_PLACE: &[PreOp] = &[PreOp::run("iter_")];

pub fn default_registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(build)
}

fn build() -> Registry {
    let mut r = Registry { ops: HashMap::new() };

    // element-wise transforms; callbacks lead, so the current collection
    // is appended last (or spliced at 1 for the reduce family)
    r.add(Descriptor::transform("map", ops::map).bind(Binding::CurrentLast));
    r.add(
        Descriptor::transform("emap", ops::emap)
            .bind(Binding::CurrentLast)
            .format(ArgFormat::SpreadPair { func: 0, at: 0 }),
    );
    r.add(Descriptor::transform("filter", ops::filter).bind(Binding::CurrentLast));
    r.add(Descriptor::terminal("reduce", ops::reduce).bind(Binding::CurrentAt(1)));

    // ordering and grouping
    r.add(Descriptor::transform("sorted", ops::sorted));
    r.add(Descriptor::transform("groupby", ops::groupby));
    r.add(Descriptor::transform("group_sort", ops::groupby).pre(SORT_FIRST));
    r.add(Descriptor::transform("unique", ops::unique));
    r.add(Descriptor::transform("zip", ops::zip).format(ArgFormat::ToList(0)));
    r.add(Descriptor::transform("enumerate", ops::enumerate));

    // concatenation: the public entry point dispatches per target kind
    r.add(Descriptor::transform("concat", ops::concat).bind(Binding::Pipeline));
    r.add(Descriptor::transform("concat_seq", ops::concat_seq));
    r.add(
        Descriptor::transform("concat_dict", ops::concat_dict)
            .format(ArgFormat::ToMap(0))
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(Descriptor::transform("concat_iter", ops::concat_iter).format(ArgFormat::ToIter(0)));

    // set algebra; mapping currents operate over entry pairs
    r.add(Descriptor::transform("diff", ops::diff).bind(Binding::Pipeline));
    r.add(Descriptor::transform("diff_seq", ops::diff_seq).format(ArgFormat::ToSet(0)));
    r.add(
        Descriptor::transform("diff_dict", ops::diff_dict)
            .format(ArgFormat::PairsToSet(0))
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(Descriptor::transform("intersect", ops::intersect).bind(Binding::Pipeline));
    r.add(Descriptor::transform("intersect_seq", ops::intersect_seq).format(ArgFormat::ToSet(0)));
    r.add(
        Descriptor::transform("intersect_dict", ops::intersect_dict)
            .format(ArgFormat::PairsToSet(0))
            .errors(ErrorNormalizer::MapConversion),
    );

    // shape changes
    r.add(Descriptor::transform("flatten", ops::flatten));
    r.add(Descriptor::transform("chunks", ops::chunks).bind(Binding::Pipeline));
    r.add(Descriptor::transform("chunks_seq", ops::chunks_seq));
    r.add(Descriptor::transform("chunks_dict", ops::chunks_dict));
    r.add(Descriptor::transform("slice", ops::slice));
    r.add(Descriptor::transform("islice", ops::islice));

    // queries
    r.add(Descriptor::terminal("contains", ops::contains));
    r.add(Descriptor::terminal("empty", ops::empty).bind(Binding::Pipeline));
    r.add(Descriptor::terminal("all", ops::all));
    r.add(Descriptor::terminal("any", ops::any));
    r.add(Descriptor::terminal("min", ops::min));
    r.add(Descriptor::terminal("max", ops::max));
    r.add(Descriptor::terminal("len", ops::len));

    // subscript access
    r.add(Descriptor::terminal("first", ops::first).errors(ErrorNormalizer::Subscript));
    r.add(Descriptor::terminal("last", ops::last).errors(ErrorNormalizer::Subscript));
    r.add(Descriptor::terminal("getitem", ops::getitem).errors(ErrorNormalizer::Subscript));
    r.add(Descriptor::terminal("first_item", ops::first_item).errors(ErrorNormalizer::ItemAccess));
    r.add(Descriptor::terminal("last_item", ops::last_item).errors(ErrorNormalizer::ItemAccess));
    r.add(
        Descriptor::terminal("first_nt_item", ops::first_nt_item)
            .errors(ErrorNormalizer::ItemAccess),
    );
    r.add(
        Descriptor::terminal("last_nt_item", ops::last_nt_item)
            .errors(ErrorNormalizer::ItemAccess),
    );
    r.add(
        Descriptor::terminal("setitem", ops::setitem)
            .bind(Binding::Pipeline)
            .returns(ReturnPolicy::Pipeline)
            .errors(ErrorNormalizer::SubscriptAssign),
    );
    r.add(
        Descriptor::terminal("pop", ops::pop)
            .bind(Binding::Pipeline)
            .pre(LIST_IN_PLACE)
            .errors(ErrorNormalizer::Subscript),
    );
    r.add(
        Descriptor::terminal("next", ops::next)
            .bind(Binding::Pipeline)
            .pre(ITER_IN_PLACE)
            .errors(ErrorNormalizer::Subscript),
    );
    r.add(Descriptor::terminal("join", ops::join));

    // entry views and the items family
    r.add(Descriptor::transform("items", ops::items).errors(ErrorNormalizer::MapConversion));
    r.add(Descriptor::transform("nt_items", ops::nt_items).errors(ErrorNormalizer::MapConversion));
    r.add(
        Descriptor::transform("map_items", ops::map_items)
            .bind(Binding::CurrentLast)
            .format(ArgFormat::SpreadPair { func: 0, at: 0 })
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(
        Descriptor::transform("filter_items", ops::filter_items)
            .bind(Binding::CurrentLast)
            .format(ArgFormat::SpreadPair { func: 0, at: 0 })
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(
        Descriptor::terminal("reduce_items", ops::reduce_items)
            .bind(Binding::CurrentAt(1))
            .format(ArgFormat::SpreadPair { func: 0, at: 1 })
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(
        Descriptor::transform("map_nt_items", ops::map_nt_items)
            .bind(Binding::CurrentLast)
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(
        Descriptor::transform("filter_nt_items", ops::filter_nt_items)
            .bind(Binding::CurrentLast)
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(
        Descriptor::terminal("reduce_nt_items", ops::reduce_nt_items)
            .bind(Binding::CurrentAt(1))
            .errors(ErrorNormalizer::MapConversion),
    );

    // conversions, each in a returning and an in-place variant
    r.add(Descriptor::terminal("list", ops::to_list));
    r.add(Descriptor::transform("list_", ops::to_list));
    r.add(Descriptor::terminal("set", ops::to_set));
    r.add(Descriptor::transform("set_", ops::to_set));
    r.add(Descriptor::terminal("tuple", ops::to_tuple));
    r.add(Descriptor::transform("tuple_", ops::to_tuple));
    r.add(Descriptor::terminal("dict", ops::to_dict).errors(ErrorNormalizer::MapConversion));
    r.add(Descriptor::transform("dict_", ops::to_dict).errors(ErrorNormalizer::MapConversion));
    r.add(
        Descriptor::terminal("ordered_dict", ops::to_dict).errors(ErrorNormalizer::MapConversion),
    );
    r.add(
        Descriptor::transform("ordered_dict_", ops::to_dict)
            .errors(ErrorNormalizer::MapConversion),
    );
    r.add(Descriptor::terminal("iter", ops::to_iter));
    r.add(Descriptor::transform("iter_", ops::to_iter));

    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_every_catalog_name() {
        let r = default_registry();
        for name in [
            "map", "emap", "filter", "reduce", "sorted", "groupby", "group_sort", "unique",
            "zip", "enumerate", "concat", "concat_seq", "concat_dict", "concat_iter", "diff",
            "diff_seq", "diff_dict", "intersect", "intersect_seq", "intersect_dict", "flatten",
            "chunks", "chunks_seq", "chunks_dict", "slice", "islice", "contains", "empty",
            "all", "any", "min", "max", "len", "first", "last", "getitem", "first_item",
            "last_item", "first_nt_item", "last_nt_item", "setitem", "pop", "next", "join",
            "items", "nt_items", "map_items", "filter_items", "reduce_items", "map_nt_items",
            "filter_nt_items", "reduce_nt_items", "list", "list_", "set", "set_", "tuple",
            "tuple_", "dict", "dict_", "ordered_dict", "ordered_dict_", "iter", "iter_",
        ] {
            assert!(r.contains(name), "missing descriptor for {name}");
        }
    }

    #[test]
    fn transforms_and_terminals_carry_their_defaults() {
        let r = default_registry();
        let map = r.get("map").unwrap();
        assert_eq!(map.store, StorePolicy::Store);
        assert_eq!(map.ret, ReturnPolicy::Pipeline);
        let reduce = r.get("reduce").unwrap();
        assert_eq!(reduce.store, StorePolicy::Keep);
        assert_eq!(reduce.ret, ReturnPolicy::Result);
    }

    #[test]
    fn conversion_pairs_share_algorithms_but_not_policies() {
        let r = default_registry();
        let plain = r.get("list").unwrap();
        let in_place = r.get("list_").unwrap();
        assert_eq!(plain.algo as usize, in_place.algo as usize);
        assert_eq!(plain.store, StorePolicy::Keep);
        assert_eq!(in_place.store, StorePolicy::Store);
    }

    #[test]
    fn group_sort_pre_processes_with_forwarded_arguments() {
        let desc = default_registry().get("group_sort").unwrap();
        assert_eq!(desc.pre.len(), 1);
        assert_eq!(desc.pre[0].name, "sorted");
        assert!(desc.pre[0].forward);
    }
}
