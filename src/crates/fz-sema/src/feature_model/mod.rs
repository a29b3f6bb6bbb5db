// feature_model/mod.rs
//
// The view of feature declarations the type engine depends on.
//
// Types only store FeatureIds. Everything the engine needs to know about a
// feature (its formal generics, what it inherits, whether it is a choice or a
// type feature) is read through FeatureModel, so the engine can run against
// the resolver's feature tables or against the standalone FeatureRegistry.

mod registry;

use fz_identity::{FeatureId, Span};
use rustc_hash::FxHashSet;

use crate::type_arena::{GenericId, TypeArena, TypeId, TypeIdVec};

pub use registry::FeatureRegistry;

/// A formal generic parameter of a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericParam {
    pub id: GenericId,
    /// Open parameters absorb all remaining actual generics. Only the last
    /// formal of a feature may be open.
    pub is_open: bool,
    /// Upper bound for actual generics, `any` when unconstrained
    pub constraint: TypeId,
    pub span: Span,
}

/// One inheritance edge `f : ancestor[actual_generics]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inherit {
    pub ancestor: FeatureId,
    /// Actual generics passed to the ancestor, in terms of the heir's formals
    pub actual_generics: TypeIdVec,
    /// The ancestor as a type, as seen from the heir
    pub ty: TypeId,
}

/// Sort key giving a stable total order over features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderKey<'a> {
    pub qualified_name: &'a str,
    pub id: FeatureId,
}

pub trait FeatureModel {
    fn name(&self, f: FeatureId) -> &str;

    fn qualified_name(&self, f: FeatureId) -> &str;

    /// Enclosing feature, `None` only for the universe
    fn outer(&self, f: FeatureId) -> Option<FeatureId>;

    fn is_universe(&self, f: FeatureId) -> bool {
        self.outer(f).is_none()
    }

    /// Whether instances of `f` have reference semantics
    fn is_this_ref(&self, f: FeatureId) -> bool;

    fn formal_generics(&self, f: FeatureId) -> &[GenericParam];

    fn generic_name(&self, g: GenericId) -> &str;

    fn inherits(&self, f: FeatureId) -> &[Inherit];

    /// Summand types of a choice feature in terms of its own formals
    fn declared_summands(&self, f: FeatureId) -> Option<&[TypeId]>;

    fn is_choice(&self, f: FeatureId) -> bool {
        self.declared_summands(f).is_some()
    }

    fn canonical_order_key(&self, f: FeatureId) -> OrderKey<'_>;

    fn is_type_feature(&self, f: FeatureId) -> bool;

    /// The type feature of `f` if it has been created
    fn type_feature(&self, f: FeatureId) -> Option<FeatureId>;

    fn has_type_feature(&self, f: FeatureId) -> bool {
        self.type_feature(f).is_some()
    }

    /// The type feature of `f`, creating it on first request. Returns `None`
    /// for the universe and for features that are type features themselves.
    fn type_feature_or_create(&mut self, f: FeatureId, types: &mut TypeArena) -> Option<FeatureId>;

    /// The feature a type feature was created for
    fn type_feature_origin(&self, tf: FeatureId) -> Option<FeatureId>;

    /// Root of all type features (`Type` in the base library)
    fn type_root(&self) -> Option<FeatureId>;

    fn generic_param(&self, g: GenericId) -> Option<&GenericParam> {
        self.formal_generics(g.feature).get(g.index as usize)
    }

    /// Check whether `f` equals `ancestor` or inherits from it, directly or
    /// through a chain of inheritance edges.
    fn inherits_from(&self, f: FeatureId, ancestor: FeatureId) -> bool {
        if f == ancestor {
            return true;
        }
        let mut stack = vec![f];
        let mut seen = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            for inherit in self.inherits(current) {
                if inherit.ancestor == ancestor {
                    return true;
                }
                stack.push(inherit.ancestor);
            }
        }
        false
    }

    /// The type of `f` as seen from inside `f`: its own formals as actual
    /// generics and the self type of its outer feature.
    fn self_type(&self, f: FeatureId, types: &mut TypeArena) -> TypeId {
        let generics: TypeIdVec = self
            .formal_generics(f)
            .iter()
            .map(|p| types.generic(p.id))
            .collect();
        let outer = match self.outer(f) {
            Some(o) if !self.is_universe(o) => Some(self.self_type(o, types)),
            _ => None,
        };
        types.constructed(f, generics, outer, self.is_this_ref(f))
    }
}
