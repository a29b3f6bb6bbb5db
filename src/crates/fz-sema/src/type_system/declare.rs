// type_system/declare.rs
//
// Declaration shortcuts for a TypeSystem backed by a FeatureRegistry. They
// keep the registry and the arena in step so callers never juggle both.

use fz_identity::{FeatureId, Span};

use super::TypeSystem;
use crate::feature_model::{FeatureModel, FeatureRegistry};
use crate::type_arena::{TypeId, TypeIdVec};

impl TypeSystem<FeatureRegistry> {
    /// A type system over an empty registry (just the universe)
    pub fn with_registry() -> Self {
        Self::new(FeatureRegistry::new())
    }

    pub fn universe(&self) -> FeatureId {
        self.features.universe()
    }

    /// Declare a value feature; `outer == None` declares it in the universe
    pub fn declare_feature(&mut self, name: &str, outer: Option<FeatureId>) -> FeatureId {
        self.features.declare(name, outer)
    }

    pub fn declare_ref_feature(&mut self, name: &str, outer: Option<FeatureId>) -> FeatureId {
        self.features.declare_ref(name, outer)
    }

    /// Add a formal generic to `f` and return the type referring to it
    pub fn declare_generic(&mut self, f: FeatureId, name: &str, constraint: TypeId) -> TypeId {
        self.declare_generic_at(f, name, constraint, false, Span::default())
    }

    /// Add an open (variadic) formal generic; must be the last one
    pub fn declare_open_generic(&mut self, f: FeatureId, name: &str, constraint: TypeId) -> TypeId {
        self.declare_generic_at(f, name, constraint, true, Span::default())
    }

    pub fn declare_generic_at(
        &mut self,
        f: FeatureId,
        name: &str,
        constraint: TypeId,
        is_open: bool,
        span: Span,
    ) -> TypeId {
        let id = self.features.add_generic(f, name, constraint, is_open, span);
        self.arena.generic(id)
    }

    /// Record `f : ancestor[actuals]`
    pub fn declare_inherits(
        &mut self,
        f: FeatureId,
        ancestor: FeatureId,
        actuals: TypeIdVec,
    ) {
        self.features
            .add_inherits(f, ancestor, actuals, &mut self.arena);
    }

    /// Make `f` a choice of `summands`, given in terms of `f`'s formals
    pub fn declare_choice(&mut self, f: FeatureId, summands: TypeIdVec) {
        self.features.set_choice(f, summands);
    }

    pub fn declare_type_root(&mut self, f: FeatureId) {
        self.features.set_type_root(f);
    }

    /// Type of a feature without generics
    pub fn simple_type(&mut self, f: FeatureId) -> TypeId {
        debug_assert!(self.features.formal_generics(f).is_empty());
        self.instantiate(f, TypeIdVec::new())
    }
}
