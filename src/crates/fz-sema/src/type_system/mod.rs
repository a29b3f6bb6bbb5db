// type_system/mod.rs
//
// TypeSystem: canonical types plus the operations defined on them.
//
// The engine is split by concern:
// - compare.rs: total order over canonical types
// - substitution.rs: actual generics through inheritance chains
// - assignability.rs: assignment compatibility, constraints and union
// - this_type.rs: this-type and type-feature rewriting
// - choice.rs: choice summands and disjointness checks
// - constraints.rs: open generics and constraint checks on actual generics
// - display.rs: human readable rendering

mod assignability;
mod cache;
mod choice;
mod compare;
mod constraints;
mod declare;
mod display;
mod substitution;
mod this_type;

#[cfg(test)]
mod tests_assignability;
#[cfg(test)]
mod tests_this_type;

use fz_identity::{FeatureId, Span};

use crate::diagnostics::Diagnostics;
use crate::errors::SemanticError;
use crate::feature_model::{FeatureModel, FeatureRegistry, GenericParam};
use crate::options::{TypeSystemBuilder, TypeSystemOptions};
use crate::type_arena::{FzType, GenericId, TypeArena, TypeId, TypeIdVec};

pub use cache::{CacheStats, SubstitutionCache};
pub use display::display_type_id;
use cache::SubstitutionCaches;

/// Owns the type arena, the feature model and the memoization caches.
///
/// Fields are disjoint so that a feature model can create type features
/// while the arena is borrowed mutably.
pub struct TypeSystem<F: FeatureModel = FeatureRegistry> {
    arena: TypeArena,
    features: F,
    caches: SubstitutionCaches,
    diagnostics: Diagnostics,
    options: TypeSystemOptions,
}

impl<F: FeatureModel> TypeSystem<F> {
    pub fn new(features: F) -> Self {
        TypeSystemBuilder::new(features).build()
    }

    pub fn builder(features: F) -> TypeSystemBuilder<F> {
        TypeSystemBuilder::new(features)
    }

    pub(crate) fn from_parts(
        features: F,
        arena: TypeArena,
        diagnostics: Diagnostics,
        options: TypeSystemOptions,
    ) -> Self {
        Self {
            arena,
            features,
            caches: SubstitutionCaches::default(),
            diagnostics,
            options,
        }
    }

    /// Hand the arena and diagnostics on to the next phase
    pub fn into_parts(self) -> (TypeArena, F, Diagnostics) {
        (self.arena, self.features, self.diagnostics)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    pub fn features(&self) -> &F {
        &self.features
    }

    /// Mutable access to the feature model. Declaring new inheritance edges
    /// after substitutions ran requires `reset_caches`.
    pub fn features_mut(&mut self) -> &mut F {
        &mut self.features
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    pub fn options(&self) -> &TypeSystemOptions {
        &self.options
    }

    pub fn get(&self, ty: TypeId) -> &FzType {
        self.arena.get(ty)
    }

    /// Canonicalize a type
    pub fn intern(&mut self, ty: FzType) -> TypeId {
        self.arena.intern(ty)
    }

    /// Drop all memoized substitution results
    pub fn reset_caches(&mut self) {
        tracing::debug!(
            by_owner = self.caches.by_owner.len(),
            via_type = self.caches.via_type.len(),
            "resetting substitution caches"
        );
        self.caches.by_owner.clear();
        self.caches.via_type.clear();
    }

    /// Hit and miss counts of the `(owner, actuals)` and `(source, target)`
    /// caches
    pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
        (self.caches.by_owner.stats(), self.caches.via_type.stats())
    }

    // ========================================================================
    // Errors and invariants
    // ========================================================================

    pub(crate) fn report(&mut self, error: SemanticError, span: Span) {
        self.diagnostics.report(error, span);
    }

    /// Check an internal invariant. A violation is tolerated once an error
    /// has been reported since it is likely fallout of that error.
    #[track_caller]
    pub(crate) fn invariant(&self, condition: bool, what: &str) -> bool {
        if condition {
            return true;
        }
        if self.diagnostics.has_errors() {
            tracing::warn!(
                what,
                errors = self.diagnostics.error_count(),
                "invariant waived after earlier errors"
            );
        } else if self.options.strict_invariants {
            panic!(
                "INTERNAL ERROR: {}\nLocation: {}",
                what,
                std::panic::Location::caller()
            );
        } else {
            tracing::error!(what, "invariant violated");
        }
        false
    }

    #[track_caller]
    pub(crate) fn not_yet_implemented(&self, what: &str) -> ! {
        panic!(
            "not yet implemented: {}\nLocation: {}",
            what,
            std::panic::Location::caller()
        );
    }

    // ========================================================================
    // Simple queries and builders
    // ========================================================================

    pub fn is_generic(&self, ty: TypeId) -> bool {
        self.arena.is_generic(ty)
    }

    pub fn is_ref(&self, ty: TypeId) -> bool {
        self.arena.is_ref(ty)
    }

    pub fn is_this_type(&self, ty: TypeId) -> bool {
        self.arena.is_this_type(ty)
    }

    pub fn depends_on_generics(&self, ty: TypeId) -> bool {
        self.arena.depends_on_generics(ty)
    }

    pub fn contains_this_type(&self, ty: TypeId) -> bool {
        self.arena.contains_this_type(ty)
    }

    pub fn contains_error(&self, ty: TypeId) -> bool {
        self.arena.contains_error(ty)
    }

    pub fn contains_undefined(&self, ty: TypeId, except_first: bool) -> bool {
        self.arena.contains_undefined(ty, except_first)
    }

    /// Constructor feature of a constructed type
    pub fn feature_of(&self, ty: TypeId) -> Option<FeatureId> {
        self.arena.feature_of(ty)
    }

    pub fn is_choice(&self, ty: TypeId) -> bool {
        self.arena
            .feature_of(ty)
            .is_some_and(|f| self.features.is_choice(f))
    }

    /// Check whether `ty` is the type of a type feature, i.e. a metatype
    pub fn is_type_type(&self, ty: TypeId) -> bool {
        self.arena
            .feature_of(ty)
            .is_some_and(|f| self.features.is_type_feature(f))
    }

    pub fn as_ref(&mut self, ty: TypeId) -> TypeId {
        self.arena.as_ref(ty)
    }

    pub fn as_value(&mut self, ty: TypeId) -> TypeId {
        self.arena.as_value(ty)
    }

    pub fn as_this(&mut self, ty: TypeId) -> TypeId {
        self.arena.as_this(ty)
    }

    pub fn generic(&mut self, param: GenericId) -> TypeId {
        self.arena.generic(param)
    }

    pub fn self_type(&mut self, f: FeatureId) -> TypeId {
        self.features.self_type(f, &mut self.arena)
    }

    /// `f[generics]` with `f`'s outer self type as outer and `f`'s own
    /// ref-ness.
    pub fn instantiate(&mut self, f: FeatureId, generics: TypeIdVec) -> TypeId {
        let outer = match self.features.outer(f) {
            Some(o) if !self.features.is_universe(o) => Some(self.self_type(o)),
            _ => None,
        };
        let is_ref = self.features.is_this_ref(f);
        self.arena.constructed(f, generics, outer, is_ref)
    }

    /// Formal generic declaration a generic type refers to
    pub fn generic_param_of(&self, ty: TypeId) -> Option<&GenericParam> {
        self.arena
            .generic_param(ty)
            .and_then(|g| self.features.generic_param(g))
    }

    /// Constraint of a formal generic
    pub fn constraint_of(&self, param: GenericId) -> Option<TypeId> {
        self.features.generic_param(param).map(|p| p.constraint)
    }

    // ========================================================================
    // Generic combinators
    // ========================================================================

    /// Apply `f` to every actual generic and to the outer type of a
    /// constructed type and re-intern if anything changed. Other types are
    /// returned unchanged.
    pub(crate) fn map_generics_and_outer<M>(&mut self, ty: TypeId, mut f: M) -> TypeId
    where
        M: FnMut(&mut Self, TypeId) -> TypeId,
    {
        let FzType::Constructed {
            generics, outer, ..
        } = self.arena.get(ty).clone()
        else {
            return ty;
        };
        let new_generics: TypeIdVec = generics.iter().map(|&g| f(self, g)).collect();
        let new_outer = outer.map(|o| f(self, o));
        if new_generics == generics && new_outer == outer {
            return ty;
        }
        self.arena.rebuild(ty, new_generics, new_outer)
    }
}
