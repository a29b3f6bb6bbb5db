// options.rs
//
// Configuration for a TypeSystem and the builder that assembles one.

use crate::diagnostics::Diagnostics;
use crate::feature_model::FeatureModel;
use crate::type_arena::TypeArena;
use crate::type_system::TypeSystem;

/// Knobs for the type engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSystemOptions {
    /// Memoize `substitute` and `substitute_via` results.
    pub memoize_substitutions: bool,
    /// Panic on a broken internal invariant when no error has been reported
    /// yet. When false the violation is only logged.
    pub strict_invariants: bool,
}

impl Default for TypeSystemOptions {
    fn default() -> Self {
        Self {
            memoize_substitutions: true,
            strict_invariants: cfg!(debug_assertions),
        }
    }
}

/// Builder for TypeSystem.
pub struct TypeSystemBuilder<F: FeatureModel> {
    features: F,
    arena: Option<TypeArena>,
    diagnostics: Diagnostics,
    options: TypeSystemOptions,
}

impl<F: FeatureModel> TypeSystemBuilder<F> {
    pub fn new(features: F) -> Self {
        Self {
            features,
            arena: None,
            diagnostics: Diagnostics::new(),
            options: TypeSystemOptions::default(),
        }
    }

    /// Continue with an existing arena (types already handed out stay valid)
    pub fn arena(mut self, arena: TypeArena) -> Self {
        self.arena = Some(arena);
        self
    }

    /// Share the error count of an earlier phase
    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn options(mut self, options: TypeSystemOptions) -> Self {
        self.options = options;
        self
    }

    pub fn memoize_substitutions(mut self, enabled: bool) -> Self {
        self.options.memoize_substitutions = enabled;
        self
    }

    pub fn strict_invariants(mut self, enabled: bool) -> Self {
        self.options.strict_invariants = enabled;
        self
    }

    pub fn build(self) -> TypeSystem<F> {
        TypeSystem::from_parts(
            self.features,
            self.arena.unwrap_or_default(),
            self.diagnostics,
            self.options,
        )
    }
}
