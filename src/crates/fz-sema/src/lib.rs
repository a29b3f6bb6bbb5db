//! Fuzion type core: canonical types, generic substitution, assignability,
//! this-type and type-feature rewriting, and choice validation.

pub mod diagnostics;
pub mod errors;
pub mod feature_model;
pub mod options;
pub mod type_arena;
pub mod type_system;

// Re-exports: public API surface
pub use diagnostics::{Diagnostics, TypeError};
pub use errors::SemanticError;
pub use feature_model::{FeatureModel, FeatureRegistry, GenericParam, Inherit, OrderKey};
pub use options::{TypeSystemBuilder, TypeSystemOptions};
pub use type_arena::{FzType, GenericId, TypeArena, TypeFlags, TypeId, TypeIdVec};
pub use type_system::{CacheStats, SubstitutionCache, TypeSystem, display_type_id};
