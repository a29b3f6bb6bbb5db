// type_arena/fz_type.rs
//
// FzType: the canonical interned type representation.

use fz_identity::FeatureId;

use super::type_id::{TypeId, TypeIdVec};

/// Identity of a formal generic parameter: the declaring feature plus the
/// position in its formal generics list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GenericId {
    pub feature: FeatureId,
    pub index: u32,
}

impl GenericId {
    pub fn new(feature: FeatureId, index: u32) -> Self {
        Self { feature, index }
    }
}

/// The canonical type representation.
///
/// Stored in the TypeArena; use TypeId handles for equality and pass-by-copy
/// and access the FzType via `arena.get(id)`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum FzType {
    // Sentinels
    Error,
    Void,
    Undefined,

    /// A formal generic parameter that has not been substituted yet. A
    /// parameter may be boxed (`is_ref`) when a value of that type is widened
    /// to a reference.
    Generic { param: GenericId, is_ref: bool },

    /// A type built from a constructor feature.
    Constructed {
        feature: FeatureId,
        generics: TypeIdVec,
        /// `None` when the outer feature is the universe
        outer: Option<TypeId>,
        is_ref: bool,
        /// `F.this.type`: the covariant self type of `feature`
        is_this: bool,
    },
}

/// Structural predicates computed once when a type is interned.
///
/// Children are always interned before their parent, so every flag is the
/// fold of the children's flags and never has to be recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeFlags {
    pub depends_on_generics: bool,
    pub contains_this_type: bool,
    pub contains_error: bool,
    pub contains_undefined: bool,
}

impl TypeFlags {
    pub(super) fn merge(self, other: TypeFlags) -> TypeFlags {
        TypeFlags {
            depends_on_generics: self.depends_on_generics || other.depends_on_generics,
            contains_this_type: self.contains_this_type || other.contains_this_type,
            contains_error: self.contains_error || other.contains_error,
            contains_undefined: self.contains_undefined || other.contains_undefined,
        }
    }
}
