// type_arena/query.rs
//
// Read-only queries that unwrap the canonical representation.

use fz_identity::FeatureId;

use super::arena::TypeArena;
use super::fz_type::{FzType, GenericId};
use super::type_id::TypeId;

impl TypeArena {
    /// Check if this is a reference to a formal generic parameter
    #[inline]
    pub fn is_generic(&self, id: TypeId) -> bool {
        matches!(self.get(id), FzType::Generic { .. })
    }

    /// Unwrap a generic parameter reference
    pub fn generic_param(&self, id: TypeId) -> Option<GenericId> {
        match self.get(id) {
            FzType::Generic { param, .. } => Some(*param),
            _ => None,
        }
    }

    /// The constructor feature of a constructed type
    pub fn feature_of(&self, id: TypeId) -> Option<FeatureId> {
        match self.get(id) {
            FzType::Constructed { feature, .. } => Some(*feature),
            _ => None,
        }
    }

    /// Actual generics of a constructed type, empty for anything else
    pub fn generics(&self, id: TypeId) -> &[TypeId] {
        match self.get(id) {
            FzType::Constructed { generics, .. } => generics,
            _ => &[],
        }
    }

    /// Outer type of a constructed type; `None` at the universe
    pub fn outer(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            FzType::Constructed { outer, .. } => *outer,
            _ => None,
        }
    }

    pub fn is_ref(&self, id: TypeId) -> bool {
        match self.get(id) {
            FzType::Generic { is_ref, .. } | FzType::Constructed { is_ref, .. } => *is_ref,
            _ => false,
        }
    }

    /// Check for `F.this.type`
    pub fn is_this_type(&self, id: TypeId) -> bool {
        matches!(self.get(id), FzType::Constructed { is_this: true, .. })
    }

    #[inline]
    pub fn depends_on_generics(&self, id: TypeId) -> bool {
        self.flags(id).depends_on_generics
    }

    #[inline]
    pub fn contains_this_type(&self, id: TypeId) -> bool {
        self.flags(id).contains_this_type
    }

    #[inline]
    pub fn contains_error(&self, id: TypeId) -> bool {
        self.flags(id).contains_error
    }

    /// Check for UNDEFINED anywhere inside `id`. With `except_first`, the
    /// first actual generic of `id` itself is not inspected (the slot a type
    /// feature reserves for its `THIS_TYPE`).
    pub fn contains_undefined(&self, id: TypeId, except_first: bool) -> bool {
        if !except_first {
            return self.flags(id).contains_undefined;
        }
        match self.get(id) {
            FzType::Constructed {
                generics, outer, ..
            } => generics
                .iter()
                .skip(1)
                .chain(outer.iter())
                .any(|&child| self.flags(child).contains_undefined),
            _ => self.flags(id).contains_undefined,
        }
    }
}
