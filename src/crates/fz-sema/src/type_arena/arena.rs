// type_arena/arena.rs
//
// TypeArena: interning, flag computation and the basic type builders.

use fz_identity::FeatureId;
use rustc_hash::FxHashMap;

use super::fz_type::{FzType, GenericId, TypeFlags};
use super::type_id::{TypeId, TypeIdVec};

/// Per-compilation type store. Every type handed out by the engine lives here
/// and is deduplicated on insertion.
#[derive(Clone)]
pub struct TypeArena {
    types: Vec<FzType>,
    flags: Vec<TypeFlags>,
    intern_map: FxHashMap<FzType, TypeId>,
}

impl std::fmt::Debug for TypeArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeArena")
            .field("types", &self.types.len())
            .finish()
    }
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    /// Create a new TypeArena with the sentinels pre-interned at their
    /// reserved indices.
    pub fn new() -> Self {
        let mut arena = Self {
            types: Vec::with_capacity(64),
            flags: Vec::with_capacity(64),
            intern_map: FxHashMap::default(),
        };

        let error = arena.intern(FzType::Error);
        let void = arena.intern(FzType::Void);
        let undefined = arena.intern(FzType::Undefined);
        debug_assert_eq!(error, TypeId::ERROR);
        debug_assert_eq!(void, TypeId::VOID);
        debug_assert_eq!(undefined, TypeId::UNDEFINED);

        arena
    }

    /// Intern a type, returning the existing TypeId if already present.
    pub fn intern(&mut self, ty: FzType) -> TypeId {
        if let Some(&id) = self.intern_map.get(&ty) {
            return id;
        }
        let id = TypeId::from_raw(self.types.len() as u32);
        let flags = self.compute_flags(&ty);
        self.types.push(ty.clone());
        self.flags.push(flags);
        self.intern_map.insert(ty, id);
        id
    }

    /// Get the FzType for a TypeId
    pub fn get(&self, id: TypeId) -> &FzType {
        &self.types[id.index() as usize]
    }

    /// Structural flags computed when `id` was interned
    #[inline]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.flags[id.index() as usize]
    }

    /// Number of interned types, sentinels included
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn compute_flags(&self, ty: &FzType) -> TypeFlags {
        match ty {
            FzType::Error => TypeFlags {
                contains_error: true,
                ..TypeFlags::default()
            },
            FzType::Undefined => TypeFlags {
                contains_undefined: true,
                ..TypeFlags::default()
            },
            FzType::Void => TypeFlags::default(),
            FzType::Generic { .. } => TypeFlags {
                depends_on_generics: true,
                ..TypeFlags::default()
            },
            FzType::Constructed {
                generics,
                outer,
                is_this,
                ..
            } => {
                let own = TypeFlags {
                    contains_this_type: *is_this,
                    ..TypeFlags::default()
                };
                generics
                    .iter()
                    .chain(outer.iter())
                    .fold(own, |acc, &child| acc.merge(self.flags(child)))
            }
        }
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Reference to a formal generic parameter
    pub fn generic(&mut self, param: GenericId) -> TypeId {
        self.intern(FzType::Generic {
            param,
            is_ref: false,
        })
    }

    /// Type constructed from `feature` with the given actual generics
    pub fn constructed(
        &mut self,
        feature: FeatureId,
        generics: TypeIdVec,
        outer: Option<TypeId>,
        is_ref: bool,
    ) -> TypeId {
        self.intern(FzType::Constructed {
            feature,
            generics,
            outer,
            is_ref,
            is_this: false,
        })
    }

    /// Rebuild a constructed type with new generics and outer, keeping its
    /// feature and its ref/this flags. Other types are returned unchanged.
    pub fn rebuild(&mut self, ty: TypeId, generics: TypeIdVec, outer: Option<TypeId>) -> TypeId {
        match self.get(ty) {
            FzType::Constructed {
                feature,
                is_ref,
                is_this,
                ..
            } => {
                let (feature, is_ref, is_this) = (*feature, *is_ref, *is_this);
                self.intern(FzType::Constructed {
                    feature,
                    generics,
                    outer,
                    is_ref,
                    is_this,
                })
            }
            _ => ty,
        }
    }

    /// Same type with reference semantics (boxed)
    pub fn as_ref(&mut self, ty: TypeId) -> TypeId {
        self.with_ref(ty, true)
    }

    /// Same type with value semantics
    pub fn as_value(&mut self, ty: TypeId) -> TypeId {
        self.with_ref(ty, false)
    }

    fn with_ref(&mut self, ty: TypeId, want_ref: bool) -> TypeId {
        let mut changed = self.get(ty).clone();
        match &mut changed {
            FzType::Generic { is_ref, .. } | FzType::Constructed { is_ref, .. } => {
                if *is_ref == want_ref {
                    return ty;
                }
                *is_ref = want_ref;
            }
            FzType::Error | FzType::Void | FzType::Undefined => return ty,
        }
        self.intern(changed)
    }

    /// Replace every reference to a formal generic of `from` by the formal of
    /// `to` at `offset` positions further. Boxing of the references is kept.
    pub fn shift_generics(
        &mut self,
        ty: TypeId,
        from: FeatureId,
        to: FeatureId,
        offset: u32,
    ) -> TypeId {
        if !self.depends_on_generics(ty) {
            return ty;
        }
        match self.get(ty).clone() {
            FzType::Generic { param, is_ref } if param.feature == from => {
                self.intern(FzType::Generic {
                    param: GenericId::new(to, param.index + offset),
                    is_ref,
                })
            }
            FzType::Constructed {
                generics, outer, ..
            } => {
                let new_generics: TypeIdVec = generics
                    .iter()
                    .map(|&g| self.shift_generics(g, from, to, offset))
                    .collect();
                let new_outer = outer.map(|o| self.shift_generics(o, from, to, offset));
                if new_generics == generics && new_outer == outer {
                    return ty;
                }
                self.rebuild(ty, new_generics, new_outer)
            }
            _ => ty,
        }
    }

    /// The `this.type` variant of a constructed type
    pub fn as_this(&mut self, ty: TypeId) -> TypeId {
        let mut changed = self.get(ty).clone();
        match &mut changed {
            FzType::Constructed { is_this, .. } if !*is_this => *is_this = true,
            _ => return ty,
        }
        self.intern(changed)
    }
}
