// type_system/this_type.rs
//
// This-type replacement and type-feature (metatype) rewriting.

use fz_identity::FeatureId;

use super::TypeSystem;
use crate::feature_model::FeatureModel;
use crate::type_arena::{FzType, GenericId, TypeId, TypeIdVec};

impl<F: FeatureModel> TypeSystem<F> {
    /// Replace `F.this.type` in `ty` by the concrete type found along
    /// `call_target` and its outer types. At each level, a this-type whose
    /// feature is an ancestor of that level's feature is replaced by the
    /// level itself.
    pub fn replace_this_type_by_actual_outer(&mut self, ty: TypeId, call_target: TypeId) -> TypeId {
        let mut result = ty;
        let mut level = Some(call_target);
        while let Some(current) = level {
            if !self.arena.contains_this_type(result) {
                break;
            }
            result = self.replace_this_type_at(result, current);
            level = self.arena.outer(current);
        }
        result
    }

    fn replace_this_type_at(&mut self, ty: TypeId, level: TypeId) -> TypeId {
        if !self.arena.contains_this_type(ty) {
            return ty;
        }
        if let FzType::Constructed {
            feature,
            is_this: true,
            ..
        } = self.arena.get(ty)
        {
            let this_feature = *feature;
            let level_as_seen = match self.arena.get(level) {
                FzType::Generic { param, .. } => self.constraint_of(*param).unwrap_or(level),
                _ => level,
            };
            let level_feature = self.arena.feature_of(level_as_seen);
            if level_feature.is_some_and(|lf| self.features.inherits_from(lf, this_feature)) {
                return level;
            }
        }
        self.map_generics_and_outer(ty, |ts, g| ts.replace_this_type_at(g, level))
    }

    /// The type of the type feature of `ty`, i.e. its metatype. The type
    /// feature is created on first use. Its first actual generic is `ty`
    /// itself, followed by `ty`'s actual generics.
    ///
    /// Types of type features, and features without a type feature, have
    /// the type root `Type` as their metatype.
    pub fn type_type(&mut self, ty: TypeId) -> TypeId {
        match self.arena.get(ty).clone() {
            FzType::Error => TypeId::ERROR,
            FzType::Void | FzType::Undefined => ty,
            FzType::Generic { .. } => {
                if self.diagnostics.has_errors() {
                    TypeId::ERROR
                } else {
                    self.not_yet_implemented("type_type of a formal generic")
                }
            }
            FzType::Constructed {
                feature,
                generics,
                outer,
                ..
            } => {
                if self.features.is_universe(feature) {
                    return ty;
                }
                let tf = if self.features.is_type_feature(feature) {
                    None
                } else {
                    self.features
                        .type_feature_or_create(feature, &mut self.arena)
                };
                let Some(tf) = tf else {
                    return match self.features.type_root() {
                        Some(root) => self.self_type(root),
                        None => {
                            self.invariant(false, "type_type: no type root declared");
                            TypeId::ERROR
                        }
                    };
                };
                let mut type_generics = TypeIdVec::with_capacity(generics.len() + 1);
                type_generics.push(ty);
                type_generics.extend(generics.iter().copied());
                let type_outer = outer.map(|o| self.type_type(o));
                self.arena.constructed(tf, type_generics, type_outer, false)
            }
        }
    }

    /// For a call `T.f` where `T` is a formal generic and `f` is declared in
    /// type feature `tf`, replace `tf`'s `THIS_TYPE` parameter in `ty` by
    /// `target`.
    pub fn replace_type_parameter_used_for_this_type_in_type_feature(
        &mut self,
        ty: TypeId,
        tf: FeatureId,
        target: GenericId,
    ) -> TypeId {
        if !self.arena.depends_on_generics(ty) {
            return ty;
        }
        if let FzType::Generic { param, is_ref } = *self.arena.get(ty) {
            if param != GenericId::new(tf, 0) {
                return ty;
            }
            let replaced = self.arena.generic(target);
            return if is_ref {
                self.arena.as_ref(replaced)
            } else {
                replaced
            };
        }
        self.map_generics_and_outer(ty, |ts, g| {
            ts.replace_type_parameter_used_for_this_type_in_type_feature(g, tf, target)
        })
    }

    /// Replace a type feature's `THIS_TYPE` parameter by the this-type of
    /// the type feature's origin.
    pub fn remove_type_parameter_used_for_this_type_in_type_feature(&mut self, ty: TypeId) -> TypeId {
        if !self.arena.depends_on_generics(ty) {
            return ty;
        }
        if let FzType::Generic { param, .. } = *self.arena.get(ty) {
            if param.index != 0 || !self.features.is_type_feature(param.feature) {
                return ty;
            }
            return match self.features.type_feature_origin(param.feature) {
                Some(origin) => {
                    let origin_type = self.self_type(origin);
                    self.arena.as_this(origin_type)
                }
                None => ty,
            };
        }
        self.map_generics_and_outer(ty, |ts, g| {
            ts.remove_type_parameter_used_for_this_type_in_type_feature(g)
        })
    }

    /// Inside `f` and its outer features, replace formals of the origin of
    /// each type feature by the corresponding formal of the type feature.
    pub fn replace_type_parameters_of_type_feature_origin(&mut self, ty: TypeId, f: FeatureId) -> TypeId {
        if self.features.is_universe(f) {
            return ty;
        }
        let mut result = ty;
        if let Some(outer) = self.features.outer(f) {
            result = self.replace_type_parameters_of_type_feature_origin(result, outer);
        }
        if self.features.is_type_feature(f) {
            result = self.replace_type_parameter_of_type_origin(result, f);
        }
        result
    }

    fn replace_type_parameter_of_type_origin(&mut self, ty: TypeId, tf: FeatureId) -> TypeId {
        match self.features.type_feature_origin(tf) {
            // slot 0 of the type feature is THIS_TYPE
            Some(origin) => self.arena.shift_generics(ty, origin, tf, 1),
            None => ty,
        }
    }
}
