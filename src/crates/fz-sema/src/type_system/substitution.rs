// type_system/substitution.rs
//
// Replacing formal generics by actual generics, through inheritance chains
// and outer types.

use fz_identity::FeatureId;

use super::TypeSystem;
use crate::feature_model::{FeatureModel, Inherit};
use crate::type_arena::{FzType, GenericId, TypeId, TypeIdVec};

impl<F: FeatureModel> TypeSystem<F> {
    /// Replace the formal generics of `owner` in `target` by `actuals`.
    ///
    /// `target` may be expressed in terms of the formals of `owner` or of
    /// any of its ancestors; the inheritance edges of `owner` are followed
    /// first so an ancestor's formals are renamed to `owner`'s.
    ///
    /// Returns `target` itself when it does not depend on any generics.
    /// Any ERROR produced on the way makes the whole result ERROR.
    pub fn substitute(&mut self, owner: FeatureId, actuals: &[TypeId], target: TypeId) -> TypeId {
        self.invariant(
            self.actuals_match(owner, actuals),
            "substitute: number of actual generics does not match formal generics",
        );
        if !self.arena.depends_on_generics(target) {
            return target;
        }
        if !self.options.memoize_substitutions {
            return self.substitute_uncached(owner, actuals, target);
        }
        let key = (target, owner, TypeIdVec::from_slice(actuals));
        if let Some(cached) = self.caches.by_owner.get(&key) {
            return cached;
        }
        let result = self.substitute_uncached(owner, actuals, target);
        self.caches.by_owner.insert(key, result);
        result
    }

    fn substitute_uncached(
        &mut self,
        owner: FeatureId,
        actuals: &[TypeId],
        target: TypeId,
    ) -> TypeId {
        tracing::trace!(
            ty = target.index(),
            owner = %self.features.qualified_name(owner),
            "substitute: cache miss"
        );
        let inherits: Vec<Inherit> = self.features.inherits(owner).to_vec();
        let mut result = target;
        for inherit in &inherits {
            result = self.substitute(inherit.ancestor, &inherit.actual_generics, result);
        }

        match self.arena.get(result).clone() {
            FzType::Generic { param, is_ref } => {
                if param.feature != owner {
                    return result;
                }
                if !self.ensure_not_open(result) {
                    return TypeId::ERROR;
                }
                let replaced = self.actual_for(param, actuals);
                if is_ref {
                    self.arena.as_ref(replaced)
                } else {
                    replaced
                }
            }
            FzType::Constructed {
                generics, outer, ..
            } => {
                let mut new_generics = self.substitute_list(owner, actuals, &generics);
                let new_outer = outer.map(|o| self.substitute(owner, actuals, o));
                if self.is_type_type(result) {
                    self.rewrite_type_type_generics(&mut new_generics);
                }
                if new_generics == generics && new_outer == outer {
                    return result;
                }
                if new_outer == Some(TypeId::ERROR) || new_generics.contains(&TypeId::ERROR) {
                    tracing::warn!(
                        ty = target.index(),
                        "substitution produced an error type"
                    );
                    return TypeId::ERROR;
                }
                self.arena.rebuild(result, new_generics, new_outer)
            }
            FzType::Error | FzType::Void | FzType::Undefined => result,
        }
    }

    /// The actual generic passed for `param`
    fn actual_for(&self, param: GenericId, actuals: &[TypeId]) -> TypeId {
        match actuals.get(param.index as usize) {
            Some(&actual) => actual,
            None => {
                self.invariant(false, "substitute: missing actual generic");
                TypeId::ERROR
            }
        }
    }

    /// In the type of a type feature, the first actual generic is the
    /// underlying type; every other slot is seen relative to it.
    fn rewrite_type_type_generics(&mut self, generics: &mut TypeIdVec) {
        let Some(&this_type) = generics.first() else {
            return;
        };
        for i in 1..generics.len() {
            let g = generics[i];
            if g != this_type {
                generics[i] = self.actual_type_type(g, this_type);
            }
        }
    }

    /// Substitute every element of a generics list. A list consisting of
    /// exactly `owner`'s formals is replaced by `actuals` wholesale, and an
    /// open formal of `owner` at the end of the list is spliced with the
    /// remaining actuals.
    pub(crate) fn substitute_list(
        &mut self,
        owner: FeatureId,
        actuals: &[TypeId],
        list: &[TypeId],
    ) -> TypeIdVec {
        let is_own_formals = {
            let formals = self.features.formal_generics(owner);
            list.len() == formals.len()
                && list.iter().zip(formals).all(|(&t, p)| {
                    matches!(
                        self.arena.get(t),
                        FzType::Generic { param, is_ref: false } if *param == p.id
                    )
                })
        };
        if is_own_formals {
            return TypeIdVec::from_slice(actuals);
        }

        let mut result = TypeIdVec::with_capacity(list.len());
        for (i, &t) in list.iter().enumerate() {
            let open_of_owner = self
                .arena
                .generic_param(t)
                .filter(|param| param.feature == owner && self.is_open_generic(t));
            match open_of_owner {
                Some(param) if i + 1 == list.len() => {
                    let start = param.index as usize;
                    result.extend(actuals.get(start..).unwrap_or_default().iter().copied());
                }
                _ => result.push(self.substitute(owner, actuals, t)),
            }
        }
        result
    }

    /// Substitute `target` as seen from inside `source`: the actual
    /// generics of `source` and of all its outer types replace the
    /// corresponding formals. For a generic `source` its constraint is used.
    pub fn substitute_via(&mut self, source: TypeId, target: TypeId) -> TypeId {
        if !self.arena.depends_on_generics(target) {
            return target;
        }
        if !self.options.memoize_substitutions {
            return self.substitute_via_uncached(source, target);
        }
        let key = (source, target);
        if let Some(cached) = self.caches.via_type.get(&key) {
            return cached;
        }
        let result = self.substitute_via_uncached(source, target);
        self.caches.via_type.insert(key, result);
        result
    }

    fn substitute_via_uncached(&mut self, source: TypeId, target: TypeId) -> TypeId {
        match self.arena.get(source).clone() {
            FzType::Generic { param, .. } => match self.constraint_of(param) {
                Some(constraint) if constraint != source => {
                    self.substitute_via(constraint, target)
                }
                _ => target,
            },
            FzType::Constructed {
                feature,
                generics,
                outer,
                ..
            } => {
                let result = self.substitute(feature, &generics, target);
                match outer {
                    Some(o) => self.substitute_via(o, result),
                    None => result,
                }
            }
            FzType::Error => TypeId::ERROR,
            FzType::Void | FzType::Undefined => target,
        }
    }

    /// Express `list`, given in terms of the formals of `ty`'s feature, in
    /// terms of `ty`'s actual generics.
    pub fn replace_generics(&mut self, ty: TypeId, list: &[TypeId]) -> TypeIdVec {
        let FzType::Constructed {
            feature, generics, ..
        } = self.arena.get(ty).clone()
        else {
            self.invariant(false, "replace_generics: type has no feature");
            return TypeIdVec::from_slice(list);
        };
        self.substitute_list(feature, &generics, list)
    }

    /// `ty` as seen from the type feature whose first actual generic is
    /// `this_type`: this-types are replaced along `this_type` and the
    /// remaining generics are taken from `this_type` and its outers.
    pub(crate) fn actual_type_type(&mut self, ty: TypeId, this_type: TypeId) -> TypeId {
        let mut result = self.replace_this_type_by_actual_outer(ty, this_type);
        if let FzType::Constructed {
            feature,
            generics,
            outer,
            ..
        } = self.arena.get(this_type).clone()
        {
            if !self.features.is_universe(feature) {
                if let Some(o) = outer {
                    result = self.actual_type_type(result, o);
                }
                result = self.substitute(feature, &generics, result);
            }
        }
        result
    }
}
