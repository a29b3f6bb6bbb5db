// type_system/assignability.rs
//
// Assignment compatibility, constraint compatibility and union.

use rustc_hash::FxHashSet;

use super::TypeSystem;
use crate::feature_model::{FeatureModel, Inherit};
use crate::type_arena::{FzType, TypeId};

/// Sentinels that satisfy every assignability check they take part in
fn is_absorbing(ty: TypeId) -> bool {
    ty == TypeId::ERROR || ty == TypeId::UNDEFINED
}

impl<F: FeatureModel> TypeSystem<F> {
    /// Check whether a value of type `actual` can be assigned to a field of
    /// type `target`.
    ///
    /// ERROR or UNDEFINED on either side is assignable so a reported or
    /// pending problem does not cascade. VOID is assignable to everything. A
    /// reference `actual` is assignable to a reference `target` if one of its
    /// ancestors is, and a choice `target` accepts any of its summands.
    pub fn is_assignable_from(&mut self, target: TypeId, actual: TypeId) -> bool {
        self.assignable_from(target, actual, None)
    }

    /// Like `is_assignable_from`, but also records the display name of
    /// `actual` and of every ancestor of it that was tried, for an "assignable
    /// to" list in a diagnostic.
    pub fn is_assignable_from_collecting(
        &mut self,
        target: TypeId,
        actual: TypeId,
        assignable_to: &mut FxHashSet<String>,
    ) -> bool {
        self.assignable_from(target, actual, Some(assignable_to))
    }

    fn assignable_from(
        &mut self,
        target: TypeId,
        actual: TypeId,
        mut assignable_to: Option<&mut FxHashSet<String>>,
    ) -> bool {
        if let Some(names) = assignable_to.as_deref_mut() {
            names.insert(self.display(actual));
        }
        let target = self.remove_type_parameter_used_for_this_type_in_type_feature(target);
        let actual = self.remove_type_parameter_used_for_this_type_in_type_feature(actual);

        if target == actual
            || actual == TypeId::VOID
            || is_absorbing(target)
            || is_absorbing(actual)
        {
            return true;
        }

        if !self.arena.is_generic(target) && self.arena.is_ref(target) && self.arena.is_ref(actual)
        {
            match self.arena.get(actual).clone() {
                FzType::Generic { param, .. } => {
                    if let Some(constraint) = self.constraint_of(param) {
                        let boxed = self.arena.as_ref(constraint);
                        if boxed != actual && self.is_assignable_from(target, boxed) {
                            return true;
                        }
                    }
                }
                FzType::Constructed { feature, .. } => {
                    let inherits: Vec<Inherit> = self.features.inherits(feature).to_vec();
                    let mut found = false;
                    for inherit in &inherits {
                        let ancestor = self.ancestor_as_seen_from(actual, inherit.ty);
                        let ancestor = self.arena.as_ref(ancestor);
                        // keep going while collecting so every ancestor is listed
                        if self.assignable_from(target, ancestor, assignable_to.as_deref_mut()) {
                            found = true;
                            if assignable_to.is_none() {
                                break;
                            }
                        }
                    }
                    if found {
                        return true;
                    }
                }
                FzType::Error | FzType::Void | FzType::Undefined => {}
            }
        }

        self.is_choice_match(target, actual)
    }

    /// Like `is_assignable_from`, but a choice only accepts itself: no
    /// implicit tagging of a summand.
    pub fn is_directly_assignable_from(&mut self, target: TypeId, actual: TypeId) -> bool {
        if self.is_choice(target) {
            target == actual
        } else {
            self.is_assignable_from(target, actual)
        }
    }

    pub fn is_assignable_from_or_contains_error(&mut self, target: TypeId, actual: TypeId) -> bool {
        self.arena.contains_error(target)
            || self.arena.contains_error(actual)
            || self.is_assignable_from(target, actual)
    }

    /// Check whether `actual` satisfies a formal generic's constraint
    /// `target`.
    ///
    /// Two types of the same feature with the same number of actual
    /// generics satisfy each other without looking at the actual generics.
    pub fn constraint_assignable_from(&mut self, target: TypeId, actual: TypeId) -> bool {
        if self.arena.contains_error(target)
            || self.arena.contains_error(actual)
            || is_absorbing(target)
            || is_absorbing(actual)
            || target == actual
            || actual == TypeId::VOID
        {
            return true;
        }
        if self.arena.is_generic(target) {
            return false;
        }
        match self.arena.get(actual).clone() {
            FzType::Generic { param, .. } => match self.constraint_of(param) {
                Some(constraint) if constraint != actual => {
                    self.constraint_assignable_from(target, constraint)
                }
                _ => false,
            },
            FzType::Constructed {
                feature, generics, ..
            } => {
                if self.arena.feature_of(target) == Some(feature)
                    && self.arena.generics(target).len() == generics.len()
                {
                    return true;
                }
                let inherits: Vec<Inherit> = self.features.inherits(feature).to_vec();
                inherits.iter().any(|inherit| {
                    let ancestor = self.substitute_via(actual, inherit.ty);
                    self.constraint_assignable_from(target, ancestor)
                })
            }
            FzType::Error | FzType::Void | FzType::Undefined => false,
        }
    }

    /// The smallest type both `a` and `b` can be assigned to, possibly
    /// boxed, or UNDEFINED if there is none.
    pub fn union(&mut self, a: TypeId, b: TypeId) -> TypeId {
        if a == TypeId::ERROR || b == TypeId::ERROR {
            return TypeId::ERROR;
        }
        if a == TypeId::UNDEFINED || b == TypeId::UNDEFINED {
            return TypeId::UNDEFINED;
        }
        if a == TypeId::VOID {
            return b;
        }
        if b == TypeId::VOID {
            return a;
        }
        if self.is_assignable_from(a, b) {
            return a;
        }
        if self.is_assignable_from(b, a) {
            return b;
        }
        let b_ref = self.arena.as_ref(b);
        if self.is_assignable_from(a, b_ref) {
            return a;
        }
        let a_ref = self.arena.as_ref(a);
        if self.is_assignable_from(b, a_ref) {
            return b;
        }
        TypeId::UNDEFINED
    }

    /// An ancestor type of `actual`'s feature as seen from `actual`
    fn ancestor_as_seen_from(&mut self, actual: TypeId, ancestor: TypeId) -> TypeId {
        let ancestor = self.substitute_via(actual, ancestor);
        self.replace_this_type_by_actual_outer(ancestor, actual)
    }

    fn is_choice_match(&mut self, target: TypeId, actual: TypeId) -> bool {
        if self.arena.is_ref(target) || !self.is_choice(target) {
            return false;
        }
        let Some(summands) = self.choice_generics(target) else {
            return false;
        };
        summands
            .iter()
            .any(|&summand| self.is_assignable_from(summand, actual))
    }
}
