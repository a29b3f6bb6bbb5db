// type_system/choice.rs
//
// Choice (sum) types: summands as seen from a concrete choice type and the
// checks a choice type must pass.

use fz_identity::Span;

use super::TypeSystem;
use crate::errors::SemanticError;
use crate::feature_model::FeatureModel;
use crate::type_arena::{FzType, TypeId, TypeIdVec};

impl<F: FeatureModel> TypeSystem<F> {
    /// The summands of choice type `ty`, with the choice feature's formals
    /// replaced by `ty`'s actual generics and this-types resolved along
    /// `ty`. `None` if `ty` is not a choice.
    pub fn choice_generics(&mut self, ty: TypeId) -> Option<TypeIdVec> {
        let FzType::Constructed {
            feature, generics, ..
        } = self.arena.get(ty).clone()
        else {
            return None;
        };
        let declared = TypeIdVec::from_slice(self.features.declared_summands(feature)?);
        let summands = self.substitute_list(feature, &generics, &declared);
        Some(
            summands
                .into_iter()
                .map(|s| self.replace_this_type_by_actual_outer(s, ty))
                .collect(),
        )
    }

    /// Check that choice type `ty` is a value type and that its summands are
    /// pairwise disjoint. Problems are reported, `ty` stays usable.
    #[tracing::instrument(skip(self), fields(type_name = %self.display(ty)))]
    pub fn check_choice(&mut self, ty: TypeId, span: Span) {
        let Some(summands) = self.choice_generics(ty) else {
            return;
        };

        if self.arena.is_ref(ty) {
            let error = SemanticError::RefToChoice {
                ty: self.display(ty),
                span: span.into(),
            };
            self.report(error, span);
        }

        for (i, &first) in summands.iter().enumerate() {
            for &second in &summands[i + 1..] {
                if first == TypeId::ERROR || second == TypeId::ERROR {
                    continue;
                }
                let overlapping = first == second
                    || (!self.arena.is_generic(first)
                        && !self.arena.is_generic(second)
                        && (self.is_directly_assignable_from(first, second)
                            || self.is_directly_assignable_from(second, first)));
                if overlapping {
                    let error = SemanticError::GenericsMustBeDisjoint {
                        ty: self.display(ty),
                        first: self.display(first),
                        second: self.display(second),
                        span: span.into(),
                    };
                    self.report(error, span);
                }
            }
        }
    }
}
