// type_system/constraints.rs
//
// Open generics, arity and constraint checks on actual generics.

use fz_identity::{FeatureId, Span};

use super::TypeSystem;
use crate::errors::SemanticError;
use crate::feature_model::{FeatureModel, GenericParam};
use crate::type_arena::{FzType, TypeId};

impl<F: FeatureModel> TypeSystem<F> {
    /// Check if `ty` refers to an open (variadic) formal generic
    pub fn is_open_generic(&self, ty: TypeId) -> bool {
        self.generic_param_of(ty).is_some_and(|p| p.is_open)
    }

    /// Report a use of an open generic outside the tail of a generics list.
    /// Returns false if `ty` is open.
    pub fn ensure_not_open(&mut self, ty: TypeId) -> bool {
        let Some(param) = self.generic_param_of(ty) else {
            return true;
        };
        if !param.is_open {
            return true;
        }
        let span = param.span;
        let name = self.display(ty);
        self.report(SemanticError::IllegalOpenGenericUse { name, span: span.into() }, span);
        false
    }

    /// Check whether `actuals` can be passed for the formals of `f`. An open
    /// last formal matches any number of trailing actuals, including none.
    pub fn actuals_match(&self, f: FeatureId, actuals: &[TypeId]) -> bool {
        let formals = self.features.formal_generics(f);
        match formals.last() {
            Some(last) if last.is_open => actuals.len() + 1 >= formals.len(),
            _ => actuals.len() == formals.len(),
        }
    }

    /// Check the actual generics of `ty`, recursively, against the
    /// constraints of the corresponding formals. The constraints themselves
    /// are checked as well. Returns `ty`, or ERROR if an actual generic was
    /// rejected.
    #[tracing::instrument(skip(self), fields(type_name = %self.display(ty)))]
    pub fn check_constraints(&mut self, ty: TypeId, span: Span) -> TypeId {
        let FzType::Constructed {
            feature, generics, ..
        } = self.arena.get(ty).clone()
        else {
            return ty;
        };

        if !self.actuals_match(feature, &generics) {
            let formals = self.features.formal_generics(feature);
            let expected = match formals.last() {
                Some(last) if last.is_open => format!("at least {}", formals.len() - 1),
                _ => formals.len().to_string(),
            };
            let error = SemanticError::WrongNumberOfActualGenerics {
                feature: self.features.qualified_name(feature).to_string(),
                expected,
                found: generics.len(),
                span: span.into(),
            };
            self.report(error, span);
            return TypeId::ERROR;
        }

        let formals: Vec<GenericParam> = self.features.formal_generics(feature).to_vec();
        let mut result = ty;
        for (formal, &actual) in formals.iter().zip(generics.iter()) {
            if self.check_constraints(actual, span) == TypeId::ERROR {
                result = TypeId::ERROR;
            }
            // a broken constraint is reported against the declaration, `ty`
            // itself stays usable
            if formal.constraint != ty {
                self.check_constraints(formal.constraint, span);
            }
            if !self.constraint_assignable_from(formal.constraint, actual) {
                let error = SemanticError::IncompatibleActualGeneric {
                    formal: self.features.generic_name(formal.id).to_string(),
                    constraint: self.display(formal.constraint),
                    actual: self.display(actual),
                    span: span.into(),
                };
                self.report(error, span);
                result = TypeId::ERROR;
            }
        }
        result
    }
}
