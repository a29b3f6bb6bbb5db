// errors/mod.rs
//! Type core errors (E3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("illegal use of open formal generic type '{name}'")]
    #[diagnostic(
        code(E3001),
        help("an open generic may only be used as the last actual generic of a type")
    )]
    IllegalOpenGenericUse {
        name: String,
        #[label("declared open here")]
        span: SourceSpan,
    },

    #[error("choice type '{ty}' must not be a reference type")]
    #[diagnostic(
        code(E3002),
        help("a choice holds exactly one of its summands by value")
    )]
    RefToChoice {
        ty: String,
        #[label("reference to choice")]
        span: SourceSpan,
    },

    #[error("generics of choice type '{ty}' must be disjoint: '{first}' and '{second}' overlap")]
    #[diagnostic(code(E3003))]
    GenericsMustBeDisjoint {
        ty: String,
        first: String,
        second: String,
        #[label("overlapping summands")]
        span: SourceSpan,
    },

    #[error("actual generic '{actual}' is not compatible with constraint '{constraint}' of '{formal}'")]
    #[diagnostic(code(E3004))]
    IncompatibleActualGeneric {
        formal: String,
        constraint: String,
        actual: String,
        #[label("incompatible actual generic")]
        span: SourceSpan,
    },

    #[error("wrong number of actual generics for '{feature}': expected {expected}, found {found}")]
    #[diagnostic(code(E3005))]
    WrongNumberOfActualGenerics {
        feature: String,
        expected: String,
        found: usize,
        #[label("in this type")]
        span: SourceSpan,
    },
}
