// diagnostics.rs
//
// Error sink shared by every type operation. Later phases read the error
// count to decide whether a broken invariant is fallout of an earlier error.

use fz_identity::Span;

use crate::errors::SemanticError;

/// A type error wrapping a miette-enabled SemanticError
#[derive(Debug, Clone)]
pub struct TypeError {
    pub error: SemanticError,
    pub span: Span,
}

impl TypeError {
    /// Create a new type error
    pub fn new(error: SemanticError, span: Span) -> Self {
        Self { error, span }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<TypeError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, error: SemanticError, span: Span) {
        tracing::debug!(%error, line = span.line, column = span.column, "type error");
        self.errors.push(TypeError::new(error, span));
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[TypeError] {
        &self.errors
    }

    /// Drain the collected errors, e.g. to render them with miette
    pub fn take_errors(&mut self) -> Vec<TypeError> {
        std::mem::take(&mut self.errors)
    }
}
