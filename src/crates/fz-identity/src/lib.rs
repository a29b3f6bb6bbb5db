// src/crates/fz-identity/src/lib.rs
//
// Foundational identities shared by the front end: feature ids, interned
// names and source spans.

mod entities;
mod intern;
mod span;
mod symbol;

pub use entities::FeatureId;
pub use intern::Interner;
pub use span::Span;
pub use symbol::Symbol;
