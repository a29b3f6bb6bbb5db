// type_arena/mod.rs
//
// Canonical type store using TypeId handles for O(1) equality.
//
// - TypeId: u32 handle to an interned type (Copy, trivial Eq/Hash)
// - TypeArena: per-compilation storage with automatic deduplication
// - FzType: the canonical type representation using TypeId for child types

mod arena;
pub mod fz_type;
mod query;
pub mod type_id;

pub use arena::*;
pub use fz_type::*;
pub use type_id::*;
