// type_arena/type_id.rs
//
// TypeId: interned type handle with reserved constants for the sentinels.

use smallvec::SmallVec;

/// Canonical type identity in the TypeArena.
///
/// Two TypeIds are equal iff the types they denote are structurally equal,
/// so `==` on TypeId is the fast path for every identity check in the engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    // ========================================================================
    // Reserved TypeIds for the sentinel types
    // These are guaranteed to be interned at these indices by TypeArena::new()
    // ========================================================================

    /// An already reported failure. Absorbs every comparison it takes part in.
    pub const ERROR: TypeId = TypeId(0);

    /// The bottom type, assignable to everything.
    pub const VOID: TypeId = TypeId(1);

    /// Placeholder for a type that has not been inferred yet.
    pub const UNDEFINED: TypeId = TypeId(2);

    /// First non-reserved TypeId index (for dynamic types)
    pub const FIRST_DYNAMIC: u32 = 3;

    /// Get the raw index (for debugging/serialization)
    pub fn index(self) -> u32 {
        self.0
    }

    /// Create a TypeId from a raw index (for internal use by TypeArena)
    pub(super) fn from_raw(index: u32) -> Self {
        TypeId(index)
    }
}

/// SmallVec for actual generics - inline up to 4 (covers nearly every feature)
pub type TypeIdVec = SmallVec<[TypeId; 4]>;
