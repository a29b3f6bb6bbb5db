//! First-class identity types for language entities.
//!
//! Features are the only declaration kind the type core needs to name. The
//! macro stays generic so later phases can add their own ids next to it.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        $vis struct $name(u32);

        impl $name {
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            pub fn index(self) -> u32 {
                self.0
            }
        }
    };
}

define_entity_id! {
    /// Identity for a feature declaration (routine, constructor, choice, type feature, universe)
    pub struct FeatureId;
}
