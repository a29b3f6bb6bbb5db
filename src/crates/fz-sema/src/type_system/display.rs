//! Type display for diagnostics.

use super::TypeSystem;
use crate::feature_model::FeatureModel;
use crate::type_arena::{FzType, TypeArena, TypeId};

/// Display a TypeId by matching on FzType.
/// This is the canonical way to format types for error messages.
pub fn display_type_id<F: FeatureModel>(ty: TypeId, arena: &TypeArena, features: &F) -> String {
    match arena.get(ty) {
        FzType::Error => "<error>".to_string(),
        FzType::Void => "void".to_string(),
        FzType::Undefined => "<undefined>".to_string(),
        FzType::Generic { param, is_ref } => {
            let mut out = String::new();
            if !features.is_universe(param.feature) {
                out.push_str(features.qualified_name(param.feature));
                out.push('.');
            }
            out.push_str(features.generic_name(*param));
            if *is_ref {
                out.push_str(" (boxed)");
            }
            out
        }
        FzType::Constructed {
            feature,
            generics,
            outer,
            is_ref,
            is_this,
        } => {
            let mut out = String::new();
            if let Some(o) = outer {
                out.push_str(&display_wrapped(*o, arena, features));
                out.push('.');
            }
            // only mention ref/value when it differs from the declaration
            if *is_ref != features.is_this_ref(*feature) {
                out.push_str(if *is_ref { "ref " } else { "value " });
            }
            out.push_str(features.name(*feature));
            if *is_this {
                out.push_str(".this.type");
            }
            for &g in generics {
                out.push(' ');
                out.push_str(&display_wrapped(g, arena, features));
            }
            out
        }
    }
}

/// Parenthesize compound types so they read as one argument
fn display_wrapped<F: FeatureModel>(ty: TypeId, arena: &TypeArena, features: &F) -> String {
    let s = display_type_id(ty, arena, features);
    if s.contains(' ') {
        format!("({s})")
    } else {
        s
    }
}

impl<F: FeatureModel> TypeSystem<F> {
    pub fn display(&self, ty: TypeId) -> String {
        display_type_id(ty, &self.arena, &self.features)
    }
}
