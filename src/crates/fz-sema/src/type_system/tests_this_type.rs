// type_system/tests_this_type.rs
//
// Unit tests for this-type replacement and type features.

#[cfg(test)]
mod this_type_tests {
    use fz_identity::Span;

    use super::super::fixtures::Lib;
    use crate::errors::SemanticError;
    use crate::feature_model::FeatureModel;
    use crate::type_arena::{GenericId, TypeId, TypeIdVec};

    // ========================================================================
    // replace_this_type_by_actual_outer
    // ========================================================================

    #[test]
    fn this_type_becomes_heir() {
        let mut lib = Lib::new();
        let node = lib.ts.declare_ref_feature("node", None);
        lib.ts.declare_inherits(node, lib.any, TypeIdVec::new());
        let leaf = lib.ts.declare_ref_feature("leaf", None);
        lib.ts.declare_inherits(leaf, node, TypeIdVec::new());

        let node_ty = lib.ts.simple_type(node);
        let node_this = lib.ts.as_this(node_ty);
        let leaf_ty = lib.ts.simple_type(leaf);

        let result = lib.ts.replace_this_type_by_actual_outer(node_this, leaf_ty);
        assert_eq!(result, leaf_ty);
        assert!(!lib.ts.contains_this_type(result));

        let box_this = lib.box_of(node_this);
        let result = lib.ts.replace_this_type_by_actual_outer(box_this, leaf_ty);
        let expected = lib.box_of(leaf_ty);
        assert_eq!(result, expected);
        assert!(!lib.ts.contains_this_type(result));
    }

    #[test]
    fn unrelated_target_keeps_this_type() {
        let mut lib = Lib::new();
        let node = lib.ts.declare_ref_feature("node", None);
        let node_ty = lib.ts.simple_type(node);
        let node_this = lib.ts.as_this(node_ty);

        let result = lib.ts.replace_this_type_by_actual_outer(node_this, lib.i32_ty);
        assert_eq!(result, node_this);
        assert!(lib.ts.contains_this_type(result));
    }

    #[test]
    fn this_type_of_outer_feature_uses_outer_level() {
        let mut lib = Lib::new();
        let list = lib.ts.declare_feature("list", None);
        let cursor = lib.ts.declare_feature("cursor", Some(list));
        let list_ty = lib.ts.simple_type(list);
        let list_this = lib.ts.as_this(list_ty);
        let cursor_ty = lib.ts.simple_type(cursor);

        let result = lib.ts.replace_this_type_by_actual_outer(list_this, cursor_ty);
        assert_eq!(result, list_ty);
    }

    #[test]
    fn generic_target_uses_constraint() {
        let mut lib = Lib::new();
        let any_this = lib.ts.as_this(lib.any_ty);
        let result = lib.ts.replace_this_type_by_actual_outer(any_this, lib.box_t);
        assert_eq!(result, lib.box_t);
    }

    // ========================================================================
    // type_type
    // ========================================================================

    #[test]
    fn type_type_creates_type_feature_once() {
        let mut lib = Lib::new();
        let first = lib.ts.type_type(lib.i32_ty);
        let second = lib.ts.type_type(lib.i32_ty);
        assert_eq!(first, second);
        assert!(lib.ts.is_type_type(first));
        assert_eq!(lib.ts.arena().generics(first), &[lib.i32_ty]);
        assert!(lib.ts.features().has_type_feature(lib.i32_f));
        assert_eq!(lib.ts.display(first), "i32.type i32");
    }

    #[test]
    fn type_type_prepends_underlying_type() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let meta = lib.ts.type_type(box_i32);
        assert_eq!(lib.ts.arena().generics(meta), &[box_i32, lib.i32_ty]);
        assert_eq!(lib.ts.arena().outer(meta), None);
    }

    #[test]
    fn type_type_of_inner_feature_has_outer_metatype() {
        let mut lib = Lib::new();
        let inner = lib.ts.declare_feature("inner", Some(lib.i32_f));
        let inner_ty = lib.ts.simple_type(inner);
        let meta = lib.ts.type_type(inner_ty);
        let outer_meta = lib.ts.type_type(lib.i32_ty);
        assert_eq!(lib.ts.arena().outer(meta), Some(outer_meta));
    }

    #[test]
    fn metatype_of_metatype_is_type_root() {
        let mut lib = Lib::new();
        let meta = lib.ts.type_type(lib.i32_ty);
        let meta_meta = lib.ts.type_type(meta);
        assert_eq!(lib.ts.feature_of(meta_meta), Some(lib.type_root));
        assert_eq!(lib.ts.type_type(TypeId::ERROR), TypeId::ERROR);
    }

    #[test]
    fn type_type_of_generic_after_error_is_error() {
        let mut lib = Lib::new();
        lib.ts.diagnostics_mut().report(
            SemanticError::RefToChoice {
                ty: "x".to_string(),
                span: Span::default().into(),
            },
            Span::default(),
        );
        assert_eq!(lib.ts.type_type(lib.box_t), TypeId::ERROR);
    }

    #[test]
    #[should_panic(expected = "not yet implemented")]
    fn type_type_of_generic_is_unsupported() {
        let mut lib = Lib::new();
        lib.ts.type_type(lib.box_t);
    }

    #[test]
    fn substituting_type_feature_keeps_first_slot() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let meta = lib.ts.type_type(box_i32);
        let Some(tf) = lib.ts.feature_of(meta) else {
            panic!("metatype is constructed");
        };
        let tf_self = lib.ts.self_type(tf);
        let result = lib.ts.substitute(tf, &[box_i32, lib.i32_ty], tf_self);
        assert_eq!(result, meta);
    }

    // ========================================================================
    // Type parameter rewriting between a type feature and its origin
    // ========================================================================

    #[test]
    fn this_type_parameter_becomes_origin_this_type() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let meta = lib.ts.type_type(box_i32);
        let Some(tf) = lib.ts.feature_of(meta) else {
            panic!("metatype is constructed");
        };
        let this_param = lib.ts.generic(GenericId::new(tf, 0));
        let option_this = lib.option_of(this_param);

        let result = lib
            .ts
            .remove_type_parameter_used_for_this_type_in_type_feature(option_this);
        let box_self = lib.ts.self_type(lib.box_f);
        let box_this = lib.ts.as_this(box_self);
        let expected = lib.option_of(box_this);
        assert_eq!(result, expected);
        assert!(lib.ts.contains_this_type(result));
    }

    #[test]
    fn this_type_parameter_becomes_call_target() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let meta = lib.ts.type_type(box_i32);
        let Some(tf) = lib.ts.feature_of(meta) else {
            panic!("metatype is constructed");
        };
        let this_param = lib.ts.generic(GenericId::new(tf, 0));
        let option_this = lib.option_of(this_param);
        let Some(target) = lib.ts.arena().generic_param(lib.option_t) else {
            panic!("option.T is a generic");
        };

        let result = lib.ts.replace_type_parameter_used_for_this_type_in_type_feature(
            option_this,
            tf,
            target,
        );
        let expected = lib.option_of(lib.option_t);
        assert_eq!(result, expected);
    }

    #[test]
    fn origin_formals_move_to_type_feature() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let meta = lib.ts.type_type(box_i32);
        let Some(tf) = lib.ts.feature_of(meta) else {
            panic!("metatype is constructed");
        };
        let option_box_t = lib.option_of(lib.box_t);

        let result = lib
            .ts
            .replace_type_parameters_of_type_feature_origin(option_box_t, tf);
        let shifted = lib.ts.generic(GenericId::new(tf, 1));
        let expected = lib.option_of(shifted);
        assert_eq!(result, expected);

        // not inside a type feature: unchanged
        let plain = lib
            .ts
            .replace_type_parameters_of_type_feature_origin(option_box_t, lib.box_f);
        assert_eq!(plain, option_box_t);
        assert_eq!(
            lib.ts.features().generic_name(GenericId::new(tf, 1)),
            "T"
        );
    }

    #[test]
    fn assignability_sees_through_this_type_parameter() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let meta = lib.ts.type_type(box_i32);
        let Some(tf) = lib.ts.feature_of(meta) else {
            panic!("metatype is constructed");
        };
        let this_param = lib.ts.generic(GenericId::new(tf, 0));
        let box_self = lib.ts.self_type(lib.box_f);
        let box_this = lib.ts.as_this(box_self);
        assert!(lib.ts.is_assignable_from(box_this, this_param));
    }
}
