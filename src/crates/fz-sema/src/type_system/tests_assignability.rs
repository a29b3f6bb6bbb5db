// type_system/tests_assignability.rs
//
// Unit tests for assignability, constraint compatibility and union.

#[cfg(test)]
mod assignability_tests {
    use fz_identity::Span;
    use smallvec::smallvec;

    use rustc_hash::FxHashSet;

    use super::super::TypeSystem;
    use super::super::fixtures::Lib;
    use crate::errors::SemanticError;
    use crate::feature_model::FeatureRegistry;
    use crate::type_arena::{TypeId, TypeIdVec};

    fn interesting(lib: &mut Lib) -> Vec<TypeId> {
        let box_i32 = lib.box_of(lib.i32_ty);
        let option_i32 = lib.option_of(lib.i32_ty);
        let container_string = lib.container_of(lib.string_ty);
        let ref_i32 = lib.ts.as_ref(lib.i32_ty);
        vec![
            lib.i32_ty,
            lib.string_ty,
            lib.any_ty,
            lib.box_t,
            box_i32,
            option_i32,
            container_string,
            ref_i32,
        ]
    }

    // ========================================================================
    // Basic laws
    // ========================================================================

    #[test]
    fn assignability_is_reflexive() {
        let mut lib = Lib::new();
        for t in interesting(&mut lib) {
            assert!(lib.ts.is_assignable_from(t, t), "{}", lib.ts.display(t));
        }
    }

    #[test]
    fn error_absorbs_on_both_sides() {
        let mut lib = Lib::new();
        for t in interesting(&mut lib) {
            assert!(lib.ts.is_assignable_from(TypeId::ERROR, t));
            assert!(lib.ts.is_assignable_from(t, TypeId::ERROR));
        }
        assert_eq!(lib.error_count(), 0);
    }

    #[test]
    fn undefined_absorbs_on_both_sides() {
        let mut lib = Lib::new();
        for t in interesting(&mut lib) {
            assert!(lib.ts.is_assignable_from(TypeId::UNDEFINED, t));
            assert!(lib.ts.is_assignable_from(t, TypeId::UNDEFINED));
            assert!(lib.ts.constraint_assignable_from(t, TypeId::UNDEFINED));
            assert!(lib.ts.constraint_assignable_from(TypeId::UNDEFINED, t));
        }
        assert_eq!(lib.error_count(), 0);
    }

    #[test]
    fn undefined_operand_with_default_options() {
        let mut ts = TypeSystem::new(FeatureRegistry::new());
        let int = ts.declare_feature("i32", None);
        let int_ty = ts.simple_type(int);
        assert!(ts.is_assignable_from(int_ty, TypeId::UNDEFINED));
        assert!(ts.is_assignable_from(TypeId::UNDEFINED, int_ty));
        assert!(!ts.diagnostics().has_errors());
    }

    #[test]
    fn void_is_bottom() {
        let mut lib = Lib::new();
        for t in interesting(&mut lib) {
            assert!(lib.ts.is_assignable_from(t, TypeId::VOID));
        }
    }

    #[test]
    fn unrelated_values_do_not_assign() {
        let mut lib = Lib::new();
        assert!(!lib.ts.is_assignable_from(lib.i32_ty, lib.string_ty));
        assert!(!lib.ts.is_assignable_from(lib.string_ty, lib.i32_ty));
    }

    // ========================================================================
    // References and inheritance
    // ========================================================================

    #[test]
    fn boxed_heir_assigns_to_ref_ancestor() {
        let mut lib = Lib::new();
        let ref_i32 = lib.ts.as_ref(lib.i32_ty);
        assert!(lib.ts.is_assignable_from(lib.any_ty, ref_i32));
        // a value has to be boxed first
        assert!(!lib.ts.is_assignable_from(lib.any_ty, lib.i32_ty));
    }

    #[test]
    fn generic_ancestor_is_substituted() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let ref_box_i32 = lib.ts.as_ref(box_i32);
        let container_i32 = lib.container_of(lib.i32_ty);
        let container_string = lib.container_of(lib.string_ty);
        assert!(lib.ts.is_assignable_from(container_i32, ref_box_i32));
        assert!(!lib.ts.is_assignable_from(container_string, ref_box_i32));
        assert!(lib.ts.is_assignable_from(lib.any_ty, ref_box_i32));
    }

    #[test]
    fn boxed_generic_uses_constraint() {
        let mut lib = Lib::new();
        let boxed_t = lib.ts.as_ref(lib.box_t);
        assert!(lib.ts.is_assignable_from(lib.any_ty, boxed_t));
        let container_i32 = lib.container_of(lib.i32_ty);
        assert!(!lib.ts.is_assignable_from(container_i32, boxed_t));
    }

    #[test]
    fn collecting_lists_every_ancestor_tried() {
        let mut lib = Lib::new();
        let box_i32 = lib.box_of(lib.i32_ty);
        let ref_box_i32 = lib.ts.as_ref(box_i32);
        let container_i32 = lib.container_of(lib.i32_ty);
        let container_i32 = lib.ts.as_ref(container_i32);
        let container_string = lib.container_of(lib.string_ty);

        let mut tried = FxHashSet::default();
        let found = lib
            .ts
            .is_assignable_from_collecting(container_string, ref_box_i32, &mut tried);
        assert!(!found);
        for t in [ref_box_i32, container_i32, lib.any_ty] {
            assert!(tried.contains(&lib.ts.display(t)), "{}", lib.ts.display(t));
        }
        assert_eq!(tried.len(), 3);

        let mut tried = FxHashSet::default();
        assert!(lib.ts.is_assignable_from_collecting(lib.any_ty, ref_box_i32, &mut tried));
        assert!(tried.contains(&lib.ts.display(ref_box_i32)));
    }

    #[test]
    fn or_contains_error_accepts_broken_types() {
        let mut lib = Lib::new();
        let broken = lib.box_of(TypeId::ERROR);
        assert!(lib.ts.is_assignable_from_or_contains_error(lib.i32_ty, broken));
        assert!(!lib.ts.is_assignable_from_or_contains_error(lib.i32_ty, lib.string_ty));
    }

    // ========================================================================
    // Choices
    // ========================================================================

    #[test]
    fn choice_accepts_summands() {
        let mut lib = Lib::new();
        let option_i32 = lib.option_of(lib.i32_ty);
        assert!(lib.ts.is_assignable_from(option_i32, lib.i32_ty));
        assert!(lib.ts.is_assignable_from(option_i32, lib.nil_ty));
        assert!(!lib.ts.is_assignable_from(option_i32, lib.string_ty));
    }

    #[test]
    fn direct_assignability_does_not_tag() {
        let mut lib = Lib::new();
        let option_i32 = lib.option_of(lib.i32_ty);
        assert!(!lib.ts.is_directly_assignable_from(option_i32, lib.i32_ty));
        assert!(lib.ts.is_directly_assignable_from(option_i32, option_i32));
        assert!(lib.ts.is_directly_assignable_from(lib.i32_ty, lib.i32_ty));
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    #[test]
    fn constraint_follows_inheritance() {
        let mut lib = Lib::new();
        assert!(lib.ts.constraint_assignable_from(lib.any_ty, lib.i32_ty));
        assert!(lib.ts.constraint_assignable_from(lib.numeric_ty, lib.num32_ty));
        assert!(!lib.ts.constraint_assignable_from(lib.numeric_ty, lib.string_ty));
        assert!(lib.ts.constraint_assignable_from(lib.any_ty, lib.box_t));
        assert!(!lib.ts.constraint_assignable_from(lib.box_t, lib.i32_ty));
    }

    #[test]
    fn constraint_same_feature_ignores_actual_generics() {
        // Intentionally permissive: actual generics of the same feature are
        // not checked against each other.
        let mut lib = Lib::new();
        let container_i32 = lib.container_of(lib.i32_ty);
        let container_string = lib.container_of(lib.string_ty);
        assert!(lib.ts.constraint_assignable_from(container_i32, container_string));
    }

    #[test]
    fn check_constraints_reports_incompatible_actual() {
        let mut lib = Lib::new();
        let numbers = lib.ts.declare_feature("numbers", None);
        lib.ts.declare_generic(numbers, "N", lib.numeric_ty);

        let good = lib.ts.instantiate(numbers, smallvec![lib.num32_ty]);
        assert_eq!(lib.ts.check_constraints(good, Span::default()), good);
        assert_eq!(lib.error_count(), 0);

        let bad = lib.ts.instantiate(numbers, smallvec![lib.string_ty]);
        assert_eq!(lib.ts.check_constraints(bad, Span::default()), TypeId::ERROR);
        assert_eq!(lib.error_count(), 1);
        let error = &lib.ts.diagnostics().errors()[0].error;
        assert!(matches!(
            error,
            SemanticError::IncompatibleActualGeneric { formal, .. } if formal == "N"
        ));
    }

    #[test]
    fn check_constraints_descends_into_actuals() {
        let mut lib = Lib::new();
        let numbers = lib.ts.declare_feature("numbers", None);
        lib.ts.declare_generic(numbers, "N", lib.numeric_ty);
        lib.ts.declare_inherits(numbers, lib.any, TypeIdVec::new());
        let bad = lib.ts.instantiate(numbers, smallvec![lib.string_ty]);
        let box_bad = lib.box_of(bad);
        assert_eq!(lib.ts.check_constraints(box_bad, Span::default()), TypeId::ERROR);
        assert_eq!(lib.error_count(), 1);
    }

    #[test]
    fn check_constraints_checks_formal_constraints() {
        let mut lib = Lib::new();
        let numbers = lib.ts.declare_feature("numbers", None);
        lib.ts.declare_generic(numbers, "N", lib.numeric_ty);
        lib.ts.declare_inherits(numbers, lib.any, TypeIdVec::new());
        let numbers_string = lib.ts.instantiate(numbers, smallvec![lib.string_ty]);

        // holder(H: numbers string): the constraint itself is broken
        let holder = lib.ts.declare_feature("holder", None);
        lib.ts.declare_generic(holder, "H", numbers_string);
        let numbers_num32 = lib.ts.instantiate(numbers, smallvec![lib.num32_ty]);
        let holder_use = lib.ts.instantiate(holder, smallvec![numbers_num32]);

        assert_eq!(lib.ts.check_constraints(holder_use, Span::default()), holder_use);
        assert_eq!(lib.error_count(), 1);
        assert!(matches!(
            &lib.ts.diagnostics().errors()[0].error,
            SemanticError::IncompatibleActualGeneric { formal, .. } if formal == "N"
        ));
    }

    #[test]
    fn check_constraints_reports_wrong_arity() {
        let mut lib = Lib::new();
        let too_many = lib.ts.instantiate(lib.box_f, smallvec![lib.i32_ty, lib.string_ty]);
        assert_eq!(lib.ts.check_constraints(too_many, Span::default()), TypeId::ERROR);
        assert!(matches!(
            lib.ts.diagnostics().errors()[0].error,
            SemanticError::WrongNumberOfActualGenerics { found: 2, .. }
        ));
    }

    // ========================================================================
    // Union
    // ========================================================================

    #[test]
    fn union_of_equal_types() {
        let mut lib = Lib::new();
        assert_eq!(lib.ts.union(lib.i32_ty, lib.i32_ty), lib.i32_ty);
    }

    #[test]
    fn union_sentinels() {
        let mut lib = Lib::new();
        assert_eq!(lib.ts.union(TypeId::VOID, lib.i32_ty), lib.i32_ty);
        assert_eq!(lib.ts.union(lib.i32_ty, TypeId::VOID), lib.i32_ty);
        assert_eq!(lib.ts.union(TypeId::ERROR, lib.i32_ty), TypeId::ERROR);
        assert_eq!(lib.ts.union(lib.i32_ty, TypeId::UNDEFINED), TypeId::UNDEFINED);
        assert_eq!(lib.ts.union(TypeId::UNDEFINED, TypeId::ERROR), TypeId::ERROR);
    }

    #[test]
    fn union_widens_through_boxing() {
        let mut lib = Lib::new();
        assert_eq!(lib.ts.union(lib.any_ty, lib.i32_ty), lib.any_ty);
        assert_eq!(lib.ts.union(lib.i32_ty, lib.any_ty), lib.any_ty);
    }

    #[test]
    fn union_of_unrelated_values_is_undefined() {
        let mut lib = Lib::new();
        assert_eq!(lib.ts.union(lib.i32_ty, lib.string_ty), TypeId::UNDEFINED);
    }

    #[test]
    fn union_with_choice() {
        let mut lib = Lib::new();
        let option_i32 = lib.option_of(lib.i32_ty);
        assert_eq!(lib.ts.union(option_i32, lib.nil_ty), option_i32);
    }
}
