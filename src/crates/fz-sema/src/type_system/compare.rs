// type_system/compare.rs
//
// Total order over canonical types.

use std::cmp::Ordering;

use super::TypeSystem;
use crate::feature_model::FeatureModel;
use crate::type_arena::{FzType, TypeId};

/// Sentinels sort first, then generics, then constructed types
fn kind_rank(ty: &FzType) -> u8 {
    match ty {
        FzType::Error => 0,
        FzType::Void => 1,
        FzType::Undefined => 2,
        FzType::Generic { .. } => 3,
        FzType::Constructed { .. } => 4,
    }
}

impl<F: FeatureModel> TypeSystem<F> {
    /// Total order over canonical types. Returns `Equal` iff `a == b`.
    pub fn compare(&self, a: TypeId, b: TypeId) -> Ordering {
        let result = self.compare_ignore_outer(a, b);
        if result != Ordering::Equal {
            return result;
        }
        match (self.arena.outer(a), self.arena.outer(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(oa), Some(ob)) => self.compare(oa, ob),
        }
    }

    /// Like `compare`, but two constructed types that differ only in their
    /// outer type compare equal.
    pub fn compare_ignore_outer(&self, a: TypeId, b: TypeId) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let (ta, tb) = (self.arena.get(a), self.arena.get(b));
        let rank = kind_rank(ta).cmp(&kind_rank(tb));
        if rank != Ordering::Equal {
            return rank;
        }
        match (ta, tb) {
            (
                FzType::Generic {
                    param: pa,
                    is_ref: ra,
                },
                FzType::Generic {
                    param: pb,
                    is_ref: rb,
                },
            ) => self
                .features
                .canonical_order_key(pa.feature)
                .cmp(&self.features.canonical_order_key(pb.feature))
                .then_with(|| {
                    self.features
                        .generic_name(*pa)
                        .cmp(self.features.generic_name(*pb))
                })
                .then_with(|| pa.index.cmp(&pb.index))
                // boxed sorts first
                .then_with(|| rb.cmp(ra)),
            (
                FzType::Constructed {
                    feature: fa,
                    generics: ga,
                    is_ref: ra,
                    is_this: this_a,
                    ..
                },
                FzType::Constructed {
                    feature: fb,
                    generics: gb,
                    is_ref: rb,
                    is_this: this_b,
                    ..
                },
            ) => self
                .features
                .canonical_order_key(*fa)
                .cmp(&self.features.canonical_order_key(*fb))
                .then_with(|| self.compare_generic_lists(ga, gb))
                .then_with(|| self.features.name(*fa).cmp(self.features.name(*fb)))
                // ref before value, this-type before plain
                .then_with(|| rb.cmp(ra))
                .then_with(|| this_b.cmp(this_a)),
            // same sentinel
            _ => Ordering::Equal,
        }
    }

    /// Compare actual generics lists: by length, then pairwise
    pub(crate) fn compare_generic_lists(&self, a: &[TypeId], b: &[TypeId]) -> Ordering {
        if a.len() != b.len() {
            return a.len().cmp(&b.len());
        }
        for (&x, &y) in a.iter().zip(b) {
            let result = self.compare(x, y);
            if result != Ordering::Equal {
                return result;
            }
        }
        Ordering::Equal
    }
}
