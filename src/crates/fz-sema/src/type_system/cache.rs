// type_system/cache.rs
//
// Memoization of substitution results.

use std::hash::Hash;

use fz_identity::FeatureId;
use rustc_hash::FxHashMap;

use crate::type_arena::{TypeId, TypeIdVec};

/// `(target, owner, actuals)` for `substitute`
pub(super) type OwnerKey = (TypeId, FeatureId, TypeIdVec);

/// `(source, target)` for `substitute_via`
pub(super) type ViaKey = (TypeId, TypeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Result cache for one substitution form, with hit/miss counters.
#[derive(Debug, Clone)]
pub struct SubstitutionCache<K> {
    entries: FxHashMap<K, TypeId>,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq> Default for SubstitutionCache<K> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Hash + Eq> SubstitutionCache<K> {
    /// Look up a cached result, counting the hit or miss.
    pub fn get(&mut self, key: &K) -> Option<TypeId> {
        let found = self.entries.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub fn insert(&mut self, key: K, result: TypeId) {
        self.entries.insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all cached entries. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct SubstitutionCaches {
    pub by_owner: SubstitutionCache<OwnerKey>,
    pub via_type: SubstitutionCache<ViaKey>,
}
