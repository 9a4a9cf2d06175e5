use std::collections::BTreeSet;

use jot_types::TypeRef;

/// Single-slot memo of one engine's candidate names, keyed by the type they
/// were computed for.
#[derive(Debug, Clone, Default)]
pub struct CompletionCache {
    key: Option<TypeRef>,
    values: BTreeSet<String>,
    misses: usize,
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached names for `key`, recomputed when the key changed.
    pub fn get_or_compute(
        &mut self,
        key: &TypeRef,
        compute: impl FnOnce() -> BTreeSet<String>,
    ) -> &BTreeSet<String> {
        if !self.is_cached_for(key) {
            self.values = compute();
            self.key = Some(key.clone());
            self.misses += 1;
        }
        &self.values
    }

    pub fn is_cached_for(&self, key: &TypeRef) -> bool {
        self.key.as_ref() == Some(key)
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.values.clear();
    }

    /// Number of recomputations so far.
    pub fn misses(&self) -> usize {
        self.misses
    }
}
