use std::collections::HashMap;

use crate::{InspectionProvider, TypeDef};

/// Precomputed type metadata table.
///
/// Keeps insertion order so that enumeration (and everything derived from
/// it, such as ancestry lists) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    defs: HashMap<String, TypeDef>,
    order: Vec<String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a definition. A replaced type keeps its position.
    pub fn insert(&mut self, def: TypeDef) {
        if !self.defs.contains_key(&def.binary_name) {
            self.order.push(def.binary_name.clone());
        }
        self.defs.insert(def.binary_name.clone(), def);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, binary_name: &str) -> bool {
        self.defs.contains_key(binary_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.order.iter().filter_map(|name| self.defs.get(name))
    }
}

impl FromIterator<TypeDef> for TypeTable {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        let mut table = TypeTable::new();
        for def in iter {
            table.insert(def);
        }
        table
    }
}

impl InspectionProvider for TypeTable {
    fn lookup_type(&self, binary_name: &str) -> Option<&TypeDef> {
        self.defs.get(binary_name)
    }

    fn type_names(&self) -> Vec<String> {
        self.order.clone()
    }
}
