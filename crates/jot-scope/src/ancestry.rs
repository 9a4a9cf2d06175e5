use std::collections::{HashMap, HashSet};

use jot_types::{InspectionProvider, TypeRef};

use crate::members::MAX_WALK;

/// Maps each ancestor (super class or interface, transitively) to the types
/// that descend from it.
///
/// Descendant lists keep insertion order and are not de-duplicated: a type
/// that reaches an interface along two paths (directly and through a super
/// class, say) is listed twice. The super-interfaces of such an interface are
/// walked once per type.
#[derive(Debug, Clone, Default)]
pub struct AncestryIndex {
    descendants: HashMap<TypeRef, Vec<TypeRef>>,
    relations: usize,
}

impl AncestryIndex {
    /// Walk the hierarchy of every type in `types`.
    ///
    /// Ancestors the provider cannot resolve are still recorded; the walk just
    /// cannot continue past them.
    pub fn build<'a>(
        provider: &dyn InspectionProvider,
        types: impl IntoIterator<Item = &'a TypeRef>,
    ) -> Self {
        let mut index = AncestryIndex::default();

        for ty in types {
            let Some(def) = ty.resolve(provider) else {
                tracing::debug!(target: "jot.scope", ty = %ty.binary_name(), "no metadata, skipping ancestry");
                continue;
            };
            tracing::trace!(target: "jot.scope", ty = %ty.binary_name(), "walking ancestry");

            let mut pending: Vec<&str> = def.interfaces.iter().map(String::as_str).collect();

            // Interfaces have no super class, even though their class files
            // name java.lang.Object.
            let mut next = if def.is_interface() {
                None
            } else {
                def.super_binary_name.as_deref()
            };
            let mut classes: HashSet<&str> = HashSet::from([ty.binary_name()]);
            while let Some(name) = next {
                if !classes.insert(name) {
                    tracing::warn!(target: "jot.scope", ty = %ty.binary_name(), class = name, "cyclic super class chain");
                    break;
                }
                if classes.len() > MAX_WALK {
                    tracing::warn!(target: "jot.scope", ty = %ty.binary_name(), "super class chain too deep");
                    break;
                }
                index.record(name, ty);
                let super_def = provider.lookup_type(name);
                if let Some(super_def) = super_def {
                    pending.extend(super_def.interfaces.iter().map(String::as_str));
                }
                next = super_def.and_then(|d| d.super_binary_name.as_deref());
            }

            // An interface reached again is recorded again, but its
            // super-interfaces are only pushed the first time.
            let mut expanded: HashSet<&str> = HashSet::new();
            let mut steps = 0;
            while let Some(name) = pending.pop() {
                index.record(name, ty);
                steps += 1;
                if steps >= MAX_WALK {
                    tracing::warn!(target: "jot.scope", ty = %ty.binary_name(), "interface graph too large");
                    break;
                }
                if !expanded.insert(name) {
                    continue;
                }
                if let Some(iface) = provider.lookup_type(name) {
                    pending.extend(iface.interfaces.iter().map(String::as_str));
                }
            }
        }

        tracing::info!(
            target: "jot.scope",
            relations = index.relations,
            ancestors = index.descendants.len(),
            "discovered {} ancestry relations",
            index.relations
        );
        index
    }

    fn record(&mut self, ancestor: &str, descendant: &TypeRef) {
        self.descendants
            .entry(TypeRef::new(ancestor))
            .or_default()
            .push(descendant.clone());
        self.relations += 1;
    }

    /// Descendants of `ancestor`, empty when it has none.
    pub fn descendants(&self, ancestor: &TypeRef) -> &[TypeRef] {
        self.descendants
            .get(ancestor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of (ancestor, descendant) relations recorded.
    pub fn relation_count(&self) -> usize {
        self.relations
    }

    pub fn ancestor_count(&self) -> usize {
        self.descendants.len()
    }
}
