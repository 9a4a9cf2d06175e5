//! Member lookup over a type's hierarchy.

use std::collections::{BTreeSet, HashSet};

use jot_types::{FieldDef, InspectionProvider, MethodDef, TypeDef, TypeRef};

/// Upper bound on the steps of any single hierarchy walk.
pub(crate) const MAX_WALK: usize = 4096;

/// `ty` followed by its super classes, most-derived first.
///
/// Interfaces have no super class. The walk stops at the first type the
/// provider cannot resolve.
pub(crate) fn superclass_chain<'p>(
    provider: &'p dyn InspectionProvider,
    ty: &TypeRef,
) -> Vec<&'p TypeDef> {
    let mut chain = Vec::new();
    let Some(mut def) = ty.resolve(provider) else {
        return chain;
    };
    chain.push(def);
    if def.is_interface() {
        return chain;
    }
    while let Some(next) = def
        .super_binary_name
        .as_deref()
        .and_then(|name| provider.lookup_type(name))
    {
        if chain.iter().any(|seen| seen.binary_name == next.binary_name) {
            tracing::warn!(target: "jot.scope", ty = %ty.binary_name(), class = %next.binary_name, "cyclic super class chain");
            break;
        }
        if chain.len() >= MAX_WALK {
            tracing::warn!(target: "jot.scope", ty = %ty.binary_name(), "super class chain too deep");
            break;
        }
        chain.push(next);
        def = next;
    }
    chain
}

/// `ty`, its super classes and every reachable interface, each once.
///
/// Uses an explicit work-list: classes are visited up the super class chain,
/// pushing their interfaces; once the chain ends, pending interfaces are
/// popped (and their own super-interfaces pushed) until the list drains.
pub(crate) fn accessor_search_order<'p>(
    provider: &'p dyn InspectionProvider,
    ty: &TypeRef,
) -> Vec<&'p TypeDef> {
    let mut order = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut next = ty.resolve(provider);

    while let Some(def) = next {
        if order.len() >= MAX_WALK {
            tracing::warn!(target: "jot.scope", ty = %ty.binary_name(), "type hierarchy too deep");
            break;
        }
        visited.insert(&def.binary_name);
        order.push(def);
        pending.extend(def.interfaces.iter().map(String::as_str));

        let super_def = if def.is_interface() {
            None
        } else {
            def.super_binary_name
                .as_deref()
                .and_then(|name| provider.lookup_type(name))
                .filter(|sup| !visited.contains(sup.binary_name.as_str()))
        };
        next = super_def.or_else(|| {
            while let Some(name) = pending.pop() {
                if visited.contains(name) {
                    continue;
                }
                if let Some(def) = provider.lookup_type(name) {
                    return Some(def);
                }
            }
            None
        });
    }
    order
}

/// First field named `name` across the super class chain of `owner`.
pub(crate) fn find_field<'p>(
    provider: &'p dyn InspectionProvider,
    owner: &TypeRef,
    name: &str,
) -> Option<(&'p TypeDef, &'p FieldDef)> {
    superclass_chain(provider, owner)
        .into_iter()
        .find_map(|def| def.fields.iter().find(|f| f.name == name).map(|f| (def, f)))
}

/// First accessor named `name` across `owner`'s super classes and interfaces.
pub(crate) fn find_accessor<'p>(
    provider: &'p dyn InspectionProvider,
    owner: &TypeRef,
    name: &str,
) -> Option<(&'p TypeDef, &'p MethodDef)> {
    accessor_search_order(provider, owner)
        .into_iter()
        .find_map(|def| def.accessors().find(|m| m.name == name).map(|m| (def, m)))
}

pub(crate) fn field_names(provider: &dyn InspectionProvider, ty: &TypeRef) -> BTreeSet<String> {
    superclass_chain(provider, ty)
        .into_iter()
        .flat_map(|def| def.fields.iter().map(|f| f.name.clone()))
        .collect()
}

pub(crate) fn accessor_names(provider: &dyn InspectionProvider, ty: &TypeRef) -> BTreeSet<String> {
    accessor_search_order(provider, ty)
        .into_iter()
        .flat_map(|def| def.accessors().map(|m| m.name.clone()))
        .collect()
}
