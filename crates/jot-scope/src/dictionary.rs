use std::collections::HashMap;

use jot_types::TypeRef;

use crate::error::{RefKind, ScopeError};

/// Resolves abbreviated type names.
///
/// Every type is registered under each suffix of its binary name that starts
/// at a `.` or `$` boundary, so `com.zoo.Outer$Dog` answers to `Dog`,
/// `Outer$Dog`, `zoo.Outer$Dog` and `com.zoo.Outer$Dog`. A suffix shared by
/// several types is ambiguous and never resolves.
#[derive(Debug, Clone, Default)]
pub struct SuffixDictionary {
    by_suffix: HashMap<String, Vec<TypeRef>>,
    by_name: HashMap<String, TypeRef>,
    order: Vec<TypeRef>,
}

/// Suffixes of `binary_name`, shortest first. The full name is always last.
pub(crate) fn suffixes(binary_name: &str) -> impl Iterator<Item = &str> {
    binary_name
        .char_indices()
        .rev()
        .filter(|(_, c)| *c == '.' || *c == '$')
        .map(move |(idx, _)| &binary_name[idx + 1..])
        .filter(|suffix| !suffix.is_empty())
        .chain(std::iter::once(binary_name))
}

impl SuffixDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty`. Returns `false` when it was already present.
    pub fn add(&mut self, ty: TypeRef) -> bool {
        if self.by_name.contains_key(ty.binary_name()) {
            return false;
        }
        for suffix in suffixes(ty.binary_name()) {
            let entry = self.by_suffix.entry(suffix.to_owned()).or_default();
            if !entry.contains(&ty) {
                entry.push(ty.clone());
            }
        }
        self.by_name.insert(ty.binary_name().to_owned(), ty.clone());
        self.order.push(ty);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.order.iter()
    }

    pub fn is_known(&self, suffix: &str) -> bool {
        self.by_suffix.contains_key(suffix)
    }

    pub fn is_ambiguous(&self, suffix: &str) -> bool {
        self.by_suffix.get(suffix).is_some_and(|types| types.len() > 1)
    }

    pub fn get(&self, suffix: &str) -> Result<TypeRef, ScopeError> {
        match self.by_suffix.get(suffix).map(Vec::as_slice) {
            None | Some([]) => Err(ScopeError::unknown(RefKind::Class, suffix)),
            Some([ty]) => Ok(ty.clone()),
            Some(types) => Err(ScopeError::AmbiguousReference {
                name: suffix.to_owned(),
                candidates: types.iter().map(|t| t.binary_name().to_owned()).collect(),
            }),
        }
    }

    /// Exact lookup by binary name.
    pub fn lookup(&self, binary_name: &str) -> Option<TypeRef> {
        self.by_name.get(binary_name).cloned()
    }

    pub fn contains(&self, ty: &TypeRef) -> bool {
        self.by_name.contains_key(ty.binary_name())
    }

    /// Shortest name that [`get`](Self::get) resolves back to `ty`.
    ///
    /// Types outside the dictionary render as their simple name.
    pub fn short_name(&self, ty: &TypeRef) -> String {
        if !self.contains(ty) {
            return ty.display_name().to_owned();
        }
        suffixes(ty.binary_name())
            .find(|suffix| {
                matches!(
                    self.by_suffix.get(*suffix).map(Vec::as_slice),
                    Some([only]) if only == ty
                )
            })
            .unwrap_or(ty.binary_name())
            .to_owned()
    }
}

impl Extend<TypeRef> for SuffixDictionary {
    fn extend<I: IntoIterator<Item = TypeRef>>(&mut self, iter: I) {
        for ty in iter {
            self.add(ty);
        }
    }
}

impl FromIterator<TypeRef> for SuffixDictionary {
    fn from_iter<I: IntoIterator<Item = TypeRef>>(iter: I) -> Self {
        let mut dict = SuffixDictionary::new();
        dict.extend(iter);
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn suffixes_split_on_package_and_nesting() {
        let all: Vec<&str> = suffixes("com.zoo.Outer$Dog").collect();
        assert_eq!(
            all,
            vec!["Dog", "Outer$Dog", "zoo.Outer$Dog", "com.zoo.Outer$Dog"]
        );
        assert_eq!(suffixes("int").collect::<Vec<_>>(), vec!["int"]);
    }

    #[test]
    fn short_name_prefers_shortest_unique_suffix() {
        let dict: SuffixDictionary = ["a.x.Helper", "b.y.Helper", "a.x.Dog"]
            .into_iter()
            .map(TypeRef::new)
            .collect();

        assert_eq!(dict.short_name(&TypeRef::new("a.x.Dog")), "Dog");
        assert_eq!(dict.short_name(&TypeRef::new("a.x.Helper")), "x.Helper");
        assert_eq!(dict.short_name(&TypeRef::new("java.lang.String")), "String");
    }

    #[test]
    fn readding_is_a_noop() {
        let mut dict = SuffixDictionary::new();
        assert!(dict.add(TypeRef::new("a.Dog")));
        assert!(!dict.add(TypeRef::new("a.Dog")));
        assert_eq!(dict.len(), 1);
        assert!(!dict.is_ambiguous("Dog"));
    }
}
