use std::fmt;
use std::sync::Arc;

use jot_classfile::FieldType;

use crate::{InspectionProvider, TypeDef, OBJECT, STRING};

const PRIMITIVES: [&str; 8] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

/// Identity of one type in the universe, keyed by its binary name
/// (`com.zoo.Dog`, `com.zoo.Outer$Inner`, `int`, `java.lang.String[]`).
///
/// Cloning is cheap. Two refs are equal iff they name the same type; whether
/// the type is actually present in a universe is only known once it is
/// [resolved](TypeRef::resolve).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(Arc<str>);

impl TypeRef {
    pub fn new(binary_name: &str) -> Self {
        Self(Arc::from(binary_name))
    }

    pub fn object() -> Self {
        Self::new(OBJECT)
    }

    pub fn string() -> Self {
        Self::new(STRING)
    }

    pub fn from_field_type(ty: &FieldType) -> Self {
        Self::new(&ty.java_name())
    }

    /// Primitives plus `java.lang.Object` and `java.lang.String`, which are
    /// always nameable even when the universe does not contain them.
    pub fn base_types() -> Vec<TypeRef> {
        PRIMITIVES
            .iter()
            .copied()
            .chain([OBJECT, STRING])
            .map(TypeRef::new)
            .collect()
    }

    pub fn binary_name(&self) -> &str {
        &self.0
    }

    /// Simple name: everything after the last `.`.
    pub fn display_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    pub fn is_primitive(&self) -> bool {
        PRIMITIVES.contains(&&*self.0)
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with("[]")
    }

    pub fn is_base(&self) -> bool {
        self.is_primitive() || &*self.0 == OBJECT || &*self.0 == STRING
    }

    /// Package of a class type; `None` for primitives, arrays and the
    /// unnamed package.
    pub fn package(&self) -> Option<&str> {
        if self.is_primitive() || self.is_array() {
            return None;
        }
        self.0.rsplit_once('.').map(|(pkg, _)| pkg)
    }

    /// Materialize the type's descriptor from `provider`.
    pub fn resolve<'p>(&self, provider: &'p dyn InspectionProvider) -> Option<&'p TypeDef> {
        provider.lookup_type(&self.0)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let inner = TypeRef::new("com.zoo.Outer$Inner");
        assert_eq!(inner.display_name(), "Outer$Inner");
        assert_eq!(inner.package(), Some("com.zoo"));
        assert_eq!(inner.to_string(), "Outer$Inner");

        let array = TypeRef::new("java.lang.String[]");
        assert_eq!(array.display_name(), "String[]");
        assert_eq!(array.package(), None);

        let int = TypeRef::new("int");
        assert!(int.is_primitive());
        assert!(int.is_base());
        assert_eq!(int.package(), None);

        assert_eq!(TypeRef::new("Toplevel").package(), None);
        assert_eq!(TypeRef::base_types().len(), 10);
    }
}
