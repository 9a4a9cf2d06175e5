//! Terminal operations invocable on the current type.

use std::collections::HashMap;
use std::fmt;

use jot_types::TypeRef;

use crate::dictionary::SuffixDictionary;
use crate::error::{RefKind, ScopeError};
use crate::symbols::CLASS;

/// A constructed operation. Its `Display` form is what the user sees.
pub trait Operation: fmt::Display {
    fn name(&self) -> &str;
    fn target(&self) -> &TypeRef;
}

pub trait OperationGateway {
    /// Operation names registered for `ty`; empty when there are none.
    fn operations(&self, ty: &TypeRef) -> Vec<String>;

    /// Build the operation named by the first word of `line` for `ty`. The
    /// remaining words are its arguments.
    fn create(
        &self,
        ty: &TypeRef,
        line: &str,
        dictionary: &SuffixDictionary,
    ) -> Result<Box<dyn Operation>, ScopeError>;
}

/// Gateway with no operations at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOperations;

impl OperationGateway for NoOperations {
    fn operations(&self, _ty: &TypeRef) -> Vec<String> {
        Vec::new()
    }

    fn create(
        &self,
        _ty: &TypeRef,
        line: &str,
        _dictionary: &SuffixDictionary,
    ) -> Result<Box<dyn Operation>, ScopeError> {
        let name = line.split_whitespace().next().unwrap_or_default();
        Err(ScopeError::unknown(RefKind::Operation, name))
    }
}

/// Operations registered per binary type name, usually from `[[hooks]]`
/// configuration tables.
#[derive(Debug, Default, Clone)]
pub struct HookRegistry {
    hooks: HashMap<String, Vec<String>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `operations` on `ty`, keeping earlier registrations.
    pub fn register<I, S>(&mut self, ty: &TypeRef, operations: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ops = self.hooks.entry(ty.binary_name().to_owned()).or_default();
        for op in operations {
            let op = op.into();
            if !ops.contains(&op) {
                ops.push(op);
            }
        }
    }

    /// Number of types with at least one operation.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl OperationGateway for HookRegistry {
    fn operations(&self, ty: &TypeRef) -> Vec<String> {
        self.hooks.get(ty.binary_name()).cloned().unwrap_or_default()
    }

    fn create(
        &self,
        ty: &TypeRef,
        line: &str,
        dictionary: &SuffixDictionary,
    ) -> Result<Box<dyn Operation>, ScopeError> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let known = self
            .hooks
            .get(ty.binary_name())
            .is_some_and(|ops| ops.iter().any(|op| op == name));
        if !known {
            return Err(ScopeError::unknown(
                RefKind::Operation,
                format!("{}!{name}", ty.binary_name()),
            ));
        }

        let args = words
            .map(|word| match word.strip_prefix(CLASS) {
                Some(suffix) => dictionary.get(suffix).map(HookArg::Class),
                None => Ok(HookArg::Text(word.to_owned())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ScopeError::OperationFailed {
                name: name.to_owned(),
                source: Box::new(err),
            })?;

        tracing::debug!(target: "jot.scope", ty = %ty.binary_name(), op = name, args = args.len(), "created hook operation");
        Ok(Box::new(HookOperation {
            target: ty.clone(),
            name: name.to_owned(),
            args,
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookArg {
    /// `@Name`, resolved through the scope dictionary.
    Class(TypeRef),
    Text(String),
}

impl fmt::Display for HookArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookArg::Class(ty) => f.write_str(ty.binary_name()),
            HookArg::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOperation {
    pub target: TypeRef,
    pub name: String,
    pub args: Vec<HookArg>,
}

impl Operation for HookOperation {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> &TypeRef {
        &self.target
    }
}

impl fmt::Display for HookOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.name, self.target.binary_name())?;
        if !self.args.is_empty() {
            f.write_str(" [")?;
            for (idx, arg) in self.args.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn registry() -> (HookRegistry, SuffixDictionary) {
        let dog = TypeRef::new("com.zoo.Dog");
        let mut hooks = HookRegistry::new();
        hooks.register(&dog, ["dump", "watch"]);
        hooks.register(&dog, ["dump"]);
        let dict = ["com.zoo.Dog", "com.zoo.Bone", "a.Helper", "b.Helper"]
            .into_iter()
            .map(TypeRef::new)
            .collect();
        (hooks, dict)
    }

    #[test]
    fn lists_operations_and_misses_quietly() {
        let (hooks, _) = registry();
        assert_eq!(
            hooks.operations(&TypeRef::new("com.zoo.Dog")),
            vec!["dump".to_string(), "watch".to_string()]
        );
        assert!(hooks.operations(&TypeRef::new("com.zoo.Cat")).is_empty());
    }

    #[test]
    fn create_resolves_class_arguments() {
        let (hooks, dict) = registry();
        let dog = TypeRef::new("com.zoo.Dog");

        let op = hooks.create(&dog, "watch @Bone 3", &dict).unwrap();
        assert_eq!(op.name(), "watch");
        assert_eq!(op.target(), &dog);
        assert_eq!(op.to_string(), "watch on com.zoo.Dog [com.zoo.Bone, 3]");

        let err = hooks.create(&dog, "watch @Helper", &dict).err().unwrap();
        assert!(matches!(err, ScopeError::OperationFailed { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn create_rejects_unregistered_names() {
        let (hooks, dict) = registry();
        let err = hooks
            .create(&TypeRef::new("com.zoo.Dog"), "feed", &dict)
            .err().unwrap();
        assert!(matches!(
            err,
            ScopeError::UnknownReference {
                kind: RefKind::Operation,
                ..
            }
        ));
        assert!(NoOperations
            .create(&TypeRef::object(), "dump", &dict)
            .is_err());
    }
}
