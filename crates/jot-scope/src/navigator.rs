use jot_types::{InspectionProvider, TypeRef};

use crate::ancestry::AncestryIndex;
use crate::cascade::ScopeCascade;
use crate::complete::CompletionContext;
use crate::dictionary::SuffixDictionary;
use crate::error::ScopeError;
use crate::gateway::OperationGateway;
use crate::resolve::Resolver;
use crate::segment::ScopeSegment;

/// Navigation state over one type universe.
///
/// The universe dictionary names every loaded type plus the base types. The
/// scope dictionary only covers the target package and is what qualifiers
/// and class completion see.
pub struct Navigator {
    provider: Box<dyn InspectionProvider>,
    universe: SuffixDictionary,
    scope: SuffixDictionary,
    package: Option<String>,
    ancestry: AncestryIndex,
    cascade: ScopeCascade,
}

impl Navigator {
    /// Set up navigation from `tap` (default `java.lang.Object`).
    ///
    /// Without `package`, a tap outside the base types scopes navigation to
    /// its own package; otherwise the whole universe is in scope.
    pub fn new(
        provider: Box<dyn InspectionProvider>,
        tap: Option<&str>,
        package: Option<&str>,
    ) -> Result<Self, ScopeError> {
        let type_names = provider.type_names();
        Self::with_universe(provider, type_names, tap, package)
    }

    /// Like [`new`](Self::new), but only `type_names` are nameable. The
    /// provider may know more types (a runtime library, say) that are still
    /// used to resolve super types and members.
    pub fn with_universe(
        provider: Box<dyn InspectionProvider>,
        type_names: Vec<String>,
        tap: Option<&str>,
        package: Option<&str>,
    ) -> Result<Self, ScopeError> {
        let mut universe: SuffixDictionary = TypeRef::base_types().into_iter().collect();
        universe.extend(type_names.iter().map(|name| TypeRef::new(name)));
        tracing::info!(target: "jot.scope", types = universe.len(), "loaded {} types", universe.len());

        let tap = match tap {
            Some(name) => {
                let ty = universe.get(name)?;
                tracing::info!(target: "jot.scope", "located tap type '{}' ({})", universe.short_name(&ty), ty.binary_name());
                ty
            }
            None => TypeRef::object(),
        };

        let package = match package {
            Some(package) => Some(package.to_owned()),
            None if !tap.is_base() => tap.package().map(str::to_owned),
            None => None,
        };

        let scope = match &package {
            Some(package) => {
                let scope: SuffixDictionary = type_names
                    .iter()
                    .filter(|name| in_package(name, package))
                    .map(|name| TypeRef::new(name))
                    .collect();
                tracing::info!(
                    target: "jot.scope",
                    types = scope.len(),
                    "loaded {} types under target package '{}'",
                    scope.len(),
                    package
                );
                scope
            }
            None => universe.clone(),
        };

        let ancestry = AncestryIndex::build(&*provider, scope.iter());

        Ok(Self {
            provider,
            universe,
            scope,
            package,
            ancestry,
            cascade: ScopeCascade::new(tap),
        })
    }

    /// Resolve `line` against the current type and descend into it.
    pub fn navigate(&mut self, line: &str) -> Result<&TypeRef, ScopeError> {
        let segment =
            Resolver::new(&*self.provider, &self.scope).resolve_line(line, self.cascade.current())?;
        self.cascade.push(segment)
    }

    /// Step back one level; `None` at the root.
    pub fn back(&mut self) -> Option<ScopeSegment> {
        self.cascade.pop()
    }

    pub fn tap(&self) -> &TypeRef {
        self.cascade.tap()
    }

    pub fn current(&self) -> &TypeRef {
        self.cascade.current()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn provider(&self) -> &dyn InspectionProvider {
        &*self.provider
    }

    pub fn universe(&self) -> &SuffixDictionary {
        &self.universe
    }

    pub fn scope_dictionary(&self) -> &SuffixDictionary {
        &self.scope
    }

    pub fn ancestry(&self) -> &AncestryIndex {
        &self.ancestry
    }

    pub fn cascade(&self) -> &ScopeCascade {
        &self.cascade
    }

    /// Rendered cascade followed by the current type in brackets.
    pub fn render_scope(&self) -> String {
        format!(
            "{} [{}]",
            self.cascade.render(&self.scope),
            self.scope.short_name(self.current())
        )
    }

    pub fn completion_context<'a>(
        &'a self,
        gateway: &'a dyn OperationGateway,
    ) -> CompletionContext<'a> {
        CompletionContext {
            provider: &*self.provider,
            dictionary: &self.scope,
            ancestry: &self.ancestry,
            current: self.cascade.current(),
            gateway,
        }
    }
}

/// `name` lies in `package` or one of its sub-packages.
fn in_package(name: &str, package: &str) -> bool {
    package.is_empty()
        || name
            .strip_prefix(package)
            .is_some_and(|rest| rest.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_membership_includes_sub_packages() {
        assert!(in_package("com.zoo.Dog", "com.zoo"));
        assert!(in_package("com.zoo.wild.Wolf", "com.zoo"));
        assert!(!in_package("com.zookeeper.Keeper", "com.zoo"));
        assert!(in_package("Toplevel", ""));
    }
}
