use jot_types::{InspectionProvider, TypeRef};

use crate::dictionary::SuffixDictionary;
use crate::error::{RefKind, ScopeError};
use crate::members::{find_accessor, find_field};
use crate::segment::{MemberAccess, ScopeSegment};
use crate::syntax::{MemberKind, ScopeSyntax};

/// Turns scope lines into segments relative to a current type.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    provider: &'a dyn InspectionProvider,
    dictionary: &'a SuffixDictionary,
}

impl<'a> Resolver<'a> {
    pub fn new(provider: &'a dyn InspectionProvider, dictionary: &'a SuffixDictionary) -> Self {
        Self {
            provider,
            dictionary,
        }
    }

    /// Parse and resolve one line. Never returns a partial segment.
    pub fn resolve_line(&self, line: &str, current: &TypeRef) -> Result<ScopeSegment, ScopeError> {
        self.resolve(&ScopeSyntax::parse(line)?, current)
    }

    pub fn resolve(
        &self,
        syntax: &ScopeSyntax,
        current: &TypeRef,
    ) -> Result<ScopeSegment, ScopeError> {
        let (qualifier, kind, name) = match syntax {
            ScopeSyntax::Cast(cast) => return Ok(ScopeSegment::TypeCast(*cast)),
            ScopeSyntax::Member {
                qualifier,
                kind,
                name,
            } => (qualifier, *kind, name.as_str()),
        };

        let qualifier = qualifier
            .as_deref()
            .map(|suffix| self.dictionary.get(suffix))
            .transpose()?;
        let lookup = qualifier.as_ref().unwrap_or(current);

        let access = match kind {
            MemberKind::Field => {
                let (owner, field) = find_field(self.provider, lookup, name)
                    .ok_or_else(|| ScopeError::unknown(RefKind::Field, qualified(lookup, name)))?;
                MemberAccess {
                    qualifier: qualifier.clone(),
                    owner: owner.type_ref(),
                    name: field.name.clone(),
                    ty: field.ty.clone(),
                }
            }
            MemberKind::Getter => {
                let (owner, getter) = find_accessor(self.provider, lookup, name)
                    .ok_or_else(|| ScopeError::unknown(RefKind::Getter, qualified(lookup, name)))?;
                // `find_accessor` only yields value-returning methods.
                let ty = getter.return_type.clone().ok_or_else(|| {
                    ScopeError::InternalInvariantViolation(format!(
                        "accessor {name} of {} returns void",
                        owner.binary_name
                    ))
                })?;
                MemberAccess {
                    qualifier: qualifier.clone(),
                    owner: owner.type_ref(),
                    name: getter.name.clone(),
                    ty,
                }
            }
        };

        tracing::debug!(
            target: "jot.scope",
            owner = %access.owner.binary_name(),
            member = %access.name,
            ty = %access.ty.binary_name(),
            "resolved scope"
        );

        Ok(match kind {
            MemberKind::Field => ScopeSegment::Field(access),
            MemberKind::Getter => ScopeSegment::Getter(access),
        })
    }
}

fn qualified(ty: &TypeRef, member: &str) -> String {
    format!("{}.{member}", ty.binary_name())
}
