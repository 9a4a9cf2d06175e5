use jot_types::{CastableType, TypeRef};

use crate::dictionary::SuffixDictionary;
use crate::symbols::{CAST, CLASS, FIELD, GETTER};

/// A resolved field or accessor step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAccess {
    /// Class qualifier given on the line, if any.
    pub qualifier: Option<TypeRef>,
    /// Type declaring the member (may be a super type of the lookup type).
    pub owner: TypeRef,
    pub name: String,
    /// Field type, or accessor return type.
    pub ty: TypeRef,
}

/// One resolved unit of navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSegment {
    ClassOverride(TypeRef),
    Field(MemberAccess),
    Getter(MemberAccess),
    TypeCast(CastableType),
}

impl ScopeSegment {
    /// Type this segment navigates to. A bare class override only restricts
    /// lookups and has none.
    pub fn target_type(&self) -> Option<TypeRef> {
        match self {
            ScopeSegment::TypeCast(cast) => Some(cast.target()),
            ScopeSegment::Field(access) | ScopeSegment::Getter(access) => Some(access.ty.clone()),
            ScopeSegment::ClassOverride(_) => None,
        }
    }

    pub fn render(&self, dictionary: &SuffixDictionary) -> String {
        let member = |marker: char, access: &MemberAccess| {
            let mut out = String::new();
            if let Some(qualifier) = &access.qualifier {
                out.push(CLASS);
                out.push_str(&dictionary.short_name(qualifier));
            }
            out.push(marker);
            out.push_str(&access.name);
            out
        };
        match self {
            ScopeSegment::TypeCast(cast) => format!("{CAST}{}", cast.symbol()),
            ScopeSegment::ClassOverride(ty) => format!("{CLASS}{}", dictionary.short_name(ty)),
            ScopeSegment::Field(access) => member(FIELD, access),
            ScopeSegment::Getter(access) => member(GETTER, access),
        }
    }
}
