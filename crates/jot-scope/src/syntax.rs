//! Textual form of a scope line.
//!
//! ```text
//! scope   := CAST | [CLASS] (FIELD | GETTER)
//! CAST    := '%' type-symbol
//! CLASS   := '@' suffix-name
//! FIELD   := ':' field-name
//! GETTER  := '>' getter-name
//! ```
//!
//! Parsing is purely structural: every shape error (too many components, a
//! missing member, a malformed cast) is reported here, before any name is
//! looked up. A qualifier is taken verbatim up to the first member marker.

use jot_types::CastableType;

use crate::error::ScopeError;
use crate::symbols::{CAST, CLASS, FIELD, GETTER, MEMBER_MARKERS, SCOPE_MARKERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Getter,
}

impl MemberKind {
    pub fn marker(self) -> char {
        match self {
            MemberKind::Field => FIELD,
            MemberKind::Getter => GETTER,
        }
    }

    fn from_marker(marker: char) -> Option<Self> {
        match marker {
            FIELD => Some(MemberKind::Field),
            GETTER => Some(MemberKind::Getter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSyntax {
    Cast(CastableType),
    Member {
        /// Suffix name following the class marker, if any.
        qualifier: Option<String>,
        kind: MemberKind,
        name: String,
    },
}

impl ScopeSyntax {
    pub fn parse(line: &str) -> Result<Self, ScopeError> {
        let mut chars = line.chars();
        match chars.next() {
            Some(CAST) => parse_cast(line, chars.as_str()),
            Some(CLASS) => {
                let rest = chars.as_str();
                // The qualifier runs up to the first member marker; whatever
                // it contains is left to the dictionary.
                let Some(split) = rest.find(MEMBER_MARKERS) else {
                    return Err(ScopeError::IncompleteScope(line.to_owned()));
                };
                let qualifier = &rest[..split];
                if qualifier.is_empty() {
                    return Err(ScopeError::IncompleteScope(line.to_owned()));
                }
                parse_member(line, Some(qualifier), &rest[split..])
            }
            Some(FIELD | GETTER) => parse_member(line, None, line),
            _ => Err(ScopeError::MalformedScope(line.to_owned())),
        }
    }
}

fn parse_cast(line: &str, body: &str) -> Result<ScopeSyntax, ScopeError> {
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => CastableType::from_symbol(symbol)
            .map(ScopeSyntax::Cast)
            .ok_or_else(|| ScopeError::InvalidTypeCast(line.to_owned())),
        _ => Err(ScopeError::InvalidTypeCast(line.to_owned())),
    }
}

/// `member` starts with a field or getter marker.
fn parse_member(
    line: &str,
    qualifier: Option<&str>,
    member: &str,
) -> Result<ScopeSyntax, ScopeError> {
    let mut chars = member.chars();
    let kind = chars
        .next()
        .and_then(MemberKind::from_marker)
        .ok_or_else(|| ScopeError::MalformedScope(line.to_owned()))?;
    let name = chars.as_str();
    if name.contains(SCOPE_MARKERS) {
        return Err(ScopeError::ExcessiveScope(line.to_owned()));
    }
    if name.is_empty() {
        return Err(ScopeError::IncompleteScope(line.to_owned()));
    }
    Ok(ScopeSyntax::Member {
        qualifier: qualifier.map(str::to_owned),
        kind,
        name: name.to_owned(),
    })
}
