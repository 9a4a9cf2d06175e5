//! Context-sensitive completion of partial scope lines.
//!
//! Each engine looks at the buffer up to the cursor and either declines
//! (returns nothing) or proposes full replacement lines. Engines never mutate
//! navigation state; the only state they own is their [`CompletionCache`].

mod cache;

use jot_types::{CastableType, InspectionProvider, TypeRef};

use crate::ancestry::AncestryIndex;
use crate::dictionary::SuffixDictionary;
use crate::gateway::OperationGateway;
use crate::members;
use crate::symbols::{CAST, CLASS, FIELD, GETTER, MEMBER_MARKERS, OPERATION};
use crate::syntax::MemberKind;

pub use self::cache::CompletionCache;

/// Read-only view of the navigator handed to every engine.
#[derive(Clone, Copy)]
pub struct CompletionContext<'a> {
    pub provider: &'a dyn InspectionProvider,
    /// Dictionary qualifiers resolve against (the scope dictionary).
    pub dictionary: &'a SuffixDictionary,
    pub ancestry: &'a AncestryIndex,
    pub current: &'a TypeRef,
    pub gateway: &'a dyn OperationGateway,
}

pub trait CompletionEngine {
    /// Candidates for `line`, empty to decline.
    fn complete(&mut self, cx: &CompletionContext<'_>, line: &str) -> Vec<String>;
}

/// `lead + name` for each name starting with `partial`.
///
/// A lone candidate equal to the input is dropped: there is nothing left to
/// complete.
fn narrow<'n>(
    names: impl IntoIterator<Item = &'n String>,
    lead: &str,
    partial: &str,
    line: &str,
) -> Vec<String> {
    let candidates: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(partial))
        .map(|name| format!("{lead}{name}"))
        .collect();
    match candidates.as_slice() {
        [only] if only == line => Vec::new(),
        _ => candidates,
    }
}

/// `@Name` candidates drawn from the descendants of the current type.
#[derive(Debug, Default)]
pub struct ClassCompletion {
    cache: CompletionCache,
}

impl ClassCompletion {
    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }
}

impl CompletionEngine for ClassCompletion {
    fn complete(&mut self, cx: &CompletionContext<'_>, line: &str) -> Vec<String> {
        let Some(partial) = line.strip_prefix(CLASS) else {
            return Vec::new();
        };
        if partial.contains(MEMBER_MARKERS) {
            return Vec::new();
        }
        let names = self.cache.get_or_compute(cx.current, || {
            let descendants = cx.ancestry.descendants(cx.current);
            tracing::trace!(
                target: "jot.complete",
                count = descendants.len(),
                "loaded derivative classes"
            );
            descendants
                .iter()
                .map(|ty| cx.dictionary.short_name(ty))
                .collect()
        });
        narrow(names, &line[..line.len() - partial.len()], partial, line)
    }
}

/// Field (`:`) or accessor (`>`) names of the working type.
///
/// The working type is the `@` qualifier when present, which must name
/// exactly one type, otherwise the current type.
#[derive(Debug)]
pub struct MemberCompletion {
    kind: MemberKind,
    cache: CompletionCache,
}

impl MemberCompletion {
    pub fn new(kind: MemberKind) -> Self {
        Self {
            kind,
            cache: CompletionCache::new(),
        }
    }

    pub fn fields() -> Self {
        Self::new(MemberKind::Field)
    }

    pub fn getters() -> Self {
        Self::new(MemberKind::Getter)
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }
}

impl CompletionEngine for MemberCompletion {
    fn complete(&mut self, cx: &CompletionContext<'_>, line: &str) -> Vec<String> {
        let marker = self.kind.marker();
        let Some(idx) = line.find(marker) else {
            return Vec::new();
        };

        let working = match line.strip_prefix(CLASS) {
            Some(rest) => {
                let qualifier = &rest[..idx - CLASS.len_utf8()];
                if !cx.dictionary.is_known(qualifier) || cx.dictionary.is_ambiguous(qualifier) {
                    return Vec::new();
                }
                match cx.dictionary.get(qualifier) {
                    Ok(ty) => ty,
                    Err(_) => return Vec::new(),
                }
            }
            None if idx == 0 => cx.current.clone(),
            None => return Vec::new(),
        };
        if line[..idx].contains(MEMBER_MARKERS) {
            return Vec::new();
        }

        let kind = self.kind;
        let names = self.cache.get_or_compute(&working, || {
            let names = match kind {
                MemberKind::Field => members::field_names(cx.provider, &working),
                MemberKind::Getter => members::accessor_names(cx.provider, &working),
            };
            tracing::trace!(
                target: "jot.complete",
                ty = %working.binary_name(),
                count = names.len(),
                "loaded {:?} names",
                kind
            );
            names
        });

        let lead = &line[..idx + marker.len_utf8()];
        narrow(names, lead, &line[lead.len()..], line)
    }
}

/// Leading markers on an empty line, member markers after a complete
/// `@Name`.
#[derive(Debug, Default)]
pub struct SymbolCompletion;

impl CompletionEngine for SymbolCompletion {
    fn complete(&mut self, cx: &CompletionContext<'_>, line: &str) -> Vec<String> {
        if line.is_empty() {
            return [CLASS, CAST, FIELD, GETTER]
                .iter()
                .map(char::to_string)
                .collect();
        }
        let Some(name) = line.strip_prefix(CLASS) else {
            return Vec::new();
        };
        if name.contains(MEMBER_MARKERS)
            || !cx.dictionary.is_known(name)
            || cx.dictionary.is_ambiguous(name)
        {
            return Vec::new();
        }
        vec![format!("{line}{FIELD}"), format!("{line}{GETTER}")]
    }
}

/// Every cast target, offered once the cast marker alone has been typed.
#[derive(Debug, Default)]
pub struct TypeCastCompletion;

impl CompletionEngine for TypeCastCompletion {
    fn complete(&mut self, _cx: &CompletionContext<'_>, line: &str) -> Vec<String> {
        if line.strip_prefix(CAST) != Some("") {
            return Vec::new();
        }
        CastableType::ALL
            .iter()
            .map(|ty| format!("{CAST}{}", ty.symbol()))
            .collect()
    }
}

/// Operation names the gateway registers for the current type.
#[derive(Debug, Default)]
pub struct OperationCompletion {
    cache: CompletionCache,
}

impl OperationCompletion {
    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }
}

impl CompletionEngine for OperationCompletion {
    fn complete(&mut self, cx: &CompletionContext<'_>, line: &str) -> Vec<String> {
        let names = self.cache.get_or_compute(cx.current, || {
            cx.gateway.operations(cx.current).into_iter().collect()
        });
        if line.is_empty() {
            if names.is_empty() {
                return Vec::new();
            }
            return vec![OPERATION.to_string()];
        }
        let Some(partial) = line.strip_prefix(OPERATION) else {
            return Vec::new();
        };
        if partial.contains(char::is_whitespace) {
            return Vec::new();
        }
        narrow(names, &line[..line.len() - partial.len()], partial, line)
    }
}

/// Accepts a line for completion once any engine has proposed something.
#[derive(Debug, Default)]
pub struct ReadinessCompletion;

impl ReadinessCompletion {
    pub fn is_ready(&self, candidates: &[String]) -> bool {
        !candidates.is_empty()
    }
}

/// All engines, run in registration order.
#[derive(Debug)]
pub struct CompletionEngines {
    pub symbols: SymbolCompletion,
    pub classes: ClassCompletion,
    pub fields: MemberCompletion,
    pub getters: MemberCompletion,
    pub casts: TypeCastCompletion,
    pub operations: OperationCompletion,
    pub readiness: ReadinessCompletion,
}

impl Default for CompletionEngines {
    fn default() -> Self {
        Self {
            symbols: SymbolCompletion,
            classes: ClassCompletion::default(),
            fields: MemberCompletion::fields(),
            getters: MemberCompletion::getters(),
            casts: TypeCastCompletion,
            operations: OperationCompletion::default(),
            readiness: ReadinessCompletion,
        }
    }
}

impl CompletionEngines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merged candidates for `line`, or `None` when every engine declined.
    pub fn complete(&mut self, cx: &CompletionContext<'_>, line: &str) -> Option<Vec<String>> {
        let engines: [&mut dyn CompletionEngine; 6] = [
            &mut self.symbols,
            &mut self.classes,
            &mut self.fields,
            &mut self.getters,
            &mut self.casts,
            &mut self.operations,
        ];
        let mut candidates = Vec::new();
        for engine in engines {
            candidates.extend(engine.complete(cx, line));
        }
        self.readiness.is_ready(&candidates).then_some(candidates)
    }

    /// Drop every cached candidate set.
    pub fn invalidate(&mut self) {
        self.classes.cache.invalidate();
        self.fields.cache.invalidate();
        self.getters.cache.invalidate();
        self.operations.cache.invalidate();
    }
}
