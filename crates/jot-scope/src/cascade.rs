use jot_types::TypeRef;

use crate::dictionary::SuffixDictionary;
use crate::error::ScopeError;
use crate::segment::ScopeSegment;
use crate::symbols::{ROOT, SEPARATOR};

/// Stack of resolved segments leading from the tap type to the current type.
#[derive(Debug, Clone)]
pub struct ScopeCascade {
    tap: TypeRef,
    segments: Vec<ScopeSegment>,
    /// Current type after each pushed segment.
    types: Vec<TypeRef>,
}

impl ScopeCascade {
    pub fn new(tap: TypeRef) -> Self {
        Self {
            tap,
            segments: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Push `segment` and return the new current type.
    ///
    /// Segments without a target type are rejected and leave the cascade as
    /// it was.
    pub fn push(&mut self, segment: ScopeSegment) -> Result<&TypeRef, ScopeError> {
        let Some(next) = segment.target_type() else {
            return Err(ScopeError::InternalInvariantViolation(format!(
                "segment {segment:?} has no target type"
            )));
        };
        self.segments.push(segment);
        self.types.push(next);
        Ok(self.current())
    }

    pub fn pop(&mut self) -> Option<ScopeSegment> {
        let segment = self.segments.pop()?;
        self.types.pop();
        Some(segment)
    }

    pub fn current(&self) -> &TypeRef {
        self.types.last().unwrap_or(&self.tap)
    }

    pub fn tap(&self) -> &TypeRef {
        &self.tap
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[ScopeSegment] {
        &self.segments
    }

    /// `(Root)` when empty, else the segments joined by `/`.
    pub fn render(&self, dictionary: &SuffixDictionary) -> String {
        if self.segments.is_empty() {
            return ROOT.to_owned();
        }
        let mut out = String::new();
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                out.push(SEPARATOR);
            }
            out.push_str(&segment.render(dictionary));
        }
        out
    }
}
