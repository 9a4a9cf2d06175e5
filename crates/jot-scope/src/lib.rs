//! Scope path engine.
//!
//! A scope line such as `@Dog>bark` or `%I` describes one step from the
//! current type to a derived type. [`Navigator`] resolves lines against a
//! type universe and keeps the resulting [`ScopeCascade`]; [`Session`] wraps
//! it in the console line protocol, and [`CompletionEngines`] proposes
//! continuations for partial lines.

#![forbid(unsafe_code)]

pub mod ancestry;
pub mod cascade;
pub mod complete;
pub mod dictionary;
pub mod error;
pub mod gateway;
mod members;
pub mod navigator;
pub mod resolve;
pub mod segment;
pub mod session;
pub mod symbols;
pub mod syntax;

pub use crate::ancestry::AncestryIndex;
pub use crate::cascade::ScopeCascade;
pub use crate::complete::{CompletionContext, CompletionEngine, CompletionEngines};
pub use crate::dictionary::SuffixDictionary;
pub use crate::error::{RefKind, ScopeError};
pub use crate::gateway::{
    HookArg, HookOperation, HookRegistry, NoOperations, Operation, OperationGateway,
};
pub use crate::navigator::Navigator;
pub use crate::resolve::Resolver;
pub use crate::segment::{MemberAccess, ScopeSegment};
pub use crate::session::{LineOutcome, Session};
pub use crate::syntax::{MemberKind, ScopeSyntax};
