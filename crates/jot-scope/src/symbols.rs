//! Marker characters of the scope grammar.

/// `@Name` restricts member lookup to `Name`.
pub const CLASS: char = '@';
/// `%X` casts to the [`CastableType`](jot_types::CastableType) with symbol `X`.
pub const CAST: char = '%';
/// `:name` accesses a field.
pub const FIELD: char = ':';
/// `>name` calls a zero-argument accessor.
pub const GETTER: char = '>';
/// `!name args` invokes a registered operation on the current type.
pub const OPERATION: char = '!';
/// Joins segments when rendering a cascade.
pub const SEPARATOR: char = '/';

/// Rendered form of an empty cascade.
pub const ROOT: &str = "(Root)";

pub(crate) const MEMBER_MARKERS: [char; 2] = [FIELD, GETTER];
pub(crate) const SCOPE_MARKERS: [char; 4] = [CLASS, CAST, FIELD, GETTER];
