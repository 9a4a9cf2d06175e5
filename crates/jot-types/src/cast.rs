use crate::TypeRef;

/// Fixed targets of a type-cast scope, each addressed by one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastableType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Text,
}

impl CastableType {
    pub const ALL: [CastableType; 9] = [
        CastableType::Boolean,
        CastableType::Byte,
        CastableType::Char,
        CastableType::Short,
        CastableType::Int,
        CastableType::Long,
        CastableType::Float,
        CastableType::Double,
        CastableType::Text,
    ];

    /// JVM descriptor letters for primitives, `T` for text.
    pub fn symbol(self) -> char {
        match self {
            CastableType::Boolean => 'Z',
            CastableType::Byte => 'B',
            CastableType::Char => 'C',
            CastableType::Short => 'S',
            CastableType::Int => 'I',
            CastableType::Long => 'J',
            CastableType::Float => 'F',
            CastableType::Double => 'D',
            CastableType::Text => 'T',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.symbol() == symbol)
    }

    pub fn target(self) -> TypeRef {
        TypeRef::new(match self {
            CastableType::Boolean => "boolean",
            CastableType::Byte => "byte",
            CastableType::Char => "char",
            CastableType::Short => "short",
            CastableType::Int => "int",
            CastableType::Long => "long",
            CastableType::Float => "float",
            CastableType::Double => "double",
            CastableType::Text => crate::STRING,
        })
    }
}
