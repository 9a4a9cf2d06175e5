//! Field and method descriptors (JVMS §4.3).

use std::str::Chars;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn from_descriptor(code: char) -> Option<Self> {
        Some(match code {
            'B' => BaseType::Byte,
            'C' => BaseType::Char,
            'D' => BaseType::Double,
            'F' => BaseType::Float,
            'I' => BaseType::Int,
            'J' => BaseType::Long,
            'S' => BaseType::Short,
            'Z' => BaseType::Boolean,
            _ => return None,
        })
    }

    /// The Java keyword naming this primitive.
    pub fn java_name(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Base(BaseType),
    /// Internal name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Source-style binary name: `int`, `java.lang.String`, `java.util.Map$Entry[][]`.
    pub fn java_name(&self) -> String {
        let mut dims = 0;
        let mut element = self;
        let mut name = loop {
            match element {
                FieldType::Array(inner) => {
                    dims += 1;
                    element = inner;
                }
                FieldType::Base(base) => break base.java_name().to_owned(),
                FieldType::Object(internal) => break internal.replace('/', "."),
            }
        };
        name.push_str(&"[]".repeat(dims));
        name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

/// Walks one descriptor string; every failure reports the whole descriptor.
struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars(),
        }
    }

    fn invalid(&self) -> Error {
        Error::InvalidDescriptor(self.source.to_owned())
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn field_type(&mut self) -> Result<FieldType> {
        let mut dims = 0usize;
        while self.eat('[') {
            dims += 1;
        }
        let code = self.chars.next().ok_or_else(|| self.invalid())?;
        let mut ty = match code {
            'L' => {
                let rest = self.chars.as_str();
                let end = rest.find(';').filter(|&end| end > 0).ok_or_else(|| self.invalid())?;
                self.chars = rest[end + 1..].chars();
                FieldType::Object(rest[..end].to_owned())
            }
            other => FieldType::Base(BaseType::from_descriptor(other).ok_or_else(|| self.invalid())?),
        };
        for _ in 0..dims {
            ty = FieldType::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn finish<T>(self, value: T) -> Result<T> {
        if self.chars.as_str().is_empty() {
            Ok(value)
        } else {
            Err(self.invalid())
        }
    }
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let mut cursor = Cursor::new(desc);
    let ty = cursor.field_type()?;
    cursor.finish(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let mut cursor = Cursor::new(desc);
    if !cursor.eat('(') {
        return Err(cursor.invalid());
    }
    let mut params = Vec::new();
    while !cursor.eat(')') {
        if cursor.peek().is_none() {
            return Err(cursor.invalid());
        }
        params.push(cursor.field_type()?);
    }
    let return_type = if cursor.eat('V') {
        ReturnType::Void
    } else {
        ReturnType::Type(cursor.field_type()?)
    };
    cursor.finish(MethodDescriptor {
        params,
        return_type,
    })
}
