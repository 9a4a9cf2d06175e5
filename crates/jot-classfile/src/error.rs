use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a class file (or one of its descriptors) could not be read.
#[derive(Debug, Error)]
pub enum Error {
    #[error("class file ended early")]
    UnexpectedEof,
    #[error("class file has {0} bytes past its last attribute")]
    TrailingBytes(usize),
    #[error("not a class file (magic {0:#010x})")]
    InvalidMagic(u32),
    #[error("constant #{0} does not exist")]
    InvalidConstantPoolIndex(u16),
    #[error("unsupported constant tag {0}")]
    InvalidConstantPoolTag(u8),
    #[error("constant #{index} is a {found}, wanted a {expected}")]
    ConstantPoolTypeMismatch {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },
    #[error("malformed modified UTF-8 in constant pool")]
    InvalidModifiedUtf8,
    #[error("cannot decode descriptor `{0}`")]
    InvalidDescriptor(String),
}
