//! Reader for the subset of the JVM class file format that jot needs to
//! navigate a type universe: class names, the super class, implemented
//! interfaces, and declared fields and methods with their descriptors.
//!
//! Attributes (code, annotations, generic signatures, ...) are skipped.
#![forbid(unsafe_code)]

mod classfile;
mod constant_pool;
mod descriptor;
mod error;
mod reader;

pub use crate::classfile::{ClassFile, ClassMember, ACC_INTERFACE};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
