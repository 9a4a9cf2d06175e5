//! Type identities and metadata stubs shared across jot crates.
//!
//! A type universe is anything implementing [`InspectionProvider`]: the
//! classpath index built from JARs, or a [`TypeTable`] filled by hand. The
//! navigator only ever needs four capabilities from it: enumerate types,
//! list declared fields, list declared methods, and walk super types.
#![forbid(unsafe_code)]

mod cast;
mod table;
mod type_ref;

use jot_classfile::{ClassFile, ReturnType, ACC_INTERFACE};

pub use crate::cast::CastableType;
pub use crate::table::TypeTable;
pub use crate::type_ref::TypeRef;

/// Binary name of the implicit root of every class hierarchy.
pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeRef,
    pub access_flags: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<TypeRef>,
    /// `None` for `void`.
    pub return_type: Option<TypeRef>,
    pub access_flags: u16,
}

impl MethodDef {
    /// Zero-argument, value-returning, and not a constructor/initializer.
    pub fn is_accessor(&self) -> bool {
        self.params.is_empty() && self.return_type.is_some() && !self.name.starts_with('<')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub binary_name: String,
    pub access_flags: u16,
    pub super_binary_name: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDef>,
    pub methods: Vec<MethodDef>,
}

impl TypeDef {
    /// An empty class extending `java.lang.Object`, or the root class itself.
    pub fn new(binary_name: impl Into<String>) -> Self {
        let binary_name = binary_name.into();
        let super_binary_name = (binary_name != OBJECT).then(|| OBJECT.to_string());
        Self {
            binary_name,
            access_flags: 0,
            super_binary_name,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(&self.binary_name)
    }

    pub fn accessors(&self) -> impl Iterator<Item = &MethodDef> {
        self.methods.iter().filter(|m| m.is_accessor())
    }

    /// Convert a parsed class file into a stub, resolving every descriptor.
    pub fn from_classfile(class: &ClassFile) -> jot_classfile::Result<Self> {
        let fields = class
            .fields
            .iter()
            .map(|f| {
                Ok(FieldDef {
                    name: f.name.clone(),
                    ty: TypeRef::from_field_type(&f.field_type()?),
                    access_flags: f.access_flags,
                })
            })
            .collect::<jot_classfile::Result<Vec<_>>>()?;

        let methods = class
            .methods
            .iter()
            .map(|m| {
                let desc = m.method_descriptor()?;
                Ok(MethodDef {
                    name: m.name.clone(),
                    params: desc.params.iter().map(TypeRef::from_field_type).collect(),
                    return_type: match &desc.return_type {
                        ReturnType::Void => None,
                        ReturnType::Type(ty) => Some(TypeRef::from_field_type(ty)),
                    },
                    access_flags: m.access_flags,
                })
            })
            .collect::<jot_classfile::Result<Vec<_>>>()?;

        Ok(Self {
            binary_name: internal_name_to_binary(&class.this_class),
            access_flags: class.access_flags,
            super_binary_name: class.super_class.as_deref().map(internal_name_to_binary),
            interfaces: class
                .interfaces
                .iter()
                .map(|i| internal_name_to_binary(i))
                .collect(),
            fields,
            methods,
        })
    }
}

pub fn internal_name_to_binary(internal: &str) -> String {
    internal.replace('/', ".")
}

/// Read-only view over a type universe.
pub trait InspectionProvider {
    fn lookup_type(&self, binary_name: &str) -> Option<&TypeDef>;

    /// Every type in the universe, in a stable order.
    fn type_names(&self) -> Vec<String>;
}

impl<T: InspectionProvider + ?Sized> InspectionProvider for &T {
    fn lookup_type(&self, binary_name: &str) -> Option<&TypeDef> {
        (**self).lookup_type(binary_name)
    }

    fn type_names(&self) -> Vec<String> {
        (**self).type_names()
    }
}
