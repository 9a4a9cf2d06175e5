use crate::constant_pool::ConstantPool;
use crate::descriptor::{parse_field_descriptor, parse_method_descriptor, FieldType, MethodDescriptor};
use crate::error::{Error, Result};
use crate::reader::Reader;

const MAGIC: u32 = 0xCAFE_BABE;

pub const ACC_INTERFACE: u16 = 0x0200;

/// The header, hierarchy and member tables of one class.
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access_flags: u16,
    /// Internal name (`com/zoo/Dog`).
    pub this_class: String,
    /// `None` only for `java/lang/Object`.
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<ClassMember>,
    pub methods: Vec<ClassMember>,
}

/// A field or method entry; its attributes are not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
}

impl ClassMember {
    pub fn field_type(&self) -> Result<FieldType> {
        parse_field_descriptor(&self.descriptor)
    }

    pub fn method_descriptor(&self) -> Result<MethodDescriptor> {
        parse_method_descriptor(&self.descriptor)
    }
}

impl ClassFile {
    /// Parse a complete class file. Bytes after the class attributes are an
    /// error.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        match reader.read_u4()? {
            MAGIC => {}
            other => return Err(Error::InvalidMagic(other)),
        }
        let minor_version = reader.read_u2()?;
        let major_version = reader.read_u2()?;
        let pool = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.read_u2()?;
        let this_class = pool.get_class_name(reader.read_u2()?)?;
        let super_class = match reader.read_u2()? {
            0 => None,
            index => Some(pool.get_class_name(index)?),
        };
        let interfaces = read_table(&mut reader, |r| pool.get_class_name(r.read_u2()?))?;
        let fields = read_table(&mut reader, |r| read_member(r, &pool))?;
        let methods = read_table(&mut reader, |r| read_member(r, &pool))?;
        skip_attribute_table(&mut reader)?;
        reader.ensure_empty()?;

        Ok(Self {
            minor_version,
            major_version,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
        })
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }
}

/// A `u2` count followed by that many entries.
fn read_table<'a, T>(
    reader: &mut Reader<'a>,
    mut entry: impl FnMut(&mut Reader<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let count = reader.read_u2()?;
    (0..count).map(|_| entry(reader)).collect()
}

fn read_member(reader: &mut Reader<'_>, pool: &ConstantPool) -> Result<ClassMember> {
    let access_flags = reader.read_u2()?;
    let name = pool.get_utf8(reader.read_u2()?)?.to_owned();
    let descriptor = pool.get_utf8(reader.read_u2()?)?.to_owned();
    skip_attribute_table(reader)?;
    Ok(ClassMember {
        access_flags,
        name,
        descriptor,
    })
}

fn skip_attribute_table(reader: &mut Reader<'_>) -> Result<()> {
    read_table(reader, |r| {
        r.read_u2()?;
        let len = r.read_u4()?;
        r.skip(len as usize)
    })
    .map(drop)
}
