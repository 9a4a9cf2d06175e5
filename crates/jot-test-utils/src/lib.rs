//! Utilities shared by jot tests.
//!
//! Tests exercise the class file reader and the classpath indexer against
//! real bytes. Rather than checking compiled fixtures into the repository,
//! [`ClassBuilder`] emits minimal but well-formed class files and
//! [`write_jar`] / [`write_class_dir`] lay them out on disk.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

#[derive(Debug, Clone)]
struct Member {
    access_flags: u16,
    name: String,
    descriptor: String,
}

/// Builder for a single class file.
///
/// Names are given in binary form (`com.example.Dog`) and converted to
/// internal form when written.
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    name: String,
    access_flags: u16,
    super_class: Option<String>,
    interfaces: Vec<String>,
    fields: Vec<Member>,
    methods: Vec<Member>,
}

impl ClassBuilder {
    pub fn class(binary_name: &str) -> Self {
        Self {
            name: binary_name.to_string(),
            access_flags: ACC_PUBLIC,
            super_class: Some("java.lang.Object".to_string()),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn interface(binary_name: &str) -> Self {
        Self {
            access_flags: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
            ..Self::class(binary_name)
        }
    }

    /// `java.lang.Object` itself has no super class.
    pub fn root(binary_name: &str) -> Self {
        Self {
            super_class: None,
            ..Self::class(binary_name)
        }
    }

    pub fn extends(mut self, binary_name: &str) -> Self {
        self.super_class = Some(binary_name.to_string());
        self
    }

    pub fn implements(mut self, binary_name: &str) -> Self {
        self.interfaces.push(binary_name.to_string());
        self
    }

    pub fn field(self, name: &str, descriptor: &str) -> Self {
        self.field_with_flags(name, descriptor, ACC_PUBLIC)
    }

    pub fn field_with_flags(mut self, name: &str, descriptor: &str, access_flags: u16) -> Self {
        self.fields.push(Member {
            access_flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        });
        self
    }

    pub fn method(mut self, name: &str, descriptor: &str) -> Self {
        self.methods.push(Member {
            access_flags: ACC_PUBLIC,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        });
        self
    }

    pub fn binary_name(&self) -> &str {
        &self.name
    }

    /// Path of the class inside a JAR or class directory.
    pub fn entry_name(&self) -> String {
        format!("{}.class", internal(&self.name))
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = PoolWriter::default();
        let this_class = pool.class(&internal(&self.name));
        let super_class = self
            .super_class
            .as_deref()
            .map(|name| pool.class(&internal(name)))
            .unwrap_or(0);
        let interfaces: Vec<u16> = self
            .interfaces
            .iter()
            .map(|name| pool.class(&internal(name)))
            .collect();
        let fields: Vec<(u16, u16, u16)> = self
            .fields
            .iter()
            .map(|m| (m.access_flags, pool.utf8(&m.name), pool.utf8(&m.descriptor)))
            .collect();
        let methods: Vec<(u16, u16, u16)> = self
            .methods
            .iter()
            .map(|m| (m.access_flags, pool.utf8(&m.name), pool.utf8(&m.descriptor)))
            .collect();
        let source_file_attr = pool.utf8("SourceFile");
        let simple = self.name.rsplit('.').next().unwrap_or(&self.name);
        let source_file = pool.utf8(&format!("{simple}.java"));
        // Exercises the two-slot constant layout.
        pool.long(0x0123_4567_89AB_CDEF);

        let mut out = Vec::new();
        put_u4(&mut out, 0xCAFE_BABE);
        put_u2(&mut out, 0);
        put_u2(&mut out, 52);
        out.extend_from_slice(&pool.finish());
        put_u2(&mut out, self.access_flags);
        put_u2(&mut out, this_class);
        put_u2(&mut out, super_class);
        put_u2(&mut out, interfaces.len() as u16);
        for index in interfaces {
            put_u2(&mut out, index);
        }
        for members in [fields, methods] {
            put_u2(&mut out, members.len() as u16);
            for (flags, name, descriptor) in members {
                put_u2(&mut out, flags);
                put_u2(&mut out, name);
                put_u2(&mut out, descriptor);
                put_u2(&mut out, 0);
            }
        }
        put_u2(&mut out, 1);
        put_u2(&mut out, source_file_attr);
        put_u4(&mut out, 2);
        put_u2(&mut out, source_file);
        out
    }
}

#[derive(Default)]
struct PoolWriter {
    bytes: Vec<u8>,
    next: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl PoolWriter {
    fn reserve(&mut self, slots: u16) -> u16 {
        if self.next == 0 {
            self.next = 1;
        }
        let index = self.next;
        self.next += slots;
        index
    }

    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(index) = self.utf8.get(value) {
            return *index;
        }
        let index = self.reserve(1);
        self.bytes.push(1);
        put_u2(&mut self.bytes, value.len() as u16);
        self.bytes.extend_from_slice(value.as_bytes());
        self.utf8.insert(value.to_string(), index);
        index
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(index) = self.classes.get(internal_name) {
            return *index;
        }
        let name_index = self.utf8(internal_name);
        let index = self.reserve(1);
        self.bytes.push(7);
        put_u2(&mut self.bytes, name_index);
        self.classes.insert(internal_name.to_string(), index);
        index
    }

    fn long(&mut self, value: u64) -> u16 {
        let index = self.reserve(2);
        self.bytes.push(5);
        self.bytes.extend_from_slice(&value.to_be_bytes());
        index
    }

    fn finish(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.bytes.len() + 2);
        put_u2(&mut out, self.next.max(1));
        out.extend_from_slice(&self.bytes);
        out
    }
}

fn internal(binary_name: &str) -> String {
    binary_name.replace('.', "/")
}

fn put_u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Write `classes` into a new JAR at `path` (with a manifest, like `jar` does).
pub fn write_jar(path: &Path, classes: &[ClassBuilder]) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    zip.start_file("META-INF/MANIFEST.MF", options)
        .map_err(io::Error::other)?;
    zip.write_all(b"Manifest-Version: 1.0\n")?;

    for class in classes {
        zip.start_file(class.entry_name(), options)
            .map_err(io::Error::other)?;
        zip.write_all(&class.build())?;
    }

    zip.finish().map_err(io::Error::other)?;
    Ok(())
}

/// Write `classes` as an exploded class directory rooted at `dir`.
pub fn write_class_dir(dir: &Path, classes: &[ClassBuilder]) -> io::Result<()> {
    for class in classes {
        let path = dir.join(class.entry_name());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, class.build())?;
    }
    Ok(())
}
