#![allow(dead_code)]

use jot_types::{FieldDef, MethodDef, TypeDef, TypeRef, TypeTable};

const ACC_INTERFACE: u16 = 0x0200;
const ACC_ABSTRACT: u16 = 0x0400;

pub struct Stub(TypeDef);

impl Stub {
    pub fn class(name: &str) -> Self {
        Self(TypeDef::new(name))
    }

    pub fn interface(name: &str) -> Self {
        let mut def = TypeDef::new(name);
        def.access_flags = ACC_INTERFACE | ACC_ABSTRACT;
        Self(def)
    }

    pub fn extends(mut self, name: &str) -> Self {
        self.0.super_binary_name = Some(name.to_string());
        self
    }

    pub fn implements(mut self, name: &str) -> Self {
        self.0.interfaces.push(name.to_string());
        self
    }

    pub fn field(mut self, name: &str, ty: &str) -> Self {
        self.0.fields.push(FieldDef {
            name: name.to_string(),
            ty: TypeRef::new(ty),
            access_flags: 0,
        });
        self
    }

    pub fn getter(self, name: &str, ty: &str) -> Self {
        self.method(name, &[], Some(ty))
    }

    pub fn method(mut self, name: &str, params: &[&str], ret: Option<&str>) -> Self {
        self.0.methods.push(MethodDef {
            name: name.to_string(),
            params: params.iter().map(|p| TypeRef::new(p)).collect(),
            return_type: ret.map(TypeRef::new),
            access_flags: 0,
        });
        self
    }

    pub fn build(self) -> TypeDef {
        self.0
    }
}

/// `Dog` reaches `Pet` through `Animal` and again through `Loud`.
pub fn zoo() -> TypeTable {
    [
        Stub::class("com.zoo.Animal")
            .implements("com.zoo.Pet")
            .field("name", "java.lang.String")
            .field("age", "int")
            .getter("getName", "java.lang.String"),
        Stub::interface("com.zoo.Pet").getter("owner", "com.zoo.Keeper"),
        Stub::interface("com.zoo.Loud")
            .implements("com.zoo.Pet")
            .getter("volume", "int"),
        Stub::class("com.zoo.Dog")
            .extends("com.zoo.Animal")
            .implements("com.zoo.Loud")
            .field("owner", "com.zoo.Keeper")
            .getter("bark", "java.lang.String")
            .method("feed", &["int"], None)
            .method("sniff", &["com.zoo.Dog"], Some("boolean"))
            .method("<init>", &[], None),
        Stub::class("com.zoo.Cat").extends("com.zoo.Animal"),
        Stub::class("com.zoo.Keeper")
            .field("name", "java.lang.String")
            .field("dogs", "com.zoo.Dog[]")
            .getter("favorite", "com.zoo.Dog"),
        Stub::class("com.zoo.Outer$Inner").field("depth", "long"),
    ]
    .into_iter()
    .map(Stub::build)
    .collect()
}

/// The zoo plus two unrelated `Helper` classes.
pub fn zoo_with_helpers() -> TypeTable {
    let mut table = zoo();
    table.insert(Stub::class("a.x.Helper").field("x", "int").build());
    table.insert(Stub::class("b.y.Helper").field("x", "int").build());
    table
}

pub fn ty(name: &str) -> TypeRef {
    TypeRef::new(name)
}
