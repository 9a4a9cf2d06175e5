use jot_classpath::{ClasspathEntry, ClasspathError, ClasspathIndex};
use jot_test_utils::{write_class_dir, write_jar, ClassBuilder};
use jot_types::{InspectionProvider, TypeRef};
use tempfile::TempDir;

use pretty_assertions::assert_eq;

fn zoo() -> Vec<ClassBuilder> {
    vec![
        ClassBuilder::class("com.zoo.Animal").field("name", "Ljava/lang/String;"),
        ClassBuilder::class("com.zoo.Dog")
            .extends("com.zoo.Animal")
            .method("bark", "()Ljava/lang/String;"),
        ClassBuilder::class("com.zoo.care.Keeper").field("dog", "Lcom/zoo/Dog;"),
        ClassBuilder::class("org.other.Helper"),
    ]
}

#[test]
fn indexes_generated_jar() {
    let tmp = TempDir::new().unwrap();
    let jar = tmp.path().join("zoo.jar");
    write_jar(&jar, &zoo()).unwrap();

    let index = ClasspathIndex::build(&[ClasspathEntry::from_path(&jar)]).unwrap();
    assert_eq!(index.len(), 4);

    let dog = index.lookup_type("com.zoo.Dog").unwrap();
    assert_eq!(dog.super_binary_name.as_deref(), Some("com.zoo.Animal"));
    assert_eq!(dog.accessors().next().unwrap().return_type, Some(TypeRef::string()));

    assert_eq!(
        index.class_names_in_package("com.zoo"),
        vec![
            "com.zoo.Animal".to_string(),
            "com.zoo.Dog".to_string(),
            "com.zoo.care.Keeper".to_string(),
        ]
    );
    assert_eq!(index.class_names_in_package("").len(), 4);
    assert_eq!(
        index.class_names_in_package("com/zoo/care"),
        vec!["com.zoo.care.Keeper".to_string()]
    );
    assert!(index.class_names_in_package("com.zo").is_empty());
}

#[test]
fn indexes_class_dir() {
    let tmp = TempDir::new().unwrap();
    write_class_dir(tmp.path(), &zoo()).unwrap();

    let entry = ClasspathEntry::from_path(tmp.path());
    assert!(matches!(entry, ClasspathEntry::ClassDir(_)));
    let index = ClasspathIndex::build(&[entry]).unwrap();
    assert!(index.lookup_type("com.zoo.care.Keeper").is_some());
    assert_eq!(
        index.lookup_type("com.zoo.care.Keeper").unwrap().fields[0].ty,
        TypeRef::new("com.zoo.Dog")
    );
}

#[test]
fn first_entry_wins_on_duplicate_classes() {
    let tmp = TempDir::new().unwrap();
    let one = tmp.path().join("one.jar");
    let two = tmp.path().join("two.jar");
    write_jar(&one, &[ClassBuilder::class("com.dup.Dupe").method("fromOne", "()I")]).unwrap();
    write_jar(&two, &[ClassBuilder::class("com.dup.Dupe").method("fromTwo", "()I")]).unwrap();

    let index =
        ClasspathIndex::build(&[ClasspathEntry::Jar(one), ClasspathEntry::Jar(two)]).unwrap();
    let dupe = index.lookup_type("com.dup.Dupe").unwrap();
    assert_eq!(dupe.methods[0].name, "fromOne");
    assert_eq!(index.len(), 1);
    assert_eq!(index.class_names_from_entry(0), vec!["com.dup.Dupe".to_string()]);
    assert!(index.class_names_from_entry(1).is_empty());
}

#[test]
fn remembers_which_entry_a_class_came_from() {
    let tmp = TempDir::new().unwrap();
    let app = tmp.path().join("app.jar");
    let rt = tmp.path().join("rt");
    write_jar(&app, &zoo()).unwrap();
    write_class_dir(&rt, &[ClassBuilder::root("java.lang.Object")]).unwrap();

    let index = ClasspathIndex::build(&[
        ClasspathEntry::from_path(&app),
        ClasspathEntry::from_path(&rt),
    ])
    .unwrap();
    assert_eq!(index.len(), 5);
    assert_eq!(index.class_names_from_entry(0).len(), 4);
    assert_eq!(
        index.class_names_from_entry(1),
        vec!["java.lang.Object".to_string()]
    );
}

#[test]
fn reports_malformed_class_entries() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Broken.class"), b"not a class").unwrap();

    let err = ClasspathIndex::build(&[ClasspathEntry::ClassDir(tmp.path().to_path_buf())])
        .unwrap_err();
    assert!(matches!(err, ClasspathError::ClassFile { .. }));
    assert!(err.to_string().contains("Broken.class"));
}

#[test]
fn missing_archive_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = ClasspathIndex::build(&[ClasspathEntry::Jar(tmp.path().join("absent.jar"))])
        .unwrap_err();
    assert!(matches!(err, ClasspathError::Io(_)));
}
