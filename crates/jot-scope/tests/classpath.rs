use jot_classpath::{ClasspathEntry, ClasspathIndex};
use jot_scope::{HookRegistry, Navigator, Session, SuffixDictionary};
use jot_test_utils::{write_jar, ClassBuilder};
use jot_types::TypeRef;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn navigates_a_generated_jar() {
    let tmp = TempDir::new().unwrap();
    let jar = tmp.path().join("zoo.jar");
    write_jar(
        &jar,
        &[
            ClassBuilder::interface("com.zoo.Pet").method("owner", "()Lcom/zoo/care/Keeper;"),
            ClassBuilder::class("com.zoo.Animal")
                .implements("com.zoo.Pet")
                .field("age", "I"),
            ClassBuilder::class("com.zoo.Dog")
                .extends("com.zoo.Animal")
                .method("<init>", "()V")
                .method("bark", "()Ljava/lang/String;")
                .method("feed", "(I)V"),
            ClassBuilder::class("com.zoo.care.Keeper").field("dogs", "[Lcom/zoo/Dog;"),
            ClassBuilder::class("org.other.Helper"),
        ],
    )
    .unwrap();

    let index = ClasspathIndex::build(&[ClasspathEntry::from_path(&jar)]).unwrap();
    let nav = Navigator::new(Box::new(index), Some("Animal"), None).unwrap();
    assert_eq!(nav.package(), Some("com.zoo"));
    assert!(!nav.scope_dictionary().is_known("Helper"));
    assert_eq!(
        nav.ancestry().descendants(&TypeRef::new("com.zoo.Pet")),
        &[TypeRef::new("com.zoo.Animal"), TypeRef::new("com.zoo.Dog")]
    );

    let mut hooks = HookRegistry::new();
    hooks.register(&TypeRef::new("com.zoo.care.Keeper"), ["inspect"]);
    let mut session = Session::new(nav, Box::new(hooks));

    let transcript: Vec<String> = ["@Dog>bark", "", ">owner", ":dogs", "", "!inspect @Dog"]
        .into_iter()
        .flat_map(|line| session.process_line(line).output)
        .collect();
    assert_eq!(
        transcript,
        vec![
            "Scope: @Dog>bark [String] ",
            "Scope: (Root) [Animal] ",
            "Scope: >owner [Keeper] ",
            "Scope: >owner/:dogs [Dog[]] ",
            "Scope: >owner [Keeper] ",
            "Hook operation: inspect on com.zoo.care.Keeper [com.zoo.Dog]",
            "Scope: >owner [Keeper] ",
        ]
    );

    let dict: &SuffixDictionary = session.navigator().universe();
    assert!(dict.is_known("Helper"));
    assert!(dict.is_known("int"));
}
