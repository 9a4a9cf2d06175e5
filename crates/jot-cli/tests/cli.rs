use assert_cmd::Command;
use jot_test_utils::{write_jar, ClassBuilder};
use predicates::prelude::*;
use tempfile::TempDir;

fn jot() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jot"))
}

fn zoo_jar(dir: &TempDir) -> std::path::PathBuf {
    let jar = dir.path().join("zoo.jar");
    write_jar(
        &jar,
        &[
            ClassBuilder::class("com.zoo.Animal").field("age", "I"),
            ClassBuilder::class("com.zoo.Dog")
                .extends("com.zoo.Animal")
                .method("bark", "()Ljava/lang/String;"),
            ClassBuilder::class("org.other.Helper"),
        ],
    )
    .unwrap();
    jar
}

#[test]
fn help_mentions_arguments() {
    jot().arg("--help").assert().success().stdout(
        predicate::str::contains("ARCHIVE")
            .and(predicate::str::contains("--classpath"))
            .and(predicate::str::contains("--config")),
    );
}

#[test]
fn navigates_lines_from_stdin() {
    let temp = TempDir::new().unwrap();
    let jar = zoo_jar(&temp);

    jot()
        .current_dir(temp.path())
        .env_remove("JOT_CONFIG_PATH")
        .arg(&jar)
        .arg("Animal")
        .write_stdin("@Dog>bark\n\n\n?bogus\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Scope: (Root) [Animal] ")
                .and(predicate::str::contains("Scope: @Dog>bark [String] "))
                .and(predicate::str::contains("* Already at root level!"))
                .and(predicate::str::contains(
                    "* Unable to parse input - malformed scope '?bogus'",
                )),
        );
}

#[test]
fn hooks_come_from_config() {
    let temp = TempDir::new().unwrap();
    let jar = zoo_jar(&temp);
    let config = temp.path().join("hooks.toml");
    std::fs::write(
        &config,
        "[logging]\nlevel = \"off\"\n\n[[hooks]]\ntype = \"Dog\"\noperations = [\"dump\"]\n",
    )
    .unwrap();

    jot()
        .current_dir(temp.path())
        .arg(&jar)
        .arg("Dog")
        .arg("--config")
        .arg(&config)
        .write_stdin("!dump\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hook operation: dump on com.zoo.Dog"));
}

#[test]
fn unknown_tap_exits_with_code_2() {
    let temp = TempDir::new().unwrap();
    let jar = zoo_jar(&temp);

    jot()
        .current_dir(temp.path())
        .env_remove("JOT_CONFIG_PATH")
        .arg(&jar)
        .arg("Giraffe")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown class 'Giraffe'"));
}

#[test]
fn missing_archive_exits_with_code_2() {
    let temp = TempDir::new().unwrap();

    jot()
        .current_dir(temp.path())
        .env_remove("JOT_CONFIG_PATH")
        .arg(temp.path().join("absent.jar"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}
