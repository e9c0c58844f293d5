use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("menu-icons-cli").expect("binary should build");
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn set_then_show_round_trips_merged_settings() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path())
        .args(["set", "42", "--icon", "star", "--position", "after", "--size", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved item 42"));

    let output = cli(temp.path()).args(["show", "42"]).assert().success().get_output().stdout.clone();

    let settings: Value = serde_json::from_slice(&output).expect("show should emit valid json");
    assert_eq!(settings["icon"], "star");
    assert_eq!(settings["position"], "after");
    assert_eq!(settings["size"], 1.5);
    assert_eq!(settings["align"], "middle");
    assert_eq!(settings["label"], false);
}

#[test]
fn all_default_submission_clears_instead_of_storing() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path())
        .args(["set", "7", "--icon", "star"])
        .assert()
        .success()
        .stdout(predicate::str::contains("saved item 7"));

    cli(temp.path())
        .args(["set", "7", "--icon", "", "--label", "0", "--size", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared item 7"));

    let output = cli(temp.path()).args(["show", "7"]).assert().success().get_output().stdout.clone();
    let settings: Value = serde_json::from_slice(&output).expect("show should emit valid json");
    assert_eq!(settings["icon"], "");
}

#[test]
fn render_decorates_saved_item_with_label_suppressed() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path())
        .args([
            "set", "42", "--label", "1", "--position", "after", "--align", "middle", "--size",
            "1.5", "--icon", "star", "--color", "",
        ])
        .assert()
        .success();

    cli(temp.path())
        .args(["render", "42", "--title", "Contact"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("font-size:1.5em;")
                .and(predicate::str::contains("wpsmi-icon star"))
                .and(predicate::str::contains("wpsmi-position-after"))
                .and(predicate::str::contains("Contact").not()),
        );
}

#[test]
fn render_keeps_title_when_label_is_visible() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path()).args(["set", "9", "--icon", "star", "--position", "after"]).assert().success();

    cli(temp.path())
        .args(["render", "9", "--title", "Contact"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Contact<i "));
}

#[test]
fn render_is_a_no_op_outside_the_page_context() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path()).args(["set", "3", "--icon", "star"]).assert().success();

    for context in ["admin", "background"] {
        cli(temp.path())
            .args(["render", "3", "--title", "Home", "--context", context])
            .assert()
            .success()
            .stdout(predicate::str::diff("Home\n"));
    }
}

#[test]
fn compile_requires_the_full_gate() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let source = temp.path().join("icons.yml");
    let output = temp.path().join("icons.json");

    fs::write(&source, "coffee:\n  unicode: f0f4\n  styles:\n    - solid\n").unwrap();

    cli(temp.path())
        .args(["compile"])
        .arg(&source)
        .arg("--output")
        .arg(&output)
        .args(["--debug", "--opt-in"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped: compiler gate not satisfied"));

    assert!(!output.exists());
}

#[test]
fn compile_writes_a_deterministic_dataset() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let source = temp.path().join("icons.yml");
    let output = temp.path().join("icons.json");

    fs::write(
        &source,
        "coffee:\n  unicode: f0f4\n  styles:\n    - solid\nfirefox:\n  unicode: f269\n  styles:\n    - brand\n",
    )
    .unwrap();

    cli(temp.path())
        .args(["compile"])
        .arg(&source)
        .arg("--output")
        .arg(&output)
        .args(["--debug", "--opt-in", "--admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 icons"));

    let first = fs::read_to_string(&output).unwrap();
    assert_eq!(
        first,
        r#"[{"id":"coffee","unicode":"f0f4","style":"fas"},{"id":"firefox","unicode":"f269","style":"fab"}]"#
    );

    cli(temp.path())
        .args(["compile"])
        .arg(&source)
        .arg("--output")
        .arg(&output)
        .args(["--debug", "--opt-in", "--admin"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), first);
}

#[test]
fn compile_fails_loudly_for_missing_source() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path())
        .args(["compile"])
        .arg(temp.path().join("missing.yml"))
        .arg("--output")
        .arg(temp.path().join("icons.json"))
        .args(["--debug", "--opt-in", "--admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to compile icon dataset"));
}

#[test]
fn check_reports_every_failed_requirement() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path())
        .args(["check", "--host-version", "5.1", "--runtime-version", "7.0"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("host platform 5.3.0 or newer is required")
                .and(predicate::str::contains("runtime 7.2.0 or newer is required")),
        );

    cli(temp.path())
        .args(["check", "--host-version", "6.4", "--runtime-version", "8.2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("requirements satisfied"));
}

#[test]
fn version_prints_package_version() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cli(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
