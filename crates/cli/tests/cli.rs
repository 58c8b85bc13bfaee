use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quickcrm(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quickcrm").unwrap();
    cmd.current_dir(dir.path()).env_remove("QUICKCRM_OUTPUT");
    cmd
}

#[test]
fn new_then_add_field_then_info() {
    let tmp = TempDir::new().unwrap();

    quickcrm(&tmp)
        .args(["new", "Book a Demo", "--type", "book_demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("book_a_demo.qcform"));

    quickcrm(&tmp)
        .args([
            "add-field",
            "book_a_demo.qcform",
            "--type",
            "email",
            "--label",
            "Work email",
            "--required",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("field_1"));

    quickcrm(&tmp)
        .args(["info", "book_a_demo.qcform", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fieldCount\": 1"))
        .stdout(predicate::str::contains("\"formType\": \"book_demo\""));
}

#[test]
fn unknown_form_type_is_rejected() {
    let tmp = TempDir::new().unwrap();
    quickcrm(&tmp)
        .args(["new", "Lead", "--type", "newsletter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("newsletter"));
}

#[test]
fn validate_fails_on_empty_label() {
    let tmp = TempDir::new().unwrap();
    quickcrm(&tmp).args(["new", "Lead"]).assert().success();
    quickcrm(&tmp)
        .args(["add-field", "lead.qcform", "--type", "text", "--label", " "])
        .assert()
        .success();

    quickcrm(&tmp)
        .args(["validate", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"));
}

#[test]
fn export_honours_output_env() {
    let tmp = TempDir::new().unwrap();
    quickcrm(&tmp).args(["new", "Callback"]).assert().success();
    quickcrm(&tmp)
        .args(["add-field", "callback.qcform", "--type", "phone", "--label", "Phone"])
        .assert()
        .success();

    quickcrm(&tmp)
        .env("QUICKCRM_OUTPUT", tmp.path().join("bundle"))
        .args(["export", "callback.qcform"])
        .assert()
        .success();

    assert!(tmp.path().join("bundle/callback.html").exists());
    assert!(tmp.path().join("bundle/callback.config.json").exists());
}

#[test]
fn preview_prints_markup() {
    let tmp = TempDir::new().unwrap();
    quickcrm(&tmp).args(["new", "Lead"]).assert().success();
    quickcrm(&tmp)
        .args(["preview", "lead.qcform", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quickcrm-preview"));
}
