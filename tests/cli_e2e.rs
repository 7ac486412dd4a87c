use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn studentdb(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("studentdb").unwrap();
    cmd.current_dir(home)
        .env("STUDENTDB_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn add_ann(home: &Path) {
    studentdb(home)
        .args([
            "add",
            "--first-name",
            "Ann",
            "--last-name",
            "Lee",
            "--gpa",
            "3.5",
            "--major",
            "Biology",
            "--address",
            "1 Main St",
            "--city",
            "Reno",
            "--state",
            "NV",
            "--zip",
            "89501",
            "--phone",
            "1 (775) 555-0100",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "New student added successfully (ID 1).",
        ));
}

#[test]
fn add_list_search_delete() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_ann(home);
    assert!(home.join("StudentDB.sqlite").exists());

    studentdb(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann Lee").and(predicate::str::contains("7755550100")));

    studentdb(home)
        .args(["search", "major", "BIO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ann Lee"));

    studentdb(home)
        .args(["search", "gpa", "3.55"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found for 3.55 in GPA."));

    studentdb(home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Student deleted successfully (1): Ann Lee",
        ));

    studentdb(home)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No student found with ID 1."));

    studentdb(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students found."));
}

#[test]
fn update_then_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_ann(home);

    studentdb(home)
        .args(["update", "1", "advisor", "Dr. Kim"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Student FacultyAdvisor updated successfully to Dr. Kim.",
        ));

    studentdb(home)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Faculty Advisor: Dr. Kim"));
}

#[test]
fn invalid_gpa_exits_with_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_ann(home);

    studentdb(home)
        .args(["update", "1", "gpa", "4.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid GPA."));
}

#[test]
fn import_from_configured_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    std::fs::write(
        home.join("students.csv"),
        "FirstName,LastName,Address,City,State,ZipCode,MobilePhoneNumber,Major,GPA\n\
         Ann,Lee,1 Main St,Reno,NV,89501,775-555-0100,Biology,3.5\n\
         Bo,Kim,2 Elm St,Austin,TX,73301,512.555.0101,Art & Design,2.25\n",
    )
    .unwrap();

    studentdb(home)
        .arg("import")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inserted 2 rows into Students table"));

    studentdb(home)
        .args(["--json", "search", "city", "aus"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"FirstName\": \"Bo\""));
}

#[test]
fn bad_import_row_inserts_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    let csv = home.join("bad.csv");
    std::fs::write(
        &csv,
        "FirstName,LastName,Address,City,State,ZipCode,MobilePhoneNumber,Major,GPA\n\
         Ann,Lee,1 Main St,Reno,NV,89501,775-555-0100,Biology,3.5\n\
         Bo,Kim,2 Elm St,Austin,TX,73301,512.555.0101,Art,high\n",
    )
    .unwrap();

    studentdb(home)
        .arg("import")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import aborted at row 2"));

    studentdb(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students found."));
}

#[test]
fn missing_import_file_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    studentdb(temp_dir.path())
        .args(["import", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import source not found"));
}

#[test]
fn config_redirects_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    studentdb(home)
        .args(["config", "database", "other.sqlite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("database set to other.sqlite"));

    add_ann(home);
    assert!(home.join("other.sqlite").exists());

    studentdb(home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("import-file = students.csv"));
}

#[test]
fn menu_runs_from_stdin() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_ann(home);

    studentdb(home)
        .write_stdin("1\n7\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Student Management System ---"))
        .stdout(predicate::str::contains("Ann Lee"))
        .stdout(predicate::str::contains("Exiting the program."));
}

#[test]
fn json_output_reports_missing_and_created_ids() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    add_ann(home);

    let output = studentdb(home)
        .args(["--json", "show", "99"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["students"], serde_json::json!([]));
    assert_eq!(value["missing_ids"], serde_json::json!([99]));
    assert_eq!(value["messages"][0]["level"], "warning");

    std::fs::write(
        home.join("students.csv"),
        "FirstName,LastName,Address,City,State,ZipCode,MobilePhoneNumber,Major,GPA\n\
         Bo,Kim,2 Elm St,Austin,TX,73301,512.555.0101,Art,2.25\n",
    )
    .unwrap();
    let output = studentdb(home)
        .args(["import", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["created_ids"], serde_json::json!([2]));
}

#[test]
fn import_with_wrong_header_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    std::fs::write(home.join("students.csv"), "Foo,Bar\n").unwrap();

    studentdb(home)
        .arg("import")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Import file is missing required columns: FirstName",
        ));
}

#[test]
fn config_reports_database_override() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    studentdb(home)
        .args(["--db", "alt.sqlite", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Database file: alt.sqlite"));
    assert!(home.join("alt.sqlite").exists());
}
