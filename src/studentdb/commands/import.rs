//! Bulk import from a CSV file with a header row.
//!
//! The import is all-or-nothing. Every row is normalized and validated before
//! anything is written; the first bad row aborts the import with
//! [`StudentError::ImportRow`] naming its 1-based data row, and the store is
//! left untouched. The valid batch is then inserted in one transaction.
//!
//! Required columns: `FirstName, LastName, Address, City, State, ZipCode,
//! MobilePhoneNumber, Major, GPA`. A header lacking any of them is rejected
//! with [`StudentError::ImportColumnsMissing`] before rows are read.
//! `FacultyAdvisor` is optional and any other column is ignored.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StudentError};
use crate::model::{NewStudent, StudentInput};
use crate::store::DataStore;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 9] = [
    "FirstName",
    "LastName",
    "Address",
    "City",
    "State",
    "ZipCode",
    "MobilePhoneNumber",
    "Major",
    "GPA",
];

#[derive(Debug, Deserialize)]
struct CsvStudentRow {
    #[serde(rename = "FirstName")]
    first_name: String,
    #[serde(rename = "LastName")]
    last_name: String,
    #[serde(rename = "Address")]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "ZipCode")]
    zip_code: String,
    #[serde(rename = "MobilePhoneNumber")]
    mobile_phone_number: String,
    #[serde(rename = "Major")]
    major: String,
    #[serde(rename = "GPA")]
    gpa: String,
    #[serde(rename = "FacultyAdvisor", default)]
    faculty_advisor: Option<String>,
}

impl From<CsvStudentRow> for StudentInput {
    fn from(row: CsvStudentRow) -> Self {
        StudentInput {
            first_name: row.first_name,
            last_name: row.last_name,
            gpa: row.gpa,
            major: row.major,
            faculty_advisor: row.faculty_advisor,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            mobile_phone_number: row.mobile_phone_number,
        }
    }
}

pub fn run<S: DataStore>(store: &mut S, path: &Path) -> Result<CmdResult> {
    if !path.is_file() {
        warn!(path = %path.display(), "import source missing");
        return Err(StudentError::ImportSourceMissing(path.to_path_buf()));
    }

    let batch = read_batch(path)?;
    let ids = store.insert(&batch)?;
    info!(path = %path.display(), count = ids.len(), "imported students");

    let mut result = CmdResult {
        created_ids: ids,
        ..Default::default()
    };
    result.add_message(CmdMessage::success(format!(
        "Inserted {} rows into Students table",
        result.created_ids.len()
    )));
    Ok(result)
}

fn read_batch(path: &Path) -> Result<Vec<NewStudent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = rdr.headers()?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StudentError::ImportColumnsMissing(missing));
    }

    let mut batch = Vec::new();
    for (idx, record) in rdr.deserialize::<CsvStudentRow>().enumerate() {
        let row = idx + 1;
        let input = StudentInput::from(record.map_err(|e| StudentError::at_row(row, e))?);
        let new = input
            .validate()
            .map_err(|e| StudentError::at_row(row, e))?;
        batch.push(new);
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, StudentId};
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "FirstName,LastName,Address,City,State,ZipCode,MobilePhoneNumber,Major,GPA";

    fn write_csv(dir: &TempDir, rows: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("students.csv");
        let mut content = String::from(HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn imports_rows_with_normalized_phones() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "Ann,Lee,1 Main St,Reno,NV,89501,1 (775) 555-0100,Biology,3.5",
                "Bo,Kim,2 Elm St,Austin,tx,73301,512.555.0101,Art & Design,2.25",
            ],
        );

        let mut store = InMemoryStore::new();
        let result = run(&mut store, &path).unwrap();
        assert_eq!(result.created_ids, vec![StudentId(1), StudentId(2)]);
        assert_eq!(
            result.messages[0].content,
            "Inserted 2 rows into Students table"
        );

        let rows = store.list_active().unwrap();
        assert_eq!(rows[0].mobile_phone_number, "7755550100");
        assert_eq!(rows[1].mobile_phone_number, "5125550101");
        assert_eq!(rows[1].state, "tx");
        assert_eq!(rows[1].gpa, 2.25);
        assert_eq!(rows[0].faculty_advisor, None);
    }

    #[test]
    fn bad_gpa_aborts_whole_batch() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "Ann,Lee,1 Main St,Reno,NV,89501,7755550100,Biology,3.5",
                "Bo,Kim,2 Elm St,Austin,TX,73301,5125550101,Art,abc",
            ],
        );

        let mut store = InMemoryStore::new();
        let err = run(&mut store, &path).unwrap_err();
        match err {
            StudentError::ImportRow { row, source } => {
                assert_eq!(row, 2);
                assert!(
                    matches!(*source, StudentError::Validation(v) if v.field == Field::Gpa)
                );
            }
            other => panic!("expected row error, got {other:?}"),
        }
        assert!(store.all_rows().is_empty());
    }

    #[test]
    fn missing_columns_are_named_before_any_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(&path, "FirstName,LastName\nAnn,Lee\n").unwrap();

        let mut store = InMemoryStore::new();
        let err = run(&mut store, &path).unwrap_err();
        match &err {
            StudentError::ImportColumnsMissing(columns) => {
                assert_eq!(columns[0], "Address");
                assert_eq!(columns.len(), 7);
            }
            other => panic!("expected missing columns, got {other:?}"),
        }
        assert!(err.is_recoverable());
        assert!(store.all_rows().is_empty());
    }

    #[test]
    fn foreign_header_only_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(&path, "Foo,Bar\n").unwrap();

        let mut store = InMemoryStore::new();
        let err = run(&mut store, &path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Import file is missing required columns: FirstName, LastName, Address, City, \
             State, ZipCode, MobilePhoneNumber, Major, GPA"
        );
    }

    #[test]
    fn optional_advisor_and_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.csv");
        fs::write(
            &path,
            "StudentId,FirstName,LastName,Address,City,State,ZipCode,MobilePhoneNumber,Major,GPA,FacultyAdvisor\n\
             77,Ann,Lee,1 Main St,Reno,NV,89501,7755550100,Biology,3.5,Dr. Ortiz\n",
        )
        .unwrap();

        let mut store = InMemoryStore::new();
        run(&mut store, &path).unwrap();
        let rows = store.list_active().unwrap();
        assert_eq!(rows[0].id, StudentId(1));
        assert_eq!(rows[0].faculty_advisor.as_deref(), Some("Dr. Ortiz"));
    }

    #[test]
    fn header_only_imports_nothing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &[]);
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &path).unwrap();
        assert!(result.created_ids.is_empty());
    }

    #[test]
    fn missing_file_is_typed() {
        let dir = TempDir::new().unwrap();
        let mut store = InMemoryStore::new();
        let err = run(&mut store, &dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, StudentError::ImportSourceMissing(_)));
        assert!(err.is_recoverable());
    }
}
