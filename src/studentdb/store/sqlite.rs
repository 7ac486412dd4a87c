use super::DataStore;
use crate::error::{Result, StudentError};
use crate::model::{
    fold_case, Field, FieldUpdate, FieldValue, NewStudent, SearchQuery, Student, StudentId,
    TextField,
};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, Connection, Row};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Same DDL as existing `StudentDB.sqlite` files; do not reorder columns.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS Students (
    StudentId INTEGER PRIMARY KEY,
    FirstName TEXT,
    LastName TEXT,
    GPA REAL,
    Major TEXT,
    FacultyAdvisor TEXT,
    Address TEXT,
    City TEXT,
    State TEXT,
    ZipCode TEXT,
    MobilePhoneNumber TEXT,
    isDeleted INTEGER
)";

const INSERT_SQL: &str = "INSERT INTO Students
    (FirstName, LastName, GPA, Major, FacultyAdvisor, Address, City, State, ZipCode, MobilePhoneNumber, isDeleted)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0)";

const SOFT_DELETE_SQL: &str =
    "UPDATE Students SET isDeleted = 1 WHERE StudentId = ?1 AND isDeleted = 0";

/// Expands to a fixed SELECT over active rows, with an optional extra predicate.
macro_rules! select_active {
    ($($clause:literal)?) => {
        concat!(
            "SELECT StudentId, FirstName, LastName, GPA, Major, FacultyAdvisor, Address, City, ",
            "State, ZipCode, MobilePhoneNumber, isDeleted FROM Students WHERE isDeleted = 0",
            $(" AND ", $clause,)?
            " ORDER BY StudentId"
        )
    };
}

macro_rules! update_active {
    ($column:literal) => {
        concat!(
            "UPDATE Students SET ",
            $column,
            " = ?1 WHERE StudentId = ?2 AND isDeleted = 0"
        )
    };
}

fn update_statement(field: Field) -> &'static str {
    match field {
        Field::FirstName => update_active!("FirstName"),
        Field::LastName => update_active!("LastName"),
        Field::Gpa => update_active!("GPA"),
        Field::Major => update_active!("Major"),
        Field::FacultyAdvisor => update_active!("FacultyAdvisor"),
        Field::Address => update_active!("Address"),
        Field::City => update_active!("City"),
        Field::State => update_active!("State"),
        Field::ZipCode => update_active!("ZipCode"),
        Field::MobilePhoneNumber => update_active!("MobilePhoneNumber"),
    }
}

fn contains_statement(field: TextField) -> &'static str {
    match field {
        TextField::FirstName => select_active!("fold_case(FirstName) LIKE ?1 ESCAPE '\\'"),
        TextField::LastName => select_active!("fold_case(LastName) LIKE ?1 ESCAPE '\\'"),
        TextField::Major => select_active!("fold_case(Major) LIKE ?1 ESCAPE '\\'"),
        TextField::City => select_active!("fold_case(City) LIKE ?1 ESCAPE '\\'"),
        TextField::State => select_active!("fold_case(State) LIKE ?1 ESCAPE '\\'"),
        TextField::FacultyAdvisor => {
            select_active!("fold_case(FacultyAdvisor) LIKE ?1 ESCAPE '\\'")
        }
        TextField::MobilePhoneNumber => {
            select_active!("fold_case(MobilePhoneNumber) LIKE ?1 ESCAPE '\\'")
        }
    }
}

/// Registers `fold_case(x)`: the same Unicode lowercasing the in-memory store
/// applies. SQLite's own `LIKE` folds ASCII only. Non-text values are compared
/// by their text form; NULL stays NULL.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let folded = match ctx.get_raw(0) {
                ValueRef::Text(bytes) => Some(fold_case(&String::from_utf8_lossy(bytes))),
                ValueRef::Integer(i) => Some(i.to_string()),
                ValueRef::Real(r) => Some(r.to_string()),
                ValueRef::Null | ValueRef::Blob(_) => None,
            };
            Ok(folded)
        },
    )
}

/// `%term%` with LIKE wildcards in the term taken literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: StudentId(row.get(0)?),
        first_name: text_column(row, 1)?,
        last_name: text_column(row, 2)?,
        gpa: row.get(3)?,
        major: text_column(row, 4)?,
        faculty_advisor: row.get(5)?,
        address: text_column(row, 6)?,
        city: text_column(row, 7)?,
        state: text_column(row, 8)?,
        zip_code: text_column(row, 9)?,
        mobile_phone_number: text_column(row, 10)?,
        is_deleted: row.get::<_, Option<i64>>(11)?.unwrap_or(0) != 0,
    })
}

fn sql_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::Text(s.clone()),
        FieldValue::Gpa(g) => Value::Real(*g),
        FieldValue::Null => Value::Null,
    }
}

/// SQLite-backed store over the `Students` table.
///
/// Text matching runs `LIKE` over `fold_case` on both sides, so non-ASCII
/// letters match case-insensitively too.
pub struct SqliteStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file and ensures the schema.
    ///
    /// Any failure here is [`StudentError::StoreUnavailable`]: without a store
    /// there is nothing else the driver can do.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let unavailable = |source| StudentError::StoreUnavailable {
            path: path.clone(),
            source,
        };

        let conn = Connection::open(&path).map_err(unavailable)?;
        register_functions(&conn).map_err(unavailable)?;
        conn.execute_batch(SCHEMA_SQL).map_err(unavailable)?;
        info!(path = %path.display(), "opened student store");

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// A private, throwaway database. Used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|source| StudentError::StoreUnavailable {
                path: PathBuf::from(":memory:"),
                source,
            })?;
        register_functions(&conn)?;
        let mut store = Self { conn, path: None };
        store.init_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn query_students<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Student>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, student_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

impl DataStore for SqliteStore {
    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn insert(&mut self, students: &[NewStudent]) -> Result<Vec<StudentId>> {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(students.len());
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for s in students {
                stmt.execute(params![
                    s.first_name,
                    s.last_name,
                    s.gpa,
                    s.major,
                    s.faculty_advisor,
                    s.address,
                    s.city,
                    s.state,
                    s.zip_code,
                    s.mobile_phone_number,
                ])?;
                ids.push(StudentId(tx.last_insert_rowid()));
            }
        }
        tx.commit()?;
        debug!(count = ids.len(), "inserted students");
        Ok(ids)
    }

    fn list_active(&self) -> Result<Vec<Student>> {
        self.query_students(select_active!(), ())
    }

    fn get_active(&self, id: StudentId) -> Result<Option<Student>> {
        let mut found = self.query_students(select_active!("StudentId = ?1"), [id.0])?;
        Ok(found.pop())
    }

    fn update_field(&mut self, id: StudentId, update: &FieldUpdate) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            update_statement(update.field),
            params![sql_value(&update.value), id.0],
        )?;
        tx.commit()?;
        debug!(%id, field = %update.field, changed, "update field");
        Ok(changed > 0)
    }

    fn soft_delete(&mut self, id: StudentId) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(SOFT_DELETE_SQL, [id.0])?;
        tx.commit()?;
        debug!(%id, changed, "soft delete");
        Ok(changed > 0)
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Student>> {
        match query {
            SearchQuery::GpaEquals(gpa) => self.query_students(select_active!("GPA = ?1"), [*gpa]),
            SearchQuery::Contains { field, term } => {
                let pattern = like_pattern(&fold_case(term));
                self.query_students(contains_statement(*field), [pattern])
            }
        }
    }
}
