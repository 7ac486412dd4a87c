use super::DataStore;
use crate::error::Result;
use crate::model::{FieldUpdate, NewStudent, SearchQuery, Student, StudentId};

/// Vector-backed store for exercising command logic without SQLite.
///
/// Case folding for text search is Unicode-aware here, a superset of what
/// [`SqliteStore`](super::sqlite::SqliteStore) does.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    rows: Vec<Student>,
    last_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row including tombstones, for assertions about soft deletes.
    pub fn all_rows(&self) -> &[Student] {
        &self.rows
    }

    fn active_mut(&mut self, id: StudentId) -> Option<&mut Student> {
        self.rows
            .iter_mut()
            .find(|s| s.id == id && !s.is_deleted)
    }
}

impl DataStore for InMemoryStore {
    fn init_schema(&mut self) -> Result<()> {
        Ok(())
    }

    fn insert(&mut self, students: &[NewStudent]) -> Result<Vec<StudentId>> {
        let mut ids = Vec::with_capacity(students.len());
        for new in students {
            self.last_id += 1;
            let id = StudentId(self.last_id);
            self.rows.push(Student::from_new(id, new.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    fn list_active(&self) -> Result<Vec<Student>> {
        Ok(self.rows.iter().filter(|s| !s.is_deleted).cloned().collect())
    }

    fn get_active(&self, id: StudentId) -> Result<Option<Student>> {
        Ok(self
            .rows
            .iter()
            .find(|s| s.id == id && !s.is_deleted)
            .cloned())
    }

    fn update_field(&mut self, id: StudentId, update: &FieldUpdate) -> Result<bool> {
        match self.active_mut(id) {
            Some(student) => {
                update.apply_to(student);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn soft_delete(&mut self, id: StudentId) -> Result<bool> {
        match self.active_mut(id) {
            Some(student) => {
                student.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Student>> {
        Ok(self
            .rows
            .iter()
            .filter(|s| !s.is_deleted && query.matches(s))
            .cloned()
            .collect())
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use crate::model::StudentInput;

    /// A valid raw record; tweak fields before validating.
    pub fn sample_input(first_name: &str, major: &str, gpa: &str) -> StudentInput {
        StudentInput {
            first_name: first_name.to_string(),
            last_name: "Sample".to_string(),
            gpa: gpa.to_string(),
            major: major.to_string(),
            faculty_advisor: None,
            address: "100 Campus Dr".to_string(),
            city: "Madison".to_string(),
            state: "WI".to_string(),
            zip_code: "53706".to_string(),
            mobile_phone_number: "6085550100".to_string(),
        }
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_student(mut self, first_name: &str, major: &str, gpa: &str) -> Self {
            let new = sample_input(first_name, major, gpa).validate().unwrap();
            self.store.insert(&[new]).unwrap();
            self
        }

        pub fn with_deleted_student(mut self, first_name: &str) -> Self {
            let new = sample_input(first_name, "Undeclared", "2.0")
                .validate()
                .unwrap();
            let ids = self.store.insert(&[new]).unwrap();
            self.store.soft_delete(ids[0]).unwrap();
            self
        }
    }
}
