use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::StudentId;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S, id: StudentId) -> Result<CmdResult> {
    match store.get_active(id)? {
        Some(student) => Ok(CmdResult::default().with_listed_students(vec![student])),
        None => Ok(CmdResult::not_found(
            id,
            format!(
                "No student found with ID {}, or the student is deleted.",
                id
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn finds_active_student() {
        let store = StoreFixture::new().with_student("Ann", "Art", "3.0").store;
        let result = run(&store, StudentId(1)).unwrap();
        assert_eq!(result.listed_students[0].first_name, "Ann");
        assert!(!result.is_not_found());
    }

    #[test]
    fn deleted_and_unknown_ids_are_not_found() {
        let store = StoreFixture::new().with_deleted_student("Bo").store;
        for id in [StudentId(1), StudentId(42)] {
            let result = run(&store, id).unwrap();
            assert!(result.listed_students.is_empty());
            assert_eq!(result.missing_ids, vec![id]);
        }
    }
}
