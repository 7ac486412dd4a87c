use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{SearchField, SearchQuery};
use crate::store::DataStore;
use tracing::debug;

pub fn run<S: DataStore>(store: &S, field: SearchField, raw: &str) -> Result<CmdResult> {
    let query = SearchQuery::parse(field, raw)?;
    let students = store.search(&query)?;
    debug!(%field, matches = students.len(), "search");

    let mut result = CmdResult::default();
    if students.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No results found for {} in {}.",
            raw.trim(),
            field
        )));
    }
    Ok(result.with_listed_students(students))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StudentError;
    use crate::store::memory::fixtures::StoreFixture;

    fn names(result: &CmdResult) -> Vec<&str> {
        result
            .listed_students
            .iter()
            .map(|s| s.first_name.as_str())
            .collect()
    }

    #[test]
    fn gpa_matches_exactly() {
        let store = StoreFixture::new()
            .with_student("Ann", "Art", "3.5")
            .with_student("Bo", "Art", "3.55")
            .with_student("Cy", "Art", "3.50001")
            .with_student("Di", "Art", "3.50")
            .store;

        let result = run(&store, SearchField::Gpa, "3.5").unwrap();
        assert_eq!(names(&result), vec!["Ann", "Di"]);
    }

    #[test]
    fn text_matches_substring_ignoring_case() {
        let store = StoreFixture::new()
            .with_student("Ann", "Biology", "3.0")
            .with_student("Bo", "MicroBiology", "3.0")
            .with_student("Cy", "Chemistry", "3.0")
            .store;

        let result = run(&store, SearchField::Major, "bio").unwrap();
        assert_eq!(names(&result), vec!["Ann", "Bo"]);
    }

    #[test]
    fn no_match_is_an_empty_listing() {
        let store = StoreFixture::new().with_student("Ann", "Art", "3.0").store;
        let result = run(&store, SearchField::City, "Paris").unwrap();
        assert!(result.listed_students.is_empty());
        assert_eq!(
            result.messages[0].content,
            "No results found for Paris in City."
        );
    }

    #[test]
    fn invalid_gpa_query_is_a_validation_error() {
        let store = StoreFixture::new().with_student("Ann", "Art", "3.0").store;
        assert!(matches!(
            run(&store, SearchField::Gpa, "high"),
            Err(StudentError::Validation(_))
        ));
    }

    #[test]
    fn phone_search_normalizes_the_term() {
        let store = StoreFixture::new().with_student("Ann", "Art", "3.0").store;
        let result = run(&store, SearchField::MobilePhoneNumber, "(608) 555").unwrap();
        assert_eq!(names(&result), vec!["Ann"]);
    }
}
