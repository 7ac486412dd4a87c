use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Store-assigned identifier of a student row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = InvalidStudentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidStudentId(s.to_string()));
        }
        trimmed
            .parse()
            .map(StudentId)
            .map_err(|_| InvalidStudentId(s.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid student ID '{0}'. Please enter a numeric value.")]
pub struct InvalidStudentId(pub String);

/// A persisted student row, as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Student {
    #[serde(rename = "StudentId")]
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "GPA")]
    pub gpa: f64,
    pub major: String,
    pub faculty_advisor: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub mobile_phone_number: String,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

impl Student {
    pub fn from_new(id: StudentId, new: NewStudent) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            gpa: new.gpa,
            major: new.major,
            faculty_advisor: new.faculty_advisor,
            address: new.address,
            city: new.city,
            state: new.state,
            zip_code: new.zip_code,
            mobile_phone_number: new.mobile_phone_number,
            is_deleted: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A validated, normalized record ready to be inserted.
///
/// Only produced by [`StudentInput::validate`](crate::validation), so every
/// value here already satisfies its field rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub gpa: f64,
    pub major: String,
    pub faculty_advisor: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub mobile_phone_number: String,
}

/// Raw field values as collected by a driver, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub gpa: String,
    pub major: String,
    pub faculty_advisor: Option<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub mobile_phone_number: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field '{0}'")]
pub struct UnknownField(pub String);

/// Folds `first-name`, `First_Name` and `FirstName` to the same key.
fn field_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The columns a caller may change after insert.
///
/// StudentId and isDeleted are deliberately absent: neither can be written
/// through an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Gpa,
    Major,
    FacultyAdvisor,
    Address,
    City,
    State,
    ZipCode,
    MobilePhoneNumber,
}

impl Field {
    /// In menu order.
    pub const ALL: [Field; 10] = [
        Field::FirstName,
        Field::LastName,
        Field::Gpa,
        Field::Major,
        Field::FacultyAdvisor,
        Field::Address,
        Field::City,
        Field::State,
        Field::ZipCode,
        Field::MobilePhoneNumber,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Field::FirstName => "FirstName",
            Field::LastName => "LastName",
            Field::Gpa => "GPA",
            Field::Major => "Major",
            Field::FacultyAdvisor => "FacultyAdvisor",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::ZipCode => "ZipCode",
            Field::MobilePhoneNumber => "MobilePhoneNumber",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Gpa => "GPA",
            Field::Major => "Major",
            Field::FacultyAdvisor => "Faculty Advisor",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::ZipCode => "Zip Code",
            Field::MobilePhoneNumber => "Mobile Phone Number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match field_key(s).as_str() {
            "firstname" | "first" => Field::FirstName,
            "lastname" | "last" => Field::LastName,
            "gpa" => Field::Gpa,
            "major" => Field::Major,
            "facultyadvisor" | "advisor" => Field::FacultyAdvisor,
            "address" => Field::Address,
            "city" => Field::City,
            "state" => Field::State,
            "zipcode" | "zip" => Field::ZipCode,
            "mobilephonenumber" | "mobilephone" | "phone" => Field::MobilePhoneNumber,
            _ => return Err(UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// The columns a search may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    FirstName,
    LastName,
    Major,
    City,
    State,
    Gpa,
    FacultyAdvisor,
    MobilePhoneNumber,
}

impl SearchField {
    /// In menu order.
    pub const ALL: [SearchField; 8] = [
        SearchField::FirstName,
        SearchField::LastName,
        SearchField::Major,
        SearchField::City,
        SearchField::State,
        SearchField::Gpa,
        SearchField::FacultyAdvisor,
        SearchField::MobilePhoneNumber,
    ];

    pub fn field(&self) -> Field {
        match self {
            SearchField::FirstName => Field::FirstName,
            SearchField::LastName => Field::LastName,
            SearchField::Major => Field::Major,
            SearchField::City => Field::City,
            SearchField::State => Field::State,
            SearchField::Gpa => Field::Gpa,
            SearchField::FacultyAdvisor => Field::FacultyAdvisor,
            SearchField::MobilePhoneNumber => Field::MobilePhoneNumber,
        }
    }

    /// `None` for GPA, which is matched numerically.
    pub fn text_field(&self) -> Option<TextField> {
        match self {
            SearchField::FirstName => Some(TextField::FirstName),
            SearchField::LastName => Some(TextField::LastName),
            SearchField::Major => Some(TextField::Major),
            SearchField::City => Some(TextField::City),
            SearchField::State => Some(TextField::State),
            SearchField::Gpa => None,
            SearchField::FacultyAdvisor => Some(TextField::FacultyAdvisor),
            SearchField::MobilePhoneNumber => Some(TextField::MobilePhoneNumber),
        }
    }

    pub fn label(&self) -> &'static str {
        self.field().label()
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().column())
    }
}

impl FromStr for SearchField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field: Field = s.parse()?;
        SearchField::ALL
            .into_iter()
            .find(|sf| sf.field() == field)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Searchable columns holding text, matched by case-insensitive containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstName,
    LastName,
    Major,
    City,
    State,
    FacultyAdvisor,
    MobilePhoneNumber,
}

impl TextField {
    pub fn column(&self) -> &'static str {
        match self {
            TextField::FirstName => "FirstName",
            TextField::LastName => "LastName",
            TextField::Major => "Major",
            TextField::City => "City",
            TextField::State => "State",
            TextField::FacultyAdvisor => "FacultyAdvisor",
            TextField::MobilePhoneNumber => "MobilePhoneNumber",
        }
    }

    /// Reads this column off a student row.
    pub fn value_of<'a>(&self, student: &'a Student) -> Option<&'a str> {
        match self {
            TextField::FirstName => Some(&student.first_name),
            TextField::LastName => Some(&student.last_name),
            TextField::Major => Some(&student.major),
            TextField::City => Some(&student.city),
            TextField::State => Some(&student.state),
            TextField::FacultyAdvisor => student.faculty_advisor.as_deref(),
            TextField::MobilePhoneNumber => Some(&student.mobile_phone_number),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Gpa(f64),
    /// Clears a nullable column (only FacultyAdvisor).
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Gpa(g) => write!(f, "{}", g),
            FieldValue::Null => f.write_str("(none)"),
        }
    }
}

/// A validated change to a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: Field,
    pub value: FieldValue,
}

impl FieldUpdate {
    /// Applies the change to an in-memory row.
    pub fn apply_to(&self, student: &mut Student) {
        let text = match &self.value {
            FieldValue::Gpa(g) => {
                student.gpa = *g;
                return;
            }
            FieldValue::Null => {
                student.faculty_advisor = None;
                return;
            }
            FieldValue::Text(s) => s.clone(),
        };
        match self.field {
            Field::FirstName => student.first_name = text,
            Field::LastName => student.last_name = text,
            Field::Gpa => {}
            Field::Major => student.major = text,
            Field::FacultyAdvisor => student.faculty_advisor = Some(text),
            Field::Address => student.address = text,
            Field::City => student.city = text,
            Field::State => student.state = text,
            Field::ZipCode => student.zip_code = text,
            Field::MobilePhoneNumber => student.mobile_phone_number = text,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Exact numeric equality on GPA.
    GpaEquals(f64),
    /// Case-insensitive substring match on a text column.
    Contains { field: TextField, term: String },
}

/// Case folding shared by every store, so `Émile` and `émile` compare equal.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

impl SearchQuery {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            SearchQuery::GpaEquals(gpa) => student.gpa == *gpa,
            SearchQuery::Contains { field, term } => {
                let term = fold_case(term);
                field
                    .value_of(student)
                    .is_some_and(|v| fold_case(v).contains(&term))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_aliases() {
        assert_eq!("FirstName".parse::<Field>().unwrap(), Field::FirstName);
        assert_eq!("first-name".parse::<Field>().unwrap(), Field::FirstName);
        assert_eq!("GPA".parse::<Field>().unwrap(), Field::Gpa);
        assert_eq!("phone".parse::<Field>().unwrap(), Field::MobilePhoneNumber);
        assert_eq!("zip_code".parse::<Field>().unwrap(), Field::ZipCode);
    }

    #[test]
    fn rejects_columns_outside_the_whitelist() {
        assert!("StudentId".parse::<Field>().is_err());
        assert!("isDeleted".parse::<Field>().is_err());
        assert!("GPA; DROP TABLE Students".parse::<Field>().is_err());
    }

    #[test]
    fn search_fields_are_a_subset() {
        assert!("Address".parse::<SearchField>().is_err());
        assert!("ZipCode".parse::<SearchField>().is_err());
        assert_eq!("city".parse::<SearchField>().unwrap(), SearchField::City);
        assert_eq!(SearchField::Gpa.text_field(), None);
    }

    #[test]
    fn student_id_requires_digits() {
        assert_eq!("42".parse::<StudentId>().unwrap(), StudentId(42));
        assert_eq!(" 7 ".parse::<StudentId>().unwrap(), StudentId(7));
        assert!("-1".parse::<StudentId>().is_err());
        assert!("abc".parse::<StudentId>().is_err());
        assert!("".parse::<StudentId>().is_err());
    }

    #[test]
    fn student_serializes_with_column_names() {
        let student = Student::from_new(
            StudentId(1),
            NewStudent {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                gpa: 4.0,
                major: "Math".into(),
                faculty_advisor: None,
                address: "1 Main St".into(),
                city: "London".into(),
                state: "CA".into(),
                zip_code: "90210".into(),
                mobile_phone_number: "5551234567".into(),
            },
        );
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["StudentId"], 1);
        assert_eq!(json["GPA"], 4.0);
        assert_eq!(json["MobilePhoneNumber"], "5551234567");
        assert_eq!(json["isDeleted"], false);
    }
}
