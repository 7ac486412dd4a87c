//! Field validation for student records.
//!
//! The `is_valid_*` predicates are pure checks over an already trimmed string.
//! They say nothing about emptiness: an empty name is syntactically fine.
//! Required fields go through [`required`], and the typed entry points
//! ([`StudentInput::validate`], [`FieldUpdate::parse`], [`SearchQuery::parse`])
//! apply the same rule for a column wherever it is written.

use crate::model::{
    Field, FieldUpdate, FieldValue, NewStudent, SearchField, SearchQuery, StudentInput,
};
use crate::phone::normalize_phone;
use std::fmt;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_MAJOR_LEN: usize = 50;
pub const MAX_ADDRESS_LEN: usize = 100;
pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

/// The 50 USPS state codes. No territories, no DC.
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Letters and whitespace only, at most 50 characters. Used for names and cities.
pub fn is_valid_name(s: &str) -> bool {
    s.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) && s.chars().count() <= MAX_NAME_LEN
}

pub fn is_valid_major(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '&')
        && s.chars().count() <= MAX_MAJOR_LEN
}

pub fn is_valid_address(s: &str) -> bool {
    s.chars().count() <= MAX_ADDRESS_LEN
}

pub fn is_valid_zip(s: &str) -> bool {
    s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a *normalized* phone number; see [`normalize_phone`].
pub fn is_valid_phone(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_state(s: &str) -> bool {
    US_STATES.iter().any(|code| code.eq_ignore_ascii_case(s))
}

pub fn parse_gpa(s: &str) -> Option<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|value| (MIN_GPA..=MAX_GPA).contains(value))
}

pub fn is_valid_gpa(s: &str) -> bool {
    parse_gpa(s).is_some()
}

/// A required field is non-blank *and* passes its predicate.
pub fn required(s: &str, predicate: impl Fn(&str) -> bool) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && predicate(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Blank after trimming.
    Empty,
    /// Present but fails the column rule.
    Invalid,
}

/// A single field failing its rule.
///
/// Displays as the fixed message a driver shows before re-prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: Field, reason: ValidationReason) -> Self {
        Self { field, reason }
    }

    pub fn message(&self) -> &'static str {
        rule_message(self.field)
    }
}

/// The human-readable rule for a field.
pub fn rule_message(field: Field) -> &'static str {
    match field {
        Field::FirstName => {
            "Invalid first name. Must be alphabetic, non-empty, and at most 50 characters."
        }
        Field::LastName => {
            "Invalid last name. Must be alphabetic, non-empty, and at most 50 characters."
        }
        Field::Gpa => "Invalid GPA. Must be a non-empty numeric value between 0.0 and 4.0.",
        Field::Major => {
            "Invalid major. Must be non-empty and use only letters, numbers, spaces, hyphens, and ampersands."
        }
        Field::FacultyAdvisor => "Invalid faculty advisor.",
        Field::Address => "Invalid address. Must be non-empty and at most 100 characters.",
        Field::City => "Invalid city. Must be alphabetic, non-empty, and at most 50 characters.",
        Field::State => {
            "Invalid state abbreviation. Must be non-empty and a two-letter code such as 'CA'."
        }
        Field::ZipCode => "Invalid zip code. Must be non-empty and 5 digits.",
        Field::MobilePhoneNumber => {
            "Invalid phone number. Must be non-empty and 10 digits once spaces and symbols are removed."
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

fn is_free_text(_: &str) -> bool {
    true
}

fn predicate_for(field: Field) -> fn(&str) -> bool {
    match field {
        Field::FirstName | Field::LastName | Field::City => is_valid_name,
        Field::Gpa => is_valid_gpa,
        Field::Major => is_valid_major,
        Field::FacultyAdvisor => is_free_text,
        Field::Address => is_valid_address,
        Field::State => is_valid_state,
        Field::ZipCode => is_valid_zip,
        Field::MobilePhoneNumber => is_valid_phone,
    }
}

/// Trims, normalizes (phone only) and checks a required text column.
fn check_text(field: Field, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, ValidationReason::Empty));
    }
    let value = match field {
        Field::MobilePhoneNumber => normalize_phone(trimmed),
        _ => trimmed.to_string(),
    };
    if predicate_for(field)(&value) {
        Ok(value)
    } else {
        Err(ValidationError::new(field, ValidationReason::Invalid))
    }
}

fn check_gpa(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Gpa, ValidationReason::Empty));
    }
    parse_gpa(trimmed).ok_or(ValidationError::new(Field::Gpa, ValidationReason::Invalid))
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl StudentInput {
    /// Validates every field in column order, stopping at the first failure.
    pub fn validate(&self) -> Result<NewStudent, ValidationError> {
        Ok(NewStudent {
            first_name: check_text(Field::FirstName, &self.first_name)?,
            last_name: check_text(Field::LastName, &self.last_name)?,
            gpa: check_gpa(&self.gpa)?,
            major: check_text(Field::Major, &self.major)?,
            faculty_advisor: optional_text(self.faculty_advisor.as_deref()),
            address: check_text(Field::Address, &self.address)?,
            city: check_text(Field::City, &self.city)?,
            state: check_text(Field::State, &self.state)?,
            zip_code: check_text(Field::ZipCode, &self.zip_code)?,
            mobile_phone_number: check_text(Field::MobilePhoneNumber, &self.mobile_phone_number)?,
        })
    }
}

impl FieldUpdate {
    /// Builds an update for `field`, held to the same rule as on insert.
    pub fn parse(field: Field, raw: &str) -> Result<Self, ValidationError> {
        let value = match field {
            Field::Gpa => FieldValue::Gpa(check_gpa(raw)?),
            Field::FacultyAdvisor => match optional_text(Some(raw)) {
                Some(advisor) => FieldValue::Text(advisor),
                None => FieldValue::Null,
            },
            _ => FieldValue::Text(check_text(field, raw)?),
        };
        Ok(Self { field, value })
    }
}

impl SearchQuery {
    /// GPA queries must be a valid GPA; text queries must be non-blank.
    pub fn parse(field: SearchField, raw: &str) -> Result<Self, ValidationError> {
        let Some(text_field) = field.text_field() else {
            return check_gpa(raw).map(SearchQuery::GpaEquals);
        };

        let trimmed = raw.trim();
        let term = match field {
            SearchField::MobilePhoneNumber => normalize_phone(trimmed),
            _ => trimmed.to_string(),
        };
        if term.is_empty() {
            return Err(ValidationError::new(field.field(), ValidationReason::Empty));
        }
        Ok(SearchQuery::Contains {
            field: text_field,
            term,
        })
    }
}
