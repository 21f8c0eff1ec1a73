//! # Edit Session and Form
//!
//! The form either creates a new student or edits one cached student. Input is
//! checked here before any request is sent, using the same rules the server
//! applies plus the stricter ones the form imposes (a positive age).

use roster::{Field, Student, StudentFields};
use thiserror::Error;

/// What a submit will do.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditSession {
    #[default]
    Creating,
    Editing(String),
}

impl EditSession {
    pub fn target(&self) -> Option<&str> {
        match self {
            EditSession::Creating => None,
            EditSession::Editing(id) => Some(id),
        }
    }
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub age: String,
    pub class: String,
}

impl FormFields {
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age.to_string(),
            class: student.class.clone(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Age => self.age = value,
            Field::Class => self.class = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormRules {
    /// Minimum class label length in characters, after trimming.
    pub min_class_len: usize,
}

impl Default for FormRules {
    fn default() -> Self {
        Self { min_class_len: 1 }
    }
}

/// Client-side rejections. Each one names the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter the student's full name.")]
    EmptyName,
    #[error("Age must be a whole number greater than 0.")]
    InvalidAge,
    #[error("Class must be at least {min} character(s) long.")]
    ClassTooShort { min: usize },
}

impl FormError {
    pub fn field(&self) -> Field {
        match self {
            FormError::EmptyName => Field::Name,
            FormError::InvalidAge => Field::Age,
            FormError::ClassTooShort { .. } => Field::Class,
        }
    }
}

fn parse_age(raw: &str) -> Result<i64, FormError> {
    let age: f64 = raw.trim().parse().map_err(|_| FormError::InvalidAge)?;
    if !age.is_finite() || age <= 0.0 || age.fract() != 0.0 || age > i64::MAX as f64 {
        return Err(FormError::InvalidAge);
    }
    Ok(age as i64)
}

/// Checks the form and returns the trimmed fields to send.
pub fn validate_form(fields: &FormFields, rules: FormRules) -> Result<StudentFields, FormError> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(FormError::EmptyName);
    }
    let age = parse_age(&fields.age)?;
    let class = fields.class.trim();
    let min = rules.min_class_len.max(1);
    if class.chars().count() < min {
        return Err(FormError::ClassTooShort { min });
    }

    Ok(StudentFields {
        name: name.to_string(),
        age,
        class: class.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, age: &str, class: &str) -> FormFields {
        FormFields {
            name: name.to_string(),
            age: age.to_string(),
            class: class.to_string(),
        }
    }

    #[test]
    fn accepts_and_trims() {
        let fields = validate_form(&form(" Nguyễn Văn An ", " 16 ", "10A1 "), FormRules::default())
            .unwrap();
        assert_eq!(fields.name, "Nguyễn Văn An");
        assert_eq!(fields.age, 16);
        assert_eq!(fields.class, "10A1");
    }

    #[test]
    fn rejects_bad_ages() {
        for age in ["", "abc", "0", "-4", "16.5", "NaN", "inf"] {
            let err = validate_form(&form("An", age, "10A1"), FormRules::default()).unwrap_err();
            assert_eq!(err, FormError::InvalidAge, "age {age:?}");
            assert_eq!(err.field(), Field::Age);
        }
    }

    #[test]
    fn rejects_blank_name_first() {
        let err = validate_form(&form("  ", "0", ""), FormRules::default()).unwrap_err();
        assert_eq!(err, FormError::EmptyName);
    }

    #[test]
    fn enforces_class_minimum() {
        let rules = FormRules { min_class_len: 3 };
        let err = validate_form(&form("An", "16", " 9A "), rules).unwrap_err();
        assert_eq!(err, FormError::ClassTooShort { min: 3 });
        assert!(validate_form(&form("An", "16", "10A1"), rules).is_ok());

        let err = validate_form(&form("An", "16", ""), FormRules { min_class_len: 0 }).unwrap_err();
        assert_eq!(err, FormError::ClassTooShort { min: 1 });
    }
}
