//! # Field Validation
//!
//! The server-side rules every stored student must satisfy. Text fields are
//! trimmed before they are checked and the trimmed value is what gets stored.

use crate::{
    errors::{Field, StoreError},
    types::{StudentFields, StudentPatch},
};

/// Turns a create payload into a full field set, reporting the first missing field.
pub fn require_fields(patch: StudentPatch) -> Result<StudentFields, StoreError> {
    let name = patch
        .name
        .ok_or_else(|| StoreError::invalid(Field::Name, "name is required"))?;
    let age = patch
        .age
        .ok_or_else(|| StoreError::invalid(Field::Age, "age is required"))?;
    let class = patch
        .class
        .ok_or_else(|| StoreError::invalid(Field::Class, "class is required"))?;
    validate_fields(StudentFields { name, age, class })
}

/// Trims and validates a full set of fields, returning the normalized copy.
pub fn validate_fields(fields: StudentFields) -> Result<StudentFields, StoreError> {
    let name = fields.name.trim().to_string();
    if name.is_empty() {
        return Err(StoreError::invalid(Field::Name, "name is required"));
    }
    if fields.age < 0 {
        return Err(StoreError::invalid(
            Field::Age,
            format!("age must be 0 or greater, got {}", fields.age),
        ));
    }
    let class = fields.class.trim().to_string();
    if class.is_empty() {
        return Err(StoreError::invalid(Field::Class, "class is required"));
    }

    Ok(StudentFields {
        name,
        age: fields.age,
        class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, age: i64, class: &str) -> StudentFields {
        StudentFields {
            name: name.to_string(),
            age,
            class: class.to_string(),
        }
    }

    #[test]
    fn trims_text_fields() {
        let valid = validate_fields(fields("  Nguyễn Văn An ", 16, " 10A1 ")).unwrap();
        assert_eq!(valid.name, "Nguyễn Văn An");
        assert_eq!(valid.class, "10A1");
    }

    #[test]
    fn zero_age_is_allowed() {
        assert!(validate_fields(fields("An", 0, "10A1")).is_ok());
    }

    #[test]
    fn missing_create_fields_are_reported() {
        let patch = StudentPatch {
            name: Some("An".to_string()),
            age: None,
            class: Some("10A1".to_string()),
        };
        let err = require_fields(patch).unwrap_err();
        assert_eq!(err, StoreError::invalid(Field::Age, "age is required"));
    }

    #[test]
    fn rejects_each_field() {
        let err = validate_fields(fields("   ", 16, "10A1")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: Field::Name, .. }));

        let err = validate_fields(fields("An", -1, "10A1")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: Field::Age, .. }));

        let err = validate_fields(fields("An", 16, "")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput { field: Field::Class, .. }));
    }
}
