//! # Cache Sanitation
//!
//! List payloads are decoded entry by entry so one malformed record cannot
//! poison the local cache. Anything that does not decode into a well-formed
//! `Student` is dropped and counted.

use roster::Student;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Students decoded from a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub students: Vec<Student>,
    /// Entries that were discarded as malformed.
    pub discarded: usize,
}

fn is_well_formed(student: &Student) -> bool {
    !student.id.trim().is_empty()
        && !student.name.trim().is_empty()
        && !student.class.trim().is_empty()
        && student.age >= 0
}

/// Keeps the well-formed entries in their original order. Repeated ids keep
/// their first occurrence.
pub fn sanitize_entries(entries: Vec<Value>) -> Listing {
    let mut seen = HashSet::new();
    let mut listing = Listing::default();

    for entry in entries {
        let student = match serde_json::from_value::<Student>(entry) {
            Ok(student) if is_well_formed(&student) => student,
            Ok(student) => {
                warn!(id = %student.id, "Discarding student with invalid fields.");
                listing.discarded += 1;
                continue;
            }
            Err(e) => {
                warn!("Discarding undecodable student entry: {}", e);
                listing.discarded += 1;
                continue;
            }
        };
        if !seen.insert(student.id.clone()) {
            warn!(id = %student.id, "Discarding duplicate student id.");
            listing.discarded += 1;
            continue;
        }
        listing.students.push(student);
    }

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, name: &str, age: i64) -> Value {
        json!({
            "id": id,
            "name": name,
            "age": age,
            "class": "10A1",
            "createdAt": "2026-10-01T08:00:00Z",
            "updatedAt": "2026-10-01T08:00:00Z"
        })
    }

    #[test]
    fn drops_malformed_entries() {
        let entries = vec![
            entry("1", "Nguyễn Văn An", 16),
            json!({ "id": "2", "name": "No age" }),
            entry("3", "  ", 15),
            entry("4", "Lê Minh Châu", -2),
            json!("not an object"),
            entry("1", "Duplicate", 10),
            entry("5", "Trần Thị Bình", 15),
        ];

        let listing = sanitize_entries(entries);
        let ids: Vec<_> = listing.students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5"]);
        assert_eq!(listing.discarded, 5);
    }
}
