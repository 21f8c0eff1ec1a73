//! # Derived View
//!
//! Pure functions projecting the local cache through the view filter: keyword
//! matching, given-name-first ordering, and the summary counters.

use crate::collation::{fold_diacritics, Collator};
use roster::Student;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "A → Z",
            SortDirection::Descending => "Z → A",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Search keyword and sort direction. Never persisted, never sent to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    pub keyword: String,
    pub direction: SortDirection,
}

/// The given-name-first sort key: the last word of the trimmed, lower-cased
/// name, followed by the remaining words in order.
///
/// "Nguyễn Văn An" becomes "an nguyễn văn".
pub fn given_name_key(full_name: &str) -> String {
    let cleaned = full_name.trim().to_lowercase();
    let mut parts: Vec<&str> = cleaned.split_whitespace().collect();
    match parts.pop() {
        Some(given) if parts.is_empty() => given.to_string(),
        Some(given) => format!("{given} {}", parts.join(" ")),
        None => String::new(),
    }
}

/// Whether `name` contains the already-folded keyword. An empty keyword matches.
fn matches_folded(name: &str, folded_keyword: &str) -> bool {
    folded_keyword.is_empty() || fold_diacritics(name).contains(folded_keyword)
}

/// Case- and diacritic-insensitive substring match. A blank keyword matches everything.
pub fn matches_keyword(name: &str, keyword: &str) -> bool {
    matches_folded(name, &fold_diacritics(keyword.trim()))
}

/// Orders two students by given name, then by full name, in `direction`.
///
/// Students whose names collate equally fall back to their ids so the order is
/// reproducible; that last step ignores the direction.
pub fn compare_students(
    a: &Student,
    b: &Student,
    collator: &dyn Collator,
    direction: SortDirection,
) -> Ordering {
    let by_name = collator
        .compare(&given_name_key(&a.name), &given_name_key(&b.name))
        .then_with(|| collator.compare(&a.name, &b.name));
    direction.apply(by_name).then_with(|| a.id.cmp(&b.id))
}

/// The filtered and sorted projection of `cache`.
pub fn derive_view<'a>(
    cache: &'a [Student],
    filter: &ViewFilter,
    collator: &dyn Collator,
) -> Vec<&'a Student> {
    let keyword = fold_diacritics(filter.keyword.trim());
    let mut view: Vec<&Student> = cache
        .iter()
        .filter(|s| matches_folded(&s.name, &keyword))
        .collect();
    view.sort_by(|a, b| compare_students(a, b, collator, filter.direction));
    view
}

/// Counters shown next to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSummary {
    pub total: usize,
    pub shown: usize,
    pub keyword: Option<String>,
    pub direction: SortDirection,
}

pub fn summarize(cache: &[Student], filter: &ViewFilter, shown: usize) -> ViewSummary {
    let keyword = filter.keyword.trim();
    ViewSummary {
        total: cache.len(),
        shown,
        keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
        direction: filter.direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation::{BaseLetterCollator, VietnameseCollator};
    use chrono::Utc;

    fn student(id: &str, name: &str) -> Student {
        let now = Utc::now();
        Student {
            id: id.to_string(),
            name: name.to_string(),
            age: 16,
            class: "10A1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn names(view: &[&Student]) -> Vec<String> {
        view.iter().map(|s| s.name.clone()).collect()
    }

    #[test]
    fn given_name_comes_first() {
        assert_eq!(given_name_key("  Nguyễn  Văn An "), "an nguyễn văn");
        assert_eq!(given_name_key("Bình"), "bình");
        assert_eq!(given_name_key("   "), "");
    }

    #[test]
    fn keyword_matching_folds_diacritics() {
        assert!(matches_keyword("Việt Nam", "viet"));
        assert!(matches_keyword("Phạm Quốc Việt", "QUOC"));
        assert!(matches_keyword("Anyone", " "));
        assert!(matches_keyword("Anyone", ""));
        assert!(!matches_keyword("Trần Thị Bình", "châu"));
    }

    #[test]
    fn given_name_beats_family_name() {
        let cache = vec![
            student("1", "Trần Thị Bình"),
            student("2", "Vũ Văn An"),
            student("3", "an"),
            student("4", "ĐỖ BÌNH"),
        ];
        for collator in [&VietnameseCollator as &dyn Collator, &BaseLetterCollator] {
            let view = derive_view(&cache, &ViewFilter::default(), collator);
            let given: Vec<String> = view.iter().map(|s| given_name_key(&s.name)).collect();
            let an_last = given.iter().rposition(|k| k.starts_with("an")).unwrap();
            let binh_first = given.iter().position(|k| k.starts_with("b")).unwrap();
            assert!(an_last < binh_first, "{}: {given:?}", collator.name());
        }
    }

    #[test]
    fn ties_on_given_name_use_full_name() {
        let cache = vec![student("1", "Trần Văn An"), student("2", "Lê Thị An")];
        let view = derive_view(&cache, &ViewFilter::default(), &VietnameseCollator);
        assert_eq!(names(&view), vec!["Lê Thị An", "Trần Văn An"]);
    }

    #[test]
    fn toggling_reverses_non_equal_pairs() {
        let cache = vec![
            student("1", "Nguyễn Văn An"),
            student("2", "Trần Thị Bình"),
            student("3", "Lê Minh Châu"),
            student("4", "Phạm Quốc Việt"),
        ];
        let mut filter = ViewFilter::default();
        let ascending = names(&derive_view(&cache, &filter, &VietnameseCollator));
        filter.direction = filter.direction.toggled();
        let mut descending = names(&derive_view(&cache, &filter, &VietnameseCollator));
        descending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn equal_names_keep_a_stable_order() {
        let cache = vec![student("b", "Nguyễn Văn An"), student("a", "nguyen van an")];
        let mut filter = ViewFilter::default();
        let ascending: Vec<_> = derive_view(&cache, &filter, &BaseLetterCollator)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        filter.direction = SortDirection::Descending;
        let descending: Vec<_> = derive_view(&cache, &filter, &BaseLetterCollator)
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ascending, vec!["a", "b"]);
        assert_eq!(descending, vec!["a", "b"]);
    }

    #[test]
    fn summary_reports_counts() {
        let cache = vec![student("1", "Nguyễn Văn An"), student("2", "Trần Thị Bình")];
        let filter = ViewFilter {
            keyword: " bình ".to_string(),
            direction: SortDirection::Descending,
        };
        let shown = derive_view(&cache, &filter, &VietnameseCollator).len();
        let summary = summarize(&cache, &filter, shown);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.shown, 1);
        assert_eq!(summary.keyword.as_deref(), Some("bình"));
        assert_eq!(summary.direction.label(), "Z → A");
    }
}
