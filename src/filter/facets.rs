//! Distinct option values for filter dropdowns.
//!
//! Records with a missing or blank facet value are skipped. Each helper
//! deduplicates and applies the ordering its dropdown uses.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use crate::models::{College, CollegeType, Ebook, ExamCategory, FieldOfStudy, SCHOLARSHIP_LEVELS};

/// Distinct values in first-seen order.
pub fn distinct_in_order<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Distinct values in ascending order.
pub fn distinct_sorted<T, I>(values: I) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    values.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// States with at least one college, ascending.
pub fn college_states(colleges: &[College]) -> Vec<String> {
    distinct_sorted(colleges.iter().filter_map(College::state).map(str::to_string))
}

/// Ownership types present in the collection, ascending.
pub fn college_types(colleges: &[College]) -> Vec<CollegeType> {
    distinct_sorted(colleges.iter().filter_map(College::college_type))
}

/// `(id, name)` of every field of study, in source order.
pub fn course_fields(fields: &[FieldOfStudy]) -> Vec<(String, String)> {
    distinct_in_order(
        fields
            .iter()
            .filter(|f| present(&f.id))
            .map(|f| (f.id.clone(), f.field_name.clone())),
    )
}

/// Course durations, ascending.
///
/// Sorting is plain string order, so "10 Years" sorts before "2 Years".
pub fn course_durations(fields: &[FieldOfStudy]) -> Vec<String> {
    distinct_sorted(
        fields
            .iter()
            .flat_map(|f| &f.courses)
            .map(|c| c.duration.as_str())
            .filter(|d| present(d))
            .map(str::to_string),
    )
}

/// Exam category names, in source order.
pub fn exam_categories(categories: &[ExamCategory]) -> Vec<String> {
    distinct_in_order(
        categories
            .iter()
            .map(|c| c.category_name.as_str())
            .filter(|name| present(name))
            .map(str::to_string),
    )
}

/// Sub-category names across all categories, ascending.
pub fn exam_sub_categories(categories: &[ExamCategory]) -> Vec<String> {
    distinct_sorted(
        categories
            .iter()
            .flat_map(|c| &c.sub_categories)
            .map(|s| s.sub_category_name.as_str())
            .filter(|name| present(name))
            .map(str::to_string),
    )
}

/// Ebook subjects, ascending.
pub fn ebook_subjects(ebooks: &[Ebook]) -> Vec<String> {
    distinct_sorted(ebooks.iter().filter_map(Ebook::subject).map(str::to_string))
}

/// Publication years, newest first.
pub fn ebook_years(ebooks: &[Ebook]) -> Vec<i32> {
    let mut years = distinct_sorted(ebooks.iter().filter_map(|e| e.year));
    years.reverse();
    years
}

/// Fixed scholarship level options.
pub fn scholarship_levels() -> Vec<String> {
    SCHOLARSHIP_LEVELS.iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_states_skip_missing_and_sort() {
        let colleges: Vec<College> = serde_json::from_value(json!([
            {"id": "a", "location": {"state": "Tamil Nadu"}},
            {"id": "b", "location": {"city": "Pune"}},
            {"id": "c"},
            {"id": "d", "location": {"state": "Karnataka"}},
            {"id": "e", "location": {"state": "Tamil Nadu"}}
        ]))
        .unwrap();
        assert_eq!(college_states(&colleges), vec!["Karnataka", "Tamil Nadu"]);
    }

    #[test]
    fn test_college_types_deduplicate() {
        let colleges: Vec<College> = serde_json::from_value(json!([
            {"id": "a", "type": "private"},
            {"id": "b", "type": "Government"},
            {"id": "c", "type": "government"},
            {"id": "d"}
        ]))
        .unwrap();
        assert_eq!(
            college_types(&colleges),
            vec![CollegeType::Government, CollegeType::Private]
        );
    }

    #[test]
    fn test_ebook_years_descending() {
        let ebooks: Vec<Ebook> = serde_json::from_value(json!([
            {"ebookId": "1", "year": 2019, "subject": "Physics"},
            {"ebookId": "2", "year": 2022, "subject": "Biology"},
            {"ebookId": "3", "subject": ""},
            {"ebookId": "4", "year": 2019, "subject": "Physics"}
        ]))
        .unwrap();
        assert_eq!(ebook_years(&ebooks), vec![2022, 2019]);
        assert_eq!(ebook_subjects(&ebooks), vec!["Biology", "Physics"]);
    }

    #[test]
    fn test_course_and_exam_facets() {
        let fields: Vec<FieldOfStudy> = serde_json::from_value(json!([
            {"id": "medical", "fieldName": "Medical", "courses": [{"duration": "5.5 Years"}]},
            {"id": "engineering", "fieldName": "Engineering",
             "courses": [{"duration": "4 Years"}, {"duration": "4 Years"}, {"duration": ""}]}
        ]))
        .unwrap();
        assert_eq!(course_durations(&fields), vec!["4 Years", "5.5 Years"]);
        assert_eq!(
            course_fields(&fields),
            vec![
                ("medical".to_string(), "Medical".to_string()),
                ("engineering".to_string(), "Engineering".to_string())
            ]
        );

        let categories: Vec<ExamCategory> = serde_json::from_value(json!([
            {"categoryName": "Defence", "subCategories": [{"subCategoryName": "Officer"}]},
            {"categoryName": "Banking", "subCategories": [
                {"subCategoryName": "Clerical"}, {"subCategoryName": "Officer"}
            ]}
        ]))
        .unwrap();
        assert_eq!(exam_categories(&categories), vec!["Defence", "Banking"]);
        assert_eq!(exam_sub_categories(&categories), vec!["Clerical", "Officer"]);
    }

    #[test]
    fn test_distinct_in_order_keeps_first() {
        assert_eq!(distinct_in_order([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
