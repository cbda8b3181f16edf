// src/models/exam.rs

//! Exam categories, sub-categories and exams.

use serde::{Deserialize, Serialize};

/// Root of the exams collection file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamCatalog {
    #[serde(default)]
    pub exam_categories: Vec<ExamCategory>,
}

/// Top-level exam grouping (e.g. "Civil Services").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamCategory {
    pub category_name: String,
    #[serde(default)]
    pub sub_categories: Vec<ExamSubCategory>,
}

/// Second-level grouping inside a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamSubCategory {
    pub sub_category_name: String,
    #[serde(default)]
    pub exams: Vec<Exam>,
}

/// A competitive or entrance exam.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub conducting_body: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub roles_or_courses: Vec<String>,
}

impl ExamCategory {
    /// Count exams across all sub-categories.
    pub fn exam_count(&self) -> usize {
        self.sub_categories.iter().map(|s| s.exams.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_count_spans_sub_categories() {
        let json = r#"{"examCategories": [{
            "categoryName": "Banking",
            "subCategories": [
                {"subCategoryName": "Clerical", "exams": [{"name": "IBPS Clerk", "abbreviation": "IBPS"}]},
                {"subCategoryName": "Officer", "exams": []}
            ]
        }]}"#;
        let catalog: ExamCatalog = serde_json::from_str(json).unwrap();
        let banking = &catalog.exam_categories[0];
        assert_eq!(banking.exam_count(), 1);
        assert_eq!(banking.sub_categories[1].sub_category_name, "Officer");
        assert!(banking.sub_categories[0].exams[0].roles_or_courses.is_empty());
    }
}
