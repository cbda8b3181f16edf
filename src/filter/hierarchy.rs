//! Filters for nested collections.
//!
//! Leaf predicates run on courses and exams. A parent survives only while it
//! still holds at least one leaf, so the output mirrors the source shape with
//! empty branches pruned. With no leaf-level filter active, parents are kept
//! as they are, including empty ones.

use crate::models::{Course, Exam, ExamCategory, ExamSubCategory, FieldOfStudy};

use super::predicate::{Conjunction, ListFilter, Searchable};
use super::query::{SearchQuery, Selection};

/// Courses view filter: search, field of study and duration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseFilter {
    pub search: SearchQuery,
    /// Field of study id
    pub field: Selection<String>,
    pub duration: Selection<String>,
}

impl CourseFilter {
    /// Predicate over a single course.
    pub fn course_predicate(&self) -> Conjunction<'_, Course> {
        Conjunction::new()
            .and_if(self.search.is_active(), |c: &Course| {
                c.matches_search(&self.search)
            })
            .and_if(!self.duration.is_all(), |c: &Course| {
                self.duration.matches_str(Some(c.duration.as_str()))
            })
    }
}

impl ListFilter for CourseFilter {
    type Item = FieldOfStudy;

    fn set_search(&mut self, query: &str) {
        self.search = SearchQuery::new(query);
    }

    fn search(&self) -> &SearchQuery {
        &self.search
    }

    fn is_identity(&self) -> bool {
        self.field.is_all() && self.course_predicate().is_identity()
    }

    fn apply(&self, fields: &[FieldOfStudy]) -> Vec<FieldOfStudy> {
        let predicate = self.course_predicate();

        fields
            .iter()
            .filter(|field| self.field.matches_str(Some(field.id.as_str())))
            .filter_map(|field| {
                if predicate.is_identity() {
                    return Some(field.clone());
                }
                let courses: Vec<Course> = field
                    .courses
                    .iter()
                    .filter(|c| predicate.test(c))
                    .cloned()
                    .collect();
                (!courses.is_empty()).then(|| FieldOfStudy {
                    id: field.id.clone(),
                    field_name: field.field_name.clone(),
                    icon: field.icon.clone(),
                    courses,
                })
            })
            .collect()
    }

    fn leaf_count(fields: &[FieldOfStudy]) -> usize {
        fields.iter().map(|f| f.courses.len()).sum()
    }
}

/// Exams view filter: search, category and sub-category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExamFilter {
    pub search: SearchQuery,
    /// Category name
    pub category: Selection<String>,
    /// Sub-category name
    pub sub_category: Selection<String>,
}

impl ExamFilter {
    /// Predicate over a single exam.
    pub fn exam_predicate(&self) -> Conjunction<'_, Exam> {
        Conjunction::new().and_if(self.search.is_active(), |e: &Exam| {
            e.matches_search(&self.search)
        })
    }

    fn prune_sub_category(
        &self,
        sub: &ExamSubCategory,
        predicate: &Conjunction<'_, Exam>,
    ) -> Option<ExamSubCategory> {
        if !self.sub_category.matches_str(Some(sub.sub_category_name.as_str())) {
            return None;
        }
        if predicate.is_identity() {
            return Some(sub.clone());
        }
        let exams: Vec<Exam> = sub.exams.iter().filter(|e| predicate.test(e)).cloned().collect();
        (!exams.is_empty()).then(|| ExamSubCategory {
            sub_category_name: sub.sub_category_name.clone(),
            exams,
        })
    }
}

impl ListFilter for ExamFilter {
    type Item = ExamCategory;

    fn set_search(&mut self, query: &str) {
        self.search = SearchQuery::new(query);
    }

    fn search(&self) -> &SearchQuery {
        &self.search
    }

    fn is_identity(&self) -> bool {
        self.category.is_all() && self.sub_category.is_all() && !self.search.is_active()
    }

    fn apply(&self, categories: &[ExamCategory]) -> Vec<ExamCategory> {
        let predicate = self.exam_predicate();
        let prunes_branches = !predicate.is_identity() || !self.sub_category.is_all();

        categories
            .iter()
            .filter(|category| {
                self.category
                    .matches_str(Some(category.category_name.as_str()))
            })
            .filter_map(|category| {
                if !prunes_branches {
                    return Some(category.clone());
                }
                let sub_categories: Vec<ExamSubCategory> = category
                    .sub_categories
                    .iter()
                    .filter_map(|sub| self.prune_sub_category(sub, &predicate))
                    .collect();
                (!sub_categories.is_empty()).then(|| ExamCategory {
                    category_name: category.category_name.clone(),
                    sub_categories,
                })
            })
            .collect()
    }

    fn leaf_count(categories: &[ExamCategory]) -> usize {
        categories.iter().map(ExamCategory::exam_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> Vec<FieldOfStudy> {
        serde_json::from_value(json!([
            {"id": "engineering", "fieldName": "Engineering", "courses": [
                {"courseName": "Computer Science", "abbreviation": "B.Tech CSE", "duration": "4 Years",
                 "description": "Software and systems", "careerPaths": ["Software Engineer"]},
                {"courseName": "Civil Engineering", "abbreviation": "B.Tech CE", "duration": "4 Years",
                 "description": "Structures", "careerPaths": ["Site Engineer"]}
            ]},
            {"id": "medical", "fieldName": "Medical", "courses": [
                {"courseName": "Medicine", "abbreviation": "MBBS", "duration": "5.5 Years",
                 "description": "Clinical practice", "careerPaths": ["Doctor"]}
            ]},
            {"id": "arts", "fieldName": "Arts", "courses": []}
        ]))
        .unwrap()
    }

    fn categories() -> Vec<ExamCategory> {
        serde_json::from_value(json!([
            {"categoryName": "Civil Services", "subCategories": [
                {"subCategoryName": "Central", "exams": [
                    {"name": "Civil Services Examination", "abbreviation": "UPSC CSE",
                     "conductingBody": "UPSC", "purpose": "Recruitment to IAS and IPS",
                     "rolesOrCourses": ["IAS", "IPS"]}
                ]},
                {"subCategoryName": "State", "exams": [
                    {"name": "State PSC", "abbreviation": "PSC", "conductingBody": "State PSC",
                     "purpose": "State administrative services", "rolesOrCourses": ["Deputy Collector"]}
                ]}
            ]},
            {"categoryName": "Banking", "subCategories": [
                {"subCategoryName": "Clerical", "exams": [
                    {"name": "IBPS Clerk", "abbreviation": "IBPS", "conductingBody": "IBPS",
                     "purpose": "Clerical cadre in public sector banks", "rolesOrCourses": ["Clerk"]}
                ]}
            ]}
        ]))
        .unwrap()
    }

    #[test]
    fn test_course_search_prunes_fields() {
        let mut filter = CourseFilter::default();
        filter.set_search("doctor");
        let result = filter.apply(&fields());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "medical");
        assert_eq!(CourseFilter::leaf_count(&result), 1);
    }

    #[test]
    fn test_course_field_and_duration() {
        let filter = CourseFilter {
            field: Selection::Only("engineering".to_string()),
            duration: Selection::Only("4 Years".to_string()),
            ..CourseFilter::default()
        };
        let result = filter.apply(&fields());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].courses.len(), 2);

        let filter = CourseFilter {
            field: Selection::Only("engineering".to_string()),
            duration: Selection::Only("5.5 Years".to_string()),
            ..CourseFilter::default()
        };
        assert!(filter.apply(&fields()).is_empty());
    }

    #[test]
    fn test_course_identity_keeps_empty_fields() {
        let result = CourseFilter::default().apply(&fields());
        assert_eq!(result, fields());
    }

    #[test]
    fn test_exam_purpose_search_keeps_ancestors() {
        let mut filter = ExamFilter::default();
        filter.set_search("administrative");
        let result = filter.apply(&categories());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category_name, "Civil Services");
        assert_eq!(result[0].sub_categories.len(), 1);
        assert_eq!(result[0].sub_categories[0].sub_category_name, "State");
        assert_eq!(result[0].sub_categories[0].exams[0].abbreviation, "PSC");
    }

    #[test]
    fn test_exam_role_search() {
        let mut filter = ExamFilter::default();
        filter.set_search("ips");
        let result = filter.apply(&categories());
        // "IBPS" does not contain "ips"; UPSC CSE lists IPS as a role
        assert_eq!(ExamFilter::leaf_count(&result), 1);
        assert_eq!(result[0].sub_categories[0].sub_category_name, "Central");
    }

    #[test]
    fn test_exam_sub_category_selection() {
        let filter = ExamFilter {
            sub_category: Selection::Only("Clerical".to_string()),
            ..ExamFilter::default()
        };
        let result = filter.apply(&categories());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category_name, "Banking");
    }

    #[test]
    fn test_exam_category_mismatch_is_empty() {
        let filter = ExamFilter {
            category: Selection::Only("Banking".to_string()),
            sub_category: Selection::Only("Central".to_string()),
            ..ExamFilter::default()
        };
        assert!(filter.apply(&categories()).is_empty());
    }
}
