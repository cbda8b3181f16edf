// src/services/validate.rs

//! Consistency checks over the loaded catalog.

use std::collections::HashSet;
use std::fmt;

use crate::utils::parse_web_url;

use super::catalog::Catalog;

/// One problem found in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub resource: &'static str,
    pub record: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.resource, self.record, self.message)
    }
}

/// Outcome of [`validate_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub checked: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, resource: &'static str, record: &str, message: impl Into<String>) {
        self.issues.push(Issue {
            resource,
            record: record.to_string(),
            message: message.into(),
        });
    }

    fn check_unique<'a>(&mut self, resource: &'static str, ids: impl IntoIterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for id in ids {
            self.checked += 1;
            if id.trim().is_empty() {
                self.push(resource, id, "empty id");
            } else if !seen.insert(id) {
                self.push(resource, id, "duplicate id");
            }
        }
    }

    fn check_url(&mut self, resource: &'static str, record: &str, url: &str) {
        if let Err(e) = parse_web_url(url) {
            self.push(resource, record, format!("bad link '{url}': {e}"));
        }
    }
}

/// Check ids for uniqueness and links for well-formedness.
pub fn validate_catalog(catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.check_unique("colleges", catalog.colleges.iter().map(|c| c.id.as_str()));
    report.check_unique("courses", catalog.fields.iter().map(|f| f.id.as_str()));
    report.check_unique("ebooks", catalog.ebooks.iter().map(|e| e.ebook_id.as_str()));
    report.check_unique(
        "scholarships",
        catalog.scholarships.iter().map(|s| s.id.as_str()),
    );
    report.check_unique(
        "exams",
        catalog
            .exam_categories
            .iter()
            .map(|c| c.category_name.as_str()),
    );

    for college in &catalog.colleges {
        if let Some(website) = college.website() {
            report.check_url("colleges", &college.id, website);
        }
    }
    for scholarship in &catalog.scholarships {
        if scholarship.link.trim().is_empty() {
            report.push("scholarships", &scholarship.id, "missing link");
        } else {
            report.check_url("scholarships", &scholarship.id, &scholarship.link);
        }
    }

    for issue in &report.issues {
        log::warn!("{issue}");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reports_duplicates_and_bad_links() {
        let catalog = Catalog {
            colleges: serde_json::from_value(json!([
                {"id": "a", "contact": {"website": "https://a.edu"}},
                {"id": "a", "contact": {"website": "a.edu"}}
            ]))
            .unwrap(),
            scholarships: serde_json::from_value(json!([
                {"id": "s1", "link": "https://scholarships.gov.in"},
                {"id": "s2"}
            ]))
            .unwrap(),
            ..Catalog::default()
        };

        let report = validate_catalog(&catalog);
        assert!(!report.is_ok());
        assert_eq!(report.checked, 4);

        let messages: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
        assert_eq!(messages.len(), 3);
        assert!(messages[0].contains("duplicate id"));
        assert!(messages[1].contains("bad link 'a.edu'"));
        assert_eq!(messages[2], "scholarships 's2': missing link");
    }

    #[test]
    fn test_empty_catalog_is_ok() {
        assert!(validate_catalog(&Catalog::default()).is_ok());
    }
}
