//! Filters for the flat collections: colleges, ebooks and scholarships.

use std::cmp::Ordering;

use crate::models::{College, CollegeType, Ebook, Scholarship};

use super::predicate::{Conjunction, ListFilter, Searchable};
use super::query::{SearchQuery, Selection};

/// College list filter: search, ownership type and state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollegeFilter {
    pub search: SearchQuery,
    pub kind: Selection<CollegeType>,
    pub state: Selection<String>,
}

impl CollegeFilter {
    pub fn predicate(&self) -> Conjunction<'_, College> {
        Conjunction::new()
            .and_if(self.search.is_active(), |c: &College| {
                c.matches_search(&self.search)
            })
            .and_if(!self.kind.is_all(), |c: &College| {
                self.kind.matches(c.college_type().as_ref())
            })
            .and_if(!self.state.is_all(), |c: &College| {
                self.state.matches_str(c.state())
            })
    }
}

impl ListFilter for CollegeFilter {
    type Item = College;

    fn set_search(&mut self, query: &str) {
        self.search = SearchQuery::new(query);
    }

    fn search(&self) -> &SearchQuery {
        &self.search
    }

    fn is_identity(&self) -> bool {
        self.predicate().is_identity()
    }

    fn apply(&self, items: &[College]) -> Vec<College> {
        let predicate = self.predicate();
        items.iter().filter(|c| predicate.test(c)).cloned().collect()
    }
}

/// Ebook list filter: search, subject and publication year.
///
/// Results are ordered by popularity, highest first. Equal popularity keeps
/// source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EbookFilter {
    pub search: SearchQuery,
    pub subject: Selection<String>,
    pub year: Selection<i32>,
}

impl EbookFilter {
    pub fn predicate(&self) -> Conjunction<'_, Ebook> {
        Conjunction::new()
            .and_if(self.search.is_active(), |e: &Ebook| {
                e.matches_search(&self.search)
            })
            .and_if(!self.subject.is_all(), |e: &Ebook| {
                self.subject.matches_str(e.subject())
            })
            .and_if(!self.year.is_all(), |e: &Ebook| {
                self.year.matches(e.year.as_ref())
            })
    }
}

/// Descending popularity; NaN ranks below every number.
fn by_popularity(a: &Ebook, b: &Ebook) -> Ordering {
    let rank = |e: &Ebook| {
        let p = e.popularity();
        if p.is_nan() { f64::NEG_INFINITY } else { p }
    };
    rank(b).total_cmp(&rank(a))
}

impl ListFilter for EbookFilter {
    type Item = Ebook;

    fn set_search(&mut self, query: &str) {
        self.search = SearchQuery::new(query);
    }

    fn search(&self) -> &SearchQuery {
        &self.search
    }

    fn is_identity(&self) -> bool {
        self.predicate().is_identity()
    }

    fn apply(&self, items: &[Ebook]) -> Vec<Ebook> {
        let predicate = self.predicate();
        let mut visible: Vec<Ebook> = items.iter().filter(|e| predicate.test(e)).cloned().collect();
        // `sort_by` is stable
        visible.sort_by(by_popularity);
        visible
    }
}

/// Scholarship list filter: search and level.
///
/// Levels are free text ("Class 10 students"), so a level selection matches
/// when the record's level contains the selected label, ignoring case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScholarshipFilter {
    pub search: SearchQuery,
    pub level: Selection<String>,
}

impl ScholarshipFilter {
    pub fn predicate(&self) -> Conjunction<'_, Scholarship> {
        let level = self.level.selected().map(|l| SearchQuery::new(l));

        Conjunction::new()
            .and_if(self.search.is_active(), |s: &Scholarship| {
                s.matches_search(&self.search)
            })
            .and_if(level.is_some(), move |s: &Scholarship| {
                level.as_ref().is_some_and(|l| l.matches(&s.level))
            })
    }
}

impl ListFilter for ScholarshipFilter {
    type Item = Scholarship;

    fn set_search(&mut self, query: &str) {
        self.search = SearchQuery::new(query);
    }

    fn search(&self) -> &SearchQuery {
        &self.search
    }

    fn is_identity(&self) -> bool {
        self.predicate().is_identity()
    }

    fn apply(&self, items: &[Scholarship]) -> Vec<Scholarship> {
        let predicate = self.predicate();
        items.iter().filter(|s| predicate.test(s)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn colleges() -> Vec<College> {
        serde_json::from_value(json!([
            {"id": "c1", "name": "IIT Madras", "type": "government",
             "location": {"city": "Chennai", "state": "Tamil Nadu"},
             "streams": [{"code": "B.Tech", "name": "Engineering"}]},
            {"id": "c2", "name": "St. Xavier's College", "type": "private",
             "location": {"city": "Mumbai", "state": "Maharashtra"},
             "streams": [{"code": "B.Sc.", "name": "Science"}, "B.Com"]},
            {"id": "c3", "name": "Fergusson College", "type": "government",
             "location": {"city": "Pune"},
             "streams": ["B.A."]}
        ]))
        .unwrap()
    }

    fn ebooks(popularity: &[f64]) -> Vec<Ebook> {
        popularity
            .iter()
            .enumerate()
            .map(|(i, p)| {
                serde_json::from_value(json!({
                    "ebookId": format!("e{i}"),
                    "title": format!("Book {i}"),
                    "subject": if i % 2 == 0 { "Physics" } else { "Biology" },
                    "year": 2018 + i as i32,
                    "metadata": {"popularity": p}
                }))
                .unwrap()
            })
            .collect()
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id(i).to_string()).collect()
    }

    #[test]
    fn test_search_science_finds_stream() {
        let mut filter = CollegeFilter::default();
        filter.set_search("science");
        let result = filter.apply(&colleges());
        assert_eq!(ids(&result, |c| &c.id), vec!["c2"]);
    }

    #[test]
    fn test_type_and_state_combine() {
        let filter = CollegeFilter {
            kind: Selection::Only(CollegeType::Government),
            state: Selection::Only("Tamil Nadu".to_string()),
            ..CollegeFilter::default()
        };
        assert_eq!(ids(&filter.apply(&colleges()), |c| &c.id), vec!["c1"]);
    }

    #[test]
    fn test_state_filter_excludes_missing_state() {
        let filter = CollegeFilter {
            state: Selection::Only("Maharashtra".to_string()),
            ..CollegeFilter::default()
        };
        assert_eq!(ids(&filter.apply(&colleges()), |c| &c.id), vec!["c2"]);
    }

    #[test]
    fn test_missing_state_still_searchable_by_name() {
        let mut filter = CollegeFilter::default();
        filter.set_search("fergusson");
        assert_eq!(ids(&filter.apply(&colleges()), |c| &c.id), vec!["c3"]);
    }

    #[test]
    fn test_ebooks_sorted_by_popularity() {
        let result = EbookFilter::default().apply(&ebooks(&[10.0, 90.0, 45.0]));
        let popularity: Vec<f64> = result.iter().map(Ebook::popularity).collect();
        assert_eq!(popularity, vec![90.0, 45.0, 10.0]);
    }

    #[test]
    fn test_ebook_ties_keep_source_order() {
        let result = EbookFilter::default().apply(&ebooks(&[50.0, 50.0, 70.0, 50.0]));
        assert_eq!(ids(&result, |e| &e.ebook_id), vec!["e2", "e0", "e1", "e3"]);
    }

    #[test]
    fn test_nan_popularity_sorts_last() {
        let mut books = ebooks(&[10.0, 0.0, 45.0]);
        books[1].metadata.popularity = f64::NAN;
        let result = EbookFilter::default().apply(&books);
        assert_eq!(ids(&result, |e| &e.ebook_id), vec!["e2", "e0", "e1"]);
    }

    #[test]
    fn test_ebook_subject_and_year() {
        let books = ebooks(&[1.0, 2.0, 3.0, 4.0]);
        let filter = EbookFilter {
            subject: Selection::Only("Physics".to_string()),
            year: Selection::Only(2020),
            ..EbookFilter::default()
        };
        assert_eq!(ids(&filter.apply(&books), |e| &e.ebook_id), vec!["e2"]);
    }

    #[test]
    fn test_scholarship_level_is_substring() {
        let items: Vec<Scholarship> = serde_json::from_value(json!([
            {"id": "s1", "name": "Merit Award", "level": "Class 10 students", "eligibility": "75% marks"},
            {"id": "s2", "name": "Post Matric", "level": "Higher Education", "eligibility": "Income below 2.5 lakh"}
        ]))
        .unwrap();

        let filter = ScholarshipFilter {
            level: Selection::Only("higher education".to_string()),
            ..ScholarshipFilter::default()
        };
        assert_eq!(ids(&filter.apply(&items), |s| &s.id), vec!["s2"]);

        let mut filter = ScholarshipFilter::default();
        filter.set_search("LAKH");
        assert_eq!(ids(&filter.apply(&items), |s| &s.id), vec!["s2"]);
    }

    #[test]
    fn test_identity_filter() {
        let filter = CollegeFilter::default();
        assert!(filter.is_identity());
        assert_eq!(filter.apply(&colleges()), colleges());
    }
}
