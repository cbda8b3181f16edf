// src/filter/mod.rs

//! List filtering: search queries, categorical selections, predicate
//! composition, facet enumeration and derived view state.

pub mod facets;
mod hierarchy;
mod predicate;
mod query;
mod records;
mod view;

pub use hierarchy::{CourseFilter, ExamFilter};
pub use predicate::{Conjunction, ListFilter, Searchable};
pub use query::{ALL, SearchQuery, Selection, is_all_sentinel};
pub use records::{CollegeFilter, EbookFilter, ScholarshipFilter};
pub use view::{ListView, ViewState};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{College, CollegeType};
    use serde_json::json;

    fn fixture() -> Vec<College> {
        serde_json::from_value(json!([
            {"id": "1", "name": "IIT Madras", "type": "government",
             "location": {"city": "Chennai", "state": "Tamil Nadu"},
             "streams": [{"code": "B.Tech", "name": "Engineering"}]},
            {"id": "2", "name": "Loyola College", "type": "private",
             "location": {"city": "Chennai", "state": "Tamil Nadu"},
             "streams": [{"code": "B.Sc.", "name": "Science"}]},
            {"id": "3", "name": "IISc", "type": "government",
             "location": {"city": "Bengaluru", "state": "Karnataka"},
             "streams": ["Science"]},
            {"id": "4", "name": "Christ University", "type": "private",
             "location": {"city": "Bengaluru"}},
            {"id": "5", "type": "government"}
        ]))
        .unwrap()
    }

    fn every_filter() -> Vec<CollegeFilter> {
        let searches = ["", "chennai", "science", "IIT", "zzz"];
        let kinds = [
            Selection::All,
            Selection::Only(CollegeType::Government),
            Selection::Only(CollegeType::Private),
        ];
        let states = [
            Selection::All,
            Selection::Only("Tamil Nadu".to_string()),
            Selection::Only("Karnataka".to_string()),
        ];

        let mut filters = Vec::new();
        for search in searches {
            for kind in &kinds {
                for state in &states {
                    filters.push(CollegeFilter {
                        search: SearchQuery::new(search),
                        kind: kind.clone(),
                        state: state.clone(),
                    });
                }
            }
        }
        filters
    }

    /// Reference check written independently of `Conjunction`.
    fn satisfies_all(college: &College, filter: &CollegeFilter) -> bool {
        let search_ok = !filter.search.is_active()
            || college.search_texts().iter().any(|t| {
                t.to_lowercase().contains(filter.search.as_str())
            });
        let kind_ok = match &filter.kind {
            Selection::All => true,
            Selection::Only(kind) => college.college_type().as_ref() == Some(kind),
        };
        let state_ok = match &filter.state {
            Selection::All => true,
            Selection::Only(state) => college.state() == Some(state.as_str()),
        };
        search_ok && kind_ok && state_ok
    }

    #[test]
    fn test_predicate_is_conjunction_of_active_filters() {
        let colleges = fixture();
        for filter in every_filter() {
            let predicate = filter.predicate();
            for college in &colleges {
                assert_eq!(
                    predicate.test(college),
                    satisfies_all(college, &filter),
                    "college {} under {:?}",
                    college.id,
                    filter
                );
            }
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let colleges = fixture();
        for filter in every_filter() {
            let once = filter.apply(&colleges);
            let twice = filter.apply(&once);
            assert_eq!(once, twice, "{filter:?}");
        }
    }

    #[test]
    fn test_identity_returns_source_in_order() {
        let colleges = fixture();
        let filter = CollegeFilter::default();
        assert!(filter.is_identity());
        assert_eq!(filter.apply(&colleges), colleges);

        assert_eq!(CourseFilter::default().apply(&[]), vec![]);
        assert!(ExamFilter::default().is_identity());
    }

    #[test]
    fn test_missing_state_excluded_from_facet_but_searchable() {
        let colleges = fixture();
        let states = facets::college_states(&colleges);
        assert_eq!(states, vec!["Karnataka", "Tamil Nadu"]);

        let mut filter = CollegeFilter::default();
        filter.set_search("christ");
        let found = filter.apply(&colleges);
        assert_eq!(found.len(), 1);
        assert!(found[0].state().is_none());
    }
}
