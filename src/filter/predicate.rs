//! Predicate composition and per-record search fields.

use crate::models::{College, Course, Ebook, Exam, Scholarship};

use super::query::SearchQuery;

type Clause<'a, R> = Box<dyn Fn(&R) -> bool + 'a>;

/// Logical AND over a set of clauses. With no clauses it accepts everything.
pub struct Conjunction<'a, R: ?Sized> {
    clauses: Vec<Clause<'a, R>>,
}

impl<'a, R: ?Sized> Conjunction<'a, R> {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Add a clause that must hold.
    pub fn and(mut self, clause: impl Fn(&R) -> bool + 'a) -> Self {
        self.clauses.push(Box::new(clause));
        self
    }

    /// Add a clause only when its filter is active.
    pub fn and_if(self, active: bool, clause: impl Fn(&R) -> bool + 'a) -> Self {
        if active { self.and(clause) } else { self }
    }

    /// True when no clause is active.
    pub fn is_identity(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn test(&self, record: &R) -> bool {
        self.clauses.iter().all(|clause| clause(record))
    }
}

impl<R: ?Sized> Default for Conjunction<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Records that expose text fields to the free-text search.
pub trait Searchable {
    /// Every populated text field the search looks at.
    fn search_texts(&self) -> Vec<&str>;

    /// Inactive queries match everything.
    fn matches_search(&self, query: &SearchQuery) -> bool {
        !query.is_active() || query.matches_any(self.search_texts())
    }
}

impl Searchable for College {
    fn search_texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = [self.name(), self.city(), self.state()]
            .into_iter()
            .flatten()
            .collect();
        texts.extend(self.streams.iter().flat_map(|s| s.texts()));
        texts
    }
}

impl Searchable for Course {
    fn search_texts(&self) -> Vec<&str> {
        let mut texts = vec![
            self.course_name.as_str(),
            self.abbreviation.as_str(),
            self.description.as_str(),
        ];
        texts.extend(self.career_paths.iter().map(String::as_str));
        texts
    }
}

impl Searchable for Exam {
    fn search_texts(&self) -> Vec<&str> {
        let mut texts = vec![
            self.name.as_str(),
            self.abbreviation.as_str(),
            self.conducting_body.as_str(),
            self.purpose.as_str(),
        ];
        texts.extend(self.roles_or_courses.iter().map(String::as_str));
        texts
    }
}

impl Searchable for Ebook {
    fn search_texts(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.author.as_str(),
            self.subject.as_str(),
            self.publisher.as_str(),
        ]
    }
}

impl Searchable for Scholarship {
    fn search_texts(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.level.as_str(),
            self.eligibility.as_str(),
        ]
    }
}

/// Filter state for one list view.
///
/// `apply` always derives a fresh vector from the full source and never
/// mutates it.
pub trait ListFilter: Clone + Default + PartialEq {
    type Item: Clone;

    /// Replace the free-text search.
    fn set_search(&mut self, query: &str);

    /// Current search query.
    fn search(&self) -> &SearchQuery;

    /// True when no sub-filter is active.
    fn is_identity(&self) -> bool;

    /// Derive the visible subset.
    fn apply(&self, items: &[Self::Item]) -> Vec<Self::Item>;

    /// Number of leaf records (courses, exams) represented by `items`.
    fn leaf_count(items: &[Self::Item]) -> usize {
        items.len()
    }
}
