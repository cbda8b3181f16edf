//! Derived view state for one list screen.
//!
//! A [`ListView`] owns the filter inputs and the visible subset. Every input
//! change recomputes the subset from the full source; setting an input to the
//! value it already holds does nothing.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::services::ResourceProvider;

use super::predicate::ListFilter;

/// Loading lifecycle of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Source not yet available
    Loading,
    /// Source loaded, nothing passes the filter
    Empty,
    /// Number of visible top-level items
    Ready(usize),
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::Empty => f.write_str("empty"),
            Self::Ready(n) => write!(f, "ready ({n})"),
        }
    }
}

/// Source collection, filter inputs and the derived visible subset.
#[derive(Debug, Clone)]
pub struct ListView<F: ListFilter> {
    source: Option<Arc<Vec<F::Item>>>,
    filter: F,
    visible: Vec<F::Item>,
}

impl<F: ListFilter> Default for ListView<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ListFilter> ListView<F> {
    /// An empty view in the loading state.
    pub fn new() -> Self {
        Self::with_filter(F::default())
    }

    /// A loading view with preset filter inputs.
    pub fn with_filter(filter: F) -> Self {
        Self {
            source: None,
            filter,
            visible: Vec::new(),
        }
    }

    /// Load the source through a provider and recompute.
    pub async fn load_from<P>(&mut self, provider: &P) -> Result<()>
    where
        P: ResourceProvider<F::Item> + ?Sized,
    {
        let items = provider.load().await?;
        log::debug!("{}: loaded {} items", provider.describe(), items.len());
        self.set_source(items);
        Ok(())
    }

    /// Replace the source collection.
    pub fn set_source(&mut self, items: impl Into<Arc<Vec<F::Item>>>) {
        self.source = Some(items.into());
        self.recompute();
    }

    /// Replace the search text. Returns whether anything changed.
    pub fn set_search(&mut self, query: &str) -> bool {
        self.update(|filter| filter.set_search(query))
    }

    /// Edit the filter inputs. Recomputes only when the inputs changed.
    pub fn update(&mut self, edit: impl FnOnce(&mut F)) -> bool {
        let mut next = self.filter.clone();
        edit(&mut next);
        if next == self.filter {
            return false;
        }
        self.filter = next;
        self.recompute();
        true
    }

    /// Clear every filter input.
    pub fn reset(&mut self) -> bool {
        self.update(|filter| *filter = F::default())
    }

    fn recompute(&mut self) {
        self.visible = match &self.source {
            Some(source) => self.filter.apply(source),
            None => Vec::new(),
        };
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// The visible subset, in display order.
    pub fn visible(&self) -> &[F::Item] {
        &self.visible
    }

    /// The full source, if loaded.
    pub fn source(&self) -> Option<&[F::Item]> {
        self.source.as_deref().map(Vec::as_slice)
    }

    pub fn is_loading(&self) -> bool {
        self.source.is_none()
    }

    pub fn state(&self) -> ViewState {
        match (&self.source, self.visible.len()) {
            (None, _) => ViewState::Loading,
            (Some(_), 0) => ViewState::Empty,
            (Some(_), n) => ViewState::Ready(n),
        }
    }

    /// Leaf records in the source.
    pub fn total(&self) -> usize {
        self.source().map(F::leaf_count).unwrap_or(0)
    }

    /// `(visible leaves, total leaves)`.
    pub fn showing(&self) -> (usize, usize) {
        (F::leaf_count(&self.visible), self.total())
    }

    /// "Showing X of Y" line for list headers.
    pub fn summary(&self) -> String {
        let (shown, total) = self.showing();
        format!("Showing {shown} of {total}")
    }
}
