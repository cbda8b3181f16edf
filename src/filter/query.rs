//! Filter inputs: the free-text search query and categorical selections.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Sentinel value meaning "no restriction" in a categorical filter.
pub const ALL: &str = "all";

/// Normalized, case-insensitive search text.
///
/// An empty or whitespace-only query is inactive and matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// The normalized text being searched for.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring test against one field.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    /// Missing fields never match an active query.
    pub fn matches_opt(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.matches(t))
    }

    /// True if any of the fields contains the query.
    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>) -> bool {
        texts.into_iter().any(|t| self.matches(t))
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A categorical filter value: either unrestricted or a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Selection<T> {
    /// Exact equality test; `All` accepts anything, including a missing value.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected),
        }
    }
}

impl Selection<String> {
    /// Exact equality against a borrowed string field.
    pub fn matches_str(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Test whether a raw input is the "all" sentinel (or blank).
pub fn is_all_sentinel(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL)
}

impl<T> FromStr for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if is_all_sentinel(raw) {
            return Ok(Self::All);
        }
        raw.trim()
            .parse()
            .map(Self::Only)
            .map_err(|e| AppError::validation(format!("Invalid filter value '{raw}': {e}")))
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}
