//! Scholarship record.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Level labels offered by the scholarship level filter.
pub const LEVELS: &[&str] = &["Class 10", "Class 12", "higher education", "Class 9"];

/// A scholarship programme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scholarship {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    /// Free-text level (e.g. "Class 10 students")
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub level: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub eligibility: String,
    /// Application page URL
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub link: String,
}
