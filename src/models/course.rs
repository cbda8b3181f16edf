// src/models/course.rs

//! Fields of study and the courses nested under them.

use serde::{Deserialize, Serialize};

/// Root of the courses collection file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseCatalog {
    #[serde(default)]
    pub fields_of_study: Vec<FieldOfStudy>,
}

/// A field of study grouping related courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldOfStudy {
    /// Unique identifier (e.g. "engineering")
    pub id: String,

    /// Display name
    #[serde(default)]
    pub field_name: String,

    /// Icon name used by the front end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub courses: Vec<Course>,
}

/// A single course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub eligibility: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub career_paths: Vec<String>,
}
