// src/models/mod.rs

//! Domain models for the catalog application.
//!
//! This module contains all data structures used throughout the application,
//! organized by resource type.

mod college;
mod config;
mod course;
mod ebook;
mod exam;
mod lenient;
mod scholarship;
mod user;

// Re-export all public types
pub use college::{
    CITY_PLACEHOLDER, College, CollegeType, Contact, Fees, Location, NAME_PLACEHOLDER,
    Placements, Rankings, STATE_PLACEHOLDER, Stream,
};
pub use config::{Config, DataConfig, DisplayConfig, LoadingConfig, SessionConfig};
pub use course::{Course, CourseCatalog, FieldOfStudy};
pub use ebook::{CoverPool, Ebook, EbookMetadata};
pub use exam::{Exam, ExamCatalog, ExamCategory, ExamSubCategory};
pub use scholarship::{LEVELS as SCHOLARSHIP_LEVELS, Scholarship};
pub use user::{AuthProvider, ProfileUpdate, SignupDetails, StudentProfile, User};
