// src/lib.rs

//! Career Catalog Library
//!
//! Colleges, courses, exams, ebooks and scholarships for students choosing a
//! career path, with the list-filter-sort views that browse them.

pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
