// src/models/ebook.rs

//! Ebook record and cover image selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lenient;

/// An ebook in the digital library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ebook {
    pub ebook_id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub author: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub publisher: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub pages: Option<u32>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub format: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub language: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub metadata: EbookMetadata,
    #[serde(default, deserialize_with = "lenient::items")]
    pub images: Vec<String>,
}

/// Popularity and verification flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EbookMetadata {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub verified: bool,
}

impl Ebook {
    pub fn popularity(&self) -> f64 {
        self.metadata.popularity
    }

    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        Some(self.subject.as_str()).filter(|s| !s.trim().is_empty())
    }

    /// Cover image: the first bundled image, else a stable pick from the pool.
    ///
    /// `index` is the ebook's position in the source collection, so two copies
    /// of the same title still get distinct covers.
    pub fn cover_image<'a>(&'a self, index: usize, pool: &'a CoverPool) -> Option<&'a str> {
        if let Some(first) = self.images.first() {
            return Some(first);
        }

        let candidates = pool.candidates(&self.subject);
        if candidates.is_empty() {
            return None;
        }

        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        let seed = format!("{}-{}-{}-{}", self.title, self.author, year, index);
        let slot = seed_hash(&seed).unsigned_abs() as usize % candidates.len();
        Some(candidates[slot])
    }
}

/// 32-bit rolling string hash (`h * 31 + c`, wrapping).
fn seed_hash(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Cover image URLs keyed by subject, with a `default` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoverPool {
    #[serde(default)]
    pub default: Vec<String>,
    #[serde(default)]
    pub subjects: BTreeMap<String, Vec<String>>,
}

impl CoverPool {
    /// Default covers followed by the subject's covers (or the defaults again).
    fn candidates(&self, subject: &str) -> Vec<&str> {
        let subject_images = self.subjects.get(subject).unwrap_or(&self.default);
        self.default
            .iter()
            .chain(subject_images.iter())
            .map(String::as_str)
            .collect()
    }
}
