// src/services/catalog.rs

//! Resource providers for the bundled collections.
//!
//! Each list view mounts, waits for a simulated network delay and then reads
//! its JSON collection. Colleges, ebooks and scholarships are stored as bare
//! arrays; courses and exams are wrapped in a root object.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::{
    College, Config, CourseCatalog, Ebook, ExamCatalog, ExamCategory, FieldOfStudy, Scholarship,
};

/// Source of one resource collection.
#[async_trait]
pub trait ResourceProvider<R>: Send + Sync {
    /// Resource name used in logs and errors.
    fn describe(&self) -> &str;

    /// Load the full collection.
    async fn load(&self) -> Result<Vec<R>>;
}

/// Top-level shape of a collection file.
pub trait CollectionDocument: DeserializeOwned + Send {
    type Item: Send;

    fn into_items(self) -> Vec<Self::Item>;
}

impl<T: DeserializeOwned + Send> CollectionDocument for Vec<T> {
    type Item = T;

    fn into_items(self) -> Vec<T> {
        self
    }
}

impl CollectionDocument for CourseCatalog {
    type Item = FieldOfStudy;

    fn into_items(self) -> Vec<FieldOfStudy> {
        self.fields_of_study
    }
}

impl CollectionDocument for ExamCatalog {
    type Item = ExamCategory;

    fn into_items(self) -> Vec<ExamCategory> {
        self.exam_categories
    }
}

/// Reads a JSON collection file after a fixed delay.
#[derive(Debug, Clone)]
pub struct JsonFileProvider<D> {
    name: String,
    path: PathBuf,
    delay: Duration,
    _document: PhantomData<fn() -> D>,
}

impl<D: CollectionDocument> JsonFileProvider<D> {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            delay: Duration::ZERO,
            _document: PhantomData,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Parse an in-memory document.
    pub fn parse(&self, bytes: &[u8]) -> Result<Vec<D::Item>> {
        serde_json::from_slice::<D>(bytes)
            .map(CollectionDocument::into_items)
            .map_err(|e| AppError::catalog(&self.name, e))
    }
}

#[async_trait]
impl<D: CollectionDocument> ResourceProvider<D::Item> for JsonFileProvider<D> {
    fn describe(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<D::Item>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::catalog(&self.name, format!("{}: {}", self.path.display(), e))
        })?;
        let items = self.parse(&bytes)?;
        log::info!("Loaded {} {} from {}", items.len(), self.name, self.path.display());
        Ok(items)
    }
}

/// Serves a fixed in-memory collection.
#[derive(Debug, Clone)]
pub struct StaticProvider<R> {
    name: String,
    items: Vec<R>,
    delay: Duration,
}

impl<R: Clone + Send + Sync> StaticProvider<R> {
    pub fn new(name: impl Into<String>, items: Vec<R>) -> Self {
        Self {
            name: name.into(),
            items,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl<R: Clone + Send + Sync> ResourceProvider<R> for StaticProvider<R> {
    fn describe(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<R>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.items.clone())
    }
}

/// Providers for every bundled collection, built from configuration.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub colleges: JsonFileProvider<Vec<College>>,
    pub courses: JsonFileProvider<CourseCatalog>,
    pub exams: JsonFileProvider<ExamCatalog>,
    pub ebooks: JsonFileProvider<Vec<Ebook>>,
    pub scholarships: JsonFileProvider<Vec<Scholarship>>,
}

impl CatalogSources {
    pub fn from_config(config: &Config) -> Self {
        let data = &config.data;
        let delay = Duration::from_millis(config.loading.delay_ms);
        let scholarship_delay = Duration::from_millis(config.loading.scholarship_delay_ms);

        Self {
            colleges: JsonFileProvider::new("colleges", data.path(&data.colleges))
                .with_delay(delay),
            courses: JsonFileProvider::new("courses", data.path(&data.courses)).with_delay(delay),
            exams: JsonFileProvider::new("exams", data.path(&data.exams)).with_delay(delay),
            ebooks: JsonFileProvider::new("ebooks", data.path(&data.ebooks)).with_delay(delay),
            scholarships: JsonFileProvider::new("scholarships", data.path(&data.scholarships))
                .with_delay(scholarship_delay),
        }
    }

    /// Load every collection concurrently.
    pub async fn load_all(&self) -> Result<Catalog> {
        let (colleges, fields, exam_categories, ebooks, scholarships) = futures::try_join!(
            self.colleges.load(),
            self.courses.load(),
            self.exams.load(),
            self.ebooks.load(),
            self.scholarships.load(),
        )?;

        Ok(Catalog {
            colleges,
            fields,
            exam_categories,
            ebooks,
            scholarships,
        })
    }
}

/// Every collection, fully loaded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub colleges: Vec<College>,
    pub fields: Vec<FieldOfStudy>,
    pub exam_categories: Vec<ExamCategory>,
    pub ebooks: Vec<Ebook>,
    pub scholarships: Vec<Scholarship>,
}
