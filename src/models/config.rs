//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::CoverPool;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Locations of the bundled collections
    #[serde(default)]
    pub data: DataConfig,

    /// Simulated loading behavior
    #[serde(default)]
    pub loading: LoadingConfig,

    /// Mock session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Card rendering limits and cover images
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative `data.dir` is resolved against the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        if config.data.dir.is_relative() {
            if let Some(base) = path.parent() {
                config.data.dir = base.join(&config.data.dir);
            }
        }
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in self.data.files() {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("data.{key} is empty")));
            }
        }
        if self.session.store_path.as_os_str().is_empty() {
            return Err(AppError::validation("session.store_path is empty"));
        }
        if self.session.min_password_length == 0 {
            return Err(AppError::validation(
                "session.min_password_length must be > 0",
            ));
        }
        if self.display.max_streams == 0 || self.display.max_facilities == 0 {
            return Err(AppError::validation(
                "display.max_streams and display.max_facilities must be > 0",
            ));
        }
        Ok(())
    }
}

/// Data directory and collection file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON collections, relative to the config file
    #[serde(default = "defaults::data_dir")]
    pub dir: PathBuf,

    #[serde(default = "defaults::colleges_file")]
    pub colleges: String,

    #[serde(default = "defaults::courses_file")]
    pub courses: String,

    #[serde(default = "defaults::exams_file")]
    pub exams: String,

    #[serde(default = "defaults::ebooks_file")]
    pub ebooks: String,

    #[serde(default = "defaults::scholarships_file")]
    pub scholarships: String,

    /// Chat assistant responses and quick suggestions
    #[serde(default = "defaults::chat_file")]
    pub chat: String,
}

impl DataConfig {
    /// Resolve a collection file against the data directory.
    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn files(&self) -> [(&'static str, &str); 6] {
        [
            ("colleges", self.colleges.as_str()),
            ("courses", self.courses.as_str()),
            ("exams", self.exams.as_str()),
            ("ebooks", self.ebooks.as_str()),
            ("scholarships", self.scholarships.as_str()),
            ("chat", self.chat.as_str()),
        ]
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: defaults::data_dir(),
            colleges: defaults::colleges_file(),
            courses: defaults::courses_file(),
            exams: defaults::exams_file(),
            ebooks: defaults::ebooks_file(),
            scholarships: defaults::scholarships_file(),
            chat: defaults::chat_file(),
        }
    }
}

/// Artificial delays applied before a collection becomes available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Delay for colleges, courses, exams and ebooks
    #[serde(default = "defaults::load_delay")]
    pub delay_ms: u64,

    #[serde(default = "defaults::scholarship_delay")]
    pub scholarship_delay_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            delay_ms: defaults::load_delay(),
            scholarship_delay_ms: defaults::scholarship_delay(),
        }
    }
}

/// Local mock session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// JSON file standing in for browser local storage
    #[serde(default = "defaults::store_path")]
    pub store_path: PathBuf,

    #[serde(default = "defaults::login_delay")]
    pub login_delay_ms: u64,

    /// Delay for Google/GitHub sign-in
    #[serde(default = "defaults::provider_delay")]
    pub provider_delay_ms: u64,

    #[serde(default = "defaults::logout_delay")]
    pub logout_delay_ms: u64,

    #[serde(default = "defaults::min_password_length")]
    pub min_password_length: usize,
}

impl SessionConfig {
    /// Same settings without any artificial delay.
    pub fn instant(mut self) -> Self {
        self.login_delay_ms = 0;
        self.provider_delay_ms = 0;
        self.logout_delay_ms = 0;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: defaults::store_path(),
            login_delay_ms: defaults::login_delay(),
            provider_delay_ms: defaults::provider_delay(),
            logout_delay_ms: defaults::logout_delay(),
            min_password_length: defaults::min_password_length(),
        }
    }
}

/// Card rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Streams shown on a college card before "+N more"
    #[serde(default = "defaults::max_streams")]
    pub max_streams: usize,

    /// Facilities shown on a college card before "+N"
    #[serde(default = "defaults::max_facilities")]
    pub max_facilities: usize,

    #[serde(default = "defaults::cover_pool")]
    pub covers: CoverPool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_streams: defaults::max_streams(),
            max_facilities: defaults::max_facilities(),
            covers: defaults::cover_pool(),
        }
    }
}

mod defaults {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use crate::models::CoverPool;

    // Data defaults
    pub fn data_dir() -> PathBuf {
        PathBuf::from("data")
    }
    pub fn colleges_file() -> String {
        "collegesData.json".into()
    }
    pub fn courses_file() -> String {
        "coursesData.json".into()
    }
    pub fn exams_file() -> String {
        "examsData.json".into()
    }
    pub fn ebooks_file() -> String {
        "ebooksData.json".into()
    }
    pub fn scholarships_file() -> String {
        "scholarships.json".into()
    }
    pub fn chat_file() -> String {
        "chatbot.json".into()
    }

    // Loading defaults
    pub fn load_delay() -> u64 {
        500
    }
    pub fn scholarship_delay() -> u64 {
        300
    }

    // Session defaults
    pub fn store_path() -> PathBuf {
        PathBuf::from(".session.json")
    }
    pub fn login_delay() -> u64 {
        1000
    }
    pub fn provider_delay() -> u64 {
        1500
    }
    pub fn logout_delay() -> u64 {
        500
    }
    pub fn min_password_length() -> usize {
        6
    }

    // Display defaults
    pub fn max_streams() -> usize {
        3
    }
    pub fn max_facilities() -> usize {
        4
    }
    pub fn cover_pool() -> CoverPool {
        let image =
            |id: &str| format!("https://images.unsplash.com/photo-{id}?w=200&h=280&fit=crop");

        let mut subjects = BTreeMap::new();
        subjects.insert(
            "Computer Science".to_string(),
            vec![image("1516321318423-f06f85e504b3"), image("1555949963-aa79dcee981c")],
        );
        subjects.insert(
            "Mathematics".to_string(),
            vec![image("1635070041078-e363dbe005cb"), image("1596495578065-6e0763fa1178")],
        );
        subjects.insert(
            "Physics".to_string(),
            vec![image("1636466497217-26a8cbeaf0aa"), image("1446776653964-20c1d3a81b06")],
        );

        CoverPool {
            default: vec![
                image("1543002588-bfa74002ed7e"),
                image("1481627834876-b7833e8f5570"),
                image("1544947950-fa07a98d237f"),
            ],
            subjects,
        }
    }
}
