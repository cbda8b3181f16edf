// src/models/college.rs

//! College record and its optional nested sections.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lenient;

/// Placeholder shown when a college has no name.
pub const NAME_PLACEHOLDER: &str = "College Name";
/// Placeholder shown when a college has no city.
pub const CITY_PLACEHOLDER: &str = "City";
/// Placeholder shown when a college has no state.
pub const STATE_PLACEHOLDER: &str = "State";

/// Ownership category of a college.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollegeType {
    Government,
    Private,
    Other(String),
}

impl CollegeType {
    /// Parse a raw `type` value. Matching ignores case and surrounding space.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "government" => Self::Government,
            "private" => Self::Private,
            other => Self::Other(other.to_string()),
        }
    }

    /// Human-readable label used on cards.
    pub fn label(&self) -> &str {
        match self {
            Self::Government => "Government",
            Self::Private => "Private",
            Self::Other(raw) => raw,
        }
    }
}

impl FromStr for CollegeType {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(raw))
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A college or university.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct College {
    /// Unique identifier
    #[serde(alias = "collegeId")]
    pub id: String,

    /// Display name
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub location: Option<Location>,

    /// Raw ownership type (`government`, `private`)
    #[serde(default, rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub rankings: Option<Rankings>,

    /// Streams offered (plain names or `{code, name}` objects)
    #[serde(default, deserialize_with = "lenient::items")]
    pub streams: Vec<Stream>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub fees: Option<Fees>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub placements: Option<Placements>,

    #[serde(default, deserialize_with = "lenient::items")]
    pub facilities: Vec<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub contact: Option<Contact>,
}

impl College {
    /// Name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// City, if present and non-empty.
    pub fn city(&self) -> Option<&str> {
        non_empty(self.location.as_ref().and_then(|l| l.city.as_deref()))
    }

    /// State, if present and non-empty.
    pub fn state(&self) -> Option<&str> {
        non_empty(self.location.as_ref().and_then(|l| l.state.as_deref()))
    }

    /// Parsed ownership type, if the record carries one.
    pub fn college_type(&self) -> Option<CollegeType> {
        non_empty(self.kind.as_deref()).map(CollegeType::parse)
    }

    /// NIRF rank, if ranked.
    pub fn nirf_rank(&self) -> Option<u32> {
        self.rankings.as_ref().and_then(|r| r.nirf)
    }

    /// Total annual fees in rupees.
    pub fn total_fees(&self) -> Option<u64> {
        self.fees.as_ref().and_then(|f| f.total)
    }

    /// Average placement package in rupees.
    pub fn average_package(&self) -> Option<u64> {
        self.placements.as_ref().and_then(|p| p.average_package)
    }

    pub fn phone(&self) -> Option<&str> {
        non_empty(self.contact.as_ref().and_then(|c| c.phone.as_deref()))
    }

    pub fn website(&self) -> Option<&str> {
        non_empty(self.contact.as_ref().and_then(|c| c.website.as_deref()))
    }

    /// Name with placeholder fallback.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(NAME_PLACEHOLDER)
    }

    /// `City, State` with per-part placeholder fallbacks.
    pub fn display_location(&self) -> String {
        format!(
            "{}, {}",
            self.city().unwrap_or(CITY_PLACEHOLDER),
            self.state().unwrap_or(STATE_PLACEHOLDER)
        )
    }
}

/// Geographic location of a college.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Rankings {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub nirf: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Fees {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Placements {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub average_package: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub website: Option<String>,
}

/// A stream offered by a college.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Stream {
    Plain(String),
    Detailed {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl Stream {
    /// Short label: the code, else the name, else the plain string.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Plain(value) => non_empty(Some(value)),
            Self::Detailed { code, name } => {
                non_empty(code.as_deref()).or_else(|| non_empty(name.as_deref()))
            }
        }
    }

    /// Every text value carried by the stream.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::Plain(value) => vec![value.as_str()],
            Self::Detailed { code, name } => {
                code.iter().chain(name.iter()).map(String::as_str).collect()
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
