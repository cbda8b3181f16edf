// src/models/user.rs

//! Signed-in user and profile data structures.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a user signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Email,
    Google,
    Github,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The currently signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub photo_url: String,
    pub provider: AuthProvider,
    pub created_at: DateTime<Utc>,
    pub last_login_at: DateTime<Utc>,
}

impl User {
    /// Apply the fields present in `update`.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(value) = &update.display_name {
            self.display_name = value.clone();
        }
        if let Some(value) = &update.first_name {
            self.first_name = value.clone();
        }
        if let Some(value) = &update.last_name {
            self.last_name = value.clone();
        }
        if let Some(value) = &update.phone {
            self.phone = value.clone();
        }
        if let Some(value) = &update.photo_url {
            self.photo_url = value.clone();
        }
    }
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

/// Extra fields collected by the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupDetails {
    pub display_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl SignupDetails {
    /// Explicit display name, else `first last`.
    pub fn resolved_display_name(&self) -> String {
        match &self.display_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        }
    }
}

/// Personal details used by the chat assistant to tailor answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub semester: String,
}

impl From<&User> for StudentProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user.display_name.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            uid: "dummy_1".to_string(),
            email: "priya.sharma@test.com".to_string(),
            display_name: "Priya Sharma".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Sharma".to_string(),
            phone: String::new(),
            photo_url: String::new(),
            provider: AuthProvider::Email,
            created_at: now,
            last_login_at: now,
        }
    }

    #[test]
    fn test_apply_partial_update() {
        let mut user = sample_user();
        user.apply(&ProfileUpdate {
            phone: Some("+91 90000 00000".to_string()),
            ..ProfileUpdate::default()
        });
        assert_eq!(user.phone, "+91 90000 00000");
        assert_eq!(user.display_name, "Priya Sharma");
    }

    #[test]
    fn test_resolved_display_name() {
        let details = SignupDetails {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            ..SignupDetails::default()
        };
        assert_eq!(details.resolved_display_name(), "Asha Rao");
    }

    #[test]
    fn test_provider_serializes_lowercase() {
        let json = serde_json::to_string(&AuthProvider::Github).unwrap();
        assert_eq!(json, "\"github\"");
    }
}
