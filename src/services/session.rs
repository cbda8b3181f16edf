// src/services/session.rs

//! Session provider: who is signed in, and the flows that change it.
//!
//! Consumers hold one [`SessionProvider`] and call [`SessionProvider::subscribe`]
//! once to follow sign-in changes. [`LocalSessionProvider`] is the mock backend:
//! it checks a small set of built-in accounts plus accounts created through
//! sign-up, keeps the signed-in user in a [`KeyValueStore`] and waits a
//! configured delay before each call completes.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::{Mutex, watch};

use crate::error::{AppError, Result};
use crate::models::{AuthProvider, ProfileUpdate, SessionConfig, SignupDetails, User};
use crate::storage::{KeyValueStore, KeyValueStoreExt};

/// Store key holding the signed-in user.
pub const SESSION_KEY: &str = "sessionUser";
/// Store key holding accounts created through sign-up.
pub const ACCOUNTS_KEY: &str = "accounts";

const PLACEHOLDER_AVATAR: &str = "/placeholder.svg";

/// Sign-in state and the operations that change it.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Receiver that observes every sign-in change.
    fn subscribe(&self) -> watch::Receiver<Option<User>>;

    async fn login(&self, email: &str, password: &str) -> Result<User>;

    async fn signup(&self, email: &str, password: &str, details: SignupDetails) -> Result<User>;

    /// Sign in through an external identity provider.
    async fn sign_in_with(&self, provider: AuthProvider) -> Result<User>;

    async fn logout(&self) -> Result<()>;

    /// Merge `update` into the signed-in user.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User>;
}

/// Credentials and profile of a known account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub email: String,
    /// SHA-256 of the password, hex encoded
    pub password_sha256: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub photo_url: String,
}

impl Account {
    fn new(email: &str, password: &str, name: (&str, &str), phone: &str, photo: &str) -> Self {
        Self {
            email: email.to_string(),
            password_sha256: password_digest(password),
            display_name: format!("{} {}", name.0, name.1),
            first_name: name.0.to_string(),
            last_name: name.1.to_string(),
            phone: phone.to_string(),
            photo_url: photo.to_string(),
        }
    }

    fn verify(&self, password: &str) -> bool {
        self.password_sha256 == password_digest(password)
    }

    fn to_user(&self, uid: String, provider: AuthProvider) -> User {
        let now = Utc::now();
        User {
            uid,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            photo_url: self.photo_url.clone(),
            provider,
            created_at: now,
            last_login_at: now,
        }
    }
}

/// Hex-encoded SHA-256 digest of a password.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Accounts that exist before anyone signs up.
pub fn builtin_accounts() -> Vec<Account> {
    vec![
        Account::new(
            "vigneshramesh@test.com",
            "test123",
            ("Vignesh", "Ramesh"),
            "+91 98765 43210",
            PLACEHOLDER_AVATAR,
        ),
        Account::new(
            "priya.sharma@test.com",
            "test123",
            ("Priya", "Sharma"),
            "+91 98765 43211",
            "/professional-student-portrait.png",
        ),
        Account::new(
            "admin@test.com",
            "admin123",
            ("Admin", "User"),
            "+91 98765 43212",
            PLACEHOLDER_AVATAR,
        ),
    ]
}

fn social_account(provider: AuthProvider) -> Option<Account> {
    let (email, first, phone) = match provider {
        AuthProvider::Google => ("google.user@gmail.com", "Google", "+91 98765 43213"),
        AuthProvider::Github => ("github.user@github.com", "GitHub", "+91 98765 43214"),
        AuthProvider::Email => return None,
    };
    Some(Account {
        email: email.to_string(),
        password_sha256: String::new(),
        display_name: format!("{first} Test User"),
        first_name: first.to_string(),
        last_name: "User".to_string(),
        phone: phone.to_string(),
        photo_url: PLACEHOLDER_AVATAR.to_string(),
    })
}

fn uid(prefix: &str) -> String {
    format!("{prefix}_{}", Utc::now().timestamp_millis())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mock session backend over a key-value store.
pub struct LocalSessionProvider<S> {
    store: S,
    config: SessionConfig,
    email_pattern: Regex,
    tx: watch::Sender<Option<User>>,
    // Held across the duplicate check and the accounts write
    signup_lock: Mutex<()>,
}

impl<S: KeyValueStore> LocalSessionProvider<S> {
    /// Build a provider, restoring any saved session from the store.
    ///
    /// A saved session that no longer parses is discarded.
    pub async fn restore(store: S, config: SessionConfig) -> Result<Self> {
        let restored: Result<Option<User>> = store.get_json(SESSION_KEY).await;
        let saved = match restored {
            Ok(user) => user,
            Err(AppError::Json(e)) => {
                log::warn!("Discarding unreadable saved session: {}", e);
                store.remove(SESSION_KEY).await?;
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(user) = &saved {
            log::info!("Restored session for {}", user.email);
        }

        let email_pattern = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .map_err(|e| AppError::config(format!("email pattern: {e}")))?;

        Ok(Self {
            store,
            config,
            email_pattern,
            tx: watch::Sender::new(saved),
            signup_lock: Mutex::new(()),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn pause(&self, millis: u64) {
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    /// Built-in accounts followed by signed-up ones.
    async fn accounts(&self) -> Result<Vec<Account>> {
        let mut accounts = builtin_accounts();
        let stored: Vec<Account> = self.store.get_json(ACCOUNTS_KEY).await?.unwrap_or_default();
        accounts.extend(stored);
        Ok(accounts)
    }

    async fn find_account(&self, email: &str) -> Result<Option<Account>> {
        let email = normalize_email(email);
        Ok(self
            .accounts()
            .await?
            .into_iter()
            .find(|a| normalize_email(&a.email) == email))
    }

    async fn save_session(&self, user: User) -> Result<User> {
        self.store.set_json(SESSION_KEY, &user).await?;
        self.tx.send_replace(Some(user.clone()));
        Ok(user)
    }

    fn validate_signup(&self, email: &str, password: &str) -> Result<()> {
        if !self.email_pattern.is_match(email.trim()) {
            return Err(AppError::auth("Please enter a valid email address"));
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(AppError::auth(format!(
                "Password must be at least {} characters long",
                self.config.min_password_length
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore> SessionProvider for LocalSessionProvider<S> {
    fn current_user(&self) -> Option<User> {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.tx.subscribe()
    }

    async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.pause(self.config.login_delay_ms).await;

        let account = self
            .find_account(email)
            .await?
            .filter(|a| a.verify(password))
            .ok_or_else(|| AppError::auth("Invalid email or password"))?;

        log::info!("Signed in {}", account.email);
        self.save_session(account.to_user(uid("dummy"), AuthProvider::Email))
            .await
    }

    async fn signup(&self, email: &str, password: &str, details: SignupDetails) -> Result<User> {
        self.pause(self.config.login_delay_ms).await;
        self.validate_signup(email, password)?;

        let _guard = self.signup_lock.lock().await;
        if self.find_account(email).await?.is_some() {
            return Err(AppError::auth("User already exists with this email"));
        }

        let account = Account {
            email: email.trim().to_string(),
            password_sha256: password_digest(password),
            display_name: details.resolved_display_name(),
            first_name: details.first_name,
            last_name: details.last_name,
            phone: details.phone,
            photo_url: PLACEHOLDER_AVATAR.to_string(),
        };

        let mut stored: Vec<Account> = self.store.get_json(ACCOUNTS_KEY).await?.unwrap_or_default();
        stored.push(account.clone());
        self.store.set_json(ACCOUNTS_KEY, &stored).await?;

        log::info!("Created account {}", account.email);
        self.save_session(account.to_user(uid("dummy"), AuthProvider::Email))
            .await
    }

    async fn sign_in_with(&self, provider: AuthProvider) -> Result<User> {
        let account = social_account(provider)
            .ok_or_else(|| AppError::auth("Email accounts sign in with a password"))?;
        self.pause(self.config.provider_delay_ms).await;

        log::info!("Signed in {} via {}", account.email, provider);
        let prefix = format!("{provider}_dummy");
        self.save_session(account.to_user(uid(&prefix), provider))
            .await
    }

    async fn logout(&self) -> Result<()> {
        self.pause(self.config.logout_delay_ms).await;
        self.store.remove(SESSION_KEY).await?;
        if let Some(user) = self.tx.send_replace(None) {
            log::info!("Signed out {}", user.email);
        }
        Ok(())
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        self.pause(self.config.login_delay_ms).await;

        let mut user = self
            .current_user()
            .ok_or_else(|| AppError::auth("No user is signed in"))?;
        user.apply(&update);
        self.save_session(user).await
    }
}
