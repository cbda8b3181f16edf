//! Service layer for the catalog application.
//!
//! This module contains:
//! - Collection loading (`ResourceProvider`, `CatalogSources`)
//! - Sign-in state (`SessionProvider`, `LocalSessionProvider`)
//! - The keyword chat assistant (`ChatAssistant`)
//! - Screen navigation (`Navigation`, `History`)
//! - Catalog consistency checks (`validate_catalog`)

mod catalog;
mod chat;
mod navigation;
mod session;
mod validate;

pub use catalog::{
    Catalog, CatalogSources, CollectionDocument, JsonFileProvider, ResourceProvider,
    StaticProvider,
};
pub use chat::{ChatAssistant, Intent, Reply, ResponseBook, detect_intent};
pub use navigation::{History, Navigation, Screen};
pub use session::{
    ACCOUNTS_KEY, Account, LocalSessionProvider, SESSION_KEY, SessionProvider, builtin_accounts,
    password_digest,
};
pub use validate::{Issue, ValidationReport, validate_catalog};
