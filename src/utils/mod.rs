//! Utility functions and helpers.

pub mod format;

use url::Url;

use crate::error::{AppError, Result};

/// Parse an absolute `http`/`https` URL.
pub fn parse_web_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::validation(format!(
            "unsupported URL scheme '{other}' in {raw}"
        ))),
    }
}

/// Extract the host from a URL string, without a leading `www.`.
pub fn display_host(url_str: &str) -> Option<String> {
    Url::parse(url_str.trim())
        .ok()
        .and_then(|u| u.host_str().map(|s| s.trim_start_matches("www.").to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_url() {
        assert!(parse_web_url("https://scholarships.gov.in").is_ok());
        assert!(matches!(parse_web_url("not a url"), Err(AppError::Url(_))));
        assert!(matches!(
            parse_web_url("ftp://example.com/file"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_display_host() {
        assert_eq!(
            display_host("https://www.iitm.ac.in/admissions"),
            Some("iitm.ac.in".to_string())
        );
        assert_eq!(display_host("iitm.ac.in"), None);
    }
}
