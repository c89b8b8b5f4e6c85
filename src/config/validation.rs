use url::Url;

use crate::config::Site;
use crate::error::{Result, WorkbaseError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a URL scheme for site configuration
    pub fn validate_scheme(scheme: &str) -> Result<()> {
        if scheme != "http" && scheme != "https" {
            return Err(WorkbaseError::Validation(format!(
                "Site scheme must be 'http' or 'https', got: {}",
                scheme
            )));
        }
        Ok(())
    }

    /// Validate a site domain (host, optionally with port)
    pub fn validate_domain(domain: &str) -> Result<()> {
        if domain.is_empty() {
            return Err(WorkbaseError::Validation(
                "Site domain must not be empty".to_string(),
            ));
        }

        if domain.contains("://") {
            return Err(WorkbaseError::Validation(format!(
                "Site domain must not include a scheme, got: {}",
                domain
            )));
        }

        // The domain is only ever used composed with a scheme; validate the
        // composition the same way it will be consumed.
        let composed = format!("http://{}", domain);
        Url::parse(&composed).map_err(|e| {
            WorkbaseError::Validation(format!("Invalid site domain '{}': {}", domain, e))
        })?;

        Ok(())
    }

    /// Validate a full site record
    pub fn validate_site(site: &Site) -> Result<()> {
        Self::validate_scheme(&site.scheme)?;
        Self::validate_domain(&site.domain)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_scheme() {
        assert!(ConfigValidator::validate_scheme("http").is_ok());
        assert!(ConfigValidator::validate_scheme("https").is_ok());
        assert!(ConfigValidator::validate_scheme("ftp").is_err());
        assert!(ConfigValidator::validate_scheme("").is_err());
    }

    #[test]
    fn test_validate_domain() {
        assert!(ConfigValidator::validate_domain("tracker.example.com").is_ok());
        assert!(ConfigValidator::validate_domain("localhost:8000").is_ok());
        assert!(ConfigValidator::validate_domain("").is_err());
        assert!(ConfigValidator::validate_domain("http://tracker.example.com").is_err());
    }

    #[test]
    fn test_validate_site() {
        assert!(ConfigValidator::validate_site(&Site::default()).is_ok());
        let bad = Site {
            domain: "tracker.example.com".to_string(),
            scheme: "gopher".to_string(),
        };
        assert!(ConfigValidator::validate_site(&bad).is_err());
    }
}
