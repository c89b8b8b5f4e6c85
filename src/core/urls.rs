//! URL helpers for turning relative paths into absolute URLs
//!
//! Relative URLs are resolved against the current site (see `config::Site`),
//! which the caller looks up through `SitesConfig::current()` and passes in
//! explicitly.

use crate::config::Site;

/// Schemes recognized when classifying a URL as absolute.
const ABSOLUTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Test whether `url` is absolute, i.e. starts with a recognized scheme
/// followed by `://`. A bare `://host/path` has no scheme token and is not
/// absolute.
pub fn is_absolute_url(url: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Compose `{scheme}://{domain}{path}`.
///
/// No slash deduplication and no validation; the caller supplies the leading
/// `/` on `path` if a separator is wanted.
pub fn build_url(path: &str, domain: &str, scheme: &str) -> String {
    format!("{}://{}{}", scheme, domain, path)
}

/// Return `url` unchanged if it is already absolute, otherwise resolve it
/// against `site`.
pub fn get_absolute_url(url: &str, site: &Site) -> String {
    if is_absolute_url(url) {
        url.to_string()
    } else {
        build_url(url, &site.domain, &site.scheme)
    }
}
