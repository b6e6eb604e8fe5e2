//! Backend URL composition.
//!
//! # Responsibilities
//! - Build backend request URLs from a base, a path, and query parameters
//! - Percent-encode query values
//!
//! # Design Decisions
//! - Pure functions: the base is cloned, never mutated
//! - Repeated query keys collapse to the last written value
//! - Base URLs are validated once at startup; the string-parsing variant
//!   exists for callers holding an unvalidated base

use url::Url;

use crate::error::GatewayError;

/// Compose a backend URL from an unparsed base string.
///
/// Fails with `BadGateway` if the base is not an absolute http(s) URL.
pub fn compose(base: &str, path: &str, query: &[(&str, &str)]) -> Result<Url, GatewayError> {
    let base = Url::parse(base)
        .map_err(|e| GatewayError::BadGateway(format!("invalid base URL {base:?}: {e}")))?;
    if base.host_str().is_none() {
        return Err(GatewayError::BadGateway(format!(
            "base URL {base} has no host"
        )));
    }
    Ok(compose_url(&base, path, query))
}

/// Compose a backend URL from an already-validated base.
pub fn compose_url(base: &Url, path: &str, query: &[(&str, &str)]) -> Url {
    let mut url = base.clone();

    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);

    if !query.is_empty() {
        // Last write per key wins.
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        for &(key, value) in query {
            if let Some(existing) = pairs.iter_mut().find(|(k, _)| *k == key) {
                existing.1 = value;
            } else {
                pairs.push((key, value));
            }
        }
        url.query_pairs_mut().extend_pairs(pairs);
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_without_query() {
        let url = compose("http://host:1234", "/news/7", &[]).unwrap();
        assert_eq!(url.as_str(), "http://host:1234/news/7");
    }

    #[test]
    fn test_compose_with_query() {
        let url = compose("http://host", "/comments", &[("news_id", "7")]).unwrap();
        assert_eq!(url.as_str(), "http://host/comments?news_id=7");
    }

    #[test]
    fn test_compose_preserves_base_path_prefix() {
        let url = compose("http://host/api/", "/news/7", &[]).unwrap();
        assert_eq!(url.as_str(), "http://host/api/news/7");
    }

    #[test]
    fn test_repeated_key_last_write_wins() {
        let url = compose("http://host", "/c", &[("page", "1"), ("page", "2")]).unwrap();
        assert_eq!(url.as_str(), "http://host/c?page=2");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let url = compose("http://host", "/news/filtered", &[("title", "a b&c")]).unwrap();
        assert_eq!(url.as_str(), "http://host/news/filtered?title=a+b%26c");
    }

    #[test]
    fn test_relative_base_is_rejected() {
        let err = compose("/news", "/7", &[]).unwrap_err();
        assert!(matches!(err, GatewayError::BadGateway(_)));
    }

    #[test]
    fn test_base_is_not_mutated() {
        let base = Url::parse("http://host:1234").unwrap();
        let before = base.as_str().to_string();
        let _ = compose_url(&base, "/news/7", &[("request_id", "abc")]);
        assert_eq!(base.as_str(), before);
    }
}
