//! Resolving a lookup URL into a human-readable link title.
//!
//! The replacement engine only sees [`TitleResolver`]. The production stack is
//! an [`HttpFetcher`] feeding [`extract_title`], usually wrapped in a
//! [`CachingResolver`] so repeated references to the same ticket cost one
//! request.

use crate::errors::AutolinkError;

pub mod cache;
pub mod fetch;
pub mod title;

pub use cache::CachingResolver;
pub use fetch::{Fetcher, HttpFetcher};
pub use title::{extract_title, NO_TITLE};

/// Turns a lookup URL into the text shown for the link.
pub trait TitleResolver: Send + Sync {
    fn resolve(&self, url: &str) -> Result<String, AutolinkError>;
}

impl<F> TitleResolver for F
where
    F: Fn(&str) -> Result<String, AutolinkError> + Send + Sync,
{
    fn resolve(&self, url: &str) -> Result<String, AutolinkError> {
        self(url)
    }
}

/// Fetches the URL and extracts the `<title>` of the returned document.
#[derive(Debug)]
pub struct FetchTitleResolver<F> {
    fetcher: F,
}

impl<F: Fetcher> FetchTitleResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

impl<F: Fetcher> TitleResolver for FetchTitleResolver<F> {
    fn resolve(&self, url: &str) -> Result<String, AutolinkError> {
        let body = self.fetcher.fetch(url)?;
        Ok(extract_title(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticFetcher(&'static str);

    impl Fetcher for StaticFetcher {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, AutolinkError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_fetch_title_resolver_extracts_title() {
        let resolver = FetchTitleResolver::new(StaticFetcher("<html><title>T1 Fix it</title></html>"));
        assert_eq!(resolver.resolve("https://example.test/T1").unwrap(), "T1 Fix it");
    }

    #[test]
    fn test_closures_are_resolvers() {
        let resolver = |url: &str| Ok::<_, AutolinkError>(format!("title for {}", url));
        assert_eq!(resolver.resolve("x").unwrap(), "title for x");
    }
}
