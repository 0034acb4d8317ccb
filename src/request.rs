// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! A fully validated search request.

use crate::duration::{self, DurationError, Window};
use crate::error::Error;
use crate::query::QueryOptions;
use regex::Regex;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::sync::LazyLock;
use thiserror::Error;

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").expect("invalid handle pattern"));

/// Default search window.
pub const DEFAULT_WINDOW: &str = "24h";

/// Default number of posts to retrieve per keyword.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Smallest number of posts that may be requested per keyword.
pub const MIN_MAX_RESULTS: u32 = 1;

/// Largest number of posts that may be requested per keyword.
pub const MAX_MAX_RESULTS: u32 = 100;

/// A search for recent posts matching one or more keywords.
///
/// Requests can only be created with [`SearchRequest::build()`], which
/// validates every option, so a `SearchRequest` is always valid.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRequest {
    keywords: Vec<String>,
    window: Window,
    max_results: u32,
    options: QueryOptions,
}

impl SearchRequest {
    /// Incrementally builds a new search request.
    ///
    /// # Examples
    ///
    /// ```
    /// use xrecent::request::SearchRequest;
    /// let request = SearchRequest::build()
    ///     .keywords(["rust", " tokio ", "rust"])
    ///     .window("2d")
    ///     .max_results(50)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(request.keywords(), ["rust", "tokio"]);
    /// assert_eq!(request.window().as_millis(), 172_800_000);
    /// ```
    pub fn build() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    /// Keywords to search for, in the order they were given.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// How far back to search.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Maximum number of posts to retrieve for each keyword.
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Filters applied to each keyword's query.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }
}

impl Serialize for SearchRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SearchRequest", 7)?;
        state.serialize_field("keywords", &self.keywords)?;
        state.serialize_field("window", &self.window)?;
        state.serialize_field("window_ms", &self.window.as_millis())?;
        state.serialize_field("max_results", &self.max_results)?;
        state.serialize_field("lang", &self.options.language())?;
        state.serialize_field("include_retweets", &self.options.includes_retweets())?;
        state.serialize_field("exclude_from", self.options.excluded_authors())?;
        state.end()
    }
}

/// A builder for search requests.
///
/// You probably don't want to use this directly; call
/// [`SearchRequest::build()`] and construct it incrementally instead.
#[derive(Debug)]
#[must_use]
pub struct SearchRequestBuilder {
    keywords: Vec<String>,
    window: String,
    max_results: u32,
    lang: Option<String>,
    exclude_from: Vec<String>,
    include_retweets: bool,
}

impl Default for SearchRequestBuilder {
    fn default() -> Self {
        Self {
            keywords: vec![],
            window: DEFAULT_WINDOW.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            lang: None,
            exclude_from: vec![],
            include_retweets: false,
        }
    }
}

impl SearchRequestBuilder {
    /// Adds keywords to search for, one keyword per value.
    ///
    /// Values are trimmed but never split, so a keyword may contain commas.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(
            keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_string())
                .filter(|keyword| !keyword.is_empty()),
        );
        self
    }

    /// Adds keywords to search for from comma-separated lists.
    pub fn keyword_list<I, S>(mut self, lists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.extend(split_list(lists));
        self
    }

    /// Sets the search window, e.g., `24h`.
    pub fn window(mut self, window: impl Into<String>) -> Self {
        self.window = window.into();
        self
    }

    /// Sets the maximum number of posts to retrieve for each keyword.
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Restricts results to a language. Blank values mean "any language".
    pub fn lang(mut self, lang: Option<impl Into<String>>) -> Self {
        self.lang = lang.map(Into::into);
        self
    }

    /// Adds handles whose posts should be excluded.
    ///
    /// Each value may itself be a comma-separated list of handles, and
    /// each handle may start with `@`.
    pub fn exclude_from<I, S>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_from.extend(
            split_list(handles).map(|handle| handle.trim_start_matches('@').to_string()),
        );
        self
    }

    /// Sets whether retweets are included in results.
    pub fn include_retweets(mut self, include_retweets: bool) -> Self {
        self.include_retweets = include_retweets;
        self
    }

    /// Validates the options and finalizes the [`SearchRequest`].
    pub fn build(self) -> Result<SearchRequest, Error> {
        let keywords = dedup(self.keywords);
        if keywords.is_empty() {
            return Err(ArgumentError::NoKeywords.into());
        }

        if !(MIN_MAX_RESULTS..=MAX_MAX_RESULTS).contains(&self.max_results) {
            return Err(ArgumentError::MaxResults(self.max_results).into());
        }

        let exclude_from = dedup(self.exclude_from);
        if let Some(handle) = exclude_from.iter().find(|h| !HANDLE_RE.is_match(h)) {
            return Err(ArgumentError::InvalidHandle(handle.clone()).into());
        }

        let window = duration::parse_window(&self.window)?;
        if !window.within_lookback() {
            return Err(DurationError::ExceedsLookback(window.to_string()).into());
        }

        let mut options = QueryOptions::default()
            .include_retweets(self.include_retweets)
            .exclude_from(exclude_from);
        if let Some(lang) = self
            .lang
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
        {
            options = options.lang(lang);
        }

        Ok(SearchRequest {
            keywords,
            window,
            max_results: self.max_results,
            options,
        })
    }
}

fn split_list<I, S>(values: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(|item| item.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|item| !item.is_empty())
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = vec![];
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Indicates invalid command-line input.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    /// No usable keywords were given.
    #[error("at least one keyword is required")]
    NoKeywords,

    /// The per-keyword result cap is out of bounds.
    #[error("max results must be between 1 and 100, got {0}")]
    MaxResults(u32),

    /// A handle to exclude is not a valid handle.
    #[error("invalid handle '{0}'")]
    InvalidHandle(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request() -> SearchRequestBuilder {
        SearchRequest::build().keywords(["rust"])
    }

    mod keywords {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_requires_a_keyword() {
            let err = SearchRequest::build().build().unwrap_err();
            assert!(matches!(err, Error::Argument(ArgumentError::NoKeywords)));
        }

        #[test]
        fn it_rejects_blank_keywords() {
            let err = SearchRequest::build()
                .keywords(["  "])
                .keyword_list([",,"])
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::Argument(ArgumentError::NoKeywords)));
        }

        #[test]
        fn it_trims_and_deduplicates_keywords_in_order() {
            let request = SearchRequest::build()
                .keywords(["beta", " alpha "])
                .keyword_list(["alpha,gamma", "beta"])
                .build()
                .unwrap();
            assert_eq!(request.keywords(), ["beta", "alpha", "gamma"]);
        }

        #[test]
        fn it_keeps_commas_in_single_keywords() {
            let request = SearchRequest::build()
                .keywords(["hello, world"])
                .build()
                .unwrap();
            assert_eq!(request.keywords(), ["hello, world"]);
        }

        #[test]
        fn it_splits_keyword_lists() {
            let request = SearchRequest::build()
                .keyword_list(["rust, tokio"])
                .build()
                .unwrap();
            assert_eq!(request.keywords(), ["rust", "tokio"]);
        }
    }

    mod window {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_defaults_to_a_day() {
            let request = request().build().unwrap();
            assert_eq!(request.window().token(), "24h");
            assert_eq!(request.window().as_millis(), 86_400_000);
        }

        #[test]
        fn it_accepts_seven_days() {
            let request = request().window("7d").build().unwrap();
            assert_eq!(request.window().as_millis(), 604_800_000);
        }

        #[test]
        fn it_rejects_eight_days() {
            let err = request().window("8d").build().unwrap_err();
            assert!(matches!(
                err,
                Error::Duration(DurationError::ExceedsLookback(_))
            ));
        }

        #[test]
        fn it_rejects_malformed_windows() {
            let err = request().window("soon").build().unwrap_err();
            assert!(matches!(err, Error::Duration(DurationError::Malformed(_))));
        }

        #[test]
        fn it_checks_arguments_before_the_window() {
            let err = SearchRequest::build().window("8d").build().unwrap_err();
            assert!(matches!(err, Error::Argument(ArgumentError::NoKeywords)));
        }
    }

    mod max_results {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_defaults_to_twenty() {
            assert_eq!(request().build().unwrap().max_results(), 20);
        }

        #[test]
        fn it_accepts_the_bounds() {
            assert_eq!(request().max_results(1).build().unwrap().max_results(), 1);
            assert_eq!(
                request().max_results(100).build().unwrap().max_results(),
                100
            );
        }

        #[test]
        fn it_rejects_zero() {
            let err = request().max_results(0).build().unwrap_err();
            assert!(matches!(err, Error::Argument(ArgumentError::MaxResults(0))));
        }

        #[test]
        fn it_rejects_more_than_a_hundred() {
            let err = request().max_results(101).build().unwrap_err();
            assert!(matches!(
                err,
                Error::Argument(ArgumentError::MaxResults(101))
            ));
        }
    }

    mod filters {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn it_excludes_retweets_by_default() {
            assert!(!request().build().unwrap().options().includes_retweets());
        }

        #[test]
        fn it_includes_retweets() {
            let request = request().include_retweets(true).build().unwrap();
            assert!(request.options().includes_retweets());
        }

        #[test]
        fn it_ignores_a_blank_language() {
            let request = request().lang(Some("  ")).build().unwrap();
            assert_eq!(request.options().language(), None);
        }

        #[test]
        fn it_trims_the_language() {
            let request = request().lang(Some(" de ")).build().unwrap();
            assert_eq!(request.options().language(), Some("de"));
        }

        #[test]
        fn it_normalizes_excluded_handles() {
            let request = request()
                .exclude_from(["@bob, carol", "bob"])
                .build()
                .unwrap();
            assert_eq!(request.options().excluded_authors(), ["bob", "carol"]);
        }

        #[test]
        fn it_rejects_invalid_handles() {
            let err = request()
                .exclude_from(["not a handle"])
                .build()
                .unwrap_err();
            assert!(matches!(
                err,
                Error::Argument(ArgumentError::InvalidHandle(_))
            ));
        }
    }

    mod serialization {
        use super::*;
        use pretty_assertions::assert_eq;
        use serde_json::json;

        #[test]
        fn it_echoes_the_effective_request() {
            let request = SearchRequest::build()
                .keywords(["alpha", "beta"])
                .window("2d")
                .max_results(10)
                .lang(Some("en"))
                .exclude_from(["@spam"])
                .build()
                .unwrap();
            let expected = json!({
                "keywords": ["alpha", "beta"],
                "window": "2d",
                "window_ms": 172_800_000,
                "max_results": 10,
                "lang": "en",
                "include_retweets": false,
                "exclude_from": ["spam"],
            });
            assert_eq!(serde_json::to_value(&request).unwrap(), expected);
        }
    }
}
