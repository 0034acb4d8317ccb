// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Builds search queries in the provider's query language.

use itertools::Itertools;
use serde::Serialize;

/// Filters applied to every keyword search.
///
/// Options are built up incrementally:
///
/// ```
/// use xrecent::query::QueryOptions;
/// let opts = QueryOptions::default()
///     .lang("de")
///     .exclude_from(["bob", "carol"]);
/// assert_eq!(opts.excluded_authors(), ["bob", "carol"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct QueryOptions {
    include_retweets: bool,
    lang: Option<String>,
    exclude_from: Vec<String>,
}

impl QueryOptions {
    /// Sets whether retweets are included in results.
    pub fn include_retweets(self, include_retweets: bool) -> Self {
        Self {
            include_retweets,
            ..self
        }
    }

    /// Restricts results to posts in the given language.
    pub fn lang(self, lang: impl Into<String>) -> Self {
        let lang = Some(lang.into());
        Self { lang, ..self }
    }

    /// Excludes posts written by any of the given handles.
    pub fn exclude_from<I, S>(self, handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let exclude_from = handles.into_iter().map(Into::into).collect();
        Self {
            exclude_from,
            ..self
        }
    }

    /// True if retweets are included in results.
    pub fn includes_retweets(&self) -> bool {
        self.include_retweets
    }

    /// The language filter, if any.
    pub fn language(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    /// Handles whose posts are excluded.
    pub fn excluded_authors(&self) -> &[String] {
        &self.exclude_from
    }
}

/// Composes provider query strings.
#[derive(Debug, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    /// Builds the query for `keyword` with the given filters applied.
    ///
    /// Filters are appended in a fixed order: retweet exclusion, language,
    /// then author exclusions. The expression built so far is wrapped in
    /// parentheses before each filter is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use xrecent::query::{QueryBuilder, QueryOptions};
    /// let opts = QueryOptions::default().lang("de").exclude_from(["bob"]);
    /// assert_eq!(
    ///     QueryBuilder::build("foo", &opts),
    ///     "(((foo) -is:retweet) lang:de) -from:bob",
    /// );
    /// ```
    pub fn build(keyword: &str, options: &QueryOptions) -> String {
        let mut query = keyword.to_string();

        if !options.include_retweets {
            query = format!("({query}) -is:retweet");
        }

        if let Some(lang) = &options.lang {
            query = format!("({query}) lang:{lang}");
        }

        if !options.exclude_from.is_empty() {
            let excluded = options
                .exclude_from
                .iter()
                .map(|handle| format!("-from:{handle}"))
                .join(" ");
            query = format!("({query}) {excluded}");
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_excludes_retweets_by_default() {
        let query = QueryBuilder::build("rust", &QueryOptions::default());
        assert_eq!(query, "(rust) -is:retweet");
    }

    #[test]
    fn it_leaves_the_keyword_alone_when_retweets_are_included() {
        let opts = QueryOptions::default().include_retweets(true);
        assert_eq!(QueryBuilder::build("rust", &opts), "rust");
    }

    #[test]
    fn it_adds_a_language_filter() {
        let opts = QueryOptions::default().lang("ja");
        assert_eq!(
            QueryBuilder::build("rust", &opts),
            "((rust) -is:retweet) lang:ja"
        );
    }

    #[test]
    fn it_adds_a_language_filter_with_retweets() {
        let opts = QueryOptions::default().include_retweets(true).lang("ja");
        assert_eq!(QueryBuilder::build("rust", &opts), "(rust) lang:ja");
    }

    #[test]
    fn it_excludes_authors_in_a_single_clause() {
        let opts = QueryOptions::default()
            .include_retweets(true)
            .exclude_from(["alice", "bob"]);
        assert_eq!(
            QueryBuilder::build("rust", &opts),
            "(rust) -from:alice -from:bob"
        );
    }

    #[test]
    fn it_applies_every_filter_in_order() {
        let opts = QueryOptions::default()
            .lang("de")
            .exclude_from(["bob"]);
        assert_eq!(
            QueryBuilder::build("foo", &opts),
            "(((foo) -is:retweet) lang:de) -from:bob"
        );
    }

    #[test]
    fn it_is_deterministic() {
        let opts = QueryOptions::default()
            .include_retweets(false)
            .lang("de")
            .exclude_from(["bob"]);
        let first = QueryBuilder::build("foo", &opts);
        let second = QueryBuilder::build("foo", &opts.clone());
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn it_keeps_multi_word_keywords_grouped() {
        let query = QueryBuilder::build("rust lang", &QueryOptions::default());
        assert_eq!(query, "(rust lang) -is:retweet");
    }
}
