// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! The results of a complete run.

use crate::clock::{DateTime, Utc};
use crate::post::SearchResult;
use crate::request::SearchRequest;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Search results for every keyword in a request.
///
/// Results are kept in the order the keywords appear in the request, and
/// serialize as a JSON object whose keys appear in that same order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportBundle {
    generated_at: DateTime<Utc>,
    request: SearchRequest,
    #[serde(serialize_with = "serialize_results")]
    results: Vec<(String, SearchResult)>,
}

impl ReportBundle {
    /// Starts an empty bundle for `request`.
    pub fn new(generated_at: DateTime<Utc>, request: SearchRequest) -> Self {
        Self {
            generated_at,
            request,
            results: vec![],
        }
    }

    /// Records the result for `keyword`.
    ///
    /// Recording a keyword twice replaces the earlier result but keeps its
    /// original position.
    pub fn insert(&mut self, keyword: impl Into<String>, result: SearchResult) {
        let keyword = keyword.into();
        match self.results.iter_mut().find(|(k, _)| *k == keyword) {
            Some((_, existing)) => *existing = result,
            None => self.results.push((keyword, result)),
        }
    }

    /// When the report was generated, i.e., when its last search finished.
    pub fn generated_at(&self) -> &DateTime<Utc> {
        &self.generated_at
    }

    /// The request that produced this report.
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// The result for `keyword`, if any.
    pub fn get(&self, keyword: &str) -> Option<&SearchResult> {
        self.results
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, result)| result)
    }

    /// Keywords and their results, in request order.
    pub fn results(&self) -> impl Iterator<Item = (&str, &SearchResult)> {
        self.results
            .iter()
            .map(|(keyword, result)| (keyword.as_str(), result))
    }

    /// Keywords in the bundle, in request order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.results().map(|(keyword, _)| keyword)
    }
}

fn serialize_results<S: Serializer>(
    results: &[(String, SearchResult)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(results.len()))?;
    for (keyword, result) in results {
        map.serialize_entry(keyword, result)?;
    }
    map.end()
}
