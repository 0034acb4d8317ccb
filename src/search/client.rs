// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Client for running keyword searches against the recent-search API.

use crate::auth::AuthToken;
use crate::clock::{Clock, DateTime, SystemClock, Utc, iso8601};
use crate::http::{self, HTTPResponse};
use crate::normalize::normalize;
use crate::post::{RawResponse, SearchResult};
use crate::query::QueryBuilder;
use crate::request::SearchRequest;
use crate::search::service::{Params, Service, XService};
use crate::text::truncate;
use log::{info, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// The smallest page size the endpoint accepts.
pub const PROVIDER_MIN_RESULTS: u32 = 10;

const ERROR_BODY_LIMIT: usize = 300;

const TWEET_FIELDS: &str = "created_at,public_metrics,lang,author_id";
const EXPANSIONS: &str = "author_id";
const USER_FIELDS: &str = "username,name";

/// Runs searches, one request per keyword.
#[derive(Debug)]
pub struct SearchClient<S: Service, C: Clock> {
    service: S,
    clock: C,
}

impl SearchClient<XService, SystemClock> {
    /// Creates a client that talks to the real search API.
    pub fn new() -> Result<Self, ApiError> {
        let service = XService::new()?;
        Ok(Self::new_with_service(service, SystemClock))
    }
}

impl<S: Service, C: Clock> SearchClient<S, C> {
    /// Creates a client using the given `service` to reach the API and
    /// `clock` to work out where search windows start.
    pub fn new_with_service(service: S, clock: C) -> Self {
        Self { service, clock }
    }

    /// The service used to reach the API.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// The clock used to work out where search windows start.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Query parameters for a single search.
    ///
    /// The endpoint refuses page sizes below [`PROVIDER_MIN_RESULTS`], so
    /// smaller values are raised to that floor.
    pub fn params(query: &str, max_results: u32, window_start: &DateTime<Utc>) -> Params {
        vec![
            ("query", query.to_string()),
            (
                "max_results",
                max_results.max(PROVIDER_MIN_RESULTS).to_string(),
            ),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("expansions", EXPANSIONS.to_string()),
            ("user.fields", USER_FIELDS.to_string()),
            ("start_time", iso8601(window_start)),
        ]
    }

    /// Runs a single search and parses the response.
    ///
    /// Returns an [`ApiError`] if the request fails, the API responds with
    /// an unsuccessful status, or the body is not valid JSON. Nothing is
    /// retried.
    pub async fn search(
        &self,
        token: &AuthToken,
        query: &str,
        max_results: u32,
        window_start: &DateTime<Utc>,
    ) -> Result<RawResponse, ApiError> {
        let params = Self::params(query, max_results, window_start);
        let resp = self.service.search_recent(token, &params).await?;
        parse_response(resp)
    }

    /// Searches for `keyword` using the filters and limits in `request`.
    ///
    /// At most [`SearchRequest::max_results()`] posts are kept.
    pub async fn search_keyword(
        &self,
        token: &AuthToken,
        request: &SearchRequest,
        keyword: &str,
    ) -> Result<SearchResult, ApiError> {
        let query = QueryBuilder::build(keyword, request.options());
        let window_start = self.clock.window_start(request.window().span());
        let raw = self
            .search(token, &query, request.max_results(), &window_start)
            .await?;

        for error in &raw.errors {
            let detail = error
                .get("detail")
                .and_then(|detail| detail.as_str())
                .unwrap_or("unknown error");
            warn!("Search for '{keyword}' reported a partial error: {detail}");
        }

        let mut result = normalize(query, raw);
        result.posts.truncate(request.max_results() as usize);
        info!("Found {} posts for '{keyword}'", result.posts.len());
        Ok(result)
    }
}

fn parse_response(resp: HTTPResponse) -> Result<RawResponse, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let message = error_message(resp.body());
        return Err(ApiError::Status { status, message });
    }
    RawResponse::parse(resp.body()).map_err(|source| ApiError::MalformedBody { status, source })
}

#[derive(Debug, Default, Deserialize)]
struct Problem {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    detail: Option<String>,

    #[serde(default)]
    errors: Vec<ProblemError>,
}

#[derive(Debug, Deserialize)]
struct ProblemError {
    #[serde(default)]
    message: Option<String>,
}

/// Extracts a human-readable message from an error response body.
///
/// Prefers the API's `detail` (or `title`), adding the first entry of its
/// `errors` list when there is one. Bodies that aren't structured errors
/// are echoed back, truncated.
fn error_message(body: &str) -> String {
    let problem: Problem = serde_json::from_str(body).unwrap_or_default();
    let summary = problem.detail.or(problem.title);
    let first = problem
        .errors
        .into_iter()
        .find_map(|error| error.message);

    match (summary, first) {
        (Some(summary), Some(first)) => format!("{summary} ({first})"),
        (Some(summary), None) => summary,
        (None, Some(first)) => first,
        (None, None) if body.trim().is_empty() => String::from("(empty response body)"),
        (None, None) => truncate(body.trim(), ERROR_BODY_LIMIT),
    }
}

/// An error from the search API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API responded with an unsuccessful status.
    #[error("search API returned HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The API responded successfully but the body could not be parsed.
    #[error("search API returned malformed JSON (HTTP {status}): {source}")]
    MalformedBody {
        status: StatusCode,
        source: serde_json::Error,
    },

    /// The request could not be made at all.
    #[error("{0}")]
    Transport(#[from] http::HTTPError),
}
