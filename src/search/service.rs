// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the recent-search API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the search API over HTTPS. They know nothing about queries or
//! posts; they just move strings back and forth.

use crate::auth::AuthToken;
use crate::conf;
use crate::http::{HTTPError, HTTPResponse, HTTPResult, HTTPService};
use log::debug;
use reqwest::Client;

/// Query parameters for a search request.
pub type Params = Vec<(&'static str, String)>;

/// A service for searching recent posts.
///
/// Using this trait, clients can implement different ways of connecting
/// to the search API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Performs a GET request against the recent-search endpoint with the
    /// given query `params`, authorized by `token`.
    ///
    /// Unsuccessful HTTP statuses are _not_ errors at this level; the
    /// response is returned as-is so callers can read the error body.
    fn search_recent(
        &self,
        token: &AuthToken,
        params: &Params,
    ) -> impl Future<Output = HTTPResult<HTTPResponse>> + Send;
}

/// A service that contacts the search API directly.
#[derive(Debug)]
pub struct XService {
    client: Client,
}

impl HTTPService for XService {}

impl XService {
    /// Creates a new search service.
    pub fn new() -> HTTPResult<Self> {
        let client = Self::client()?;
        Ok(Self { client })
    }
}

impl Service for XService {
    async fn search_recent(&self, token: &AuthToken, params: &Params) -> HTTPResult<HTTPResponse> {
        debug!("GET {} {:?}", conf::SEARCH_ENDPOINT, params);
        let resp = self
            .client
            .get(conf::SEARCH_ENDPOINT)
            .bearer_auth(token.secret())
            .query(params)
            .send()
            .await
            .map_err(HTTPError::Request)?;
        let status = resp.status();
        let body = resp.text().await.map_err(HTTPError::Body)?;
        debug!("Search API responded with HTTP {status}");
        Ok(HTTPResponse::new(status, body))
    }
}
