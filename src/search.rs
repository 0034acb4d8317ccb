//! Recent-search API clients and services for communicating with the API
//! over HTTP.

pub mod client;
pub mod service;

pub use client::{ApiError, SearchClient};

use crate::auth::AuthToken;
use crate::clock::Clock;
use crate::report::ReportBundle;
use crate::request::SearchRequest;
use log::debug;
use service::Service;

/// Searches for every keyword in `request`, one at a time, in order.
///
/// Each search finishes before the next one starts. The first failure
/// aborts the whole run and any results already collected are dropped.
/// The bundle is stamped once every search has finished.
pub async fn collect<S: Service, C: Clock>(
    request: &SearchRequest,
    token: &AuthToken,
    client: &SearchClient<S, C>,
) -> Result<ReportBundle, ApiError> {
    let mut results = Vec::with_capacity(request.keywords().len());
    for keyword in request.keywords() {
        debug!("Searching for '{keyword}'");
        let result = client.search_keyword(token, request, keyword).await?;
        results.push((keyword, result));
    }

    let mut bundle = ReportBundle::new(client.clock().now(), request.clone());
    for (keyword, result) in results {
        bundle.insert(keyword.as_str(), result);
    }
    Ok(bundle)
}
