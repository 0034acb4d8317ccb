// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Posts, both as the search API sends them and in the stable shape
//! this crate hands out.
//!
//! The `Raw*` structures describe exactly the subset of the API's
//! response that is consumed. Every optional field is nullable, unknown
//! fields are ignored, and a missing `data` array means "no results",
//! which is what the API sends when nothing matched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Metrics and other free-form JSON passed through verbatim.
pub type Bag = Map<String, Value>;

/// A search response as returned by the API.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<RawPost>,

    #[serde(default)]
    pub includes: Option<RawIncludes>,

    #[serde(default)]
    pub meta: Option<Bag>,

    /// Partial errors reported alongside a successful response.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<Bag>,
}

impl RawResponse {
    /// Parses a response body.
    pub fn parse(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Expanded user objects, if the response included any.
    pub fn users(&self) -> &[RawUser] {
        self.includes
            .as_ref()
            .map(|includes| includes.users.as_slice())
            .unwrap_or_default()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Objects expanded by the `expansions` request parameter.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct RawIncludes {
    #[serde(default)]
    pub users: Vec<RawUser>,
}

/// A post as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawPost {
    pub id: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub public_metrics: Option<Bag>,
}

/// An expanded user as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RawUser {
    pub id: String,

    pub username: String,

    #[serde(default)]
    pub name: Option<String>,
}

/// The author of a post.
///
/// Only the `id` is guaranteed. The handle and display name are missing
/// when the API did not expand the author, usually because the account
/// was deleted or suspended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Author {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A normalized post.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Post {
    pub id: String,
    pub author: Option<Author>,
    pub created_at: Option<String>,
    pub text: String,
    pub lang: Option<String>,
    pub metrics: Option<Bag>,
    pub url: String,
}

impl Post {
    /// The author's handle, if known.
    pub fn handle(&self) -> Option<&str> {
        self.author.as_ref().and_then(|author| author.handle.as_deref())
    }
}

/// The posts found for a single keyword.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    /// The query that was actually sent to the API.
    pub query: String,

    /// The API's `meta` object, passed through verbatim.
    pub meta: Option<Bag>,

    /// Posts, in the order the API returned them.
    pub posts: Vec<Post>,
}

impl SearchResult {
    /// True if no posts were found.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
