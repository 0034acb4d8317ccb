// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! xrecent is a command-line tool for quickly checking what people have
//! been saying about a topic on X. It searches the last week of posts for
//! one or more keywords and prints a short digest of each keyword's
//! matches, or the full results as JSON for other tools to consume.
//!
//! # Examples
//!
//! Show posts from the last day mentioning "rust":
//!
//! ```bash
//! xrecent -k rust
//! ```
//!
//! Search several keywords over the last two hours, in German only,
//! without posts from a couple of accounts:
//!
//! ```bash
//! xrecent --keywords 'rust,tokio' -w 2h --lang de --exclude-from @spam,bot
//! ```
//!
//! Fetch up to 100 posts per keyword and print everything as JSON:
//!
//! ```bash
//! xrecent -k rust -n 100 --format json
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! xrecent --help
//! ```
//!
//! # X API Setup
//!
//! Searching requires an X API bearer token with access to the
//! [recent search endpoint]. xrecent looks for a token in the following
//! places, in order:
//!
//! 1. The `$X_BEARER_TOKEN` environment variable, if it is set and not
//!    blank.
//! 2. The [1Password CLI], by running `op read` on a secret reference. The
//!    default reference is `op://Private/X API/bearer_token`; use
//!    `--secret-ref` to look somewhere else.
//!
//! If neither yields a token, xrecent exits without making any requests.
//!
//! Note that the recent search endpoint only covers the **last seven
//! days**, so longer windows are rejected.
//!
//! # License
//!
//! xrecent is licensed under the terms of the [Apache License 2.0]. Please
//! see the LICENSE file accompanying this source code or visit the previous
//! link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0
//! [1Password CLI]: https://developer.1password.com/docs/cli/
//! [recent search endpoint]: https://docs.x.com/x-api/posts/search/introduction

pub mod auth;
pub mod cli;
pub mod clock;
pub mod conf;
pub mod duration;
pub mod error;
pub mod http;
pub mod normalize;
pub mod post;
pub mod query;
pub mod report;
pub mod request;
pub mod search;
pub mod text;
pub mod view;

#[cfg(test)]
mod test_utils;
