// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Errors that can stop a search.
//!
//! Every error is fatal: a run that hits one stops immediately and prints
//! nothing to standard output.

use crate::auth::AuthError;
use crate::duration::DurationError;
use crate::request::ArgumentError;
use crate::search::ApiError;
use std::io;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that aborts a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid command-line input.
    #[error("{0}")]
    Argument(#[from] ArgumentError),

    /// An unparseable or disallowed search window.
    #[error("{0}")]
    Duration(#[from] DurationError),

    /// No bearer token could be found.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The search API failed or returned garbage.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Results could not be encoded.
    #[error("could not encode results: {0}")]
    Render(#[from] serde_json::Error),

    /// Results could not be written.
    #[error("could not write results: {0}")]
    Io(#[from] io::Error),
}
