//! Authentication for the search API.
//!
//! A bearer token is taken from `$X_BEARER_TOKEN` if it is set. Otherwise
//! it is looked up in a [`SecretProvider`], which by default is the
//! [1Password CLI](https://developer.1password.com/docs/cli/).

use crate::conf;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Where an [`AuthToken`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// The token was read from the environment.
    Environment,

    /// The token was retrieved from a secret provider.
    ExternalProvider,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Environment => write!(f, "environment"),
            Provenance::ExternalProvider => write!(f, "external-provider"),
        }
    }
}

/// A bearer token for the search API.
///
/// The secret is never displayed; its `Debug` representation is redacted.
#[derive(Clone)]
pub struct AuthToken {
    secret: String,
    provenance: Provenance,
}

impl AuthToken {
    /// Creates a new token from the given secret.
    pub fn new(secret: impl Into<String>, provenance: Provenance) -> Self {
        let secret = secret.into();
        Self { secret, provenance }
    }

    /// The actual secret.
    ///
    /// # Examples
    ///
    /// ```
    /// use xrecent::auth::{AuthToken, Provenance};
    /// let token = AuthToken::new("ThisIsMyToken", Provenance::Environment);
    /// assert_eq!(token.secret(), "ThisIsMyToken");
    /// ```
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Where the token came from.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("secret", &"<redacted>")
            .field("provenance", &self.provenance)
            .finish()
    }
}

/// Resolves a named reference to a secret value.
///
/// Implementations might shell out to a password manager, read from a
/// keychain, or, in tests, simply return a fixed value.
pub trait SecretProvider {
    /// Looks up the secret named by `reference`.
    fn resolve(&self, reference: &str) -> impl Future<Output = Result<String, AuthError>> + Send;
}

/// Looks up secrets with 1Password's `op read`.
#[derive(Debug)]
pub struct OnePassword {
    program: String,
}

impl Default for OnePassword {
    fn default() -> Self {
        Self::new("op")
    }
}

impl OnePassword {
    /// Uses `program` as the 1Password CLI executable.
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self { program }
    }
}

impl SecretProvider for OnePassword {
    async fn resolve(&self, reference: &str) -> Result<String, AuthError> {
        debug!("Reading secret with {} read", self.program);
        let output = Command::new(&self.program)
            .arg("read")
            .arg(reference)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| AuthError::Provider(format!("could not run {}: {err}", self.program)))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(AuthError::Provider(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )))
        }
    }
}

/// Picks a bearer token from the environment or a secret provider.
pub struct TokenResolver<P: SecretProvider> {
    env_token: Option<String>,
    provider: P,
}

impl<P: SecretProvider + fmt::Debug> fmt::Debug for TokenResolver<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_token = self.env_token.as_ref().map(|_| "<redacted>");
        f.debug_struct("TokenResolver")
            .field("env_token", &env_token)
            .field("provider", &self.provider)
            .finish()
    }
}

impl TokenResolver<OnePassword> {
    /// Creates a resolver that reads `$X_BEARER_TOKEN` and falls back to
    /// 1Password.
    pub fn from_env() -> Self {
        Self::new(conf::bearer_token_from_env(), OnePassword::default())
    }
}

impl<P: SecretProvider> TokenResolver<P> {
    /// Creates a resolver preferring `env_token` over `provider`.
    pub fn new(env_token: Option<String>, provider: P) -> Self {
        Self {
            env_token,
            provider,
        }
    }

    /// The secret provider consulted when the environment has no token.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves a token.
    ///
    /// A non-blank environment token always wins. Otherwise the secret
    /// provider is asked for `reference` once; its output is trimmed and
    /// must not be blank.
    pub async fn resolve(&self, reference: &str) -> Result<AuthToken, AuthError> {
        if let Some(token) = self
            .env_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
        {
            debug!("Using bearer token from ${}", conf::BEARER_TOKEN_ENV);
            return Ok(AuthToken::new(token, Provenance::Environment));
        }

        debug!("Resolving bearer token from secret provider");
        let secret = self
            .provider
            .resolve(reference)
            .await
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(AuthError::Unavailable(format!(
                "secret provider returned an empty value for {reference}"
            )));
        }
        Ok(AuthToken::new(secret, Provenance::ExternalProvider))
    }
}

/// Indicates a bearer token could not be obtained.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AuthError {
    /// The secret provider failed.
    #[error("secret provider failed: {0}")]
    Provider(String),

    /// No token could be found anywhere.
    #[error("no bearer token available (set $X_BEARER_TOKEN or check your secret provider): {0}")]
    Unavailable(String),
}
