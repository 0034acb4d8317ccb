use crate::auth::{AuthError, AuthToken, SecretProvider};
use crate::clock::{Clock, DateTime, Utc};
use crate::http::{HTTPResponse, HTTPResult};
use crate::search::service::{Params, Service};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::fs;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

pub fn load_output(filename: &str) -> String {
    let filename = format!("tests/output/{filename}.out");
    String::from(
        fs::read_to_string(&filename)
            .expect(&format!("could not load test data from {filename}"))
            .trim_end(),
    )
}

/// A search service that replays canned responses, in order, and
/// remembers what it was asked for.
#[derive(Debug, Default)]
pub struct TestService {
    responses: Mutex<VecDeque<HTTPResponse>>,
    requests: Mutex<Vec<(String, Params)>>,
}

impl TestService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response with the body from `tests/data/{file}.json`.
    pub fn respond(self, file: &str) -> Self {
        self.respond_raw(StatusCode::OK, load_data(file))
    }

    /// Queues an unsuccessful response with the body from `tests/data/{file}.json`.
    pub fn fail(self, status: StatusCode, file: &str) -> Self {
        self.respond_raw(status, load_data(file))
    }

    pub fn respond_raw(self, status: StatusCode, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HTTPResponse::new(status, body));
        self
    }

    /// Bearer tokens and parameters of every request made so far.
    pub fn requests(&self) -> Vec<(String, Params)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Service for TestService {
    async fn search_recent(&self, token: &AuthToken, params: &Params) -> HTTPResult<HTTPResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((token.secret().to_string(), params.clone()));
        let resp = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("test service ran out of responses");
        Ok(resp)
    }
}

/// A secret provider that always returns the same thing.
#[derive(Debug)]
pub struct StaticSecretProvider {
    result: Result<String, AuthError>,
    calls: AtomicUsize,
    last_reference: Mutex<Option<String>>,
}

impl StaticSecretProvider {
    pub fn returning(secret: &str) -> Self {
        Self::new(Ok(secret.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Err(AuthError::Provider(message.to_string())))
    }

    fn new(result: Result<String, AuthError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_reference: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_reference(&self) -> Option<String> {
        self.last_reference.lock().unwrap().clone()
    }
}

impl SecretProvider for StaticSecretProvider {
    async fn resolve(&self, reference: &str) -> Result<String, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_reference.lock().unwrap() = Some(reference.to_string());
        self.result.clone()
    }
}

#[derive(Debug)]
pub struct FrozenClock {
    datetime: DateTime<Utc>,
}

impl FrozenClock {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        FrozenClock { datetime }
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        let datetime = DateTime::parse_from_rfc3339("2025-05-23T10:13:00-07:00")
            .expect("invalid date supplied")
            .with_timezone(&Utc);
        Self::new(datetime)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.datetime
    }
}
