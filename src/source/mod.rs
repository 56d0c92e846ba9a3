//! Record sources for the typeahead.
//!
//! A source loads a JSON array of records from somewhere (HTTP, a file, the
//! built-in sample). The [`Fetcher`] wraps sources with the `{data, loading,
//! error}` contract the widget consumes: failures never propagate, they only
//! raise the `error` flag.

pub mod file;
pub mod http;
pub mod sample;

pub use file::FileSource;
pub use http::{HttpConfig, HttpSource};
pub use sample::SampleSource;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};
use url::Url;

use crate::error::{Result, TypeaheadError};

/// Something that can produce a collection of records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Where the records come from; used to de-duplicate requests.
    fn location(&self) -> String;

    /// Loads the records. Called at most once per distinct location.
    async fn load(&self) -> Result<Vec<Value>>;
}

/// Parsed form of a `SOURCE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// An `http` or `https` URL.
    Http(Url),
    /// A local JSON file.
    File(PathBuf),
    /// The built-in sample records.
    Sample,
}

impl SourceSpec {
    /// Interprets `input` as a URL when it has an http(s) scheme, as the
    /// sample set for `sample:`, and as a file path otherwise.
    pub fn parse(input: &str) -> Self {
        if input.eq_ignore_ascii_case("sample:") {
            return Self::Sample;
        }
        match Url::parse(input) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Self::Http(url),
            _ => Self::File(PathBuf::from(input)),
        }
    }

    /// Builds the record source this location points at.
    pub fn into_source(self, http: HttpConfig) -> Result<Box<dyn RecordSource>> {
        let source: Box<dyn RecordSource> = match self {
            Self::Http(url) => Box::new(HttpSource::new(url, http)?),
            Self::File(path) => Box::new(FileSource::new(path)),
            Self::Sample => Box::new(SampleSource::new()),
        };
        Ok(source)
    }
}

/// Converts a parsed JSON document into records.
pub fn parse_records(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        other => Err(TypeaheadError::source(format!(
            "expected a JSON array of records, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Observable state of the most recent fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchState {
    pub data: Vec<Value>,
    pub loading: bool,
    pub error: bool,
}

/// Issues one request per distinct location and tracks its state.
///
/// Asking again for the location that was requested last is a no-op. There
/// is no retry and no cancellation of a request already in flight.
#[derive(Debug, Default)]
pub struct Fetcher {
    last_location: Option<String>,
    state: FetchState,
    requests: usize,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Number of requests issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Records the start of a request for `location`.
    ///
    /// Returns false if `location` is the one already requested, in which
    /// case the caller must not issue another request.
    pub fn begin(&mut self, location: &str) -> bool {
        if self.last_location.as_deref() == Some(location) {
            return false;
        }
        self.last_location = Some(location.to_string());
        self.requests += 1;
        self.state.loading = true;
        self.state.error = false;
        info!(location, "fetching records");
        true
    }

    /// Records the outcome of a request.
    ///
    /// On failure the previous data is kept and only the error flag is set.
    pub fn finish(&mut self, result: Result<Vec<Value>>) -> &FetchState {
        match result {
            Ok(records) => {
                info!(count = records.len(), "records loaded");
                self.state.data = records;
            }
            Err(e) => {
                warn!("fetch failed: {}", e);
                self.state.error = true;
            }
        }
        self.state.loading = false;
        &self.state
    }

    /// Requests `source` unless it was the last location requested.
    pub async fn fetch(&mut self, source: &dyn RecordSource) -> &FetchState {
        if self.begin(&source.location()) {
            let result = source.load().await;
            self.finish(result);
        }
        &self.state
    }
}
