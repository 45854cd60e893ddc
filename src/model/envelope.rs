/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Transport metadata attached to every envelope under `headers`
#[derive(Debug, DisplaySimple, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportInfo {
    /// HTTP status code, `0` when no response was received
    pub http_code: u16,
    /// URL the request was sent to
    pub url: String,
    /// Content type of the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Seconds spent on the round trip
    pub total_time: f64,
    /// Response headers, lower-cased names
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub response_headers: BTreeMap<String, String>,
}

/// Kind of transport failure stored under `errors`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportErrorCode {
    /// Request or connect timeout
    Timeout,
    /// Connection could not be established (DNS, refused, TLS)
    Connect,
    /// Redirect policy violation
    Redirect,
    /// Request could not be sent
    Request,
    /// Request or response body could not be transferred
    Body,
    /// Response could not be decoded
    Decode,
    /// Request could not be built (e.g. malformed URL)
    Builder,
    /// Anything else
    Other,
}

impl From<&reqwest::Error> for TransportErrorCode {
    fn from(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportErrorCode::Timeout
        } else if e.is_connect() {
            TransportErrorCode::Connect
        } else if e.is_redirect() {
            TransportErrorCode::Redirect
        } else if e.is_builder() {
            TransportErrorCode::Builder
        } else if e.is_body() {
            TransportErrorCode::Body
        } else if e.is_decode() {
            TransportErrorCode::Decode
        } else if e.is_request() {
            TransportErrorCode::Request
        } else {
            TransportErrorCode::Other
        }
    }
}

/// Result of every call: payload, transport metadata and errors
///
/// `data` and `errors` come straight from the API body. Any other top-level
/// key of the body (e.g. `meta`) is kept in `extra`. On a transport failure
/// `errors` holds the [`TransportErrorCode`] instead.
#[derive(Debug, DisplaySimple, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Server payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Server errors, or the transport error code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    /// Transport metadata, absent once stripped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<TransportInfo>,
    /// Remaining top-level keys of the body
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Builds the envelope of a request that never got a response
    #[must_use]
    pub fn transport_failure(code: TransportErrorCode, info: TransportInfo) -> Self {
        Self {
            errors: Some(serde_json::json!(code)),
            headers: Some(info),
            ..Self::default()
        }
    }

    /// Builds the envelope of a received response
    ///
    /// An empty body gives an envelope with only `headers`. A body that is
    /// not JSON is dropped with a warning. A JSON body that is not an object
    /// is returned as `data`.
    #[must_use]
    pub fn from_body(body: &str, info: TransportInfo) -> Self {
        let mut envelope = Self::default();

        if !body.trim().is_empty() {
            match serde_json::from_str::<Value>(body) {
                Ok(Value::Object(mut map)) => {
                    envelope.data = map.remove("data");
                    envelope.errors = map.remove("errors");
                    map.remove("headers");
                    envelope.extra = map;
                }
                Ok(other) => envelope.data = Some(other),
                Err(e) => warn!(
                    "Response from {} (status {}) is not valid JSON: {}",
                    info.url, info.http_code, e
                ),
            }
        }

        envelope.headers = Some(info);
        envelope
    }

    /// HTTP status code, if the transport metadata is still present
    #[must_use]
    pub fn http_code(&self) -> Option<u16> {
        self.headers.as_ref().map(|h| h.http_code)
    }

    /// Whether the response carried HTTP 200
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.http_code() == Some(200)
    }

    /// Transport failure code, if the request never got a response
    #[must_use]
    pub fn transport_error(&self) -> Option<TransportErrorCode> {
        self.errors
            .as_ref()
            .and_then(|e| serde_json::from_value(e.clone()).ok())
    }

    /// Whether `errors` is present
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors.is_some()
    }

    /// Removes the transport metadata
    #[must_use]
    pub fn without_headers(mut self) -> Self {
        self.headers = None;
        self
    }
}

/// Uniform result of the authentication operations
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// The API answered HTTP 200 and the session bookkeeping is done
    Success,
    /// Anything else, with the envelope for inspection
    Failure(Envelope),
}

impl AuthOutcome {
    /// Whether the operation succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    /// Envelope of a failed operation
    #[must_use]
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure(envelope) => Some(envelope),
        }
    }

    /// Converts into a `Result`, the failure envelope as the error
    pub fn into_result(self) -> Result<(), Envelope> {
        match self {
            AuthOutcome::Success => Ok(()),
            AuthOutcome::Failure(envelope) => Err(envelope),
        }
    }
}

impl From<AuthOutcome> for bool {
    fn from(outcome: AuthOutcome) -> Self {
        outcome.is_success()
    }
}
