/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/
use crate::application::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::envelope::{Envelope, TransportErrorCode, TransportInfo};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Method};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Verbs used against the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read; payload goes to the query string
    Get,
    /// Create; payload goes to the JSON body
    Post,
    /// Update; payload goes to the JSON body
    Patch,
    /// Delete; payload goes to the JSON body
    Delete,
}

impl HttpMethod {
    /// Whether the payload is sent as a JSON body rather than a query string
    #[must_use]
    pub fn sends_body(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Encodes a JSON payload as a query string
///
/// Nested objects and arrays use bracket notation
/// (`filter[status][_eq]=published`, `fields[0]=id`), booleans become `1`
/// or `0` and `null` entries are skipped. Scalars at the top level have no
/// key to attach to and yield an empty string.
#[must_use]
pub fn build_query(data: &Value) -> String {
    let mut pairs = Vec::new();
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                push_pairs(key.clone(), value, &mut pairs);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                push_pairs(index.to_string(), value, &mut pairs);
            }
        }
        _ => {}
    }
    pairs.join("&")
}

fn push_pairs(key: String, value: &Value, out: &mut Vec<String>) {
    let scalar = match value {
        Value::Null => return,
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            for (sub, nested) in map {
                push_pairs(format!("{key}[{sub}]"), nested, out);
            }
            return;
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                push_pairs(format!("{key}[{index}]"), nested, out);
            }
            return;
        }
    };
    out.push(format!(
        "{}={}",
        urlencoding::encode(&key),
        urlencoding::encode(&scalar)
    ));
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Thin wrapper over `reqwest` issuing one API call at a time
///
/// Never fails: transport problems are folded into the returned
/// [`Envelope`].
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
}

impl Transport {
    /// Builds the HTTP client with the configured timeouts
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: Config::normalize_base_url(&config.base_url),
        })
    }

    /// Base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of `path`, query string excluded
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request and folds the outcome into an envelope
    ///
    /// # Arguments
    /// * `method` - Verb; decides where `data` goes
    /// * `path` - API path starting with `/`
    /// * `data` - Optional payload
    /// * `bearer` - Token for the `Authorization` header
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        data: Option<&Value>,
        bearer: Option<&str>,
    ) -> Envelope {
        let mut url = self.url(path);
        if let (HttpMethod::Get, Some(data)) = (method, data) {
            let query = build_query(data);
            if !query.is_empty() {
                url = format!("{url}?{query}");
            }
        }

        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method.into(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        if let Some(data) = data.filter(|_| method.sends_body()) {
            request = request.json(data);
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let code = TransportErrorCode::from(&e);
                error!("{} {} failed: {:?} ({})", method, url, code, e);
                return Envelope::transport_failure(
                    code,
                    TransportInfo {
                        http_code: 0,
                        url,
                        total_time: started.elapsed().as_secs_f64(),
                        ..TransportInfo::default()
                    },
                );
            }
        };

        let status = response.status();
        debug!("Response status: {}", status);

        let mut info = TransportInfo {
            http_code: status.as_u16(),
            url: response.url().to_string(),
            content_type: response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
            total_time: 0.0,
            response_headers: header_map(response.headers()),
        };

        match response.text().await {
            Ok(body) => {
                info.total_time = started.elapsed().as_secs_f64();
                Envelope::from_body(&body, info)
            }
            Err(e) => {
                let code = TransportErrorCode::from(&e);
                error!("Reading response of {} {} failed: {}", method, url, e);
                info.total_time = started.elapsed().as_secs_f64();
                Envelope::transport_failure(code, info)
            }
        }
    }
}
