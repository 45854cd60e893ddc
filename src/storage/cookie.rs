/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Cookie-like credential store
//!
//! Reads come from the cookies the client sent with the current request.
//! Writes and removals are queued as `Set-Cookie` headers for the response;
//! a removal is an already-expired cookie with an empty value. Nothing
//! queued becomes visible to [`CredentialStore::get`] until the client sends
//! the cookies back on its next request (or [`CookieStore::apply_pending`]
//! is called to stand in for that round trip). A logout therefore does not
//! un-authenticate later calls made within the same round trip.

use crate::constants::{COOKIE_MAX_AGE_SECS, COOKIE_PATH};
use crate::storage::store::{AuthStorage, CredentialStore};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

const COOKIE_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Cookie queued for the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value (empty for a removal)
    pub value: String,
    /// Absolute expiry
    pub expires: DateTime<Utc>,
    /// Max-Age attribute in seconds
    pub max_age: i64,
    /// Path attribute
    pub path: String,
}

impl SetCookie {
    fn persistent(name: &str, value: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            expires: now + Duration::seconds(COOKIE_MAX_AGE_SECS),
            max_age: COOKIE_MAX_AGE_SECS,
            path: COOKIE_PATH.to_string(),
        }
    }

    fn expired(name: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            expires: now - Duration::seconds(1),
            max_age: 0,
            path: COOKIE_PATH.to_string(),
        }
    }

    /// Whether this cookie deletes the client-side value
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.max_age <= 0
    }

    /// Renders the value of a `Set-Cookie` header
    #[must_use]
    pub fn to_header_value(&self) -> String {
        format!(
            "{}={}; Expires={}; Max-Age={}; Path={}",
            self.name,
            urlencoding::encode(&self.value),
            self.expires.format(COOKIE_DATE_FORMAT),
            self.max_age.max(0),
            self.path
        )
    }
}

#[derive(Debug, Default)]
struct CookieJar {
    incoming: HashMap<String, String>,
    pending: Vec<SetCookie>,
}

/// Credential store backed by client cookies
#[derive(Debug, Default)]
pub struct CookieStore {
    jar: Mutex<CookieJar>,
}

impl CookieStore {
    /// Creates a store for a request that carried no cookies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from the value of an incoming `Cookie` header
    ///
    /// Pairs without `=` are ignored and values are percent-decoded.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        let incoming = header
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let value = urlencoding::decode(value.trim())
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.trim().to_string());
                Some((name.to_string(), value))
            })
            .collect();

        Self {
            jar: Mutex::new(CookieJar {
                incoming,
                pending: Vec::new(),
            }),
        }
    }

    /// Cookies queued for the response, in write order
    #[must_use]
    pub fn pending_cookies(&self) -> Vec<SetCookie> {
        self.jar.lock().pending.clone()
    }

    /// Drains the queued cookies as `Set-Cookie` header values
    pub fn take_set_cookie_headers(&self) -> Vec<String> {
        let mut jar = self.jar.lock();
        jar.pending
            .drain(..)
            .map(|cookie| cookie.to_header_value())
            .collect()
    }

    /// Applies the queued cookies to the readable set, as a client would
    /// before its next request
    pub fn apply_pending(&self) {
        let mut jar = self.jar.lock();
        let pending = std::mem::take(&mut jar.pending);
        for cookie in pending {
            if cookie.is_removal() {
                jar.incoming.remove(&cookie.name);
            } else {
                jar.incoming.insert(cookie.name, cookie.value);
            }
        }
    }
}

impl CredentialStore for CookieStore {
    fn set(&self, key: &str, value: &str) {
        debug!("Queueing cookie {}", key);
        self.jar
            .lock()
            .pending
            .push(SetCookie::persistent(key, value, Utc::now()));
    }

    fn get(&self, key: &str) -> Option<String> {
        self.jar.lock().incoming.get(key).cloned()
    }

    fn unset(&self, key: &str) {
        debug!("Queueing expired cookie {}", key);
        self.jar
            .lock()
            .pending
            .push(SetCookie::expired(key, Utc::now()));
    }

    fn backend(&self) -> AuthStorage {
        AuthStorage::Cookie
    }
}
