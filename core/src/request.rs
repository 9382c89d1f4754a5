// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::Debug;
use std::mem;
use std::str::FromStr;
use std::sync::Arc;

use http::header::HeaderName;
use http::header::AUTHORIZATION;
use http::header::CONTENT_LENGTH;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::{Error, Operation, Result};

/// Characters that stay unescaped in query values written by interceptors.
///
/// Everything outside of the RFC 3986 unreserved set is percent-encoded.
pub const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered multimap of header name to value.
///
/// - Lookup is case-insensitive.
/// - Storage keeps the spelling of the first occurrence of a name: later
///   inserts or appends of the same logical header reuse it.
/// - Insertion order is preserved, duplicates are allowed via [`Headers::append`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Create an empty header list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the first value of the header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get the first value of the header, or empty string if absent.
    #[inline]
    pub fn get_or_default(&self, name: &str) -> &str {
        self.get(name).unwrap_or_default()
    }

    /// Get all values of the header in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Set the header, replacing all existing values.
    ///
    /// The first existing occurrence keeps its position and spelling.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self
            .entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(idx) => {
                self.entries[idx].1 = value;
                let mut seen = 0;
                self.entries.retain(|(k, _)| {
                    if !k.eq_ignore_ascii_case(&name) {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// Add a value for the header, keeping existing values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let name = match self.get_key(&name) {
            Some(existing) => existing.to_string(),
            None => name,
        };
        self.entries.push((name, value.into()));
    }

    /// Remove all values of the header, returning them in insertion order.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        let (removed, kept) = mem::take(&mut self.entries)
            .into_iter()
            .partition::<Vec<_>, _>(|(k, _)| k.eq_ignore_ascii_case(name));
        self.entries = kept;
        removed.into_iter().map(|(_, v)| v).collect()
    }

    /// Iterate all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of stored header values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no header is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get header values whose lowercase name starts with `prefix`.
    ///
    /// Names are returned lowercased, in insertion order.
    pub fn to_vec_with_prefix(&self, prefix: &str) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }

    fn get_key(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(k, _)| k.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.append(k, v);
        }
        headers
    }
}

/// RequestDescriptor is the view of an outgoing request that interceptors mutate.
///
/// The descriptor is exclusively owned by the in-flight call. Interceptors
/// mutate it in place; nothing in it is shared with other requests except the
/// declared [`Operation`].
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, percent-encoded as it goes on the wire.
    pub path: String,
    /// HTTP query pairs, percent-encoded as they go on the wire.
    ///
    /// The value is `None` for a pair written without `=`, so an untouched
    /// query is written back byte for byte.
    pub query: Vec<(String, Option<String>)>,
    /// HTTP headers.
    pub headers: Headers,
    /// Length of the body if known.
    pub body_length: Option<u64>,
    /// Declared media type of the body if any.
    pub content_type: Option<String>,
    operation: Option<Arc<dyn Operation>>,
}

impl RequestDescriptor {
    /// Create a descriptor from method and uri.
    ///
    /// The uri must be absolute: a request without authority can't be signed.
    pub fn new(method: Method, uri: &str) -> Result<Self> {
        Self::from_uri(method, Uri::from_str(uri)?)
    }

    /// Create a descriptor from method and parsed uri.
    pub fn from_uri(method: Method, uri: Uri) -> Result<Self> {
        let uri = uri.into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(RequestDescriptor {
            method,
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().map(parse_raw_query).unwrap_or_default(),
            headers: Headers::new(),
            body_length: None,
            content_type: None,
            operation: None,
        })
    }

    /// Build a descriptor from `http::request::Parts`.
    ///
    /// The body length is taken from the `Content-Length` header if present.
    ///
    /// Header values are kept as UTF-8, including non-ASCII `obs-text` like
    /// `café`. A value that is not valid UTF-8 can't be represented and is
    /// rejected as [`crate::ErrorKind::RequestInvalid`].
    pub fn from_parts(parts: &http::request::Parts) -> Result<Self> {
        let mut req = Self::from_uri(parts.method.clone(), parts.uri.clone())?;

        for (name, value) in parts.headers.iter() {
            let value = std::str::from_utf8(value.as_bytes()).map_err(|e| {
                Error::request_invalid(format!("header {name} is not valid utf-8")).with_source(e)
            })?;
            req.headers.append(name.as_str(), value);
        }
        req.body_length = req
            .headers
            .get(CONTENT_LENGTH.as_str())
            .and_then(|v| v.trim().parse::<u64>().ok());

        Ok(req)
    }

    /// Apply the descriptor back to `http::request::Parts`.
    ///
    /// `Authorization` is marked as sensitive so it won't show up in debug output.
    pub fn apply(self, parts: &mut http::request::Parts) -> Result<()> {
        parts.uri = self.uri()?;
        parts.method = self.method;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers.iter() {
            let name = HeaderName::from_str(name)?;
            let mut value = HeaderValue::from_str(value)?;
            if name == AUTHORIZATION {
                value.set_sensitive(true);
            }
            headers.append(name, value);
        }
        parts.headers = headers;

        Ok(())
    }

    /// Build the full uri of this request.
    pub fn uri(&self) -> Result<Uri> {
        let mut paq = if self.path.is_empty() {
            "/".to_string()
        } else {
            self.path.clone()
        };
        if let Some(query) = self.query_string() {
            paq.push('?');
            paq.push_str(&query);
        }

        let mut uri_parts = http::uri::Parts::default();
        uri_parts.scheme = Some(self.scheme.clone());
        uri_parts.authority = Some(self.authority.clone());
        uri_parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
        Ok(Uri::from_parts(uri_parts)?)
    }

    /// Set a header, see [`Headers::insert`].
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the known body length.
    pub fn with_body_length(mut self, length: u64) -> Self {
        self.body_length = Some(length);
        self
    }

    /// Set the declared media type of the body.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Declare the operation this request performs.
    pub fn with_operation(mut self, operation: impl Operation) -> Self {
        self.operation = Some(Arc::new(operation));
        self
    }

    /// Declare a shared operation this request performs.
    pub fn with_shared_operation(mut self, operation: Arc<dyn Operation>) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Get the declared operation.
    pub fn operation(&self) -> Option<&dyn Operation> {
        self.operation.as_deref()
    }

    /// Get the raw query string, `None` if there is no query.
    pub fn query_string(&self) -> Option<String> {
        if self.query.is_empty() {
            return None;
        }

        let mut s = String::with_capacity(self.query_size() + self.query.len() * 2);
        for (i, (k, v)) in self.query.iter().enumerate() {
            if i > 0 {
                s.push('&');
            }

            s.push_str(k);
            if let Some(v) = v {
                s.push('=');
                s.push_str(v);
            }
        }
        Some(s)
    }

    /// Get query size.
    #[inline]
    pub fn query_size(&self) -> usize {
        self.query
            .iter()
            .map(|(k, v)| k.len() + v.as_ref().map_or(0, |v| v.len() + 1))
            .sum::<usize>()
    }

    /// Get the raw value of the first query pair with `key`.
    ///
    /// A pair without `=` has the empty value.
    pub fn query_get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref().unwrap_or_default())
    }

    /// Set a query pair, percent-encoding the value.
    ///
    /// An existing pair with the same key is replaced in place, other pairs
    /// with that key are dropped.
    pub fn query_set(&mut self, key: impl Into<String>, value: &str) {
        let value = utf8_percent_encode(value, QUERY_VALUE_ENCODE_SET).to_string();
        self.query_set_raw(key, value);
    }

    /// Set a query pair whose value is already percent-encoded.
    pub fn query_set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = Some(value.into());

        match self.query.iter().position(|(k, _)| *k == key) {
            Some(idx) => {
                self.query[idx].1 = value;
                let mut seen = 0;
                self.query.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.query.push((key, value)),
        }
    }

    /// Merge a raw query string like `a=b&c=d` into the query, replacing
    /// existing keys. A leading `?` is ignored.
    pub fn query_merge(&mut self, query: &str) {
        for (k, v) in parse_raw_query(query.trim_start_matches('?')) {
            if k.is_empty() && v.is_none() {
                continue;
            }
            self.query_set_raw(k, v.unwrap_or_default());
        }
    }

    /// Remove all query pairs with `key`.
    pub fn query_remove(&mut self, key: &str) {
        self.query.retain(|(k, _)| k != key);
    }
}

/// Split a raw query into pairs without decoding them.
///
/// Empty segments are kept so `a&&b` and a bare `?` survive a round trip.
fn parse_raw_query(query: &str) -> Vec<(String, Option<String>)> {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), Some(v.to_string())),
            None => (pair.to_string(), None),
        })
        .collect()
}
