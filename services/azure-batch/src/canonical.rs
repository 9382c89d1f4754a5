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

//! Canonical string-to-sign for Shared Key authorization.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write;

use batchsign_core::{RequestDescriptor, Result};
use http::header;
use log::debug;

use crate::constants::*;

/// Construct the string to sign of `req` for `account_name`.
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Encoding + "\n" +
/// Content-Language + "\n" +
/// Content-Length + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// If-Modified-Since + "\n" +
/// If-Match + "\n" +
/// If-None-Match + "\n" +
/// If-Unmodified-Since + "\n" +
/// Range + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource;
/// ```
///
/// The request is only read: date injection happens in the interceptor
/// before this is called.
pub fn string_to_sign(req: &RequestDescriptor, account_name: &str) -> Result<String> {
    let mut s = String::with_capacity(256);

    writeln!(&mut s, "{}", req.method.as_str())?;
    writeln!(
        &mut s,
        "{}",
        req.headers.get_or_default(header::CONTENT_ENCODING.as_str())
    )?;
    writeln!(
        &mut s,
        "{}",
        req.headers.get_or_default(header::CONTENT_LANGUAGE.as_str())
    )?;
    match req.body_length {
        Some(length) => writeln!(&mut s, "{length}")?,
        None => writeln!(&mut s)?,
    }
    writeln!(&mut s, "{}", req.headers.get_or_default(CONTENT_MD5))?;
    writeln!(&mut s, "{}", content_type(req))?;
    for name in [
        header::DATE,
        header::IF_MODIFIED_SINCE,
        header::IF_MATCH,
        header::IF_NONE_MATCH,
        header::IF_UNMODIFIED_SINCE,
        header::RANGE,
    ] {
        writeln!(&mut s, "{}", req.headers.get_or_default(name.as_str()))?;
    }
    s.push_str(&canonicalize_headers(req));
    s.push_str(&canonicalize_resource(req, account_name));

    debug!("string to sign: {}", &s);

    Ok(s)
}

/// Explicit `Content-Type` header wins over the declared media type of the body.
fn content_type(req: &RequestDescriptor) -> &str {
    req.headers
        .get(header::CONTENT_TYPE.as_str())
        .or(req.content_type.as_deref())
        .unwrap_or_default()
}

/// Every `ocp-` header as `name:value\n`, sorted by lowercase name.
///
/// Headers sharing a name are all kept, in their original order.
pub fn canonicalize_headers(req: &RequestDescriptor) -> String {
    let mut headers = req.headers.to_vec_with_prefix(OCP_HEADER_PREFIX);
    // Stable sort keeps duplicated names in insertion order.
    headers.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut s = String::with_capacity(64);
    for (name, value) in headers {
        s.push_str(&name);
        s.push(':');
        s.push_str(&normalize_header_value(&value));
        s.push('\n');
    }
    s
}

fn normalize_header_value(value: &str) -> Cow<'_, str> {
    if value.contains(['\r', '\n']) {
        let value = value.replace(['\r', '\n'], " ");
        Cow::Owned(value.trim_start_matches(' ').to_string())
    } else {
        Cow::Borrowed(value.trim_start_matches(' '))
    }
}

/// `/{account}/{path}` followed by the canonicalized query if any.
///
/// ## Note
///
/// `%5C` and `%2F` in the path are rewritten to `/`. The service verifies
/// signatures against its own, historically buggy, decoding of these escapes,
/// so the rewrite must be kept byte-for-byte.
pub fn canonicalize_resource(req: &RequestDescriptor, account_name: &str) -> String {
    let path = req
        .path
        .trim_start_matches('/')
        .replace("%5C", "/")
        .replace("%2F", "/");

    let mut s = format!("/{}/{}", account_name.to_lowercase(), path);
    if let Some(query) = req.query_string() {
        s.push_str(&canonicalize_query(&query));
    }
    s
}

/// Decode, lowercase and sort the query, rendering each pair as `\n{key}:{key}:{value}`.
///
/// Keys are compared after decoding and lowercasing; for repeated keys the
/// last value wins.
pub fn canonicalize_query(query: &str) -> String {
    let pairs: BTreeMap<String, String> = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.to_lowercase(), v.into_owned()))
        .collect();

    let mut s = String::with_capacity(query.len() * 2);
    for (key, value) in pairs {
        s.push('\n');
        s.push_str(&key);
        s.push(':');
        s.push_str(&key);
        s.push(':');
        s.push_str(&value);
    }
    s
}
