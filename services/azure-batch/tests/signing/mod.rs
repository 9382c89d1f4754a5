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

mod shared_key;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const ACCOUNT_NAME: &str = "acct";
/// base64 of `secret`.
pub const ACCOUNT_KEY: &str = "c2VjcmV0";
pub const OCP_DATE: &str = "Mon, 01 Jan 2024 00:00:00 GMT";

/// Compute the expected `Authorization` value without going through the crate.
pub fn expected_authorization(string_to_sign: &str) -> String {
    let key = BASE64_STANDARD
        .decode(ACCOUNT_KEY)
        .expect("key must be valid base64");
    let mut mac = Hmac::<Sha256>::new_from_slice(&key).expect("hmac accepts any key size");
    mac.update(string_to_sign.as_bytes());

    format!(
        "SharedKey {ACCOUNT_NAME}:{}",
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    )
}
