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

use batchsign_core::hash::{base64_decode, base64_hmac_sha256};
use batchsign_core::{Error, Result};

/// Sign `string_to_sign` with a base64 encoded key.
///
/// Returns the base64 encoded HMAC-SHA256 digest. A key that can't be decoded
/// or decodes to nothing is an invalid credential: the request must fail
/// before it is sent rather than be rejected by the service later.
pub fn sign(base64_key: &str, string_to_sign: &str) -> Result<String> {
    let key = base64_decode(base64_key)
        .map_err(|e| Error::credential_invalid("account key is not valid base64").with_source(e))?;
    if key.is_empty() {
        return Err(Error::credential_invalid("account key is empty"));
    }

    base64_hmac_sha256(&key, string_to_sign.as_bytes())
}
