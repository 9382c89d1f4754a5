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

use std::fmt::{Debug, Formatter};

use batchsign_core::utils::Redact;
use batchsign_core::{Error, Interceptor, RequestDescriptor, Result};

/// SasTokenInterceptor authorizes requests with a shared access signature.
///
/// The token's query pairs are merged into the request query. No
/// `Authorization` header is set.
#[derive(Clone)]
pub struct SasTokenInterceptor {
    token: String,
}

impl SasTokenInterceptor {
    /// Create a new SAS token interceptor, a leading `?` is ignored.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let token = token.trim().trim_start_matches('?').to_string();
        if token.is_empty() {
            return Err(Error::config_invalid("sas token is required"));
        }

        Ok(Self { token })
    }
}

impl Debug for SasTokenInterceptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SasTokenInterceptor")
            .field("token", &Redact::from(&self.token))
            .finish()
    }
}

impl Interceptor for SasTokenInterceptor {
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        req.query_merge(&self.token);
        Ok(())
    }
}
