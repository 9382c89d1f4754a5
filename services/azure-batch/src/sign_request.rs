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

use batchsign_core::time::{format_http_date, now, DateTime};
use batchsign_core::{Interceptor, RequestDescriptor, Result};
use http::header;
use log::debug;

use crate::canonical::string_to_sign;
use crate::constants::OCP_DATE;
use crate::signer::sign;
use crate::Credential;

/// SharedKeyInterceptor implements Shared Key authorization.
///
/// - Injects `ocp-date` if the request carries neither `ocp-date` nor `Date`.
/// - Sets `Authorization: SharedKey {account}:{signature}`, overwriting any
///   previous value.
///
/// A date header that is already present is never touched, so running the
/// interceptor twice on a request that changed in between signs the new
/// content with the old date. Push it last in the chain and run the chain once
/// per outgoing request.
///
/// - [Authenticate requests to Azure Batch](https://learn.microsoft.com/en-us/rest/api/batchservice/authenticate-requests-to-the-azure-batch-service)
#[derive(Debug, Clone)]
pub struct SharedKeyInterceptor {
    credential: Credential,
    time: Option<DateTime>,
}

impl SharedKeyInterceptor {
    /// Create a new shared key interceptor.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The credential used to sign requests.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

impl Interceptor for SharedKeyInterceptor {
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        if !req.headers.contains(OCP_DATE) && !req.headers.contains(header::DATE.as_str()) {
            let date = format_http_date(self.time.unwrap_or_else(now));
            debug!("request has no date header, set {OCP_DATE}: {date}");
            req.headers.insert(OCP_DATE, date);
        }

        let account_name = self.credential.account_name();
        let string_to_sign = string_to_sign(req, account_name)?;
        let signature = sign(self.credential.account_key(), &string_to_sign)?;

        req.headers.insert(
            header::AUTHORIZATION.as_str(),
            format!("SharedKey {account_name}:{signature}"),
        );
        Ok(())
    }
}
