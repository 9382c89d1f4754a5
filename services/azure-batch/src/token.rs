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
use std::sync::Arc;

use batchsign_core::time::{format_http_date, now, DateTime};
use batchsign_core::utils::Redact;
use batchsign_core::{Error, Interceptor, RequestDescriptor, Result};
use http::header;

use crate::constants::OCP_DATE;

/// Token is an OAuth access token obtained out of band.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    expires_at: Option<DateTime>,
}

impl Token {
    /// Create a new token, `expires_at` is `None` for tokens without expiry.
    pub fn new(access_token: impl Into<String>, expires_at: Option<DateTime>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    /// The raw access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Expiry time of this token.
    pub fn expires_at(&self) -> Option<DateTime> {
        self.expires_at
    }

    /// Check if the token is usable now.
    ///
    /// Take 20s as buffer so the token doesn't expire while the request is in flight.
    pub fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at > now() + chrono::Duration::seconds(20),
            None => true,
        }
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// ProvideToken hands out the current bearer token.
///
/// Implementations are called on every request and must not block: acquiring
/// or refreshing tokens happens elsewhere.
pub trait ProvideToken: Debug + Send + Sync + 'static {
    /// Get the current token.
    fn provide_token(&self) -> Result<Token>;
}

/// StaticTokenProvider always returns the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    /// Create a provider for a fixed token.
    pub fn new(token: Token) -> Self {
        Self { token }
    }
}

impl ProvideToken for StaticTokenProvider {
    fn provide_token(&self) -> Result<Token> {
        Ok(self.token.clone())
    }
}

/// BearerTokenInterceptor authorizes requests with an OAuth bearer token.
#[derive(Debug, Clone)]
pub struct BearerTokenInterceptor {
    tokens: Arc<dyn ProvideToken>,
}

impl BearerTokenInterceptor {
    /// Create a new bearer token interceptor.
    pub fn new(tokens: impl ProvideToken) -> Self {
        Self {
            tokens: Arc::new(tokens),
        }
    }

    /// Create a new bearer token interceptor from a shared token source.
    pub fn from_shared(tokens: Arc<dyn ProvideToken>) -> Self {
        Self { tokens }
    }
}

impl Interceptor for BearerTokenInterceptor {
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        let token = self.tokens.provide_token()?;
        if token.access_token().is_empty() {
            return Err(Error::credential_invalid("bearer token is empty"));
        }
        if !token.is_valid() {
            return Err(Error::credential_expired(format!(
                "bearer token expired at {:?}",
                token.expires_at()
            )));
        }

        if !req.headers.contains(OCP_DATE) && !req.headers.contains(header::DATE.as_str()) {
            req.headers.insert(OCP_DATE, format_http_date(now()));
        }
        req.headers.insert(
            header::AUTHORIZATION.as_str(),
            format!("Bearer {}", token.access_token()),
        );
        Ok(())
    }
}
