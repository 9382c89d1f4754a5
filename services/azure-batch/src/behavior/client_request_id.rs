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

use batchsign_core::{Interceptor, RequestDescriptor, Result};
use log::debug;
use uuid::Uuid;

/// ClientRequestIdInterceptor tags requests with a caller generated id.
///
/// By default every request gets a fresh UUID v4, [`Self::with_id`] pins
/// the id instead. The service is also asked to echo the id back.
#[derive(Debug, Clone, Default)]
pub struct ClientRequestIdInterceptor {
    id: Option<String>,
}

impl ClientRequestIdInterceptor {
    /// Create an interceptor that generates a new id per request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interceptor that always sends the given id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

impl Interceptor for ClientRequestIdInterceptor {
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        let (id_header, return_header) = match req.operation() {
            Some(op) => match op.as_client_request_id() {
                Some(v) => (
                    v.client_request_id_header().to_string(),
                    v.return_client_request_id_header().map(|v| v.to_string()),
                ),
                None => {
                    debug!("operation {} doesn't accept client request id, skip", op.name());
                    return Ok(());
                }
            },
            None => {
                debug!("request has no operation, skip client request id");
                return Ok(());
            }
        };

        let id = match &self.id {
            Some(id) => id.clone(),
            None => Uuid::new_v4().to_string(),
        };
        req.headers.insert(id_header, id);
        if let Some(header) = return_header {
            req.headers.insert(header, "true");
        }
        Ok(())
    }
}
