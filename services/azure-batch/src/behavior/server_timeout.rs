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

/// ServerTimeoutInterceptor asks the service to give up after the given seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerTimeoutInterceptor {
    seconds: u32,
}

impl ServerTimeoutInterceptor {
    /// Create a new server timeout interceptor.
    pub fn new(seconds: u32) -> Self {
        Self { seconds }
    }

    /// The configured timeout in seconds.
    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

impl Interceptor for ServerTimeoutInterceptor {
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        let param = match req.operation() {
            Some(op) => match op.as_timeout() {
                Some(v) => v.timeout_param().to_string(),
                None => {
                    debug!("operation {} doesn't accept a server timeout, skip", op.name());
                    return Ok(());
                }
            },
            None => {
                debug!("request has no operation, skip server timeout");
                return Ok(());
            }
        };

        req.query_set(param, &self.seconds.to_string());
        Ok(())
    }
}
