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

use crate::{RequestDescriptor, Result};

/// Interceptor is the trait used by [`crate::InterceptorChain`] to mutate an outgoing request.
///
/// Interceptors are constructed once while building a client and shared by all
/// requests it sends, so `intercept` must only read its own configuration and
/// mutate the passed-in request. It runs synchronously and must not perform I/O.
pub trait Interceptor: Debug + Send + Sync + 'static {
    /// Mutate the request in place.
    ///
    /// Returning an error aborts the chain and the request is never sent.
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()>;
}

/// Operation describes what a request does and which optional parameters it accepts.
///
/// Behaviors use the `as_*` casts to decide whether a mutation applies. The
/// default implementations report no capability, so an operation opts in by
/// overriding the cast for each trait it implements.
pub trait Operation: Debug + Send + Sync + 'static {
    /// Name of the operation, e.g. `Job_List`.
    fn name(&self) -> &str;

    /// Cast to [`SupportsTimeout`] if the operation accepts a server timeout.
    fn as_timeout(&self) -> Option<&dyn SupportsTimeout> {
        None
    }

    /// Cast to [`SupportsODataQuery`] if the operation accepts OData options.
    fn as_odata_query(&self) -> Option<&dyn SupportsODataQuery> {
        None
    }

    /// Cast to [`SupportsClientRequestId`] if the operation accepts a client request id.
    fn as_client_request_id(&self) -> Option<&dyn SupportsClientRequestId> {
        None
    }
}

/// Operation accepts a server-side timeout.
pub trait SupportsTimeout {
    /// Query parameter carrying the timeout in seconds.
    fn timeout_param(&self) -> &str {
        "timeout"
    }
}

/// Operation accepts OData query options such as `$select`.
pub trait SupportsODataQuery {
    /// Check whether the given OData parameter is accepted.
    fn accepts_odata_param(&self, name: &str) -> bool;
}

/// Operation accepts a caller generated request id.
pub trait SupportsClientRequestId {
    /// Header carrying the request id.
    fn client_request_id_header(&self) -> &str {
        "x-ms-client-request-id"
    }

    /// Header asking the service to echo the request id back, if any.
    fn return_client_request_id_header(&self) -> Option<&str> {
        Some("return-client-request-id")
    }
}
