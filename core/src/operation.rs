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

use std::borrow::Cow;

use crate::{Operation, SupportsClientRequestId, SupportsODataQuery, SupportsTimeout};

/// OData parameters accepted by list and get operations.
pub const ODATA_PARAMS: [&str; 3] = ["$select", "$filter", "$expand"];

/// OperationKind is a flag based [`Operation`].
///
/// It fits operations whose capabilities are known up front, which is the
/// common case for generated clients.
///
/// ```
/// use batchsign_core::{Operation, OperationKind};
///
/// let op = OperationKind::new("Job_List")
///     .with_timeout()
///     .with_odata_params(["$select", "$filter"])
///     .with_client_request_id();
///
/// assert!(op.as_timeout().is_some());
/// assert!(op.as_odata_query().unwrap().accepts_odata_param("$filter"));
/// assert!(!op.as_odata_query().unwrap().accepts_odata_param("$expand"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationKind {
    name: Cow<'static, str>,
    timeout: bool,
    odata_params: Vec<Cow<'static, str>>,
    client_request_id: bool,
}

impl OperationKind {
    /// Create an operation without any capability.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            timeout: false,
            odata_params: Vec::new(),
            client_request_id: false,
        }
    }

    /// Accept a server timeout.
    pub fn with_timeout(mut self) -> Self {
        self.timeout = true;
        self
    }

    /// Accept `$select`, `$filter` and `$expand`.
    pub fn with_odata_query(self) -> Self {
        self.with_odata_params(ODATA_PARAMS)
    }

    /// Accept the given OData parameters.
    pub fn with_odata_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.odata_params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Accept a client request id.
    pub fn with_client_request_id(mut self) -> Self {
        self.client_request_id = true;
        self
    }
}

impl Operation for OperationKind {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_timeout(&self) -> Option<&dyn SupportsTimeout> {
        self.timeout.then_some(self as &dyn SupportsTimeout)
    }

    fn as_odata_query(&self) -> Option<&dyn SupportsODataQuery> {
        (!self.odata_params.is_empty()).then_some(self as &dyn SupportsODataQuery)
    }

    fn as_client_request_id(&self) -> Option<&dyn SupportsClientRequestId> {
        self.client_request_id
            .then_some(self as &dyn SupportsClientRequestId)
    }
}

impl SupportsTimeout for OperationKind {}

impl SupportsODataQuery for OperationKind {
    fn accepts_odata_param(&self, name: &str) -> bool {
        self.odata_params.iter().any(|v| v == name)
    }
}

impl SupportsClientRequestId for OperationKind {}
