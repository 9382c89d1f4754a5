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

use std::fmt::{self, Debug};
use std::sync::Arc;

use log::debug;

use crate::{Interceptor, RequestDescriptor, Result};

/// InterceptorChain applies interceptors in registration order.
///
/// The chain never reorders or de-duplicates interceptors: when two of them
/// set the same field, whichever runs last decides the value. Credential
/// interceptors should therefore be pushed last so they sign the final request.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interceptor to the end of the chain.
    pub fn push(mut self, interceptor: impl Interceptor) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Add a shared interceptor to the end of the chain.
    pub fn push_shared(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Add interceptors to the end of the chain.
    pub fn extend(mut self, interceptors: impl IntoIterator<Item = Arc<dyn Interceptor>>) -> Self {
        self.interceptors.extend(interceptors);
        self
    }

    /// Build a new chain running `self` first and then `other`.
    ///
    /// Used to layer per-call interceptors on top of client level ones so the
    /// per-call settings win.
    pub fn merge(&self, other: &InterceptorChain) -> Self {
        Self {
            interceptors: self
                .interceptors
                .iter()
                .chain(other.interceptors.iter())
                .cloned()
                .collect(),
        }
    }

    /// Number of interceptors in the chain.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Iterate interceptors in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Interceptor>> {
        self.interceptors.iter()
    }

    /// Run all interceptors against the request.
    ///
    /// Stops at the first error; the request must not be sent in that case.
    pub fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        for interceptor in &self.interceptors {
            debug!("applying interceptor: {:?}", interceptor);
            interceptor.intercept(req)?;
        }
        Ok(())
    }

    /// Run all interceptors against an owned request and return it.
    pub fn apply(&self, mut req: RequestDescriptor) -> Result<RequestDescriptor> {
        self.intercept(&mut req)?;
        Ok(req)
    }

    /// Run all interceptors against `http::request::Parts`.
    ///
    /// ```
    /// use batchsign_core::{InterceptorChain, InterceptorFn};
    ///
    /// # fn main() -> batchsign_core::Result<()> {
    /// let chain = InterceptorChain::new().push(InterceptorFn::new("api-version", |req| {
    ///     req.query_set("api-version", "2024-07-01.20.0");
    ///     Ok(())
    /// }));
    ///
    /// let (mut parts, _) = http::Request::get("https://acct.example.com/jobs")
    ///     .body(())
    ///     .unwrap()
    ///     .into_parts();
    /// chain.apply_parts(&mut parts)?;
    ///
    /// assert_eq!(
    ///     parts.uri,
    ///     "https://acct.example.com/jobs?api-version=2024-07-01.20.0"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn apply_parts(&self, parts: &mut http::request::Parts) -> Result<()> {
        let mut req = RequestDescriptor::from_parts(parts)?;
        self.intercept(&mut req)?;
        req.apply(parts)
    }
}

impl Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.interceptors.iter()).finish()
    }
}

/// InterceptorFn turns a closure into a named [`Interceptor`].
///
/// The closure must only capture immutable configuration.
pub struct InterceptorFn<F> {
    name: &'static str,
    f: F,
}

impl<F> InterceptorFn<F>
where
    F: Fn(&mut RequestDescriptor) -> Result<()> + Send + Sync + 'static,
{
    /// Create a new interceptor from a closure.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Debug for InterceptorFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorFn")
            .field("name", &self.name)
            .finish()
    }
}

impl<F> Interceptor for InterceptorFn<F>
where
    F: Fn(&mut RequestDescriptor) -> Result<()> + Send + Sync + 'static,
{
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        (self.f)(req)
    }
}
