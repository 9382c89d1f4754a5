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

/// DetailLevel controls how much data the service returns.
///
/// `$select`, `$filter` and `$expand` are known up front, other OData
/// parameters can be added with [`DetailLevel::with_param`] and are applied
/// in insertion order after the known ones.
///
/// ```
/// use batchsign_azure_batch::DetailLevel;
///
/// let detail = DetailLevel::new()
///     .with_select("id,state")
///     .with_filter("state eq 'active'")
///     .with_param("$maxresults", "10");
///
/// let params: Vec<_> = detail.params().collect();
/// assert_eq!(
///     params,
///     vec![
///         ("$select", "id,state"),
///         ("$filter", "state eq 'active'"),
///         ("$maxresults", "10"),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailLevel {
    select: Option<String>,
    filter: Option<String>,
    expand: Option<String>,
    extra: Vec<(String, String)>,
}

impl DetailLevel {
    /// Create an empty detail level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `$select`.
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Set `$filter`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set `$expand`.
    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Add another OData parameter, a later value for the same name wins.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.extra.iter_mut().find(|(k, _)| *k == name) {
            Some(v) => v.1 = value,
            None => self.extra.push((name, value)),
        }
        self
    }

    /// Iterate over all present parameters.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            ("$select", &self.select),
            ("$filter", &self.filter),
            ("$expand", &self.expand),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
        .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Check if no parameter is present.
    pub fn is_empty(&self) -> bool {
        self.params().next().is_none()
    }
}

/// DetailLevelInterceptor applies a [`DetailLevel`] to the request query.
#[derive(Debug, Clone)]
pub struct DetailLevelInterceptor {
    detail: DetailLevel,
}

impl DetailLevelInterceptor {
    /// Create a new detail level interceptor.
    pub fn new(detail: DetailLevel) -> Self {
        Self { detail }
    }
}

impl Interceptor for DetailLevelInterceptor {
    fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
        if self.detail.is_empty() {
            return Ok(());
        }

        let params: Vec<(String, String)> = {
            let Some(op) = req.operation() else {
                debug!("request has no operation, skip detail level");
                return Ok(());
            };
            let Some(odata) = op.as_odata_query() else {
                debug!("operation {} doesn't accept odata query, skip", op.name());
                return Ok(());
            };

            self.detail
                .params()
                .filter(|(name, _)| {
                    let accepted = odata.accepts_odata_param(name);
                    if !accepted {
                        debug!("operation {} doesn't accept {name}, skip", op.name());
                    }
                    accepted
                })
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        for (k, v) in params {
            req.query_set(k, &v);
        }
        Ok(())
    }
}
