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
use batchsign_core::{Env, Result};
use serde::Deserialize;

use crate::connection_string;
use crate::constants::*;

/// Config carries all the configuration for Azure Batch authorization.
///
/// Every value is loaded from
///
/// - this field if it's `is_some`
/// - the env value named on the field when calling [`Config::from_env`]
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_BATCH_ACCOUNT`]
    pub account_name: Option<String>,
    /// `account_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_BATCH_ACCESS_KEY`]
    pub account_key: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_BATCH_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `sas_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_BATCH_SAS_TOKEN`]
    pub sas_token: Option<String>,
    /// `connection_string` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_BATCH_CONNECTION_STRING`]
    pub connection_string: Option<String>,
    /// `tenant_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_TENANT_ID`]
    pub tenant_id: Option<String>,
    /// `client_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_CLIENT_ID`]
    pub client_id: Option<String>,
    /// `client_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_CLIENT_SECRET`]
    pub client_secret: Option<String>,
    /// `client_certificate_path` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_CLIENT_CERTIFICATE_PATH`]
    pub client_certificate_path: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("endpoint", &self.endpoint)
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("connection_string", &Redact::from(&self.connection_string))
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("client_certificate_path", &self.client_certificate_path)
            .finish()
    }
}

impl Config {
    /// Load config from env, values already set are kept.
    pub fn from_env(mut self, env: &dyn Env) -> Self {
        let fields = [
            (&mut self.account_name, AZURE_BATCH_ACCOUNT),
            (&mut self.account_key, AZURE_BATCH_ACCESS_KEY),
            (&mut self.endpoint, AZURE_BATCH_ENDPOINT),
            (&mut self.sas_token, AZURE_BATCH_SAS_TOKEN),
            (&mut self.connection_string, AZURE_BATCH_CONNECTION_STRING),
            (&mut self.tenant_id, AZURE_TENANT_ID),
            (&mut self.client_id, AZURE_CLIENT_ID),
            (&mut self.client_secret, AZURE_CLIENT_SECRET),
            (&mut self.client_certificate_path, AZURE_CLIENT_CERTIFICATE_PATH),
        ];

        for (field, key) in fields {
            if field.is_none() {
                *field = env.var(key);
            }
        }

        self
    }

    /// Build a config from a [connection string][crate::ConnectionString].
    ///
    /// The connection string is stored as is and its parsed values fill the
    /// other fields, so both are available to the resolver.
    pub fn try_from_connection_string(conn_str: &str) -> Result<Self> {
        let cs = connection_string::parse(conn_str)?;

        Ok(Config {
            account_name: cs.account_name,
            account_key: cs.account_key,
            endpoint: cs.endpoint,
            sas_token: cs.sas_token,
            connection_string: Some(conn_str.to_string()),
            ..Default::default()
        })
    }
}
