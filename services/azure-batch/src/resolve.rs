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

use batchsign_core::utils::Redact;
use batchsign_core::{Error, Interceptor, Result};
use log::{debug, warn};

use crate::token::{BearerTokenInterceptor, ProvideToken};
use crate::{connection_string, Config, Credential, SasTokenInterceptor, SharedKeyInterceptor};

/// CredentialProvider is the authorization strategy picked by [`resolve`].
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialProvider {
    /// A connection string, parsed when building the interceptor.
    ConnectionString(String),
    /// A shared access signature.
    SasToken(String),
    /// Shared key signing.
    SharedKey {
        /// Batch account name.
        account_name: String,
        /// Base64 encoded account key.
        account_key: String,
    },
    /// AAD service principal with a client secret.
    ClientSecret {
        /// AAD tenant id.
        tenant_id: String,
        /// AAD application id.
        client_id: String,
        /// AAD client secret.
        client_secret: String,
    },
    /// AAD service principal with a client certificate.
    ClientCertificate {
        /// AAD tenant id.
        tenant_id: String,
        /// AAD application id.
        client_id: String,
        /// Path to the PEM or PKCS#12 certificate.
        certificate_path: String,
    },
}

impl Debug for CredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialProvider::ConnectionString(v) => f
                .debug_tuple("ConnectionString")
                .field(&Redact::from(v))
                .finish(),
            CredentialProvider::SasToken(v) => {
                f.debug_tuple("SasToken").field(&Redact::from(v)).finish()
            }
            CredentialProvider::SharedKey {
                account_name,
                account_key,
            } => f
                .debug_struct("SharedKey")
                .field("account_name", account_name)
                .field("account_key", &Redact::from(account_key))
                .finish(),
            CredentialProvider::ClientSecret {
                tenant_id,
                client_id,
                client_secret,
            } => f
                .debug_struct("ClientSecret")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .field("client_secret", &Redact::from(client_secret))
                .finish(),
            CredentialProvider::ClientCertificate {
                tenant_id,
                client_id,
                certificate_path,
            } => f
                .debug_struct("ClientCertificate")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .field("certificate_path", certificate_path)
                .finish(),
        }
    }
}

/// Pick the authorization strategy of `config`.
///
/// The first fully specified strategy wins, in this order:
///
/// - connection string
/// - SAS token
/// - account name and account key
/// - tenant id, client id and client secret
/// - tenant id, client id and client certificate path
///
/// Empty values are treated as absent. Returns `None` if no strategy matches.
pub fn resolve(config: &Config) -> Option<CredentialProvider> {
    let provider = resolve_inner(config);
    match &provider {
        Some(v) => debug!("resolved credential provider: {v:?}"),
        None => debug!("no credential provider found in config"),
    }
    provider
}

fn resolve_inner(config: &Config) -> Option<CredentialProvider> {
    if let Some(v) = present(&config.connection_string) {
        return Some(CredentialProvider::ConnectionString(v.to_string()));
    }

    if let Some(v) = present(&config.sas_token) {
        return Some(CredentialProvider::SasToken(v.to_string()));
    }

    match (present(&config.account_name), present(&config.account_key)) {
        (Some(account_name), Some(account_key)) => {
            return Some(CredentialProvider::SharedKey {
                account_name: account_name.to_string(),
                account_key: account_key.to_string(),
            })
        }
        (None, Some(_)) => warn!("account key is set without account name, ignored"),
        _ => {}
    }

    let tenant_id = present(&config.tenant_id);
    let client_id = present(&config.client_id);

    if let (Some(tenant_id), Some(client_id), Some(client_secret)) =
        (tenant_id, client_id, present(&config.client_secret))
    {
        return Some(CredentialProvider::ClientSecret {
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        });
    }

    if let (Some(tenant_id), Some(client_id), Some(certificate_path)) =
        (tenant_id, client_id, present(&config.client_certificate_path))
    {
        return Some(CredentialProvider::ClientCertificate {
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            certificate_path: certificate_path.to_string(),
        });
    }

    None
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|v| !v.trim().is_empty())
}

impl CredentialProvider {
    /// Name of the strategy, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            CredentialProvider::ConnectionString(_) => "connection_string",
            CredentialProvider::SasToken(_) => "sas_token",
            CredentialProvider::SharedKey { .. } => "shared_key",
            CredentialProvider::ClientSecret { .. } => "client_secret",
            CredentialProvider::ClientCertificate { .. } => "client_certificate",
        }
    }

    /// Build the interceptor authorizing requests with this strategy.
    ///
    /// AAD strategies need `tokens` since acquiring tokens happens outside
    /// of this crate.
    pub fn into_interceptor(
        self,
        tokens: Option<Arc<dyn ProvideToken>>,
    ) -> Result<Arc<dyn Interceptor>> {
        let name = self.name();
        match self {
            CredentialProvider::ConnectionString(v) => {
                let cs = connection_string::parse(&v)?;
                if let Some(token) = cs.sas_token {
                    return Ok(Arc::new(SasTokenInterceptor::new(token)?));
                }
                match (cs.account_name, cs.account_key) {
                    (Some(account_name), Some(account_key)) => Ok(Arc::new(
                        SharedKeyInterceptor::new(Credential::new(account_name, account_key)?),
                    )),
                    _ => Err(Error::config_invalid(
                        "connection string carries neither SharedAccessSignature nor AccountName and AccountKey",
                    )),
                }
            }
            CredentialProvider::SasToken(token) => Ok(Arc::new(SasTokenInterceptor::new(token)?)),
            CredentialProvider::SharedKey {
                account_name,
                account_key,
            } => Ok(Arc::new(SharedKeyInterceptor::new(Credential::new(
                account_name,
                account_key,
            )?))),
            CredentialProvider::ClientSecret { .. }
            | CredentialProvider::ClientCertificate { .. } => match tokens {
                Some(tokens) => Ok(Arc::new(BearerTokenInterceptor::from_shared(tokens))),
                None => Err(Error::config_invalid(format!(
                    "credential provider {name} requires a token source"
                ))),
            },
        }
    }
}
