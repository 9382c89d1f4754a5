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

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;

use batchsign_core::utils::Redact;
use batchsign_core::{Error, Result};

/// ConnectionString holds the values parsed from a Batch connection string.
///
/// An example of a connection string looks like:
///
/// ```txt
/// AccountName=mybatchaccount;
/// AccountKey=c2VjcmV0;
/// BatchEndpoint=https://mybatchaccount.westus.batch.azure.com
/// ```
///
/// The connection string doesn't have to carry every value: users are still
/// allowed to supplement the endpoint or credentials later.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    /// Value of `AccountName`.
    pub account_name: Option<String>,
    /// Value of `AccountKey`, dropped when a SAS token is present.
    pub account_key: Option<String>,
    /// Value of `SharedAccessSignature`.
    pub sas_token: Option<String>,
    /// Value of `BatchEndpoint`, or built from `AccountName` and `EndpointSuffix`.
    pub endpoint: Option<String>,
}

impl Debug for ConnectionString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl FromStr for ConnectionString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parse a connection string.
pub fn parse(conn_str: &str) -> Result<ConnectionString> {
    let key_values = parse_into_key_values(conn_str)?;

    let mut cs = ConnectionString {
        account_name: key_values.get("AccountName").cloned(),
        endpoint: collect_endpoint(&key_values)?,
        ..Default::default()
    };

    if let Some(token) = key_values.get("SharedAccessSignature") {
        cs.sas_token = Some(token.clone());
    } else if cs.account_name.is_some() {
        cs.account_key = key_values.get("AccountKey").cloned();
    }

    Ok(cs)
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace(['\r', '\n'], "")
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                Error::config_invalid(format!(
                    "invalid connection string, expected '=' in field: {}",
                    field.split('=').next().unwrap_or_default()
                ))
            })?;
            Ok((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// `BatchEndpoint` is used directly, otherwise the endpoint is built from parts.
fn collect_endpoint(key_values: &HashMap<String, String>) -> Result<Option<String>> {
    if let Some(endpoint) = key_values.get("BatchEndpoint") {
        return Ok(Some(endpoint.clone()));
    }

    let (account_name, endpoint_suffix) = match (
        key_values.get("AccountName"),
        key_values.get("EndpointSuffix"),
    ) {
        (Some(name), Some(suffix)) => (name, suffix),
        _ => return Ok(None),
    };

    let protocol = key_values
        .get("DefaultEndpointsProtocol")
        .map(String::as_str)
        .unwrap_or("https");
    if protocol != "http" && protocol != "https" {
        return Err(Error::config_invalid(format!(
            "invalid DefaultEndpointsProtocol: {protocol}"
        )));
    }

    Ok(Some(format!("{protocol}://{account_name}.{endpoint_suffix}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchsign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        let test_cases = vec![
            ("minimal fields",
                "BatchEndpoint=https://acct.westus.batch.azure.com",
                Some(ConnectionString {
                    endpoint: Some("https://acct.westus.batch.azure.com".to_string()),
                    ..Default::default()
                }),
            ),
            ("basic creds and endpoint",
                "AccountName=acct;AccountKey=c2VjcmV0;BatchEndpoint=https://acct.westus.batch.azure.com",
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    account_key: Some("c2VjcmV0".to_string()),
                    endpoint: Some("https://acct.westus.batch.azure.com".to_string()),
                    ..Default::default()
                }),
            ),
            ("SAS token",
                "SharedAccessSignature=sv=2024-01-01&sig=abc",
                Some(ConnectionString {
                    sas_token: Some("sv=2024-01-01&sig=abc".to_string()),
                    ..Default::default()
                }),
            ),
            ("endpoint from parts",
                "AccountName=acct;EndpointSuffix=westus.batch.azure.com;DefaultEndpointsProtocol=http",
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    endpoint: Some("http://acct.westus.batch.azure.com".to_string()),
                    ..Default::default()
                }),
            ),
            ("endpoint from parts and no protocol",
                "AccountName=acct;EndpointSuffix=westus.batch.azure.com",
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    endpoint: Some("https://acct.westus.batch.azure.com".to_string()),
                    ..Default::default()
                }),
            ),
            ("prefers sas over key",
                "AccountName=acct;AccountKey=c2VjcmV0;SharedAccessSignature=sig=abc",
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    sas_token: Some("sig=abc".to_string()),
                    ..Default::default()
                }),
            ),
            ("key without account name is ignored",
                "AccountKey=c2VjcmV0",
                Some(ConnectionString::default()),
            ),
            ("unknown key is ignored",
                "SomeUnknownKey=123;AccountName=acct",
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    ..Default::default()
                }),
            ),
            ("leading and trailing `;`",
                ";AccountName=acct;",
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    ..Default::default()
                }),
            ),
            ("line breaks",
                r#"
                    AccountName=acct;
                    AccountKey=c2VjcmV0;
                    EndpointSuffix=westus.batch.azure.com;
                    DefaultEndpointsProtocol=https"#,
                Some(ConnectionString {
                    account_name: Some("acct".to_string()),
                    account_key: Some("c2VjcmV0".to_string()),
                    endpoint: Some("https://acct.westus.batch.azure.com".to_string()),
                    ..Default::default()
                }),
            ),
            ("missing equals",
                "AccountNameacct;AccountKey=c2VjcmV0",
                None,
            ),
            ("with invalid protocol",
                "DefaultEndpointsProtocol=ftp;AccountName=acct;EndpointSuffix=westus.batch.azure.com",
                None,
            ),
        ];

        for (name, conn_str, expected) in test_cases {
            let actual = parse(conn_str);

            match expected {
                Some(expected) => {
                    assert!(actual.is_ok(), "Failed for case: {name}");
                    assert_eq!(actual.unwrap(), expected, "Failed for case: {name}");
                }
                None => {
                    let err = actual.expect_err(name);
                    assert_eq!(err.kind(), ErrorKind::ConfigInvalid, "Failed for case: {name}");
                }
            }
        }
    }

    #[test]
    fn test_from_str() {
        let cs: ConnectionString = "AccountName=acct;AccountKey=c2VjcmV0".parse().unwrap();
        assert_eq!(cs.account_name.as_deref(), Some("acct"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let cs = parse("AccountName=acct;AccountKey=c2VjcmV0c2VjcmV0c2VjcmV0").unwrap();
        let debug = format!("{cs:?}");

        assert!(debug.contains("c2V***mV0"));
        assert!(!debug.contains("c2VjcmV0c2VjcmV0c2VjcmV0"));
    }
}
