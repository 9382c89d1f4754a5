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

use std::sync::Arc;

use anyhow::Result;
use batchsign_azure_batch::{
    resolve, Config, CredentialProvider, ProvideToken, StaticTokenProvider, Token,
    AZURE_BATCH_ACCESS_KEY, AZURE_BATCH_ACCOUNT, AZURE_BATCH_CONNECTION_STRING,
};
use batchsign_core::{ErrorKind, Interceptor, RequestDescriptor, StaticEnv};
use http::Method;
use pretty_assertions::assert_eq;

fn request() -> Result<RequestDescriptor> {
    let _ = env_logger::builder().is_test(true).try_init();

    Ok(
        RequestDescriptor::new(Method::GET, "https://acct.westus.batch.azure.com/jobs")?
            .with_header("ocp-date", "Mon, 01 Jan 2024 00:00:00 GMT"),
    )
}

#[test]
fn test_config_from_json() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{
            "account_name": "acct",
            "account_key": "c2VjcmV0",
            "endpoint": "https://acct.westus.batch.azure.com"
        }"#,
    )?;

    assert_eq!(
        resolve(&config),
        Some(CredentialProvider::SharedKey {
            account_name: "acct".to_string(),
            account_key: "c2VjcmV0".to_string(),
        })
    );
    Ok(())
}

#[test]
fn test_config_from_toml() -> Result<()> {
    let config: Config = toml::from_str(
        r#"
            tenant_id = "tenant"
            client_id = "client"
            client_certificate_path = "/etc/batch/cert.pem"
        "#,
    )?;

    let provider = resolve(&config).expect("certificate strategy must be resolved");
    assert_eq!(provider.name(), "client_certificate");
    Ok(())
}

#[test]
fn test_shared_key_from_env() -> Result<()> {
    let env = StaticEnv::from_pairs([
        (AZURE_BATCH_ACCOUNT, "acct"),
        (AZURE_BATCH_ACCESS_KEY, "c2VjcmV0"),
    ]);
    let config = Config::default().from_env(&env);

    let interceptor = resolve(&config)
        .expect("shared key must be resolved")
        .into_interceptor(None)?;

    let mut req = request()?;
    interceptor.intercept(&mut req)?;
    assert!(req
        .headers
        .get("authorization")
        .unwrap()
        .starts_with("SharedKey acct:"));
    Ok(())
}

#[test]
fn test_connection_string_wins() -> Result<()> {
    let env = StaticEnv::from_pairs([
        (
            AZURE_BATCH_CONNECTION_STRING,
            "AccountName=acct;SharedAccessSignature=sv=2024-01-01&sig=abc",
        ),
        (AZURE_BATCH_ACCOUNT, "other"),
        (AZURE_BATCH_ACCESS_KEY, "c2VjcmV0"),
    ]);
    let config = Config::default().from_env(&env);

    let interceptor = resolve(&config)
        .expect("connection string must be resolved")
        .into_interceptor(None)?;

    let mut req = request()?;
    interceptor.intercept(&mut req)?;
    assert_eq!(req.query_string().as_deref(), Some("sv=2024-01-01&sig=abc"));
    assert!(!req.headers.contains("authorization"));
    Ok(())
}

#[test]
fn test_client_secret_uses_token_source() -> Result<()> {
    let config = Config {
        tenant_id: Some("tenant".to_string()),
        client_id: Some("client".to_string()),
        client_secret: Some("secret".to_string()),
        ..Default::default()
    };
    let provider = resolve(&config).expect("client secret must be resolved");

    let tokens: Arc<dyn ProvideToken> =
        Arc::new(StaticTokenProvider::new(Token::new("aad-token", None)));
    let interceptor = provider.clone().into_interceptor(Some(tokens))?;

    let mut req = request()?;
    interceptor.intercept(&mut req)?;
    assert_eq!(req.headers.get("authorization"), Some("Bearer aad-token"));

    let err = provider.into_interceptor(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    Ok(())
}

#[test]
fn test_nothing_resolved() {
    let config = Config::default().from_env(&StaticEnv::default());
    assert_eq!(resolve(&config), None);
}
