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

use anyhow::Result;
use batchsign_azure_batch::canonical::canonicalize_headers;
use batchsign_azure_batch::{string_to_sign, Credential, SharedKeyInterceptor};
use batchsign_core::{ErrorKind, Interceptor, InterceptorChain, RequestDescriptor};
use http::{Method, Request};
use pretty_assertions::assert_eq;

use super::{expected_authorization, ACCOUNT_KEY, ACCOUNT_NAME, OCP_DATE};

fn init() -> SharedKeyInterceptor {
    let _ = env_logger::builder().is_test(true).try_init();

    SharedKeyInterceptor::new(
        Credential::new(ACCOUNT_NAME, ACCOUNT_KEY).expect("credential must be valid"),
    )
}

#[test]
fn test_golden_signature() -> Result<()> {
    let chain = InterceptorChain::new().push(init());

    let req = Request::builder()
        .method(Method::GET)
        .uri("https://acct.example.com/foo?b=2&a=1")
        .header("ocp-date", OCP_DATE)
        .body(())?;
    let (mut parts, _) = req.into_parts();
    chain.apply_parts(&mut parts)?;

    let expected = expected_authorization(
        "GET\n\n\n\n\n\n\n\n\n\n\n\nocp-date:Mon, 01 Jan 2024 00:00:00 GMT\n/acct/foo\na:a:1\nb:b:2",
    );
    let authorization = parts.headers.get("authorization").unwrap();
    assert_eq!(authorization.to_str()?, expected);
    assert!(authorization.is_sensitive());
    assert_eq!(parts.headers.get("ocp-date").unwrap(), OCP_DATE);
    assert_eq!(parts.uri, "https://acct.example.com/foo?b=2&a=1");
    Ok(())
}

#[test]
fn test_signature_is_deterministic() -> Result<()> {
    let signer = init();

    let build = || {
        RequestDescriptor::new(
            Method::GET,
            "https://acct.example.com/jobs?$filter=state%20eq%20%27active%27",
        )
        .map(|req| req.with_header("ocp-date", OCP_DATE))
    };

    let mut a = build()?;
    let mut b = build()?;
    signer.intercept(&mut a)?;
    signer.intercept(&mut b)?;

    assert_eq!(a.headers.get("authorization"), b.headers.get("authorization"));
    Ok(())
}

#[test]
fn test_query_order_does_not_matter() -> Result<()> {
    let a = RequestDescriptor::new(Method::GET, "https://acct.example.com/jobs?b=2&a=1")?
        .with_header("ocp-date", OCP_DATE);
    let b = RequestDescriptor::new(Method::GET, "https://acct.example.com/jobs?a=1&b=2")?
        .with_header("ocp-date", OCP_DATE);

    assert_eq!(
        string_to_sign(&a, ACCOUNT_NAME)?,
        string_to_sign(&b, ACCOUNT_NAME)?
    );
    Ok(())
}

#[test]
fn test_header_names_are_case_insensitive() -> Result<()> {
    let signer = init();

    let mut lower = RequestDescriptor::new(Method::PUT, "https://acct.example.com/jobs/job-1")?
        .with_header("ocp-date", OCP_DATE)
        .with_header("content-type", "application/json")
        .with_body_length(2);
    let mut mixed = RequestDescriptor::new(Method::PUT, "https://acct.example.com/jobs/job-1")?
        .with_header("OCP-Date", OCP_DATE)
        .with_header("Content-Type", "application/json")
        .with_body_length(2);

    assert_eq!(mixed.headers.get("content-TYPE"), Some("application/json"));

    signer.intercept(&mut lower)?;
    signer.intercept(&mut mixed)?;
    assert_eq!(
        lower.headers.get("authorization"),
        mixed.headers.get("Authorization")
    );
    assert_eq!(
        mixed.headers.get("authorization").unwrap(),
        expected_authorization(
            "PUT\n\n\n2\n\napplication/json\n\n\n\n\n\n\nocp-date:Mon, 01 Jan 2024 00:00:00 GMT\n/acct/jobs/job-1"
        )
    );
    Ok(())
}

#[test]
fn test_custom_header_order() -> Result<()> {
    let req = RequestDescriptor::new(Method::GET, "https://acct.example.com/jobs")?
        .with_header("ocp-zzz", "z")
        .with_header("Ocp-Date", OCP_DATE)
        .with_header("ocp-aaa", "a");

    assert_eq!(
        canonicalize_headers(&req),
        "ocp-aaa:a\nocp-date:Mon, 01 Jan 2024 00:00:00 GMT\nocp-zzz:z\n"
    );
    Ok(())
}

#[test]
fn test_undecodable_key_fails_before_transport() -> Result<()> {
    let chain = InterceptorChain::new().push(SharedKeyInterceptor::new(Credential::new(
        ACCOUNT_NAME,
        "not base64!",
    )?));

    let req = Request::get("https://acct.example.com/jobs").body(())?;
    let (mut parts, _) = req.into_parts();

    let err = chain.apply_parts(&mut parts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    assert!(parts.headers.get("authorization").is_none());
    Ok(())
}

#[test]
fn test_empty_credential_is_rejected() {
    assert_eq!(
        Credential::new("", ACCOUNT_KEY).unwrap_err().kind(),
        ErrorKind::ConfigInvalid
    );
    assert_eq!(
        Credential::new(ACCOUNT_NAME, "").unwrap_err().kind(),
        ErrorKind::ConfigInvalid
    );
}
