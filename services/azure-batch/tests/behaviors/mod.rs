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
use batchsign_azure_batch::{
    ClientRequestIdInterceptor, DetailLevel, DetailLevelInterceptor, ServerTimeoutInterceptor,
};
use batchsign_core::{
    Error, ErrorKind, InterceptorChain, InterceptorFn, OperationKind, RequestDescriptor,
};
use http::Method;
use pretty_assertions::assert_eq;

fn job_list() -> OperationKind {
    OperationKind::new("Job_List")
        .with_timeout()
        .with_odata_query()
        .with_client_request_id()
}

fn request() -> Result<RequestDescriptor> {
    let _ = env_logger::builder().is_test(true).try_init();

    Ok(RequestDescriptor::new(Method::GET, "https://acct.westus.batch.azure.com/jobs")?
        .with_operation(job_list()))
}

#[test]
fn test_last_setter_wins() -> Result<()> {
    let chain = InterceptorChain::new()
        .push(ServerTimeoutInterceptor::new(30))
        .push(ServerTimeoutInterceptor::new(60));

    let req = chain.apply(request()?)?;
    assert_eq!(req.query_string().as_deref(), Some("timeout=60"));
    Ok(())
}

#[test]
fn test_per_call_behaviors_win_over_client_behaviors() -> Result<()> {
    let client = InterceptorChain::new()
        .push(ServerTimeoutInterceptor::new(30))
        .push(DetailLevelInterceptor::new(DetailLevel::new().with_select("id")));
    let call = InterceptorChain::new()
        .push(DetailLevelInterceptor::new(DetailLevel::new().with_select("id,state")));

    let req = client.merge(&call).apply(request()?)?;
    assert_eq!(req.query_get("timeout"), Some("30"));
    assert_eq!(req.query_get("$select"), Some("id%2Cstate"));
    Ok(())
}

#[test]
fn test_behaviors_are_skipped_without_operation() -> Result<()> {
    let chain = InterceptorChain::new()
        .push(ServerTimeoutInterceptor::new(30))
        .push(DetailLevelInterceptor::new(DetailLevel::new().with_filter("x")))
        .push(ClientRequestIdInterceptor::new());

    let req = RequestDescriptor::new(Method::GET, "https://acct.westus.batch.azure.com/jobs")?;
    let req = chain.apply(req)?;

    assert_eq!(req.query_string(), None);
    assert!(req.headers.is_empty());
    Ok(())
}

#[test]
fn test_chain_stops_at_first_error() -> Result<()> {
    let chain = InterceptorChain::new()
        .push(InterceptorFn::new("reject", |_| {
            Err(Error::request_invalid("rejected"))
        }))
        .push(ClientRequestIdInterceptor::with_id("fixed"));

    let mut req = request()?;
    let err = chain.intercept(&mut req).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(!req.headers.contains("x-ms-client-request-id"));
    Ok(())
}

#[test]
fn test_behaviors_through_http_parts() -> Result<()> {
    let chain = InterceptorChain::new()
        .push(ClientRequestIdInterceptor::with_id("0d2f1c5e-7c8b-4c43-9b0f-2f6c1a9e6d11"))
        .push(ServerTimeoutInterceptor::new(30));

    let (mut parts, _) = http::Request::get("https://acct.westus.batch.azure.com/jobs")
        .body(())?
        .into_parts();

    // Parts carry no operation, so only a descriptor with one gets the behaviors.
    chain.apply_parts(&mut parts)?;
    assert_eq!(parts.uri, "https://acct.westus.batch.azure.com/jobs");
    assert!(parts.headers.is_empty());

    let mut req = RequestDescriptor::from_parts(&parts)?.with_operation(job_list());
    chain.intercept(&mut req)?;
    req.apply(&mut parts)?;

    assert_eq!(parts.uri, "https://acct.westus.batch.azure.com/jobs?timeout=30");
    assert_eq!(
        parts.headers.get("x-ms-client-request-id").unwrap(),
        "0d2f1c5e-7c8b-4c43-9b0f-2f6c1a9e6d11"
    );
    assert_eq!(parts.headers.get("return-client-request-id").unwrap(), "true");
    Ok(())
}
