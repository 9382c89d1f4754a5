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

//! Azure Batch request signer
//!
//! This crate authorizes and decorates Azure Batch requests:
//!
//! - Shared Key authentication
//! - SAS (Shared Access Signature) token authentication
//! - Bearer token authentication (OAuth)
//! - Behaviors for server timeouts, OData detail levels and client request ids
//!
//! # Example
//!
//! ```rust
//! use batchsign_azure_batch::{
//!     ClientRequestIdInterceptor, Credential, ServerTimeoutInterceptor, SharedKeyInterceptor,
//! };
//! use batchsign_core::{InterceptorChain, OperationKind, RequestDescriptor, Result};
//! use http::Method;
//!
//! fn main() -> Result<()> {
//!     let credential = Credential::new("account", "c2VjcmV0")?;
//!
//!     // Behaviors first, the credential interceptor signs the final request.
//!     let chain = InterceptorChain::new()
//!         .push(ServerTimeoutInterceptor::new(30))
//!         .push(ClientRequestIdInterceptor::new())
//!         .push(SharedKeyInterceptor::new(credential));
//!
//!     let op = OperationKind::new("Job_List")
//!         .with_timeout()
//!         .with_client_request_id();
//!     let req =
//!         RequestDescriptor::new(Method::GET, "https://account.westus.batch.azure.com/jobs")?
//!             .with_operation(op);
//!
//!     let req = chain.apply(req)?;
//!     assert_eq!(req.query_get("timeout"), Some("30"));
//!     assert!(req.headers.get("authorization").unwrap().starts_with("SharedKey account:"));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod constants;
pub use constants::*;

mod credential;
pub use credential::Credential;

pub mod canonical;
pub use canonical::string_to_sign;

mod signer;
pub use signer::sign;

mod sign_request;
pub use sign_request::SharedKeyInterceptor;

mod sas_token;
pub use sas_token::SasTokenInterceptor;

mod token;
pub use token::{BearerTokenInterceptor, ProvideToken, StaticTokenProvider, Token};

mod behavior;
pub use behavior::*;

mod config;
pub use config::Config;

mod connection_string;
pub use connection_string::ConnectionString;

mod resolve;
pub use resolve::{resolve, CredentialProvider};
