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

//! Core components for intercepting and signing API requests.
//!
//! This crate provides the foundational types and traits for the batchsign ecosystem.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **RequestDescriptor**: the view of an outgoing request that interceptors mutate
//! - **Interceptor**: a synchronous, side-effect free request transform
//! - **Operation**: the declared operation of a request and the optional
//!   parameters it accepts, reached through capability casts
//! - **InterceptorChain**: an ordered list of interceptors run before the request hits the wire
//!
//! ## Example
//!
//! ```
//! use batchsign_core::{Interceptor, InterceptorChain, OperationKind, RequestDescriptor, Result};
//! use http::Method;
//!
//! #[derive(Debug)]
//! struct ApiVersion(&'static str);
//!
//! impl Interceptor for ApiVersion {
//!     fn intercept(&self, req: &mut RequestDescriptor) -> Result<()> {
//!         req.query_set("api-version", self.0);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let chain = InterceptorChain::new().push(ApiVersion("2024-07-01.20.0"));
//!
//! let req = RequestDescriptor::new(Method::GET, "https://acct.example.com/jobs")?
//!     .with_operation(OperationKind::new("Job_List").with_timeout());
//! let req = chain.apply(req)?;
//!
//! assert_eq!(req.query_get("api-version"), Some("2024-07-01.20.0"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod api;
pub use api::{Interceptor, Operation, SupportsClientRequestId, SupportsODataQuery, SupportsTimeout};
mod operation;
pub use operation::{OperationKind, ODATA_PARAMS};
mod request;
pub use request::{Headers, RequestDescriptor, QUERY_VALUE_ENCODE_SET};
mod chain;
pub use chain::{InterceptorChain, InterceptorFn};
