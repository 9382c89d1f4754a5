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

//! Behaviors are interceptors that apply optional per-request settings.
//!
//! Every behavior consults the request's [`batchsign_core::Operation`] and
//! only touches the request when the operation declares the matching
//! capability. Requests without an operation are left untouched.

mod client_request_id;
pub use client_request_id::ClientRequestIdInterceptor;

mod detail_level;
pub use detail_level::DetailLevel;
pub use detail_level::DetailLevelInterceptor;

mod server_timeout;
pub use server_timeout::ServerTimeoutInterceptor;
