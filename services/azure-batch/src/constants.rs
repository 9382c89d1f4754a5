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

/// Header carrying the request time, preferred over `Date`.
pub const OCP_DATE: &str = "ocp-date";
/// Lowercase prefix of headers included in the canonicalized headers.
pub const OCP_HEADER_PREFIX: &str = "ocp-";
/// `Content-MD5` is not part of `http::header`.
pub const CONTENT_MD5: &str = "content-md5";

/// Batch account name.
pub const AZURE_BATCH_ACCOUNT: &str = "AZURE_BATCH_ACCOUNT";
/// Base64 encoded Batch account key.
pub const AZURE_BATCH_ACCESS_KEY: &str = "AZURE_BATCH_ACCESS_KEY";
/// Batch account endpoint.
pub const AZURE_BATCH_ENDPOINT: &str = "AZURE_BATCH_ENDPOINT";
/// Shared access signature.
pub const AZURE_BATCH_SAS_TOKEN: &str = "AZURE_BATCH_SAS_TOKEN";
/// Batch connection string.
pub const AZURE_BATCH_CONNECTION_STRING: &str = "AZURE_BATCH_CONNECTION_STRING";
/// AAD tenant id.
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
/// AAD application id.
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
/// AAD client secret.
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
/// Path to the AAD client certificate.
pub const AZURE_CLIENT_CERTIFICATE_PATH: &str = "AZURE_CLIENT_CERTIFICATE_PATH";
