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
use batchsign_core::{Error, Result};

/// Credential for Shared Key authorization.
///
/// Both fields are validated at construction and never change afterwards, so
/// a credential can be shared by all requests of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    account_name: String,
    account_key: String,
}

impl Credential {
    /// Create a new shared key credential.
    ///
    /// `account_key` is the base64 encoded key as shown by the portal. It is
    /// only decoded while signing, so a malformed key is reported by the
    /// signer as an invalid credential.
    pub fn new(account_name: impl Into<String>, account_key: impl Into<String>) -> Result<Self> {
        let account_name = account_name.into();
        let account_key = account_key.into();

        if account_name.trim().is_empty() {
            return Err(Error::config_invalid("account name is required"));
        }
        if account_key.trim().is_empty() {
            return Err(Error::config_invalid("account key is required"));
        }

        Ok(Self {
            account_name,
            account_key,
        })
    }

    /// Name of the account.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Base64 encoded key of the account.
    pub fn account_key(&self) -> &str {
        &self.account_key
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchsign_core::ErrorKind;
    use test_case::test_case;

    #[test]
    fn test_credential_new() {
        let cred = Credential::new("acct", "c2VjcmV0").unwrap();
        assert_eq!(cred.account_name(), "acct");
        assert_eq!(cred.account_key(), "c2VjcmV0");
    }

    #[test_case("", "c2VjcmV0"; "empty account name")]
    #[test_case("  ", "c2VjcmV0"; "blank account name")]
    #[test_case("acct", ""; "empty account key")]
    fn test_credential_rejects_missing_fields(name: &str, key: &str) {
        let err = Credential::new(name, key).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("acct", "c2VjcmV0c2VjcmV0c2VjcmV0").unwrap();
        assert_eq!(
            format!("{cred:?}"),
            r#"Credential { account_name: "acct", account_key: c2V***mV0 }"#
        );
    }
}
