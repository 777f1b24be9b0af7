//! Provider configuration decoded from the host's plugin settings
//!
//! Settings arrive base64-encoded and are decoded into explicit values that
//! are handed to provider constructors. The process environment is never
//! written to.

use secretsmanager_core::encoding::decode_value;
use secretsmanager_core::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

use crate::security::SecureString;

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

/// Configuration for every provider, held for one resolution pass
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub aws: AwsConfig,
}

/// AWS Secrets Manager settings
#[derive(Clone, Default)]
pub struct AwsConfig {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecureString>,
    pub session_token: Option<SecureString>,
    pub region: Option<String>,
    /// Override for Secrets Manager compatible endpoints
    pub endpoint_url: Option<String>,
}

/// Complete static credential set for the AWS client
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecureString,
    pub session_token: Option<SecureString>,
    pub region: String,
}

impl std::fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfig")
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "[REDACTED]"))
            .field("secret_access_key", &self.secret_access_key)
            .field("session_token", &self.session_token)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &self.secret_access_key)
            .field("has_session_token", &self.session_token.is_some())
            .field("region", &self.region)
            .finish()
    }
}

impl ProviderConfig {
    /// Decode the host's plugin settings
    ///
    /// Empty values count as absent. Unrecognized keys are ignored.
    pub fn from_plugin_vars(vars: &HashMap<String, String>) -> Result<Self> {
        debug!(length = vars.len(), "plugin env vars");

        let mut aws = AwsConfig::default();
        let mut default_region = None;

        for (key, encoded) in vars {
            let value = SecureString::new(decode_value(key, encoded)?);
            debug!(key = %key, val_length = value.len(), "plugin config");
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                AWS_ACCESS_KEY_ID => aws.access_key_id = Some(value.as_str().to_string()),
                AWS_SECRET_ACCESS_KEY => aws.secret_access_key = Some(value),
                AWS_SESSION_TOKEN => aws.session_token = Some(value),
                AWS_REGION => aws.region = Some(value.as_str().to_string()),
                AWS_DEFAULT_REGION => default_region = Some(value.as_str().to_string()),
                AWS_ENDPOINT_URL => aws.endpoint_url = Some(value.as_str().to_string()),
                _ => debug!(key = %key, "ignoring unknown plugin config"),
            }
        }

        if aws.region.is_none() {
            aws.region = default_region;
        }

        Ok(Self { aws })
    }
}

impl AwsConfig {
    /// Static credentials, if any were supplied
    ///
    /// Returns `Ok(None)` when no credential is present at all, which leaves
    /// the AWS provider unconfigured. A partial set, or a malformed endpoint,
    /// is a construction error.
    pub fn credentials(&self) -> Result<Option<AwsCredentials>> {
        if let Some(endpoint) = &self.endpoint_url {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(Error::provider_construction(format!(
                    "{} must be an http(s) URL",
                    AWS_ENDPOINT_URL
                )));
            }
        }

        match (&self.access_key_id, &self.secret_access_key, &self.region) {
            (None, None, None) => Ok(None),
            (Some(access_key_id), Some(secret_access_key), Some(region)) => {
                Ok(Some(AwsCredentials {
                    access_key_id: access_key_id.clone(),
                    secret_access_key: secret_access_key.clone(),
                    session_token: self.session_token.clone(),
                    region: region.clone(),
                }))
            }
            (access_key_id, secret_access_key, region) => {
                let missing: Vec<&str> = [
                    (access_key_id.is_none(), AWS_ACCESS_KEY_ID),
                    (secret_access_key.is_none(), AWS_SECRET_ACCESS_KEY),
                    (region.is_none(), AWS_REGION),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();

                Err(Error::provider_construction(format!(
                    "incomplete AWS credentials, missing {}",
                    missing.join(", ")
                )))
            }
        }
    }
}
