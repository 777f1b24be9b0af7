//! Secret reference grammar: `<provider>:<secret-id>:<secret-key>`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Separator between reference segments
pub const REFERENCE_SEPARATOR: char = ':';

/// Known secret providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// AWS Secrets Manager
    Aws,
    /// JSON object held in a process environment variable
    EnvJson,
}

impl ProviderKind {
    /// All known providers
    pub const ALL: [ProviderKind; 2] = [ProviderKind::Aws, ProviderKind::EnvJson];

    /// Token used for this provider in a reference
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Aws => "aws",
            ProviderKind::EnvJson => "envjson",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aws" => Ok(ProviderKind::Aws),
            "envjson" => Ok(ProviderKind::EnvJson),
            other => Err(Error::unknown_provider(other)),
        }
    }
}

/// Parsed secret reference
///
/// Only the shape is validated here. Whether `secret_id` exists, or holds
/// `secret_key`, is the provider's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretReference {
    pub provider: ProviderKind,
    pub secret_id: String,
    pub secret_key: String,
}

impl SecretReference {
    pub fn new(
        provider: ProviderKind,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Parse a reference string
    ///
    /// Returns `MalformedReference` unless there are exactly three segments,
    /// and `UnknownProvider` when the first segment is not a known provider.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split(REFERENCE_SEPARATOR).collect();
        let [provider, secret_id, secret_key] = parts.as_slice() else {
            return Err(Error::malformed_reference(parts.len()));
        };

        Ok(Self {
            provider: provider.parse()?,
            secret_id: (*secret_id).to_string(),
            secret_key: (*secret_key).to_string(),
        })
    }
}

impl FromStr for SecretReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SecretReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.provider,
            self.secret_id,
            self.secret_key,
            sep = REFERENCE_SEPARATOR
        )
    }
}
