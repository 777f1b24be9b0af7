//! Error types for secretsmanager-core
//!
//! Messages never carry secret values or raw connection values: a value
//! that fails to parse as a reference may itself be a plaintext credential.

use crate::types::ProviderKind;
use thiserror::Error;

/// Result type alias using secretsmanager-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving secret references
#[derive(Error, Debug)]
pub enum Error {
    /// Value does not have the `provider:secret-id:secret-key` shape
    #[error("Malformed secret reference: expected 3 ':'-separated segments, got {segments}")]
    MalformedReference { segments: usize },

    /// Provider token is not one of the known providers
    #[error("Secret provider {provider:?} not implemented. Valid providers: aws, envjson")]
    UnknownProvider { provider: String },

    /// Provider was built without the credentials it needs
    #[error("Secret provider '{provider}' is missing required credentials")]
    ProviderNotConfigured { provider: ProviderKind },

    /// Provider could not be built from the supplied configuration
    #[error("Failed to construct secret provider: {message}")]
    ProviderConstruction { message: String },

    /// Backing source for a secret id does not exist
    #[error("Secret source not found for secret id {secret_id:?}")]
    SourceNotFound { secret_id: String },

    /// Bundle payload is not a flat JSON object of strings
    #[error("Invalid bundle format for secret id {secret_id:?}: {reason}")]
    InvalidBundleFormat { secret_id: String, reason: String },

    /// Bundle was fetched but lacks the requested key
    #[error("Secret key {secret_key:?} not found in secret id {secret_id:?}")]
    KeyNotFound {
        secret_id: String,
        secret_key: String,
    },

    /// Transport encoding of an entry is malformed
    #[error("Failed decoding value, envkey={entry_key}: {reason}")]
    Decode { entry_key: String, reason: String },

    /// Remote secret store rejected the request
    #[error("Remote secret store error for secret id {secret_id:?} (code={}): {message}", .code.as_deref().unwrap_or("unknown"))]
    Remote {
        secret_id: String,
        code: Option<String>,
        message: String,
    },

    /// Failure resolving one entry, with the entry's context attached
    #[error("Failed to resolve {entry_key} from {secret_id}/{secret_key}: {source}")]
    Resolution {
        entry_key: String,
        secret_id: String,
        secret_key: String,
        #[source]
        source: Box<Error>,
    },

    /// Entry's reference was rejected before any provider was consulted
    #[error("Invalid secret reference in {entry_key}: {source}")]
    InvalidEntry {
        entry_key: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a malformed reference error
    pub fn malformed_reference(segments: usize) -> Self {
        Self::MalformedReference { segments }
    }

    /// Create an unknown provider error
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        Self::UnknownProvider {
            provider: provider.into(),
        }
    }

    /// Create a provider construction error
    pub fn provider_construction(message: impl Into<String>) -> Self {
        Self::ProviderConstruction {
            message: message.into(),
        }
    }

    /// Create a source not found error
    pub fn source_not_found(secret_id: impl Into<String>) -> Self {
        Self::SourceNotFound {
            secret_id: secret_id.into(),
        }
    }

    /// Create an invalid bundle format error
    pub fn invalid_bundle(secret_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBundleFormat {
            secret_id: secret_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a key not found error
    pub fn key_not_found(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Create a decode error for the given entry
    pub fn decode(entry_key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            entry_key: entry_key.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a remote store error
    pub fn remote(
        secret_id: impl Into<String>,
        code: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            secret_id: secret_id.into(),
            code,
            message: message.into(),
        }
    }

    /// Attach entry context to a resolution failure
    pub fn resolution(
        entry_key: impl Into<String>,
        secret_id: impl Into<String>,
        secret_key: impl Into<String>,
        source: Error,
    ) -> Self {
        Self::Resolution {
            entry_key: entry_key.into(),
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            source: Box::new(source),
        }
    }

    /// Attach the entry key to a rejected reference
    pub fn invalid_entry(entry_key: impl Into<String>, source: Error) -> Self {
        Self::InvalidEntry {
            entry_key: entry_key.into(),
            source: Box::new(source),
        }
    }

    /// Innermost error, skipping entry context wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::Resolution { source, .. } | Self::InvalidEntry { source, .. } => source.root(),
            other => other,
        }
    }
}
