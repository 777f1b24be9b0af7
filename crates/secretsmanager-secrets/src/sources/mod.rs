//! Secret provider trait and implementations

pub mod aws;
pub mod envjson;

use crate::types::SecretBundle;
use async_trait::async_trait;
use secretsmanager_core::{ProviderKind, Result};

/// Trait for secret providers
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Fetch every key/value pair stored under `secret_id`
    ///
    /// Called at most once per secret id per resolution pass; failures
    /// propagate without retry.
    async fn fetch_bundle(&self, secret_id: &str) -> Result<SecretBundle>;

    /// Provider token this implementation serves
    fn kind(&self) -> ProviderKind;
}

pub use aws::{AwsSecretsManagerProvider, SdkSecretValueClient, SecretValueClient};
pub use envjson::EnvJsonProvider;
