//! Secret reference resolution for secretsmanager
//!
//! This crate turns connection entries holding `provider:secret-id:secret-key`
//! references into concrete values when a session opens:
//! - **Providers**: AWS Secrets Manager and JSON held in environment variables
//! - **Caching**: one fetch per secret id per resolution pass
//! - **Security**: zeroized secret memory, redacted debug logging

pub mod cache;
pub mod config;
pub mod hooks;
pub mod resolver;
pub mod security;
pub mod sources;
pub mod types;

pub use cache::ResolutionCache;
pub use config::{AwsConfig, ProviderConfig};
pub use hooks::{SecretsManagerHooks, SessionHooks};
pub use resolver::SecretResolver;
pub use security::{redact, SecureString};
pub use sources::{AwsSecretsManagerProvider, EnvJsonProvider, SecretProvider};
pub use types::SecretBundle;

pub use secretsmanager_core::{Error, Result};
