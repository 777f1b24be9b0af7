//! Secret resolution orchestration
//!
//! One call to [`SecretResolver::resolve`] is one pass over a session's
//! connection entries:
//! - base64-decode each entry
//! - parse it as a `provider:secret-id:secret-key` reference
//! - fetch through a per-pass cache, falling back to the provider
//! - log a redacted fingerprint and base64-encode the result
//!
//! Entries that are not references, or that resolve to an empty value, are
//! left out of the result. Any other failure aborts the whole pass.

use crate::cache::ResolutionCache;
use crate::config::ProviderConfig;
use crate::security::{log_resolved, SecureString};
use crate::sources::{AwsSecretsManagerProvider, EnvJsonProvider, SecretProvider};
use secretsmanager_core::encoding::{decode_value, encode_value};
use secretsmanager_core::{Error, ProviderKind, Result, SecretReference};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Secret resolver that dispatches references to their providers
pub struct SecretResolver {
    providers: Vec<Box<dyn SecretProvider>>,
}

impl SecretResolver {
    /// Build every known provider from configuration
    pub async fn from_config(config: ProviderConfig) -> Result<Self> {
        let aws = AwsSecretsManagerProvider::from_config(&config.aws).await?;

        Ok(Self::with_providers(vec![
            Box::new(aws),
            Box::new(EnvJsonProvider::new()),
        ]))
    }

    /// Create with custom providers (for testing)
    pub fn with_providers(providers: Vec<Box<dyn SecretProvider>>) -> Self {
        Self { providers }
    }

    /// Resolve every secret reference among `entries`
    ///
    /// Keys and values of the result are the entry keys and base64-encoded
    /// resolved values. A fresh cache is used for each call.
    pub async fn resolve(
        &self,
        entries: &HashMap<String, String>,
    ) -> Result<HashMap<String, String>> {
        debug!(length = entries.len(), "connection env vars");

        let mut cache = ResolutionCache::new();
        let mut resolved = HashMap::new();

        for (entry_key, encoded) in entries {
            let decoded = SecureString::new(decode_value(entry_key, encoded)?);

            let reference = match SecretReference::parse(decoded.as_str()) {
                Ok(reference) => reference,
                Err(Error::MalformedReference { .. }) => {
                    debug!(key = %entry_key, "bypassing, not a secret reference");
                    continue;
                }
                Err(e) => {
                    warn!(key = %entry_key, "unsupported secret reference");
                    return Err(Error::invalid_entry(entry_key, e));
                }
            };

            let value = self
                .resolve_reference(&mut cache, &reference)
                .await
                .map_err(|e| {
                    Error::resolution(entry_key, &reference.secret_id, &reference.secret_key, e)
                })?;

            if value.is_empty() {
                debug!(key = %entry_key, "bypassing, resolved to empty value");
                continue;
            }

            log_resolved(entry_key, value.as_str());
            resolved.insert(entry_key.clone(), encode_value(value.as_str()));
        }

        Ok(resolved)
    }

    /// Look up one reference through the cache
    async fn resolve_reference(
        &self,
        cache: &mut ResolutionCache,
        reference: &SecretReference,
    ) -> Result<SecureString> {
        let provider = self.provider_for(reference.provider)?;
        let bundle = cache.get_or_fetch(provider, &reference.secret_id).await?;

        bundle
            .get(&reference.secret_key)
            .cloned()
            .ok_or_else(|| Error::key_not_found(&reference.secret_id, &reference.secret_key))
    }

    /// Get the provider for a given kind
    fn provider_for(&self, kind: ProviderKind) -> Result<&dyn SecretProvider> {
        self.providers
            .iter()
            .find(|p| p.kind() == kind)
            .map(|p| p.as_ref())
            .ok_or(Error::ProviderNotConfigured { provider: kind })
    }
}
