//! Per-pass bundle cache
//!
//! Several references commonly target the same secret id with different
//! keys (`aws:prod/db:username`, `aws:prod/db:password`). The cache keeps the
//! first successful bundle for each secret id so the provider is asked only
//! once. It is owned by a single pass and dropped with it.

use crate::sources::SecretProvider;
use crate::types::SecretBundle;
use secretsmanager_core::{ProviderKind, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ResolutionCache {
    bundles: HashMap<(ProviderKind, String), SecretBundle>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached bundle, fetching it from `provider` on first use
    ///
    /// Failed fetches are not stored, so a later reference to the same
    /// secret id tries again.
    pub async fn get_or_fetch(
        &mut self,
        provider: &dyn SecretProvider,
        secret_id: &str,
    ) -> Result<&SecretBundle> {
        match self.bundles.entry((provider.kind(), secret_id.to_string())) {
            Entry::Occupied(entry) => {
                debug!(provider = %provider.kind(), secret_id = %secret_id, "using cached bundle");
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                let bundle = provider.fetch_bundle(secret_id).await?;
                debug!(provider = %provider.kind(), secret_id = %secret_id, "cached bundle");
                Ok(entry.insert(bundle))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}
