//! Environment-JSON secret provider
//!
//! The secret id names a process environment variable holding a flat JSON
//! object, e.g. `SECRETS='{"HOST":"db.internal"}'`.

use crate::security::SecureString;
use crate::sources::SecretProvider;
use crate::types::SecretBundle;
use async_trait::async_trait;
use secretsmanager_core::{Error, ProviderKind, Result};
use std::env::{self, VarError};
use tracing::debug;

#[derive(Debug, Default)]
pub struct EnvJsonProvider;

impl EnvJsonProvider {
    pub fn new() -> Self {
        Self
    }

    /// Read the variable, treating unset and empty alike
    fn read_var(secret_id: &str) -> Result<SecureString> {
        // Names the platform cannot hold are never set
        if secret_id.is_empty() || secret_id.contains(['=', '\0']) {
            return Err(Error::source_not_found(secret_id));
        }

        match env::var(secret_id) {
            Ok(value) if !value.is_empty() => Ok(SecureString::new(value)),
            Ok(_) | Err(VarError::NotPresent) => Err(Error::source_not_found(secret_id)),
            Err(VarError::NotUnicode(_)) => Err(Error::invalid_bundle(
                secret_id,
                "environment variable is not valid unicode",
            )),
        }
    }
}

#[async_trait]
impl SecretProvider for EnvJsonProvider {
    async fn fetch_bundle(&self, secret_id: &str) -> Result<SecretBundle> {
        let payload = Self::read_var(secret_id)?;
        let bundle = SecretBundle::from_json(secret_id, payload.as_str())?;
        debug!(secret_id = %secret_id, keys = bundle.len(), "loaded env json bundle");
        Ok(bundle)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::EnvJson
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_fetch_bundle() {
        env::set_var("SM_TEST_ENVJSON_OK", r#"{"HOST":"db.internal","PORT":"5432"}"#);

        let bundle = EnvJsonProvider::new()
            .fetch_bundle("SM_TEST_ENVJSON_OK")
            .await
            .unwrap();

        assert_eq!(bundle.get("HOST").map(|v| v.as_str()), Some("db.internal"));
        assert_eq!(bundle.get("PORT").map(|v| v.as_str()), Some("5432"));

        env::remove_var("SM_TEST_ENVJSON_OK");
    }

    #[tokio::test]
    #[serial]
    async fn test_unset_and_empty_are_not_found() {
        env::remove_var("SM_TEST_ENVJSON_UNSET");
        env::set_var("SM_TEST_ENVJSON_EMPTY", "");

        let provider = EnvJsonProvider::new();
        for secret_id in ["SM_TEST_ENVJSON_UNSET", "SM_TEST_ENVJSON_EMPTY", "", "A=B"] {
            match provider.fetch_bundle(secret_id).await {
                Err(Error::SourceNotFound { secret_id: got }) => assert_eq!(got, secret_id),
                other => panic!("Expected source not found for {secret_id:?}, got {other:?}"),
            }
        }

        env::remove_var("SM_TEST_ENVJSON_EMPTY");
    }

    #[tokio::test]
    #[serial]
    async fn test_invalid_json() {
        env::set_var("SM_TEST_ENVJSON_BAD", "HOST=db.internal");

        let result = EnvJsonProvider::new()
            .fetch_bundle("SM_TEST_ENVJSON_BAD")
            .await;
        assert!(matches!(result, Err(Error::InvalidBundleFormat { .. })));

        env::remove_var("SM_TEST_ENVJSON_BAD");
    }

    #[test]
    fn test_kind() {
        assert_eq!(EnvJsonProvider::new().kind(), ProviderKind::EnvJson);
    }
}
