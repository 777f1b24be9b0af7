//! Core types for secret resolution

use secretsmanager_core::{Error, Result};
use std::collections::HashMap;
use std::fmt;

use crate::security::SecureString;

/// Key/value set returned by one provider fetch for one secret id
#[derive(Clone, Default)]
pub struct SecretBundle {
    entries: HashMap<String, SecureString>,
}

impl SecretBundle {
    /// Decode a flat JSON object of string values
    ///
    /// Parse failures report only the error category and position, never
    /// the offending content.
    pub fn from_json(secret_id: &str, payload: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(payload).map_err(|e| {
            Error::invalid_bundle(
                secret_id,
                format!(
                    "expected a JSON object of string values ({:?} error at line {} column {})",
                    e.classify(),
                    e.line(),
                    e.column()
                ),
            )
        })?;

        Ok(Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key, SecureString::new(value)))
                .collect(),
        })
    }

    /// Look up a secret key
    pub fn get(&self, secret_key: &str) -> Option<&SecureString> {
        self.entries.get(secret_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SecretBundle
where
    K: Into<String>,
    V: Into<SecureString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for SecretBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("SecretBundle").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let bundle =
            SecretBundle::from_json("prod/db", r#"{"username":"admin","password":"s3cr3t"}"#)
                .unwrap();

        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("username").map(|v| v.as_str()), Some("admin"));
        assert_eq!(bundle.get("password").map(|v| v.as_str()), Some("s3cr3t"));
        assert!(bundle.get("host").is_none());
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        for payload in ["not json", "[\"a\"]", "\"plain\"", ""] {
            let err = SecretBundle::from_json("prod/db", payload).unwrap_err();
            assert!(matches!(err, Error::InvalidBundleFormat { .. }), "{payload:?}");
        }
    }

    #[test]
    fn test_from_json_rejects_non_string_values_without_echoing_them() {
        let err = SecretBundle::from_json("prod/db", r#"{"pin": 987654321}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidBundleFormat { .. }));
        assert!(!err.to_string().contains("987654321"));
    }

    #[test]
    fn test_debug_shows_keys_only() {
        let bundle: SecretBundle = [("password", "hunter2-hunter2")].into_iter().collect();
        let debug_str = format!("{:?}", bundle);
        assert!(debug_str.contains("password"));
        assert!(!debug_str.contains("hunter2"));
    }
}
