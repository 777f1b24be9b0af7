//! Session wire types exchanged with the host on lifecycle events

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters supplied by the host when a session opens
///
/// Both maps carry base64-encoded string values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionParams {
    pub session_id: String,

    /// Client command that opened the session (e.g. `connect`, `exec`)
    #[serde(default)]
    pub client_verb: String,

    /// Plugin configuration: provider credentials and settings
    #[serde(default)]
    pub plugin_env_vars: HashMap<String, String>,

    /// Connection entries: secret references or plain values
    #[serde(default)]
    pub connection_env_vars: HashMap<String, String>,
}

/// Response returned to the host after a session opens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParamsResponse {
    /// Resolved entries, base64-encoded. `None` leaves the host's entries untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_env_vars: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_params_defaults() {
        let params: SessionParams = serde_json::from_str(r#"{"session_id": "s-1"}"#).unwrap();
        assert_eq!(params.session_id, "s-1");
        assert!(params.client_verb.is_empty());
        assert!(params.plugin_env_vars.is_empty());
        assert!(params.connection_env_vars.is_empty());
    }

    #[test]
    fn test_non_string_connection_value_rejected() {
        let result: Result<SessionParams, _> = serde_json::from_str(
            r#"{"session_id": "s-1", "connection_env_vars": {"PORT": 5432}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_response_serializes_without_entries() {
        let json = serde_json::to_string(&SessionParamsResponse::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
