//! Session lifecycle hooks invoked by the host
//!
//! Only session open does any work. Each open builds its own providers and
//! cache, so concurrent sessions share no mutable state.

use async_trait::async_trait;
use secretsmanager_core::{Result, SessionParams, SessionParamsResponse};
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::resolver::SecretResolver;

/// Callbacks a host invokes around a connection session
#[async_trait]
pub trait SessionHooks: Send + Sync {
    /// Resolve the session's connection entries
    async fn on_session_open(&self, params: &SessionParams) -> Result<SessionParamsResponse>;

    /// Called for every packet received from the client
    async fn on_receive(&self, session_id: &str) -> Result<()>;

    /// Called for every packet sent to the client
    async fn on_send(&self, session_id: &str) -> Result<()>;
}

/// Hooks that resolve secret references when a session opens
#[derive(Debug, Default)]
pub struct SecretsManagerHooks;

impl SecretsManagerHooks {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionHooks for SecretsManagerHooks {
    async fn on_session_open(&self, params: &SessionParams) -> Result<SessionParamsResponse> {
        info!(
            session = %params.session_id,
            verb = %params.client_verb,
            "opening session"
        );

        let config = ProviderConfig::from_plugin_vars(&params.plugin_env_vars)?;
        let resolver = SecretResolver::from_config(config).await?;
        let resolved = resolver.resolve(&params.connection_env_vars).await?;

        if resolved.is_empty() {
            info!(session = %params.session_id, "empty connection envvars");
            return Ok(SessionParamsResponse::default());
        }

        Ok(SessionParamsResponse {
            connection_env_vars: Some(resolved),
        })
    }

    async fn on_receive(&self, session_id: &str) -> Result<()> {
        debug!(session = %session_id, "on-receive");
        Ok(())
    }

    async fn on_send(&self, session_id: &str) -> Result<()> {
        debug!(session = %session_id, "on-send");
        Ok(())
    }
}
