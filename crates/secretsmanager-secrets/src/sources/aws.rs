//! AWS Secrets Manager provider
//!
//! Each secret id holds a `SecretString` that must be a flat JSON object of
//! string values. Remote errors are surfaced as-is; the SDK's own retry
//! loop is disabled so that a failure propagates on the first attempt.

use crate::config::{AwsConfig, AwsCredentials};
use crate::security::SecureString;
use crate::sources::SecretProvider;
use crate::types::SecretBundle;
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client;
use secretsmanager_core::{Error, ProviderKind, Result};
use std::sync::Arc;
use tracing::debug;

/// Name reported by the static credentials provider
const CREDENTIALS_PROVIDER_NAME: &str = "secretsmanager-plugin";

/// Remote "get secret value" call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretValueClient: Send + Sync {
    /// Fetch the `SecretString` stored under `secret_id`, if any
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<SecureString>>;
}

/// `SecretValueClient` backed by the AWS SDK
pub struct SdkSecretValueClient {
    client: Client,
}

impl SdkSecretValueClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build an SDK client from static credentials
    pub async fn from_credentials(
        credentials: AwsCredentials,
        endpoint_url: Option<&str>,
    ) -> Self {
        let AwsCredentials {
            access_key_id,
            secret_access_key,
            session_token,
            region,
        } = credentials;

        let static_credentials = Credentials::new(
            access_key_id,
            secret_access_key.as_str(),
            session_token.as_ref().map(|t| t.as_str().to_string()),
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .credentials_provider(static_credentials)
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = endpoint_url {
            debug!("Using custom Secrets Manager endpoint: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl SecretValueClient for SdkSecretValueClient {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<SecureString>> {
        match self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
        {
            Ok(output) => Ok(output.secret_string.map(SecureString::new)),
            Err(e) => Err(map_get_secret_error(secret_id, e)),
        }
    }
}

/// Map an SDK failure onto the error taxonomy
///
/// A missing secret becomes `SourceNotFound`; anything else is `Remote`,
/// carrying the service's code and message, or the full error context when
/// the service sent none (timeouts, dispatch failures).
fn map_get_secret_error<R>(secret_id: &str, e: SdkError<GetSecretValueError, R>) -> Error
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let detail = DisplayErrorContext(&e).to_string();
    let service_error = e.into_service_error();
    if service_error.is_resource_not_found_exception() {
        return Error::source_not_found(secret_id);
    }

    Error::remote(
        secret_id,
        service_error.code().map(str::to_string),
        service_error
            .message()
            .map(str::to_string)
            .unwrap_or(detail),
    )
}

/// Backend-store provider for `aws:` references
pub struct AwsSecretsManagerProvider {
    /// `None` when no credentials were supplied
    client: Option<Arc<dyn SecretValueClient>>,
}

impl AwsSecretsManagerProvider {
    /// Build from configuration
    ///
    /// Missing credentials leave the provider unconfigured rather than
    /// failing; partial or malformed settings fail construction.
    pub async fn from_config(config: &AwsConfig) -> Result<Self> {
        let Some(credentials) = config.credentials()? else {
            debug!("AWS credentials not supplied, aws provider left unconfigured");
            return Ok(Self::not_configured());
        };

        let client =
            SdkSecretValueClient::from_credentials(credentials, config.endpoint_url.as_deref())
                .await;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Provider around an existing client
    pub fn with_client(client: Arc<dyn SecretValueClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Provider whose every fetch fails with `ProviderNotConfigured`
    pub fn not_configured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

impl std::fmt::Debug for AwsSecretsManagerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSecretsManagerProvider")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SecretProvider for AwsSecretsManagerProvider {
    async fn fetch_bundle(&self, secret_id: &str) -> Result<SecretBundle> {
        let client = self.client.as_ref().ok_or(Error::ProviderNotConfigured {
            provider: ProviderKind::Aws,
        })?;

        debug!(secret_id = %secret_id, "fetching secret value");
        let payload = client
            .get_secret_string(secret_id)
            .await?
            .ok_or_else(|| Error::invalid_bundle(secret_id, "secret has no SecretString value"))?;

        SecretBundle::from_json(secret_id, payload.as_str())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Aws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_secretsmanager::error::ErrorMetadata;
    use aws_sdk_secretsmanager::types::error::ResourceNotFoundException;
    use aws_smithy_runtime_api::http::Response as HttpResponse;
    use aws_smithy_types::body::SdkBody;
    use mockall::predicate::eq;

    fn provider_with(mock: MockSecretValueClient) -> AwsSecretsManagerProvider {
        AwsSecretsManagerProvider::with_client(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_fetch_bundle() {
        let mut mock = MockSecretValueClient::new();
        mock.expect_get_secret_string()
            .with(eq("prod/db"))
            .times(1)
            .returning(|_| {
                Ok(Some(SecureString::from(
                    r#"{"username":"admin","password":"s3cr3t"}"#,
                )))
            });

        let bundle = provider_with(mock).fetch_bundle("prod/db").await.unwrap();
        assert_eq!(bundle.get("username").map(|v| v.as_str()), Some("admin"));
        assert_eq!(bundle.get("password").map(|v| v.as_str()), Some("s3cr3t"));
    }

    #[tokio::test]
    async fn test_not_configured() {
        let provider = AwsSecretsManagerProvider::not_configured();
        assert!(!provider.is_configured());

        match provider.fetch_bundle("prod/db").await {
            Err(Error::ProviderNotConfigured { provider }) => {
                assert_eq!(provider, ProviderKind::Aws)
            }
            other => panic!("Expected not configured, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_from_config_without_credentials() {
        let provider = AwsSecretsManagerProvider::from_config(&AwsConfig::default())
            .await
            .unwrap();
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_from_config_partial_credentials() {
        let config = AwsConfig {
            region: Some("us-east-1".to_string()),
            ..Default::default()
        };
        let result = AwsSecretsManagerProvider::from_config(&config).await;
        assert!(matches!(result, Err(Error::ProviderConstruction { .. })));
    }

    #[tokio::test]
    async fn test_non_json_payload() {
        let mut mock = MockSecretValueClient::new();
        mock.expect_get_secret_string()
            .returning(|_| Ok(Some(SecureString::from("plain-password"))));

        let result = provider_with(mock).fetch_bundle("prod/db").await;
        assert!(matches!(result, Err(Error::InvalidBundleFormat { .. })));
    }

    #[tokio::test]
    async fn test_missing_secret_string() {
        let mut mock = MockSecretValueClient::new();
        mock.expect_get_secret_string().returning(|_| Ok(None));

        let result = provider_with(mock).fetch_bundle("prod/db").await;
        assert!(matches!(result, Err(Error::InvalidBundleFormat { .. })));
    }

    fn http_response(status: u16) -> HttpResponse {
        HttpResponse::new(status.try_into().unwrap(), SdkBody::empty())
    }

    #[test]
    fn test_map_resource_not_found() {
        let err = SdkError::service_error(
            GetSecretValueError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Secrets Manager can't find the specified secret.")
                    .build(),
            ),
            http_response(400),
        );

        match map_get_secret_error("prod/db", err) {
            Error::SourceNotFound { secret_id } => assert_eq!(secret_id, "prod/db"),
            other => panic!("Expected source not found, got {other:?}"),
        }
    }

    #[test]
    fn test_map_service_error_keeps_code_and_message() {
        let err = SdkError::service_error(
            GetSecretValueError::generic(
                ErrorMetadata::builder()
                    .code("ThrottlingException")
                    .message("Rate exceeded")
                    .build(),
            ),
            http_response(400),
        );

        match map_get_secret_error("prod/db", err) {
            Error::Remote {
                secret_id,
                code,
                message,
            } => {
                assert_eq!(secret_id, "prod/db");
                assert_eq!(code.as_deref(), Some("ThrottlingException"));
                assert_eq!(message, "Rate exceeded");
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_timeout_uses_error_context() {
        let err: SdkError<GetSecretValueError, HttpResponse> =
            SdkError::timeout_error("read timed out");

        match map_get_secret_error("prod/db", err) {
            Error::Remote { code, message, .. } => {
                assert!(code.is_none());
                assert!(message.contains("read timed out"), "{message}");
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remote_error_propagates() {
        let mut mock = MockSecretValueClient::new();
        mock.expect_get_secret_string().times(1).returning(|id| {
            Err(Error::remote(
                id,
                Some("AccessDeniedException".to_string()),
                "not authorized",
            ))
        });

        match provider_with(mock).fetch_bundle("prod/db").await {
            Err(Error::Remote { secret_id, code, .. }) => {
                assert_eq!(secret_id, "prod/db");
                assert_eq!(code.as_deref(), Some("AccessDeniedException"));
            }
            other => panic!("Expected remote error, got {other:?}"),
        }
    }
}
