//! Analyzer configuration.

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Static AWS credentials.
#[derive(Clone)]
pub struct AwsCredentials {
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

/// Configuration for the Rekognition analyzer.
#[derive(Debug, Clone)]
pub struct RekognitionConfig {
    /// Credentials, `None` when either key is missing
    pub credentials: Option<AwsCredentials>,
    /// AWS region
    pub region: String,
    /// Endpoint override (LocalStack, test servers)
    pub endpoint_url: Option<String>,
    /// Log the raw service response at info instead of debug
    pub echo_raw_response: bool,
}

impl Default for RekognitionConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            echo_raw_response: false,
        }
    }
}

impl RekognitionConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (var("AWS_ACCESS_KEY_ID"), var("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        Self {
            credentials,
            region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: var("AWS_ENDPOINT_URL_REKOGNITION").or_else(|| var("AWS_ENDPOINT_URL")),
            echo_raw_response: var("FACESCAN_ECHO_RAW_RESPONSE")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
        }
    }

    /// Config with the given credentials and default settings.
    pub fn with_credentials(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Some(AwsCredentials {
                access_key_id: access_key_id.into(),
                secret_access_key: secret_access_key.into(),
            }),
            ..Self::default()
        }
    }
}
