//! Host connection configuration

/// Configuration for connecting to the host platform
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Host base URL (e.g., "http://localhost:8000")
    pub base_url: String,

    /// API key for token authentication
    pub api_key: Option<String>,

    /// API secret paired with the key
    pub api_secret: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl HostConfig {
    /// Create a new host configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            api_secret: None,
            timeout: 30,
        }
    }

    /// Set the API key/secret credential pair
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Authorization header value, when credentials are configured
    pub fn auth_header(&self) -> Option<String> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(format!("token {}:{}", key, secret)),
            _ => None,
        }
    }

    /// Create an HTTP host client from this configuration
    pub fn build_client(&self) -> super::HostResult<super::HttpHost> {
        super::HttpHost::new(self)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
