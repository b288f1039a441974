//! Access to the live exchange-rate provider.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ApiConnection;
use crate::error::ProviderError;

/// Bound on every provider call so an unreachable host never hangs the
/// caller indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// A source of exchange-rate quotes.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// The currency codes the provider is currently willing to quote.
    async fn supported_codes(&self) -> Result<Vec<String>, ProviderError>;

    /// The unit exchange rate from `from` to `to`.
    async fn unit_rate(&self, from: &str, to: &str) -> Result<f64, ProviderError>;
}

/// `RateSource` backed by the provider's two HTTP GET endpoints. Credential
/// headers ride along as client default headers, so every request carries
/// them.
pub struct HttpRateSource {
    client: reqwest::Client,
    quote_url: String,
    codes_url: String,
}

impl HttpRateSource {
    pub fn new(connection: ApiConnection) -> Result<Self, ProviderError> {
        Self::with_timeout(connection, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        connection: ApiConnection,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .user_agent("fxconv/0.1")
            .default_headers(connection.headers)
            .timeout(timeout)
            .build()
            .map_err(ProviderError::Unreachable)?;

        Ok(HttpRateSource {
            client,
            quote_url: connection.quote_url,
            codes_url: connection.codes_url,
        })
    }

    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
        let response = request.send().await.map_err(ProviderError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Response(status.as_u16()));
        }

        response.text().await.map_err(ProviderError::Unreachable)
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn supported_codes(&self) -> Result<Vec<String>, ProviderError> {
        debug!("Requesting supported currency codes from {}", self.codes_url);

        let text = self.get_text(self.client.get(&self.codes_url)).await?;

        serde_json::from_str::<Vec<String>>(&text).map_err(|e| {
            ProviderError::Malformed(format!("expected a JSON array of currency codes: {e}"))
        })
    }

    async fn unit_rate(&self, from: &str, to: &str) -> Result<f64, ProviderError> {
        debug!("Requesting {from}->{to} rate from {}", self.quote_url);

        // The unit rate is always requested; scaling by the actual amount
        // happens locally.
        let request = self
            .client
            .get(&self.quote_url)
            .query(&[("from", from), ("to", to), ("q", "1.0")]);

        let text = self.get_text(request).await?;

        // The provider answers with a bare number, either as plain text or
        // JSON-encoded. Both parse directly as f64.
        text.trim()
            .parse::<f64>()
            .map_err(|_| ProviderError::Malformed(format!("expected a numeric rate, got '{text}'")))
    }
}
