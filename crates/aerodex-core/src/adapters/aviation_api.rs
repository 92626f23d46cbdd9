use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::{FacilityProvider, FetchFuture};
use crate::{FacilityRecord, LocationCode, ProviderError};

const PROVIDER_NAME: &str = "AviationApi.com";

/// Adapter for the aviationapi.com airports endpoint.
///
/// The upstream answers `GET /v1/airports?apt=KSPG` with an object keyed by
/// the requested code, each value a list of matching records. The first record
/// for the code wins; a missing key or empty list means "no record".
#[derive(Clone)]
pub struct AviationApiProvider {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    read_timeout: Duration,
}

impl AviationApiProvider {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self::with_http_client(
            Arc::new(ReqwestHttpClient::new(config.connect_timeout)),
            config.base_url.clone(),
            config.read_timeout,
        )
    }

    pub fn with_http_client(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        read_timeout: Duration,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            read_timeout,
        }
    }

    fn airports_url(&self, code: &LocationCode) -> String {
        format!(
            "{}/v1/airports?apt={}",
            self.base_url,
            urlencoding::encode(code.as_str())
        )
    }

    async fn fetch_record(&self, code: &LocationCode) -> Result<Option<FacilityRecord>, ProviderError> {
        let url = self.airports_url(code);
        tracing::info!(code = %code, base_url = %self.base_url, "calling external API");

        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout(self.read_timeout);

        let response = self.http_client.execute(request).await.map_err(|error| {
            tracing::error!(code = %code, error = %error, "external API failed");
            ProviderError::from(error)
        })?;

        if !response.is_success() {
            tracing::error!(code = %code, status = response.status, "external API returned error status");
            return Err(ProviderError::Status {
                status: response.status,
            });
        }

        let mut payload: HashMap<String, Vec<FacilityRecord>> =
            serde_json::from_str(&response.body).map_err(|error| {
                tracing::error!(code = %code, error = %error, "external API body could not be decoded");
                ProviderError::from(error)
            })?;

        Ok(payload
            .remove(code.as_str())
            .and_then(|records| records.into_iter().next()))
    }
}

impl FacilityProvider for AviationApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch<'a>(&'a self, code: &'a LocationCode) -> FetchFuture<'a> {
        Box::pin(self.fetch_record(code))
    }
}
