//! Resilient facility lookup.
//!
//! [`FacilityLookup::get_by_code`] is the single entry point. Every call goes
//! through the same steps, in this order:
//!
//! 1. normalize and validate the code (no cache or network access before this)
//! 2. cache-aside read keyed by the normalized code
//! 3. on a miss, one provider call guarded by the circuit breaker, with the
//!    guarded call itself wrapped by the retry policy
//! 4. write-through on success
//! 5. one fallback step converting every failure to the public error contract

use std::sync::Arc;

use crate::adapters::AviationApiProvider;
use crate::cache::CacheStore;
use crate::circuit_breaker::{CircuitBreaker, CircuitError, CircuitState};
use crate::config::{LookupConfig, AIRPORT_POLICY};
use crate::error::{AttemptError, Classified, FailureKind, LookupError};
use crate::provider::FacilityProvider;
use crate::retry::RetryPolicy;
use crate::{FacilityResponse, LocationCode};

/// Lookup orchestrator owning the provider, cache, and resilience policies.
pub struct FacilityLookup {
    provider: Arc<dyn FacilityProvider>,
    cache: CacheStore<LocationCode, FacilityResponse>,
    circuit_breaker: Arc<CircuitBreaker>,
    retry: RetryPolicy,
}

impl FacilityLookup {
    /// Build the production lookup backed by aviationapi.com.
    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(Arc::new(AviationApiProvider::new(&config.upstream)), config)
    }

    /// Build a lookup over any provider, with policies sized from `config`.
    pub fn new(provider: Arc<dyn FacilityProvider>, config: &LookupConfig) -> Self {
        Self::with_policies(
            provider,
            CacheStore::new(config.cache.max_entries, config.cache.expire_after_write),
            Arc::new(CircuitBreaker::new(
                AIRPORT_POLICY,
                config.circuit_breaker.clone(),
            )),
            RetryPolicy::new(AIRPORT_POLICY, config.retry.clone()),
        )
    }

    pub fn with_policies(
        provider: Arc<dyn FacilityProvider>,
        cache: CacheStore<LocationCode, FacilityResponse>,
        circuit_breaker: Arc<CircuitBreaker>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            provider,
            cache,
            circuit_breaker,
            retry,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }

    /// Looks up a facility by ICAO code.
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidInput`] if the trimmed, upper-cased input is not
    ///   four ASCII letters
    /// - [`LookupError::NotFound`] if the provider has no record for the code
    /// - [`LookupError::ServiceUnavailable`] if the provider keeps failing or
    ///   the circuit is open
    pub async fn get_by_code(&self, input: &str) -> Result<FacilityResponse, LookupError> {
        let code = LocationCode::parse(input).map_err(|error| {
            tracing::debug!(input, error = %error, "rejected lookup input");
            LookupError::from(error)
        })?;

        tracing::info!(code = %code, "request received");

        if let Some(cached) = self.cache.get(&code).await {
            tracing::debug!(code = %code, "cache hit");
            return Ok(cached);
        }

        let outcome = self
            .retry
            .execute(|attempt| self.guarded_fetch(&code, attempt))
            .await;

        match outcome {
            Ok(response) => {
                self.cache.put(code, response.clone()).await;
                Ok(response)
            }
            Err(error) => Err(self.fallback(&code, error)),
        }
    }

    async fn guarded_fetch(
        &self,
        code: &LocationCode,
        attempt: u32,
    ) -> Result<FacilityResponse, AttemptError> {
        let outcome = self
            .circuit_breaker
            .call(
                || async {
                    tracing::debug!(code = %code, provider = self.provider.name(), attempt, "fetching from provider");
                    match self.provider.fetch(code).await {
                        Ok(Some(record)) => Ok(FacilityResponse::from(record)),
                        Ok(None) => Err(AttemptError::NotFound { code: code.clone() }),
                        Err(error) => Err(AttemptError::Upstream(error)),
                    }
                },
                // Only upstream failures move the failure rate; an answered
                // "no such code" is a healthy call.
                |error: &AttemptError| error.failure_kind() == FailureKind::UpstreamFailure,
            )
            .await;

        outcome.map_err(|error| match error {
            CircuitError::Open { name } => AttemptError::CircuitOpen { name },
            CircuitError::Call(error) => error,
        })
    }

    fn fallback(&self, code: &LocationCode, error: AttemptError) -> LookupError {
        tracing::error!(
            code = %code,
            provider = self.provider.name(),
            kind = %error.failure_kind(),
            error = %error,
            "fallback triggered"
        );
        LookupError::from_attempt(error)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::circuit_breaker::CircuitBreakerConfig;
    use crate::provider::FetchFuture;
    use crate::retry::RetryConfig;
    use crate::{FacilityRecord, ProviderError};

    #[derive(Default)]
    struct MapProvider {
        records: HashMap<String, FacilityRecord>,
        calls: AtomicUsize,
    }

    impl MapProvider {
        fn with_record(code: &str, name: &str) -> Self {
            let mut records = HashMap::new();
            records.insert(
                code.to_owned(),
                FacilityRecord {
                    icao_ident: Some(code.to_owned()),
                    facility_name: Some(name.to_owned()),
                    ..FacilityRecord::default()
                },
            );
            Self {
                records,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl FacilityProvider for MapProvider {
        fn name(&self) -> &str {
            "map"
        }

        fn fetch<'a>(&'a self, code: &'a LocationCode) -> FetchFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let record = self.records.get(code.as_str()).cloned();
            Box::pin(async move { Ok::<_, ProviderError>(record) })
        }
    }

    fn lookup(provider: Arc<MapProvider>) -> FacilityLookup {
        let config = LookupConfig {
            retry: RetryConfig::fixed(Duration::from_millis(1), 3),
            ..LookupConfig::default()
        };
        FacilityLookup::new(provider, &config)
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_cache_or_provider() {
        let provider = Arc::new(MapProvider::default());
        let lookup = lookup(provider.clone());

        let error = lookup.get_by_code("XX").await.expect_err("must fail");
        assert_eq!(error.kind(), FailureKind::InvalidInput);
        assert!(error.to_string().contains("Invalid ICAO"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(lookup.cached_entries().await, 0);
    }

    #[tokio::test]
    async fn normalizes_before_cache_and_provider() {
        let provider = Arc::new(MapProvider::with_record("KSPG", "ALBERT WHITTED"));
        let lookup = lookup(provider.clone());

        let lower = lookup.get_by_code(" kspg ").await.expect("lookup succeeds");
        let upper = lookup.get_by_code("KSPG").await.expect("cache hit");

        assert_eq!(lower.icao_ident.as_deref(), Some("KSPG"));
        assert_eq!(lower, upper);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn not_found_is_neither_cached_nor_counted_by_breaker() {
        let provider = Arc::new(MapProvider::default());
        let lookup = lookup(provider.clone());

        for _ in 0..6 {
            let error = lookup.get_by_code("XXXX").await.expect_err("must fail");
            assert!(matches!(error, LookupError::NotFound { .. }));
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 6);
        assert_eq!(lookup.cached_entries().await, 0);
        assert_eq!(lookup.circuit_state(), CircuitState::Closed);
        assert_eq!(lookup.circuit_breaker.failure_rate(), 0.0);
    }

    #[tokio::test]
    async fn open_breaker_is_reported_as_service_unavailable() {
        let provider = Arc::new(MapProvider::with_record("SBSP", "Congonhas"));
        let breaker = Arc::new(CircuitBreaker::new(
            AIRPORT_POLICY,
            CircuitBreakerConfig::default(),
        ));
        for _ in 0..5 {
            breaker.record_failure();
        }
        let lookup = FacilityLookup::with_policies(
            provider.clone(),
            CacheStore::new(10, Duration::from_secs(60)),
            breaker,
            RetryPolicy::new(AIRPORT_POLICY, RetryConfig::fixed(Duration::from_millis(1), 3)),
        );

        let error = lookup.get_by_code("SBSP").await.expect_err("must fail");
        assert_eq!(error.kind(), FailureKind::ServiceUnavailable);
        assert!(matches!(
            error,
            LookupError::ServiceUnavailable {
                source: AttemptError::CircuitOpen { .. },
                ..
            }
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn not_found_fallback_is_logged_as_error() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let lookup = lookup(Arc::new(MapProvider::default()));
        let error = lookup.get_by_code("XXXX").await.expect_err("must fail");
        assert_eq!(error.kind(), FailureKind::NotFound);

        let output = logs.text();
        let line = output
            .lines()
            .find(|line| line.contains("fallback triggered"))
            .expect("fallback is logged");
        assert!(line.contains("ERROR"), "logged at error level: {line}");
        assert!(line.contains("kind=not_found"), "kind field present: {line}");
    }

    #[test]
    fn exposes_provider_name() {
        let lookup = lookup(Arc::new(MapProvider::default()));
        assert_eq!(lookup.provider_name(), "map");
    }
}
