//! Contract tests for the aviationapi.com adapter over real HTTP.
//!
//! A local mock server stands in for the upstream so the reqwest transport,
//! URL shape, timeouts, and payload decoding are all exercised.

use std::sync::Arc;
use std::time::Duration;

use aerodex_core::{
    AviationApiProvider, FacilityLookup, FacilityProvider, FailureKind, LocationCode,
    LookupConfig, ProviderError, RetryConfig, UpstreamConfig,
};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn upstream(server: &MockServer, read_timeout: Duration) -> UpstreamConfig {
    UpstreamConfig {
        base_url: server.uri(),
        connect_timeout: Duration::from_millis(500),
        read_timeout,
    }
}

fn code(value: &str) -> LocationCode {
    LocationCode::parse(value).expect("valid code")
}

#[tokio::test]
async fn fetch_decodes_first_record_keyed_by_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .and(query_param("apt", "KSPG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "KSPG": [{
                "site_number": "03563.*A",
                "type": "AIRPORT",
                "facility_name": "ALBERT WHITTED",
                "faa_ident": "SPG",
                "icao_ident": "KSPG",
                "city": "ST PETERSBURG",
                "state": "FL",
                "latitude": "27-45-54.4100N",
                "longitude": "082-37-37.1060W",
                "fss_phone_numer_tollfree": "1-800-WX-BRIEF",
                "control_tower": "Y"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = AviationApiProvider::new(&upstream(&server, Duration::from_secs(2)));
    let record = provider
        .fetch(&code("KSPG"))
        .await
        .expect("fetch succeeds")
        .expect("record present");

    assert_eq!(record.facility_name.as_deref(), Some("ALBERT WHITTED"));
    assert_eq!(record.facility_type.as_deref(), Some("AIRPORT"));
    assert_eq!(record.fss_phone_number_tollfree.as_deref(), Some("1-800-WX-BRIEF"));
    assert_eq!(record.control_tower.as_deref(), Some("Y"));
}

#[tokio::test]
async fn fetch_reports_absence_for_missing_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "XXXX": [] })))
        .mount(&server)
        .await;

    let provider = AviationApiProvider::new(&upstream(&server, Duration::from_secs(2)));
    let record = provider.fetch(&code("XXXX")).await.expect("fetch succeeds");

    assert!(record.is_none());
}

#[tokio::test]
async fn fetch_fails_on_server_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = AviationApiProvider::new(&upstream(&server, Duration::from_secs(2)));
    let error = provider.fetch(&code("SBJR")).await.expect_err("must fail");

    assert!(matches!(error, ProviderError::Status { status: 503 }));
}

#[tokio::test]
async fn fetch_fails_when_read_timeout_elapses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = AviationApiProvider::new(&upstream(&server, Duration::from_millis(100)));
    let error = provider.fetch(&code("SBJR")).await.expect_err("must time out");

    assert!(matches!(error, ProviderError::Transport(_)));
    assert!(error.to_string().contains("timeout"));
}

#[tokio::test]
async fn lookup_over_http_caches_success_and_retries_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .and(query_param("apt", "SBSP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SBSP": [{ "icao_ident": "SBSP", "facility_name": "Congonhas" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .and(query_param("apt", "SBJR"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let config = LookupConfig {
        upstream: upstream(&server, Duration::from_secs(2)),
        retry: RetryConfig::fixed(Duration::from_millis(10), 3),
        ..LookupConfig::default()
    };
    let lookup = FacilityLookup::from_config(&config);
    assert_eq!(lookup.provider_name(), "AviationApi.com");

    let first = lookup.get_by_code("sbsp").await.expect("lookup succeeds");
    let second = lookup.get_by_code("SBSP").await.expect("cache hit");
    assert_eq!(first.facility_name.as_deref(), Some("Congonhas"));
    assert_eq!(first, second);

    let error = lookup.get_by_code("SBJR").await.expect_err("must fail");
    assert_eq!(error.kind(), FailureKind::ServiceUnavailable);
}

#[tokio::test]
async fn provider_is_usable_behind_trait_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/airports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let provider: Arc<dyn FacilityProvider> =
        Arc::new(AviationApiProvider::new(&upstream(&server, Duration::from_secs(2))));
    let lookup = FacilityLookup::new(provider, &LookupConfig::default());

    let error = lookup.get_by_code("ZZZZ").await.expect_err("must fail");
    assert_eq!(error.kind(), FailureKind::NotFound);
}
