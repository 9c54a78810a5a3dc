//! Integration tests for WeatherProvider using wiremock.
//!
//! These tests verify request shape and error classification against a
//! mock WeatherAPI.com server.

use chrono::{TimeZone, Utc};
use weatherdash_weather::{UnitSystem, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2024-05-06 00:00 UTC
const DAY_START: i64 = 1_714_953_600;

/// Helper to build a provider response with `days` days of hourly data
fn forecast_body(name: &str, temp_c: f64, days: i64) -> serde_json::Value {
    let forecastday: Vec<_> = (0..days)
        .map(|d| {
            let start = DAY_START + d * 86_400;
            let date = Utc
                .timestamp_opt(start, 0)
                .unwrap()
                .format("%Y-%m-%d")
                .to_string();
            let hour: Vec<_> = (0..24)
                .map(|h: i64| {
                    serde_json::json!({
                        "time_epoch": start + h * 3600,
                        "time": format!("{date} {h:02}:00"),
                        "temp_c": temp_c,
                        "is_day": 1,
                        "condition": { "text": "Overcast" }
                    })
                })
                .collect();
            serde_json::json!({
                "date": date,
                "day": { "avgtemp_c": temp_c, "condition": { "text": "Overcast" } },
                "hour": hour
            })
        })
        .collect();

    serde_json::json!({
        "location": { "name": name, "country": "USA", "localtime": "2024-05-06 09:00" },
        "current": {
            "temp_c": temp_c,
            "is_day": 1,
            "condition": { "text": "Sunny" },
            "wind_kph": 14.4,
            "humidity": 61,
            "feelslike_c": temp_c
        },
        "forecast": { "forecastday": forecastday }
    })
}

fn provider_for(server: &MockServer, key: Option<&str>) -> WeatherProvider {
    WeatherProvider::new(key.map(str::to_string), None)
        .unwrap()
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_fetch_success_maps_trio() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "Nashville"))
        .and(query_param("days", "5"))
        .and(query_param("aqi", "no"))
        .and(query_param("alerts", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("Nashville", 20.0, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let now = Utc.timestamp_opt(DAY_START + 9 * 3600, 0).unwrap();
    let snapshot = provider.fetch("Nashville", now).await.unwrap();

    assert_eq!(snapshot.current.location, "Nashville");
    assert_eq!(snapshot.current.temperature, 20);
    assert_eq!(snapshot.forecast.len(), 5);
    assert_eq!(snapshot.hourly.len(), 12);
    assert_eq!(snapshot.hourly[0].time, "10 AM");

    assert_eq!(
        UnitSystem::Metric.format_temperature(snapshot.current.temperature),
        "20°C"
    );
    assert_eq!(
        UnitSystem::Imperial.format_temperature(snapshot.current.temperature),
        "68°F"
    );
}

#[tokio::test]
async fn test_location_is_sent_as_given() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", "New York, NY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("New York", 12.0, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let snapshot = provider
        .fetch("New York, NY", Utc.timestamp_opt(DAY_START, 0).unwrap())
        .await
        .unwrap();

    assert_eq!(snapshot.current.location, "New York");
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, None);
    let result = provider.fetch("Nashville", Utc::now()).await;

    assert!(matches!(result, Err(WeatherError::MissingApiKey)));
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let err = provider.fetch("Nashville", Utc::now()).await.unwrap_err();

    match err {
        WeatherError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_location_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let err = provider.fetch("Atlantis", Utc::now()).await.unwrap_err();

    assert!(err.to_string().contains("400"), "Error should mention 400: {err}");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, Some("test-key"));
    let err = provider.fetch("Nashville", Utc::now()).await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let provider = WeatherProvider::new(Some("test-key".to_string()), None)
        .unwrap()
        .with_base_url("http://127.0.0.1:1");

    let err = provider.fetch("Nashville", Utc::now()).await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)));
}
