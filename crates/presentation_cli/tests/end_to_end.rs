//! End-to-end tests wiring the notifier to the real adapters
//!
//! The weather API is served by wiremock; the location comes from the
//! static adapter.

use std::sync::Arc;
use std::time::Duration;

use application::{ApplicationError, CycleOutcome, NotifierEvent, TemperatureNotifier};
use domain::value_objects::GeoLocation;
use infrastructure::{StaticLocationAdapter, WeatherAdapter, WeatherAppConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn weather_body(kelvin: f64, main: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "weather": [{ "id": 800, "main": main, "description": description, "icon": "01d" }],
        "main": { "temp": kelvin, "humidity": 50 },
        "name": "Berlin",
        "cod": 200
    })
}

fn create_notifier(mock_server: &MockServer) -> TemperatureNotifier {
    let config = WeatherAppConfig {
        base_url: mock_server.uri(),
        api_key: Some("e2e-key".to_string().into()),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    let weather = WeatherAdapter::new((&config).into()).expect("Failed to create adapter");
    #[allow(clippy::expect_used)]
    let location = StaticLocationAdapter::new(GeoLocation::new(52.52, 13.405).expect("valid"));

    TemperatureNotifier::new(Arc::new(location), Arc::new(weather))
}

// ============================================================================
// Change detection
// ============================================================================

#[tokio::test]
async fn refresh_publishes_only_changes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("APPID", "e2e-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(290.0, "Clear", "clear sky")))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(291.2, "Clouds", "few clouds")))
        .mount(&mock_server)
        .await;

    let notifier = create_notifier(&mock_server);
    let mut events = notifier.subscribe();

    let first = notifier.refresh().await.unwrap();
    assert!(matches!(first, CycleOutcome::Changed(_)));

    let second = notifier.refresh().await.unwrap();
    assert!(matches!(second, CycleOutcome::Unchanged));

    let third = notifier.refresh().await.unwrap();
    assert!(matches!(third, CycleOutcome::Changed(_)));

    let stored = notifier.current_reading().unwrap();
    assert!((stored.temperature.value() - 291.2).abs() < 1e-9);
    assert_eq!(stored.summary.unwrap().description, "few clouds");

    let mut changes = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let NotifierEvent::TemperatureChanged(reading) = event {
            changes.push(reading.temperature.value());
        }
    }
    assert_eq!(changes, vec![290.0, 291.2]);
}

#[tokio::test]
async fn server_error_is_cycle_local() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(285.0, "Rain", "light rain")))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let notifier = create_notifier(&mock_server);
    let mut events = notifier.subscribe();

    assert!(notifier.refresh().await.is_ok());
    let err = notifier.refresh().await.unwrap_err();
    assert!(matches!(err, ApplicationError::FetchTransport(_)));

    let stored = notifier.current_reading().unwrap();
    assert!((stored.temperature.value() - 285.0).abs() < 1e-9);

    assert!(matches!(
        events.try_recv(),
        Ok(NotifierEvent::TemperatureChanged(_))
    ));
    assert!(matches!(
        events.try_recv(),
        Ok(NotifierEvent::CycleFailed(ApplicationError::FetchTransport(_)))
    ));
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "main": {} })))
        .mount(&mock_server)
        .await;

    let notifier = create_notifier(&mock_server);
    let err = notifier.refresh().await.unwrap_err();

    assert!(matches!(err, ApplicationError::FetchDecode(_)));
    assert!(notifier.current_reading().is_none());
}

// ============================================================================
// Schedule
// ============================================================================

#[tokio::test]
async fn start_fetches_immediately_and_stop_halts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weather_body(288.4, "Clear", "clear sky")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notifier = create_notifier(&mock_server);
    let mut events = notifier.subscribe();

    notifier.start(Duration::from_secs(3600));
    assert!(notifier.is_running());

    let event = tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(event, NotifierEvent::TemperatureChanged(_)));

    notifier.stop();
    assert!(!notifier.is_running());
    assert!(notifier.current_reading().is_some());
}
