//! End-to-end lookup tests against a mock Open-Meteo server using wiremock.

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use citywx::app::{App, AppState};
use citywx::cli::{Endpoints, StartupConfig};
use citywx::data::{GeocodingClient, WeatherClient};
use citywx::lookup::{lookup_city, SearchError};
use citywx::report::DisplayDay;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

/// Daily block starting at `start`, with rain and thunder on the given indices
fn daily_block(start: NaiveDate, days: usize, rain: &[usize], thunder: &[usize]) -> Value {
    let dates: Vec<NaiveDate> = (0..days).map(|i| start + Duration::days(i as i64)).collect();
    let time: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();
    let sunrise: Vec<String> = dates.iter().map(|d| format!("{}T04:05", d.format("%Y-%m-%d"))).collect();
    let sunset: Vec<String> = dates.iter().map(|d| format!("{}T21:40", d.format("%Y-%m-%d"))).collect();

    let weather_code: Vec<u8> = (0..days)
        .map(|i| {
            if thunder.contains(&i) {
                95
            } else if rain.contains(&i) {
                61
            } else {
                1
            }
        })
        .collect();
    let precipitation: Vec<f64> = (0..days)
        .map(|i| if rain.contains(&i) { 2.5 } else { 0.0 })
        .collect();

    json!({
        "time": time,
        "weather_code": weather_code,
        "temperature_2m_max": vec![21.0; days],
        "temperature_2m_min": vec![11.0; days],
        "precipitation_sum": precipitation,
        "cloudcover_mean": vec![35.0; days],
        "sunrise": sunrise,
        "sunset": sunset,
    })
}

fn geocoding_body() -> Value {
    json!({
        "results": [{
            "id": 2673730,
            "name": "Stockholm",
            "latitude": 59.32938,
            "longitude": 18.06871,
            "country": "Sweden",
            "timezone": "Europe/Stockholm"
        }],
        "generationtime_ms": 0.6
    })
}

fn forecast_body() -> Value {
    // 32 days back through tomorrow; today is index 32
    json!({
        "latitude": 59.33,
        "longitude": 18.07,
        "timezone": "Europe/Stockholm",
        "current_weather": {
            "temperature": 18.3,
            "windspeed": 14.0,
            "winddirection": 180.0,
            "weathercode": 2,
            "time": "2024-07-15T12:00"
        },
        "daily": daily_block(today() - Duration::days(32), 34, &[29], &[20]),
    })
}

fn archive_body() -> Value {
    json!({
        "latitude": 59.33,
        "longitude": 18.07,
        "daily": daily_block(today() - Duration::days(366), 3, &[1], &[]),
    })
}

async fn mount_geocoding(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Stockholm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current_weather", "true"))
        .and(query_param("timezone", "Europe/Stockholm"))
        .and(query_param("start_date", "2024-06-13"))
        .and(query_param("end_date", "2024-07-16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

fn clients(server: &MockServer) -> (GeocodingClient, WeatherClient) {
    let uri = server.uri();
    (
        GeocodingClient::new().with_base_url(format!("{}/v1/search", uri)),
        WeatherClient::new().with_endpoints(format!("{}/v1/forecast", uri), format!("{}/v1/archive", uri)),
    )
}

#[tokio::test]
async fn test_stockholm_lookup_builds_full_report() {
    let server = MockServer::start().await;
    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
        .expect(5)
        .mount(&server)
        .await;

    let (geocoder, weather) = clients(&server);
    let report = lookup_city(&geocoder, &weather, "Stockholm", today()).await.unwrap();

    assert_eq!(report.location, "Stockholm, Sweden");
    assert_eq!(report.days.len(), 3);
    for card in &report.days {
        assert!(!card.description.is_empty(), "{:?} has no description", card.day);
    }

    let today_card = report.day(DisplayDay::Today).unwrap();
    assert_eq!(today_card.date, today());
    assert_eq!(today_card.temperature, 18);
    assert_eq!(report.days[0].temperature, 16);

    assert_eq!(report.rain.past_month, 1);
    assert_eq!(report.rain.last.to_string(), "3d ago");
    assert_eq!(report.rain.next.to_string(), "+2d");
    assert_eq!(report.rain.next.years_matched, 5);

    assert_eq!(report.thunder.past_month, 1);
    assert_eq!(report.thunder.last.to_string(), "12d ago");
    assert!(!report.thunder.next.has_history());

    assert!((report.wind.speed - 14.0).abs() < 0.001);
}

#[tokio::test]
async fn test_unknown_city_is_location_not_found() {
    let server = MockServer::start().await;
    mount_geocoding(&server, json!({ "generationtime_ms": 0.4 })).await;

    let (geocoder, weather) = clients(&server);
    let err = lookup_city(&geocoder, &weather, "Stockholm", today())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::LocationNotFound(_)));
    assert_eq!(err.user_message(), Some("City could not be found."));
}

#[tokio::test]
async fn test_archive_failure_fails_whole_lookup() {
    let server = MockServer::start().await;
    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (geocoder, weather) = clients(&server);
    let err = lookup_city(&geocoder, &weather, "Stockholm", today())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::NetworkFailure(_)));
    assert!(err
        .user_message()
        .is_some_and(|m| m.starts_with("Something went wrong")));
}

#[tokio::test]
async fn test_geocoder_error_status_is_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (geocoder, weather) = clients(&server);
    let err = lookup_city(&geocoder, &weather, "Stockholm", today())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_app_search_with_configured_endpoints() {
    let server = MockServer::start().await;
    mount_geocoding(&server, geocoding_body()).await;
    mount_forecast(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/archive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
        .mount(&server)
        .await;

    let uri = server.uri();
    let config = StartupConfig {
        initial_city: Some("Stockholm".to_string()),
        endpoints: Endpoints {
            geocoding: format!("{}/v1/search", uri),
            forecast: format!("{}/v1/forecast", uri),
            archive: format!("{}/v1/archive", uri),
        },
        ..StartupConfig::default()
    };

    let mut app = App::with_startup_config(&config, None).unwrap();
    let city = app.take_search().expect("Startup city should be submitted");
    assert_eq!(app.state, AppState::Loading("Stockholm".to_string()));

    app.run_search(&city, today()).await;

    let report = app.report().expect("Search should produce a report");
    assert_eq!(report.location, "Stockholm, Sweden");
}
