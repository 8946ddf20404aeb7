use city_weather::forecast::{AggregationMode, DailyAggregate};
use city_weather::infra::openweathermap::OpenWeatherClient;
use city_weather::services::weather_api::WeatherApi;
use city_weather::session::{SEARCH_FAILED_MESSAGE, Session};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn current_body() -> serde_json::Value {
    json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d" }],
        "main": { "temp": 11.4, "feels_like": 10.2, "temp_min": 9.8, "temp_max": 12.6, "humidity": 81 },
        "name": "London",
        "cod": 200
    })
}

fn forecast_body() -> serde_json::Value {
    let mut list = Vec::new();
    for (date, kelvin) in [("2024-10-01", 285.15), ("2024-10-02", 283.15), ("2024-10-03", 281.15)] {
        for slot in 0..8 {
            list.push(json!({
                "dt_txt": format!("{date} {:02}:00:00", slot * 3),
                "main": { "temp": kelvin }
            }));
        }
    }
    json!({ "cod": "200", "cnt": list.len(), "list": list })
}

async fn london_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "London"))
        .and(query_param("appid", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Nowhere"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    server
}

fn client(server: &MockServer) -> impl WeatherApi {
    OpenWeatherClient::new(&server.uri(), API_KEY.to_string()).expect("client")
}

#[tokio::test]
async fn test_client_fetches_current_weather() {
    let server = london_server().await;
    let current = client(&server).current_weather("London").await.unwrap();

    assert_eq!(current.name, "London");
    assert_eq!(current.coord.lat, 51.5085);
    assert_eq!(current.weather[0].icon, "04d");
}

#[tokio::test]
async fn test_client_fetches_forecast() {
    let server = london_server().await;
    let samples = client(&server).forecast("London").await.unwrap();

    assert_eq!(samples.len(), 24);
    assert_eq!(samples[0].timestamp, "2024-10-01 00:00:00");
    assert_eq!(samples[0].temperature_kelvin, 285.15);
}

#[tokio::test]
async fn test_client_reports_unknown_city() {
    let server = london_server().await;
    let err = client(&server).current_weather("Nowhere").await.unwrap_err();

    assert!(format!("{err:#}").contains("404"));
}

#[tokio::test]
async fn test_full_search_pipeline() {
    let server = london_server().await;
    let api = client(&server);
    let mut session = Session::new(AggregationMode::Legacy);

    let result = session.search(&api, "London").await.unwrap();

    assert_eq!(result.summary.temperature, 11.4);
    assert_eq!(result.summary.icon, "https://openweathermap.org/img/w/04d.png");
    assert_eq!(
        result.daily,
        vec![
            DailyAggregate::new("2024-10-01", 12.0),
            DailyAggregate::new("2024-10-02", 10.0),
        ]
    );

    let geojson = session.map().to_geojson();
    assert_eq!(geojson["features"][0]["properties"]["popup"]["lines"][0], "Place: London");

    let svg = session.chart().unwrap().to_svg_string().unwrap();
    assert!(svg.contains("2024-10-01"));
}

#[tokio::test]
async fn test_unknown_city_clears_previous_search() {
    let server = london_server().await;
    let api = client(&server);
    let mut session = Session::default();

    session.search(&api, "London").await.unwrap();
    let err = session.search(&api, "Nowhere").await.unwrap_err();

    assert_eq!(err.to_string(), SEARCH_FAILED_MESSAGE);
    assert!(session.map().markers().is_empty());
    assert!(session.map().popup().is_none());
    assert!(session.chart().is_none());
}

#[tokio::test]
async fn test_calendar_mode_over_http() {
    let server = london_server().await;
    let api = client(&server);
    let mut session = Session::new(AggregationMode::Calendar);

    let result = session.search(&api, "London").await.unwrap();

    assert_eq!(result.daily.len(), 3);
    assert_eq!(result.daily[2], DailyAggregate::new("2024-10-03", 8.0));
}
