use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use estate_views::collaborators::{HttpListingSource, ListingSource};
use estate_views::components::Screen;
use estate_views::config::{ApiConfig, AppConfig};
use estate_views::framework::{FetchError, FetchState};
use estate_views::lifecycle::EstateApp;
use estate_views::model::TransactionMode;
use estate_views::view::Activation;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;

async fn home(Path(kind): Path<String>) -> Response {
    match kind.as_str() {
        "buy" => Json(json!({
            "data": [
                {
                    "_id": "p1",
                    "img": ["https://cdn.example/p1.jpg"],
                    "starting_bid": "1250",
                    "area": 1200,
                    "bedroom": 2,
                    "bathroom": "3",
                    "city": "Lahore",
                    "country": "Pakistan",
                    "isHot": true,
                    "description": "Corner plot"
                },
                { "id": "p2", "city": "Karachi", "country": "Pakistan" }
            ]
        }))
        .into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Echoes the requested city back as the only record's city.
async fn search(Json(body): Json<Value>) -> Json<Value> {
    let city = body.get("city").cloned().unwrap_or(Value::Null);
    Json(json!({ "data": [ { "_id": "s1", "city": city } ] }))
}

async fn slow_home() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({ "data": [] }))
}

async fn spawn_api() -> SocketAddr {
    serve(
        Router::new()
            .route("/api/property/home/{kind}", get(home))
            .route("/api/property/searchproperty", post(search)),
    )
    .await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn api_config(addr: SocketAddr, timeout_secs: u64) -> ApiConfig {
    ApiConfig {
        base_url: format!("http://{addr}/api"),
        timeout_secs,
    }
}

#[tokio::test]
async fn test_http_home_listings_decode() {
    let addr = spawn_api().await;
    let source = HttpListingSource::new(&api_config(addr, 5)).unwrap();

    let records = source.home_listings(TransactionMode::Buy).await.unwrap();

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.id, "p1");
    assert_eq!(first.starting_bid, Some(1250.0));
    assert_eq!(first.area.as_deref(), Some("1200"));
    assert_eq!(first.bedroom.as_deref(), Some("2"));
    assert!(first.is_hot);
    assert_eq!(first.cover_image(), Some("https://cdn.example/p1.jpg"));
    assert_eq!(records[1].id, "p2");
    assert_eq!(records[1].starting_bid, None);
}

#[tokio::test]
async fn test_http_search_sends_city_or_null() {
    let addr = spawn_api().await;
    let source = HttpListingSource::new(&api_config(addr, 5)).unwrap();

    let found = source.search(Some("Austin")).await.unwrap();
    assert_eq!(found[0].city.as_deref(), Some("Austin"));

    let unfiltered = source.search(None).await.unwrap();
    assert_eq!(unfiltered[0].city, None);
}

#[tokio::test]
async fn test_http_error_status_is_request_failure() {
    let addr = spawn_api().await;
    let source = HttpListingSource::new(&api_config(addr, 5)).unwrap();

    let err = source.home_listings(TransactionMode::Rent).await.unwrap_err();
    assert!(matches!(err, FetchError::RequestFailed(ref m) if m.contains("500")));
}

#[tokio::test]
async fn test_http_timeout_maps_to_timeout() {
    let addr = serve(Router::new().route("/api/property/home/{kind}", get(slow_home))).await;
    let source = HttpListingSource::new(&api_config(addr, 1)).unwrap();

    let err = source.home_listings(TransactionMode::Buy).await.unwrap_err();

    assert_eq!(err, FetchError::Timeout);
    assert_eq!(err.to_string(), "Server Timeout");
}

#[tokio::test]
async fn test_app_loads_from_http_api() {
    let addr = spawn_api().await;
    let config = AppConfig {
        api: api_config(addr, 5),
        ..AppConfig::default()
    };
    let (app, _routes) = EstateApp::new(&config).unwrap();

    let outcome = app.home.load_home(TransactionMode::Buy).await.unwrap();
    assert!(matches!(outcome, Activation::Issued(_)));

    let snapshot = app.home.wait_until(|s| s.state.is_settled()).await.unwrap();
    assert_eq!(snapshot.state.items().map(|items| items.len()), Some(2));

    let html = Screen::from_state(&snapshot.state).render().into_string();
    assert!(html.contains("Starting from $1,250"));
    assert!(html.contains("Lahore, Pakistan"));

    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_app_surfaces_server_error_as_failed() {
    let addr = spawn_api().await;
    let config = AppConfig {
        api: api_config(addr, 5),
        ..AppConfig::default()
    };
    let (app, _routes) = EstateApp::new(&config).unwrap();

    app.home.load_home(TransactionMode::Rent).await.unwrap();
    let snapshot = app.home.wait_until(|s| s.state.is_settled()).await.unwrap();

    assert!(matches!(snapshot.state, FetchState::Failed(_)));
    let html = Screen::from_state(&snapshot.state).render().into_string();
    assert!(html.contains("Pull down to try again"));

    app.shutdown().await.unwrap();
}
