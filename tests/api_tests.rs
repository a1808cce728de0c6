use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use shortest_route::web::store::MapStore;
use shortest_route::web::{build_app, ServerConfig};

const NO: f64 = 10000.0;

fn app() -> Router {
    build_app(&ServerConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn chain_request(source: usize, target: usize) -> Value {
    json!({
        "adjacencyList": [[0, 1, NO], [NO, 0, 1], [NO, NO, 0]],
        "source": source,
        "target": target
    })
}

#[tokio::test]
async fn test_dijkstra_returns_path() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(chain_request(1, 3))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([1, 2, 3]));
}

#[tokio::test]
async fn test_dijkstra_missing_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/dijkstra",
        Some(json!({"adjacencyList": [[0]], "source": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid input data");
}

#[tokio::test]
async fn test_dijkstra_rejects_non_json_body() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/dijkstra")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dijkstra_invalid_endpoint() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(chain_request(1, 4))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "invalid_endpoint");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid start or end node"));
}

#[tokio::test]
async fn test_dijkstra_malformed_matrix() {
    let app = app();

    let ragged = json!({"adjacencyList": [[0, 1], [1]], "source": 1, "target": 2});
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(ragged)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_matrix");

    let text_cell = json!({"adjacencyList": [[0, "x"], [1, 0]], "source": 1, "target": 2});
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(text_cell)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_matrix");

    let negative = json!({"adjacencyList": [[0, -2], [1, 0]], "source": 1, "target": 2});
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "malformed_matrix");
}

#[tokio::test]
async fn test_dijkstra_unreachable_target() {
    let app = app();
    let request = json!({
        "adjacencyList": [[0, 1, NO], [1, 0, NO], [NO, NO, 0]],
        "source": 1,
        "target": 3
    });
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(request)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "unreachable_target");
}

#[tokio::test]
async fn test_shortest_path_full_response() {
    let app = app();
    let request = json!({
        "adjacencyList": [
            [0, 1, NO, NO],
            [NO, 0, 1, NO],
            [NO, NO, 0, NO],
            [NO, NO, NO, 0]
        ],
        "source": 1,
        "target": 3
    });
    let (status, body) = send(&app, Method::POST, "/api/shortest-path", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "Dijkstra");
    assert_eq!(body["path"], json!([1, 2, 3]));
    assert_eq!(body["distance"], json!(2.0));
    assert_eq!(body["distances"]["1"], json!(0.0));
    assert_eq!(body["distances"]["2"], json!(1.0));
    assert_eq!(body["distances"]["3"], json!(2.0));
    assert_eq!(body["distances"]["4"], Value::Null);
    assert_eq!(body["metrics"]["reachedVertices"], json!(3));
    assert!(body["executionId"].is_string());
    assert!(body["executionTimeMs"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_custom_no_edge_config() {
    let config = ServerConfig {
        no_edge: 999.0,
        ..ServerConfig::default()
    };
    let app = build_app(&config);
    let request = json!({
        "adjacencyList": [[0, 999, 5], [NO, 0, NO], [NO, 1, 0]],
        "source": 1,
        "target": 2
    });
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([1, 3, 2]));
}

#[tokio::test]
async fn test_map_lifecycle() {
    let app = app();

    let (status, saved) = send(
        &app,
        Method::POST,
        "/api/map",
        Some(json!({"mapName": "campus", "map": [[0, 1], [1, 0]]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["id"], json!(1));
    assert_eq!(saved["mapName"], "campus");
    assert_eq!(saved["nodeMap"], json!([[0, 1], [1, 0]]));

    let (status, maps) = send(&app, Method::GET, "/api/getMaps", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(maps.as_array().unwrap().len(), 1);

    let (status, one) = send(&app, Method::GET, "/api/getMaps/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["mapName"], "campus");

    let (status, body) = send(&app, Method::DELETE, "/api/deleteMap/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Map deleted successfully.");

    let (status, body) = send(&app, Method::DELETE, "/api/deleteMap/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Map not found.");

    let (status, _) = send(&app, Method::GET, "/api/getMaps/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ids are not reused after a delete
    let (_, saved) = send(
        &app,
        Method::POST,
        "/api/map",
        Some(json!({"mapName": "second", "map": {}})),
    )
    .await;
    assert_eq!(saved["id"], json!(2));
}

#[test]
fn test_map_store_ids_and_len() {
    let mut store = MapStore::new();
    assert!(store.is_empty());

    let first = store.insert("a".to_string(), json!([[0]]));
    let second = store.insert("b".to_string(), json!([[0]]));
    assert_eq!((first.id, second.id), (1, 2));
    assert_eq!(store.len(), 2);

    assert!(store.remove(1).is_some());
    assert!(store.remove(1).is_none());
    assert_eq!(store.len(), 1);
    assert_eq!(store.insert("c".to_string(), json!({})).id, 3);

    let names: Vec<String> = store.list().into_iter().map(|m| m.map_name).collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[tokio::test]
async fn test_save_map_requires_fields() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/map", Some(json!({"mapName": "x"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing 'map' or 'mapName' key in request data.");
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_cors_preflight_allows_configured_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/dijkstra")
        .header(header::ORIGIN, "http://127.0.0.1:4000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://127.0.0.1:4000"
    );
}

#[test]
fn test_config_defaults() {
    let config = ServerConfig::default();

    assert_eq!(config.port, 8199);
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8199");
    assert_eq!(config.allowed_origins, vec!["http://127.0.0.1:4000".to_string()]);
    assert_eq!(config.no_edge, NO);
    assert!(config.enable_cors);
    assert_eq!(config.static_dir, None);
}

#[test]
fn test_config_from_lookup() {
    let config = ServerConfig::from_lookup(|key| match key {
        "ROUTE_HOST" => Some("127.0.0.1".to_string()),
        "ROUTE_PORT" => Some("9000".to_string()),
        "ROUTE_ALLOWED_ORIGINS" => Some("http://a.test, http://b.test".to_string()),
        "ROUTE_NO_EDGE" => Some("-1".to_string()),
        "ROUTE_ENABLE_CORS" => Some("false".to_string()),
        "ROUTE_STATIC_DIR" => Some("web".to_string()),
        _ => None,
    });

    assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
    assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    assert_eq!(config.no_edge, -1.0);
    assert!(!config.enable_cors);
    assert_eq!(config.static_dir.as_deref(), Some("web"));
}

#[test]
fn test_config_ignores_bad_values() {
    let config = ServerConfig::from_lookup(|key| match key {
        "ROUTE_PORT" => Some("not-a-port".to_string()),
        _ => None,
    });

    assert_eq!(config.port, 8199);
}

#[test]
fn test_config_ignores_non_finite_no_edge() {
    for raw in ["NaN", "inf", "-inf"] {
        let config = ServerConfig::from_lookup(|key| match key {
            "ROUTE_NO_EDGE" => Some(raw.to_string()),
            _ => None,
        });
        assert_eq!(config.no_edge, NO, "ROUTE_NO_EDGE={}", raw);
    }
}

#[tokio::test]
async fn test_negative_no_edge_config() {
    let config = ServerConfig {
        no_edge: -1.0,
        ..ServerConfig::default()
    };
    let app = build_app(&config);
    let request = json!({
        "adjacencyList": [[0, 1, -1], [-1, 0, 1], [-1, -1, 0]],
        "source": 1,
        "target": 3
    });
    let (status, body) = send(&app, Method::POST, "/api/dijkstra", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([1, 2, 3]));
}
