use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
};

use crate::graph::DEFAULT_NO_EDGE;
use crate::web::api::{create_router, AppState};

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory served for non-API paths, if any
    pub static_dir: Option<String>,
    pub enable_cors: bool,
    /// Origins allowed by CORS; `*` allows any
    pub allowed_origins: Vec<String>,
    /// Matrix value meaning "no edge"
    pub no_edge: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8199,
            static_dir: None,
            enable_cors: true,
            allowed_origins: vec!["http://127.0.0.1:4000".to_string()],
            no_edge: DEFAULT_NO_EDGE,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `ROUTE_*` environment variables.
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = parse_var(&lookup, "ROUTE_HOST") {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "ROUTE_PORT") {
            config.port = port;
        }
        if let Some(enable_cors) = parse_var(&lookup, "ROUTE_ENABLE_CORS") {
            config.enable_cors = enable_cors;
        }
        match parse_var::<f64, _>(&lookup, "ROUTE_NO_EDGE") {
            Some(no_edge) if no_edge.is_finite() => config.no_edge = no_edge,
            Some(no_edge) => {
                log::warn!("ignoring ROUTE_NO_EDGE={}: not a finite number", no_edge)
            }
            None => {}
        }
        if let Some(dir) = lookup("ROUTE_STATIC_DIR").filter(|d| !d.trim().is_empty()) {
            config.static_dir = Some(dir);
        }
        if let Some(origins) = lookup("ROUTE_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("ignoring {}={:?}: {}", key, raw, err);
            None
        }
    }
}

/// CORS policy for the configured origins
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(err) => {
                    log::warn!("ignoring CORS origin {:?}: {}", origin, err);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the application with middleware
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState::new(config.no_edge);

    let mut app = Router::new()
        // API routes
        .merge(create_router())
        .with_state(app_state);

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    if config.enable_cors {
        app = app.layer(
            ServiceBuilder::new()
                .layer(cors_layer(config))
                .into_inner(),
        );
    }

    app
}

/// Start the web server and run until Ctrl-C
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);
    let addr = config.socket_addr();

    log::info!("Route server listening on http://{}", addr);
    log::info!("  - Shortest path: POST http://{}/api/dijkstra", addr);
    log::info!("  - Health:        GET  http://{}/api/health", addr);
    if let Some(dir) = &config.static_dir {
        log::info!("  - Static files from {}", dir);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Route server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
