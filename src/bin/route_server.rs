use shortest_route::web::server::{start_server, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut config = ServerConfig::from_env();

    // A positional port argument wins over ROUTE_PORT
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config.port = port,
            Err(err) => log::warn!("ignoring port argument {:?}: {}", arg, err),
        }
    }

    log::info!("Configuration:");
    log::info!("  address:        {}", config.socket_addr());
    log::info!("  CORS enabled:   {}", config.enable_cors);
    log::info!("  allowed origins: {:?}", config.allowed_origins);
    log::info!("  no-edge value:  {}", config.no_edge);

    start_server(config).await
}
