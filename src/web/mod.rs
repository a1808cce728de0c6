pub mod api;
pub mod models;
pub mod server;
pub mod store;

pub use api::{create_router, ApiError, AppState};
pub use server::{build_app, start_server, ServerConfig};
