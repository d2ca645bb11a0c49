use axum::{
    http::{header, Method},
    Router,
};
use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::web::api::{create_router, AppState};

/// Configuration for the web server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: [u8; 4],
    pub port: u16,
    pub enable_cors: bool,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [127, 0, 0, 1],
            port: 8080,
            enable_cors: true,
            max_sessions: 1000,
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `SOLVER_HOST`, `SOLVER_PORT`, `SOLVER_MAX_SESSIONS`
    /// and `SOLVER_CORS`. Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = parse_var(&lookup, "SOLVER_HOST", |value| {
            value.parse::<std::net::Ipv4Addr>().ok().map(|addr| addr.octets())
        }) {
            config.host = host;
        }
        if let Some(port) = parse_var(&lookup, "SOLVER_PORT", |value| value.parse().ok()) {
            config.port = port;
        }
        if let Some(max_sessions) =
            parse_var(&lookup, "SOLVER_MAX_SESSIONS", |value| value.parse().ok().filter(|&n: &usize| n > 0))
        {
            config.max_sessions = max_sessions;
        }
        if let Some(enable_cors) = parse_var(&lookup, "SOLVER_CORS", |value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }) {
            config.enable_cors = enable_cors;
        }

        config
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn parse_var<F, T, P>(lookup: &F, key: &str, parse: P) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    let value = lookup(key)?;
    let parsed = parse(value.trim());
    if parsed.is_none() {
        warn!("Ignoring invalid {}={:?}", key, value);
    }
    parsed
}

/// Build the application router with middleware
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState::new(config.max_sessions);
    let mut app = create_router().with_state(app_state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);

        app = app.layer(ServiceBuilder::new().layer(cors).into_inner());
    }

    app
}

/// Start the web server with the given configuration
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);

    let addr = config.addr();
    info!("Shortest path solver listening on http://{}", addr);
    info!("Max sessions: {}, CORS enabled: {}", config.max_sessions, config.enable_cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
