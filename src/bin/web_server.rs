use log::{info, warn};
use shortest_path_solver::web::server::{start_server, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ServerConfig::from_env();

    // A positional port argument wins over SOLVER_PORT
    if let Some(arg) = env::args().nth(1) {
        match arg.parse() {
            Ok(port) => config.port = port,
            Err(_) => warn!("Ignoring invalid port argument {:?}, using {}", arg, config.port),
        }
    }

    info!("Starting shortest path solver with {:?}", config);

    start_server(config).await
}
