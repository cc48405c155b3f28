use hostal_server::{Config, Server, ServerState, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    hostal_server::init_logger_with_file(Some(&config.log_level), None);

    print_banner();
    tracing::info!("Hostal server starting...");

    // 2. Initialize server state (stores, services, optional seed data)
    let state = ServerState::initialize(&config).await;

    // 3. Run the HTTP server (background sweeper starts inside run())
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
