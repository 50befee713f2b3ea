use inventoryhub_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env, logging)
    dotenv::dotenv().ok();
    init_logger();

    print_banner();

    tracing::info!("InventoryHub server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (MongoDB connection, JWT service)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
