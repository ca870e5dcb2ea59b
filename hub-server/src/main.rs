use hub_server::{Config, Server, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    print_banner();

    tracing::info!("Marketplace hub server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Server state (work dir, database, services)
    let server = Server::new(config).await?;

    // 4. Serve until shutdown
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
