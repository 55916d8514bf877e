//! # KnitCraft Storefront Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration from the environment
//! 3. Open the database, run migrations, seed the admin account
//! 4. Serve HTTP until shutdown
//!
//! The actual setup is in lib.rs so the router can be driven from tests.

use tracing::info;

use knitcraft_storefront::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    knitcraft_storefront::init_tracing();

    info!("Starting KnitCraft Store");
    let config = AppConfig::load()?;

    knitcraft_storefront::run(config).await
}
