//! Basic usage example

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Required field: loaded from DATABASE_URL (derived from the field name)
    pub database_url: String,

    // Explicit variable name
    #[env = "LISTEN_ADDR"]
    pub server_addr: String,

    // Numeric type
    pub max_connections: u32,

    // Boolean type ("true", "t", "1", ...)
    pub debug_mode: bool,

    // Optional: left empty when LOG_FILTER is unset
    #[env = "LOG_FILTER,omitempty"]
    pub log_filter: String,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("LISTEN_ADDR", "0.0.0.0:3000");
    std::env::set_var("MAX_CONNECTIONS", "10");
    std::env::set_var("DEBUG_MODE", "false");

    // Load configuration
    let config: Config = envbind::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Log Filter: {:?}", config.log_filter);

    Ok(())
}
