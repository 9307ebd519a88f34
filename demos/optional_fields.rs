//! Example demonstrating `omitempty`

use envbind::{EnvBind, EnvError};

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Required
    pub database_url: String,

    // Optional: left empty when REDIS_URL is unset
    #[env = "REDIS_URL,omitempty"]
    pub redis_url: String,

    // Optional, but an unset numeric variable still fails coercion
    #[env = "POOL_SIZE,omitempty"]
    pub pool_size: u32,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DATABASE_URL", "postgres://localhost/db");
    std::env::remove_var("REDIS_URL");
    std::env::remove_var("POOL_SIZE");

    match envbind::from_env::<Config>() {
        Err(EnvError::Coercion { key, source, .. }) => {
            println!("{key} is optional but empty values are not numbers: {source}");
        }
        other => {
            other?;
        }
    }

    std::env::set_var("POOL_SIZE", "16");
    let config: Config = envbind::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Redis URL: {:?}", config.redis_url);
    println!("  Pool size: {}", config.pool_size);

    Ok(())
}
