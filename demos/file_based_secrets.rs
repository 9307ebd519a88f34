//! Example demonstrating the `file` option for mounted secrets

use envbind::EnvBind;
use std::io::Write;

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Reads API_KEY, or the file named by API_KEY_FILE
    #[env = "API_KEY,file"]
    pub api_key: String,

    // Reads DB_PASSWORD, or the file named by DB_PASSWORD_FILE
    #[env = "DB_PASSWORD,file"]
    pub db_password: String,
}

fn main() -> anyhow::Result<()> {
    // Local development: direct environment variable
    std::env::set_var("API_KEY", "dev-api-key");

    // Production: secret mounted as a file
    let mut secret = tempfile::NamedTempFile::new()?;
    writeln!(secret, "s3cr3t")?;
    std::env::remove_var("DB_PASSWORD");
    std::env::set_var("DB_PASSWORD_FILE", secret.path());

    let config: Config = envbind::from_env()?;

    println!("Configuration loaded:");
    println!("  API Key: {}", config.api_key);
    println!("  DB Password: {} chars", config.db_password.len());

    Ok(())
}
