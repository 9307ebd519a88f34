//! Nested and flattened structs

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Db {
    #[env = "DB_HOST"]
    pub host: String,

    #[env = "DB_PORT"]
    pub port: u16,
}

#[derive(Debug, Default, EnvBind)]
struct Service {
    #[env = "SERVICE_DEBUG"]
    pub debug: bool,
}

#[derive(Debug, Default, EnvBind)]
struct Config {
    // Walked recursively; inner fields keep their own tags
    pub db: Db,

    // Fields promoted to this level
    #[env(flatten)]
    pub service: Service,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DB_HOST", "localhost");
    std::env::set_var("DB_PORT", "5432");
    std::env::set_var("SERVICE_DEBUG", "t");

    let mut config = Config::default();
    envbind::parse(&mut config)?;

    println!("DB Host: {}", config.db.host);
    println!("DB Port: {}", config.db.port);
    println!("Service Debug: {}", config.service.debug);

    Ok(())
}
