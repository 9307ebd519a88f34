//! Print the variables a config struct reads as JSON

use envbind::EnvBind;

#[derive(Debug, Default, EnvBind)]
struct Tls {
    #[env = "TLS_CERT,file"]
    pub cert: String,

    #[env = "TLS_ENABLED,omitempty"]
    pub enabled: String,
}

#[derive(Debug, Default, EnvBind)]
struct Config {
    pub listen_port: u16,
    pub ratio: f64,

    #[env(flatten)]
    pub tls: Tls,
}

fn main() -> anyhow::Result<()> {
    let specs = envbind::describe(&mut Config::default())?;
    println!("{}", serde_json::to_string_pretty(&specs)?);
    Ok(())
}
