//! `refseek serve` — Start the HTTP chat gateway.

use refseek_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("📚 RefSeek Gateway");
    println!(
        "   Chat UI: http://{}:{}/",
        config.gateway.host, config.gateway.port
    );

    refseek_gateway::start(config).await?;

    Ok(())
}
