//! `refseek status` — Show resolved configuration and capabilities.

use refseek_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let capabilities = config.capabilities();

    println!("📚 RefSeek Status");
    println!("=================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Model:        {}", config.model);
    println!("  Temperature:  {}", config.temperature);
    println!(
        "  Gateway:      {}:{}",
        config.gateway.host, config.gateway.port
    );
    println!(
        "  Index:        {}",
        if capabilities.index_configured {
            "configured"
        } else {
            "not configured (test mode)"
        }
    );
    println!(
        "  Enhancement:  {}",
        if capabilities.completion_configured {
            "enabled"
        } else {
            "disabled (search-only)"
        }
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `refseek onboard` first");
    }

    Ok(())
}
