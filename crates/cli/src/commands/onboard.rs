//! `refseek onboard` — First-time setup.

use refseek_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("📚 RefSeek — First-Time Setup");
    println!("=============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("  Config file exists: {}", config_path.display());
        println!("  Leaving it untouched.");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Wrote default config: {}", config_path.display());
    }

    println!();
    println!("Next steps:");
    println!("  1. Set REFSEEK_INDEX_URL to your retrieval index endpoint");
    println!("  2. Set OPENAI_API_KEY (optional — enables LLM explanations)");
    println!("  3. Run `refseek chat` or `refseek serve`");

    Ok(())
}
