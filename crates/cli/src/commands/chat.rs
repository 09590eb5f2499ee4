//! `refseek chat` — Interactive or single-message chat mode.

use refseek_agent::{ConversationAgent, ResponseEnhancer, ResultAggregator};
use refseek_config::AppConfig;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let capabilities = config.capabilities();

    if !capabilities.index_configured {
        eprintln!();
        eprintln!("  NOTE: No document index configured — running in test mode.");
        eprintln!("  Set REFSEEK_INDEX_URL (or index.base_url in the config file)");
        eprintln!("  to retrieve real papers.");
        eprintln!();
    }

    if !capabilities.completion_configured {
        eprintln!("  NOTE: No API key configured — responses are raw search reports.");
        eprintln!("  Set OPENAI_API_KEY or REFSEEK_API_KEY to enable LLM explanations.");
        eprintln!();
    }

    let index = refseek_index::build_from_config(&config);
    let completion = refseek_providers::build_from_config(&config);

    let aggregator = ResultAggregator::new(index);
    let enhancer = completion.map(ResponseEnhancer::new);
    let mut agent = ConversationAgent::new(aggregator, enhancer);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Searching...");
        let response = agent.chat(&msg).await;
        eprint!("\r              \r");
        println!("{response}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║       RefSeek — Interactive Research Chat    ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!(
        "  Index:        {}",
        if capabilities.index_configured {
            "connected"
        } else {
            "not connected (test mode)"
        }
    );
    println!(
        "  Enhancement:  {}",
        if capabilities.completion_configured {
            config.model.as_str()
        } else {
            "disabled (search-only)"
        }
    );
    println!();
    println!("  Example topics:");
    for topic in ConversationAgent::suggestions().iter().take(4) {
        println!("    • {topic}");
    }
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type 'clear' to reset history, 'exit' or Ctrl+C to quit.");
    println!();

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("  You > ");
        use std::io::Write;
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let input = line.trim();
        match input {
            "" => continue,
            "exit" | "quit" => break,
            "clear" => {
                agent.clear_history();
                println!("  History cleared.");
                println!();
                continue;
            }
            _ => {}
        }

        eprint!("  ...");
        let response = agent.chat(input).await;
        eprint!("\r     \r");

        println!();
        for response_line in response.lines() {
            println!("  Assistant > {response_line}");
        }
        println!();
    }

    Ok(())
}
