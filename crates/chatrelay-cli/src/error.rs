use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);

    let msg = err.to_string().to_lowercase();

    if msg.contains("api key not found") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Add your key to the [chatgpt] section of the config file:");
        eprintln!("  {} key = \"sk-...\"", "$".dimmed());
        eprintln!("  or export it:");
        eprintln!("  {} export OPENAI_API_KEY=<value>", "$".dimmed());
    }

    if msg.contains("invalid proxy url") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the proxy setting, e.g. proxy = \"http://127.0.0.1:7890\"");
    }

    std::process::exit(1);
}
