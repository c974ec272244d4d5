use clap::Parser;
use std::io::IsTerminal;
use std::process;

use sales_analytics::{run, Cli, FilterMode};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = cli.to_config();
    let catalog = config.catalog.build();

    // Prompt only when nothing was given on the command line and a human is there
    let filters = if cli.wants_prompt() && std::io::stdin().is_terminal() {
        FilterMode::Interactive
    } else {
        FilterMode::Fixed(cli.filter_criteria())
    };

    match run(&config, catalog.as_ref(), filters) {
        // Failed writes were already reported by the run itself
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            eprintln!("\n   ✗ CRITICAL ERROR: {:#}", e);
            process::exit(1);
        }
    }
}
