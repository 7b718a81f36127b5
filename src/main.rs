//! Grid automata CLI - pick an automaton from a menu and watch it evolve.

use std::io;
use std::path::PathBuf;

use grid_automata::{
    menu::{Menu, MenuOutcome},
    schema::MenuConfig,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        eprintln!("Usage: {} [config.json]", args[0]);
        eprintln!();
        eprintln!("Run a cellular automaton chosen from an interactive menu.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Construction parameters (default: built-in values)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        return;
    }

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    let config = match args.get(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            MenuConfig::from_json_file(&path).unwrap_or_else(|e| {
                eprintln!("Error loading config {}: {}", path.display(), e);
                std::process::exit(1);
            })
        }
        None => MenuConfig::default(),
    };

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout().lock(), config);

    match menu.run() {
        Ok(MenuOutcome::Ran {
            kind,
            steps,
            generation,
        }) => {
            log::info!("{} finished {steps} steps at generation {generation}", kind.label());
        }
        Ok(MenuOutcome::InvalidChoice(choice)) => log::info!("No automaton for choice {choice}"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_example_config() {
    let config = MenuConfig {
        random_seed: Some(42),
        ..Default::default()
    };
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}
