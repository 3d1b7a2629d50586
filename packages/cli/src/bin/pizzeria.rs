use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

use pizzeria_cli::config::Config;

#[derive(Parser)]
#[command(name = "pizzeria")]
#[command(about = "Pizzeria - manage toppings and pizzas from the browser")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        #[arg(long, help = "Address to listen on (overrides PIZZERIA_HOST)")]
        host: Option<String>,
        #[arg(long, help = "Port to listen on (overrides PIZZERIA_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "SQLite database file (overrides PIZZERIA_DATABASE_PATH)")]
        database: Option<PathBuf>,
    },
    /// Apply database migrations and exit
    Migrate {
        #[arg(long, help = "SQLite database file (overrides PIZZERIA_DATABASE_PATH)")]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    pizzeria_cli::init_tracing();

    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve {
            host,
            port,
            database,
        } => {
            let config = Config::from_env()?.with_overrides(host, port, database)?;
            pizzeria_cli::run_server(config).await
        }
        Commands::Migrate { database } => {
            let config = Config::from_env()?.with_overrides(None, None, database)?;
            pizzeria_cli::run_migrations(&config).await
        }
    }
}
