mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use taskboard::client::HttpClient;
use taskboard::config::{ensure_db_dir, resolve_db_path, ServerConfig};
use taskboard::{db, logging, server, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init { db } => {
            let db_path = resolve_db_path(db)?;
            ensure_db_dir(&db_path)?;
            let conn = db::open(&db_path)?;
            db::init(&conn)?;
            eprintln!("Initialized {db_path}");
        }

        Command::Serve {
            host,
            port,
            origin,
            db,
        } => {
            logging::init_stderr();
            let config = ServerConfig::new(&host, port, &origin, db)?;
            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(server::serve(config))?;
        }

        Command::Ui { api_url, log_file } => {
            if let Some(path) = &log_file {
                logging::init_file(path)?;
            }
            let api = HttpClient::new(&api_url)?;
            tui::run(&api)?;
        }
    }

    Ok(())
}
