use std::path::PathBuf;

use clap::{Parser, Subcommand};

use taskboard::config::{DEFAULT_API_URL, DEFAULT_ORIGIN, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "taskboard", about = "Small task tracker with a JSON API and a terminal client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create database and tables (idempotent)
    Init {
        /// Path to the SQLite database [default: ~/.taskboard/tasks.db]
        #[arg(long, env = "TASKBOARD_DB")]
        db: Option<String>,
    },

    /// Serve the task API over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Origin allowed to make cross-origin requests
        #[arg(long, env = "FRONTEND_URL", default_value = DEFAULT_ORIGIN)]
        origin: String,
        /// Path to the SQLite database [default: ~/.taskboard/tasks.db]
        #[arg(long, env = "TASKBOARD_DB")]
        db: Option<String>,
    },

    /// Launch the interactive terminal client
    Ui {
        /// Base URL of the task API
        #[arg(long, env = "TASKBOARD_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,
        /// Write client logs to this file
        #[arg(long, env = "TASKBOARD_LOG_FILE")]
        log_file: Option<PathBuf>,
    },
}
