use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::HeaderValue;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api/tasks";

fn default_db_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".taskboard").join("tasks.db"))
}

/// Use the explicit path if one was given, else `~/.taskboard/tasks.db`.
pub fn resolve_db_path(db: Option<String>) -> Result<String> {
    match db {
        Some(p) => Ok(p),
        None => {
            let path = default_db_path()?;
            Ok(path
                .to_str()
                .context("default DB path is not valid UTF-8")?
                .to_string())
        }
    }
}

pub fn ensure_db_dir(db_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub origin: HeaderValue,
    pub db_path: String,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, origin: &str, db: Option<String>) -> Result<Self> {
        let ip: IpAddr = host
            .parse()
            .with_context(|| format!("invalid listen host '{host}'"))?;
        let origin = HeaderValue::from_str(origin)
            .with_context(|| format!("invalid allowed origin '{origin}'"))?;
        Ok(Self {
            addr: SocketAddr::new(ip, port),
            origin,
            db_path: resolve_db_path(db)?,
        })
    }
}
