use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

fn builder() -> Builder {
    Builder::from_env(Env::default().default_filter_or("info"))
}

/// Log to stderr. `RUST_LOG` overrides the default `info` filter.
pub fn init_stderr() {
    builder().init();
}

/// Log into `path` instead of the terminal, for the interactive client.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    builder().target(Target::Pipe(Box::new(file))).init();
    Ok(())
}
