use std::time::Duration;

use clap::Parser;
use services::{SimulatorConfig, SimulatorConfigError};

/// Browse the course catalog and track watch progress from a terminal.
#[derive(Debug, Parser)]
#[command(name = "elearn", version)]
pub struct Args {
    /// SQLite database holding saved progress.
    #[arg(long = "db", env = "LEARN_DB_URL", default_value = "sqlite://elearn.sqlite3")]
    pub db_url: String,

    /// Milliseconds between simulated progress ticks.
    #[arg(
        long,
        env = "LEARN_TICK_MS",
        default_value_t = 1_000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Progress added on every tick.
    #[arg(
        long,
        env = "LEARN_TICK_INCREMENT",
        default_value_t = SimulatorConfig::DEFAULT_INCREMENT,
        value_parser = parse_increment,
        allow_negative_numbers = true
    )]
    pub increment: f64,

    /// Log filter directive; falls back to `RUST_LOG`, then `info`.
    #[arg(long, env = "LEARN_LOG")]
    pub log: Option<String>,
}

impl Args {
    /// # Errors
    ///
    /// Returns `SimulatorConfigError` for an increment that slipped past the
    /// argument parser.
    pub fn simulator_config(&self) -> Result<SimulatorConfig, SimulatorConfigError> {
        SimulatorConfig::new(Duration::from_millis(self.tick_ms), self.increment)
    }

    #[must_use]
    pub fn database_url(&self) -> String {
        normalize_sqlite_url(self.db_url.clone())
    }
}

fn parse_increment(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{raw} is not a positive number"));
    }
    Ok(value)
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// The repository creates the database file itself, but not its directory.
pub fn prepare_sqlite_dir(db_url: &str) -> anyhow::Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow::anyhow!("invalid --db value: {db_url}"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        anyhow::bail!("invalid --db value: {db_url}");
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
