mod config;
mod terminal;

use anyhow::Context;
use clap::Parser;
use learn_core::Catalog;
use services::{AppServices, AppState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::{Args, prepare_sqlite_dir};
use crate::terminal::{HELP, Input, InputError};

fn setup_logging(directive: Option<&str>) {
    let filter = directive
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn print_screen(state: &AppState, query: &str) -> anyhow::Result<()> {
    let snapshot = state.snapshot().await;
    let mut screen = String::new();
    terminal::render(&mut screen, &snapshot, state.catalog(), query)?;
    println!("{screen}");
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.log.as_deref());

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    let db_url = args.database_url();
    let simulator = args.simulator_config()?;
    prepare_sqlite_dir(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, Catalog::sample(), simulator)
        .await
        .with_context(|| format!("failed to open progress database at {db_url}"))?;
    tracing::info!(db = %db_url, "progress database ready");

    let mut state = services.app_state();
    let mut query = String::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_screen(&state, &query).await?;
    while let Some(line) = lines.next_line().await? {
        match terminal::parse_line(&line, state.catalog()) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(Input::Status) => {}
            Ok(Input::Search(text)) => query = text,
            Ok(Input::Command(command)) => {
                if let Err(err) = state.dispatch(command).await {
                    println!("! {err}");
                    continue;
                }
            }
            Err(InputError::Empty) => continue,
            Err(err) => {
                println!("! {err}");
                continue;
            }
        }
        print_screen(&state, &query).await?;
    }

    state.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
