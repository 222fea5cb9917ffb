use std::path::PathBuf;

use sheetview::config::Config;
use sheetview::{init_tracing, run};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(&config)?;

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    run(&config, path)?;

    tracing::info!("viewer closed");
    Ok(())
}
