pub mod config;
pub mod error;
pub mod keys;
pub mod terminal;

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use sheetview_core::{
    CellFormatter, ColumnLayoutEngine, InputDispatcher, Renderer, Session, Theme, Workbook,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::keys::CrosstermEvents;
use crate::terminal::{CrosstermSink, TerminalGuard};

/// Install the log subscriber. The terminal belongs to the viewer, so logs
/// only go to the configured file; without one they are discarded.
pub fn init_tracing(config: &Config) -> Result<(), AppError> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::Open {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Read a workbook from a JSON file
pub fn load_workbook(path: &Path) -> Result<Workbook, AppError> {
    let file = File::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let workbook = Workbook::from_reader(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        sheets = ?workbook.sheet_names(),
        "workbook loaded"
    );
    Ok(workbook)
}

pub fn build_renderer(config: &Config) -> Renderer {
    let caps = config.capabilities();
    Renderer::new(
        ColumnLayoutEngine::new(config.layout),
        CellFormatter::new(caps),
        Theme::new(caps),
    )
}

/// Open the workbook at `path` (or the configured one) and run the viewer
/// until the user quits
pub fn run(config: &Config, path: Option<PathBuf>) -> Result<(), AppError> {
    let path = path
        .or_else(|| config.file.clone())
        .ok_or(AppError::MissingFile)?;
    let workbook = load_workbook(&path)?;
    let renderer = build_renderer(config);
    let dispatcher = InputDispatcher::new(config.vim_keys);

    let _guard = TerminalGuard::enter()?;
    let size = terminal::size()?;
    let mut session = Session::new(&workbook, renderer, dispatcher, size);

    let stdout = io::stdout();
    session.run(CrosstermEvents, CrosstermSink::new(BufWriter::new(stdout.lock())))?;
    Ok(())
}
