use std::io;
use std::path::PathBuf;

use sheetview_core::ViewError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("minimum column width {min} exceeds maximum {max}")]
    ColumnWidthBounds { min: usize, max: usize },

    #[error("no workbook given: pass a path or set SHEETVIEW_FILE")]
    MissingFile,

    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
