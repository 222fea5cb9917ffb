use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error values a cell can hold (Excel-compatible codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellError {
    /// #DIV/0! - Division by zero
    DivisionByZero,
    /// #VALUE! - Invalid value type
    InvalidValue,
    /// #REF! - Invalid cell reference
    InvalidReference,
    /// #NAME? - Unrecognized function or name
    InvalidName,
    /// #NULL! - Null intersection
    NullError,
    /// #NUM! - Invalid numeric value
    NumError,
    /// #N/A - Value not available
    NotAvailable,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            CellError::DivisionByZero => "#DIV/0!",
            CellError::InvalidValue => "#VALUE!",
            CellError::InvalidReference => "#REF!",
            CellError::InvalidName => "#NAME?",
            CellError::NullError => "#NULL!",
            CellError::NumError => "#NUM!",
            CellError::NotAvailable => "#N/A",
        };
        f.write_str(code)
    }
}

/// Errors raised by the viewer core
#[derive(Error, Debug)]
pub enum ViewError {
    /// A sheet, row or column index outside the declared extents
    #[error("{what} index {index} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    #[error("sheet name already in use: {0}")]
    DuplicateSheetName(String),

    #[error("workbook contains no sheets")]
    EmptyWorkbook,

    #[error("invalid workbook JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The output sink or event source failed; ends the session
    #[error("terminal I/O error: {0}")]
    Output(#[from] std::io::Error),
}

impl ViewError {
    pub fn sheet_out_of_range(index: usize, count: usize) -> Self {
        ViewError::OutOfRange {
            what: "sheet",
            index,
            limit: count,
        }
    }

    pub fn row_out_of_range(index: usize, count: usize) -> Self {
        ViewError::OutOfRange {
            what: "row",
            index,
            limit: count,
        }
    }

    pub fn col_out_of_range(index: usize, count: usize) -> Self {
        ViewError::OutOfRange {
            what: "column",
            index,
            limit: count,
        }
    }

    /// Whether this is a contract violation rather than an I/O failure
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ViewError::OutOfRange { .. })
    }
}
