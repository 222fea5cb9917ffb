use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::CellError;
use crate::style::CellStyle;

/// Represents the value stored in a cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(CellError),
}

impl CellValue {
    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The natural textual representation, before any width fitting
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Number(n) => Cow::Owned(format_number(*n)),
            CellValue::Text(s) => Cow::Borrowed(s),
            CellValue::Boolean(b) => Cow::Borrowed(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Error(e) => Cow::Owned(e.to_string()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        // Integral and well inside i64, so the cast is exact
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A single immutable cell: a value plus optional styling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: CellValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<CellStyle>,
}

/// Shared empty cell handed out for unpopulated coordinates
pub(crate) static EMPTY_CELL: Cell = Cell::EMPTY;

impl Cell {
    pub const EMPTY: Cell = Cell {
        value: CellValue::Empty,
        style: None,
    };

    pub fn new(value: CellValue) -> Self {
        Cell { value, style: None }
    }

    /// Create a cell with a number value
    pub fn number(value: f64) -> Self {
        Cell::new(CellValue::Number(value))
    }

    /// Create a cell with a text value
    pub fn text(value: impl Into<String>) -> Self {
        Cell::new(CellValue::Text(value.into()))
    }

    /// Create a cell with a boolean value
    pub fn boolean(value: bool) -> Self {
        Cell::new(CellValue::Boolean(value))
    }

    /// Create a cell holding an error value
    pub fn error(error: CellError) -> Self {
        Cell::new(CellValue::Error(error))
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Check if the cell is empty (empty value and no style)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.style.is_none()
    }
}
