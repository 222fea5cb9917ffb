use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::ViewError;
use crate::sheet::Sheet;

/// Name and declared extents of one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetInfo<'a> {
    pub name: &'a str,
    pub row_count: usize,
    pub column_count: usize,
}

impl SheetInfo<'_> {
    /// A sheet with no addressable cell has nothing to navigate
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.column_count == 0
    }
}

/// Read-only view of parsed workbook data.
///
/// The render loop queries this every frame instead of caching, so every
/// read must be side-effect free and return the same answer each time.
pub trait WorkbookModel {
    fn sheet_count(&self) -> usize;

    /// Fails with `OutOfRange` for an invalid sheet index
    fn sheet_info(&self, index: usize) -> Result<SheetInfo<'_>, ViewError>;

    /// Returns the empty cell for unpopulated coordinates; fails with
    /// `OutOfRange` outside the sheet's declared extents
    fn cell_at(&self, sheet: usize, row: usize, col: usize) -> Result<&Cell, ViewError>;
}

/// A workbook containing one or more sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workbook {
    /// Workbook name (usually the file name)
    #[serde(default)]
    pub name: String,
    sheets: Vec<Sheet>,
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Workbook {
    /// Create a new workbook with one empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sheets: vec![Sheet::new("Sheet1")],
        }
    }

    /// Build a workbook from loaded sheets
    pub fn from_sheets(name: impl Into<String>, sheets: Vec<Sheet>) -> Result<Self, ViewError> {
        let mut workbook = Self {
            name: name.into(),
            sheets: Vec::with_capacity(sheets.len()),
        };
        for sheet in sheets {
            workbook.add_sheet(sheet)?;
        }
        if workbook.sheets.is_empty() {
            return Err(ViewError::EmptyWorkbook);
        }
        Ok(workbook)
    }

    /// Append a sheet; names must be unique
    pub fn add_sheet(&mut self, mut sheet: Sheet) -> Result<usize, ViewError> {
        if self.sheets.iter().any(|s| s.name == sheet.name) {
            return Err(ViewError::DuplicateSheetName(sheet.name));
        }
        sheet.fit_extents();
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Get a sheet by index
    pub fn get_sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get the index of a sheet by name
    pub fn get_sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    fn sheet(&self, index: usize) -> Result<&Sheet, ViewError> {
        self.sheets
            .get(index)
            .ok_or_else(|| ViewError::sheet_out_of_range(index, self.sheets.len()))
    }

    /// Serialize the workbook to JSON
    pub fn to_json(&self) -> Result<String, ViewError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize a workbook from JSON
    pub fn from_json(json: &str) -> Result<Self, ViewError> {
        let raw: Workbook = serde_json::from_str(json)?;
        Self::from_sheets(raw.name, raw.sheets)
    }

    /// Deserialize a workbook from a JSON stream
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ViewError> {
        let raw: Workbook = serde_json::from_reader(reader)?;
        Self::from_sheets(raw.name, raw.sheets)
    }
}

impl WorkbookModel for Workbook {
    fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    fn sheet_info(&self, index: usize) -> Result<SheetInfo<'_>, ViewError> {
        let sheet = self.sheet(index)?;
        Ok(SheetInfo {
            name: &sheet.name,
            row_count: sheet.row_count(),
            column_count: sheet.column_count(),
        })
    }

    fn cell_at(&self, sheet: usize, row: usize, col: usize) -> Result<&Cell, ViewError> {
        self.sheet(sheet)?.cell(row, col)
    }
}
