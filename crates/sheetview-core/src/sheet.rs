use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cell::{Cell, EMPTY_CELL};
use crate::coord::CellCoord;
use crate::error::ViewError;

/// A single sheet with declared extents and sparse cell storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    /// Sheet name (displayed in the status line)
    pub name: String,
    #[serde(default)]
    row_count: usize,
    #[serde(default)]
    column_count: usize,
    /// Only non-empty cells are stored
    #[serde(default, with = "cell_map_serde")]
    cells: BTreeMap<CellCoord, Cell>,
}

/// Cells serialize as a map keyed by `"row,col"`; A1 keys are accepted on input
mod cell_map_serde {
    use super::*;
    use serde::ser::SerializeMap;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(cells: &BTreeMap<CellCoord, Cell>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(cells.len()))?;
        for (coord, cell) in cells {
            map.serialize_entry(&coord.to_key(), cell)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<CellCoord, Cell>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellMapVisitor;

        impl<'de> de::Visitor<'de> for CellMapVisitor {
            type Value = BTreeMap<CellCoord, Cell>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with \"row,col\" or A1 keys")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let mut cells = BTreeMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    let cell: Cell = map.next_value()?;
                    let coord = CellCoord::from_key(&key)
                        .filter(|c| c.row.checked_add(1).is_some() && c.col.checked_add(1).is_some())
                        .ok_or_else(|| de::Error::custom(format!("invalid cell key: {key}")))?;
                    if !cell.is_empty() {
                        cells.insert(coord, cell);
                    }
                }

                Ok(cells)
            }
        }

        deserializer.deserialize_map(CellMapVisitor)
    }
}

impl Sheet {
    /// Create a new empty sheet (0 rows, 0 columns)
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_extents(name, 0, 0)
    }

    /// Create an empty sheet with declared extents
    pub fn with_extents(name: impl Into<String>, row_count: usize, column_count: usize) -> Self {
        Self {
            name: name.into(),
            row_count,
            column_count,
            cells: BTreeMap::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Store a cell, growing the extents to cover it.
    /// Used while loading; the viewer never mutates a loaded sheet.
    pub fn set_cell(&mut self, coord: CellCoord, cell: Cell) {
        if cell.is_empty() {
            self.cells.remove(&coord);
            return;
        }
        self.row_count = self.row_count.max(coord.row.saturating_add(1));
        self.column_count = self.column_count.max(coord.col.saturating_add(1));
        self.cells.insert(coord, cell);
    }

    /// Builder form of [`Sheet::set_cell`]
    pub fn with_cell(mut self, row: usize, col: usize, cell: Cell) -> Self {
        self.set_cell(CellCoord::new(row, col), cell);
        self
    }

    /// Look up a cell; unpopulated coordinates inside the extents are empty
    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, ViewError> {
        if row >= self.row_count {
            return Err(ViewError::row_out_of_range(row, self.row_count));
        }
        if col >= self.column_count {
            return Err(ViewError::col_out_of_range(col, self.column_count));
        }
        Ok(self
            .cells
            .get(&CellCoord::new(row, col))
            .unwrap_or(&EMPTY_CELL))
    }

    /// Grow the declared extents so every stored cell is addressable
    pub(crate) fn fit_extents(&mut self) {
        for coord in self.cells.keys() {
            self.row_count = self.row_count.max(coord.row.saturating_add(1));
            self.column_count = self.column_count.max(coord.col.saturating_add(1));
        }
    }
}
