//! Mapping of sheet columns and rows onto the terminal.
//!
//! Column widths come from a bounded window of rows starting at the row
//! scroll offset, so the cost of a plan depends on the terminal size and
//! never on how large the sheet is.

use std::ops::Range;

use crate::display::natural_width;
use crate::error::ViewError;
use crate::workbook::WorkbookModel;

/// Lines reserved above and below the data rows (header + status)
pub const CHROME_LINES: usize = 2;

/// Columns between two adjacent cells
pub const SEPARATOR_WIDTH: usize = 1;

/// Terminal dimensions in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalSize {
    pub width: usize,
    pub height: usize,
}

impl TerminalSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Rows available for sheet data; never less than one
    pub fn body_rows(&self) -> usize {
        self.height.saturating_sub(CHROME_LINES).max(1)
    }
}

/// Tunables for column sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub min_column_width: usize,
    pub max_column_width: usize,
    /// Upper bound on rows inspected per column
    pub sample_rows: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_column_width: 4,
            max_column_width: 40,
            sample_rows: 64,
        }
    }
}

/// One visible column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    pub index: usize,
    pub width: usize,
}

/// Visible columns and rows for one render cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub columns: Vec<ColumnSlot>,
    pub rows: Range<usize>,
    /// Width of the row-label strip, separator included
    pub gutter_width: usize,
}

impl LayoutPlan {
    pub fn contains_column(&self, col: usize) -> bool {
        self.columns.iter().any(|slot| slot.index == col)
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }
}

/// Row labels are right-aligned 1-based numbers followed by a separator
pub fn gutter_width(row_count: usize) -> usize {
    let digits = row_count.max(1).to_string().len();
    digits.max(3) + SEPARATOR_WIDTH
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnLayoutEngine {
    config: LayoutConfig,
}

impl ColumnLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        // A max below the min would make every width the max
        let config = LayoutConfig {
            min_column_width: config.min_column_width.max(1),
            max_column_width: config.max_column_width.max(config.min_column_width.max(1)),
            sample_rows: config.sample_rows.max(1),
        };
        Self { config }
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Rows whose content sizes the columns for a given scroll position
    fn sample_window(&self, row_count: usize, row_offset: usize, size: TerminalSize) -> Range<usize> {
        let start = row_offset.min(row_count);
        let len = size.body_rows().min(self.config.sample_rows);
        start..(start + len).min(row_count)
    }

    /// Width of column `col`, sized from the rows in `sample`
    pub fn column_width<M: WorkbookModel + ?Sized>(
        &self,
        model: &M,
        sheet: usize,
        col: usize,
        sample: Range<usize>,
    ) -> Result<usize, ViewError> {
        let mut widest = 0;
        for row in sample {
            let cell = model.cell_at(sheet, row, col)?;
            widest = widest.max(natural_width(&cell.value));
        }
        Ok(widest.clamp(self.config.min_column_width, self.config.max_column_width))
    }

    /// Compute the visible columns starting at `col_offset` and the visible
    /// rows starting at `row_offset`.
    ///
    /// Whenever the sheet has a column at `col_offset`, that column is part of
    /// the plan, clipped to the space left after the gutter if necessary.
    pub fn plan<M: WorkbookModel + ?Sized>(
        &self,
        model: &M,
        sheet: usize,
        row_offset: usize,
        col_offset: usize,
        size: TerminalSize,
    ) -> Result<LayoutPlan, ViewError> {
        let info = model.sheet_info(sheet)?;
        let gutter = gutter_width(info.row_count);
        let available = size.width.saturating_sub(gutter);
        let first_row = row_offset.min(info.row_count);
        let rows = first_row..(first_row + size.body_rows()).min(info.row_count);
        let sample = self.sample_window(info.row_count, row_offset, size);

        let mut columns = Vec::new();
        let mut used = 0;
        for col in col_offset..info.column_count {
            let width = self.column_width(model, sheet, col, sample.clone())?;
            let footprint = width + SEPARATOR_WIDTH;
            if used + footprint > available {
                if columns.is_empty() {
                    let clipped = available.saturating_sub(SEPARATOR_WIDTH).max(1);
                    columns.push(ColumnSlot { index: col, width: clipped });
                }
                break;
            }
            used += footprint;
            columns.push(ColumnSlot { index: col, width });
        }

        Ok(LayoutPlan {
            columns,
            rows,
            gutter_width: gutter,
        })
    }

    /// Smallest column offset from which `col` is visible in a plan sized
    /// with the rows at `row_offset`
    pub fn first_visible_offset_for<M: WorkbookModel + ?Sized>(
        &self,
        model: &M,
        sheet: usize,
        col: usize,
        row_offset: usize,
        size: TerminalSize,
    ) -> Result<usize, ViewError> {
        let info = model.sheet_info(sheet)?;
        if col >= info.column_count {
            return Err(ViewError::col_out_of_range(col, info.column_count));
        }
        let available = size.width.saturating_sub(gutter_width(info.row_count));
        let sample = self.sample_window(info.row_count, row_offset, size);

        let mut offset = col;
        let mut used = self.column_width(model, sheet, col, sample.clone())? + SEPARATOR_WIDTH;
        while offset > 0 {
            let footprint = self.column_width(model, sheet, offset - 1, sample.clone())? + SEPARATOR_WIDTH;
            if used + footprint > available {
                break;
            }
            used += footprint;
            offset -= 1;
        }
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::sheet::Sheet;
    use crate::workbook::Workbook;

    fn workbook(sheet: Sheet) -> Workbook {
        Workbook::from_sheets("Test", vec![sheet]).unwrap()
    }

    fn engine() -> ColumnLayoutEngine {
        ColumnLayoutEngine::new(LayoutConfig {
            min_column_width: 4,
            max_column_width: 10,
            sample_rows: 64,
        })
    }

    #[test]
    fn test_body_rows() {
        assert_eq!(TerminalSize::new(80, 24).body_rows(), 22);
        assert_eq!(TerminalSize::new(80, 2).body_rows(), 1);
        assert_eq!(TerminalSize::new(80, 0).body_rows(), 1);
    }

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(0), 4);
        assert_eq!(gutter_width(999), 4);
        assert_eq!(gutter_width(1000), 5);
        assert_eq!(gutter_width(123_456), 7);
    }

    #[test]
    fn test_widths_clamped() {
        let wb = workbook(
            Sheet::with_extents("S", 3, 3)
                .with_cell(0, 0, Cell::text("ab"))
                .with_cell(1, 1, Cell::text("abcdefg"))
                .with_cell(2, 2, Cell::text("a long piece of text")),
        );
        let plan = engine().plan(&wb, 0, 0, 0, TerminalSize::new(80, 10)).unwrap();

        let widths: Vec<_> = plan.columns.iter().map(|s| s.width).collect();
        assert_eq!(widths, vec![4, 7, 10]);
        assert_eq!(plan.rows, 0..3);
        assert_eq!(plan.gutter_width, 4);
    }

    #[test]
    fn test_greedy_stops_before_overflow() {
        let wb = workbook(Sheet::with_extents("S", 5, 20));
        // gutter 4, then 5 columns per slot: 4 + 5 * 3 = 19 fits in 20, a fourth does not
        let plan = engine().plan(&wb, 0, 0, 0, TerminalSize::new(20, 10)).unwrap();
        assert_eq!(plan.columns.len(), 3);

        let plan = engine().plan(&wb, 0, 0, 0, TerminalSize::new(24, 10)).unwrap();
        assert_eq!(plan.columns.len(), 4);
    }

    #[test]
    fn test_always_one_column() {
        let wb = workbook(Sheet::with_extents("S", 5, 3).with_cell(0, 1, Cell::text("wide value here")));
        for width in [0, 1, 3, 5, 7] {
            let plan = engine().plan(&wb, 0, 0, 1, TerminalSize::new(width, 10)).unwrap();
            assert_eq!(plan.columns.len(), 1, "width {width}");
            assert_eq!(plan.columns[0].index, 1);
            assert!(plan.columns[0].width >= 1);
        }
    }

    #[test]
    fn test_offset_beyond_columns_is_empty() {
        let wb = workbook(Sheet::with_extents("S", 5, 3));
        let plan = engine().plan(&wb, 0, 0, 3, TerminalSize::new(80, 10)).unwrap();
        assert!(plan.columns.is_empty());
    }

    #[test]
    fn test_row_range() {
        let wb = workbook(Sheet::with_extents("S", 100, 2));
        let plan = engine().plan(&wb, 0, 95, 0, TerminalSize::new(80, 12)).unwrap();
        assert_eq!(plan.rows, 95..100);

        let plan = engine().plan(&wb, 0, 10, 0, TerminalSize::new(80, 12)).unwrap();
        assert_eq!(plan.rows, 10..20);
        assert!(plan.contains_row(19));
        assert!(!plan.contains_row(20));
    }

    #[test]
    fn test_sample_window_bounded() {
        // The wide cell is far below the sampled window and must not widen the column
        let wb = workbook(
            Sheet::with_extents("S", 10_000, 1).with_cell(9_000, 0, Cell::text("very wide text")),
        );
        let plan = engine().plan(&wb, 0, 0, 0, TerminalSize::new(80, 20)).unwrap();
        assert_eq!(plan.columns[0].width, 4);

        let plan = engine().plan(&wb, 0, 8_995, 0, TerminalSize::new(80, 20)).unwrap();
        assert_eq!(plan.columns[0].width, 10);
    }

    #[test]
    fn test_plan_is_deterministic() {
        let wb = workbook(Sheet::with_extents("S", 50, 30).with_cell(3, 4, Cell::number(12345.0)));
        let first = engine().plan(&wb, 0, 0, 2, TerminalSize::new(60, 20)).unwrap();
        for _ in 0..3 {
            assert_eq!(engine().plan(&wb, 0, 0, 2, TerminalSize::new(60, 20)).unwrap(), first);
        }
    }

    #[test]
    fn test_first_visible_offset() {
        let wb = workbook(Sheet::with_extents("S", 5, 20));
        let size = TerminalSize::new(20, 10);
        // Three 5-column slots fit, so column 7 is visible from offset 5 onwards
        let offset = engine().first_visible_offset_for(&wb, 0, 7, 0, size).unwrap();
        assert_eq!(offset, 5);
        let plan = engine().plan(&wb, 0, 0, offset, size).unwrap();
        assert!(plan.contains_column(7));
        assert_eq!(engine().first_visible_offset_for(&wb, 0, 1, 0, size).unwrap(), 0);
        assert!(engine().first_visible_offset_for(&wb, 0, 20, 0, size).is_err());
    }

    #[test]
    fn test_config_normalized() {
        let engine = ColumnLayoutEngine::new(LayoutConfig {
            min_column_width: 0,
            max_column_width: 0,
            sample_rows: 0,
        });
        let config = engine.config();
        assert_eq!(config.min_column_width, 1);
        assert_eq!(config.max_column_width, 1);
        assert_eq!(config.sample_rows, 1);
    }

    #[test]
    fn test_invalid_sheet() {
        let wb = workbook(Sheet::with_extents("S", 5, 3));
        assert!(engine().plan(&wb, 1, 0, 0, TerminalSize::new(80, 10)).is_err());
    }
}
