/// A cell position in the active sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Navigation state of one viewing session: which sheet is shown, where the
/// cursor is, and which row/column is at the top-left of the grid.
///
/// Only the viewport controller mutates this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    pub(crate) active_sheet: usize,
    pub(crate) cursor_row: usize,
    pub(crate) cursor_col: usize,
    pub(crate) row_offset: usize,
    pub(crate) col_offset: usize,
}

impl ViewportState {
    /// Session start: first sheet, cursor and scroll at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state on another sheet
    pub(crate) fn on_sheet(sheet: usize) -> Self {
        Self {
            active_sheet: sheet,
            ..Self::default()
        }
    }

    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    pub fn cursor(&self) -> CellPosition {
        CellPosition::new(self.cursor_row, self.cursor_col)
    }

    /// First visible row and column
    pub fn scroll_position(&self) -> CellPosition {
        CellPosition::new(self.row_offset, self.col_offset)
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Put cursor and scroll back at the origin, keeping the sheet
    pub(crate) fn reset_position(&mut self) {
        *self = Self::on_sheet(self.active_sheet);
    }

    /// Shift the row offset by the minimum amount that shows the cursor row
    pub(crate) fn ensure_row_visible(&mut self, visible_rows: usize) {
        let visible_rows = visible_rows.max(1);
        if self.cursor_row < self.row_offset {
            self.row_offset = self.cursor_row;
        } else if self.cursor_row >= self.row_offset + visible_rows {
            self.row_offset = self.cursor_row + 1 - visible_rows;
        }
    }

    /// Pull the row offset back so the grid never scrolls past the last row
    pub(crate) fn clamp_row_offset(&mut self, row_count: usize, visible_rows: usize) {
        let max_offset = row_count.saturating_sub(visible_rows.max(1));
        self.row_offset = self.row_offset.min(max_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(cursor_row: usize, row_offset: usize) -> ViewportState {
        ViewportState {
            cursor_row,
            row_offset,
            ..ViewportState::default()
        }
    }

    #[test]
    fn test_viewport_state_new() {
        let state = ViewportState::new();
        assert_eq!(state.active_sheet(), 0);
        assert_eq!(state.cursor(), CellPosition::origin());
        assert_eq!(state.scroll_position(), CellPosition::origin());
    }

    #[test]
    fn test_ensure_row_visible_already_visible() {
        let mut s = state(15, 10);
        s.ensure_row_visible(20);
        assert_eq!(s.row_offset(), 10);
    }

    #[test]
    fn test_ensure_row_visible_above() {
        let mut s = state(5, 10);
        s.ensure_row_visible(20);
        assert_eq!(s.row_offset(), 5);
    }

    #[test]
    fn test_ensure_row_visible_below() {
        let mut s = state(35, 10);
        s.ensure_row_visible(20);
        assert_eq!(s.row_offset(), 16);
    }

    #[test]
    fn test_clamp_row_offset() {
        let mut s = state(95, 95);
        s.clamp_row_offset(100, 10);
        assert_eq!(s.row_offset(), 90);

        let mut s = state(3, 3);
        s.clamp_row_offset(5, 10);
        assert_eq!(s.row_offset(), 0);
    }

    #[test]
    fn test_reset_keeps_sheet() {
        let mut s = ViewportState {
            active_sheet: 2,
            cursor_row: 4,
            cursor_col: 7,
            row_offset: 1,
            col_offset: 3,
        };
        s.reset_position();
        assert_eq!(s, ViewportState::on_sheet(2));
    }
}
