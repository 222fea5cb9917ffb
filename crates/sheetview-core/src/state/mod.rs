pub mod input;
pub mod viewport;

pub use input::{Command, InputDispatcher, InputEvent, Key, Modifiers};
pub use viewport::{CellPosition, ViewportState};

use tracing::debug;

use crate::error::ViewError;
use crate::layout::{ColumnLayoutEngine, TerminalSize};
use crate::workbook::WorkbookModel;

/// Outcome of applying one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; repaint what differs
    Changed,
    /// Nothing to do
    Unchanged,
    /// Repaint the whole screen (resize, explicit redraw)
    Repaint,
    /// Stop the session
    Quit,
}

/// Applies navigation commands to the session's viewport state.
///
/// After every successful command the cursor addresses a cell inside the
/// active sheet's extents and sits inside the visible window on both axes.
/// Sheets without any cell keep the cursor at the origin.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    state: ViewportState,
    layout: ColumnLayoutEngine,
}

impl ViewportController {
    pub fn new(layout: ColumnLayoutEngine) -> Self {
        Self {
            state: ViewportState::new(),
            layout,
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Apply `command` for a terminal of `size`. On error the state is left
    /// as it was.
    pub fn apply<M: WorkbookModel + ?Sized>(
        &mut self,
        model: &M,
        command: Command,
        size: TerminalSize,
    ) -> Result<Transition, ViewError> {
        let before = self.state;
        match command {
            Command::Quit => return Ok(Transition::Quit),
            Command::NoOp => return Ok(Transition::Unchanged),
            Command::Redraw => return Ok(Transition::Repaint),
            Command::Resize(new_size) => {
                debug!(width = new_size.width, height = new_size.height, "terminal resized");
                self.update(model, new_size, |_, _| {})?;
                return Ok(Transition::Repaint);
            }
            Command::SwitchSheet(index) => self.switch_sheet(model, index)?,
            Command::NextSheet => {
                let count = model.sheet_count();
                if count > 1 {
                    self.switch_sheet(model, (self.state.active_sheet + 1) % count)?;
                }
            }
            Command::PreviousSheet => {
                let count = model.sheet_count();
                if count > 1 {
                    self.switch_sheet(model, (self.state.active_sheet + count - 1) % count)?;
                }
            }
            Command::MoveCursor { rows, cols } => self.update(model, size, |s, extents| {
                s.cursor_row = step(s.cursor_row, rows, extents.0);
                s.cursor_col = step(s.cursor_col, cols, extents.1);
            })?,
            Command::PageDown => {
                let page = size.body_rows();
                self.update(model, size, |s, (row_count, _)| {
                    s.cursor_row = (s.cursor_row + page).min(row_count - 1);
                    s.row_offset = (s.row_offset + page).min(row_count.saturating_sub(page));
                })?
            }
            Command::PageUp => {
                let page = size.body_rows();
                self.update(model, size, |s, _| {
                    s.cursor_row = s.cursor_row.saturating_sub(page);
                    s.row_offset = s.row_offset.saturating_sub(page);
                })?
            }
            Command::RowStart => self.update(model, size, |s, _| s.cursor_col = 0)?,
            Command::RowEnd => self.update(model, size, |s, (_, cols)| s.cursor_col = cols - 1)?,
            Command::Top => self.update(model, size, |s, _| s.cursor_row = 0)?,
            Command::Bottom => self.update(model, size, |s, (rows, _)| s.cursor_row = rows - 1)?,
        }

        Ok(if self.state == before {
            Transition::Unchanged
        } else {
            Transition::Changed
        })
    }

    /// Run `mutate` on a copy of the state with the active sheet's non-zero
    /// extents, scroll the copy so its cursor is visible, then commit it.
    /// On an empty sheet nothing moves.
    fn update<M, F>(&mut self, model: &M, size: TerminalSize, mutate: F) -> Result<(), ViewError>
    where
        M: WorkbookModel + ?Sized,
        F: FnOnce(&mut ViewportState, (usize, usize)),
    {
        let info = model.sheet_info(self.state.active_sheet)?;
        let mut next = self.state;
        if info.is_empty() {
            next.reset_position();
            self.state = next;
            return Ok(());
        }

        mutate(&mut next, (info.row_count, info.column_count));

        let visible_rows = size.body_rows();
        next.ensure_row_visible(visible_rows);
        next.clamp_row_offset(info.row_count, visible_rows);

        if next.cursor_col < next.col_offset {
            next.col_offset = next.cursor_col;
        } else {
            let sheet = next.active_sheet;
            let plan = self
                .layout
                .plan(model, sheet, next.row_offset, next.col_offset, size)?;
            if !plan.contains_column(next.cursor_col) {
                next.col_offset = self.layout.first_visible_offset_for(
                    model,
                    sheet,
                    next.cursor_col,
                    next.row_offset,
                    size,
                )?;
            }
        }

        self.state = next;
        Ok(())
    }

    fn switch_sheet<M: WorkbookModel + ?Sized>(&mut self, model: &M, index: usize) -> Result<(), ViewError> {
        let count = model.sheet_count();
        if index >= count {
            return Err(ViewError::sheet_out_of_range(index, count));
        }
        if index != self.state.active_sheet {
            debug!(from = self.state.active_sheet, to = index, "switching sheet");
            self.state = ViewportState::on_sheet(index);
        }
        Ok(())
    }
}

/// Move `index` by `delta`, clamped to `[0, len - 1]`
fn step(index: usize, delta: isize, len: usize) -> usize {
    index.saturating_add_signed(delta).min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::layout::LayoutConfig;
    use crate::sheet::Sheet;
    use crate::workbook::Workbook;

    /// 10 data rows: 10 body rows + header + status
    const SIZE: TerminalSize = TerminalSize::new(40, 12);

    fn workbook() -> Workbook {
        Workbook::from_sheets(
            "Test",
            vec![
                Sheet::with_extents("Big", 100, 5),
                Sheet::with_extents("Wide", 20, 50).with_cell(3, 10, Cell::text("wider than the rest")),
                Sheet::new("Empty"),
            ],
        )
        .unwrap()
    }

    fn controller() -> ViewportController {
        ViewportController::new(ColumnLayoutEngine::new(LayoutConfig::default()))
    }

    fn apply(c: &mut ViewportController, wb: &Workbook, command: Command) -> Transition {
        c.apply(wb, command, SIZE).unwrap()
    }

    fn assert_visible(c: &ViewportController, wb: &Workbook, size: TerminalSize) {
        let s = c.state();
        let info = wb.sheet_info(s.active_sheet()).unwrap();
        if info.is_empty() {
            assert_eq!(s.cursor(), CellPosition::origin());
            assert_eq!(s.scroll_position(), CellPosition::origin());
            return;
        }
        let cursor = s.cursor();
        assert!(cursor.row < info.row_count && cursor.col < info.column_count);

        let plan = ColumnLayoutEngine::new(LayoutConfig::default())
            .plan(wb, s.active_sheet(), s.row_offset(), s.col_offset(), size)
            .unwrap();
        assert!(plan.contains_row(cursor.row), "row {cursor:?} not in {:?}", plan.rows);
        assert!(plan.contains_column(cursor.col), "col {cursor:?} not in {:?}", plan.columns);
    }

    #[test]
    fn test_move_down() {
        let wb = workbook();
        let mut c = controller();
        assert_eq!(apply(&mut c, &wb, Command::DOWN), Transition::Changed);
        assert_eq!(c.state().cursor(), CellPosition::new(1, 0));
    }

    #[test]
    fn test_move_clamped_at_origin() {
        let wb = workbook();
        let mut c = controller();
        assert_eq!(apply(&mut c, &wb, Command::UP), Transition::Unchanged);
        assert_eq!(apply(&mut c, &wb, Command::LEFT), Transition::Unchanged);
        assert_eq!(c.state().cursor(), CellPosition::origin());
    }

    #[test]
    fn test_move_clamped_at_extents() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::MoveCursor { rows: 1_000, cols: 1_000 });
        assert_eq!(c.state().cursor(), CellPosition::new(99, 4));
        assert_eq!(c.state().row_offset(), 90);
        assert_visible(&c, &wb, SIZE);
    }

    #[test]
    fn test_scrolls_minimally() {
        let wb = workbook();
        let mut c = controller();
        for _ in 0..10 {
            apply(&mut c, &wb, Command::DOWN);
        }
        assert_eq!(c.state().cursor().row, 10);
        assert_eq!(c.state().row_offset(), 1);

        for _ in 0..10 {
            apply(&mut c, &wb, Command::UP);
        }
        assert_eq!(c.state().cursor().row, 0);
        assert_eq!(c.state().row_offset(), 0);
    }

    #[test]
    fn test_page_down_three_times() {
        let wb = workbook();
        let mut c = controller();
        for _ in 0..3 {
            apply(&mut c, &wb, Command::PageDown);
        }
        assert_eq!(c.state().cursor().row, 30);
        assert_eq!(c.state().row_offset(), 30);
        assert_visible(&c, &wb, SIZE);
    }

    #[test]
    fn test_page_down_clamped() {
        let wb = workbook();
        let mut c = controller();
        for _ in 0..20 {
            apply(&mut c, &wb, Command::PageDown);
        }
        assert_eq!(c.state().cursor().row, 99);
        assert_eq!(c.state().row_offset(), 90);
        assert_eq!(apply(&mut c, &wb, Command::PageDown), Transition::Unchanged);
    }

    #[test]
    fn test_page_up() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::MoveCursor { rows: 45, cols: 0 });
        apply(&mut c, &wb, Command::PageUp);
        assert_eq!(c.state().cursor().row, 35);
        assert_visible(&c, &wb, SIZE);

        for _ in 0..5 {
            apply(&mut c, &wb, Command::PageUp);
        }
        assert_eq!(c.state().cursor().row, 0);
        assert_eq!(c.state().row_offset(), 0);
    }

    #[test]
    fn test_row_start_end_top_bottom() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::RowEnd);
        assert_eq!(c.state().cursor(), CellPosition::new(0, 4));
        apply(&mut c, &wb, Command::Bottom);
        assert_eq!(c.state().cursor(), CellPosition::new(99, 4));
        apply(&mut c, &wb, Command::RowStart);
        assert_eq!(c.state().cursor(), CellPosition::new(99, 0));
        apply(&mut c, &wb, Command::Top);
        assert_eq!(c.state().cursor(), CellPosition::new(0, 0));
        assert_eq!(c.state().row_offset(), 0);
    }

    #[test]
    fn test_horizontal_scroll() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::SwitchSheet(1));
        for _ in 0..12 {
            apply(&mut c, &wb, Command::RIGHT);
            assert_visible(&c, &wb, SIZE);
        }
        assert_eq!(c.state().cursor().col, 12);
        assert!(c.state().col_offset() > 0);

        apply(&mut c, &wb, Command::RowStart);
        assert_eq!(c.state().col_offset(), 0);
    }

    #[test]
    fn test_empty_sheet_navigation_is_noop() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::SwitchSheet(2));
        for command in [
            Command::DOWN,
            Command::RIGHT,
            Command::MoveCursor { rows: 5, cols: -3 },
            Command::PageDown,
            Command::PageUp,
            Command::RowEnd,
            Command::Bottom,
        ] {
            assert_eq!(apply(&mut c, &wb, command), Transition::Unchanged);
            assert_eq!(c.state().cursor(), CellPosition::origin());
        }
    }

    #[test]
    fn test_switch_sheet_resets() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::MoveCursor { rows: 40, cols: 3 });
        assert_eq!(apply(&mut c, &wb, Command::SwitchSheet(1)), Transition::Changed);
        assert_eq!(*c.state(), ViewportState::on_sheet(1));
    }

    #[test]
    fn test_redundant_switch_is_idempotent() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::SwitchSheet(1));
        apply(&mut c, &wb, Command::DOWN);
        let before = *c.state();

        assert_eq!(apply(&mut c, &wb, Command::SwitchSheet(1)), Transition::Unchanged);
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_switch_out_of_range() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::DOWN);
        let before = *c.state();

        let err = c.apply(&wb, Command::SwitchSheet(3), SIZE).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_next_previous_sheet_wrap() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::PreviousSheet);
        assert_eq!(c.state().active_sheet(), 2);
        apply(&mut c, &wb, Command::NextSheet);
        assert_eq!(c.state().active_sheet(), 0);
        apply(&mut c, &wb, Command::NextSheet);
        assert_eq!(c.state().active_sheet(), 1);
    }

    #[test]
    fn test_next_sheet_single_sheet() {
        let wb = Workbook::new("One");
        let mut c = controller();
        assert_eq!(c.apply(&wb, Command::NextSheet, SIZE).unwrap(), Transition::Unchanged);
    }

    #[test]
    fn test_quit_redraw_noop() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::DOWN);
        let before = *c.state();

        assert_eq!(apply(&mut c, &wb, Command::Quit), Transition::Quit);
        assert_eq!(apply(&mut c, &wb, Command::Redraw), Transition::Repaint);
        assert_eq!(apply(&mut c, &wb, Command::NoOp), Transition::Unchanged);
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn test_resize_keeps_cursor_visible() {
        let wb = workbook();
        let mut c = controller();
        apply(&mut c, &wb, Command::MoveCursor { rows: 9, cols: 0 });
        assert_eq!(c.state().row_offset(), 0);

        let small = TerminalSize::new(40, 5);
        let transition = c.apply(&wb, Command::Resize(small), small).unwrap();
        assert_eq!(transition, Transition::Repaint);
        assert_eq!(c.state().cursor().row, 9);
        assert_eq!(c.state().row_offset(), 7);
        assert_visible(&c, &wb, small);

        // Growing again pulls the window back instead of showing blank rows
        let tall = TerminalSize::new(40, 200);
        c.apply(&wb, Command::Resize(tall), tall).unwrap();
        assert_eq!(c.state().row_offset(), 0);
    }

    #[test]
    fn test_invariant_over_command_sequences() {
        let wb = workbook();
        let commands = [
            Command::DOWN,
            Command::RIGHT,
            Command::MoveCursor { rows: 7, cols: 3 },
            Command::MoveCursor { rows: -4, cols: -9 },
            Command::PageDown,
            Command::PageUp,
            Command::RowEnd,
            Command::RowStart,
            Command::Bottom,
            Command::Top,
            Command::NextSheet,
            Command::PreviousSheet,
            Command::SwitchSheet(1),
            Command::SwitchSheet(7),
            Command::Redraw,
            Command::NoOp,
        ];
        let sizes = [
            TerminalSize::new(40, 12),
            TerminalSize::new(3, 3),
            TerminalSize::new(120, 50),
        ];

        for size in sizes {
            let mut c = controller();
            // Simple LCG so the walk is long but reproducible
            let mut seed: u64 = 0x5eed;
            for _ in 0..2_000 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let command = commands[(seed >> 33) as usize % commands.len()];
                let before = *c.state();
                match c.apply(&wb, command, size) {
                    Ok(_) => {}
                    Err(err) => {
                        assert!(err.is_out_of_range());
                        assert_eq!(*c.state(), before);
                    }
                }
                assert_visible(&c, &wb, size);
            }
        }
    }

    #[test]
    fn test_step() {
        assert_eq!(step(0, -1, 5), 0);
        assert_eq!(step(3, 1, 5), 4);
        assert_eq!(step(4, 1, 5), 4);
        assert_eq!(step(2, isize::MIN, 5), 0);
        assert_eq!(step(2, isize::MAX, 5), 4);
    }
}
