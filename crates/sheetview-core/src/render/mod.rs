//! Frame composition.
//!
//! [`Renderer::render`] is a pure function of the model, the viewport state
//! and the terminal size; [`Renderer::draw`] additionally writes the result
//! through an [`OutputSink`], which is the only side effect in the core.

pub mod frame;
pub mod sink;

pub use frame::Frame;
pub use sink::{OutputSink, TextSink};

use crate::coord::{col_to_label, CellCoord};
use crate::display::{fit_text, CellFormatter, Span, StyledText};
use crate::error::ViewError;
use crate::layout::{ColumnLayoutEngine, LayoutPlan, TerminalSize, CHROME_LINES, SEPARATOR_WIDTH};
use crate::state::ViewportState;
use crate::style::{Attributes, Capabilities, Color, HorizontalAlign};
use crate::workbook::{SheetInfo, WorkbookModel};

/// Attributes for the parts of the screen that are not cell content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: Attributes,
    /// Header label and row number of the cursor's column and row
    pub header_active: Attributes,
    pub gutter: Attributes,
    /// Laid over the cursor cell's own attributes
    pub cursor: Attributes,
    pub status: Attributes,
}

impl Theme {
    pub fn new(caps: Capabilities) -> Self {
        Self {
            header: Attributes::bold(),
            header_active: Attributes {
                bold: true,
                reverse: true,
                ..Attributes::PLAIN
            },
            gutter: Attributes {
                fg: caps.map_color(Color::rgb(128, 128, 128)),
                ..Attributes::PLAIN
            },
            cursor: Attributes::reversed(),
            status: Attributes::reversed(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Capabilities::default())
    }
}

/// `top` wins where it sets a color; flags accumulate
fn overlay(base: Attributes, top: Attributes) -> Attributes {
    Attributes {
        fg: top.fg.or(base.fg),
        bg: top.bg.or(base.bg),
        bold: base.bold || top.bold,
        italic: base.italic || top.italic,
        underline: base.underline || top.underline,
        reverse: base.reverse || top.reverse,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    layout: ColumnLayoutEngine,
    formatter: CellFormatter,
    theme: Theme,
}

impl Renderer {
    pub fn new(layout: ColumnLayoutEngine, formatter: CellFormatter, theme: Theme) -> Self {
        Self {
            layout,
            formatter,
            theme,
        }
    }

    pub fn layout(&self) -> &ColumnLayoutEngine {
        &self.layout
    }

    /// Compose the frame for `state` on a terminal of `size`
    pub fn render<M: WorkbookModel + ?Sized>(
        &self,
        model: &M,
        state: &ViewportState,
        size: TerminalSize,
    ) -> Result<Frame, ViewError> {
        let sheet = state.active_sheet();
        let info = model.sheet_info(sheet)?;
        let plan = self
            .layout
            .plan(model, sheet, state.row_offset(), state.col_offset(), size)?;

        // Status first, then header, then data rows while the height allows
        let status = match size.height {
            0 => None,
            _ => Some(self.status_line(model, &info, state, size.width)?),
        };
        let header = (size.height >= CHROME_LINES).then(|| self.header_line(&plan, state).fit(size.width));

        let body = size.height.saturating_sub(CHROME_LINES);
        let mut rows = Vec::with_capacity(body);
        for row in plan.rows.clone().take(body) {
            rows.push(self.data_line(model, &plan, state, row)?.fit(size.width));
        }
        while rows.len() < body {
            rows.push(StyledText::new().fit(size.width));
        }

        Ok(Frame {
            width: size.width,
            header,
            rows,
            status,
        })
    }

    /// Render and write the frame. A full repaint clears the screen first;
    /// otherwise the frame is painted over the previous one.
    pub fn draw<M: WorkbookModel + ?Sized, S: OutputSink + ?Sized>(
        &self,
        model: &M,
        state: &ViewportState,
        size: TerminalSize,
        sink: &mut S,
        full: bool,
    ) -> Result<Frame, ViewError> {
        let frame = self.render(model, state, size)?;
        present(&frame, sink, full)?;
        Ok(frame)
    }

    fn header_line(&self, plan: &LayoutPlan, state: &ViewportState) -> StyledText {
        let mut line = StyledText::new();
        line.push(Span::new(" ".repeat(plan.gutter_width), self.theme.gutter));
        for slot in &plan.columns {
            let attrs = if slot.index == state.cursor().col {
                self.theme.header_active
            } else {
                self.theme.header
            };
            let label = fit_text(&col_to_label(slot.index), slot.width, HorizontalAlign::Center);
            line.push(Span::new(label, attrs));
            line.push(Span::plain(" ".repeat(SEPARATOR_WIDTH)));
        }
        line
    }

    fn data_line<M: WorkbookModel + ?Sized>(
        &self,
        model: &M,
        plan: &LayoutPlan,
        state: &ViewportState,
        row: usize,
    ) -> Result<StyledText, ViewError> {
        let cursor = state.cursor();
        let mut line = StyledText::new();

        let label_attrs = if row == cursor.row {
            self.theme.header_active
        } else {
            self.theme.gutter
        };
        let label_width = plan.gutter_width - SEPARATOR_WIDTH;
        let label = fit_text(&(row + 1).to_string(), label_width, HorizontalAlign::Right);
        line.push(Span::new(label, label_attrs));
        line.push(Span::plain(" ".repeat(SEPARATOR_WIDTH)));

        for slot in &plan.columns {
            let cell = model.cell_at(state.active_sheet(), row, slot.index)?;
            let mut text = self.formatter.format(cell, slot.width, None);
            if row == cursor.row && slot.index == cursor.col {
                text = highlight(text, self.theme.cursor);
            }
            line.append(text);
            line.push(Span::plain(" ".repeat(SEPARATOR_WIDTH)));
        }
        Ok(line)
    }

    fn status_line<M: WorkbookModel + ?Sized>(
        &self,
        model: &M,
        info: &SheetInfo<'_>,
        state: &ViewportState,
        width: usize,
    ) -> Result<StyledText, ViewError> {
        let sheet = state.active_sheet();
        let mut status = format!(" {} [{}/{}]", info.name, sheet + 1, model.sheet_count());

        if info.is_empty() {
            status.push_str("  (empty sheet)");
        } else {
            let cursor = state.cursor();
            let coord = CellCoord::new(cursor.row, cursor.col);
            status.push_str(&format!(
                "  {}  row {}/{}  col {}/{}",
                coord.to_a1(),
                cursor.row + 1,
                info.row_count,
                cursor.col + 1,
                info.column_count
            ));
            let cell = model.cell_at(sheet, cursor.row, cursor.col)?;
            if !cell.value.is_empty() {
                status.push_str("  = ");
                status.push_str(&cell.value.as_text());
            }
        }

        let text = fit_text(&status, width, HorizontalAlign::Left);
        Ok(StyledText::from_span(Span::new(text, self.theme.status)))
    }
}

fn highlight(text: StyledText, cursor: Attributes) -> StyledText {
    let mut out = StyledText::new();
    for span in text.spans() {
        out.push(Span::new(span.text.clone(), overlay(span.attrs, cursor)));
    }
    out
}

/// Write a composed frame through `sink`
pub fn present<S: OutputSink + ?Sized>(frame: &Frame, sink: &mut S, full: bool) -> Result<(), ViewError> {
    if full {
        sink.clear_screen()?;
    } else {
        sink.begin_frame()?;
    }
    for line in frame.lines() {
        sink.write_line(line)?;
    }
    sink.flush()?;
    Ok(())
}
