pub mod cell;
pub mod coord;
pub mod display;
pub mod error;
pub mod layout;
pub mod render;
pub mod session;
pub mod sheet;
pub mod state;
pub mod style;
pub mod workbook;

pub use cell::{Cell, CellValue};
pub use coord::{col_from_label, col_to_label, CellCoord};
pub use display::{CellFormatter, Span, StyledText, ELLIPSIS};
pub use error::{CellError, ViewError};
pub use layout::{ColumnLayoutEngine, ColumnSlot, LayoutConfig, LayoutPlan, TerminalSize};
pub use render::{Frame, OutputSink, Renderer, TextSink, Theme};
pub use session::{EventSource, Session};
pub use sheet::Sheet;
pub use state::{
    CellPosition, Command, InputDispatcher, InputEvent, Key, Modifiers, Transition,
    ViewportController, ViewportState,
};
pub use style::{
    AnsiColor, Attributes, Capabilities, CellStyle, Color, ColorSupport, HorizontalAlign,
    TermColor,
};
pub use workbook::{SheetInfo, Workbook, WorkbookModel};
