//! The read-update-render loop.

use std::io;

use tracing::{debug, info, warn};

use crate::error::ViewError;
use crate::layout::TerminalSize;
use crate::render::{present, Frame, OutputSink, Renderer};
use crate::state::{Command, InputDispatcher, InputEvent, Transition, ViewportController, ViewportState};
use crate::workbook::WorkbookModel;

/// Blocking source of input events. `Ok(None)` means the input is exhausted.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>>;
}

impl<E: EventSource + ?Sized> EventSource for &mut E {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        (**self).next_event()
    }
}

/// Replays a fixed list of events, then reports end of input
impl EventSource for std::vec::IntoIter<InputEvent> {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        Ok(self.next())
    }
}

/// One viewing session over a read-only workbook
pub struct Session<'a, M: WorkbookModel + ?Sized> {
    model: &'a M,
    controller: ViewportController,
    renderer: Renderer,
    dispatcher: InputDispatcher,
    size: TerminalSize,
    last_frame: Option<Frame>,
}

impl<'a, M: WorkbookModel + ?Sized> Session<'a, M> {
    pub fn new(model: &'a M, renderer: Renderer, dispatcher: InputDispatcher, size: TerminalSize) -> Self {
        Self {
            model,
            controller: ViewportController::new(*renderer.layout()),
            renderer,
            dispatcher,
            size,
            last_frame: None,
        }
    }

    pub fn state(&self) -> &ViewportState {
        self.controller.state()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    /// Dispatch and apply one event
    pub fn handle(&mut self, event: &InputEvent) -> Result<Transition, ViewError> {
        let command = self.dispatcher.dispatch(event);
        match self.controller.apply(self.model, command, self.size) {
            Ok(transition) => {
                if let Command::Resize(size) = command {
                    self.size = size;
                }
                Ok(transition)
            }
            Err(err) if err.is_out_of_range() && is_sheet_switch(command) => {
                warn!(error = %err, "ignoring sheet switch");
                Ok(Transition::Unchanged)
            }
            Err(err) => Err(err),
        }
    }

    /// Render the current state and write it unless it equals the frame
    /// already on screen. A full repaint always writes.
    pub fn repaint<S: OutputSink + ?Sized>(&mut self, sink: &mut S, full: bool) -> Result<bool, ViewError> {
        let frame = self.renderer.render(self.model, self.controller.state(), self.size)?;
        if !full && self.last_frame.as_ref() == Some(&frame) {
            debug!("frame unchanged, skipping repaint");
            return Ok(false);
        }
        present(&frame, sink, full)?;
        self.last_frame = Some(frame);
        Ok(true)
    }

    /// Run until `Quit` or end of input
    pub fn run<E, S>(&mut self, mut events: E, mut sink: S) -> Result<(), ViewError>
    where
        E: EventSource,
        S: OutputSink,
    {
        info!(
            sheets = self.model.sheet_count(),
            width = self.size.width,
            height = self.size.height,
            "session started"
        );
        self.repaint(&mut sink, true)?;

        while let Some(event) = events.next_event()? {
            match self.handle(&event)? {
                Transition::Quit => break,
                Transition::Unchanged => {}
                Transition::Changed => {
                    self.repaint(&mut sink, false)?;
                }
                Transition::Repaint => {
                    self.repaint(&mut sink, true)?;
                }
            }
        }

        let cursor = self.controller.state().cursor();
        info!(
            sheet = self.controller.state().active_sheet(),
            row = cursor.row,
            col = cursor.col,
            "session ended"
        );
        Ok(())
    }
}

fn is_sheet_switch(command: Command) -> bool {
    matches!(
        command,
        Command::SwitchSheet(_) | Command::NextSheet | Command::PreviousSheet
    )
}
