use std::io;

use crate::display::StyledText;

/// Destination for rendered frames.
///
/// The sink owns escape sequences and cursor positioning; the renderer only
/// hands it whole lines, top to bottom.
pub trait OutputSink {
    /// Clear the screen and home the cursor
    fn clear_screen(&mut self) -> io::Result<()>;

    /// Home the cursor before overwriting the previous frame in place
    fn begin_frame(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Write one line and advance to the next
    fn write_line(&mut self, line: &StyledText) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn clear_screen(&mut self) -> io::Result<()> {
        (**self).clear_screen()
    }

    fn begin_frame(&mut self) -> io::Result<()> {
        (**self).begin_frame()
    }

    fn write_line(&mut self, line: &StyledText) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Records frames as plain text; used by tests and the demo
#[derive(Debug, Default, Clone)]
pub struct TextSink {
    /// Lines of the frame currently being written
    pub lines: Vec<String>,
    pub clears: usize,
    pub frames: usize,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> String {
        self.lines.join("\n")
    }
}

impl OutputSink for TextSink {
    fn clear_screen(&mut self) -> io::Result<()> {
        self.clears += 1;
        self.lines.clear();
        Ok(())
    }

    fn begin_frame(&mut self) -> io::Result<()> {
        self.lines.clear();
        Ok(())
    }

    fn write_line(&mut self, line: &StyledText) -> io::Result<()> {
        self.lines.push(line.plain_text());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}
