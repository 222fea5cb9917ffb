//! crossterm output: the real [`OutputSink`] and raw-mode setup.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use sheetview_core::{AnsiColor, Attributes, OutputSink, StyledText, TermColor, TerminalSize};

/// Writes frames with ANSI sequences, one line per terminal row
pub struct CrosstermSink<W: Write> {
    out: W,
    row: u16,
}

impl<W: Write> CrosstermSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, row: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn set_attributes(&mut self, attrs: &Attributes) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        if let Some(fg) = attrs.fg {
            queue!(self.out, SetForegroundColor(term_color(fg)))?;
        }
        if let Some(bg) = attrs.bg {
            queue!(self.out, SetBackgroundColor(term_color(bg)))?;
        }
        if attrs.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if attrs.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if attrs.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if attrs.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        Ok(())
    }
}

impl<W: Write> OutputSink for CrosstermSink<W> {
    fn clear_screen(&mut self) -> io::Result<()> {
        self.row = 0;
        queue!(self.out, SetAttribute(Attribute::Reset), Clear(ClearType::All), MoveTo(0, 0))
    }

    fn begin_frame(&mut self) -> io::Result<()> {
        self.row = 0;
        queue!(self.out, MoveTo(0, 0))
    }

    fn write_line(&mut self, line: &StyledText) -> io::Result<()> {
        queue!(self.out, MoveTo(0, self.row))?;
        for span in line.spans() {
            if span.attrs.is_plain() {
                queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
            } else {
                self.set_attributes(&span.attrs)?;
            }
            queue!(self.out, Print(&span.text))?;
        }
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.row = self.row.saturating_add(1);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

pub fn term_color(color: TermColor) -> Color {
    match color {
        TermColor::Rgb(r, g, b) => Color::Rgb { r, g, b },
        TermColor::Ansi(ansi) => match ansi {
            AnsiColor::Black => Color::Black,
            AnsiColor::Red => Color::DarkRed,
            AnsiColor::Green => Color::DarkGreen,
            AnsiColor::Yellow => Color::DarkYellow,
            AnsiColor::Blue => Color::DarkBlue,
            AnsiColor::Magenta => Color::DarkMagenta,
            AnsiColor::Cyan => Color::DarkCyan,
            AnsiColor::White => Color::Grey,
            AnsiColor::BrightBlack => Color::DarkGrey,
            AnsiColor::BrightRed => Color::Red,
            AnsiColor::BrightGreen => Color::Green,
            AnsiColor::BrightYellow => Color::Yellow,
            AnsiColor::BrightBlue => Color::Blue,
            AnsiColor::BrightMagenta => Color::Magenta,
            AnsiColor::BrightCyan => Color::Cyan,
            AnsiColor::BrightWhite => Color::White,
        },
    }
}

/// Current terminal size
pub fn size() -> io::Result<TerminalSize> {
    let (width, height) = terminal::size()?;
    Ok(TerminalSize::new(width.into(), height.into()))
}

/// Raw mode and alternate screen for the lifetime of the guard
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetview_core::Span;

    fn output(sink: CrosstermSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_write_line_positions_rows() {
        let mut sink = CrosstermSink::new(Vec::new());
        sink.begin_frame().unwrap();
        sink.write_line(&StyledText::from_span(Span::plain("first"))).unwrap();
        sink.write_line(&StyledText::from_span(Span::plain("second"))).unwrap();
        sink.flush().unwrap();

        let out = output(sink);
        // MoveTo is 1-based on the wire
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("\x1b[2;1H"));
        assert!(out.find("first").unwrap() < out.find("second").unwrap());
    }

    #[test]
    fn test_clear_screen_resets_row() {
        let mut sink = CrosstermSink::new(Vec::new());
        sink.write_line(&StyledText::from_span(Span::plain("x"))).unwrap();
        sink.clear_screen().unwrap();
        assert_eq!(sink.row, 0);
        assert!(output(sink).contains("\x1b[2J"));
    }

    #[test]
    fn test_attributes_emitted() {
        let mut sink = CrosstermSink::new(Vec::new());
        let attrs = Attributes {
            fg: Some(TermColor::Rgb(1, 2, 3)),
            bold: true,
            reverse: true,
            ..Attributes::PLAIN
        };
        sink.write_line(&StyledText::from_span(Span::new("hi", attrs))).unwrap();

        let out = output(sink);
        assert!(out.contains("\x1b[38;2;1;2;3m"));
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("\x1b[7m"));
        assert!(out.contains("hi"));
    }

    #[test]
    fn test_ansi_mapping() {
        assert_eq!(term_color(TermColor::Ansi(AnsiColor::Red)), Color::DarkRed);
        assert_eq!(term_color(TermColor::Ansi(AnsiColor::BrightWhite)), Color::White);
        assert_eq!(term_color(TermColor::Rgb(9, 8, 7)), Color::Rgb { r: 9, g: 8, b: 7 });
    }
}
