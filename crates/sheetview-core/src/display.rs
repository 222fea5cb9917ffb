//! Fixed-width cell formatting.
//!
//! Widths are terminal display columns as reported by `unicode-width`, so a
//! CJK glyph counts as two columns and the output of [`CellFormatter::format`]
//! always occupies exactly the requested width.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, CellValue};
use crate::style::{Attributes, Capabilities, HorizontalAlign};

/// Marker appended to truncated text; one column wide
pub const ELLIPSIS: char = '…';

/// A run of text sharing one set of attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub attrs: Attributes,
}

impl Span {
    pub fn new(text: impl Into<String>, attrs: Attributes) -> Self {
        Span {
            text: text.into(),
            attrs,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Attributes::PLAIN)
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// Styled text: a sequence of spans, written to the sink one line at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    spans: Vec<Span>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_span(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Append a span, merging it into the previous one when attributes match
    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.attrs == span.attrs => last.text.push_str(&span.text),
            _ => self.spans.push(span),
        }
    }

    pub fn append(&mut self, other: StyledText) {
        for span in other.spans {
            self.push(span);
        }
    }

    /// Display width in terminal columns
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The text without attributes
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Clip to `width` columns, then pad with plain spaces up to it
    pub fn fit(mut self, width: usize) -> Self {
        let mut used = 0;
        let mut kept = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if used >= width {
                break;
            }
            let span_width = span.width();
            if used + span_width <= width {
                used += span_width;
                kept.push(span);
            } else {
                let (text, taken) = take_columns(&span.text, width - used);
                used += taken;
                if !text.is_empty() {
                    kept.push(Span::new(text, span.attrs));
                }
                break;
            }
        }
        self.spans = kept;
        if used < width {
            self.push(Span::plain(" ".repeat(width - used)));
        }
        self
    }
}

/// Longest prefix of `text` fitting in `columns`, and its width.
///
/// The prefix is measured as a whole string, the same way full text is
/// measured, so sequences such as an emoji followed by U+FE0F are never
/// counted narrower than they render.
fn take_columns(text: &str, columns: usize) -> (String, usize) {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        out.push(ch);
        let width = out.width();
        if width > columns {
            out.pop();
            break;
        }
        used = width;
    }
    (out, used)
}

/// Replace characters that would break a single terminal line
fn single_line(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Display width of a cell's natural text
pub fn natural_width(value: &CellValue) -> usize {
    single_line(&value.as_text()).width()
}

/// Fit `text` into exactly `width` columns: truncate with an ellipsis when it
/// is too long, otherwise pad on the side away from `align`
pub fn fit_text(text: &str, width: usize, align: HorizontalAlign) -> String {
    let text = single_line(text);
    let text_width = text.width();

    if text_width > width {
        if width == 0 {
            return String::new();
        }
        let (mut out, _) = take_columns(&text, width - 1);
        out.push(ELLIPSIS);
        // A wide glyph may leave one column short of the budget
        let short = width.saturating_sub(out.width());
        out.extend(std::iter::repeat(' ').take(short));
        return out;
    }

    let pad = width - text_width;
    let (left, right) = match align {
        HorizontalAlign::Left => (0, pad),
        HorizontalAlign::Right => (pad, 0),
        HorizontalAlign::Center => (pad / 2, pad - pad / 2),
    };
    let mut out = String::with_capacity(text.len() + pad);
    out.extend(std::iter::repeat(' ').take(left));
    out.push_str(&text);
    out.extend(std::iter::repeat(' ').take(right));
    out
}

/// Type-based default alignment
pub fn default_alignment(value: &CellValue) -> HorizontalAlign {
    match value {
        CellValue::Number(_) => HorizontalAlign::Right,
        CellValue::Text(_) | CellValue::Empty => HorizontalAlign::Left,
        CellValue::Boolean(_) | CellValue::Error(_) => HorizontalAlign::Center,
    }
}

/// Turns cells into fixed-width styled fragments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFormatter {
    caps: Capabilities,
}

impl CellFormatter {
    pub fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    /// Format `cell` into exactly `width` columns.
    ///
    /// An explicit `alignment` wins over the cell style, which wins over the
    /// value-type default. A `width` of 0 is treated as 1.
    pub fn format(&self, cell: &Cell, width: usize, alignment: Option<HorizontalAlign>) -> StyledText {
        let width = width.max(1);
        let style = cell.style.as_ref();
        let align = alignment
            .or_else(|| style.and_then(|s| s.horizontal_align))
            .unwrap_or_else(|| default_alignment(&cell.value));
        let attrs = style
            .map(|s| Attributes::from_style(s, self.caps))
            .unwrap_or_default();

        let text = fit_text(&cell.value.as_text(), width, align);
        StyledText::from_span(Span::new(text, attrs))
    }
}
