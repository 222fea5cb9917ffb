use crate::display::StyledText;

/// One fully composed screen: header, data rows, status line.
///
/// Every line is exactly `width` columns wide so a frame can be painted over
/// the previous one without clearing the screen first. The frame never has
/// more lines than the terminal: on very short terminals the data rows are
/// dropped first, then the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub header: Option<StyledText>,
    pub rows: Vec<StyledText>,
    pub status: Option<StyledText>,
}

impl Frame {
    /// Lines in top-to-bottom order
    pub fn lines(&self) -> impl Iterator<Item = &StyledText> {
        self.header
            .iter()
            .chain(self.rows.iter())
            .chain(self.status.iter())
    }

    pub fn height(&self) -> usize {
        self.rows.len() + usize::from(self.header.is_some()) + usize::from(self.status.is_some())
    }

    /// The frame as plain text, one string per line
    pub fn to_plain_lines(&self) -> Vec<String> {
        self.lines().map(StyledText::plain_text).collect()
    }
}
