use serde::{Deserialize, Serialize};

/// RGBA color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Convert to hex color string
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }

    /// Parse from hex color string (`#rrggbb` or `#rrggbbaa`)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Styling attached to a cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// Overrides the value-type default alignment when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_align: Option<HorizontalAlign>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Builder pattern: set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Builder pattern: set underline
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Builder pattern: set text color
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    /// Builder pattern: set background color
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Builder pattern: set horizontal alignment
    pub fn with_horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = Some(align);
        self
    }
}

/// The 16 basic terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    const PALETTE: [(AnsiColor, (u8, u8, u8)); 16] = [
        (AnsiColor::Black, (0, 0, 0)),
        (AnsiColor::Red, (128, 0, 0)),
        (AnsiColor::Green, (0, 128, 0)),
        (AnsiColor::Yellow, (128, 128, 0)),
        (AnsiColor::Blue, (0, 0, 128)),
        (AnsiColor::Magenta, (128, 0, 128)),
        (AnsiColor::Cyan, (0, 128, 128)),
        (AnsiColor::White, (192, 192, 192)),
        (AnsiColor::BrightBlack, (128, 128, 128)),
        (AnsiColor::BrightRed, (255, 0, 0)),
        (AnsiColor::BrightGreen, (0, 255, 0)),
        (AnsiColor::BrightYellow, (255, 255, 0)),
        (AnsiColor::BrightBlue, (0, 0, 255)),
        (AnsiColor::BrightMagenta, (255, 0, 255)),
        (AnsiColor::BrightCyan, (0, 255, 255)),
        (AnsiColor::BrightWhite, (255, 255, 255)),
    ];

    /// Closest basic color by squared RGB distance
    pub fn nearest(color: Color) -> AnsiColor {
        let distance = |(r, g, b): (u8, u8, u8)| {
            let dr = i32::from(color.r) - i32::from(r);
            let dg = i32::from(color.g) - i32::from(g);
            let db = i32::from(color.b) - i32::from(b);
            dr * dr + dg * dg + db * db
        };
        Self::PALETTE
            .iter()
            .min_by_key(|(_, rgb)| distance(*rgb))
            .map(|(ansi, _)| *ansi)
            .unwrap_or(AnsiColor::White)
    }
}

/// A color as the output sink understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermColor {
    Ansi(AnsiColor),
    Rgb(u8, u8, u8),
}

/// Abstract attribute set understood by every output sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub fg: Option<TermColor>,
    pub bg: Option<TermColor>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Attributes {
    pub const PLAIN: Attributes = Attributes {
        fg: None,
        bg: None,
        bold: false,
        italic: false,
        underline: false,
        reverse: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    pub fn bold() -> Self {
        Attributes {
            bold: true,
            ..Self::PLAIN
        }
    }

    pub fn reversed() -> Self {
        Attributes {
            reverse: true,
            ..Self::PLAIN
        }
    }

    /// Map a cell style onto the attributes the terminal supports.
    /// Anything the terminal cannot show is dropped.
    pub fn from_style(style: &CellStyle, caps: Capabilities) -> Self {
        Attributes {
            fg: style.text_color.and_then(|c| caps.map_color(c)),
            bg: style.background_color.and_then(|c| caps.map_color(c)),
            bold: style.bold,
            italic: style.italic && caps.italic,
            underline: style.underline && caps.underline,
            reverse: false,
        }
    }
}

/// How many colors the terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSupport {
    None,
    Basic,
    TrueColor,
}

/// What the output terminal can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    pub colors: ColorSupport,
    pub italic: bool,
    pub underline: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            colors: ColorSupport::Basic,
            italic: true,
            underline: true,
        }
    }
}

impl Capabilities {
    /// A terminal with no color or text decoration beyond bold/reverse
    pub const MONOCHROME: Capabilities = Capabilities {
        colors: ColorSupport::None,
        italic: false,
        underline: false,
    };

    pub fn with_colors(mut self, colors: ColorSupport) -> Self {
        self.colors = colors;
        self
    }

    pub fn map_color(&self, color: Color) -> Option<TermColor> {
        if color.is_transparent() {
            return None;
        }
        match self.colors {
            ColorSupport::None => None,
            ColorSupport::Basic => Some(TermColor::Ansi(AnsiColor::nearest(color))),
            ColorSupport::TrueColor => Some(TermColor::Rgb(color.r, color.g, color.b)),
        }
    }
}
