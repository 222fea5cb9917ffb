use crate::layout::TerminalSize;

/// Navigation commands understood by the viewport controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Relative cursor move, clamped to the sheet
    MoveCursor { rows: isize, cols: isize },
    PageUp,
    PageDown,
    RowStart,
    RowEnd,
    Top,
    Bottom,

    // Sheets
    SwitchSheet(usize),
    NextSheet,
    PreviousSheet,

    // Terminal
    Resize(TerminalSize),
    Redraw,

    Quit,
    NoOp,
}

impl Command {
    pub const UP: Command = Command::MoveCursor { rows: -1, cols: 0 };
    pub const DOWN: Command = Command::MoveCursor { rows: 1, cols: 0 };
    pub const LEFT: Command = Command::MoveCursor { rows: 0, cols: -1 };
    pub const RIGHT: Command = Command::MoveCursor { rows: 0, cols: 1 };
}

/// Key codes for the keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Special keys
    Enter,
    Tab,
    BackTab,
    Escape,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,

    // Character key
    Char(char),

    // Unknown
    Unknown,
}

/// Modifier keys state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    pub fn none_pressed(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }

    pub fn only_shift(&self) -> bool {
        self.shift && !self.ctrl && !self.alt
    }

    pub fn only_ctrl(&self) -> bool {
        !self.shift && self.ctrl && !self.alt
    }
}

/// Decoded terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key, Modifiers),
    Resize(TerminalSize),
}

impl InputEvent {
    /// A key press without modifiers
    pub fn key(key: Key) -> Self {
        InputEvent::Key(key, Modifiers::new())
    }
}

/// Maps input events to commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDispatcher {
    vim_keys: bool,
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputDispatcher {
    pub fn new(vim_keys: bool) -> Self {
        Self { vim_keys }
    }

    /// Unrecognized events become `NoOp`
    pub fn dispatch(&self, event: &InputEvent) -> Command {
        match *event {
            InputEvent::Resize(size) => Command::Resize(size),
            InputEvent::Key(key, modifiers) => self.key_to_command(key, modifiers),
        }
    }

    fn key_to_command(&self, key: Key, modifiers: Modifiers) -> Command {
        match key {
            // Arrow keys
            Key::ArrowUp if modifiers.none_pressed() => Command::UP,
            Key::ArrowDown if modifiers.none_pressed() => Command::DOWN,
            Key::ArrowLeft if modifiers.none_pressed() => Command::LEFT,
            Key::ArrowRight if modifiers.none_pressed() => Command::RIGHT,

            // Home/End keys
            Key::Home if modifiers.none_pressed() => Command::RowStart,
            Key::End if modifiers.none_pressed() => Command::RowEnd,
            Key::Home if modifiers.only_ctrl() => Command::Top,
            Key::End if modifiers.only_ctrl() => Command::Bottom,

            // Page Up/Down, with Ctrl they flip sheets
            Key::PageUp if modifiers.none_pressed() => Command::PageUp,
            Key::PageDown if modifiers.none_pressed() => Command::PageDown,
            Key::PageUp if modifiers.only_ctrl() => Command::PreviousSheet,
            Key::PageDown if modifiers.only_ctrl() => Command::NextSheet,

            // Enter and Tab walk the grid
            Key::Enter if modifiers.none_pressed() => Command::DOWN,
            Key::Enter if modifiers.only_shift() => Command::UP,
            Key::Tab if modifiers.none_pressed() => Command::RIGHT,
            Key::Tab if modifiers.only_shift() => Command::LEFT,
            Key::BackTab => Command::LEFT,

            Key::Escape => Command::Quit,

            // Ctrl shortcuts
            Key::Char('c') if modifiers.only_ctrl() => Command::Quit,
            Key::Char('l') if modifiers.only_ctrl() => Command::Redraw,

            Key::Char(c) if modifiers.none_pressed() || modifiers.only_shift() => {
                self.char_to_command(c)
            }

            _ => Command::NoOp,
        }
    }

    fn char_to_command(&self, c: char) -> Command {
        match c {
            'q' => Command::Quit,
            '1'..='9' => Command::SwitchSheet(c as usize - '1' as usize),
            ']' => Command::NextSheet,
            '[' => Command::PreviousSheet,
            'h' if self.vim_keys => Command::LEFT,
            'j' if self.vim_keys => Command::DOWN,
            'k' if self.vim_keys => Command::UP,
            'l' if self.vim_keys => Command::RIGHT,
            'g' if self.vim_keys => Command::Top,
            'G' if self.vim_keys => Command::Bottom,
            _ => Command::NoOp,
        }
    }
}
