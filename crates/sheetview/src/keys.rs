use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sheetview_core::{EventSource, InputEvent, Key, Modifiers, TerminalSize};

/// Translate a crossterm event. Key releases, mouse and focus events are
/// dropped.
pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(translate_key(key)),
        Event::Resize(width, height) => Some(InputEvent::Resize(TerminalSize::new(
            width.into(),
            height.into(),
        ))),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> InputEvent {
    let code = match key.code {
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Unknown,
    };
    let modifiers = Modifiers::new()
        .with_shift(key.modifiers.contains(KeyModifiers::SHIFT))
        .with_ctrl(key.modifiers.contains(KeyModifiers::CONTROL))
        .with_alt(key.modifiers.contains(KeyModifiers::ALT));
    InputEvent::Key(code, modifiers)
}

/// Blocking reader over the terminal's event queue
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        loop {
            if let Some(event) = translate(event::read()?) {
                return Ok(Some(event));
            }
        }
    }
}
