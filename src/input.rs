use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Cell offset of one step in this direction. Y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Discrete input events consumed by the app state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InputEvent {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Pause,
    Restart,
    ToggleSound,
    Menu,
    Confirm,
    SelectPrev,
    SelectNext,
    ChangeValueLeft,
    ChangeValueRight,
    Quit,
}

impl InputEvent {
    /// Returns the steering direction carried by a move event.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::MoveUp => Some(Direction::Up),
            Self::MoveDown => Some(Direction::Down),
            Self::MoveLeft => Some(Direction::Left),
            Self::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Which key map applies. The same arrow key navigates the menu or steers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyContext {
    Menu,
    Game,
}

/// Translates one key press into an input event for the given context.
#[must_use]
pub fn map_key(key: KeyEvent, context: KeyContext) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    match context {
        KeyContext::Menu => match code {
            KeyCode::Up | KeyCode::Char('w') => Some(InputEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('s') => Some(InputEvent::SelectNext),
            KeyCode::Left | KeyCode::Char('a') => Some(InputEvent::ChangeValueLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(InputEvent::ChangeValueRight),
            KeyCode::Enter | KeyCode::Char(' ') => Some(InputEvent::Confirm),
            KeyCode::Char('m') => Some(InputEvent::ToggleSound),
            KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
            _ => None,
        },
        KeyContext::Game => match code {
            KeyCode::Up | KeyCode::Char('w') => Some(InputEvent::MoveUp),
            KeyCode::Down | KeyCode::Char('s') => Some(InputEvent::MoveDown),
            KeyCode::Left | KeyCode::Char('a') => Some(InputEvent::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(InputEvent::MoveRight),
            KeyCode::Char('p') => Some(InputEvent::Pause),
            KeyCode::Char('r') => Some(InputEvent::Restart),
            KeyCode::Char('m') => Some(InputEvent::ToggleSound),
            KeyCode::Esc => Some(InputEvent::Menu),
            _ => None,
        },
    }
}

/// Drains pending terminal events without blocking the frame loop.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns every event queued since the last frame, in arrival order.
    pub fn poll_events(&mut self, context: KeyContext) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key, context) {
                    events.push(input);
                }
            }
        }
        Ok(events)
    }
}
