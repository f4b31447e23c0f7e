use std::collections::VecDeque;

use crate::config::WrapMode;
use crate::grid::{Grid, Position};
use crate::input::Direction;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AdvanceResult {
    Moved(Position),
    WallCollision,
    SelfCollision,
}

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
    pending_heading: Option<Direction>,
    pending_growth: u32,
}

impl Snake {
    /// Creates a snake of `length` cells with its head at `head`, the body
    /// trailing behind it opposite to `heading`.
    #[must_use]
    pub fn new(head: Position, length: usize, heading: Direction) -> Self {
        let trail = heading.opposite().delta();
        let mut body = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        for _ in 0..length.max(1) {
            body.push_back(cell);
            cell = cell.offset(trail);
        }

        Self {
            body,
            heading,
            pending_heading: None,
            pending_growth: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty body.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }

        Some(Self {
            body: VecDeque::from(segments),
            heading,
            pending_heading: None,
            pending_growth: 0,
        })
    }

    /// Requests a heading change for the next tick.
    ///
    /// A direct reversal of the current heading is ignored while the snake is
    /// longer than one cell. Valid requests overwrite each other; only the
    /// latest one survives until the next [`Snake::advance`].
    pub fn set_heading(&mut self, direction: Direction) {
        if self.body.len() > 1 && direction == self.heading.opposite() {
            return;
        }
        self.pending_heading = Some(direction);
    }

    /// Queues `amount` ticks during which the tail is kept.
    pub fn grow(&mut self, amount: u32) {
        self.pending_growth = self.pending_growth.saturating_add(amount);
    }

    /// Applies one movement step.
    ///
    /// On a collision the body is left untouched.
    pub fn advance(&mut self, grid: Grid, wrap: WrapMode) -> AdvanceResult {
        if let Some(heading) = self.pending_heading.take() {
            self.heading = heading;
        }

        let raw = self.head().offset(self.heading.delta());
        if !wrap.is_on() && !grid.is_in_bounds(raw) {
            return AdvanceResult::WallCollision;
        }
        let next_head = grid.normalize(raw, wrap);

        let keeps_tail = self.pending_growth > 0;
        let blocking = if keeps_tail {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(blocking).any(|cell| *cell == next_head) {
            return AdvanceResult::SelfCollision;
        }

        self.body.push_front(next_head);
        if keeps_tail {
            self.pending_growth -= 1;
        } else {
            let _ = self.body.pop_back();
        }

        AdvanceResult::Moved(next_head)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns the heading used by the most recent step.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the buffered heading that the next step will use, if any.
    #[must_use]
    pub fn pending_heading(&self) -> Option<Direction> {
        self.pending_heading
    }

    #[must_use]
    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
