//! Read-only view of the game handed to the renderer once per frame.

use crate::app::{AppState, MenuItem};
use crate::config::{Difficulty, GridSize, WrapMode};
use crate::food::FoodKind;
use crate::game::DeathReason;
use crate::grid::Position;
use crate::snake::Snake;

/// Active food as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodView {
    pub position: Position,
    pub kind: FoodKind,
    /// Share of golden-food lifetime left; `None` for normal food.
    pub remaining: Option<f32>,
}

/// The playthrough shown on screen (running, paused or finished).
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub snake: &'a Snake,
    pub food: Option<FoodView>,
    pub score: u32,
    pub length: usize,
    pub speed_tier: u32,
    pub best: u32,
    pub tick_count: u64,
    pub death_reason: Option<DeathReason>,
    pub new_record: bool,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub state: AppState,
    pub grid: GridSize,
    pub difficulty: Difficulty,
    pub wrap: WrapMode,
    pub sound: bool,
    pub menu_selection: MenuItem,
    /// Stored record for the selected difficulty/wrap pair.
    pub record: u32,
    pub session: Option<SessionView<'a>>,
}
