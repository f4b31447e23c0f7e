use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;

use crate::error::ConfigError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Default playing field. Each cell is drawn two terminal columns wide.
pub const DEFAULT_GRID: GridSize = GridSize {
    width: 30,
    height: 20,
};

/// Snake length at the start of every session.
pub const DEFAULT_INITIAL_LENGTH: usize = 3;

/// Largest initial body accepted by [`SessionConfig::validate`].
pub const MAX_INITIAL_LENGTH: usize = 3;

/// Points and growth granted by ordinary food.
pub const NORMAL_FOOD_POINTS: u32 = 10;
pub const NORMAL_FOOD_GROWTH: u32 = 1;

/// Points and growth granted by golden food.
pub const GOLDEN_FOOD_POINTS: u32 = 30;
pub const GOLDEN_FOOD_GROWTH: u32 = 2;

/// Probability that a spawn roll produces golden food.
pub const GOLDEN_FOOD_CHANCE: f64 = 1.0 / 12.0;

/// Ticks a golden food stays on the board after it spawns.
pub const GOLDEN_FOOD_LIFETIME_TICKS: u64 = 60;

/// Score needed per speed tier increase.
pub const POINTS_PER_SPEED_TIER: u32 = 50;

/// Tick interval reduction per speed tier, in milliseconds.
pub const TIER_STEP_MS: u64 = 8;

/// Redraw cadence of the frame loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Game difficulty. Selects base speed and the high-score bucket.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Lowercase identifier used on the command line and in record keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }

    /// Tick interval at speed tier zero.
    #[must_use]
    pub fn base_tick_ms(self) -> u64 {
        match self {
            Self::Easy => 125,
            Self::Normal => 100,
            Self::Hard => 83,
        }
    }

    /// Fastest tick interval this difficulty ever reaches.
    #[must_use]
    pub fn min_tick_ms(self) -> u64 {
        match self {
            Self::Easy => 50,
            Self::Normal => 42,
            Self::Hard => 36,
        }
    }

    /// Cycles to the next (or previous) difficulty, wrapping around.
    #[must_use]
    pub fn cycled(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ALL[next]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge behavior of the playing field.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Default, ValueEnum)]
pub enum WrapMode {
    #[default]
    #[value(name = "off")]
    Off,
    #[value(name = "on")]
    On,
}

impl WrapMode {
    pub const ALL: [Self; 2] = [Self::Off, Self::On];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }
}

impl fmt::Display for WrapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings fixed for the lifetime of one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SessionConfig {
    pub grid: GridSize,
    pub difficulty: Difficulty,
    pub wrap: WrapMode,
    pub initial_length: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            difficulty: Difficulty::default(),
            wrap: WrapMode::default(),
            initial_length: DEFAULT_INITIAL_LENGTH,
        }
    }
}

impl SessionConfig {
    /// Rejects configurations that cannot produce a valid starting board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }

        let half_width = usize::from(self.grid.width / 2);
        if self.initial_length == 0
            || self.initial_length > MAX_INITIAL_LENGTH
            || self.initial_length > half_width + 1
        {
            return Err(ConfigError::InitialLength {
                length: self.initial_length,
                width: self.grid.width,
            });
        }

        Ok(())
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_body_alt: Color,
    pub food: Color,
    pub golden_food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_highlight: Color,
    pub menu_footer: Color,
}

/// Green snake on a dark field, red and gold food.
pub const THEME: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_body_alt: Color::Rgb(20, 190, 0),
    food: Color::Red,
    golden_food: Color::Yellow,
    play_bg: Color::Rgb(30, 30, 30),
    border_fg: Color::Gray,
    hud_text: Color::White,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_highlight: Color::Rgb(45, 45, 45),
    menu_footer: Color::DarkGray,
};

/// Glyph pair for one grid cell.
pub const GLYPH_CELL: &str = "██";

/// Glyph pair for food.
pub const GLYPH_FOOD: &str = "◖◗";

/// Glyph pair for a golden food close to expiry.
pub const GLYPH_FOOD_FADING: &str = "()";
