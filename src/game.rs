use std::time::Duration;

use tracing::{debug, info};

use crate::config::{Difficulty, GridSize, SessionConfig, TIER_STEP_MS, WrapMode};
use crate::food::{FoodKind, FoodSpawner};
use crate::grid::Grid;
use crate::input::Direction;
use crate::score::{HighScores, ScoreKeeper};
use crate::snake::{AdvanceResult, Snake};

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Lifecycle of one playthrough.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    Running,
    Collided(DeathReason),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Moved,
    AteFood(FoodKind),
    GoldenExpired,
    GameOver(DeathReason),
    /// The session already ended; nothing happened.
    Idle,
}

/// Complete mutable state for one playthrough.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: FoodSpawner,
    pub scores: ScoreKeeper,
    config: SessionConfig,
    grid: Grid,
    status: SessionStatus,
    tick_count: u64,
    new_record: bool,
}

impl GameSession {
    /// Starts a session with an entropy-seeded food spawner.
    #[must_use]
    pub fn new(config: SessionConfig, high_scores: HighScores) -> Self {
        Self::with_spawner(config, high_scores, FoodSpawner::new())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: SessionConfig, high_scores: HighScores, seed: u64) -> Self {
        Self::with_spawner(config, high_scores, FoodSpawner::with_seed(seed))
    }

    /// Starts a session that draws food from `food`.
    #[must_use]
    pub fn with_spawner(config: SessionConfig, high_scores: HighScores, food: FoodSpawner) -> Self {
        let grid = Grid::new(config.grid);
        let snake = Snake::new(grid.center(), config.initial_length, Direction::Right);
        let scores = ScoreKeeper::new(snake.len(), high_scores);

        let mut session = Self {
            snake,
            food,
            scores,
            config,
            grid,
            status: SessionStatus::Running,
            tick_count: 0,
            new_record: false,
        };
        session.food.try_spawn(0, session.grid, &session.snake);

        info!(
            difficulty = %config.difficulty,
            wrap = %config.wrap,
            width = config.grid.width,
            height = config.grid.height,
            "session started"
        );
        session
    }

    /// Replaces the snake, e.g. to set up a scenario.
    pub fn set_snake(&mut self, snake: Snake) {
        self.scores.sync_length(snake.len());
        self.snake = snake;
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SessionStatus::Running {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        let head = match self.snake.advance(self.grid, self.config.wrap) {
            AdvanceResult::Moved(head) => head,
            AdvanceResult::WallCollision => return self.end(DeathReason::WallCollision),
            AdvanceResult::SelfCollision => return self.end(DeathReason::SelfCollision),
        };

        let mut outcome = TickOutcome::Moved;
        if let Some(food) = self.food.consume_at(head) {
            self.scores.on_food_eaten(food);
            self.snake.grow(food.growth());
            debug!(tick = self.tick_count, kind = ?food.kind, score = self.scores.score(), "food eaten");
            outcome = TickOutcome::AteFood(food.kind);
        }

        if self.food.tick(self.tick_count).is_some() {
            outcome = TickOutcome::GoldenExpired;
        }

        if self.food.active().is_none() {
            self.food.try_spawn(self.tick_count, self.grid, &self.snake);
        }

        self.scores.sync_length(self.snake.len());
        outcome
    }

    fn end(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = SessionStatus::Collided(reason);
        self.new_record = self
            .scores
            .finalize(self.config.difficulty, self.config.wrap);

        info!(
            tick = self.tick_count,
            score = self.scores.score(),
            length = self.snake.len(),
            ?reason,
            new_record = self.new_record,
            "session over"
        );
        TickOutcome::GameOver(reason)
    }

    /// Wall-clock time between ticks at the current speed tier.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        tick_interval_for(self.config.difficulty, self.scores.speed_tier())
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != SessionStatus::Running
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        match self.status {
            SessionStatus::Collided(reason) => Some(reason),
            SessionStatus::Running => None,
        }
    }

    /// True once the session ended above the previous record.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    #[must_use]
    pub fn wrap(&self) -> WrapMode {
        self.config.wrap
    }

    /// Best score for this mode, counting the live score.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.scores.best(self.config.difficulty, self.config.wrap)
    }
}

/// Tick interval for `difficulty` at `speed_tier`, clamped to its minimum.
#[must_use]
pub fn tick_interval_for(difficulty: Difficulty, speed_tier: u32) -> Duration {
    let speed_penalty_ms = u64::from(speed_tier).saturating_mul(TIER_STEP_MS);
    let clamped_ms = difficulty
        .base_tick_ms()
        .saturating_sub(speed_penalty_ms)
        .max(difficulty.min_tick_ms());
    Duration::from_millis(clamped_ms)
}
