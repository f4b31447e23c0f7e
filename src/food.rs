use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{
    GOLDEN_FOOD_CHANCE, GOLDEN_FOOD_GROWTH, GOLDEN_FOOD_LIFETIME_TICKS, GOLDEN_FOOD_POINTS,
    NORMAL_FOOD_GROWTH, NORMAL_FOOD_POINTS,
};
use crate::grid::{Grid, Position};
use crate::snake::Snake;

/// Food type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    Normal,
    Golden,
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
    pub spawn_tick: u64,
}

impl Food {
    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position, spawn_tick: u64) -> Self {
        Self {
            position,
            kind: FoodKind::Normal,
            spawn_tick,
        }
    }

    /// Creates a golden food at `position`.
    #[must_use]
    pub fn golden(position: Position, spawn_tick: u64) -> Self {
        Self {
            position,
            kind: FoodKind::Golden,
            spawn_tick,
        }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self.kind {
            FoodKind::Normal => NORMAL_FOOD_POINTS,
            FoodKind::Golden => GOLDEN_FOOD_POINTS,
        }
    }

    /// Returns how many cells the snake grows when this is eaten.
    #[must_use]
    pub fn growth(self) -> u32 {
        match self.kind {
            FoodKind::Normal => NORMAL_FOOD_GROWTH,
            FoodKind::Golden => GOLDEN_FOOD_GROWTH,
        }
    }

    /// Last tick on which golden food is still on the board.
    #[must_use]
    pub fn expiry_tick(self) -> Option<u64> {
        match self.kind {
            FoodKind::Normal => None,
            FoodKind::Golden => Some(self.spawn_tick + GOLDEN_FOOD_LIFETIME_TICKS),
        }
    }
}

/// Emitted when golden food times out uneaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Expired {
    pub food: Food,
}

/// Owns the active food and decides where and what spawns next.
#[derive(Debug, Clone)]
pub struct FoodSpawner {
    active: Option<Food>,
    golden_chance: f64,
    // Forces the next spawn to be normal food.
    skip_golden_roll: bool,
    rng: StdRng,
}

impl FoodSpawner {
    /// Creates a spawner seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates a deterministic spawner for tests and reproducible simulations.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            active: None,
            golden_chance: GOLDEN_FOOD_CHANCE,
            skip_golden_roll: true,
            rng,
        }
    }

    /// Overrides the probability of rolling golden food.
    #[must_use]
    pub fn with_golden_chance(mut self, chance: f64) -> Self {
        self.golden_chance = chance.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn active(&self) -> Option<Food> {
        self.active
    }

    /// Places `food` directly, replacing whatever was active.
    pub fn place(&mut self, food: Food) {
        self.active = Some(food);
    }

    /// Spawns food in a free cell when none is active.
    ///
    /// Returns `None` when food is already active or when the snake fills the
    /// whole grid; a full grid is a stall and the spawn is retried next tick.
    pub fn try_spawn(&mut self, current_tick: u64, grid: Grid, snake: &Snake) -> Option<Food> {
        if self.active.is_some() {
            return None;
        }

        let Some(position) = free_position(&mut self.rng, grid, snake) else {
            debug!(tick = current_tick, "no free cell for food, stalling spawn");
            return None;
        };

        let golden = !self.skip_golden_roll && self.rng.gen_bool(self.golden_chance);
        let food = if golden {
            Food::golden(position, current_tick)
        } else {
            Food::normal(position, current_tick)
        };
        self.skip_golden_roll = false;
        self.active = Some(food);

        debug!(tick = current_tick, kind = ?food.kind, x = position.x, y = position.y, "spawned food");
        Some(food)
    }

    /// Removes golden food whose lifetime has run out.
    pub fn tick(&mut self, current_tick: u64) -> Option<Expired> {
        let food = self.active?;
        let expiry = food.expiry_tick()?;
        if current_tick <= expiry {
            return None;
        }

        self.active = None;
        self.skip_golden_roll = true;
        debug!(tick = current_tick, "golden food expired");
        Some(Expired { food })
    }

    /// Takes the active food if it sits on `position`.
    pub fn consume_at(&mut self, position: Position) -> Option<Food> {
        let food = self.active.filter(|food| food.position == position)?;
        self.active = None;
        self.skip_golden_roll = food.kind == FoodKind::Golden;
        Some(food)
    }

    /// Share of golden-food lifetime left at `current_tick`, in `0.0..=1.0`.
    #[must_use]
    pub fn remaining_fraction(&self, current_tick: u64) -> Option<f32> {
        let food = self.active?;
        let expiry = food.expiry_tick()?;
        let remaining = expiry.saturating_sub(current_tick);
        Some((remaining as f32 / GOLDEN_FOOD_LIFETIME_TICKS as f32).clamp(0.0, 1.0))
    }
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks a uniformly random cell not occupied by the snake.
pub fn free_position<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Option<Position> {
    let candidates: Vec<Position> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{GOLDEN_FOOD_LIFETIME_TICKS, GridSize};
    use crate::grid::{Grid, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{Food, FoodKind, FoodSpawner, free_position};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height })
    }

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
            ],
            Direction::Left,
        )
        .expect("non-empty body");

        for _ in 0..100 {
            let position = free_position(&mut rng, grid(8, 6), &snake)
                .expect("board has free cells");
            assert!(!snake.occupies(position));
        }
    }

    #[test]
    fn full_grid_stalls_the_spawn() {
        let snake = Snake::from_segments(
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
            ],
            Direction::Up,
        )
        .expect("non-empty body");
        let mut spawner = FoodSpawner::with_seed(1);

        assert_eq!(spawner.try_spawn(3, grid(2, 2), &snake), None);
        assert_eq!(spawner.active(), None);
    }

    #[test]
    fn spawn_is_skipped_while_food_is_active() {
        let snake = Snake::new(Position::new(1, 1), 1, Direction::Right);
        let mut spawner = FoodSpawner::with_seed(2);

        assert!(spawner.try_spawn(0, grid(5, 5), &snake).is_some());
        assert_eq!(spawner.try_spawn(1, grid(5, 5), &snake), None);
    }

    #[test]
    fn first_spawn_is_always_normal() {
        let snake = Snake::new(Position::new(1, 1), 1, Direction::Right);
        for seed in 0..20 {
            let mut spawner = FoodSpawner::with_seed(seed).with_golden_chance(1.0);
            let food = spawner.try_spawn(0, grid(5, 5), &snake).expect("free cell");
            assert_eq!(food.kind, FoodKind::Normal);
        }
    }

    #[test]
    fn certain_golden_chance_yields_golden_after_normal_is_eaten() {
        let snake = Snake::new(Position::new(1, 1), 1, Direction::Right);
        let mut spawner = FoodSpawner::with_seed(3).with_golden_chance(1.0);

        let first = spawner.try_spawn(0, grid(5, 5), &snake).expect("free cell");
        assert!(spawner.consume_at(first.position).is_some());

        let second = spawner.try_spawn(1, grid(5, 5), &snake).expect("free cell");
        assert_eq!(second.kind, FoodKind::Golden);

        // Golden food is always followed by normal food.
        assert!(spawner.consume_at(second.position).is_some());
        let third = spawner.try_spawn(2, grid(5, 5), &snake).expect("free cell");
        assert_eq!(third.kind, FoodKind::Normal);
    }

    #[test]
    fn golden_food_expires_after_its_window() {
        let mut spawner = FoodSpawner::with_seed(4);
        spawner.place(Food::golden(Position::new(2, 2), 5));

        assert_eq!(spawner.tick(5 + GOLDEN_FOOD_LIFETIME_TICKS), None);
        assert!(spawner.active().is_some());

        let expired = spawner.tick(6 + GOLDEN_FOOD_LIFETIME_TICKS);
        assert!(expired.is_some());
        assert_eq!(spawner.active(), None);
    }

    #[test]
    fn normal_food_never_expires() {
        let mut spawner = FoodSpawner::with_seed(5);
        spawner.place(Food::normal(Position::new(1, 1), 0));

        for tick in 0..500 {
            assert_eq!(spawner.tick(tick), None);
        }
        assert!(spawner.active().is_some());
    }

    #[test]
    fn consume_only_matches_the_food_cell() {
        let mut spawner = FoodSpawner::with_seed(6);
        spawner.place(Food::normal(Position::new(1, 1), 0));

        assert_eq!(spawner.consume_at(Position::new(2, 1)), None);
        assert!(spawner.consume_at(Position::new(1, 1)).is_some());
        assert_eq!(spawner.active(), None);
    }

    #[test]
    fn remaining_fraction_counts_down() {
        let mut spawner = FoodSpawner::with_seed(7);
        spawner.place(Food::golden(Position::new(1, 1), 10));

        assert_eq!(spawner.remaining_fraction(10), Some(1.0));
        assert_eq!(spawner.remaining_fraction(40), Some(0.5));
        assert_eq!(spawner.remaining_fraction(100), Some(0.0));

        spawner.place(Food::normal(Position::new(1, 1), 10));
        assert_eq!(spawner.remaining_fraction(40), None);
    }

    #[test]
    fn golden_food_is_worth_more() {
        let normal = Food::normal(Position::new(1, 1), 0);
        let golden = Food::golden(Position::new(2, 2), 0);

        assert_eq!((normal.points(), normal.growth()), (10, 1));
        assert_eq!((golden.points(), golden.growth()), (30, 2));
        assert_eq!(normal.expiry_tick(), None);
        assert_eq!(golden.expiry_tick(), Some(GOLDEN_FOOD_LIFETIME_TICKS));
    }
}
