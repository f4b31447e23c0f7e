use std::time::Duration;

use tracing::{debug, info};

use crate::config::{Difficulty, SessionConfig, WrapMode};
use crate::error::ConfigError;
use crate::food::{FoodKind, FoodSpawner};
use crate::game::{GameSession, TickOutcome};
use crate::input::{Direction, InputEvent, KeyContext};
use crate::persistence::{PersistenceState, RecordStore, save_best_effort};
use crate::snapshot::{FoodView, SessionView, Snapshot};
use crate::sound::{SoundCue, SoundSink};

/// Top-level screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AppState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Rows of the main menu, top to bottom.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuItem {
    Start,
    Mode,
    Wrap,
    Sound,
    Quit,
}

impl MenuItem {
    pub const ALL: [Self; 5] = [Self::Start, Self::Mode, Self::Wrap, Self::Sound, Self::Quit];

    fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let index = Self::ALL.iter().position(|item| *item == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Self::ALL[next]
    }
}

/// Side effect attached to a transition.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Action {
    None,
    SelectPrev,
    SelectNext,
    ChangeValue { forward: bool },
    /// `from_menu` is false for a restart, which starts silently.
    StartSession { from_menu: bool },
    EndSession,
    Steer(Direction),
    ToggleSound,
    Exit,
}

/// Work the state machine asks its collaborators to do.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Effect {
    Save(PersistenceState),
    Play(SoundCue),
    Quit,
}

/// The transition table: `(state, event)` to next state plus action.
///
/// `selected` is the highlighted menu row; it only matters for `Confirm` in
/// the menu.
#[must_use]
pub fn transition(state: AppState, event: InputEvent, selected: MenuItem) -> (AppState, Action) {
    use AppState::{GameOver, Menu, Paused, Playing};

    match (state, event) {
        (_, InputEvent::Quit) => (state, Action::Exit),
        (_, InputEvent::ToggleSound) => (state, Action::ToggleSound),

        (Menu, InputEvent::SelectPrev) => (Menu, Action::SelectPrev),
        (Menu, InputEvent::SelectNext) => (Menu, Action::SelectNext),
        (Menu, InputEvent::ChangeValueLeft) => (Menu, Action::ChangeValue { forward: false }),
        (Menu, InputEvent::ChangeValueRight) => (Menu, Action::ChangeValue { forward: true }),
        (Menu, InputEvent::Confirm) => match selected {
            MenuItem::Start => (Playing, Action::StartSession { from_menu: true }),
            MenuItem::Quit => (Menu, Action::Exit),
            MenuItem::Mode | MenuItem::Wrap | MenuItem::Sound => (Menu, Action::None),
        },

        (Playing, InputEvent::Pause) => (Paused, Action::None),
        (Paused, InputEvent::Pause) => (Playing, Action::None),

        (Playing | GameOver, InputEvent::Restart) => {
            (Playing, Action::StartSession { from_menu: false })
        }
        (Playing | Paused | GameOver, InputEvent::Menu) => (Menu, Action::EndSession),

        (Playing, event) => match event.direction() {
            Some(direction) => (Playing, Action::Steer(direction)),
            None => (Playing, Action::None),
        },

        (state, _) => (state, Action::None),
    }
}

/// Owns the screen state, menu settings, persisted state and the session.
#[derive(Debug)]
pub struct AppStateMachine {
    state: AppState,
    difficulty: Difficulty,
    wrap: WrapMode,
    selection: MenuItem,
    persistence: PersistenceState,
    session: Option<GameSession>,
    template: SessionConfig,
    seed: Option<u64>,
    sessions_started: u64,
}

impl AppStateMachine {
    /// Validates `config` and starts in the menu with its difficulty and wrap
    /// preselected.
    pub fn new(config: SessionConfig, persistence: PersistenceState) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            state: AppState::Menu,
            difficulty: config.difficulty,
            wrap: config.wrap,
            selection: MenuItem::Start,
            persistence,
            session: None,
            template: config,
            seed: None,
            sessions_started: 0,
        })
    }

    /// Makes every session deterministic, derived from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Applies one input event and returns the resulting effects.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        let (next, action) = transition(self.state, event, self.selection);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?event, "state transition");
        }
        self.state = next;

        let mut effects = Vec::new();
        match action {
            Action::None => {}
            Action::SelectPrev => self.selection = self.selection.step(false),
            Action::SelectNext => self.selection = self.selection.step(true),
            Action::ChangeValue { forward } => self.change_value(forward, &mut effects),
            Action::StartSession { from_menu } => {
                self.start_session();
                if from_menu {
                    self.cue(SoundCue::Start, &mut effects);
                }
            }
            Action::EndSession => self.session = None,
            Action::Steer(direction) => {
                if let Some(session) = self.session.as_mut() {
                    session.snake.set_heading(direction);
                }
            }
            Action::ToggleSound => self.set_sound(!self.persistence.sound, &mut effects),
            Action::Exit => {
                info!("quit requested");
                effects.push(Effect::Save(self.persistence.clone()));
                effects.push(Effect::Quit);
            }
        }
        effects
    }

    /// Advances the running session by one tick. Does nothing unless playing.
    pub fn tick(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.state != AppState::Playing {
            return effects;
        }
        let Some(session) = self.session.as_mut() else {
            return effects;
        };

        match session.tick() {
            TickOutcome::AteFood(FoodKind::Normal) => self.cue(SoundCue::Eat, &mut effects),
            TickOutcome::AteFood(FoodKind::Golden) => self.cue(SoundCue::EatGolden, &mut effects),
            TickOutcome::GameOver(_) => {
                self.persistence.records = session.scores.high_scores().clone();
                self.state = AppState::GameOver;
                effects.push(Effect::Save(self.persistence.clone()));
                self.cue(SoundCue::GameOver, &mut effects);
            }
            TickOutcome::Moved | TickOutcome::GoldenExpired | TickOutcome::Idle => {}
        }
        effects
    }

    fn start_session(&mut self) {
        let config = SessionConfig {
            difficulty: self.difficulty,
            wrap: self.wrap,
            ..self.template
        };
        let records = self.persistence.records.clone();
        let session = match self.seed {
            Some(seed) => GameSession::with_spawner(
                config,
                records,
                FoodSpawner::with_seed(seed.wrapping_add(self.sessions_started)),
            ),
            None => GameSession::new(config, records),
        };

        self.sessions_started += 1;
        self.session = Some(session);
    }

    fn change_value(&mut self, forward: bool, effects: &mut Vec<Effect>) {
        match self.selection {
            MenuItem::Mode => self.difficulty = self.difficulty.cycled(forward),
            MenuItem::Wrap => self.wrap = self.wrap.toggled(),
            MenuItem::Sound => self.set_sound(!self.persistence.sound, effects),
            MenuItem::Start | MenuItem::Quit => {}
        }
    }

    fn set_sound(&mut self, enabled: bool, effects: &mut Vec<Effect>) {
        self.persistence.sound = enabled;
        info!(enabled, "sound toggled");
        effects.push(Effect::Save(self.persistence.clone()));
    }

    fn cue(&self, cue: SoundCue, effects: &mut Vec<Effect>) {
        if self.persistence.sound {
            effects.push(Effect::Play(cue));
        }
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.persistence.sound
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    #[must_use]
    pub fn selection(&self) -> MenuItem {
        self.selection
    }

    #[must_use]
    pub fn persistence(&self) -> &PersistenceState {
        &self.persistence
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Mutable access to the running session, e.g. to script a scenario.
    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// Interval until the next tick, or `None` when the simulation is halted.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        match (self.state, &self.session) {
            (AppState::Playing, Some(session)) => Some(session.tick_interval()),
            _ => None,
        }
    }

    /// Key map that applies in the current state.
    #[must_use]
    pub fn key_context(&self) -> KeyContext {
        match self.state {
            AppState::Menu => KeyContext::Menu,
            AppState::Playing | AppState::Paused | AppState::GameOver => KeyContext::Game,
        }
    }

    /// Builds the read-only view for this frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let session = self.session.as_ref().map(|session| SessionView {
            snake: &session.snake,
            food: session.food.active().map(|food| FoodView {
                position: food.position,
                kind: food.kind,
                remaining: session.food.remaining_fraction(session.tick_count()),
            }),
            score: session.scores.score(),
            length: session.scores.length(),
            speed_tier: session.scores.speed_tier(),
            best: session.best(),
            tick_count: session.tick_count(),
            death_reason: session.death_reason(),
            new_record: session.is_new_record(),
        });

        Snapshot {
            state: self.state,
            grid: self.template.grid,
            difficulty: self.difficulty,
            wrap: self.wrap,
            sound: self.persistence.sound,
            menu_selection: self.selection,
            record: self.persistence.records.get(self.difficulty, self.wrap),
            session,
        }
    }
}

/// Hands effects to their collaborators. Returns true when the app should
/// exit.
pub fn apply_effects(
    effects: Vec<Effect>,
    store: &dyn RecordStore,
    sound: &mut dyn SoundSink,
) -> bool {
    let mut quit = false;
    for effect in effects {
        match effect {
            Effect::Save(state) => save_best_effort(store, &state),
            Effect::Play(cue) => sound.play(cue),
            Effect::Quit => quit = true,
        }
    }
    quit
}
