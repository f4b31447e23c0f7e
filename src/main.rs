use std::fs;
use std::io;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use snake_arcade::app::{AppStateMachine, apply_effects};
use snake_arcade::config::{Difficulty, FRAME_INTERVAL, SessionConfig, WrapMode};
use snake_arcade::input::InputHandler;
use snake_arcade::logging;
use snake_arcade::persistence::{JsonRecordStore, RecordStore, data_dir, load_or_default};
use snake_arcade::renderer;
use snake_arcade::sound::{self, SoundSink};
use snake_arcade::terminal::{TerminalSession, install_panic_hook};
use tracing::{error, info};

/// Arcade Snake in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Difficulty preselected in the menu.
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    mode: Difficulty,

    /// Whether the snake wraps around the edges.
    #[arg(long, value_enum, default_value_t = WrapMode::Off)]
    wrap: WrapMode,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_dir = data_dir();
    let _log_guard = fs::create_dir_all(&log_dir)
        .ok()
        .and_then(|()| logging::init(&log_dir));

    let store = JsonRecordStore::at_default_location();
    let persistence = load_or_default(&store);

    let config = SessionConfig {
        difficulty: cli.mode,
        wrap: cli.wrap,
        ..SessionConfig::default()
    };
    let app = match AppStateMachine::new(config, persistence) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("snake-arcade: {error}");
            return ExitCode::from(2);
        }
    };

    info!(mode = %cli.mode, wrap = %cli.wrap, records = %store.path().display(), "starting");
    install_panic_hook();

    let mut speaker = sound::open_default();
    match run(app, &store, speaker.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "terminal failure");
            eprintln!("snake-arcade: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut app: AppStateMachine, store: &dyn RecordStore, sound: &mut dyn SoundSink) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let mut last_tick = Instant::now();
    let mut ticking = false;

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &app.snapshot()))?;

        for event in input.poll_events(app.key_context())? {
            let effects = app.handle(event);
            if apply_effects(effects, store, sound) {
                info!("bye");
                return Ok(());
            }
        }

        // At most one simulation step per frame; late ticks are not caught up.
        match app.tick_interval() {
            Some(interval) => {
                if !ticking {
                    last_tick = Instant::now();
                    ticking = true;
                }
                if last_tick.elapsed() >= interval {
                    last_tick = Instant::now();
                    let effects = app.tick();
                    apply_effects(effects, store, sound);
                }
            }
            None => ticking = false,
        }

        let until_tick = app
            .tick_interval()
            .map(|interval| interval.saturating_sub(last_tick.elapsed()));
        thread::sleep(frame_sleep(until_tick));
    }
}

/// Pause before the next frame, cut short when the next tick is due sooner.
fn frame_sleep(until_tick: Option<Duration>) -> Duration {
    until_tick.map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::{Cli, frame_sleep};
    use snake_arcade::config::{Difficulty, FRAME_INTERVAL, WrapMode};

    #[test]
    fn defaults_to_normal_without_wrap() {
        let cli = Cli::try_parse_from(["snake-arcade"]).expect("defaults parse");

        assert_eq!(cli.mode, Difficulty::Normal);
        assert_eq!(cli.wrap, WrapMode::Off);
    }

    #[test]
    fn accepts_mode_and_wrap_flags() {
        let cli = Cli::try_parse_from(["snake-arcade", "--mode", "hard", "--wrap", "on"])
            .expect("valid flags parse");

        assert_eq!(cli.mode, Difficulty::Hard);
        assert_eq!(cli.wrap, WrapMode::On);
    }

    #[test]
    fn frame_sleep_never_overshoots_the_next_tick() {
        assert_eq!(frame_sleep(None), FRAME_INTERVAL);
        assert_eq!(frame_sleep(Some(Duration::from_millis(100))), FRAME_INTERVAL);
        assert_eq!(
            frame_sleep(Some(Duration::from_millis(5))),
            Duration::from_millis(5)
        );
        assert_eq!(frame_sleep(Some(Duration::ZERO)), Duration::ZERO);
    }

    #[test]
    fn rejects_unknown_values() {
        assert!(Cli::try_parse_from(["snake-arcade", "--mode", "insane"]).is_err());
        assert!(Cli::try_parse_from(["snake-arcade", "--wrap", "maybe"]).is_err());
    }
}
