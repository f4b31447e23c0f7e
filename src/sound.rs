use std::io::{self, Write};

use fundsp::prelude as dsp;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, info, warn};

/// Sample rate of the synthesized cues.
const SAMPLE_RATE: u32 = 44_100;

/// Peak amplitude of a cue, well below clipping.
const TONE_VOLUME: f32 = 0.15;

/// Audible events raised by the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SoundCue {
    Start,
    Eat,
    EatGolden,
    GameOver,
}

impl SoundCue {
    /// Pitch in Hz and length in seconds of the beep for this cue.
    #[must_use]
    pub fn tone(self) -> (f32, f32) {
        match self {
            Self::Start => (523.0, 0.10),
            Self::Eat => (440.0, 0.08),
            Self::EatGolden => (660.0, 0.12),
            Self::GameOver => (200.0, 0.20),
        }
    }
}

/// Something that can make a noise for a cue.
pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Opens the default audio device, falling back to the terminal bell when
/// there is none.
#[must_use]
pub fn open_default() -> Box<dyn SoundSink> {
    match ToneSink::new() {
        Ok(sink) => {
            info!("audio output opened");
            Box::new(sink)
        }
        Err(error) => {
            warn!(%error, "no audio output, using the terminal bell");
            Box::new(TerminalBell)
        }
    }
}

/// Plays a short square-wave beep per cue on the default output device.
pub struct ToneSink {
    // Dropping the stream silences the handle.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl ToneSink {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl SoundSink for ToneSink {
    fn play(&mut self, cue: SoundCue) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, tone_samples(cue)));
                sink.detach();
            }
            Err(error) => debug!(%error, ?cue, "audio sink unavailable"),
        }
    }
}

/// Renders the mono samples for `cue`.
#[must_use]
pub fn tone_samples(cue: SoundCue) -> Vec<f32> {
    let (frequency, duration) = cue.tone();
    let mut node = dsp::square_hz(frequency) * TONE_VOLUME
        * dsp::lfo(move |t: f32| dsp::xerp(1.0, 0.01, (t / duration).min(1.0)));
    render_mono(&mut node, SAMPLE_RATE, duration)
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(f64::from(sample_rate));
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    (0..sample_count).map(|_| node.get_mono()).collect()
}

/// Rings the terminal bell. Used when no audio device can be opened; the
/// golden and game-over cues ring twice to stand out.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring(times: usize) -> io::Result<()> {
        let mut stdout = io::stdout();
        for _ in 0..times {
            stdout.write_all(b"\x07")?;
        }
        stdout.flush()
    }
}

impl SoundSink for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        let times = match cue {
            SoundCue::Start | SoundCue::Eat => 1,
            SoundCue::EatGolden | SoundCue::GameOver => 2,
        };
        if let Err(error) = Self::ring(times) {
            debug!(%error, ?cue, "terminal bell failed");
        }
    }
}

/// Records cues in order; handy for asserting what the game asked for.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<SoundCue>,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}
