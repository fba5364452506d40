//! Shot presentation: FIGlet banner and spoken read-out.
//!
//! Both outputs are optional and independently selectable. The speech
//! engine and banner font are constructed once at startup and owned by the
//! [`Announcer`]; a font that fails to load or a synthesizer that cannot be
//! spawned is a configuration error, caught before the monitor loop starts.

use std::path::Path;
use std::process::{Command, Stdio};

use figlet_rs::FIGfont;
use log::warn;

use crate::detector::ShotEvent;
use crate::error::SetupError;

/// Default speech synthesizer command. The formatted speed is passed as the
/// single argument; the call blocks until the utterance finishes.
pub const DEFAULT_TTS_COMMAND: &str = "espeak";

/// Large-text renderer backed by a FIGlet font.
#[derive(Debug)]
pub struct Banner {
    font: FIGfont,
}

impl Banner {
    /// The embedded standard font.
    pub fn standard() -> Result<Self, SetupError> {
        let font = FIGfont::standard().map_err(|reason| SetupError::BannerFont {
            path: "<standard>".into(),
            reason,
        })?;
        Ok(Self { font })
    }

    /// Load a `.flf` font file.
    pub fn from_file(path: &Path) -> Result<Self, SetupError> {
        let font =
            FIGfont::from_file(&path.to_string_lossy()).map_err(|reason| SetupError::BannerFont {
                path: path.display().to_string(),
                reason,
            })?;
        Ok(Self { font })
    }

    /// Render `text` in large characters, or `None` for glyphs the font
    /// does not cover.
    pub fn render(&self, text: &str) -> Option<String> {
        self.font.convert(text).map(|figure| figure.to_string())
    }
}

/// Spoken output via an external synthesizer process.
#[derive(Debug)]
pub struct SpeechEngine {
    program: String,
}

impl SpeechEngine {
    /// Probe that `program` can be spawned at all, so a missing synthesizer
    /// fails at startup rather than on the first shot.
    pub fn new(program: &str) -> Result<Self, SetupError> {
        Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| SetupError::Speech {
                program: program.into(),
                source,
            })?;
        Ok(Self {
            program: program.into(),
        })
    }

    /// Speak `text`, blocking until the utterance completes. Runtime
    /// failures are logged, never fatal.
    pub fn say(&self, text: &str) {
        let result = Command::new(&self.program)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match result {
            Ok(status) if !status.success() => {
                warn!("speech synthesizer exited with {status}");
            }
            Err(e) => warn!("speech synthesizer failed: {e}"),
            Ok(_) => {}
        }
    }
}

/// Renders detected shots to the configured outputs.
pub struct Announcer {
    banner: Option<Banner>,
    speech: Option<SpeechEngine>,
    /// Announce throw speed (relative to the thrower) instead of absolute
    /// disc speed.
    throw_speed: bool,
}

impl Announcer {
    pub fn new(banner: Option<Banner>, speech: Option<SpeechEngine>, throw_speed: bool) -> Self {
        Self {
            banner,
            speech,
            throw_speed,
        }
    }

    /// The speed figure this announcer reads out for `event`.
    pub fn headline(&self, event: &ShotEvent) -> f64 {
        if self.throw_speed {
            event.relative_speed
        } else {
            event.speed
        }
    }

    /// Present one shot on every enabled output.
    pub fn announce(&self, event: &ShotEvent) {
        let headline = self.headline(event);

        if let Some(banner) = &self.banner {
            let text = match &event.player {
                Some(name) => format!("{headline:.1}: {name}"),
                None => format!("{headline:.1}"),
            };
            match banner.render(&text) {
                Some(rendered) => println!("\n{rendered}"),
                None => warn!("banner font cannot render {text:?}"),
            }
        }

        if let Some(speech) = &self.speech {
            speech.say(&format!("{headline:.1}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
