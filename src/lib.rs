pub mod announce;
pub mod client;
pub mod detector;
pub mod error;
pub mod frame;
pub mod monitor;
pub mod motion;
pub mod record;

pub use announce::{Announcer, Banner, SpeechEngine};
pub use client::{DEFAULT_PORT, SessionClient, SourceError};
pub use detector::{ShotDetector, ShotEvent, SpeedSample};
pub use error::{FrameError, SetupError};
pub use frame::SessionFrame;
pub use monitor::Monitor;
pub use record::FrameRecorder;
