//! Session telemetry data model and JSON decode.
//!
//! One [`SessionFrame`] is one snapshot of game state from the headset's
//! `/session` API. Frames are sparse: during lobby or pre-match states the
//! `disc` record and `teams` list may be missing entirely, and individual
//! players may omit `velocity` or `possession`. Every consumed field that can
//! be absent defaults rather than erroring; unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// `match_type` prefix reported while the player sits in a social lobby.
const LOBBY_PREFIX: &str = "Social";

/// One telemetry snapshot for a single point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFrame {
    /// Match type string, e.g. `"Echo_Arena"` or `"Social_2.0"`. Absent in
    /// some pre-match states.
    pub match_type: Option<String>,

    /// Disc motion telemetry. Absent until a match is running.
    pub disc: Option<Disc>,

    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Disc motion telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disc {
    /// World-frame velocity [x, y, z] (m/s).
    pub velocity: [f64; 3],

    /// Number of surface contacts since the disc was last held. Non-zero
    /// while the disc is rebounding rather than in thrown flight.
    #[serde(default)]
    pub bounce_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,

    /// World-frame velocity [x, y, z] (m/s). Zero when not reported.
    #[serde(default)]
    pub velocity: [f64; 3],

    #[serde(default)]
    pub possession: bool,
}

impl SessionFrame {
    /// Decode a session document fetched from the telemetry API.
    ///
    /// An empty (whitespace-only) body is `FrameError::Empty` — the API
    /// serves one when no session exists.
    pub fn from_json(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(FrameError::Empty);
        }
        Ok(serde_json::from_str(body)?)
    }

    /// True while the player is in a social lobby rather than a match.
    pub fn is_lobby(&self) -> bool {
        self.match_type
            .as_deref()
            .is_some_and(|m| m.starts_with(LOBBY_PREFIX))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
