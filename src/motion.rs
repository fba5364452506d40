//! Pure kinematics helpers over frame velocity vectors.
//!
//! All speeds are Euclidean norms in m/s, rounded to 2 decimal places to
//! match the precision the telemetry API itself reports.

use crate::frame::{Player, SessionFrame};

/// Convert a 3D velocity vector into a scalar speed (m/s, 2dp).
pub fn speed(vel: [f64; 3]) -> f64 {
    let norm = (vel[0] * vel[0] + vel[1] * vel[1] + vel[2] * vel[2]).sqrt();
    (norm * 100.0).round() / 100.0
}

/// The disc's velocity relative to its holder (object minus holder).
///
/// With a stationary holder this is the object velocity unchanged, so
/// feeding the result to [`speed`] degrades to absolute speed.
pub fn relative_velocity(holder: [f64; 3], object: [f64; 3]) -> [f64; 3] {
    [
        object[0] - holder[0],
        object[1] - holder[1],
        object[2] - holder[2],
    ]
}

/// The player currently holding the disc.
///
/// Scans teams in order, players in order within each team, and returns the
/// first with the `possession` flag set. Telemetry is expected to report at
/// most one holder; if it reports several, the first in iteration order wins.
pub fn holder(frame: &SessionFrame) -> Option<&Player> {
    frame
        .teams
        .iter()
        .flat_map(|t| t.players.iter())
        .find(|p| p.possession)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
