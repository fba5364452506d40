//! Append-only session log.
//!
//! One record per line, each prefixed with a local ISO-8601 timestamp:
//! decoded session frames re-serialized as JSON, plus one derived speed
//! line per detected shot. Only successfully fetched-and-decoded frames are
//! recorded. The writer is flushed after every record so a hard kill loses
//! at most the line in progress.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::detector::ShotEvent;
use crate::error::SetupError;
use crate::frame::SessionFrame;

#[derive(Debug)]
pub struct FrameRecorder {
    out: BufWriter<File>,
}

impl FrameRecorder {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, SetupError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SetupError::Record {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Append one decoded frame.
    pub fn record_frame(&mut self, frame: &SessionFrame) -> io::Result<()> {
        let json = serde_json::to_string(frame)?;
        writeln!(self.out, "{} {}", Local::now().to_rfc3339(), json)?;
        self.out.flush()
    }

    /// Append one derived speed line for a detected shot.
    pub fn record_shot(&mut self, event: &ShotEvent) -> io::Result<()> {
        writeln!(
            self.out,
            "{} shot speed={:.2} relative={:.2} player={}",
            Local::now().to_rfc3339(),
            event.speed,
            event.relative_speed,
            event.player.as_deref().unwrap_or("-"),
        )?;
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("echochrono-{name}-{}", std::process::id()))
    }

    #[test]
    fn records_are_timestamped_lines() {
        let path = temp_path("frames");
        let frame = SessionFrame::from_json(r#"{"match_type": "Echo_Arena"}"#).unwrap();
        {
            let mut recorder = FrameRecorder::open(&path).unwrap();
            recorder.record_frame(&frame).unwrap();
            recorder
                .record_shot(&ShotEvent {
                    speed: 9.5,
                    relative_speed: 8.25,
                    player: None,
                })
                .unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        // Timestamp prefix, then the frame JSON.
        let (_, json) = lines[0].split_once(' ').unwrap();
        let reparsed = SessionFrame::from_json(json).unwrap();
        assert_eq!(reparsed.match_type.as_deref(), Some("Echo_Arena"));
        assert!(lines[1].contains("shot speed=9.50 relative=8.25 player=-"));
    }

    #[test]
    fn appends_across_reopens() {
        let path = temp_path("append");
        let frame = SessionFrame::from_json(r#"{}"#).unwrap();
        for _ in 0..2 {
            let mut recorder = FrameRecorder::open(&path).unwrap();
            recorder.record_frame(&frame).unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn unopenable_path_is_setup_error() {
        let err = FrameRecorder::open(Path::new("/nonexistent-dir/log")).unwrap_err();
        assert!(matches!(err, SetupError::Record { .. }));
    }
}
