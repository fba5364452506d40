//! The monitoring loop: fetch → derive → detect → present, one tick at a
//! time on a single thread.
//!
//! Every resource the loop touches (detector state, speech engine, record
//! file) is constructed up front and owned here, so there is exactly one
//! owner of all mutable state and nothing to release on exit beyond drops.
//! No error past startup terminates the loop: transport failures retry,
//! undecodable payloads skip the tick, absent-data states wait.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use crate::announce::Announcer;
use crate::client::{SessionClient, SourceError};
use crate::detector::{ShotDetector, SpeedSample};
use crate::error::SetupError;
use crate::record::FrameRecorder;

/// Extra delay after a transport failure before the next attempt.
const RETRY_DELAY: Duration = Duration::from_secs(1);
/// Extra wait while the player sits in a social lobby.
const LOBBY_WAIT: Duration = Duration::from_secs(3);
/// Extra wait while a session exists but carries no disc telemetry yet.
const NO_DISC_WAIT: Duration = Duration::from_secs(1);

pub struct Monitor {
    client: SessionClient,
    detector: ShotDetector,
    announcer: Announcer,
    recorder: Option<FrameRecorder>,
    interval: Duration,
}

impl Monitor {
    /// Assemble a monitor polling at `refresh_rate` Hz.
    pub fn new(
        client: SessionClient,
        detector: ShotDetector,
        announcer: Announcer,
        recorder: Option<FrameRecorder>,
        refresh_rate: f64,
    ) -> Result<Self, SetupError> {
        if !refresh_rate.is_finite() || refresh_rate <= 0.0 {
            return Err(SetupError::RefreshRate(refresh_rate));
        }
        Ok(Self {
            client,
            detector,
            announcer,
            recorder,
            interval: Duration::from_secs_f64(1.0 / refresh_rate),
        })
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until externally interrupted.
    pub fn run(&mut self) -> ! {
        loop {
            thread::sleep(self.interval);
            if let Some(extra) = self.tick() {
                thread::sleep(extra);
            }
        }
    }

    /// One fetch → derive → detect → present cycle. Returns an extra delay
    /// to apply before the next tick when the current state warrants one.
    fn tick(&mut self) -> Option<Duration> {
        let frame = match self.client.fetch() {
            Ok(frame) => frame,
            Err(SourceError::NoSession) => {
                debug!("no session document; waiting for match start");
                return None;
            }
            Err(SourceError::Decode(e)) => {
                debug!("skipping tick: {e}");
                return None;
            }
            Err(e @ SourceError::Http(_)) => {
                warn!("{e}; retrying");
                return Some(RETRY_DELAY);
            }
        };

        if let Some(recorder) = self.recorder.as_mut()
            && let Err(e) = recorder.record_frame(&frame)
        {
            warn!("cannot record frame: {e}");
        }

        if frame.is_lobby() {
            info!("lobby detected; waiting for match start");
            return Some(LOBBY_WAIT);
        }

        let Some(sample) = SpeedSample::from_frame(&frame) else {
            info!("no disc telemetry in session frame; waiting for match start");
            return Some(NO_DISC_WAIT);
        };
        debug!("disc speed {:.1} m/s", sample.speed);

        if let Some(event) = self.detector.observe(&sample) {
            info!(
                "{:.1} m/s by {}",
                self.announcer.headline(&event),
                event.player.as_deref().unwrap_or("unknown"),
            );
            self.announcer.announce(&event);
            if let Some(recorder) = self.recorder.as_mut()
                && let Err(e) = recorder.record_shot(&event)
            {
                warn!("cannot record shot: {e}");
            }
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
