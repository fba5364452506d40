//! Shot detection over a stream of disc speed samples.
//!
//! The detector is a two-state machine (armed/disarmed) fed one
//! [`SpeedSample`] per telemetry tick. A disc in free flight holds a
//! near-constant speed for several consecutive frames, so a single
//! threshold test would announce the same throw once per frame; instead the
//! detector disarms itself after each emission and re-arms only when the
//! disc is observed slowing down — a caught, deflected, or resting disc can
//! be thrown again, and no explicit "throw ended" signal exists in the feed.
//!
//! The stability window serves the opposite problem: a single noisy sample
//! spiking over the threshold must not read as a throw. Only a speed that
//! persists across two consecutive samples within the configured tolerance
//! is accepted as a genuine release.

use circular_buffer::CircularBuffer;

use crate::frame::SessionFrame;
use crate::motion;

/// Number of recent speeds retained, oldest evicted first.
pub const HISTORY: usize = 10;

/// One derived observation of the disc, taken from a single frame.
#[derive(Debug, Clone)]
pub struct SpeedSample {
    /// Absolute disc speed (m/s, 2dp).
    pub speed: f64,
    /// Surface contacts since the disc was last held.
    pub bounce_count: u32,
    /// Raw world-frame disc velocity.
    pub velocity: [f64; 3],
    /// Player holding the disc at sample time, if any.
    pub holder: Option<Holder>,
}

/// The resolved possession holder at sample time.
#[derive(Debug, Clone)]
pub struct Holder {
    pub name: String,
    pub velocity: [f64; 3],
}

impl SpeedSample {
    /// Derive a sample from a frame, or `None` when the frame carries no
    /// disc telemetry (lobby, pre-match).
    pub fn from_frame(frame: &SessionFrame) -> Option<Self> {
        let disc = frame.disc.as_ref()?;
        Some(Self {
            speed: motion::speed(disc.velocity),
            bounce_count: disc.bounce_count,
            velocity: disc.velocity,
            holder: motion::holder(frame).map(|p| Holder {
                name: p.name.clone(),
                velocity: p.velocity,
            }),
        })
    }
}

/// A detected throw.
#[derive(Debug, Clone)]
pub struct ShotEvent {
    /// Absolute disc speed at release (m/s).
    pub speed: f64,
    /// Disc speed relative to the thrower's own motion (m/s). Equals
    /// `speed` when no holder was resolved.
    pub relative_speed: f64,
    /// Name of the resolved holder, if any.
    pub player: Option<String>,
}

/// The shot detection state machine. One per monitoring session; feed it
/// every sample via [`observe`](Self::observe).
#[derive(Debug)]
pub struct ShotDetector {
    min_speed: f64,
    tolerance: f64,
    recent: CircularBuffer<HISTORY, f64>,
    armed: bool,
}

impl ShotDetector {
    /// `min_speed` is the minimum qualifying release speed; `tolerance` the
    /// maximum speed change between consecutive samples still read as one
    /// sustained flight.
    pub fn new(min_speed: f64, tolerance: f64) -> Self {
        Self {
            min_speed,
            tolerance,
            recent: CircularBuffer::new(),
            armed: true,
        }
    }

    /// Feed one sample; returns a [`ShotEvent`] if this sample completes a
    /// newly detected throw. Emits at most one event per sample.
    ///
    /// A sample slower than its predecessor re-arms the detector, but only
    /// for subsequent samples: eligibility of the current sample is judged
    /// against the armed state held on entry, so a decelerating sample
    /// cannot re-announce the throw it tails.
    pub fn observe(&mut self, sample: &SpeedSample) -> Option<ShotEvent> {
        let prev = self.recent.back().copied();
        let prior_count = self.recent.len();
        self.recent.push_back(sample.speed);

        let was_armed = self.armed;
        if let Some(prev) = prev
            && sample.speed < prev
        {
            self.armed = true;
        }

        // Two prior samples guard against acting on startup noise.
        let prev = prev?;
        if prior_count < 2
            || sample.bounce_count != 0
            || !was_armed
            || sample.speed < self.min_speed
            || (sample.speed - prev).abs() > self.tolerance
        {
            return None;
        }

        self.armed = false;
        let holder_vel = sample
            .holder
            .as_ref()
            .map_or([0.0; 3], |h| h.velocity);
        Some(ShotEvent {
            speed: sample.speed,
            relative_speed: motion::speed(motion::relative_velocity(holder_vel, sample.velocity)),
            player: sample.holder.as_ref().map(|h| h.name.clone()),
        })
    }

    /// Whether a qualifying sample may currently emit an event.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Recent speeds, oldest first.
    pub fn recent_speeds(&self) -> impl Iterator<Item = f64> {
        self.recent.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(speed: f64) -> SpeedSample {
        SpeedSample {
            speed,
            bounce_count: 0,
            velocity: [speed, 0.0, 0.0],
            holder: None,
        }
    }

    fn bounced(speed: f64) -> SpeedSample {
        SpeedSample {
            bounce_count: 1,
            ..sample(speed)
        }
    }

    /// Feed a plain speed sequence, collecting the index of each emission.
    fn emissions(detector: &mut ShotDetector, speeds: &[f64]) -> Vec<usize> {
        speeds
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| detector.observe(&sample(s)).map(|_| i))
            .collect()
    }

    #[test]
    fn reference_scenario() {
        // Threshold 7.0, tolerance 0.1: event at the third sample only.
        // The fourth (9.55 < 9.6) re-arms for later samples but finds the
        // detector disarmed on entry.
        let mut d = ShotDetector::new(7.0, 0.1);
        assert_eq!(emissions(&mut d, &[2.0, 9.5, 9.6, 9.55]), vec![2]);
        assert!(d.is_armed());
    }

    #[test]
    fn one_event_per_rising_edge() {
        // Five consecutive qualifying samples in sustained flight: one event.
        let mut d = ShotDetector::new(7.0, 0.1);
        assert_eq!(
            emissions(&mut d, &[1.0, 1.0, 9.5, 9.5, 9.5, 9.5, 9.5]),
            vec![3]
        );
    }

    #[test]
    fn rearms_after_deceleration() {
        let mut d = ShotDetector::new(7.0, 0.1);
        // First throw, catch (speed collapses), second throw.
        assert_eq!(
            emissions(&mut d, &[1.0, 1.0, 8.0, 8.0, 0.5, 0.5, 9.0, 9.0]),
            vec![3, 7]
        );
    }

    #[test]
    fn no_second_event_until_slower_sample() {
        let mut d = ShotDetector::new(7.0, 0.5);
        // Monotonically rising qualifying speeds never re-arm.
        assert_eq!(
            emissions(&mut d, &[1.0, 1.0, 8.0, 8.2, 8.4, 8.6, 8.8]),
            vec![3]
        );
    }

    #[test]
    fn below_threshold_never_emits() {
        let mut d = ShotDetector::new(10.0, 0.1);
        assert!(emissions(&mut d, &[1.0, 9.9, 9.9, 9.9]).is_empty());
    }

    #[test]
    fn unstable_speed_never_emits() {
        // Each sample qualifies on threshold but never persists within
        // tolerance of its predecessor.
        let mut d = ShotDetector::new(7.0, 0.1);
        assert!(emissions(&mut d, &[1.0, 9.0, 10.0, 11.0, 12.0]).is_empty());
    }

    #[test]
    fn bouncing_disc_never_emits() {
        let mut d = ShotDetector::new(7.0, 0.1);
        d.observe(&sample(1.0));
        d.observe(&sample(9.5));
        assert!(d.observe(&bounced(9.5)).is_none());
        // Same speeds without the bounce do emit.
        assert!(d.observe(&sample(9.5)).is_some());
    }

    #[test]
    fn needs_two_prior_samples() {
        let mut d = ShotDetector::new(7.0, 0.1);
        assert!(d.observe(&sample(9.5)).is_none());
        assert!(d.observe(&sample(9.5)).is_none());
        assert!(d.observe(&sample(9.5)).is_some());
    }

    #[test]
    fn history_capped_at_ten() {
        let mut d = ShotDetector::new(1000.0, 0.0);
        for i in 0..25 {
            d.observe(&sample(i as f64));
        }
        let recent: Vec<f64> = d.recent_speeds().collect();
        assert_eq!(recent.len(), HISTORY);
        // Oldest evicted first, insertion order preserved.
        assert_eq!(recent[0], 15.0);
        assert_eq!(recent[9], 24.0);
    }

    #[test]
    fn event_carries_relative_speed_and_holder() {
        let mut d = ShotDetector::new(3.0, 0.1);
        let throw = SpeedSample {
            speed: 5.0,
            bounce_count: 0,
            velocity: [5.0, 0.0, 0.0],
            holder: Some(Holder {
                name: "ViperMkVII".into(),
                velocity: [1.0, 0.0, 0.0],
            }),
        };
        d.observe(&sample(5.0));
        d.observe(&sample(5.0));
        let event = d.observe(&throw).unwrap();
        assert_eq!(event.speed, 5.0);
        assert_eq!(event.relative_speed, 4.0);
        assert_eq!(event.player.as_deref(), Some("ViperMkVII"));
    }

    #[test]
    fn relative_speed_degrades_to_absolute_without_holder() {
        let mut d = ShotDetector::new(3.0, 0.1);
        d.observe(&sample(5.0));
        d.observe(&sample(5.0));
        let event = d.observe(&sample(5.0)).unwrap();
        assert_eq!(event.relative_speed, event.speed);
        assert!(event.player.is_none());
    }

    #[test]
    fn sample_from_frame() {
        let frame = SessionFrame::from_json(
            r#"{
                "match_type": "Echo_Arena",
                "disc": {"velocity": [3.0, 4.0, 12.0], "bounce_count": 0},
                "teams": [{"players": [
                    {"name": "holder", "velocity": [1.0, 0.0, 0.0], "possession": true}
                ]}]
            }"#,
        )
        .unwrap();
        let sample = SpeedSample::from_frame(&frame).unwrap();
        assert_eq!(sample.speed, 13.0);
        assert_eq!(sample.holder.as_ref().unwrap().name, "holder");
    }

    #[test]
    fn sample_from_frame_without_disc() {
        let frame = SessionFrame::from_json(r#"{"match_type": "Social_2.0"}"#).unwrap();
        assert!(SpeedSample::from_frame(&frame).is_none());
    }
}
