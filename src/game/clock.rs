use super::config::ClockConfig;

/// FrameClock turns animation-frame timestamps into whole simulation ticks.
///
/// Physics constants are tuned per nominal 60 Hz tick; accumulating real
/// elapsed time and stepping in fixed ticks keeps a 144 Hz display and a
/// 30 Hz one running the game at the same pace.
#[derive(Clone, Debug)]
pub struct FrameClock {
    config: ClockConfig,
    last_ms: Option<f64>, // timestamp of the previous frame
    accumulator_ms: f64,  // elapsed time not yet consumed by ticks
}

impl FrameClock {
    pub fn new(config: ClockConfig) -> Self {
        Self { config, last_ms: None, accumulator_ms: 0.0 }
    }

    /// Number of ticks to simulate for the frame stamped `now_ms`.
    ///
    /// The first frame only establishes the time base. Long stalls (a
    /// backgrounded tab) are capped so the game never fast-forwards.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        let delta = (now_ms - last).min(self.config.max_frame_delta_ms).max(0.0);
        self.accumulator_ms += delta;

        let due = (self.accumulator_ms / self.config.tick_ms).floor();
        let ticks = if due >= f64::from(self.config.max_ticks_per_frame) {
            self.config.max_ticks_per_frame
        } else {
            due as u32
        };
        self.accumulator_ms -= f64::from(ticks) * self.config.tick_ms;
        if ticks == self.config.max_ticks_per_frame {
            // Drop backlog beyond one tick instead of spiralling.
            self.accumulator_ms = self.accumulator_ms.min(self.config.tick_ms);
        }
        ticks
    }

    /// Forgets the time base, e.g. after the loop was paused.
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator_ms = 0.0;
    }
}
