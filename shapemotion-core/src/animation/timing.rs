/// Time normalisation: start delay, duration, repeats and reversal
use std::time::Duration;

use crate::error::{Result, ShapeError};

/// Where an animation is at a given elapsed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    /// Still inside the start delay
    Pending,
    /// Normalised time within the current cycle
    Running(f32),
    /// All cycles played; holds the final normalised time
    Finished(f32),
}

impl Progress {
    pub fn fraction(&self) -> Option<f32> {
        match self {
            Progress::Pending => None,
            Progress::Running(t) | Progress::Finished(t) => Some(*t),
        }
    }
}

/// Timing of one animation path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    duration: Duration,
    repeat_count: u32,
    reverse_on_repeat: bool,
    start_delay: Duration,
}

impl Timing {
    /// Play once over `duration`, which must be non-zero
    pub fn new(duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(ShapeError::NonPositiveDuration(0.0));
        }
        Ok(Self {
            duration,
            repeat_count: 0,
            reverse_on_repeat: false,
            start_delay: Duration::ZERO,
        })
    }

    pub fn from_millis(millis: u64) -> Result<Self> {
        Self::new(Duration::from_millis(millis))
    }

    pub fn from_secs_f64(secs: f64) -> Result<Self> {
        if !(secs > 0.0) || !secs.is_finite() {
            return Err(ShapeError::NonPositiveDuration(secs));
        }
        let duration =
            Duration::try_from_secs_f64(secs).map_err(|_| ShapeError::NonPositiveDuration(secs))?;
        Self::new(duration)
    }

    /// Extra cycles after the first; negative counts are rejected
    pub fn with_repeat(mut self, count: i64) -> Result<Self> {
        if count < 0 {
            return Err(ShapeError::NegativeRepeatCount(count));
        }
        self.repeat_count =
            u32::try_from(count).map_err(|_| ShapeError::RepeatCountTooLarge(count))?;
        Ok(self)
    }

    /// Play odd-numbered repeats backwards
    pub fn reversing(mut self, reverse: bool) -> Self {
        self.reverse_on_repeat = reverse;
        self
    }

    pub fn with_start_delay(mut self, delay: Duration) -> Self {
        self.start_delay = delay;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn reverse_on_repeat(&self) -> bool {
        self.reverse_on_repeat
    }

    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    /// Delay plus every cycle; a follow-up path can use this as its start delay.
    /// Saturates at `Duration::MAX`.
    pub fn end(&self) -> Duration {
        self.duration
            .checked_mul(self.repeat_count.saturating_add(1))
            .and_then(|cycles| cycles.checked_add(self.start_delay))
            .unwrap_or(Duration::MAX)
    }

    pub fn progress(&self, elapsed: Duration) -> Progress {
        if elapsed < self.start_delay {
            return Progress::Pending;
        }

        let local = (elapsed - self.start_delay).as_secs_f64();
        let cycle_len = self.duration.as_secs_f64();
        let cycles = self.repeat_count as f64 + 1.0;

        if local >= cycle_len * cycles {
            let last_reversed = self.reverse_on_repeat && self.repeat_count % 2 == 1;
            return Progress::Finished(if last_reversed { 0.0 } else { 1.0 });
        }

        let cycle = (local / cycle_len).floor() as u64;
        let fraction = ((local % cycle_len) / cycle_len) as f32;
        if self.reverse_on_repeat && cycle % 2 == 1 {
            Progress::Running(1.0 - fraction)
        } else {
            Progress::Running(fraction)
        }
    }
}
