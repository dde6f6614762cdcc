use std::time::Duration;

/// Configuration for a playback run.
///
/// The interval mirrors the speed slider: 5 to 200 ms per step, in 5 ms
/// increments.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    interval: Duration,
}

impl PlaybackConfig {
    pub const MIN_MS: u64 = 5;
    pub const MAX_MS: u64 = 200;
    pub const STEP_MS: u64 = 5;
    pub const DEFAULT_MS: u64 = 30;

    /// Interval of `ms` milliseconds, clamped and rounded to the nearest
    /// step.
    pub fn with_interval_ms(ms: u64) -> Self {
        let ms = ms.clamp(Self::MIN_MS, Self::MAX_MS);
        let ms = (ms + Self::STEP_MS / 2) / Self::STEP_MS * Self::STEP_MS;
        Self {
            interval: Duration::from_millis(ms.clamp(Self::MIN_MS, Self::MAX_MS)),
        }
    }

    /// Time between two playback steps.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }

    /// Shorter interval by one step.
    pub fn faster(self) -> Self {
        Self::with_interval_ms(self.interval_ms().saturating_sub(Self::STEP_MS))
    }

    /// Longer interval by one step.
    pub fn slower(self) -> Self {
        Self::with_interval_ms(self.interval_ms() + Self::STEP_MS)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::with_interval_ms(Self::DEFAULT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_30ms() {
        assert_eq!(PlaybackConfig::default().interval_ms(), 30);
    }

    #[test]
    fn clamps_and_rounds() {
        assert_eq!(PlaybackConfig::with_interval_ms(0).interval_ms(), 5);
        assert_eq!(PlaybackConfig::with_interval_ms(1000).interval_ms(), 200);
        assert_eq!(PlaybackConfig::with_interval_ms(42).interval_ms(), 40);
        assert_eq!(PlaybackConfig::with_interval_ms(43).interval_ms(), 45);
    }

    #[test]
    fn speed_steps_stay_in_range() {
        let c = PlaybackConfig::with_interval_ms(5);
        assert_eq!(c.faster().interval_ms(), 5);
        assert_eq!(c.slower().interval_ms(), 10);
        let c = PlaybackConfig::with_interval_ms(200);
        assert_eq!(c.slower().interval_ms(), 200);
        assert_eq!(c.faster().interval_ms(), 195);
    }
}
