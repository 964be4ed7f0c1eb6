//! Tick timing statistics

use std::collections::VecDeque;
use std::time::Duration;

/// Windowed moving average of tick durations, with min/max.
#[derive(Debug)]
pub struct TickStats {
    window: usize,
    samples: VecDeque<Duration>,
    sum: Duration,
    min: Duration,
    max: Duration,
    total_ticks: u64,
}

impl TickStats {
    /// Create stats with the given moving-average window size.
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            samples: VecDeque::with_capacity(window),
            sum: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
            total_ticks: 0,
        }
    }

    /// Record one tick duration; returns the current moving average.
    pub fn record(&mut self, duration: Duration) -> Duration {
        if self.samples.len() >= self.window {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum = self.sum.saturating_sub(oldest);
            }
        }
        self.samples.push_back(duration);
        self.sum += duration;
        self.total_ticks += 1;
        self.min = self.min.min(duration);
        self.max = self.max.max(duration);
        self.average()
    }

    /// Moving average over the current window.
    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            Duration::ZERO
        } else {
            self.sum / self.samples.len() as u32
        }
    }

    pub fn min(&self) -> Duration {
        if self.total_ticks == 0 {
            Duration::ZERO
        } else {
            self.min
        }
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }
}

impl Default for TickStats {
    fn default() -> Self {
        Self::new(15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_window() {
        let mut stats = TickStats::new(2);
        stats.record(Duration::from_millis(10));
        assert_eq!(stats.average(), Duration::from_millis(10));
        stats.record(Duration::from_millis(30));
        assert_eq!(stats.average(), Duration::from_millis(20));
        // Window of 2: the 10ms sample falls out.
        stats.record(Duration::from_millis(50));
        assert_eq!(stats.average(), Duration::from_millis(40));
        assert_eq!(stats.total_ticks(), 3);
    }

    #[test]
    fn test_min_max() {
        let mut stats = TickStats::new(4);
        assert_eq!(stats.min(), Duration::ZERO);
        stats.record(Duration::from_millis(5));
        stats.record(Duration::from_millis(1));
        stats.record(Duration::from_millis(9));
        assert_eq!(stats.min(), Duration::from_millis(1));
        assert_eq!(stats.max(), Duration::from_millis(9));
    }
}
