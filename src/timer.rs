use std::time::{Duration, Instant};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A recurring one-second tick owned by exactly one quiz session.
///
/// Ticks are counted against a fixed anchor, so polling late never
/// stretches the interval. Dropping the ticker cancels it.
#[derive(Debug)]
pub struct Ticker {
    anchor: Instant,
    interval: Duration,
}

impl Ticker {
    pub fn start() -> Self {
        Self::with_interval(TICK_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self::anchored(Instant::now(), interval)
    }

    pub fn anchored(anchor: Instant, interval: Duration) -> Self {
        Self { anchor, interval }
    }

    /// Whole intervals completed since the last call.
    pub fn due(&mut self) -> u32 {
        self.due_at(Instant::now())
    }

    /// Whole intervals completed up to `now`. The anchor moves forward by
    /// exactly that many intervals, so the remainder carries over.
    pub fn due_at(&mut self, now: Instant) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        let elapsed = now.saturating_duration_since(self.anchor);
        let count = (elapsed.as_nanos() / self.interval.as_nanos()).min(u32::MAX as u128) as u32;
        self.anchor += self.interval * count;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tick_before_interval() {
        let mut ticker = Ticker::with_interval(Duration::from_secs(60));
        assert_eq!(ticker.due(), 0);
    }

    #[test]
    fn test_tick_fires_after_interval() {
        let mut ticker = Ticker::with_interval(Duration::from_millis(20));
        std::thread::sleep(Duration::from_millis(45));
        assert!(ticker.due() >= 2);
    }

    #[test]
    fn test_ticks_are_consumed_once() {
        let start = Instant::now();
        let mut ticker = Ticker::anchored(start, Duration::from_millis(200));
        assert_eq!(ticker.due_at(start + Duration::from_millis(250)), 1);
        assert_eq!(ticker.due_at(start + Duration::from_millis(250)), 0);
    }

    #[test]
    fn test_frequent_polling_keeps_pace_with_the_clock() {
        let start = Instant::now();
        let interval = Duration::from_millis(200);
        let mut ticker = Ticker::anchored(start, interval);

        let mut total = 0;
        for step in 1..=45u32 {
            total += ticker.due_at(start + Duration::from_millis(90) * step);
        }
        // 45 * 90ms = 4050ms
        assert_eq!(total, 20);
    }

    #[test]
    fn test_late_poll_catches_up() {
        let start = Instant::now();
        let mut ticker = Ticker::anchored(start, Duration::from_secs(1));
        assert_eq!(ticker.due_at(start + Duration::from_millis(3500)), 3);
        assert_eq!(ticker.due_at(start + Duration::from_millis(4000)), 1);
    }

    #[test]
    fn test_zero_interval_never_ticks() {
        let start = Instant::now();
        let mut ticker = Ticker::anchored(start, Duration::ZERO);
        assert_eq!(ticker.due_at(start + Duration::from_secs(5)), 0);
    }
}
