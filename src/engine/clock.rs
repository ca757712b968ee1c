use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick { remaining: Duration },
    Expired,
}

/// Countdown that ticks at a fixed interval while running.
///
/// The clock never pushes events on its own: the owner polls [`Clock::next_event`],
/// which stays pending while the clock is stopped. A stale tick from a cancelled
/// countdown therefore cannot be observed, and each arm/start cycle yields at most
/// one [`ClockEvent::Expired`].
#[derive(Debug)]
pub struct Clock {
    interval: Duration,
    remaining: Duration,
    running: bool,
    // Amount the next tick subtracts from `remaining`.
    step: Duration,
    // Time left until the next tick; only meaningful while stopped.
    carry: Duration,
    // Deadline of the next tick; `Some` only while running.
    deadline: Option<Instant>,
}

impl Clock {
    pub fn new(interval: Duration, duration: Duration) -> Self {
        let step = interval.min(duration);
        Self {
            interval,
            remaining: duration,
            running: false,
            step,
            carry: step,
            deadline: None,
        }
    }

    /// Restart the countdown from `duration` without changing whether it runs.
    pub fn arm(&mut self, duration: Duration) {
        self.remaining = duration;
        self.step = self.interval.min(duration);
        self.carry = self.step;
        if self.running {
            self.deadline = Some(Instant::now() + self.step);
        }
    }

    pub fn start(&mut self) {
        if self.running || self.remaining.is_zero() {
            return;
        }
        self.running = true;
        self.deadline = Some(Instant::now() + self.carry);
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        if let Some(deadline) = self.deadline.take() {
            self.carry = deadline
                .saturating_duration_since(Instant::now())
                .min(self.step);
        }
        self.running = false;
    }

    #[allow(dead_code)]
    pub fn toggle(&mut self) {
        if self.running {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Wait for the next tick or expiry.
    ///
    /// Cancel-safe: state only changes after the deadline has been reached, so
    /// dropping the future inside `tokio::select!` loses nothing.
    pub async fn next_event(&mut self) -> ClockEvent {
        let deadline = match self.deadline {
            Some(deadline) if self.running => deadline,
            _ => futures::future::pending().await,
        };
        tokio::time::sleep_until(deadline).await;

        self.remaining = self.remaining.saturating_sub(self.step);
        if self.remaining.is_zero() {
            self.running = false;
            self.deadline = None;
            self.step = Duration::ZERO;
            self.carry = Duration::ZERO;
            return ClockEvent::Expired;
        }

        self.step = self.interval.min(self.remaining);
        self.carry = self.step;
        // Schedule from the previous deadline so ticks do not drift.
        self.deadline = Some(deadline + self.step);
        ClockEvent::Tick {
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn ticks_every_interval_then_expires_once() {
        let mut clock = Clock::new(SEC, Duration::from_secs(3));
        clock.start();

        assert_eq!(
            clock.next_event().await,
            ClockEvent::Tick {
                remaining: Duration::from_secs(2)
            }
        );
        assert_eq!(clock.next_event().await, ClockEvent::Tick { remaining: SEC });
        assert_eq!(clock.next_event().await, ClockEvent::Expired);
        assert!(!clock.is_running());
        assert_eq!(clock.remaining(), Duration::ZERO);

        // Stopped after expiry: nothing more until re-armed.
        let next = tokio::time::timeout(Duration::from_secs(10), clock.next_event()).await;
        assert!(next.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_clock_never_fires() {
        let mut clock = Clock::new(SEC, Duration::from_secs(2));
        let next = tokio::time::timeout(Duration::from_secs(5), clock.next_event()).await;
        assert!(next.is_err());
        assert_eq!(clock.remaining(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_keeps_partial_progress() {
        let mut clock = Clock::new(SEC, Duration::from_secs(2));
        clock.start();
        tokio::time::advance(Duration::from_millis(600)).await;
        clock.stop();

        // Time spent paused does not count.
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(clock.remaining(), Duration::from_secs(2));

        let resumed_at = Instant::now();
        clock.start();
        assert_eq!(clock.next_event().await, ClockEvent::Tick { remaining: SEC });
        assert_eq!(resumed_at.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_without_elapsed_time_is_lossless() {
        let mut clock = Clock::new(SEC, Duration::from_secs(5));
        for _ in 0..4 {
            clock.toggle();
            clock.toggle();
        }
        assert!(!clock.is_running());
        assert_eq!(clock.remaining(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn arm_while_running_restarts_countdown() {
        let mut clock = Clock::new(SEC, Duration::from_secs(3));
        clock.start();
        assert_eq!(
            clock.next_event().await,
            ClockEvent::Tick {
                remaining: Duration::from_secs(2)
            }
        );

        clock.arm(Duration::from_secs(3));
        assert!(clock.is_running());
        assert_eq!(
            clock.next_event().await,
            ClockEvent::Tick {
                remaining: Duration::from_secs(2)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_expiry_requires_rearm() {
        let mut clock = Clock::new(SEC, SEC);
        clock.start();
        assert_eq!(clock.next_event().await, ClockEvent::Expired);

        clock.start();
        assert!(!clock.is_running());

        clock.arm(Duration::from_secs(2));
        clock.start();
        assert!(clock.is_running());
        assert_eq!(clock.next_event().await, ClockEvent::Tick { remaining: SEC });
    }

    #[tokio::test(start_paused = true)]
    async fn fractional_duration_ends_with_short_tick() {
        let mut clock = Clock::new(SEC, Duration::from_millis(1500));
        clock.start();
        assert_eq!(
            clock.next_event().await,
            ClockEvent::Tick {
                remaining: Duration::from_millis(500)
            }
        );
        let before = Instant::now();
        assert_eq!(clock.next_event().await, ClockEvent::Expired);
        assert_eq!(before.elapsed(), Duration::from_millis(500));
    }
}
