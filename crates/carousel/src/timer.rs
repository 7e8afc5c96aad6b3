//! RotationTimer - periodic tick emitter for one carousel

use std::time::Duration;

use contracts::CarouselId;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// One rotation step request
///
/// `generation` identifies the timer that produced it; ticks from a timer
/// that has since been cancelled are ignored by the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub carousel: CarouselId,
    pub generation: u64,
}

/// Channel the timers emit into
pub type TickSender = mpsc::UnboundedSender<Tick>;

/// Handle to a running rotation timer
///
/// The first tick fires one full period after spawning. Dropping the handle
/// cancels the timer.
#[derive(Debug)]
pub struct RotationTimer {
    generation: u64,
    period: Duration,
    handle: JoinHandle<()>,
}

impl RotationTimer {
    /// Spawn a timer task emitting a [`Tick`] every `period`
    pub fn spawn(carousel: CarouselId, generation: u64, period: Duration, tx: TickSender) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                trace!(%carousel, generation, "Rotation tick");
                if tx.send(Tick { carousel, generation }).is_err() {
                    // Event loop gone
                    break;
                }
            }
        });

        Self {
            generation,
            period,
            handle,
        }
    }

    /// Generation stamped on this timer's ticks
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tick period
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RotationTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        let _timer = RotationTimer::spawn(CarouselId(1), 7, Duration::from_millis(5000), tx);

        let tick = rx.recv().await.unwrap();
        assert_eq!(tick, Tick { carousel: CarouselId(1), generation: 7 });
        assert_eq!(started.elapsed(), Duration::from_millis(5000));

        rx.recv().await.unwrap();
        assert_eq!(started.elapsed(), Duration::from_millis(10000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = RotationTimer::spawn(CarouselId(1), 1, Duration::from_millis(1000), tx);
        drop(timer);

        time::sleep(Duration::from_millis(3500)).await;
        assert!(rx.try_recv().is_err());
    }
}
