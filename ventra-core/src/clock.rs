//! Wall-clock access and the once-a-minute day/night ticker.

use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// How often the ticker recomputes the day/night flag.
pub const TICK_PERIOD: Duration = Duration::from_secs(60);

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Night is before 06:00 or from 19:00 onwards.
pub fn is_night_hour(hour: u32) -> bool {
    hour < 6 || hour > 18
}

pub fn is_night<T: Timelike>(time: &T) -> bool {
    is_night_hour(time.hour())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub now: DateTime<Local>,
    pub is_night: bool,
}

impl ClockTick {
    pub fn at(now: DateTime<Local>) -> Self {
        Self {
            now,
            is_night: is_night(&now),
        }
    }
}

/// Background task publishing a [`ClockTick`] every period.
///
/// The first tick is computed synchronously in [`DayNightTicker::spawn`]. The task runs
/// until [`DayNightTicker::stop`] is called or the ticker is dropped.
#[derive(Debug)]
pub struct DayNightTicker {
    rx: watch::Receiver<ClockTick>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl DayNightTicker {
    /// Must be called from within a tokio runtime.
    pub fn spawn<C: Clock>(clock: C, period: Duration) -> Self {
        let (tx, rx) = watch::channel(ClockTick::at(clock.now()));
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!(?period, "day/night ticker started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let tick = ClockTick::at(clock.now());
                        if tx.send(tick).is_err() {
                            break;
                        }
                    }
                }
            }

            debug!("day/night ticker stopped");
        });

        Self { rx, cancel, handle }
    }

    /// The most recent tick.
    pub fn current(&self) -> ClockTick {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockTick> {
        self.rx.clone()
    }

    /// Wait for the next tick. `None` once the ticker has stopped.
    pub async fn changed(&mut self) -> Option<ClockTick> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DayNightTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    fn local_at(hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 10, 16, hour, 30, 0)
            .earliest()
            .expect("valid local time")
    }

    #[derive(Clone)]
    struct ScriptedClock {
        hour: Arc<AtomicU32>,
    }

    impl ScriptedClock {
        fn new(hour: u32) -> Self {
            Self {
                hour: Arc::new(AtomicU32::new(hour)),
            }
        }

        fn set_hour(&self, hour: u32) {
            self.hour.store(hour, Ordering::SeqCst);
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> DateTime<Local> {
            local_at(self.hour.load(Ordering::SeqCst))
        }
    }

    #[test]
    fn night_hours() {
        for hour in (0..=5).chain(19..=23) {
            assert!(is_night_hour(hour), "hour {hour} should be night");
        }
        for hour in 6..=18 {
            assert!(!is_night_hour(hour), "hour {hour} should be day");
        }
    }

    #[test]
    fn tick_uses_local_hour() {
        assert!(ClockTick::at(local_at(5)).is_night);
        assert!(!ClockTick::at(local_at(6)).is_night);
        assert!(!ClockTick::at(local_at(18)).is_night);
        assert!(ClockTick::at(local_at(19)).is_night);
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_immediate() {
        let ticker = DayNightTicker::spawn(ScriptedClock::new(3), TICK_PERIOD);

        let tick = ticker.current();
        assert!(tick.is_night);
        assert_eq!(tick.now, local_at(3));
    }

    #[tokio::test(start_paused = true)]
    async fn recomputes_every_period() {
        let clock = ScriptedClock::new(5);
        let mut ticker = DayNightTicker::spawn(clock.clone(), TICK_PERIOD);
        assert!(ticker.current().is_night);

        clock.set_hour(6);
        let started = Instant::now();
        let tick = ticker.changed().await.expect("ticker still running");
        assert!(!tick.is_night);
        assert!(started.elapsed() >= TICK_PERIOD);

        clock.set_hour(19);
        let tick = ticker.changed().await.expect("ticker still running");
        assert!(tick.is_night);
        assert_eq!(ticker.current(), tick);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_task() {
        let mut ticker = DayNightTicker::spawn(ScriptedClock::new(12), TICK_PERIOD);
        ticker.stop();

        assert_eq!(ticker.changed().await, None);
        tokio::task::yield_now().await;
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_ticker_cancels_it() {
        let ticker = DayNightTicker::spawn(ScriptedClock::new(12), TICK_PERIOD);
        let mut rx = ticker.subscribe();
        drop(ticker);

        assert!(rx.changed().await.is_err());
    }
}
