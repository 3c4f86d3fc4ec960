//! Temperature notifier
//!
//! Periodically resolves the current location, fetches the temperature there
//! and broadcasts a change event whenever the reading differs from the one
//! stored last.
//!
//! The notifier is either stopped or running. While running it owns exactly
//! one schedule task; cycles execute one after another inside that task, so
//! two cycles never overlap. Ticks that fall due while a cycle is still in
//! flight collapse into a single catch-up cycle, after which the schedule
//! realigns to its original cadence. Stopping aborts the schedule task
//! together with any in-flight cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use domain::entities::TemperatureReading;
use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{LocationPort, WeatherPort};

/// Refresh interval used when none is configured
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(600);

/// Shortest interval the schedule accepts
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Default number of events buffered per subscriber
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Events published by the notifier
#[derive(Debug, Clone)]
pub enum NotifierEvent {
    /// A new reading was accepted and replaced the stored one
    TemperatureChanged(TemperatureReading),
    /// A refresh cycle was abandoned
    CycleFailed(ApplicationError),
}

/// Result of a single successful refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The reading differed from the stored one and was published
    Changed(TemperatureReading),
    /// The reading equalled the stored one; nothing happened
    Unchanged,
    /// The schedule that ran this cycle was stopped before it finished
    Discarded,
}

/// State shared between the notifier handle and its schedule task
struct NotifierCore {
    location: Arc<dyn LocationPort>,
    weather: Arc<dyn WeatherPort>,
    reading: RwLock<Option<TemperatureReading>>,
    events: broadcast::Sender<NotifierEvent>,
    /// Bumped whenever a schedule is retired; scheduled cycles carry the
    /// epoch they were started under.
    epoch: AtomicU64,
}

impl NotifierCore {
    /// Invalidate every cycle started by the current schedule
    ///
    /// Taking the state lock orders this against `accept`: once it returns,
    /// no cycle of the retired schedule can store or publish a reading.
    fn retire_schedule(&self) -> u64 {
        let _state = self.reading.write();
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, epoch: Option<u64>) -> bool {
        epoch.is_none_or(|e| e == self.epoch.load(Ordering::SeqCst))
    }

    /// Location lookup, weather fetch, compare. Strictly in that order.
    async fn fetch_and_compare(
        &self,
        epoch: Option<u64>,
    ) -> Result<CycleOutcome, ApplicationError> {
        let location = self.location.current_location().await?;
        debug!(location = %location, "Resolved current location");

        let reading = self.weather.fetch_temperature(&location).await?;
        Ok(self.accept(reading, epoch))
    }

    /// Store and publish `reading` unless it equals the stored one.
    ///
    /// Must stay free of `.await`: an aborted cycle either completes this
    /// step entirely or never starts it.
    fn accept(&self, reading: TemperatureReading, epoch: Option<u64>) -> CycleOutcome {
        let mut current = self.reading.write();
        if !self.is_current(epoch) {
            return CycleOutcome::Discarded;
        }
        if current.as_ref() == Some(&reading) {
            return CycleOutcome::Unchanged;
        }

        *current = Some(reading.clone());
        if self
            .events
            .send(NotifierEvent::TemperatureChanged(reading.clone()))
            .is_err()
        {
            debug!("Temperature changed with no subscribers");
        }
        CycleOutcome::Changed(reading)
    }

    /// One refresh cycle. `epoch` is `None` for on-demand refreshes.
    #[instrument(skip(self))]
    async fn cycle(&self, epoch: Option<u64>) -> Result<CycleOutcome, ApplicationError> {
        let result = self.fetch_and_compare(epoch).await;

        match &result {
            Ok(CycleOutcome::Changed(reading)) => {
                info!(
                    temperature = %reading.temperature,
                    summary = reading.summary.as_ref().map(|s| s.condition.as_str()),
                    "Temperature changed"
                );
            },
            Ok(CycleOutcome::Unchanged) => {
                debug!("Temperature unchanged");
            },
            Ok(CycleOutcome::Discarded) => {
                debug!("Discarded reading from a stopped schedule");
            },
            Err(e) => {
                warn!(kind = e.kind(), error = %e, "Refresh cycle aborted");
                // Held across the check and the send so a concurrent stop
                // cannot slip in between, same as `accept`.
                let _state = self.reading.read();
                if self.is_current(epoch) {
                    // No subscribers is fine; the failure is already logged.
                    let _ = self.events.send(NotifierEvent::CycleFailed(e.clone()));
                }
            },
        }

        result
    }
}

/// The active schedule
struct Schedule {
    interval: Duration,
    handle: JoinHandle<()>,
}

/// Drives periodic temperature refreshes and fans out change events
///
/// Construct one per application and keep it for as long as notifications
/// are wanted. Dropping the notifier stops its schedule.
pub struct TemperatureNotifier {
    core: Arc<NotifierCore>,
    schedule: Mutex<Option<Schedule>>,
}

impl std::fmt::Debug for TemperatureNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemperatureNotifier")
            .field("running", &self.is_running())
            .field("interval", &self.interval())
            .field("reading", &*self.core.reading.read())
            .finish_non_exhaustive()
    }
}

impl TemperatureNotifier {
    /// Create a stopped notifier with the default event capacity
    #[must_use]
    pub fn new(location: Arc<dyn LocationPort>, weather: Arc<dyn WeatherPort>) -> Self {
        Self::with_event_capacity(location, weather, DEFAULT_EVENT_CAPACITY)
    }

    /// Create a stopped notifier buffering up to `capacity` events per subscriber
    #[must_use]
    pub fn with_event_capacity(
        location: Arc<dyn LocationPort>,
        weather: Arc<dyn WeatherPort>,
        capacity: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            core: Arc::new(NotifierCore {
                location,
                weather,
                reading: RwLock::new(None),
                events,
                epoch: AtomicU64::new(0),
            }),
            schedule: Mutex::new(None),
        }
    }

    /// Start refreshing every `interval`, beginning immediately
    ///
    /// Any schedule that is already running is cancelled first, so at most
    /// one schedule is ever active. Intervals shorter than
    /// [`MIN_REFRESH_INTERVAL`] are raised to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, interval: Duration) {
        let interval = if interval < MIN_REFRESH_INTERVAL {
            warn!(
                requested = ?interval,
                "Refresh interval below minimum, using {}s",
                MIN_REFRESH_INTERVAL.as_secs()
            );
            MIN_REFRESH_INTERVAL
        } else {
            interval
        };

        let mut schedule = self.schedule.lock();
        if let Some(previous) = schedule.take() {
            debug!("Replacing running refresh schedule");
            previous.handle.abort();
        }
        let epoch = self.core.retire_schedule();

        let core = Arc::clone(&self.core);
        let handle = tokio::spawn(run_schedule(core, interval, epoch));
        *schedule = Some(Schedule { interval, handle });

        info!(interval_secs = interval.as_secs(), "Temperature notifier started");
    }

    /// Stop refreshing
    ///
    /// Cancels the schedule and any cycle still in flight. No change event
    /// from the stopped schedule is published after this returns. The
    /// stored reading is kept.
    pub fn stop(&self) {
        let mut schedule = self.schedule.lock();
        if let Some(active) = schedule.take() {
            self.core.retire_schedule();
            active.handle.abort();
            info!("Temperature notifier stopped");
        }
    }

    /// Whether a schedule is currently active
    pub fn is_running(&self) -> bool {
        self.schedule
            .lock()
            .as_ref()
            .is_some_and(|s| !s.handle.is_finished())
    }

    /// Interval of the active schedule, if running
    pub fn interval(&self) -> Option<Duration> {
        self.schedule.lock().as_ref().map(|s| s.interval)
    }

    /// The most recently accepted reading, if any
    pub fn current_reading(&self) -> Option<TemperatureReading> {
        self.core.reading.read().clone()
    }

    /// Receive future events
    pub fn subscribe(&self) -> broadcast::Receiver<NotifierEvent> {
        self.core.events.subscribe()
    }

    /// Run one refresh cycle now, independent of the schedule
    ///
    /// Applies the same comparison and publishes the same events as a
    /// scheduled tick.
    ///
    /// # Errors
    ///
    /// Returns the cycle error when the location lookup or the weather fetch
    /// fails. The stored reading is unchanged in that case.
    pub async fn refresh(&self) -> Result<CycleOutcome, ApplicationError> {
        self.core.cycle(None).await
    }
}

impl Drop for TemperatureNotifier {
    fn drop(&mut self) {
        if let Some(schedule) = self.schedule.get_mut().take() {
            self.core.retire_schedule();
            schedule.handle.abort();
        }
    }
}

/// Schedule task body: one cycle per tick, forever
async fn run_schedule(core: Arc<NotifierCore>, period: Duration, epoch: u64) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // First tick completes immediately.
        ticker.tick().await;
        // Outcome is logged and published inside the cycle.
        let _ = core.cycle(Some(epoch)).await;
    }
}
