//! Application services - Use case implementations

mod temperature_notifier;

pub use temperature_notifier::{
    CycleOutcome, DEFAULT_EVENT_CAPACITY, DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL,
    NotifierEvent, TemperatureNotifier,
};
