//! Search coordination and the display snapshot published to renderers.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

use crate::{
    config::Config,
    error::WeatherError,
    model::{CurrentConditions, ForecastDay, ForecastDays, ForecastRequest, WeatherResponse},
    provider::WeatherProvider,
};

use super::{CurrentView, ForecastDayView, UnitSystem};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayState {
    pub query: String,
    pub days: ForecastDays,
    pub units: UnitSystem,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub location_name: String,
    pub local_time: String,
    pub current: Option<CurrentView>,
    pub forecast: Vec<ForecastDayView>,
    /// Bumped when a search starts and when one succeeds. Renderers may use
    /// changes to run a short fade; it carries no other meaning.
    pub pulse: u64,
}

impl DisplayState {
    pub fn has_error(&self) -> bool {
        self.error_message.as_deref().is_some_and(|m| !m.is_empty())
    }
}

#[derive(Debug)]
pub enum SearchOutcome {
    /// The provider answered and the display was replaced.
    Completed,
    /// The provider failed; the message is on the display, old data kept.
    Failed(WeatherError),
    /// Another search was already running, or nothing changed.
    Skipped,
}

/// Raw records from the last successful search, kept so a unit change can
/// re-derive every view without a network call.
#[derive(Debug, Clone)]
struct Source {
    current: CurrentConditions,
    days: Vec<ForecastDay>,
}

#[derive(Debug, Default)]
struct Inner {
    display: DisplayState,
    source: Option<Source>,
}

impl Inner {
    fn rederive(&mut self) {
        let units = self.display.units;
        if let Some(source) = &self.source {
            self.display.current = Some(CurrentView::derive(&source.current, units));
            self.display.forecast = ForecastDayView::derive_all(&source.days, units);
        }
    }
}

#[derive(Debug)]
pub struct WeatherViewModel<P> {
    provider: P,
    in_flight: AtomicBool,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<DisplayState>,
}

impl<P: WeatherProvider> WeatherViewModel<P> {
    pub fn new(provider: P) -> Self {
        Self::with_state(provider, DisplayState::default())
    }

    /// Start from the user's saved preferences.
    pub fn from_config(provider: P, config: &Config) -> Self {
        Self::with_state(
            provider,
            DisplayState {
                query: config.default_query.clone(),
                days: config.default_days,
                units: config.units(),
                ..DisplayState::default()
            },
        )
    }

    fn with_state(provider: P, display: DisplayState) -> Self {
        let (state_tx, _) = watch::channel(display.clone());
        Self {
            provider,
            in_flight: AtomicBool::new(false),
            inner: Mutex::new(Inner { display, source: None }),
            state_tx,
        }
    }

    /// Receive a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> DisplayState {
        self.inner.lock().display.clone()
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Apply `f` under the lock and publish the resulting snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.lock();
        let out = f(&mut inner);
        self.state_tx.send_replace(inner.display.clone());
        out
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|inner| inner.display.query = query);
    }

    /// Replace the query and search for it.
    pub async fn submit(&self, query: impl Into<String>) -> SearchOutcome {
        self.set_query(query);
        self.search().await
    }

    /// Change the forecast length. A different value triggers a search.
    pub async fn set_days(&self, days: ForecastDays) -> SearchOutcome {
        let changed = self.update(|inner| {
            let changed = inner.display.days != days;
            inner.display.days = days;
            changed
        });

        if !changed {
            return SearchOutcome::Skipped;
        }
        self.search().await
    }

    pub fn set_units(&self, units: UnitSystem) {
        self.update(|inner| {
            inner.display.units = units;
            inner.rederive();
        });
    }

    pub fn toggle_units(&self) -> UnitSystem {
        self.update(|inner| {
            inner.display.units = inner.display.units.toggled();
            inner.rederive();
            inner.display.units
        })
    }

    /// Fetch the forecast for the current query and day count.
    ///
    /// At most one search runs at a time; a call made while another is in
    /// flight returns [`SearchOutcome::Skipped`] without touching state.
    pub async fn search(&self) -> SearchOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("search already in flight; ignoring request");
            return SearchOutcome::Skipped;
        }
        let _guard = InFlightGuard { vm: self };

        let request = self.update(|inner| {
            inner.display.is_loading = true;
            inner.display.error_message = None;
            inner.display.pulse += 1;
            ForecastRequest::new(inner.display.query.trim(), inner.display.days)
        });

        tracing::info!(query = %request.query, days = %request.days, "searching");

        let result = self
            .provider
            .get_forecast(&request)
            .await
            .and_then(WeatherResponse::into_parts);

        match result {
            Ok((location, current, days)) => {
                if days.len() != usize::from(request.days.get()) {
                    tracing::warn!(
                        requested = request.days.get(),
                        received = days.len(),
                        "forecast length differs from request"
                    );
                }

                self.update(|inner| {
                    inner.display.location_name = location.display_name();
                    inner.display.local_time = location.localtime;
                    inner.source = Some(Source { current, days });
                    inner.rederive();
                    inner.display.pulse += 1;
                });
                SearchOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(error = %err, "search failed");
                let message = err.user_message();
                self.update(|inner| inner.display.error_message = Some(message));
                SearchOutcome::Failed(err)
            }
        }
    }
}

/// Clears the loading flag and the in-flight guard however the search ends,
/// including when the future is dropped mid-request.
struct InFlightGuard<'a, P: WeatherProvider> {
    vm: &'a WeatherViewModel<P>,
}

impl<P: WeatherProvider> Drop for InFlightGuard<'_, P> {
    fn drop(&mut self) {
        // Release the guard before the snapshot goes out, so a subscriber
        // reacting to `is_loading == false` can start the next search.
        self.vm.update(|inner| {
            inner.display.is_loading = false;
            self.vm.in_flight.store(false, Ordering::Release);
        });
    }
}
