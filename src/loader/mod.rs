//! Cache-first content loading
//!
//! One generic loader orchestrates every content fetch: consult the cache,
//! validate what it finds, fall back to the network, and report the outcome
//! to a status indicator. Per-feature differences (TTL, validity predicate,
//! default content) live in a [`ContentRequest`], never in per-feature
//! copies of this logic.

pub mod status;

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::cache::CacheStorage;
use crate::error::Result;
pub use status::{SilentReporter, StatusReporter, TermReporter};

/// Per-feature load parameters
pub struct ContentRequest<T> {
    /// Cache key; also names the feature in status output
    pub feature: &'static str,

    /// Wall-clock TTL for cached entries
    pub ttl: Duration,

    /// Content-specific validity check. Cached data that fails this is
    /// discarded even before its TTL expires (schema drift between
    /// releases shows up exactly this way).
    pub validate: fn(&T) -> bool,

    /// Hardcoded default content used when the fetch fails, so the caller
    /// always has something to render
    pub fallback: Option<fn() -> T>,
}

/// What a load produced
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// Served from a valid cache entry; no network call was made
    Cached(T),

    /// Fetched from the server and cached
    Fresh { value: T, elapsed: Duration },

    /// The fetch failed; default content keeps the caller usable
    Fallback { value: T, error: String },

    /// The fetch failed and no default content exists
    Failed { error: String },

    /// A load for this feature was already in flight; this one was ignored
    InFlight,

    /// A newer load was issued for this feature while this one was in
    /// flight; the result was discarded (last-issued-wins)
    Superseded,
}

impl<T> LoadOutcome<T> {
    /// Usable content, if this outcome produced any
    pub fn into_value(self) -> Option<T> {
        match self {
            LoadOutcome::Cached(v) => Some(v),
            LoadOutcome::Fresh { value, .. } => Some(value),
            LoadOutcome::Fallback { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_from_cache(&self) -> bool {
        matches!(self, LoadOutcome::Cached(_))
    }
}

/// Tracks in-flight loads and issuance order per feature
#[derive(Default)]
struct FlightTable {
    active: HashSet<String>,
    generation: HashMap<String, u64>,
}

/// Cache-first content loader
///
/// Never returns an error: every failure path ends in [`LoadOutcome::Fallback`]
/// or [`LoadOutcome::Failed`] plus an error indicator, so no exception from
/// this layer can reach rendering code.
pub struct ContentLoader<R: StatusReporter> {
    cache: Option<Mutex<CacheStorage>>,
    status: R,
    flights: Mutex<FlightTable>,
}

impl<R: StatusReporter> ContentLoader<R> {
    /// Create a loader. `cache` is None when caching is disabled
    /// (`--no-cache`), in which case every load fetches.
    pub fn new(cache: Option<CacheStorage>, status: R) -> Self {
        Self {
            cache: cache.map(Mutex::new),
            status,
            flights: Mutex::new(FlightTable::default()),
        }
    }

    pub fn status(&self) -> &R {
        &self.status
    }

    /// Load content cache-first.
    ///
    /// A second call for the same feature while one is in flight is a
    /// no-op returning [`LoadOutcome::InFlight`].
    pub async fn load<T, F, Fut>(&self, req: &ContentRequest<T>, fetch: F) -> LoadOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let generation = {
            let mut flights = self.lock_flights();
            if flights.active.contains(req.feature) {
                log::debug!("Load already in flight: {}", req.feature);
                return LoadOutcome::InFlight;
            }
            flights.active.insert(req.feature.to_string());
            Self::issue(&mut flights, req.feature)
        };

        let outcome = self.run(req, fetch, generation, true).await;

        self.lock_flights().active.remove(req.feature);
        outcome
    }

    /// Force a fetch, skipping the cache read.
    ///
    /// A refresh supersedes any load already in flight for the feature:
    /// the older response will be discarded when it resolves.
    pub async fn refresh<T, F, Fut>(&self, req: &ContentRequest<T>, fetch: F) -> LoadOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let generation = {
            let mut flights = self.lock_flights();
            Self::issue(&mut flights, req.feature)
        };

        self.run(req, fetch, generation, false).await
    }

    async fn run<T, F, Fut>(
        &self,
        req: &ContentRequest<T>,
        fetch: F,
        generation: u64,
        read_cache: bool,
    ) -> LoadOutcome<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.status.set_loading(req.feature);

        if read_cache {
            if let Some(value) = self.cache_get(req) {
                if (req.validate)(&value) {
                    self.status.update(req.feature, true, None);
                    return LoadOutcome::Cached(value);
                }
                log::debug!("Cached '{}' failed validity check", req.feature);
            }
            // Stale or structurally incompatible: drop it before refetching
            self.cache_clear(req.feature);
        }

        let start = Instant::now();
        match fetch().await {
            Ok(value) => {
                if !self.is_current(req.feature, generation) {
                    log::debug!("Discarding superseded response: {}", req.feature);
                    return LoadOutcome::Superseded;
                }
                let elapsed = start.elapsed();
                self.cache_put(req.feature, &value);
                self.status.update(req.feature, false, Some(elapsed));
                LoadOutcome::Fresh { value, elapsed }
            }
            Err(err) => {
                if !self.is_current(req.feature, generation) {
                    return LoadOutcome::Superseded;
                }
                let error = err.to_string();
                log::warn!("Fetch failed for '{}': {}", req.feature, error);
                self.status.set_error(req.feature, &error);
                match req.fallback {
                    Some(fallback) => LoadOutcome::Fallback {
                        value: fallback(),
                        error,
                    },
                    None => LoadOutcome::Failed { error },
                }
            }
        }
    }

    /// Record a new issuance and return its generation number
    fn issue(flights: &mut FlightTable, feature: &str) -> u64 {
        let counter = flights.generation.entry(feature.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// True if no newer load has been issued for the feature
    fn is_current(&self, feature: &str, generation: u64) -> bool {
        let flights = self.lock_flights();
        flights.generation.get(feature).copied() == Some(generation)
    }

    fn lock_flights(&self) -> std::sync::MutexGuard<'_, FlightTable> {
        match self.flights.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn cache_get<T: DeserializeOwned>(&self, req: &ContentRequest<T>) -> Option<T> {
        let cache = self.cache.as_ref()?;
        let guard = match cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(req.feature, req.ttl)
    }

    /// Cache write failures must never block the flow that produced the
    /// value; they are logged and forgotten.
    fn cache_put<T: Serialize>(&self, feature: &str, value: &T) {
        if let Some(ref cache) = self.cache {
            let guard = match cache.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(e) = guard.put(feature, value) {
                log::warn!("Failed to cache '{}': {}", feature, e);
            }
        }
    }

    fn cache_clear(&self, feature: &str) {
        if let Some(ref cache) = self.cache {
            let guard = match cache.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(e) = guard.clear(&[feature]) {
                log::warn!("Failed to clear cache entry '{}': {}", feature, e);
            }
        }
    }
}
