//! Shared calendar instances with explicit invalidation.
//!
//! The engine itself is stateless. This cache sits around it and hands out
//! one `Arc<GregorianCalendar>` per configuration. Every access re-reads an
//! injected [`InvalidationSource`]; when its generation moves, or after
//! [`CalendarCache::reset`], all cached instances are dropped and rebuilt
//! lazily on the next request.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::calendar::GregorianCalendar;
use crate::config::CalendarConfiguration;

/// A monotonically increasing generation number. A change means cached
/// calendars may be stale (e.g. the system zone or region changed).
pub trait InvalidationSource: Send + Sync {
    fn generation(&self) -> u64;
}

/// An [`InvalidationSource`] bumped by hand.
#[derive(Debug, Default)]
pub struct InvalidationCounter(AtomicU64);

impl InvalidationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl InvalidationSource for InvalidationCounter {
    fn generation(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Supplies the configuration of the "current" calendar.
pub trait CurrentConfiguration: Send + Sync {
    fn current(&self) -> CalendarConfiguration;
}

impl<F> CurrentConfiguration for F
where
    F: Fn() -> CalendarConfiguration + Send + Sync,
{
    fn current(&self) -> CalendarConfiguration {
        self()
    }
}

#[derive(Default)]
struct CacheState {
    generation: Option<u64>,
    reset_requested: bool,
    current: Option<Arc<GregorianCalendar>>,
    fixed: HashMap<CalendarConfiguration, Arc<GregorianCalendar>>,
}

impl CacheState {
    fn check(&mut self, generation: u64) {
        if self.generation == Some(generation) && !self.reset_requested {
            return;
        }
        if self.generation.is_some() {
            debug!(
                generation,
                manual = self.reset_requested,
                dropped = self.fixed.len(),
                "calendar cache invalidated"
            );
        }
        self.current = None;
        self.fixed.clear();
        self.generation = Some(generation);
        self.reset_requested = false;
    }
}

/// Cache of shared calendars, at most one live instance per configuration.
pub struct CalendarCache {
    state: Mutex<CacheState>,
    source: Arc<dyn InvalidationSource>,
    current: Box<dyn CurrentConfiguration>,
}

impl CalendarCache {
    pub fn new(source: Arc<dyn InvalidationSource>, current: impl CurrentConfiguration + 'static) -> Self {
        CalendarCache {
            state: Mutex::new(CacheState::default()),
            source,
            current: Box::new(current),
        }
    }

    /// The calendar for `config`, built on first use after each invalidation.
    pub fn fixed(&self, config: &CalendarConfiguration) -> Arc<GregorianCalendar> {
        let generation = self.source.generation();
        let mut state = self.state.lock();
        state.check(generation);
        state
            .fixed
            .entry(*config)
            .or_insert_with(|| {
                debug!(zone = %config.zone(), "building calendar");
                Arc::new(GregorianCalendar::new(*config))
            })
            .clone()
    }

    /// The calendar for the current configuration.
    ///
    /// The provider runs without the cache lock held, so it may itself use
    /// the cache. If another caller fills the slot first, that calendar wins.
    pub fn current(&self) -> Arc<GregorianCalendar> {
        let generation = self.source.generation();
        {
            let mut state = self.state.lock();
            state.check(generation);
            if let Some(calendar) = &state.current {
                return Arc::clone(calendar);
            }
        }

        let built = Arc::new(GregorianCalendar::new(self.current.current()));

        let generation = self.source.generation();
        let mut state = self.state.lock();
        state.check(generation);
        Arc::clone(state.current.get_or_insert(built))
    }

    /// A handle that always resolves to the current calendar, following
    /// invalidations and resets.
    pub fn autoupdating(self: &Arc<Self>) -> AutoupdatingCalendar {
        AutoupdatingCalendar {
            cache: Arc::clone(self),
        }
    }

    /// Drops every cached calendar on the next access.
    pub fn reset(&self) {
        self.state.lock().reset_requested = true;
    }

    /// Number of fixed calendars currently cached.
    pub fn len(&self) -> usize {
        let generation = self.source.generation();
        let mut state = self.state.lock();
        state.check(generation);
        state.fixed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The current calendar, re-read from its cache on every access.
#[derive(Debug, Clone)]
pub struct AutoupdatingCalendar {
    cache: Arc<CalendarCache>,
}

impl AutoupdatingCalendar {
    pub fn get(&self) -> Arc<GregorianCalendar> {
        self.cache.current()
    }
}

impl Default for CalendarCache {
    fn default() -> Self {
        CalendarCache::new(Arc::new(InvalidationCounter::new()), CalendarConfiguration::default)
    }
}

impl fmt::Debug for CalendarCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CalendarCache")
            .field("generation", &state.generation)
            .field("cached", &state.fixed.len())
            .finish()
    }
}
