//! Caching of the last load of a track.
//!
//! [`CachedTrack`] wraps any [`Track`] and keeps the result of its most recent load,
//! keyed by the region, the requested samples and the log transform. Loading the same
//! key again returns the stored result without touching the file. Results are handed
//! out as [`Rc`]s, so a caller may hold on to one while loading another region. The
//! cache uses [`RefCell`], so a [`CachedTrack`] can't be shared across threads.
//!
use std::cell::RefCell;
use std::rc::Rc;

use log::trace;

use crate::aggregate::LoadOptions;
use crate::error::CoverageError;
use crate::ranges::GenomicRegion;
use crate::signal::AggregatedSignal;
use crate::traits::Track;
use crate::transform::LogTransform;

/// What a cached load is keyed on.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadKey {
    pub region: GenomicRegion,
    pub samples: Option<Vec<String>>,
    pub log_transform: Option<LogTransform>,
}

impl LoadKey {
    pub fn new(region: &GenomicRegion, options: &LoadOptions) -> Self {
        Self {
            region: region.clone(),
            samples: options.samples.clone(),
            log_transform: options.log_transform,
        }
    }
}

/// A [`Track`] with a single-entry cache of its last load.
///
/// The sanitizer is part of the options but not of the key; use [`CachedTrack::clear()`]
/// after changing it.
pub struct CachedTrack<T: Track> {
    track: T,
    key: RefCell<Option<LoadKey>>,
    data: RefCell<Option<Rc<AggregatedSignal>>>,
}

impl<T: Track + std::fmt::Debug> std::fmt::Debug for CachedTrack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedTrack")
            .field("track", &self.track)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T: Track> CachedTrack<T> {
    pub fn new(track: T) -> Self {
        Self {
            track,
            key: RefCell::new(None),
            data: RefCell::new(None),
        }
    }

    pub fn track(&self) -> &T {
        &self.track
    }

    /// Return a `bool` indicating whether the load for `region` and `options` is cached.
    pub fn is_loaded(&self, region: &GenomicRegion, options: &LoadOptions) -> bool {
        let loaded_key = self.key.borrow();
        match &*loaded_key {
            None => false,
            Some(existing_key) => *existing_key == LoadKey::new(region, options),
        }
    }

    /// Clear out the cache.
    pub fn clear(&self) {
        *self.data.borrow_mut() = None;
        *self.key.borrow_mut() = None;
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_none()
    }

    /// Load `region`, or return the cached result if it was the last thing loaded with
    /// the same samples and log transform. A failed load leaves the cache empty.
    pub fn load(
        &self,
        region: &GenomicRegion,
        options: &LoadOptions,
    ) -> Result<Rc<AggregatedSignal>, CoverageError> {
        if self.is_loaded(region, options) {
            if let Some(signal) = self.data.borrow().as_ref() {
                trace!("cache hit for {}", region);
                return Ok(Rc::clone(signal));
            }
        }

        self.clear();
        let signal = Rc::new(self.track.load(region, options)?);
        *self.data.borrow_mut() = Some(Rc::clone(&signal));
        *self.key.borrow_mut() = Some(LoadKey::new(region, options));
        Ok(signal)
    }
}
