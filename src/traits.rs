//! Traits used by the trackdepth library.
//!

use crate::{
    aggregate::LoadOptions,
    error::CoverageError,
    io::{tsv::TsvConfig, DepthRecord},
    labels::SampleLabels,
    ranges::GenomicRegion,
    sanitize::Sanitizer,
    signal::{AggregatedSignal, SignalFetch},
};

/// The [`DepthSource`] trait is the "read records overlapping a region" contract of a
/// per-base depth table with one column per sample.
///
/// Records come back lazily, ordered by position. A source may yield records outside
/// the region (e.g. when an index narrows the scan only to a block); the aggregator
/// clips them.
pub trait DepthSource {
    type Records<'a>: Iterator<Item = Result<DepthRecord, CoverageError>>
    where
        Self: 'a;

    /// The labels of the value columns, established when the source was opened.
    fn labels(&self) -> &SampleLabels;

    /// Start a fresh scan over the records overlapping `region`.
    fn records(&self, region: &GenomicRegion) -> Result<Self::Records<'_>, CoverageError>;
}

/// The [`SignalSource`] trait defines a continuous-signal store that returns a dense
/// array for a region.
pub trait SignalSource {
    /// Fetch the raw per-base values for `region`. The returned array has length
    /// `region.len()` and may contain NaN where the store has no data, including the
    /// bases past the end of the sequence counted in [`SignalFetch::overhang`].
    fn fetch_raw(&self, region: &GenomicRegion) -> Result<SignalFetch, CoverageError>;

    /// Fetch the per-base values for `region` with every non-finite value replaced
    /// by its substitute from `sanitizer`.
    fn fetch(
        &self,
        region: &GenomicRegion,
        sanitizer: &Sanitizer,
    ) -> Result<Vec<f32>, CoverageError> {
        let mut values = self.fetch_raw(region)?.values;
        sanitizer.apply(&mut values);
        Ok(values)
    }
}

/// A [`Track`] is an opened, labeled file that can load per-sample signal for
/// arbitrary regions.
pub trait Track {
    fn labels(&self) -> &SampleLabels;
    fn title(&self) -> &str;
    fn load(
        &self,
        region: &GenomicRegion,
        options: &LoadOptions,
    ) -> Result<AggregatedSignal, CoverageError>;
}

/// Defines how to serialize something to TSV.
pub trait TsvSerialize {
    // Serialize something to a TSV [`String`].
    fn to_tsv(&self, config: &TsvConfig) -> String;
}
