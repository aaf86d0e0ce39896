//! Per-base coverage vectors for genomic regions.
//!
//! `trackdepth` reads numeric per-base signal for a genomic region out of two kinds of
//! indexed files and turns it into one dense array per sample, indexed relative to the
//! region start:
//!
//!  - *bigWig* continuous-signal files, through [`BigWigTrack`].
//!  - bgzip-compressed, tabix-indexed *depth tables* (e.g. `samtools depth` output),
//!    through [`DepthTrack`].
//!
//! Both end up in an [`AggregatedSignal`], with non-finite values replaced by finite
//! substitutes (see [`Sanitizer`]) and an optional [`LogTransform`] applied last.
//!
//! ```no_run
//! use trackdepth::prelude::*;
//!
//! let track = DepthTrack::create("depth.bgz", None, "")?;
//! let region: GenomicRegion = "chr1:1017198-1051741:-".parse()?;
//! let signal = track.load(&region, &LoadOptions::default())?;
//! for (sample, values) in signal.iter() {
//!     println!("{}\t{:?}", sample, values.iter().cloned().fold(0.0, f32::max));
//! }
//! # Ok::<(), CoverageError>(())
//! ```
//!
//! [`BigWigTrack`]: crate::track::BigWigTrack
//! [`DepthTrack`]: crate::track::DepthTrack
//! [`AggregatedSignal`]: crate::signal::AggregatedSignal
//! [`Sanitizer`]: crate::sanitize::Sanitizer
//! [`LogTransform`]: crate::transform::LogTransform

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod io;
pub mod labels;
pub mod ranges;
pub mod reporting;
pub mod sanitize;
pub mod signal;
pub mod test_utilities;
pub mod track;
pub mod traits;
pub mod transform;

/// Genomic coordinate type.
pub type Position = u32;

pub mod prelude {
    pub use crate::aggregate::{aggregate_depth, aggregate_signal, LoadOptions};
    pub use crate::cache::CachedTrack;
    pub use crate::error::CoverageError;
    pub use crate::io::{BigWigFile, DepthFile, DepthRecord};
    pub use crate::labels::SampleLabels;
    pub use crate::ranges::{site_offset, GenomicRegion, Strand};
    pub use crate::sanitize::Sanitizer;
    pub use crate::signal::{AggregatedSignal, SignalFetch};
    pub use crate::track::{BigWigTrack, DepthTrack};
    pub use crate::traits::{DepthSource, SignalSource, Track};
    pub use crate::transform::LogTransform;
    pub use crate::Position;
}
