//! Region aggregation: turning a source's output for a region into one dense array
//! per sample.
//!
//! For depth tables ([`aggregate_depth()`]), every record in the region adds its
//! value for each sample into that sample's array at `position - region.start`.
//! Several records may hit the same base, so this is a sum rather than an
//! assignment. Values are read and summed in `f64`, so for integer counts below 2^53
//! the sum is exact and doesn't depend on the order records arrive in; each sum is
//! narrowed to `f32` once, at the end. Records outside
//! the region are dropped and counted in the [`LoadReport`].
//!
//! For continuous signal ([`aggregate_signal()`]), the source already returns a
//! dense array.
//!
//! In both cases the arrays are then sanitized, and log-transformed last if a
//! transform was requested, so sums are always computed in linear space.

use indexmap::IndexMap;
use log::debug;

use crate::error::CoverageError;
use crate::labels::SampleLabels;
use crate::ranges::{site_offset, GenomicRegion};
use crate::reporting::LoadReport;
use crate::sanitize::Sanitizer;
use crate::signal::AggregatedSignal;
use crate::traits::{DepthSource, SignalSource};
use crate::transform::LogTransform;

/// Options for a load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadOptions {
    /// The samples to load; `None` (or empty) loads every sample.
    pub samples: Option<Vec<String>>,
    pub log_transform: Option<LogTransform>,
    pub sanitizer: Sanitizer,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples<I, S>(mut self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.samples = Some(samples.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_log_transform(mut self, log_transform: LogTransform) -> Self {
        self.log_transform = Some(log_transform);
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }
}

/// Sum the depth records of `source` overlapping `region` into one array per sample.
///
/// # Errors
///  - [`CoverageError::EmptyLabelSet`] if no requested sample is in the source.
///  - [`CoverageError::MalformedDepthRecord`] if a record doesn't have one value per
///    label.
///  - Any error from the source, e.g. [`CoverageError::SourceUnavailable`].
pub fn aggregate_depth<S>(
    source: &S,
    region: &GenomicRegion,
    options: &LoadOptions,
) -> Result<AggregatedSignal, CoverageError>
where
    S: DepthSource + ?Sized,
{
    let labels = source.labels();
    let resolved = labels.resolve(options.samples.as_deref(), region)?;

    let mut report = LoadReport::new();
    report.dropped_samples = resolved.dropped;

    let mut sums = vec![vec![0.0_f64; region.len()]; resolved.columns.len()];
    let mut num_records = 0;

    for result in source.records(region)? {
        let record = result?;
        if record.values.len() != labels.len() {
            return Err(CoverageError::MalformedDepthRecord {
                expected: labels.len() + 2,
                found: record.values.len() + 2,
                line: format!("{}\t{}", record.seqname, record.position),
            });
        }

        let site = if record.seqname == region.seqname() {
            site_offset(record.position, region)
        } else {
            None
        };
        let Some(site) = site else {
            report.clipped_records += 1;
            continue;
        };

        for (sum, (_, column)) in sums.iter_mut().zip(resolved.columns.iter()) {
            sum[site] += record.values[*column];
        }
        num_records += 1;
    }

    debug!(
        "summed {} records into {} samples for {} ({} clipped)",
        num_records,
        sums.len(),
        region,
        report.clipped_records
    );

    let data = resolved
        .columns
        .into_iter()
        .map(|(label, _)| label)
        .zip(sums.into_iter().map(|sum| {
            let values = sum.into_iter().map(|x| x as f32).collect::<Vec<_>>();
            finish(values, options)
        }))
        .collect::<IndexMap<_, _>>();

    Ok(AggregatedSignal::new(region.clone(), data, report))
}

/// Fetch the dense signal of `source` for `region` as a single sample.
///
/// `labels` holds the source's one label; it is resolved against the requested
/// samples like a depth table's labels are.
///
/// # Errors
///  - [`CoverageError::EmptyLabelSet`] if the label is not among the requested samples.
///  - Any error from the source, e.g. [`CoverageError::RegionOutOfBounds`].
pub fn aggregate_signal<S>(
    source: &S,
    labels: &SampleLabels,
    region: &GenomicRegion,
    options: &LoadOptions,
) -> Result<AggregatedSignal, CoverageError>
where
    S: SignalSource + ?Sized,
{
    let resolved = labels.resolve(options.samples.as_deref(), region)?;

    let mut report = LoadReport::new();
    report.dropped_samples = resolved.dropped;

    let fetched = source.fetch_raw(region)?;
    if fetched.overhang > 0 {
        report.add_issue(format!(
            "{} bases of {} are past the end of {} and were set to zero",
            fetched.overhang,
            region,
            region.seqname()
        ));
    }
    let values = finish(fetched.values, options);

    let data = resolved
        .columns
        .into_iter()
        .map(|(label, _)| (label, values.clone()))
        .collect::<IndexMap<_, _>>();

    Ok(AggregatedSignal::new(region.clone(), data, report))
}

/// Sanitize, then log-transform if requested. Transformed values are sanitized again,
/// since e.g. `log(x + 1)` of negative signal can be NaN.
fn finish(mut values: Vec<f32>, options: &LoadOptions) -> Vec<f32> {
    options.sanitizer.apply(&mut values);
    if let Some(log_transform) = options.log_transform {
        log_transform.apply(&mut values);
        options.sanitizer.apply(&mut values);
    }
    values
}
