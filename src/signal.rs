//! The [`AggregatedSignal`] type: one dense per-base array per sample for a region.
//!

use std::io::Write;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::error::CoverageError;
use crate::io::{OutputFile, TsvConfig};
use crate::ranges::GenomicRegion;
use crate::reporting::LoadReport;
use crate::traits::TsvSerialize;

/// The raw values a [`SignalSource`] fetched for a region.
///
/// [`SignalSource`]: crate::traits::SignalSource
#[derive(Clone, Debug, PartialEq)]
pub struct SignalFetch {
    pub values: Vec<f32>,
    /// The number of bases at the end of the region that lie past the end of the
    /// sequence.
    pub overhang: usize,
}

/// Per-sample signal over one region.
///
/// Every array has length `region.len()`, and index `i` holds the value at genomic
/// position `region.start() + i`. Samples are kept in the order of the source's
/// labels. Values are finite (see [`Sanitizer`]).
///
/// [`Sanitizer`]: crate::sanitize::Sanitizer
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedSignal {
    region: GenomicRegion,
    data: IndexMap<String, Vec<f32>>,
    report: LoadReport,
}

impl AggregatedSignal {
    pub(crate) fn new(
        region: GenomicRegion,
        data: IndexMap<String, Vec<f32>>,
        report: LoadReport,
    ) -> Self {
        Self {
            region,
            data,
            report,
        }
    }

    /// The region this signal was loaded for.
    pub fn region(&self) -> &GenomicRegion {
        &self.region
    }

    /// The values of `sample`, if it was loaded.
    pub fn get(&self, sample: &str) -> Option<&[f32]> {
        self.data.get(sample).map(|x| x.as_slice())
    }

    pub fn samples(&self) -> impl Iterator<Item = &str> + '_ {
        self.data.keys().map(|x| x.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> + '_ {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// What was dropped while loading.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// The largest value over all samples.
    pub fn max(&self) -> Option<f32> {
        self.data
            .values()
            .flatten()
            .cloned()
            .reduce(f32::max)
    }

    /// The smallest value over all samples.
    pub fn min(&self) -> Option<f32> {
        self.data
            .values()
            .flatten()
            .cloned()
            .reduce(f32::min)
    }

    pub fn into_inner(self) -> (GenomicRegion, IndexMap<String, Vec<f32>>) {
        (self.region, self.data)
    }

    /// Write a header line and one `seqname, position, value...` row per base of
    /// the region, with positions in the region's coordinates.
    pub fn write_tsv<W: Write>(&self, writer: W, config: &TsvConfig) -> Result<(), CoverageError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);

        let mut header = vec!["seqname".to_string(), "position".to_string()];
        header.extend(self.data.keys().cloned());
        writer.write_record(&header)?;

        for i in 0..self.region.len() {
            let mut row = vec![
                self.region.seqname().to_string(),
                self.region.position_at(i).to_string(),
            ];
            row.extend(self.data.values().map(|values| values[i].to_tsv(config)));
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the TSV to `output`, or to standard output if `None`. Output paths ending
    /// in `.gz` are gzip-compressed. The TSV is preceded by `#` comment lines with the
    /// region and the issues of the load report.
    pub fn to_tsv(
        &self,
        output: Option<impl Into<PathBuf>>,
        config: &TsvConfig,
    ) -> Result<(), CoverageError> {
        let mut header = vec![format!("region {}", self.region)];
        header.extend(self.report.issues());
        let output = match output {
            Some(file) => OutputFile::new(file, Some(header)),
            None => OutputFile::new_stdout(Some(header)),
        };
        let writer = output.writer()?;
        self.write_tsv(writer, config)
    }

    /// A samples x positions matrix, in sample order.
    #[cfg(feature = "ndarray")]
    pub fn to_array2(&self) -> ndarray::Array2<f32> {
        let rows: Vec<&Vec<f32>> = self.data.values().collect();
        ndarray::Array2::from_shape_fn((rows.len(), self.region.len()), |(i, j)| rows[i][j])
    }

    /// Write [`AggregatedSignal::to_array2()`] to a `.npy` file.
    #[cfg(feature = "ndarray")]
    pub fn write_npy(&self, path: impl AsRef<std::path::Path>) -> Result<(), CoverageError> {
        ndarray_npy::write_npy(path, &self.to_array2())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::COVERAGE_TSV;

    fn signal() -> AggregatedSignal {
        let region = "chr1:50-53".parse().unwrap();
        let mut data = IndexMap::new();
        data.insert("s1".to_string(), vec![0.0, 7.0, 1.5]);
        data.insert("s2".to_string(), vec![2.0, 0.0, 0.0]);
        AggregatedSignal::new(region, data, LoadReport::new())
    }

    #[test]
    fn test_accessors() {
        let signal = signal();
        assert_eq!(signal.len(), 2);
        assert_eq!(signal.samples().collect::<Vec<_>>(), vec!["s1", "s2"]);
        assert_eq!(signal.get("s1"), Some(&[0.0, 7.0, 1.5][..]));
        assert_eq!(signal.get("s3"), None);
        assert_eq!(signal.max(), Some(7.0));
        assert_eq!(signal.min(), Some(0.0));
    }

    #[test]
    fn test_write_tsv() {
        let mut buffer = Vec::new();
        signal().write_tsv(&mut buffer, &COVERAGE_TSV).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "seqname\tposition\ts1\ts2\n\
             chr1\t50\t0\t2\n\
             chr1\t51\t7\t0\n\
             chr1\t52\t1.5\t0\n"
        );
    }

    #[test]
    fn test_to_tsv_file_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signal.tsv");
        let mut signal = signal();
        signal.report.clipped_records = 2;
        signal.to_tsv(Some(&path), &COVERAGE_TSV).unwrap();

        let output = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "#region chr1:50-53");
        assert_eq!(
            lines[1],
            "#2 records were outside the region and were ignored"
        );
        assert_eq!(lines[2], "seqname\tposition\ts1\ts2");
        assert_eq!(lines.len(), 6);
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_to_array2() {
        let array = signal().to_array2();
        assert_eq!(array.shape(), &[2, 3]);
        assert_eq!(array[[0, 1]], 7.0);
        assert_eq!(array[[1, 0]], 2.0);
    }
}
