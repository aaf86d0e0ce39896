//! Test cases and test utility functions.
//!

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use noodles::csi::binning_index::index::reference_sequence::bin::Chunk;
use noodles::{bgzf, csi, tabix};
use rand::{thread_rng, Rng};
use tempfile::{Builder, NamedTempFile, TempDir};

use crate::{
    error::CoverageError,
    io::{depth::COMMENT, DepthRecord},
    labels::SampleLabels,
    ranges::GenomicRegion,
    signal::SignalFetch,
    traits::{DepthSource, SignalSource},
    Position,
};

// Random depth record defaults
//
// Records land up to this far outside the region, to exercise clipping.
pub const FLANK: Position = 10;

// depth counts
pub const MAX_DEPTH: u32 = 50;

/// An in-memory [`DepthSource`]. Every record is returned for every region; the
/// aggregator does the clipping.
#[derive(Clone, Debug)]
pub struct VecDepthSource {
    labels: SampleLabels,
    records: Vec<DepthRecord>,
}

impl VecDepthSource {
    pub fn new(labels: SampleLabels, records: Vec<DepthRecord>) -> Self {
        Self { labels, records }
    }
}

impl DepthSource for VecDepthSource {
    type Records<'a> = std::vec::IntoIter<Result<DepthRecord, CoverageError>>
    where
        Self: 'a;

    fn labels(&self) -> &SampleLabels {
        &self.labels
    }

    fn records(&self, _region: &GenomicRegion) -> Result<Self::Records<'_>, CoverageError> {
        let records: Vec<_> = self.records.iter().cloned().map(Ok).collect();
        Ok(records.into_iter())
    }
}

/// An in-memory [`SignalSource`] that returns its values for any region, truncated
/// or NaN-padded to the region length. The values are treated as the whole sequence,
/// so padding counts as overhang.
#[derive(Clone, Debug)]
pub struct VecSignalSource {
    values: Vec<f32>,
}

impl VecSignalSource {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }
}

impl SignalSource for VecSignalSource {
    fn fetch_raw(&self, region: &GenomicRegion) -> Result<SignalFetch, CoverageError> {
        let mut values = self.values.clone();
        let overhang = region.len().saturating_sub(values.len());
        values.resize(region.len(), f32::NAN);
        Ok(SignalFetch { values, overhang })
    }
}

/// Build `n` random records with integer depths for `num_samples` samples, on the
/// region's sequence, at positions up to [`FLANK`] outside the region.
pub fn random_depth_records(
    region: &GenomicRegion,
    num_samples: usize,
    n: usize,
) -> Vec<DepthRecord> {
    let mut rng = thread_rng();
    let low = region.start().saturating_sub(FLANK);
    let high = region.end() + FLANK;
    (0..n)
        .map(|_| {
            let position = rng.gen_range(low..high);
            let values = (0..num_samples)
                .map(|_| rng.gen_range(0..=MAX_DEPTH) as f64)
                .collect();
            DepthRecord::new(region.seqname(), position, values)
        })
        .collect()
}

/// Format records as depth-table lines.
pub fn depth_lines(records: &[DepthRecord]) -> String {
    let mut lines = String::new();
    for record in records {
        lines.push_str(&format!("{}\t{}", record.seqname, record.position));
        for value in &record.values {
            lines.push_str(&format!("\t{}", value));
        }
        lines.push('\n');
    }
    lines
}

/// Create a temporary depth table file path (`.bgz`).
pub fn temp_depthfile() -> NamedTempFile {
    Builder::new()
        .suffix(".bgz")
        .tempfile()
        .expect("could not create temp depth file")
}

/// Write `contents` gzip-compressed to `path`.
pub fn write_gzip(path: impl AsRef<Path>, contents: &str) -> io::Result<()> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

/// Write `contents` (depth lines sorted by sequence and position) BGZF-compressed as
/// `<dir>/depth.bgz`, along with the tabix index `depth.bgz.tbi` that
/// `tabix -s 1 -b 2 -e 2` would build.
pub fn tabix_depthfile(contents: &str) -> io::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("depth.bgz");

    let mut writer = bgzf::Writer::new(File::create(&path)?);
    let mut indexer = tabix::index::Indexer::default();
    indexer.set_header(
        csi::binning_index::index::header::Builder::gff()
            .set_reference_sequence_name_index(0)
            .set_start_position_index(1)
            .set_end_position_index(None)
            .build(),
    );

    for line in contents.lines() {
        let start = writer.virtual_position();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        let end = writer.virtual_position();

        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        let num_values = line.split_whitespace().count().saturating_sub(2);
        let record = DepthRecord::parse(line, num_values)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let position = noodles::core::Position::try_from(record.position as usize)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        indexer.add_record(&record.seqname, position, position, Chunk::new(start, end))?;
    }
    writer.finish()?;

    let mut index_path = path.clone().into_os_string();
    index_path.push(".tbi");
    tabix::write(index_path, &indexer.build())?;

    Ok((dir, path))
}
