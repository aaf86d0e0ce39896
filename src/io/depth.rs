//! Tabix-indexed per-base depth tables.
//!
//! A depth table is a coordinate-sorted, bgzip-compressed text file with the columns
//!
//! ```text
//! seqname  position  depth_1  depth_2  ...  depth_n
//! ```
//!
//! one line per base, where positions are 1-based. This is what
//! `samtools depth a.bam b.bam | bgzip > depth.bgz` produces; the table needs a tabix
//! index next to it, e.g. from `tabix -s 1 -b 2 -e 2 depth.bgz`.
//!
//! [`DepthFile::open()`] reads only the first data line, to learn the number of value
//! columns. Each call to [`DepthFile::records()`] opens the file and its index again
//! and yields the records of the index chunks overlapping the region.

use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{debug, trace};
use noodles::bgzf::{self, VirtualPosition};
use noodles::csi::BinningIndex;
use noodles::tabix;

use super::file::{ensure_exists, InputFile};
use super::noodles::tabix_interval;
use crate::error::CoverageError;
use crate::labels::SampleLabels;
use crate::ranges::GenomicRegion;
use crate::traits::DepthSource;
use crate::Position;

/// Lines starting with this are headers (e.g. from `samtools depth -H`).
pub const COMMENT: &str = "#";

/// One line of a depth table.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthRecord {
    pub seqname: String,
    pub position: Position,
    pub values: Vec<f64>,
}

impl DepthRecord {
    pub fn new(seqname: impl Into<String>, position: Position, values: Vec<f64>) -> Self {
        Self {
            seqname: seqname.into(),
            position,
            values,
        }
    }

    /// Parse a whitespace-delimited line, which must have exactly `num_values` value
    /// columns after the sequence name and position.
    pub fn parse(line: &str, num_values: usize) -> Result<Self, CoverageError> {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() != num_values + 2 {
            return Err(CoverageError::MalformedDepthRecord {
                expected: num_values + 2,
                found: columns.len(),
                line: line.to_string(),
            });
        }
        let position: Position = columns[1].parse()?;
        let values = columns[2..]
            .iter()
            .map(|x| x.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(columns[0], position, values))
    }
}

/// A bgzip-compressed, tabix-indexed depth table with its sample labels.
#[derive(Clone, Debug)]
pub struct DepthFile {
    path: PathBuf,
    labels: SampleLabels,
}

impl DepthFile {
    /// Open a depth table, reading its first data line to count the value columns.
    ///
    /// # Arguments
    ///
    /// * `path` - the bgzip-compressed depth table.
    /// * `labels` - optional sample labels, one per value column. If `None`, the
    ///   columns are labeled `"1"`, `"2"`, ... in file order.
    ///
    /// # Errors
    /// [`CoverageError::SourceUnavailable`] if `path` does not exist and
    /// [`CoverageError::LabelMismatch`] if `labels` does not have one label per value
    /// column.
    pub fn open(
        path: impl Into<PathBuf>,
        labels: Option<Vec<String>>,
    ) -> Result<Self, CoverageError> {
        let path = path.into();
        ensure_exists(&path)?;

        let columns = InputFile::new(&path).detect_columns(COMMENT)?;
        let num_values = columns.map_or(0, |x| x.saturating_sub(2));

        let labels = match labels {
            Some(labels) => {
                if labels.len() != num_values {
                    return Err(CoverageError::LabelMismatch {
                        columns: num_values,
                        labels: labels.len(),
                    });
                }
                SampleLabels::new(labels)?
            }
            None => SampleLabels::numbered(num_values),
        };

        debug!(
            "opened depth table {} with {} samples",
            path.display(),
            labels.len()
        );
        Ok(Self { path, labels })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path of the tabix index (`<path>.tbi`).
    pub fn index_path(&self) -> PathBuf {
        let mut index = self.path.clone().into_os_string();
        index.push(".tbi");
        PathBuf::from(index)
    }

    fn unavailable(&self, path: &Path, reason: impl ToString) -> CoverageError {
        CoverageError::SourceUnavailable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl DepthSource for DepthFile {
    type Records<'a> = DepthRecords
    where
        Self: 'a;

    fn labels(&self) -> &SampleLabels {
        &self.labels
    }

    fn records(&self, region: &GenomicRegion) -> Result<Self::Records<'_>, CoverageError> {
        let index_path = self.index_path();
        let index = tabix::read(&index_path).map_err(|e| self.unavailable(&index_path, e))?;

        let reference_sequence_id = index.header().and_then(|header| {
            header
                .reference_sequence_names()
                .iter()
                .position(|name| AsRef::<[u8]>::as_ref(name) == region.seqname().as_bytes())
        });

        let num_values = self.labels.len();
        let (Some(reference_sequence_id), Some(interval)) =
            (reference_sequence_id, tabix_interval(region))
        else {
            debug!(
                "no indexed records for {} in {}",
                region,
                self.path.display()
            );
            return Ok(DepthRecords::empty(region, num_values));
        };

        let chunks = index
            .query(reference_sequence_id, interval)?
            .into_iter()
            .map(|chunk| (chunk.start(), chunk.end()))
            .collect::<Vec<_>>();
        trace!("{} index chunks for {}", chunks.len(), region);

        let reader = File::open(&self.path)
            .map(bgzf::Reader::new)
            .map_err(|e| self.unavailable(&self.path, e))?;

        Ok(DepthRecords {
            reader: Some(reader),
            chunks: chunks.into_iter(),
            chunk_end: None,
            seqname: region.seqname().to_string(),
            num_values,
            line: String::new(),
        })
    }
}

/// A lazy iterator over the records in the index chunks of one region query.
///
/// The file handle is owned by the iterator and is closed when it is dropped,
/// whether or not it was read to the end. After the first error, the iterator
/// yields `None`.
pub struct DepthRecords {
    reader: Option<bgzf::Reader<File>>,
    chunks: std::vec::IntoIter<(VirtualPosition, VirtualPosition)>,
    chunk_end: Option<VirtualPosition>,
    seqname: String,
    num_values: usize,
    line: String,
}

impl std::fmt::Debug for DepthRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthRecords")
            .field("seqname", &self.seqname)
            .field("num_values", &self.num_values)
            .finish_non_exhaustive()
    }
}

impl DepthRecords {
    fn empty(region: &GenomicRegion, num_values: usize) -> Self {
        Self {
            reader: None,
            chunks: Vec::new().into_iter(),
            chunk_end: None,
            seqname: region.seqname().to_string(),
            num_values,
            line: String::new(),
        }
    }

    fn next_record(&mut self) -> Result<Option<DepthRecord>, CoverageError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        loop {
            let chunk_end = match self.chunk_end {
                Some(end) => end,
                None => match self.chunks.next() {
                    Some((start, end)) => {
                        reader.seek(start)?;
                        self.chunk_end = Some(end);
                        end
                    }
                    None => return Ok(None),
                },
            };

            if reader.virtual_position() >= chunk_end {
                self.chunk_end = None;
                continue;
            }

            self.line.clear();
            if reader.read_line(&mut self.line)? == 0 {
                self.chunk_end = None;
                continue;
            }

            let line = self.line.trim_end();
            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }

            let record = DepthRecord::parse(line, self.num_values)?;
            // chunks are per sequence, but a line on another sequence must never
            // be summed into this region
            if record.seqname != self.seqname {
                continue;
            }
            return Ok(Some(record));
        }
    }
}

impl Iterator for DepthRecords {
    type Item = Result<DepthRecord, CoverageError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(record) => record.map(Ok),
            Err(e) => {
                self.reader = None;
                Some(Err(e))
            }
        }
    }
}
