//! Labeled tracks, the caller-facing way to open a file and load regions from it.
//!

use std::path::{Path, PathBuf};

use log::debug;

use crate::aggregate::{aggregate_depth, aggregate_signal, LoadOptions};
use crate::error::CoverageError;
use crate::io::{BigWigFile, DepthFile};
use crate::labels::SampleLabels;
use crate::ranges::GenomicRegion;
use crate::signal::AggregatedSignal;
use crate::traits::{DepthSource, Track};

/// A depth table track: one sample per value column.
#[derive(Clone, Debug)]
pub struct DepthTrack {
    file: DepthFile,
    title: String,
}

impl DepthTrack {
    /// Open the depth table at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - a bgzip-compressed, tabix-indexed depth table.
    /// * `labels` - optional sample labels, one per value column; by default the
    ///   columns are labeled `"1"`, `"2"`, ...
    /// * `title` - a title for the track.
    pub fn create(
        path: impl Into<PathBuf>,
        labels: Option<Vec<String>>,
        title: &str,
    ) -> Result<Self, CoverageError> {
        let file = DepthFile::open(path, labels)?;
        Ok(Self {
            file,
            title: title.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file(&self) -> &DepthFile {
        &self.file
    }
}

impl Track for DepthTrack {
    fn labels(&self) -> &SampleLabels {
        self.file.labels()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn load(
        &self,
        region: &GenomicRegion,
        options: &LoadOptions,
    ) -> Result<AggregatedSignal, CoverageError> {
        debug!("loading {} from {}", region, self.path().display());
        aggregate_depth(&self.file, region, options)
    }
}

/// A bigWig track: a single sample.
#[derive(Clone, Debug)]
pub struct BigWigTrack {
    file: BigWigFile,
    labels: SampleLabels,
    title: String,
}

impl BigWigTrack {
    /// Open the bigWig at `path`.
    ///
    /// # Arguments
    ///
    /// * `path` - a bigWig file.
    /// * `label` - the sample label; by default the file name.
    /// * `title` - a title for the track.
    pub fn create(
        path: impl Into<PathBuf>,
        label: Option<&str>,
        title: &str,
    ) -> Result<Self, CoverageError> {
        let file = BigWigFile::open(path)?;
        let label = match label.filter(|x| !x.is_empty()) {
            Some(label) => label.to_string(),
            None => file
                .path()
                .file_name()
                .map(|x| x.to_string_lossy().to_string())
                .unwrap_or_else(|| file.path().display().to_string()),
        };
        Ok(Self {
            file,
            labels: SampleLabels::new([label])?,
            title: title.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn file(&self) -> &BigWigFile {
        &self.file
    }

    /// The track's single label.
    pub fn label(&self) -> &str {
        self.labels.iter().next().unwrap_or_default()
    }
}

impl Track for BigWigTrack {
    fn labels(&self) -> &SampleLabels {
        &self.labels
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn load(
        &self,
        region: &GenomicRegion,
        options: &LoadOptions,
    ) -> Result<AggregatedSignal, CoverageError> {
        debug!("loading {} from {}", region, self.path().display());
        aggregate_signal(&self.file, &self.labels, region, options)
    }
}
