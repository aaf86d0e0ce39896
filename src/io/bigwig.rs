//! bigWig continuous-signal files, read with [`bigtools`].

use std::path::{Path, PathBuf};

use bigtools::BigWigRead;
use log::{debug, warn};

use super::file::ensure_exists;
use crate::error::CoverageError;
use crate::ranges::GenomicRegion;
use crate::signal::SignalFetch;
use crate::traits::SignalSource;

/// A bigWig file. The file is opened anew for each fetch.
#[derive(Clone, Debug)]
pub struct BigWigFile {
    path: PathBuf,
}

impl BigWigFile {
    /// # Errors
    /// [`CoverageError::SourceUnavailable`] if `path` does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoverageError> {
        let path = path.into();
        ensure_exists(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn reader(&self) -> Result<BigWigRead<bigtools::utils::reopen::ReopenableFile>, CoverageError> {
        let path = self.path.to_string_lossy().to_string();
        BigWigRead::open_file(&path).map_err(|e| CoverageError::SourceUnavailable {
            path,
            reason: e.to_string(),
        })
    }
}

impl SignalSource for BigWigFile {
    /// Fetch `region` from the bigWig. Bases without data are NaN, including any part
    /// of the region past the end of the sequence, which is also returned as the
    /// overhang.
    ///
    /// # Errors
    /// [`CoverageError::RegionOutOfBounds`] if the region's sequence is not in the file.
    fn fetch_raw(&self, region: &GenomicRegion) -> Result<SignalFetch, CoverageError> {
        let mut reader = self.reader()?;

        let seqlen = reader
            .chroms()
            .iter()
            .find(|chrom| chrom.name == region.seqname())
            .map(|chrom| chrom.length)
            .ok_or_else(|| CoverageError::RegionOutOfBounds {
                seqname: region.seqname().to_string(),
                path: self.path.display().to_string(),
            })?;

        let mut values = vec![f32::NAN; region.len()];
        let end = region.end().min(seqlen);
        let overhang = (region.end() - region.start().max(end)) as usize;
        if overhang > 0 {
            warn!(
                "region {} runs past the end of {} (length {}) in {}",
                region,
                region.seqname(),
                seqlen,
                self.path.display()
            );
        }

        if region.start() < end {
            let fetched = reader
                .values(region.seqname(), region.start(), end)
                .map_err(|e| CoverageError::SignalRead(e.to_string()))?;
            let n = fetched.len().min(values.len());
            values[..n].copy_from_slice(&fetched[..n]);
        }

        debug!("fetched {} from {}", region, self.path.display());
        Ok(SignalFetch { values, overhang })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        assert!(matches!(
            BigWigFile::open("no/such/file.bw"),
            Err(CoverageError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_open_not_a_bigwig() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "chr1\t0\t10\t1.0\n").unwrap();
        let bigwig = BigWigFile::open(file.path()).unwrap();
        let region = "chr1:0-10".parse().unwrap();
        assert!(matches!(
            bigwig.fetch_raw(&region),
            Err(CoverageError::SourceUnavailable { .. })
        ));
    }
}
