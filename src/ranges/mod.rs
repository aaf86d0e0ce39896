//! Genomic regions and the translation from genomic positions to array indices.
//!

use std::fmt;
use std::str::FromStr;

use crate::{error::CoverageError, Position};

/// The strand of a [`GenomicRegion`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    #[default]
    Unknown,
}

impl FromStr for Strand {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." | "*" => Ok(Strand::Unknown),
            _ => Err(CoverageError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unknown => ".",
        };
        write!(f, "{}", symbol)
    }
}

/// A half-open genomic interval `[start, end)` on one sequence (i.e. chromosome).
///
/// Per-base arrays built for a region are indexed by `position - start`, so index `0`
/// is `start` and the last index is `end - 1`. Fields are private so that the
/// `start < end` invariant always holds; use [`GenomicRegion::new()`] or parse from a
/// string like `"chr1:100-200:+"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenomicRegion {
    seqname: String,
    start: Position,
    end: Position,
    strand: Strand,
}

impl GenomicRegion {
    /// Create a new 0-indexed right-exclusive region.
    ///
    /// # Errors
    /// Returns [`CoverageError::InvalidGenomicRange`] unless `start < end`.
    pub fn new(
        seqname: impl Into<String>,
        start: Position,
        end: Position,
        strand: Strand,
    ) -> Result<Self, CoverageError> {
        validate_range(start, end)?;
        Ok(Self {
            seqname: seqname.into(),
            start,
            end,
            strand,
        })
    }

    pub fn seqname(&self) -> &str {
        &self.seqname
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// The number of basepairs in this region, which is also the length of every
    /// per-base array built for it.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Always `false`: regions are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The genomic position of array index `index`.
    pub fn position_at(&self, index: usize) -> Position {
        self.start + index as Position
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.seqname, self.start, self.end)?;
        if self.strand != Strand::Unknown {
            write!(f, ":{}", self.strand)?;
        }
        Ok(())
    }
}

impl FromStr for GenomicRegion {
    type Err = CoverageError;

    /// Parse `seqname:start-end` or `seqname:start-end:strand`. Thousands separators
    /// (`,`) in the positions are ignored. Fields are taken from the right, so the
    /// sequence name may itself contain `:` (e.g. `HLA-A*01:01:01:01`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoverageError::InvalidRegionString(s.to_string());

        let (rest, last) = s.trim().rsplit_once(':').ok_or_else(invalid)?;
        let (seqname, range, strand) = if looks_like_range(last) {
            (rest, last, Strand::Unknown)
        } else {
            let (seqname, range) = rest.rsplit_once(':').ok_or_else(invalid)?;
            (seqname, range, last.parse()?)
        };
        if seqname.is_empty() {
            return Err(invalid());
        }

        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let start: Position = start.replace(',', "").parse()?;
        let end: Position = end.replace(',', "").parse()?;
        GenomicRegion::new(seqname, start, end, strand)
    }
}

fn looks_like_range(field: &str) -> bool {
    let is_number = |x: &str| !x.is_empty() && x.chars().all(|c| c.is_ascii_digit() || c == ',');
    field
        .split_once('-')
        .map_or(false, |(start, end)| is_number(start) && is_number(end))
}

/// Validates that `start` and `end` define a non-empty half-open range.
pub fn validate_range(start: Position, end: Position) -> Result<(), CoverageError> {
    if start >= end {
        return Err(CoverageError::InvalidGenomicRange(start, end));
    }
    Ok(())
}

/// Translate a genomic `position` into an index of a per-base array for `region`.
///
/// Returns `None` for positions outside `[region.start, region.end)`; callers drop
/// these (clipping). The position is compared to `region.start` as-is: depth tables
/// store positions that are used directly, bigWig values are fetched already
/// aligned to `region.start`. See `io::noodles::tabix_interval()` for how a region
/// is turned into a tabix query.
pub fn site_offset(position: Position, region: &GenomicRegion) -> Option<usize> {
    if position < region.start || position >= region.end {
        return None;
    }
    Some((position - region.start) as usize)
}
