//!

use noodles::core::{region::Interval, Position as NoodlesPosition};

use crate::ranges::GenomicRegion;

/// Convert a region into the [`Interval`] used to query a tabix index, which is
/// [1-based](https://docs.rs/noodles-core/latest/noodles_core/position/struct.Position.html)
/// and closed.
///
/// Depth-table positions are compared to `region.start` as stored (see
/// [`site_offset()`]), so the positions that can land in the region are
/// `start..=end - 1`. Position `0` does not exist in a 1-based table, so the query
/// starts at 1 at the least; `None` means no 1-based position can land in the region.
///
/// [`site_offset()`]: crate::ranges::site_offset
pub fn tabix_interval(region: &GenomicRegion) -> Option<Interval> {
    let start = NoodlesPosition::new(region.start().max(1) as usize)?;
    let end = NoodlesPosition::new((region.end() - 1) as usize)?;
    if start > end {
        return None;
    }
    Some(Interval::from(start..=end))
}
