//! # Packed Layout
//!
//! Plans one block for a list of region requests.
//!
//! ## Alignment Argument
//!
//! ```text
//! requests sorted by align:  [A: 16] [B: 4] [C: 2] [D: 1]
//! block:                     |AAAAAAAA|BBBB|CC|DDDDDDD|
//! ```
//!
//! Every region size is a multiple of its own alignment, and every later
//! alignment divides every earlier one (powers of two, descending). So each
//! region starts at a sum of multiples of its own alignment: no padding is
//! ever inserted. Request lists that break this rule are still placed; the
//! bytes skipped are reported by [`PackedLayout::padding`].

use std::alloc::Layout;

use thiserror::Error;

use super::arena::{Arena, Region, RegionRequest};

/// Errors raised while planning a packed layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A request alignment is zero or not a power of two.
    #[error("region {index} requests alignment {align}, which is not a power of two")]
    InvalidAlignment {
        /// Index of the offending request.
        index: usize,
        /// The requested alignment.
        align: usize,
    },

    /// The total block size does not fit in the address space.
    #[error("packed layout size overflows the address space")]
    Overflow,
}

/// Result type for layout planning.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// A planned single-block layout.
///
/// Regions are reported in request order, whatever order they were
/// placed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedLayout {
    regions: Vec<Region>,
    layout: Layout,
    padding: usize,
}

impl PackedLayout {
    /// The layout of an empty block: no regions, no bytes.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            regions: Vec::new(),
            layout: Layout::new::<()>(),
            padding: 0,
        }
    }

    /// Plans a block for `requests`.
    ///
    /// Requests are served strictest alignment first (stable for equal
    /// alignments). The block alignment is the strictest request.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for an invalid alignment or a size overflow.
    pub fn plan(requests: &[RegionRequest]) -> LayoutResult<Self> {
        if let Some((index, request)) = requests
            .iter()
            .enumerate()
            .find(|(_, request)| !request.align.is_power_of_two())
        {
            return Err(LayoutError::InvalidAlignment {
                index,
                align: request.align,
            });
        }

        let mut order: Vec<usize> = (0..requests.len()).collect();
        order.sort_by(|&a, &b| requests[b].align.cmp(&requests[a].align));

        let mut arena = Arena::unbounded();
        let mut regions = vec![Region::default(); requests.len()];
        for index in order {
            regions[index] = arena.alloc(requests[index]).ok_or(LayoutError::Overflow)?;
        }

        let align = requests.iter().map(|request| request.align).max().unwrap_or(1);
        let layout =
            Layout::from_size_align(arena.used(), align).map_err(|_| LayoutError::Overflow)?;

        Ok(Self {
            regions,
            layout,
            padding: arena.padding(),
        })
    }

    /// Total block size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.layout.size()
    }

    /// Block alignment in bytes.
    #[inline]
    #[must_use]
    pub const fn align(&self) -> usize {
        self.layout.align()
    }

    /// Bytes inserted between regions to satisfy alignment.
    #[inline]
    #[must_use]
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Returns true if the block holds no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// All regions, in request order.
    #[inline]
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Region of request `index`, if any.
    #[inline]
    #[must_use]
    pub fn region(&self, index: usize) -> Option<Region> {
        self.regions.get(index).copied()
    }

    /// The allocator layout of the whole block.
    #[inline]
    #[must_use]
    pub const fn alloc_layout(&self) -> Layout {
        self.layout
    }
}

impl Default for PackedLayout {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    #[repr(C, align(16))]
    struct Block([f32; 40]);

    fn requests(blocks: usize, views: usize, shorts: usize, chars: usize) -> [RegionRequest; 4] {
        [
            RegionRequest::array::<Block>(blocks),
            RegionRequest::array::<u64>(views),
            RegionRequest::array::<i16>(shorts),
            RegionRequest::array::<u8>(chars),
        ]
    }

    #[test]
    fn test_plan_is_sequential_and_unpadded() {
        let layout = PackedLayout::plan(&requests(2, 5, 5, 17)).unwrap();

        assert_eq!(layout.region(0).unwrap().range(), 0..320);
        assert_eq!(layout.region(1).unwrap().range(), 320..360);
        assert_eq!(layout.region(2).unwrap().range(), 360..370);
        assert_eq!(layout.region(3).unwrap().range(), 370..387);
        assert_eq!(layout.size(), 387);
        assert_eq!(layout.align(), 16);
        assert_eq!(layout.padding(), 0);
    }

    #[test]
    fn test_plan_alignment_for_many_counts() {
        for joints in 1..=300 {
            let blocks = (joints + 3) / 4;
            for chars in [0, 1, 7, joints * 3 + 1] {
                let layout = PackedLayout::plan(&requests(blocks, joints, joints, chars)).unwrap();
                assert_eq!(layout.padding(), 0, "joints={joints} chars={chars}");
                for region in layout.regions() {
                    assert_eq!(region.offset % region.align, 0, "joints={joints}");
                }
            }
        }
    }

    #[test]
    fn test_plan_sorts_by_descending_alignment() {
        // Declared smallest alignment first; placement must still be 8, 2, 1.
        let layout = PackedLayout::plan(&[
            RegionRequest::array::<u8>(3),
            RegionRequest::array::<i16>(3),
            RegionRequest::array::<u64>(1),
        ])
        .unwrap();

        assert_eq!(layout.region(2).unwrap().offset, 0);
        assert_eq!(layout.region(1).unwrap().offset, 8);
        assert_eq!(layout.region(0).unwrap().offset, 14);
        assert_eq!(layout.padding(), 0);
    }

    #[test]
    fn test_plan_reports_padding_for_ragged_sizes() {
        // A size that is not a multiple of its alignment forces padding.
        let layout = PackedLayout::plan(&[RegionRequest::new(6, 8), RegionRequest::new(4, 4)]).unwrap();
        assert_eq!(layout.region(1).unwrap().offset, 8);
        assert_eq!(layout.padding(), 2);
    }

    #[test]
    fn test_plan_rejects_bad_alignment() {
        let err = PackedLayout::plan(&[RegionRequest::new(4, 4), RegionRequest::new(4, 3)]).unwrap_err();
        assert_eq!(err, LayoutError::InvalidAlignment { index: 1, align: 3 });
    }

    #[test]
    fn test_plan_rejects_overflow() {
        let err = PackedLayout::plan(&[
            RegionRequest::new(usize::MAX / 2 + 1, 1),
            RegionRequest::new(usize::MAX / 2 + 1, 1),
        ])
        .unwrap_err();
        assert_eq!(err, LayoutError::Overflow);
    }

    #[test]
    fn test_empty_plan() {
        let layout = PackedLayout::plan(&[]).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.align(), 1);
        assert_eq!(layout, PackedLayout::empty());
    }
}
