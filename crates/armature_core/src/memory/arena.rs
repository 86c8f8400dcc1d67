//! # Arena Allocator
//!
//! A bump-offset arena that hands out aligned byte ranges.
//!
//! The arena never touches memory itself: it only tracks offsets, so the
//! same planning pass can size a block before that block exists.

use std::ops::Range;

/// A request for one typed region inside a packed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionRequest {
    /// Size in bytes.
    pub size: usize,
    /// Required alignment in bytes (power of two).
    pub align: usize,
}

impl RegionRequest {
    /// Creates a raw request.
    #[inline]
    #[must_use]
    pub const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    /// Request for an array of `count` elements of `T`.
    #[inline]
    #[must_use]
    pub const fn array<T>(count: usize) -> Self {
        Self {
            size: std::mem::size_of::<T>() * count,
            align: std::mem::align_of::<T>(),
        }
    }
}

/// Placement of a region inside a packed block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// Byte offset from the start of the block.
    pub offset: usize,
    /// Size in bytes.
    pub size: usize,
    /// Alignment the region was placed with.
    pub align: usize,
}

impl Region {
    /// One past the last byte of the region.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Byte range of the region inside its block.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// A bump-pointer arena over a byte capacity.
///
/// Allocations are fast (just bump an offset). Everything is released at
/// once with [`Arena::reset`].
///
/// # Example
///
/// ```rust
/// use armature_core::memory::{Arena, RegionRequest};
///
/// let mut arena = Arena::new(64);
/// let floats = arena.alloc(RegionRequest::array::<f32>(3)).unwrap();
/// let shorts = arena.alloc(RegionRequest::array::<i16>(2)).unwrap();
/// assert_eq!(floats.offset, 0);
/// assert_eq!(shorts.offset, 12);
/// assert_eq!(arena.padding(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Arena {
    /// Current allocation offset.
    offset: usize,
    /// Total capacity.
    capacity: usize,
    /// Bytes skipped to satisfy alignment.
    padding: usize,
}

impl Arena {
    /// Creates a new arena with the specified capacity in bytes.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            offset: 0,
            capacity,
            padding: 0,
        }
    }

    /// Creates an arena limited only by the address space.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Returns the total capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current used space in bytes, padding included.
    #[inline]
    #[must_use]
    pub const fn used(&self) -> usize {
        self.offset
    }

    /// Returns the remaining free space in bytes.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.capacity - self.offset
    }

    /// Returns the number of bytes lost to alignment so far.
    #[inline]
    #[must_use]
    pub const fn padding(&self) -> usize {
        self.padding
    }

    /// Reserves an aligned region.
    ///
    /// # Returns
    ///
    /// The placed region, or None if out of space.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `request.align` is not a power of two.
    pub fn alloc(&mut self, request: RegionRequest) -> Option<Region> {
        debug_assert!(request.align.is_power_of_two(), "alignment must be a power of two");

        let mask = request.align - 1;
        let aligned_offset = self.offset.checked_add(mask)? & !mask;
        let new_offset = aligned_offset.checked_add(request.size)?;

        if new_offset > self.capacity {
            return None;
        }

        self.padding += aligned_offset - self.offset;
        self.offset = new_offset;

        Some(Region {
            offset: aligned_offset,
            size: request.size,
            align: request.align,
        })
    }

    /// Resets the arena, forgetting all previous regions.
    #[inline]
    pub fn reset(&mut self) {
        self.offset = 0;
        self.padding = 0;
    }
}
