//! # Packed Buffer
//!
//! Owns the single heap block described by a [`PackedLayout`].

// SAFETY: This module owns a raw allocation. Unsafe is limited to the
// alloc/dealloc pair and to viewing the block as a byte slice.
#![allow(unsafe_code)]

use std::alloc::{alloc_zeroed, dealloc, handle_alloc_error};
use std::fmt;
use std::ptr::NonNull;

use bytemuck::Pod;

use super::layout::PackedLayout;

/// One zero-initialized, aligned heap block split into typed regions.
///
/// A zero-sized layout performs no allocation. Every element type read
/// from a region is `Pod`, so any byte pattern (including the initial
/// zeroes) is a valid value.
///
/// # Thread Safety
///
/// The block is uniquely owned and only mutated through `&mut self`.
pub struct PackedBuffer {
    /// Start of the block, `None` when nothing is allocated.
    ptr: Option<NonNull<u8>>,
    /// Layout the block was allocated with.
    layout: PackedLayout,
}

// SAFETY: `PackedBuffer` owns its block exclusively, like a `Box<[u8]>`.
unsafe impl Send for PackedBuffer {}
// SAFETY: shared access only hands out shared byte slices.
unsafe impl Sync for PackedBuffer {}

impl PackedBuffer {
    /// A buffer holding nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            ptr: None,
            layout: PackedLayout::empty(),
        }
    }

    /// Allocates one block for `layout`.
    ///
    /// Allocation failure is fatal and goes through
    /// [`std::alloc::handle_alloc_error`].
    #[must_use]
    pub fn allocate(layout: PackedLayout) -> Self {
        if layout.is_empty() {
            return Self { ptr: None, layout };
        }

        let alloc_layout = layout.alloc_layout();
        // SAFETY: the layout size is non-zero.
        let raw = unsafe { alloc_zeroed(alloc_layout) };
        let Some(ptr) = NonNull::new(raw) else {
            handle_alloc_error(alloc_layout)
        };

        Self {
            ptr: Some(ptr),
            layout,
        }
    }

    /// Returns true if a heap block is currently owned.
    #[inline]
    #[must_use]
    pub const fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Layout of the owned block.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> &PackedLayout {
        &self.layout
    }

    /// The whole block as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self.ptr {
            // SAFETY: the block holds `layout.size()` initialized bytes.
            Some(ptr) => unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.layout.size()) },
            None => &[],
        }
    }

    /// The whole block as mutable bytes.
    #[must_use]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self.ptr {
            // SAFETY: the block holds `layout.size()` initialized bytes and
            // `&mut self` guarantees exclusive access.
            Some(ptr) => unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), self.layout.size()) },
            None => Default::default(),
        }
    }

    /// Raw bytes of region `index`; empty if there is no such region.
    #[must_use]
    pub fn region_bytes(&self, index: usize) -> &[u8] {
        match self.layout.region(index) {
            Some(region) => &self.as_bytes()[region.range()],
            None => &[],
        }
    }

    /// Region `index` viewed as a slice of `T`.
    ///
    /// # Panics
    ///
    /// Panics if the region is not aligned for `T` or its size is not a
    /// multiple of `size_of::<T>()`. Both are programming defects.
    #[must_use]
    pub fn region<T: Pod>(&self, index: usize) -> &[T] {
        cast_region(self.region_bytes(index))
    }

    /// Disjoint mutable byte slices for every region, in request order.
    ///
    /// Padding between regions (if any) is skipped.
    pub fn regions_mut(&mut self) -> Vec<&mut [u8]> {
        let regions = self.layout.regions().to_vec();
        let mut order: Vec<usize> = (0..regions.len()).collect();
        order.sort_by_key(|&index| (regions[index].offset, regions[index].size));

        let mut slices: Vec<Option<&mut [u8]>> = regions.iter().map(|_| None).collect();
        let mut rest = self.as_bytes_mut();
        let mut cursor = 0;
        for index in order {
            let region = regions[index];
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(region.offset - cursor);
            let (head, tail) = tail.split_at_mut(region.size);
            slices[index] = Some(head);
            rest = tail;
            cursor = region.end();
        }

        slices.into_iter().map(Option::unwrap_or_default).collect()
    }

    /// Frees the block and resets to the empty state.
    ///
    /// Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: `ptr` was returned by `alloc_zeroed` with this layout
            // and is forgotten before returning.
            unsafe { dealloc(ptr.as_ptr(), self.layout.alloc_layout()) };
        }
        self.layout = PackedLayout::empty();
    }
}

impl Default for PackedBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for PackedBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl Clone for PackedBuffer {
    fn clone(&self) -> Self {
        let mut copy = Self::allocate(self.layout.clone());
        copy.as_bytes_mut().copy_from_slice(self.as_bytes());
        copy
    }
}

impl fmt::Debug for PackedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedBuffer")
            .field("allocated", &self.is_allocated())
            .field("size", &self.layout.size())
            .field("align", &self.layout.align())
            .field("regions", &self.layout.regions())
            .finish()
    }
}

/// Views region bytes as a slice of `T`.
///
/// An empty byte slice always yields an empty slice, wherever it points.
///
/// # Panics
///
/// Panics on misalignment or a ragged length.
#[must_use]
pub fn cast_region<T: Pod>(bytes: &[u8]) -> &[T] {
    if bytes.is_empty() {
        return &[];
    }
    bytemuck::cast_slice(bytes)
}

/// Mutable counterpart of [`cast_region`].
///
/// # Panics
///
/// Panics on misalignment or a ragged length.
#[must_use]
pub fn cast_region_mut<T: Pod>(bytes: &mut [u8]) -> &mut [T] {
    if bytes.is_empty() {
        return Default::default();
    }
    bytemuck::cast_slice_mut(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SoaTransform;
    use crate::memory::RegionRequest;

    fn skeleton_like(joints: usize, chars: usize) -> PackedLayout {
        PackedLayout::plan(&[
            RegionRequest::array::<SoaTransform>((joints + 3) / 4),
            RegionRequest::array::<[u32; 2]>(joints),
            RegionRequest::array::<i16>(joints),
            RegionRequest::array::<u8>(chars),
        ])
        .unwrap()
    }

    #[test]
    fn test_region_addresses_are_aligned() {
        for joints in [1, 3, 4, 5, 37, 255, 1024] {
            let buffer = PackedBuffer::allocate(skeleton_like(joints, joints * 5 + 3));
            let base = buffer.as_bytes().as_ptr() as usize;
            assert_eq!(base % std::mem::align_of::<SoaTransform>(), 0);

            for region in buffer.layout().regions() {
                assert_eq!((base + region.offset) % region.align, 0, "joints={joints}");
            }

            assert_eq!(buffer.region::<SoaTransform>(0).len(), (joints + 3) / 4);
            assert_eq!(buffer.region::<[u32; 2]>(1).len(), joints);
            assert_eq!(buffer.region::<i16>(2).len(), joints);
            assert_eq!(buffer.region::<u8>(3).len(), joints * 5 + 3);
        }
    }

    #[test]
    fn test_regions_mut_are_disjoint() {
        let mut buffer = PackedBuffer::allocate(skeleton_like(5, 9));
        {
            let mut regions = buffer.regions_mut();
            assert_eq!(regions.len(), 4);
            cast_region_mut::<i16>(&mut regions[2]).fill(-1);
            regions[3].fill(b'x');
        }

        assert!(buffer.region::<i16>(2).iter().all(|&p| p == -1));
        assert!(buffer.region::<u8>(3).iter().all(|&c| c == b'x'));
        assert!(buffer.region::<[u32; 2]>(1).iter().all(|v| *v == [0, 0]));
    }

    #[test]
    fn test_empty_layout_does_not_allocate() {
        let mut buffer = PackedBuffer::allocate(PackedLayout::plan(&[RegionRequest::array::<i16>(0)]).unwrap());
        assert!(!buffer.is_allocated());
        assert!(buffer.region::<i16>(0).is_empty());
        assert_eq!(buffer.regions_mut().len(), 1);
    }

    #[test]
    fn test_missing_region_is_empty() {
        let buffer = PackedBuffer::empty();
        assert!(buffer.region::<SoaTransform>(0).is_empty());
        assert!(buffer.region_bytes(7).is_empty());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut buffer = PackedBuffer::allocate(skeleton_like(4, 4));
        assert!(buffer.is_allocated());

        buffer.release();
        assert!(!buffer.is_allocated());
        assert!(buffer.layout().is_empty());

        buffer.release();
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn test_clone_copies_contents() {
        let mut buffer = PackedBuffer::allocate(skeleton_like(2, 3));
        buffer.regions_mut()[3].copy_from_slice(b"ab\0");

        let copy = buffer.clone();
        assert_eq!(copy.as_bytes(), buffer.as_bytes());
        assert_ne!(copy.as_bytes().as_ptr(), buffer.as_bytes().as_ptr());
    }
}
