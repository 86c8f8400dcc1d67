//! # ARMATURE Core
//!
//! Memory layout and math building blocks for skeleton containers:
//! - One allocation per container, split into typed regions
//! - Regions packed by descending alignment, zero padding waste
//! - Transforms batched 4-wide in structure-of-arrays blocks
//!
//! ## Architecture Rules
//!
//! 1. **One block per container** - no per-joint or per-name allocation
//! 2. **Alignment by construction** - region offsets are planned, never patched
//! 3. **Plain old data** - every region element is `bytemuck::Pod`
//!
//! ## Example
//!
//! ```rust
//! use armature_core::memory::{PackedBuffer, PackedLayout, RegionRequest};
//! use armature_core::math::SoaTransform;
//!
//! let layout = PackedLayout::plan(&[
//!     RegionRequest::array::<SoaTransform>(2),
//!     RegionRequest::array::<i16>(5),
//! ])
//! .unwrap();
//! let buffer = PackedBuffer::allocate(layout);
//! assert_eq!(buffer.region::<i16>(1).len(), 5);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod math;
pub mod memory;

pub use math::{Float3, Quaternion, SoaFloat3, SoaQuaternion, SoaTransform, Transform};
pub use memory::{Arena, LayoutError, PackedBuffer, PackedLayout, Region, RegionRequest};
