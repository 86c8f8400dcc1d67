//! # Memory Management
//!
//! Packed single-block storage for skeleton data.
//!
//! ## Design Philosophy
//!
//! A container asks for all of its arrays at once:
//! - Requests are declared as (size, alignment) pairs
//! - The planner serves the strictest alignment first
//! - One block is allocated and sliced into typed regions

mod arena;
mod buffer;
mod layout;

pub use arena::{Arena, Region, RegionRequest};
pub use buffer::{cast_region, cast_region_mut, PackedBuffer};
pub use layout::{LayoutError, LayoutResult, PackedLayout};
