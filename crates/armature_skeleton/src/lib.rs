//! # ARMATURE SKELETON
//!
//! Runtime joint hierarchy: names, parent indices and bind poses packed into
//! a single allocation, with versioned binary persistence.
//!
//! ## Memory Layout
//!
//! ```text
//! ┌──────────────────────┬──────────────┬───────────┬──────────────────┐
//! │ SoaTransform × ⌈N/4⌉ │ NameView × N │ i16 × N   │ name chars (NUL) │
//! │ align 16             │ align 4      │ align 2   │ align 1          │
//! └──────────────────────┴──────────────┴───────────┴──────────────────┘
//! ```
//!
//! Regions are ordered by descending alignment, so the block has no padding.
//!
//! ## Example
//!
//! ```rust
//! use armature_io::{IArchive, OArchive};
//! use armature_skeleton::{RawJoint, RawSkeleton, Skeleton, SkeletonBuilder};
//!
//! let raw = RawSkeleton {
//!     roots: vec![RawJoint::new("pelvis").with_child(RawJoint::new("spine"))],
//! };
//! let skeleton = SkeletonBuilder::build(&raw).unwrap();
//!
//! let mut out = OArchive::new(Vec::new()).unwrap();
//! out.write_object(&skeleton).unwrap();
//! let bytes = out.into_inner();
//!
//! let mut loaded = Skeleton::default();
//! IArchive::new(bytes.as_slice()).unwrap().read_object(&mut loaded).unwrap();
//! assert_eq!(loaded.joint_names().collect::<Vec<_>>(), ["pelvis", "spine"]);
//! assert_eq!(loaded.joint_parents(), &[-1, 0]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod builder;
pub mod error;
pub mod skeleton;
pub mod utils;

pub use builder::{RawJoint, RawSkeleton, SkeletonBuilder};
pub use error::{DecodeError, SkeletonError, SkeletonResult};
pub use skeleton::{NameView, Skeleton, MAX_JOINTS, MAX_NAME_CHARS, MAX_SOA_JOINTS, NO_PARENT};
