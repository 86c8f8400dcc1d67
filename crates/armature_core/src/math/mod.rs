//! Transform types used by skeleton bind poses.
//!
//! [`Transform`] is the per-joint (array-of-structures) form used when
//! authoring skeletons. [`SoaTransform`] batches four joints field-major
//! for vectorized consumption; it is the form stored in a skeleton.

mod soa;
mod transform;

pub use soa::{SoaFloat3, SoaQuaternion, SoaTransform, SOA_LANES};
pub use transform::{Float3, Quaternion, Transform};
