//! Per-joint transform types.
//!
//! Serialized as plain arrays in description files:
//! `translation = [0.0, 1.0, 0.0]`, `rotation = [0.0, 0.0, 0.0, 1.0]`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D vector - translation, scale
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Float3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Float3 {
    /// Creates a new Float3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a Float3 with all components set to `value`
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Zero vector
    pub const ZERO: Self = Self::splat(0.0);

    /// One vector
    pub const ONE: Self = Self::splat(1.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Float3 {
    fn from(arr: [f32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Float3> for [f32; 3] {
    fn from(v: Float3) -> Self {
        v.to_array()
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

impl From<Quaternion> for [f32; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

/// Transform - translation + rotation + scale
///
/// Missing fields in a description file default to identity.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Translation
    pub translation: Float3,
    /// Rotation
    pub rotation: Quaternion,
    /// Scale (per axis)
    pub scale: Float3,
}

impl Transform {
    /// Creates a new transform
    #[must_use]
    pub const fn new(translation: Float3, rotation: Quaternion, scale: Float3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Pure translation
    #[must_use]
    pub const fn from_translation(translation: Float3) -> Self {
        Self::new(translation, Quaternion::IDENTITY, Float3::ONE)
    }

    /// Identity transform
    pub const IDENTITY: Self = Self::new(Float3::ZERO, Quaternion::IDENTITY, Float3::ONE);
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
