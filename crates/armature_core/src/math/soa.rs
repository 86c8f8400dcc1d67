//! Structure-of-arrays transform blocks.
//!
//! ```text
//! SoaTransform (160 bytes, align 16)
//! translation.x [j0 j1 j2 j3]  translation.y [...]  translation.z [...]
//! rotation.x    [j0 j1 j2 j3]  rotation.y    [...]  rotation.z    [...]  rotation.w [...]
//! scale.x       [j0 j1 j2 j3]  scale.y       [...]  scale.z       [...]
//! ```

use bytemuck::{Pod, Zeroable};

use super::transform::{Float3, Quaternion, Transform};

/// Number of joints packed in one SoA block.
pub const SOA_LANES: usize = 4;

/// Four 3D vectors, field-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SoaFloat3 {
    /// X lanes
    pub x: [f32; SOA_LANES],
    /// Y lanes
    pub y: [f32; SOA_LANES],
    /// Z lanes
    pub z: [f32; SOA_LANES],
}

impl SoaFloat3 {
    /// Broadcasts one vector to every lane.
    #[must_use]
    pub const fn splat(v: Float3) -> Self {
        Self {
            x: [v.x; SOA_LANES],
            y: [v.y; SOA_LANES],
            z: [v.z; SOA_LANES],
        }
    }

    /// Reads lane `lane`.
    #[inline]
    #[must_use]
    pub const fn lane(&self, lane: usize) -> Float3 {
        Float3::new(self.x[lane], self.y[lane], self.z[lane])
    }

    /// Writes lane `lane`.
    #[inline]
    pub fn set_lane(&mut self, lane: usize, v: Float3) {
        self.x[lane] = v.x;
        self.y[lane] = v.y;
        self.z[lane] = v.z;
    }
}

/// Four quaternions, field-major.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SoaQuaternion {
    /// X lanes
    pub x: [f32; SOA_LANES],
    /// Y lanes
    pub y: [f32; SOA_LANES],
    /// Z lanes
    pub z: [f32; SOA_LANES],
    /// W lanes
    pub w: [f32; SOA_LANES],
}

impl SoaQuaternion {
    /// Broadcasts one quaternion to every lane.
    #[must_use]
    pub const fn splat(q: Quaternion) -> Self {
        Self {
            x: [q.x; SOA_LANES],
            y: [q.y; SOA_LANES],
            z: [q.z; SOA_LANES],
            w: [q.w; SOA_LANES],
        }
    }

    /// Identity rotation in every lane.
    pub const IDENTITY: Self = Self::splat(Quaternion::IDENTITY);

    /// Reads lane `lane`.
    #[inline]
    #[must_use]
    pub const fn lane(&self, lane: usize) -> Quaternion {
        Quaternion::new(self.x[lane], self.y[lane], self.z[lane], self.w[lane])
    }

    /// Writes lane `lane`.
    #[inline]
    pub fn set_lane(&mut self, lane: usize, q: Quaternion) {
        self.x[lane] = q.x;
        self.y[lane] = q.y;
        self.z[lane] = q.z;
        self.w[lane] = q.w;
    }
}

impl Default for SoaQuaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Four joint transforms, field-major.
///
/// The strictest-aligned element stored in a skeleton buffer.
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SoaTransform {
    /// Translation lanes
    pub translation: SoaFloat3,
    /// Rotation lanes
    pub rotation: SoaQuaternion,
    /// Scale lanes
    pub scale: SoaFloat3,
}

impl SoaTransform {
    /// Identity transform in every lane.
    pub const IDENTITY: Self = Self {
        translation: SoaFloat3::splat(Float3::ZERO),
        rotation: SoaQuaternion::IDENTITY,
        scale: SoaFloat3::splat(Float3::ONE),
    };

    /// Packs up to four transforms; missing lanes are identity.
    #[must_use]
    pub fn from_lanes(lanes: &[Transform]) -> Self {
        let mut soa = Self::IDENTITY;
        for (lane, transform) in lanes.iter().take(SOA_LANES).enumerate() {
            soa.set_lane(lane, *transform);
        }
        soa
    }

    /// Reads lane `lane`.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= SOA_LANES`.
    #[inline]
    #[must_use]
    pub const fn lane(&self, lane: usize) -> Transform {
        Transform::new(
            self.translation.lane(lane),
            self.rotation.lane(lane),
            self.scale.lane(lane),
        )
    }

    /// Writes lane `lane`.
    ///
    /// # Panics
    ///
    /// Panics if `lane >= SOA_LANES`.
    #[inline]
    pub fn set_lane(&mut self, lane: usize, transform: Transform) {
        self.translation.set_lane(lane, transform.translation);
        self.rotation.set_lane(lane, transform.rotation);
        self.scale.set_lane(lane, transform.scale);
    }
}

impl Default for SoaTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soa_transform_layout() {
        assert_eq!(std::mem::size_of::<SoaTransform>(), 160);
        assert_eq!(std::mem::align_of::<SoaTransform>(), 16);
        // Strictly decreasing alignment chain of a skeleton buffer.
        assert!(std::mem::align_of::<SoaTransform>() >= std::mem::align_of::<[u32; 2]>());
        assert!(std::mem::align_of::<[u32; 2]>() >= std::mem::align_of::<i16>());
    }

    #[test]
    fn test_lanes_pack_and_unpack() {
        let transforms: Vec<Transform> = (0..3)
            .map(|i| {
                let f = i as f32;
                Transform::new(
                    Float3::new(f, f + 1.0, f + 2.0),
                    Quaternion::new(0.0, 0.0, f, 1.0),
                    Float3::splat(f + 1.0),
                )
            })
            .collect();

        let soa = SoaTransform::from_lanes(&transforms);
        for (lane, expected) in transforms.iter().enumerate() {
            assert_eq!(soa.lane(lane), *expected);
        }
        // Unused lane stays identity.
        assert_eq!(soa.lane(3), Transform::IDENTITY);
        assert_eq!(soa.translation.x, [0.0, 1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_from_lanes_ignores_extra() {
        let lanes = [Transform::from_translation(Float3::ONE); 6];
        let soa = SoaTransform::from_lanes(&lanes);
        assert_eq!(soa.translation.y, [1.0; 4]);
    }
}
