//! Archive scalars for the core math types.

use armature_core::math::{Float3, Quaternion, SoaFloat3, SoaQuaternion, SoaTransform, Transform};

use crate::endian::ArchiveScalar;

impl ArchiveScalar for Float3 {
    fn swap_endian(self) -> Self {
        Self::new(self.x.swap_endian(), self.y.swap_endian(), self.z.swap_endian())
    }
}

impl ArchiveScalar for Quaternion {
    fn swap_endian(self) -> Self {
        Self {
            x: self.x.swap_endian(),
            y: self.y.swap_endian(),
            z: self.z.swap_endian(),
            w: self.w.swap_endian(),
        }
    }
}

impl ArchiveScalar for Transform {
    fn swap_endian(self) -> Self {
        Self {
            translation: self.translation.swap_endian(),
            rotation: self.rotation.swap_endian(),
            scale: self.scale.swap_endian(),
        }
    }
}

impl ArchiveScalar for SoaFloat3 {
    fn swap_endian(self) -> Self {
        Self {
            x: self.x.swap_endian(),
            y: self.y.swap_endian(),
            z: self.z.swap_endian(),
        }
    }
}

impl ArchiveScalar for SoaQuaternion {
    fn swap_endian(self) -> Self {
        Self {
            x: self.x.swap_endian(),
            y: self.y.swap_endian(),
            z: self.z.swap_endian(),
            w: self.w.swap_endian(),
        }
    }
}

impl ArchiveScalar for SoaTransform {
    fn swap_endian(self) -> Self {
        Self {
            translation: self.translation.swap_endian(),
            rotation: self.rotation.swap_endian(),
            scale: self.scale.swap_endian(),
        }
    }
}
