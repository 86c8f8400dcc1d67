//! # Skeleton
//!
//! The joint hierarchy container. Names, parent indices and bind poses are
//! stored as parallel arrays indexed by joint, all carved out of a single
//! [`PackedBuffer`].
//!
//! Joints are ordered so that every parent precedes its children; the parent
//! of a root joint is [`NO_PARENT`].

use std::fmt;
use std::io::{Read, Write};
use std::ops::Range;

use armature_core::math::{SoaTransform, SOA_LANES};
use armature_core::memory::{cast_region_mut, PackedBuffer, PackedLayout, RegionRequest};
use armature_io::{Archivable, IArchive, OArchive};
use bytemuck::{Pod, Zeroable};

use crate::error::{DecodeError, SkeletonError, SkeletonResult};

/// Parent index of a root joint.
pub const NO_PARENT: i16 = -1;

/// Maximum number of joints in a skeleton.
pub const MAX_JOINTS: usize = 1024;

/// Maximum number of SoA bind pose blocks in a skeleton.
pub const MAX_SOA_JOINTS: usize = MAX_JOINTS.div_ceil(SOA_LANES);

/// Maximum size of the name region in bytes, terminators included.
pub const MAX_NAME_CHARS: usize = MAX_JOINTS * 256;

// Region indices in the packed layout, in request order.
const BIND_POSES: usize = 0;
const NAMES: usize = 1;
const PARENTS: usize = 2;
const CHARS: usize = 3;

/// Location of one joint name inside the shared character region.
///
/// The name occupies `len` bytes from `offset` and is followed by a NUL.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct NameView {
    /// Byte offset of the first character
    pub offset: u32,
    /// Name length in bytes, terminator excluded
    pub len: u32,
}

impl NameView {
    // Character regions come from i32 counts, so both values fit in u32.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn new(offset: usize, len: usize) -> Self {
        Self {
            offset: offset as u32,
            len: len as u32,
        }
    }

    /// Byte range of the name, terminator excluded.
    #[inline]
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.offset as usize..self.offset as usize + self.len as usize
    }
}

/// Mutable access to every joint array of a freshly allocated skeleton.
#[derive(Default)]
pub(crate) struct JointArraysMut<'a> {
    pub(crate) bind_poses: &'a mut [SoaTransform],
    pub(crate) names: &'a mut [NameView],
    pub(crate) parents: &'a mut [i16],
    pub(crate) chars: &'a mut [u8],
}

/// A joint hierarchy with bind poses.
///
/// `Skeleton::default()` is empty and owns no memory. A populated skeleton
/// is produced by [`SkeletonBuilder`](crate::SkeletonBuilder) or by loading
/// it from an archive.
#[derive(Default, Clone)]
pub struct Skeleton {
    buffer: PackedBuffer,
    num_joints: usize,
}

impl Skeleton {
    /// Archive tag of a skeleton object.
    pub const TAG: &'static str = "armature-skeleton";

    /// The only archive version this build reads and writes.
    pub const VERSION: u32 = 2;

    /// Plans the packed block for `num_joints` joints and `chars` name bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the block size overflows.
    pub fn layout(chars: usize, num_joints: usize) -> SkeletonResult<PackedLayout> {
        Ok(PackedLayout::plan(&[
            RegionRequest::array::<SoaTransform>(num_joints.div_ceil(SOA_LANES)),
            RegionRequest::array::<NameView>(num_joints),
            RegionRequest::array::<i16>(num_joints),
            RegionRequest::array::<u8>(chars),
        ])?)
    }

    /// Allocates room for `num_joints` joints and `chars` name bytes.
    ///
    /// No memory is allocated for zero joints. All arrays start zeroed.
    ///
    /// # Panics
    ///
    /// Panics if the skeleton is not empty.
    pub(crate) fn allocate(
        &mut self,
        chars: usize,
        num_joints: usize,
    ) -> SkeletonResult<JointArraysMut<'_>> {
        assert!(
            self.num_joints == 0 && !self.buffer.is_allocated(),
            "skeleton must be empty before allocation"
        );
        if num_joints == 0 {
            return Ok(JointArraysMut::default());
        }
        if num_joints > MAX_JOINTS {
            return Err(SkeletonError::TooManyJoints {
                count: num_joints,
                max: MAX_JOINTS,
            });
        }

        self.buffer = PackedBuffer::allocate(Self::layout(chars, num_joints)?);
        self.num_joints = num_joints;

        let mut regions = self.buffer.regions_mut().into_iter();
        let mut next = || regions.next().unwrap_or_default();
        Ok(JointArraysMut {
            bind_poses: cast_region_mut(next()),
            names: cast_region_mut(next()),
            parents: cast_region_mut(next()),
            chars: next(),
        })
    }

    /// Frees the joint arrays and returns to the empty state.
    ///
    /// Safe to call on an empty skeleton and safe to call repeatedly.
    pub fn deallocate(&mut self) {
        self.buffer.release();
        self.num_joints = 0;
    }

    /// Number of joints.
    #[inline]
    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.num_joints
    }

    /// Number of SoA bind pose blocks, `ceil(num_joints / 4)`.
    #[inline]
    #[must_use]
    pub fn num_soa_joints(&self) -> usize {
        self.num_joints.div_ceil(SOA_LANES)
    }

    /// True if the skeleton has no joints.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_joints == 0
    }

    /// Size of the packed block in bytes.
    #[inline]
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        self.buffer.layout().size()
    }

    /// Bind poses, four joints per block.
    #[must_use]
    pub fn joint_bind_poses(&self) -> &[SoaTransform] {
        self.buffer.region(BIND_POSES)
    }

    /// Parent index of every joint.
    #[must_use]
    pub fn joint_parents(&self) -> &[i16] {
        self.buffer.region(PARENTS)
    }

    /// Name location of every joint.
    #[must_use]
    pub fn joint_name_views(&self) -> &[NameView] {
        self.buffer.region(NAMES)
    }

    /// The shared name region, NUL-separated.
    #[must_use]
    pub fn joint_name_chars(&self) -> &[u8] {
        self.buffer.region_bytes(CHARS)
    }

    /// Name of `joint`, or `None` if out of range.
    #[must_use]
    pub fn joint_name(&self, joint: usize) -> Option<&str> {
        let view = self.joint_name_views().get(joint)?;
        std::str::from_utf8(self.joint_name_chars().get(view.range())?).ok()
    }

    /// Joint names in joint order.
    pub fn joint_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        (0..self.num_joints).map(move |joint| self.joint_name(joint).unwrap_or_default())
    }

    /// Writes the skeleton payload.
    ///
    /// ```text
    /// i32 N; if N == 0 nothing follows
    /// i32 name bytes, then the names, NUL-terminated, in joint order
    /// i16 × N parents
    /// SoaTransform × ceil(N / 4) bind poses
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::NamesTooLong`] if the names exceed
    /// [`MAX_NAME_CHARS`], or an error if the archive fails to write.
    pub fn save<W: Write>(&self, archive: &mut OArchive<W>) -> SkeletonResult<()> {
        let num_joints = i32::try_from(self.num_joints).map_err(|_| SkeletonError::TooManyJoints {
            count: self.num_joints,
            max: MAX_JOINTS,
        })?;
        let chars: usize = self
            .joint_name_views()
            .iter()
            .map(|view| view.len as usize + 1)
            .sum();
        let char_count = i32::try_from(chars)
            .ok()
            .filter(|_| chars <= MAX_NAME_CHARS)
            .ok_or(SkeletonError::NamesTooLong {
                chars,
                max: MAX_NAME_CHARS,
            })?;

        archive.write(num_joints)?;
        if self.num_joints == 0 {
            return Ok(());
        }
        archive.write(char_count)?;
        archive.write_bytes(&self.joint_name_chars()[..chars])?;
        archive.write_array(self.joint_parents())?;
        archive.write_array(self.joint_bind_poses())?;
        Ok(())
    }

    /// Replaces the skeleton with one read from `archive`.
    ///
    /// Any previous content is released first. On error the skeleton is left
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::UnsupportedVersion`] if `version` is not
    /// [`Skeleton::VERSION`], [`SkeletonError::Decode`] for a malformed
    /// record, or an archive error if the stream fails.
    pub fn load<R: Read>(&mut self, archive: &mut IArchive<R>, version: u32) -> SkeletonResult<()> {
        self.deallocate();

        if version != Self::VERSION {
            tracing::error!(
                "Unsupported skeleton version {}, expected {}",
                version,
                Self::VERSION
            );
            return Err(SkeletonError::UnsupportedVersion {
                found: version,
                expected: Self::VERSION,
            });
        }

        match self.load_joints(archive) {
            Ok(()) => {
                tracing::debug!("Loaded skeleton with {} joints", self.num_joints);
                Ok(())
            }
            Err(err) => {
                tracing::error!("Failed to load skeleton: {}", err);
                self.deallocate();
                Err(err)
            }
        }
    }

    fn load_joints<R: Read>(&mut self, archive: &mut IArchive<R>) -> SkeletonResult<()> {
        let count: i32 = archive.read()?;
        if count == 0 {
            return Ok(());
        }
        let num_joints = usize::try_from(count)
            .ok()
            .filter(|&n| n <= MAX_JOINTS)
            .ok_or(DecodeError::JointCount(count))?;

        let char_count: i32 = archive.read()?;
        let chars = usize::try_from(char_count)
            .ok()
            .filter(|&n| n <= MAX_NAME_CHARS)
            .ok_or(DecodeError::CharCount(char_count))?;

        let joints = self.allocate(chars, num_joints)?;
        archive.read_bytes(joints.chars)?;
        fix_up_names(joints.chars, joints.names)?;
        archive.read_array(joints.parents)?;
        validate_parents(joints.parents)?;
        archive.read_array(joints.bind_poses)?;
        Ok(())
    }
}

/// Rebuilds name views from the NUL-separated character region.
///
/// Every scan is bounded by the end of the region. Bytes after the last
/// terminator are ignored.
fn fix_up_names(chars: &[u8], names: &mut [NameView]) -> Result<(), DecodeError> {
    let mut cursor = 0;
    for (joint, view) in names.iter_mut().enumerate() {
        let remaining = &chars[cursor..];
        let len = remaining
            .iter()
            .position(|&byte| byte == 0)
            .ok_or(DecodeError::MissingTerminator { joint })?;
        std::str::from_utf8(&remaining[..len]).map_err(|_| DecodeError::InvalidName { joint })?;
        *view = NameView::new(cursor, len);
        cursor += len + 1;
    }
    Ok(())
}

fn validate_parents(parents: &[i16]) -> Result<(), DecodeError> {
    for (joint, &parent) in parents.iter().enumerate() {
        let valid = parent == NO_PARENT || usize::try_from(parent).is_ok_and(|p| p < joint);
        if !valid {
            return Err(DecodeError::InvalidParent { joint, parent });
        }
    }
    Ok(())
}

impl Archivable for Skeleton {
    const TAG: &'static str = Skeleton::TAG;
    const VERSION: u32 = Skeleton::VERSION;
    type Error = SkeletonError;

    fn save<W: Write>(&self, archive: &mut OArchive<W>) -> SkeletonResult<()> {
        Skeleton::save(self, archive)
    }

    fn load<R: Read>(&mut self, archive: &mut IArchive<R>, version: u32) -> SkeletonResult<()> {
        Skeleton::load(self, archive, version)
    }
}

impl PartialEq for Skeleton {
    fn eq(&self, other: &Self) -> bool {
        self.num_joints == other.num_joints
            && self.joint_parents() == other.joint_parents()
            && self.joint_names().eq(other.joint_names())
            && self.joint_bind_poses() == other.joint_bind_poses()
    }
}

impl fmt::Debug for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skeleton")
            .field("num_joints", &self.num_joints)
            .field("names", &self.joint_names().collect::<Vec<_>>())
            .field("parents", &self.joint_parents())
            .finish_non_exhaustive()
    }
}
