//! # Skeleton Builder
//!
//! Offline description of a joint hierarchy and its conversion into a
//! runtime [`Skeleton`].
//!
//! Descriptions are TOML files:
//!
//! ```toml
//! [[roots]]
//! name = "pelvis"
//! transform = { translation = [0.0, 1.0, 0.0] }
//!
//! [[roots.children]]
//! name = "spine"
//! ```

use std::path::Path;

use armature_core::math::{SoaTransform, Transform, SOA_LANES};
use serde::{Deserialize, Serialize};

use crate::error::{SkeletonError, SkeletonResult};
use crate::skeleton::{NameView, Skeleton, MAX_JOINTS, MAX_NAME_CHARS, NO_PARENT};

/// One joint of a skeleton description and its sub-tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawJoint {
    /// Joint name
    pub name: String,
    /// Bind pose relative to the parent. Defaults to identity.
    #[serde(default)]
    pub transform: Transform,
    /// Child joints, in order
    #[serde(default)]
    pub children: Vec<RawJoint>,
}

impl RawJoint {
    /// Creates a joint with an identity bind pose and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            children: Vec::new(),
        }
    }

    /// Sets the bind pose.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Appends a child joint.
    #[must_use]
    pub fn with_child(mut self, child: RawJoint) -> Self {
        self.children.push(child);
        self
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    fn name_chars(&self) -> usize {
        self.name.len() + 1 + self.children.iter().map(Self::name_chars).sum::<usize>()
    }

    fn first_invalid_name(&self) -> Option<&str> {
        if self.name.contains('\0') {
            return Some(&self.name);
        }
        self.children.iter().find_map(Self::first_invalid_name)
    }
}

/// A skeleton description: a forest of joints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSkeleton {
    /// Root joints, in order
    #[serde(default)]
    pub roots: Vec<RawJoint>,
}

impl RawSkeleton {
    /// Parses a description from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::Config`] if the text is not a valid description.
    pub fn from_toml_str(text: &str) -> SkeletonResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a description file.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::Io`] if the file cannot be read, or
    /// [`SkeletonError::Config`] if it does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> SkeletonResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Total number of joints.
    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.roots.iter().map(RawJoint::count).sum()
    }

    /// Checks that the description can be built.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::TooManyJoints`] above [`MAX_JOINTS`], or
    /// [`SkeletonError::NamesTooLong`] above [`MAX_NAME_CHARS`] name bytes, or
    /// [`SkeletonError::InvalidJointName`] for a name containing NUL.
    pub fn validate(&self) -> SkeletonResult<()> {
        let count = self.num_joints();
        if count > MAX_JOINTS {
            return Err(SkeletonError::TooManyJoints {
                count,
                max: MAX_JOINTS,
            });
        }
        let chars: usize = self.roots.iter().map(RawJoint::name_chars).sum();
        if chars > MAX_NAME_CHARS {
            return Err(SkeletonError::NamesTooLong {
                chars,
                max: MAX_NAME_CHARS,
            });
        }
        if let Some(name) = self.roots.iter().find_map(RawJoint::first_invalid_name) {
            return Err(SkeletonError::InvalidJointName {
                name: name.to_owned(),
            });
        }
        Ok(())
    }
}

/// Converts a [`RawSkeleton`] into a runtime [`Skeleton`].
pub struct SkeletonBuilder;

impl SkeletonBuilder {
    /// Builds a skeleton with joints in depth-first order.
    ///
    /// Unused lanes of the last bind pose block are identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the description fails [`RawSkeleton::validate`].
    pub fn build(raw: &RawSkeleton) -> SkeletonResult<Skeleton> {
        raw.validate()?;

        let mut joints = Vec::with_capacity(raw.num_joints());
        for root in &raw.roots {
            flatten(root, NO_PARENT, &mut joints);
        }

        let mut skeleton = Skeleton::default();
        if joints.is_empty() {
            return Ok(skeleton);
        }

        let chars = joints.iter().map(|(joint, _)| joint.name.len() + 1).sum();
        let arrays = skeleton.allocate(chars, joints.len())?;

        let mut cursor = 0;
        for (index, (joint, parent)) in joints.iter().enumerate() {
            let name = joint.name.as_bytes();
            arrays.chars[cursor..cursor + name.len()].copy_from_slice(name);
            arrays.chars[cursor + name.len()] = 0;
            arrays.names[index] = NameView::new(cursor, name.len());
            arrays.parents[index] = *parent;
            cursor += name.len() + 1;
        }

        let mut lanes = [Transform::IDENTITY; SOA_LANES];
        for (block, chunk) in arrays.bind_poses.iter_mut().zip(joints.chunks(SOA_LANES)) {
            for (lane, (joint, _)) in lanes.iter_mut().zip(chunk) {
                *lane = joint.transform;
            }
            *block = SoaTransform::from_lanes(&lanes[..chunk.len()]);
        }

        tracing::debug!("Built skeleton with {} joints", skeleton.num_joints());
        Ok(skeleton)
    }
}

// Indices stay below MAX_JOINTS, checked by `validate`.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn flatten<'a>(joint: &'a RawJoint, parent: i16, out: &mut Vec<(&'a RawJoint, i16)>) {
    let index = out.len() as i16;
    out.push((joint, parent));
    for child in &joint.children {
        flatten(child, index, out);
    }
}
