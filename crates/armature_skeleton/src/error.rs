//! # Skeleton Error Types
//!
//! Errors raised while building, saving or loading a skeleton.

use armature_core::memory::LayoutError;
use armature_io::ArchiveError;
use thiserror::Error;

/// A skeleton record that cannot be reconstructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Joint count is negative or above the supported maximum.
    #[error("invalid joint count {0}")]
    JointCount(i32),

    /// Name character count is negative or above the supported maximum.
    #[error("invalid name character count {0}")]
    CharCount(i32),

    /// The name of `joint` has no NUL terminator inside the name region.
    #[error("name of joint {joint} is not terminated")]
    MissingTerminator {
        /// Joint index
        joint: usize,
    },

    /// The name of `joint` is not valid UTF-8.
    #[error("name of joint {joint} is not valid UTF-8")]
    InvalidName {
        /// Joint index
        joint: usize,
    },

    /// Parent index is neither the root sentinel nor a preceding joint.
    #[error("joint {joint} has invalid parent {parent}")]
    InvalidParent {
        /// Joint index
        joint: usize,
        /// Parent index found in the stream
        parent: i16,
    },
}

/// Errors that can occur while working with skeletons.
#[derive(Error, Debug)]
pub enum SkeletonError {
    /// The archived skeleton has a version this build cannot read.
    #[error("unsupported skeleton version {found}, expected {expected}")]
    UnsupportedVersion {
        /// Version found in the archive
        found: u32,
        /// Version this build reads
        expected: u32,
    },

    /// The archived skeleton is malformed.
    #[error("malformed skeleton: {0}")]
    Decode(#[from] DecodeError),

    /// The archive stream failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// The packed layout could not be planned.
    #[error("skeleton layout: {0}")]
    Layout(#[from] LayoutError),

    /// More joints than a skeleton can hold.
    #[error("{count} joints exceed the maximum of {max}")]
    TooManyJoints {
        /// Joint count requested
        count: usize,
        /// Supported maximum
        max: usize,
    },

    /// Joint names need more bytes than a skeleton can hold.
    #[error("{chars} name bytes exceed the maximum of {max}")]
    NamesTooLong {
        /// Name bytes required, terminators included
        chars: usize,
        /// Supported maximum
        max: usize,
    },

    /// A joint name cannot be stored.
    #[error("invalid joint name {name:?}")]
    InvalidJointName {
        /// The offending name
        name: String,
    },

    /// A skeleton description failed to parse.
    #[error("skeleton description: {0}")]
    Config(#[from] toml::de::Error),

    /// A skeleton description could not be read.
    #[error("skeleton description io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for skeleton operations.
pub type SkeletonResult<T> = Result<T, SkeletonError>;
