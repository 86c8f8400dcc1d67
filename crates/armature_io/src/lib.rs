//! # ARMATURE IO
//!
//! Typed binary archives used to persist runtime data.
//!
//! ## Stream Layout
//!
//! ```text
//! [1 byte: endianness tag, 0 = little, 1 = big]
//! per object:
//!   [tag string, NUL-terminated]
//!   [u32: version]
//!   [object payload]
//! ```
//!
//! Scalars and raw arrays are written in the archive's endianness. Readers
//! swap bytes when that differs from the native order.
//!
//! ## Example
//!
//! ```rust
//! use armature_io::{IArchive, OArchive};
//!
//! let mut out = OArchive::new(Vec::new()).unwrap();
//! out.write(42_i32).unwrap();
//! out.write_array(&[1_i16, -1]).unwrap();
//!
//! let bytes = out.into_inner();
//! let mut input = IArchive::new(bytes.as_slice()).unwrap();
//! assert_eq!(input.read::<i32>().unwrap(), 42);
//! let mut shorts = [0_i16; 2];
//! input.read_array(&mut shorts).unwrap();
//! assert_eq!(shorts, [1, -1]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod archive;
pub mod endian;
pub mod error;
mod math;

pub use archive::{Archivable, IArchive, OArchive, MAX_TAG_LEN};
pub use endian::{ArchiveScalar, Endianness};
pub use error::{ArchiveError, ArchiveResult};
