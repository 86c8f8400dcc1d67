//! # Output and Input Archives
//!
//! `OArchive` writes scalars, raw arrays and framed objects to any
//! [`Write`] sink. `IArchive` reads them back from any [`Read`] source,
//! byte-swapping when the stream's endianness differs from the platform.
//!
//! Arrays are moved as raw bytes through bytemuck; only the swap pass
//! touches individual elements.

use std::io::{Read, Write};

use crate::endian::{ArchiveScalar, Endianness};
use crate::error::{ArchiveError, ArchiveResult};

/// Longest object tag accepted when reading, terminator excluded.
pub const MAX_TAG_LEN: usize = 64;

/// A type that can be framed into an archive as a tagged, versioned object.
pub trait Archivable {
    /// Tag written before the object payload.
    const TAG: &'static str;

    /// Current payload version.
    const VERSION: u32;

    /// Error returned by `save` and `load`.
    type Error: From<ArchiveError>;

    /// Writes the object payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive fails to write.
    fn save<W: Write>(&self, archive: &mut OArchive<W>) -> Result<(), Self::Error>;

    /// Reads the object payload written with `version`.
    ///
    /// # Errors
    ///
    /// Returns an error if the version is unsupported or the payload is
    /// malformed.
    fn load<R: Read>(&mut self, archive: &mut IArchive<R>, version: u32)
        -> Result<(), Self::Error>;
}

/// Archive writer.
pub struct OArchive<W: Write> {
    writer: W,
    endianness: Endianness,
    written: u64,
}

impl<W: Write> OArchive<W> {
    /// Creates an archive in the native byte order.
    ///
    /// # Errors
    ///
    /// Returns an error if the endianness tag cannot be written.
    pub fn new(writer: W) -> ArchiveResult<Self> {
        Self::with_endianness(writer, Endianness::native())
    }

    /// Creates an archive in the given byte order.
    ///
    /// # Errors
    ///
    /// Returns an error if the endianness tag cannot be written.
    pub fn with_endianness(writer: W, endianness: Endianness) -> ArchiveResult<Self> {
        let mut archive = Self {
            writer,
            endianness,
            written: 0,
        };
        archive.write_bytes(&[endianness.tag()])?;
        Ok(archive)
    }

    /// Byte order of this archive.
    #[inline]
    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bytes written so far, endianness tag included.
    #[inline]
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    #[inline]
    fn needs_swap(&self) -> bool {
        self.endianness != Endianness::native()
    }

    /// Writes a single scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write<T: ArchiveScalar>(&mut self, value: T) -> ArchiveResult<()> {
        let value = if self.needs_swap() {
            value.swap_endian()
        } else {
            value
        };
        self.write_bytes(bytemuck::bytes_of(&value))
    }

    /// Writes a contiguous array of scalars.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_array<T: ArchiveScalar>(&mut self, values: &[T]) -> ArchiveResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        if !self.needs_swap() {
            return self.write_bytes(bytemuck::cast_slice(values));
        }
        let swapped: Vec<T> = values.iter().map(|v| v.swap_endian()).collect();
        self.write_bytes(bytemuck::cast_slice(&swapped))
    }

    /// Writes raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> ArchiveResult<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Writes a NUL-terminated string.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidString`] if `value` contains a NUL byte,
    /// or an error if the sink fails.
    pub fn write_str(&mut self, value: &str) -> ArchiveResult<()> {
        if value.as_bytes().contains(&0) {
            return Err(ArchiveError::InvalidString);
        }
        self.write_bytes(value.as_bytes())?;
        self.write_bytes(&[0])
    }

    /// Writes `object` framed with its tag and version.
    ///
    /// # Errors
    ///
    /// Returns the object's error if framing or the payload fails to write.
    pub fn write_object<T: Archivable>(&mut self, object: &T) -> Result<(), T::Error> {
        self.write_str(T::TAG)?;
        self.write(T::VERSION)?;
        object.save(self)
    }

    /// Flushes the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush.
    pub fn flush(&mut self) -> ArchiveResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Consumes the archive and returns the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Archive reader.
pub struct IArchive<R: Read> {
    reader: R,
    endianness: Endianness,
}

impl<R: Read> IArchive<R> {
    /// Opens an archive, reading its endianness tag.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::BadEndianTag`] for an unknown tag, or an
    /// error if the source fails.
    pub fn new(mut reader: R) -> ArchiveResult<Self> {
        let mut tag = [0_u8; 1];
        reader.read_exact(&mut tag)?;
        let endianness = Endianness::from_tag(tag[0]).ok_or(ArchiveError::BadEndianTag(tag[0]))?;
        Ok(Self { reader, endianness })
    }

    /// Byte order of this archive.
    #[inline]
    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    #[inline]
    fn needs_swap(&self) -> bool {
        self.endianness != Endianness::native()
    }

    /// Reads a single scalar.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or ends early.
    pub fn read<T: ArchiveScalar>(&mut self) -> ArchiveResult<T> {
        let mut value = T::zeroed();
        self.reader.read_exact(bytemuck::bytes_of_mut(&mut value))?;
        Ok(if self.needs_swap() {
            value.swap_endian()
        } else {
            value
        })
    }

    /// Fills `values` from a contiguous array in the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or ends early.
    pub fn read_array<T: ArchiveScalar>(&mut self, values: &mut [T]) -> ArchiveResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.reader.read_exact(bytemuck::cast_slice_mut(values))?;
        if self.needs_swap() {
            for value in values.iter_mut() {
                *value = value.swap_endian();
            }
        }
        Ok(())
    }

    /// Fills `bytes` with raw bytes from the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or ends early.
    pub fn read_bytes(&mut self, bytes: &mut [u8]) -> ArchiveResult<()> {
        self.reader.read_exact(bytes)?;
        Ok(())
    }

    /// Reads a NUL-terminated string of at most `max_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::StringTooLong`] if no terminator is found in
    /// time, [`ArchiveError::InvalidString`] for non UTF-8 content, or an
    /// error if the source fails.
    pub fn read_str(&mut self, max_len: usize) -> ArchiveResult<String> {
        let mut bytes = Vec::new();
        loop {
            let byte: u8 = self.read()?;
            if byte == 0 {
                break;
            }
            if bytes.len() == max_len {
                return Err(ArchiveError::StringTooLong { max: max_len });
            }
            bytes.push(byte);
        }
        String::from_utf8(bytes).map_err(|_| ArchiveError::InvalidString)
    }

    /// Reads a framed object into `object`.
    ///
    /// The tag must match `T::TAG`; the stored version is handed to
    /// [`Archivable::load`], which decides whether it is supported.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::TagMismatch`] for a foreign object, or the
    /// object's own load error.
    pub fn read_object<T: Archivable>(&mut self, object: &mut T) -> Result<(), T::Error> {
        let found = self.read_str(MAX_TAG_LEN)?;
        if found != T::TAG {
            return Err(ArchiveError::TagMismatch {
                expected: T::TAG,
                found,
            }
            .into());
        }
        let version: u32 = self.read()?;
        object.load(self, version)
    }

    /// Consumes the archive and returns the source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
