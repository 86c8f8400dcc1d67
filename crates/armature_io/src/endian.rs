//! Endianness handling for archive scalars.

use bytemuck::Pod;

/// Byte order of an archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Endianness {
    /// Least significant byte first.
    Little = 0,
    /// Most significant byte first.
    Big = 1,
}

impl Endianness {
    /// Byte order of the running platform.
    #[inline]
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    /// Tag byte written at the start of an archive.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Converts from a tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Little),
            1 => Some(Self::Big),
            _ => None,
        }
    }

    /// The other byte order.
    #[inline]
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }
}

/// A plain-old-data value an archive can read and write.
///
/// `swap_endian` reverses the byte order of every multi-byte field, so an
/// array of values can be written as raw bytes and fixed up in place.
pub trait ArchiveScalar: Pod {
    /// Returns `self` with every multi-byte field byte-swapped.
    #[must_use]
    fn swap_endian(self) -> Self;
}

macro_rules! impl_integer_scalar {
    ($($ty:ty),*) => {
        $(
            impl ArchiveScalar for $ty {
                #[inline]
                fn swap_endian(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

impl_integer_scalar!(u8, i8, u16, i16, u32, i32, u64, i64);

impl ArchiveScalar for f32 {
    #[inline]
    fn swap_endian(self) -> Self {
        f32::from_bits(self.to_bits().swap_bytes())
    }
}

impl<T: ArchiveScalar, const N: usize> ArchiveScalar for [T; N]
where
    [T; N]: Pod,
{
    #[inline]
    fn swap_endian(self) -> Self {
        self.map(ArchiveScalar::swap_endian)
    }
}
