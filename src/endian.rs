/// Byte order used for multi-byte values.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum Endian {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first (network byte order).
    Big,
}

impl Endian {
    /// Returns `Little` if `little_endian` is true, otherwise `Big`.
    pub const fn from_little(little_endian: bool) -> Self {
        if little_endian {
            Self::Little
        } else {
            Self::Big
        }
    }

    /// Returns true for `Little`.
    pub const fn is_little(self) -> bool {
        matches!(self, Self::Little)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width numeric type that can be read from or written to a view.
///
/// This trait is sealed. It is implemented for `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`,
/// `i64`, `f32` and `f64`.
pub trait Scalar: Copy + sealed::Sealed {
    /// Encoded size of the value, in bytes.
    const WIDTH: usize;

    /// Decodes a value from exactly `WIDTH` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != WIDTH`.
    fn decode(bytes: &[u8], endian: Endian) -> Self;

    /// Encodes the value into exactly `WIDTH` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != WIDTH`.
    fn encode(self, endian: Endian, out: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const WIDTH: usize = core::mem::size_of::<$t>();

                #[inline(always)]
                fn decode(bytes: &[u8], endian: Endian) -> Self {
                    let mut buf = [0u8; core::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    match endian {
                        Endian::Little => <$t>::from_le_bytes(buf),
                        Endian::Big => <$t>::from_be_bytes(buf),
                    }
                }

                #[inline(always)]
                fn encode(self, endian: Endian, out: &mut [u8]) {
                    let buf = match endian {
                        Endian::Little => self.to_le_bytes(),
                        Endian::Big => self.to_be_bytes(),
                    };
                    out.copy_from_slice(&buf);
                }
            }
        )*
    };
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);
