//! Byte and bit readers.
//!
//! Bits are consumed most significant first within each byte. Byte reads on
//! a [`BitCursor`] do not need to be aligned.

/// Error raised when a read runs past the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// Fewer bits remain than were requested.
    #[error("requested {requested} bits but only {remaining} remain")]
    Exhausted {
        /// Bits requested.
        requested: usize,
        /// Bits left in the input.
        remaining: usize,
    },

    /// More bits were requested than fit in the result.
    #[error("cannot read {bits} bits into a 64-bit integer")]
    TooWide {
        /// Bits requested.
        bits: u32,
    },
}

/// Reads whole bytes.
pub trait ByteReader {
    /// Reads one byte.
    fn read_byte(&mut self) -> Result<u8, ReadError>;

    /// Fills `out` with the next bytes.
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), ReadError> {
        for byte in out {
            *byte = self.read_byte()?;
        }
        Ok(())
    }

    /// Advances past `count` bytes.
    fn skip_bytes(&mut self, count: usize) -> Result<(), ReadError>;
}

/// Reads individual bits, high to low.
pub trait BitReader: ByteReader {
    /// Reads one bit.
    fn read_bit(&mut self) -> Result<bool, ReadError>;

    /// Reads `bits` bits (at most 64) into the low end of an integer.
    ///
    /// This default reads bit by bit and may stop partway; readers that know
    /// their length override it to fail before consuming anything.
    fn read_bits(&mut self, bits: u32) -> Result<u64, ReadError> {
        if bits > u64::BITS {
            return Err(ReadError::TooWide { bits });
        }
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Advances past `bits` bits.
    fn skip_bits(&mut self, bits: usize) -> Result<(), ReadError>;
}

/// Bit-granular cursor over a byte slice.
#[derive(Clone, Debug)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BitCursor<'a> {
    /// Starts reading at the first bit of `data`.
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bits consumed so far.
    pub const fn bit_position(&self) -> usize {
        self.offset
    }

    /// Bits left to read.
    pub const fn remaining_bits(&self) -> usize {
        self.data.len().saturating_mul(8) - self.offset
    }

    /// True once every bit has been consumed.
    pub const fn is_exhausted(&self) -> bool {
        self.remaining_bits() == 0
    }

    fn reserve(&self, requested: usize) -> Result<(), ReadError> {
        let remaining = self.remaining_bits();
        if requested > remaining {
            return Err(ReadError::Exhausted {
                requested,
                remaining,
            });
        }
        Ok(())
    }
}

impl ByteReader for BitCursor<'_> {
    fn read_byte(&mut self) -> Result<u8, ReadError> {
        self.reserve(8)?;
        let index = self.offset / 8;
        let shift = self.offset % 8;
        let byte = if shift == 0 {
            self.data[index]
        } else {
            (self.data[index] << shift) | (self.data[index + 1] >> (8 - shift))
        };
        self.offset += 8;
        Ok(byte)
    }

    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), ReadError> {
        self.reserve(out.len().saturating_mul(8))?;
        if self.offset % 8 == 0 {
            let start = self.offset / 8;
            out.copy_from_slice(&self.data[start..start + out.len()]);
            self.offset += out.len() * 8;
            return Ok(());
        }
        for byte in out {
            *byte = self.read_byte()?;
        }
        Ok(())
    }

    fn skip_bytes(&mut self, count: usize) -> Result<(), ReadError> {
        self.skip_bits(count.saturating_mul(8))
    }
}

impl BitReader for BitCursor<'_> {
    fn read_bit(&mut self) -> Result<bool, ReadError> {
        self.reserve(1)?;
        let byte = self.data[self.offset / 8];
        let bit = (byte >> (7 - self.offset % 8)) & 1 == 1;
        self.offset += 1;
        Ok(bit)
    }

    fn read_bits(&mut self, bits: u32) -> Result<u64, ReadError> {
        if bits > u64::BITS {
            return Err(ReadError::TooWide { bits });
        }
        self.reserve(bits as usize)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    fn skip_bits(&mut self, bits: usize) -> Result<(), ReadError> {
        self.reserve(bits)?;
        self.offset += bits;
        Ok(())
    }
}
