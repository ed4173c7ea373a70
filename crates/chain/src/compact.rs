//! Compact ("nBits") encoding of 256-bit targets.
//!
//! A compact number is a signed, zero-floored scientific notation in 32 bits:
//! the high byte is a base-256 exponent and the low 23 bits are the mantissa.
//! Bit 23 is a sign bit. Negative values and values that do not fit in 256
//! bits are rejected by consensus, so they decode to zero and are flagged as
//! overflowed.

use crate::uint256::Uint256;

const MANTISSA: u32 = 0x007f_ffff;
const SIGN: u32 = 0x0080_0000;

/// Reasons a compact number cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CompactError {
    /// The sign bit is set on a nonzero mantissa.
    #[error("compact value {bits:#010x} is negative")]
    Negative {
        /// Encoded value.
        bits: u32,
    },

    /// The value does not fit in 256 bits.
    #[error("compact value {bits:#010x} overflows 256 bits")]
    Overflow {
        /// Encoded value.
        bits: u32,
    },
}

/// Decodes a 32-bit compact number into the 256-bit value it represents.
pub fn decode(bits: u32) -> Result<Uint256, CompactError> {
    let size = bits >> 24;
    let mut word = bits & MANTISSA;
    let big = if size <= 3 {
        word >>= 8 * (3 - size);
        Uint256::from(word)
    } else {
        Uint256::from(word) << (8 * (size - 3))
    };

    if word != 0 && bits & SIGN != 0 {
        return Err(CompactError::Negative { bits });
    }
    let overflow =
        word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    if overflow {
        return Err(CompactError::Overflow { bits });
    }
    Ok(big)
}

/// Encodes a 256-bit value in normal compact form.
///
/// The encoding keeps the three most significant bytes, so it is lossy for
/// values wider than 24 bits.
pub fn encode(big: Uint256) -> u32 {
    let mut size = big.bits().div_ceil(8);
    let mut compact = if size <= 3 {
        (big.low_u64() << (8 * (3 - size))) as u32
    } else {
        (big >> (8 * (size - 3))).low_u32()
    };

    // Keep the sign bit clear by moving the mantissa down one byte.
    if compact & SIGN != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}

/// A compact number together with its decoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Compact {
    big: Uint256,
    normal: u32,
    overflowed: bool,
}

impl Compact {
    /// Decodes a 32-bit compact number.
    ///
    /// Negative and overflowing encodings yield a zero value with
    /// [`is_overflowed`](Self::is_overflowed) set.
    pub fn from_bits(bits: u32) -> Self {
        match decode(bits) {
            Ok(big) => Self::from_big(big),
            Err(_) => Self {
                big: Uint256::ZERO,
                normal: encode(Uint256::ZERO),
                overflowed: true,
            },
        }
    }

    /// Encodes a 256-bit number.
    pub fn from_big(big: Uint256) -> Self {
        Self {
            big,
            normal: encode(big),
            overflowed: false,
        }
    }

    /// True if the source encoding was negative or overflowed.
    pub const fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Consensus-normalized compact encoding of the value.
    pub const fn normal(&self) -> u32 {
        self.normal
    }

    /// The represented 256-bit value.
    pub const fn to_big(&self) -> Uint256 {
        self.big
    }
}

impl From<Uint256> for Compact {
    fn from(big: Uint256) -> Self {
        Self::from_big(big)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn genesis_target() {
        let compact = Compact::from_bits(0x1d00_ffff);
        assert!(!compact.is_overflowed());
        assert_eq!(compact.to_big(), Uint256::from(0xffffu32) << 208);
        assert_eq!(compact.normal(), 0x1d00_ffff);
    }

    #[test]
    fn small_exponents_shift_right() {
        assert_eq!(decode(0x0100_3456), Ok(Uint256::ZERO));
        assert_eq!(Compact::from_bits(0x0100_3456).normal(), 0);

        let compact = Compact::from_bits(0x0112_3456);
        assert_eq!(compact.to_big(), Uint256::from(0x12u32));
        assert_eq!(compact.normal(), 0x0112_0000);

        assert_eq!(decode(0x0200_8000), Ok(Uint256::from(0x80u32)));
        assert_eq!(Compact::from_bits(0x0200_8000).normal(), 0x0200_8000);
    }

    #[test]
    fn non_normal_encodings_normalize() {
        let compact = Compact::from_bits(0x0500_9234);
        assert_eq!(compact.to_big(), Uint256::from(0x9234_0000u32));
        assert_eq!(compact.normal(), 0x0500_9234);

        // Leading zero byte in the mantissa.
        assert_eq!(Compact::from_bits(0x0400_0080).normal(), 0x0300_8000);
    }

    #[test]
    fn negative_values_are_overflowed() {
        assert_eq!(
            decode(0x0492_3456),
            Err(CompactError::Negative { bits: 0x0492_3456 })
        );
        let compact = Compact::from_bits(0x0492_3456);
        assert!(compact.is_overflowed());
        assert_eq!(compact.to_big(), Uint256::ZERO);
        assert_eq!(compact.normal(), 0);

        // A sign bit over a zero mantissa is just zero.
        assert_eq!(decode(0x0180_0000), Ok(Uint256::ZERO));
    }

    #[test]
    fn oversized_values_are_overflowed() {
        assert_eq!(
            decode(0xff12_3456),
            Err(CompactError::Overflow { bits: 0xff12_3456 })
        );
        assert!(Compact::from_bits(0x2301_0000).is_overflowed());
        assert!(Compact::from_bits(0x2200_0100).is_overflowed());
        assert!(!Compact::from_bits(0x2200_0001).is_overflowed());
        assert!(!Compact::from_bits(0x2200_00ff).is_overflowed());
    }

    #[test]
    fn from_big_moves_sign_bit() {
        let compact = Compact::from_big(Uint256::from(0x80u32));
        assert_eq!(compact.normal(), 0x0200_8000);
        assert!(!compact.is_overflowed());
    }

    proptest! {
        #[test]
        fn normal_form_is_a_fixed_point(bits in any::<u32>()) {
            let compact = Compact::from_bits(bits);
            let again = Compact::from_bits(compact.normal());
            prop_assert!(!again.is_overflowed());
            prop_assert_eq!(again.to_big(), compact.to_big());
            prop_assert_eq!(again.normal(), compact.normal());
        }
    }
}
