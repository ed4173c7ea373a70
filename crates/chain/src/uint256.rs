//! Minimal 256-bit unsigned integer for proof-of-work targets.

use std::fmt;
use std::ops::{Shl, Shr};

/// 256-bit unsigned integer stored as two 128-bit halves.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint256 {
    hi: u128,
    lo: u128,
}

impl Uint256 {
    /// Zero.
    pub const ZERO: Self = Self { hi: 0, lo: 0 };
    /// One.
    pub const ONE: Self = Self { hi: 0, lo: 1 };
    /// Largest representable value.
    pub const MAX: Self = Self {
        hi: u128::MAX,
        lo: u128::MAX,
    };

    /// Builds a value from its high and low halves.
    pub const fn from_halves(hi: u128, lo: u128) -> Self {
        Self { hi, lo }
    }

    /// Interprets 32 bytes as a big-endian number.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut hi = [0u8; 16];
        let mut lo = [0u8; 16];
        hi.copy_from_slice(&bytes[..16]);
        lo.copy_from_slice(&bytes[16..]);
        Self {
            hi: u128::from_be_bytes(hi),
            lo: u128::from_be_bytes(lo),
        }
    }

    /// Interprets 32 bytes as a little-endian number.
    ///
    /// Hash digests compare as numbers in this byte order.
    pub fn from_le_bytes(mut bytes: [u8; 32]) -> Self {
        bytes.reverse();
        Self::from_be_bytes(bytes)
    }

    /// Big-endian byte representation.
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[..16].copy_from_slice(&self.hi.to_be_bytes());
        out[16..].copy_from_slice(&self.lo.to_be_bytes());
        out
    }

    /// Little-endian byte representation.
    pub fn to_le_bytes(self) -> [u8; 32] {
        let mut out = self.to_be_bytes();
        out.reverse();
        out
    }

    /// Number of significant bits; zero for zero.
    pub const fn bits(self) -> u32 {
        if self.hi != 0 {
            256 - self.hi.leading_zeros()
        } else {
            128 - self.lo.leading_zeros()
        }
    }

    /// True for zero.
    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Low 32 bits.
    pub const fn low_u32(self) -> u32 {
        self.lo as u32
    }

    /// Low 64 bits.
    pub const fn low_u64(self) -> u64 {
        self.lo as u64
    }
}

impl From<u32> for Uint256 {
    fn from(value: u32) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<u64> for Uint256 {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl From<u128> for Uint256 {
    fn from(value: u128) -> Self {
        Self { hi: 0, lo: value }
    }
}

impl Shl<u32> for Uint256 {
    type Output = Self;

    fn shl(self, shift: u32) -> Self {
        match shift {
            0 => self,
            1..128 => Self {
                hi: (self.hi << shift) | (self.lo >> (128 - shift)),
                lo: self.lo << shift,
            },
            128..256 => Self {
                hi: self.lo << (shift - 128),
                lo: 0,
            },
            _ => Self::ZERO,
        }
    }
}

impl Shr<u32> for Uint256 {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        match shift {
            0 => self,
            1..128 => Self {
                hi: self.hi >> shift,
                lo: (self.lo >> shift) | (self.hi << (128 - shift)),
            },
            128..256 => Self {
                hi: 0,
                lo: self.hi >> (shift - 128),
            },
            _ => Self::ZERO,
        }
    }
}

impl fmt::LowerHex for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}{:032x}", self.hi, self.lo)
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{self:x}")
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}
