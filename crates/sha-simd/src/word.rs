//! Native words and lane vectors.
//!
//! Every compression routine in the crate is written once against
//! [`LaneWord`]. A plain `u32`/`u64` is a lane word with a single lane, so the
//! scalar path and every SIMD path share the same round code.

use std::fmt;

use crate::bits::Bits;
use crate::dispatcher::Backend;

/// A vector of independent words, one per lane.
///
/// All arithmetic is lane-wise and wraps at the scalar word width.
pub trait LaneWord: Copy + Send + Sync + 'static {
    /// Scalar word held in each lane.
    type Scalar: Word;

    /// Number of lanes.
    const LANES: usize;

    /// Broadcasts `value` to every lane.
    fn splat(value: Self::Scalar) -> Self;

    /// Builds a vector from the first [`Self::LANES`] scalars of `values`.
    fn gather(values: &[Self::Scalar]) -> Self;

    /// Writes the lanes into the first [`Self::LANES`] slots of `out`.
    fn scatter(self, out: &mut [Self::Scalar]);

    fn add(self, rhs: Self) -> Self;
    fn xor(self, rhs: Self) -> Self;
    fn and(self, rhs: Self) -> Self;
    fn or(self, rhs: Self) -> Self;

    /// `!self & rhs`.
    fn andnot(self, rhs: Self) -> Self;

    /// Logical shift left; `bits` is below the word width.
    fn shl(self, bits: u32) -> Self;

    /// Logical shift right; `bits` is below the word width.
    fn shr(self, bits: u32) -> Self;

    /// Rotate right; `bits` is in `1..width`.
    #[inline(always)]
    fn rotr(self, bits: u32) -> Self {
        self.shr(bits).or(self.shl(<Self::Scalar as Bits>::WIDTH - bits))
    }

    /// Rotate left; `bits` is in `1..width`.
    #[inline(always)]
    fn rotl(self, bits: u32) -> Self {
        self.shl(bits).or(self.shr(<Self::Scalar as Bits>::WIDTH - bits))
    }

    /// Per lane, picks `a` where `mask` is all ones and `b` where it is zero.
    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        mask.and(a).or(mask.andnot(b))
    }
}

/// Work that can run over any lane vector of word `W`.
///
/// Backends hand the kernel the widest vector type they support; the kernel
/// stays generic and never names an instruction set.
///
/// `run` and everything it reaches must be `#[inline(always)]`. The body is
/// then compiled inside the backend's `#[target_feature]` trampoline, and the
/// lane operations become single instructions instead of calls.
pub trait LaneKernel<W: Word> {
    type Output;

    fn run<V: LaneWord<Scalar = W>>(self) -> Self::Output;
}

/// Native algorithm word (`u32` or `u64`).
pub trait Word: LaneWord<Scalar = Self> + Bits + Eq + Default + fmt::Debug + fmt::LowerHex {
    /// Size in bytes.
    const BYTES: usize;

    /// Reads a big-endian word from the first [`Self::BYTES`] bytes.
    fn load_be(bytes: &[u8]) -> Self;

    /// Writes the word big-endian into the first [`Self::BYTES`] bytes.
    fn store_be(self, out: &mut [u8]);

    /// Splits a message bit count into the `(high, low)` words of the
    /// two-word length field, saturating when it does not fit.
    fn length_words(bits: u128) -> (Self, Self);

    /// Runs `kernel` with the lane vector `backend` provides for this word.
    fn dispatch<K: LaneKernel<Self>>(backend: Backend, kernel: K) -> K::Output;
}

macro_rules! impl_scalar_lane {
    ($ty:ty) => {
        impl LaneWord for $ty {
            type Scalar = $ty;
            const LANES: usize = 1;

            #[inline(always)]
            fn splat(value: Self) -> Self {
                value
            }

            #[inline(always)]
            fn gather(values: &[Self]) -> Self {
                values[0]
            }

            #[inline(always)]
            fn scatter(self, out: &mut [Self]) {
                out[0] = self;
            }

            #[inline(always)]
            fn add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline(always)]
            fn xor(self, rhs: Self) -> Self {
                self ^ rhs
            }

            #[inline(always)]
            fn and(self, rhs: Self) -> Self {
                self & rhs
            }

            #[inline(always)]
            fn or(self, rhs: Self) -> Self {
                self | rhs
            }

            #[inline(always)]
            fn andnot(self, rhs: Self) -> Self {
                !self & rhs
            }

            #[inline(always)]
            fn shl(self, bits: u32) -> Self {
                self << bits
            }

            #[inline(always)]
            fn shr(self, bits: u32) -> Self {
                self >> bits
            }

            #[inline(always)]
            fn rotr(self, bits: u32) -> Self {
                self.rotate_right(bits)
            }

            #[inline(always)]
            fn rotl(self, bits: u32) -> Self {
                self.rotate_left(bits)
            }

            #[inline(always)]
            fn select(mask: Self, a: Self, b: Self) -> Self {
                (mask & a) | (!mask & b)
            }
        }
    };
}

impl_scalar_lane!(u32);
impl_scalar_lane!(u64);

impl Word for u32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn load_be(bytes: &[u8]) -> Self {
        Self::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline(always)]
    fn store_be(self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.to_be_bytes());
    }

    fn length_words(bits: u128) -> (Self, Self) {
        let field = u64::try_from(bits).unwrap_or(u64::MAX);
        ((field >> 32) as u32, field as u32)
    }

    #[inline]
    fn dispatch<K: LaneKernel<Self>>(backend: Backend, kernel: K) -> K::Output {
        crate::simd::dispatch_u32(backend, kernel)
    }
}

impl Word for u64 {
    const BYTES: usize = 8;

    #[inline(always)]
    fn load_be(bytes: &[u8]) -> Self {
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[..8]);
        Self::from_be_bytes(word)
    }

    #[inline(always)]
    fn store_be(self, out: &mut [u8]) {
        out[..8].copy_from_slice(&self.to_be_bytes());
    }

    fn length_words(bits: u128) -> (Self, Self) {
        ((bits >> 64) as u64, bits as u64)
    }

    #[inline]
    fn dispatch<K: LaneKernel<Self>>(backend: Backend, kernel: K) -> K::Output {
        crate::simd::dispatch_u64(backend, kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_lanes_behave_like_native_arithmetic() {
        let a = 0xdead_beefu32;
        let b = 0x0123_4567u32;
        assert_eq!(LaneWord::add(a, b), a.wrapping_add(b));
        assert_eq!(a.andnot(b), !a & b);
        assert_eq!(LaneWord::rotr(a, 7), a.rotate_right(7));
        assert_eq!(<u32 as LaneWord>::select(u32::MAX, a, b), a);
        assert_eq!(<u32 as LaneWord>::select(0, a, b), b);
    }

    #[test]
    fn default_rotation_matches_native_rotation() {
        #[derive(Clone, Copy)]
        struct Wrapped(u64);

        // Exercise the provided rotr/rotl through a shim that only supplies shifts.
        impl LaneWord for Wrapped {
            type Scalar = u64;
            const LANES: usize = 1;
            fn splat(value: u64) -> Self {
                Self(value)
            }
            fn gather(values: &[u64]) -> Self {
                Self(values[0])
            }
            fn scatter(self, out: &mut [u64]) {
                out[0] = self.0;
            }
            fn add(self, rhs: Self) -> Self {
                Self(self.0.wrapping_add(rhs.0))
            }
            fn xor(self, rhs: Self) -> Self {
                Self(self.0 ^ rhs.0)
            }
            fn and(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
            fn or(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
            fn andnot(self, rhs: Self) -> Self {
                Self(!self.0 & rhs.0)
            }
            fn shl(self, bits: u32) -> Self {
                Self(self.0 << bits)
            }
            fn shr(self, bits: u32) -> Self {
                Self(self.0 >> bits)
            }
        }

        let value = 0x0123_4567_89ab_cdefu64;
        for bits in 1..64 {
            assert_eq!(Wrapped(value).rotr(bits).0, value.rotate_right(bits));
            assert_eq!(Wrapped(value).rotl(bits).0, value.rotate_left(bits));
        }
        let picked = Wrapped::select(Wrapped(u64::MAX), Wrapped(1), Wrapped(2));
        assert_eq!(picked.0, 1);
    }

    #[test]
    fn big_endian_round_trip() {
        let mut out = [0u8; 8];
        0x0102_0304u32.store_be(&mut out);
        assert_eq!(&out[..4], &[1, 2, 3, 4]);
        assert_eq!(u32::load_be(&out), 0x0102_0304);

        0x0102_0304_0506_0708u64.store_be(&mut out);
        assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(u64::load_be(&out), 0x0102_0304_0506_0708);
    }

    #[test]
    fn length_field_saturates_for_narrow_words() {
        assert_eq!(u32::length_words(512), (0, 512));
        assert_eq!(u32::length_words(1 << 40), (1 << 8, 0));
        assert_eq!(u32::length_words(u128::MAX), (u32::MAX, u32::MAX));
        assert_eq!(u64::length_words(1 << 70), (1 << 6, 0));
        assert_eq!(u64::length_words(u128::MAX), (u64::MAX, u64::MAX));
    }
}
