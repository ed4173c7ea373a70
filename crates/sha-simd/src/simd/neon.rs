//! NEON lane vectors: 4 x 32-bit and 2 x 64-bit.
//!
//! NEON is mandatory on aarch64, but the intrinsics are still
//! `#[target_feature]` functions, so every call sits in an `unsafe` block.
//! Right shifts are left shifts by a negative count.

use std::arch::aarch64::*;

use crate::word::{LaneKernel, LaneWord};

/// Four 32-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U32x4(uint32x4_t);

/// Two 64-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U64x2(uint64x2_t);

// SAFETY (every block below): NEON is part of the aarch64 baseline. Loads and
// stores are preceded by a length check on the slice.
impl LaneWord for U32x4 {
    type Scalar = u32;
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self(unsafe { vdupq_n_u32(value) })
    }

    #[inline(always)]
    fn gather(values: &[u32]) -> Self {
        assert!(values.len() >= Self::LANES);
        Self(unsafe { vld1q_u32(values.as_ptr()) })
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u32]) {
        assert!(out.len() >= Self::LANES);
        unsafe { vst1q_u32(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { veorq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self(unsafe { vandq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self(unsafe { vorrq_u32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        // vbic computes `a & !b`.
        Self(unsafe { vbicq_u32(rhs.0, self.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { vshlq_u32(self.0, vdupq_n_s32(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { vshlq_u32(self.0, vdupq_n_s32(-(bits as i32))) })
    }

    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        Self(unsafe { vbslq_u32(mask.0, a.0, b.0) })
    }
}

impl LaneWord for U64x2 {
    type Scalar = u64;
    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: u64) -> Self {
        Self(unsafe { vdupq_n_u64(value) })
    }

    #[inline(always)]
    fn gather(values: &[u64]) -> Self {
        assert!(values.len() >= Self::LANES);
        Self(unsafe { vld1q_u64(values.as_ptr()) })
    }

    #[inline(always)]
    fn scatter(self, out: &mut [u64]) {
        assert!(out.len() >= Self::LANES);
        unsafe { vst1q_u64(out.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { vaddq_u64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { veorq_u64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Self(unsafe { vandq_u64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Self(unsafe { vorrq_u64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        Self(unsafe { vbicq_u64(rhs.0, self.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { vshlq_u64(self.0, vdupq_n_s64(i64::from(bits))) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { vshlq_u64(self.0, vdupq_n_s64(-i64::from(bits))) })
    }

    #[inline(always)]
    fn select(mask: Self, a: Self, b: Self) -> Self {
        Self(unsafe { vbslq_u64(mask.0, a.0, b.0) })
    }
}

/// Runs `kernel` over 4 x 32-bit lanes.
///
/// # Safety
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub unsafe fn run_u32<K: LaneKernel<u32>>(kernel: K) -> K::Output {
    kernel.run::<U32x4>()
}

/// Runs `kernel` over 2 x 64-bit lanes.
///
/// # Safety
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub unsafe fn run_u64<K: LaneKernel<u64>>(kernel: K) -> K::Output {
    kernel.run::<U64x2>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::lane_checks;

    #[test]
    fn neon_lanes_match_scalar() {
        lane_checks::check::<U32x4>();
        lane_checks::check::<U64x2>();
    }
}
