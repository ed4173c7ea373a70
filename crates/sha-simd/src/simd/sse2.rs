//! SSE2 lane vectors: 4 x 32-bit and 2 x 64-bit.
//!
//! SSE2 is part of the x86_64 baseline, but the intrinsics are still
//! `#[target_feature]` functions, so every call sits in an `unsafe` block.

use std::arch::x86_64::*;

use crate::word::{LaneKernel, LaneWord};

/// Four 32-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U32x4(__m128i);

/// Two 64-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U64x2(__m128i);

// SAFETY (every block below): SSE2 is present on every x86_64 CPU, and the
// dispatcher only enters `run_u32`/`run_u64` after checking it.
macro_rules! bitwise {
    () => {
        #[inline(always)]
        fn xor(self, rhs: Self) -> Self {
            Self(unsafe { _mm_xor_si128(self.0, rhs.0) })
        }

        #[inline(always)]
        fn and(self, rhs: Self) -> Self {
            Self(unsafe { _mm_and_si128(self.0, rhs.0) })
        }

        #[inline(always)]
        fn or(self, rhs: Self) -> Self {
            Self(unsafe { _mm_or_si128(self.0, rhs.0) })
        }

        #[inline(always)]
        fn andnot(self, rhs: Self) -> Self {
            Self(unsafe { _mm_andnot_si128(self.0, rhs.0) })
        }

        #[inline(always)]
        fn gather(values: &[Self::Scalar]) -> Self {
            assert!(values.len() >= Self::LANES);
            Self(unsafe { _mm_loadu_si128(values.as_ptr().cast()) })
        }

        #[inline(always)]
        fn scatter(self, out: &mut [Self::Scalar]) {
            assert!(out.len() >= Self::LANES);
            unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), self.0) }
        }
    };
}

impl LaneWord for U32x4 {
    type Scalar = u32;
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self(unsafe { _mm_set1_epi32(value as i32) })
    }

    bitwise!();

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { _mm_sll_epi32(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { _mm_srl_epi32(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }
}

impl LaneWord for U64x2 {
    type Scalar = u64;
    const LANES: usize = 2;

    #[inline(always)]
    fn splat(value: u64) -> Self {
        Self(unsafe { _mm_set1_epi64x(value as i64) })
    }

    bitwise!();

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm_add_epi64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { _mm_sll_epi64(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { _mm_srl_epi64(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }
}

/// Runs `kernel` over 4 x 32-bit lanes.
///
/// # Safety
/// Caller must ensure SSE2 is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "sse2")]
pub unsafe fn run_u32<K: LaneKernel<u32>>(kernel: K) -> K::Output {
    kernel.run::<U32x4>()
}

/// Runs `kernel` over 2 x 64-bit lanes.
///
/// # Safety
/// Caller must ensure SSE2 is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "sse2")]
pub unsafe fn run_u64<K: LaneKernel<u64>>(kernel: K) -> K::Output {
    kernel.run::<U64x2>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::lane_checks;

    #[test]
    fn sse2_lanes_match_scalar() {
        if !is_x86_feature_detected!("sse2") {
            eprintln!("SSE2 not available, skipping test");
            return;
        }
        lane_checks::check::<U32x4>();
        lane_checks::check::<U64x2>();
    }
}
