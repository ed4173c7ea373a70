//! AVX2 lane vectors: 8 x 32-bit and 4 x 64-bit.

use std::arch::x86_64::*;

use crate::word::{LaneKernel, LaneWord};

/// Eight 32-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U32x8(__m256i);

/// Four 64-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U64x4(__m256i);

// SAFETY (every block below): values of these types are only created inside
// `run_u32`/`run_u64`, which the dispatcher enters after detecting AVX2.
macro_rules! bitwise {
    () => {
        #[inline(always)]
        fn xor(self, rhs: Self) -> Self {
            Self(unsafe { _mm256_xor_si256(self.0, rhs.0) })
        }

        #[inline(always)]
        fn and(self, rhs: Self) -> Self {
            Self(unsafe { _mm256_and_si256(self.0, rhs.0) })
        }

        #[inline(always)]
        fn or(self, rhs: Self) -> Self {
            Self(unsafe { _mm256_or_si256(self.0, rhs.0) })
        }

        #[inline(always)]
        fn andnot(self, rhs: Self) -> Self {
            Self(unsafe { _mm256_andnot_si256(self.0, rhs.0) })
        }

        #[inline(always)]
        fn gather(values: &[Self::Scalar]) -> Self {
            assert!(values.len() >= Self::LANES);
            Self(unsafe { _mm256_loadu_si256(values.as_ptr().cast()) })
        }

        #[inline(always)]
        fn scatter(self, out: &mut [Self::Scalar]) {
            assert!(out.len() >= Self::LANES);
            unsafe { _mm256_storeu_si256(out.as_mut_ptr().cast(), self.0) }
        }
    };
}

impl LaneWord for U32x8 {
    type Scalar = u32;
    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self(unsafe { _mm256_set1_epi32(value as i32) })
    }

    bitwise!();

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_add_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { _mm256_sll_epi32(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { _mm256_srl_epi32(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }
}

impl LaneWord for U64x4 {
    type Scalar = u64;
    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: u64) -> Self {
        Self(unsafe { _mm256_set1_epi64x(value as i64) })
    }

    bitwise!();

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_add_epi64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { _mm256_sll_epi64(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { _mm256_srl_epi64(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }
}

/// Runs `kernel` over 8 x 32-bit lanes.
///
/// # Safety
/// Caller must ensure AVX2 is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "avx2")]
pub unsafe fn run_u32<K: LaneKernel<u32>>(kernel: K) -> K::Output {
    kernel.run::<U32x8>()
}

/// Runs `kernel` over 4 x 64-bit lanes.
///
/// # Safety
/// Caller must ensure AVX2 is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "avx2")]
pub unsafe fn run_u64<K: LaneKernel<u64>>(kernel: K) -> K::Output {
    kernel.run::<U64x4>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::lane_checks;

    #[test]
    fn avx2_lanes_match_scalar() {
        if !is_x86_feature_detected!("avx2") {
            eprintln!("AVX2 not available, skipping test");
            return;
        }
        lane_checks::check::<U32x8>();
        lane_checks::check::<U64x4>();
    }
}
