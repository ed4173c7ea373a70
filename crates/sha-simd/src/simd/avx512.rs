//! AVX-512F lane vectors: 16 x 32-bit and 8 x 64-bit.
//!
//! AVX-512F has variable rotates, so `rotr`/`rotl` are one instruction here
//! instead of the shift-or pair the other backends use.

use std::arch::x86_64::*;

use crate::word::{LaneKernel, LaneWord};

/// Sixteen 32-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U32x16(__m512i);

/// Eight 64-bit lanes.
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct U64x8(__m512i);

// SAFETY (every block below): values of these types are only created inside
// `run_u32`/`run_u64`, which the dispatcher enters after detecting AVX-512F.
macro_rules! bitwise {
    () => {
        #[inline(always)]
        fn xor(self, rhs: Self) -> Self {
            Self(unsafe { _mm512_xor_si512(self.0, rhs.0) })
        }

        #[inline(always)]
        fn and(self, rhs: Self) -> Self {
            Self(unsafe { _mm512_and_si512(self.0, rhs.0) })
        }

        #[inline(always)]
        fn or(self, rhs: Self) -> Self {
            Self(unsafe { _mm512_or_si512(self.0, rhs.0) })
        }

        #[inline(always)]
        fn andnot(self, rhs: Self) -> Self {
            Self(unsafe { _mm512_andnot_si512(self.0, rhs.0) })
        }

        #[inline(always)]
        fn gather(values: &[Self::Scalar]) -> Self {
            assert!(values.len() >= Self::LANES);
            Self(unsafe { _mm512_loadu_si512(values.as_ptr().cast()) })
        }

        #[inline(always)]
        fn scatter(self, out: &mut [Self::Scalar]) {
            assert!(out.len() >= Self::LANES);
            unsafe { _mm512_storeu_si512(out.as_mut_ptr().cast(), self.0) }
        }
    };
}

impl LaneWord for U32x16 {
    type Scalar = u32;
    const LANES: usize = 16;

    #[inline(always)]
    fn splat(value: u32) -> Self {
        Self(unsafe { _mm512_set1_epi32(value as i32) })
    }

    bitwise!();

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm512_add_epi32(self.0, rhs.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { _mm512_sll_epi32(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { _mm512_srl_epi32(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn rotr(self, bits: u32) -> Self {
        Self(unsafe { _mm512_rorv_epi32(self.0, _mm512_set1_epi32(bits as i32)) })
    }

    #[inline(always)]
    fn rotl(self, bits: u32) -> Self {
        Self(unsafe { _mm512_rolv_epi32(self.0, _mm512_set1_epi32(bits as i32)) })
    }
}

impl LaneWord for U64x8 {
    type Scalar = u64;
    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: u64) -> Self {
        Self(unsafe { _mm512_set1_epi64(value as i64) })
    }

    bitwise!();

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self(unsafe { _mm512_add_epi64(self.0, rhs.0) })
    }

    #[inline(always)]
    fn shl(self, bits: u32) -> Self {
        Self(unsafe { _mm512_sll_epi64(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn shr(self, bits: u32) -> Self {
        Self(unsafe { _mm512_srl_epi64(self.0, _mm_cvtsi32_si128(bits as i32)) })
    }

    #[inline(always)]
    fn rotr(self, bits: u32) -> Self {
        Self(unsafe { _mm512_rorv_epi64(self.0, _mm512_set1_epi64(i64::from(bits))) })
    }

    #[inline(always)]
    fn rotl(self, bits: u32) -> Self {
        Self(unsafe { _mm512_rolv_epi64(self.0, _mm512_set1_epi64(i64::from(bits))) })
    }
}

/// Runs `kernel` over 16 x 32-bit lanes.
///
/// # Safety
/// Caller must ensure AVX-512F is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "avx512f")]
pub unsafe fn run_u32<K: LaneKernel<u32>>(kernel: K) -> K::Output {
    kernel.run::<U32x16>()
}

/// Runs `kernel` over 8 x 64-bit lanes.
///
/// # Safety
/// Caller must ensure AVX-512F is available (use `is_x86_feature_detected!`).
#[target_feature(enable = "avx512f")]
pub unsafe fn run_u64<K: LaneKernel<u64>>(kernel: K) -> K::Output {
    kernel.run::<U64x8>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::lane_checks;

    #[test]
    fn avx512_lanes_match_scalar() {
        if !is_x86_feature_detected!("avx512f") {
            eprintln!("AVX-512F not available, skipping test");
            return;
        }
        lane_checks::check::<U32x16>();
        lane_checks::check::<U64x8>();
    }
}
