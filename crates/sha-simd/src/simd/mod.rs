//! SIMD lane vectors.
//!
//! Each backend contributes one [`LaneWord`](crate::word::LaneWord) type per
//! word width and a `#[target_feature]` trampoline that runs a
//! [`LaneKernel`] with it. Compression code never names an instruction set;
//! it is monomorphized once per lane type behind the trampolines, and inlined
//! into them so it is compiled with the backend's instruction set enabled.
//!
//! # Available Backends
//!
//! ## x86_64 Implementations
//!
//! - **SSE2**: 4 x 32-bit or 2 x 64-bit lanes, baseline for x86_64
//! - **AVX2**: 8 x 32-bit or 4 x 64-bit lanes
//! - **AVX-512F**: 16 x 32-bit or 8 x 64-bit lanes, with native rotates
//!
//! ## ARM Implementations
//!
//! - **NEON**: 4 x 32-bit or 2 x 64-bit lanes, mandatory on aarch64
//!
//! # Safety
//!
//! The trampolines are `unsafe` because they enable instruction sets the
//! build target may lack. [`dispatch_u32`] and [`dispatch_u64`] check
//! [`Backend::is_supported`] before entering one, and fall back to the
//! scalar path otherwise.

use crate::dispatcher::Backend;
use crate::word::LaneKernel;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod avx2;

#[cfg(target_arch = "x86_64")]
pub mod avx512;

#[cfg(target_arch = "aarch64")]
pub mod neon;

/// Runs `kernel` with the 32-bit lane vector of `backend`.
pub(crate) fn dispatch_u32<K: LaneKernel<u32>>(backend: Backend, kernel: K) -> K::Output {
    if !backend.is_supported() {
        return kernel.run::<u32>();
    }
    match backend {
        // SAFETY: support was checked above for every arm below.
        #[cfg(target_arch = "x86_64")]
        Backend::Avx512 => unsafe { avx512::run_u32(kernel) },
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 => unsafe { avx2::run_u32(kernel) },
        #[cfg(target_arch = "x86_64")]
        Backend::Sse2 => unsafe { sse2::run_u32(kernel) },
        #[cfg(target_arch = "aarch64")]
        Backend::Neon => unsafe { neon::run_u32(kernel) },
        _ => kernel.run::<u32>(),
    }
}

/// Runs `kernel` with the 64-bit lane vector of `backend`.
pub(crate) fn dispatch_u64<K: LaneKernel<u64>>(backend: Backend, kernel: K) -> K::Output {
    if !backend.is_supported() {
        return kernel.run::<u64>();
    }
    match backend {
        // SAFETY: support was checked above for every arm below.
        #[cfg(target_arch = "x86_64")]
        Backend::Avx512 => unsafe { avx512::run_u64(kernel) },
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 => unsafe { avx2::run_u64(kernel) },
        #[cfg(target_arch = "x86_64")]
        Backend::Sse2 => unsafe { sse2::run_u64(kernel) },
        #[cfg(target_arch = "aarch64")]
        Backend::Neon => unsafe { neon::run_u64(kernel) },
        _ => kernel.run::<u64>(),
    }
}

/// Lane-by-lane comparison of a vector type against the scalar word.
#[cfg(test)]
pub(crate) mod lane_checks {
    use crate::bits::Bits;
    use crate::word::{LaneWord, Word};

    fn samples<W: Word>(lanes: usize, seed: u8) -> Vec<W> {
        (0..lanes)
            .map(|lane| {
                let bytes: Vec<u8> = (0..8u8)
                    .map(|i| seed.wrapping_mul(31).wrapping_add(((lane as u8) << 4) | i).rotate_left(3))
                    .collect();
                W::load_be(&bytes)
            })
            .collect()
    }

    fn lanes_of<V: LaneWord>(v: V) -> Vec<V::Scalar> {
        let mut out = vec![<V::Scalar as Default>::default(); V::LANES];
        v.scatter(&mut out);
        out
    }

    fn binary<V: LaneWord>(
        a: &[V::Scalar],
        b: &[V::Scalar],
        vector: impl Fn(V, V) -> V,
        scalar: impl Fn(V::Scalar, V::Scalar) -> V::Scalar,
        op: &str,
    ) {
        let got = lanes_of(vector(V::gather(a), V::gather(b)));
        for lane in 0..V::LANES {
            assert_eq!(got[lane], scalar(a[lane], b[lane]), "{op}: mismatch at lane {lane}");
        }
    }

    /// Checks every lane operation of `V` against scalar arithmetic.
    pub(crate) fn check<V: LaneWord>() {
        let a = samples::<V::Scalar>(V::LANES, 1);
        let b = samples::<V::Scalar>(V::LANES, 2);
        let width = <V::Scalar as Bits>::WIDTH;

        assert_eq!(lanes_of(V::gather(&a)), a, "gather/scatter");
        assert!(lanes_of(V::splat(a[0])).iter().all(|&w| w == a[0]), "splat");

        binary::<V>(&a, &b, V::add, <V::Scalar as LaneWord>::add, "add");
        binary::<V>(&a, &b, V::xor, <V::Scalar as LaneWord>::xor, "xor");
        binary::<V>(&a, &b, V::and, <V::Scalar as LaneWord>::and, "and");
        binary::<V>(&a, &b, V::or, <V::Scalar as LaneWord>::or, "or");
        binary::<V>(&a, &b, V::andnot, <V::Scalar as LaneWord>::andnot, "andnot");

        for bits in [1, 3, 7, width / 2, width - 1] {
            let v = V::gather(&a);
            let shl = lanes_of(v.shl(bits));
            let shr = lanes_of(v.shr(bits));
            let rotr = lanes_of(v.rotr(bits));
            let rotl = lanes_of(v.rotl(bits));
            for lane in 0..V::LANES {
                assert_eq!(shl[lane], LaneWord::shl(a[lane], bits), "shl {bits} at lane {lane}");
                assert_eq!(shr[lane], LaneWord::shr(a[lane], bits), "shr {bits} at lane {lane}");
                assert_eq!(rotr[lane], LaneWord::rotr(a[lane], bits), "rotr {bits} at lane {lane}");
                assert_eq!(rotl[lane], LaneWord::rotl(a[lane], bits), "rotl {bits} at lane {lane}");
            }
        }

        let mask: Vec<V::Scalar> = (0..V::LANES)
            .map(|lane| if lane % 2 == 0 { <V::Scalar as Bits>::BIT_ALL } else { <V::Scalar as Bits>::BIT_NONE })
            .collect();
        let picked = lanes_of(V::select(V::gather(&mask), V::gather(&a), V::gather(&b)));
        for lane in 0..V::LANES {
            let expected = if lane % 2 == 0 { a[lane] } else { b[lane] };
            assert_eq!(picked[lane], expected, "select: mismatch at lane {lane}");
        }
    }
}
