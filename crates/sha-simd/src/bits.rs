//! Portable bit primitives.
//!
//! Offsets are counted either from the low-order end (`*_right`) or from the
//! high-order end (`*_left`). Offsets at or beyond the integer width select no
//! bit at all, so every operation is total.

/// Bit manipulation helpers implemented for every unsigned integer width.
pub trait Bits: Copy + Eq + Sized {
    /// Number of bits in the type.
    const WIDTH: u32;
    /// Only the low-order bit set (`0x...1`).
    const BIT_LO: Self;
    /// Only the high-order bit set (`0x8...`).
    const BIT_HI: Self;
    /// Every bit set.
    const BIT_ALL: Self;
    /// No bit set.
    const BIT_NONE: Self;

    /// Single-bit mask `offset` positions above the low-order bit.
    fn bit_right(offset: u32) -> Self;

    /// Single-bit mask `offset` positions below the high-order bit.
    fn bit_left(offset: u32) -> Self;

    /// Returns `self` with the bit at `offset` (from the low end) set to `state`.
    #[must_use]
    fn set_right(self, offset: u32, state: bool) -> Self;

    /// Returns `self` with the bit at `offset` (from the high end) set to `state`.
    #[must_use]
    fn set_left(self, offset: u32, state: bool) -> Self;

    /// Reads the bit at `offset` from the low end.
    fn get_right(self, offset: u32) -> bool;

    /// Reads the bit at `offset` from the high end.
    fn get_left(self, offset: u32) -> bool;

    /// Returns `self` with its low `bits` cleared.
    #[must_use]
    fn mask_right(self, bits: u32) -> Self;

    /// Returns `self` with its high `bits` cleared.
    #[must_use]
    fn mask_left(self, bits: u32) -> Self;

    /// Returns `self` with its low `bits` set.
    #[must_use]
    fn flag_right(self, bits: u32) -> Self;

    /// Returns `self` with its high `bits` set.
    #[must_use]
    fn flag_left(self, bits: u32) -> Self;

    /// Rotates right by `shift` modulo the width.
    #[must_use]
    fn rotate_right_by(self, shift: u32) -> Self;

    /// Rotates left by `shift` modulo the width.
    #[must_use]
    fn rotate_left_by(self, shift: u32) -> Self;

    /// Bit inversion (`!n`).
    #[must_use]
    fn ones_complement(self) -> Self;

    /// Arithmetic negation in the unsigned domain (`!n + 1`).
    #[must_use]
    fn twos_complement(self) -> Self;

    /// Reverses the byte order.
    #[must_use]
    fn byteswap(self) -> Self;
}

macro_rules! impl_bits {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bits for $ty {
                const WIDTH: u32 = <$ty>::BITS;
                const BIT_LO: Self = 1;
                const BIT_HI: Self = 1 << (<$ty>::BITS - 1);
                const BIT_ALL: Self = <$ty>::MAX;
                const BIT_NONE: Self = 0;

                #[inline]
                fn bit_right(offset: u32) -> Self {
                    Self::BIT_LO.checked_shl(offset).unwrap_or(0)
                }

                #[inline]
                fn bit_left(offset: u32) -> Self {
                    Self::BIT_HI.checked_shr(offset).unwrap_or(0)
                }

                #[inline]
                fn set_right(self, offset: u32, state: bool) -> Self {
                    let bit = Self::bit_right(offset);
                    if state { self | bit } else { self & !bit }
                }

                #[inline]
                fn set_left(self, offset: u32, state: bool) -> Self {
                    let bit = Self::bit_left(offset);
                    if state { self | bit } else { self & !bit }
                }

                #[inline]
                fn get_right(self, offset: u32) -> bool {
                    self & Self::bit_right(offset) != 0
                }

                #[inline]
                fn get_left(self, offset: u32) -> bool {
                    self & Self::bit_left(offset) != 0
                }

                #[inline]
                fn mask_right(self, bits: u32) -> Self {
                    self & Self::BIT_ALL.checked_shl(bits).unwrap_or(0)
                }

                #[inline]
                fn mask_left(self, bits: u32) -> Self {
                    self & Self::BIT_ALL.checked_shr(bits).unwrap_or(0)
                }

                #[inline]
                fn flag_right(self, bits: u32) -> Self {
                    self | !Self::BIT_ALL.checked_shl(bits).unwrap_or(0)
                }

                #[inline]
                fn flag_left(self, bits: u32) -> Self {
                    self | !Self::BIT_ALL.checked_shr(bits).unwrap_or(0)
                }

                #[inline]
                fn rotate_right_by(self, shift: u32) -> Self {
                    self.rotate_right(shift % Self::WIDTH)
                }

                #[inline]
                fn rotate_left_by(self, shift: u32) -> Self {
                    self.rotate_left(shift % Self::WIDTH)
                }

                #[inline]
                fn ones_complement(self) -> Self {
                    !self
                }

                #[inline]
                fn twos_complement(self) -> Self {
                    (!self).wrapping_add(1)
                }

                #[inline]
                fn byteswap(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

impl_bits!(u8, u16, u32, u64, u128, usize);
