//! Portable `const fn` hashing.
//!
//! These routines use only explicit indexed loops and plain integer
//! arithmetic so they can run during constant evaluation. The padded
//! schedules the engine relies on are produced here at build time, and the
//! optimized path is tested against these functions.
//!
//! Schedules returned from this module have round constants already added,
//! exactly like the buffers the optimized path prepares.

pub mod sha1;

/// Generates a SHA-2 reference module for one word width.
macro_rules! sha2_reference {
    (
        $(#[$meta:meta])*
        $name:ident {
            word: $word:ty,
            rounds: $rounds:expr,
            k: $k:expr,
            h: $h:expr,
            big0: ($b0a:expr, $b0b:expr, $b0c:expr),
            big1: ($b1a:expr, $b1b:expr, $b1c:expr),
            small0: ($s0a:expr, $s0b:expr, $s0s:expr),
            small1: ($s1a:expr, $s1b:expr, $s1s:expr) $(,)?
        }
    ) => {
        $(#[$meta])*
        pub mod $name {
            const WORD_BYTES: usize = <$word>::BITS as usize / 8;
            const ROUNDS: usize = $rounds;
            const LENGTH_BYTES: usize = WORD_BYTES * 2;

            /// Block size in bytes.
            pub const BLOCK_BYTES: usize = WORD_BYTES * 16;
            /// Digest size in bytes.
            pub const DIGEST_BYTES: usize = WORD_BYTES * 8;

            const fn big0(x: $word) -> $word {
                x.rotate_right($b0a) ^ x.rotate_right($b0b) ^ x.rotate_right($b0c)
            }

            const fn big1(x: $word) -> $word {
                x.rotate_right($b1a) ^ x.rotate_right($b1b) ^ x.rotate_right($b1c)
            }

            const fn small0(x: $word) -> $word {
                x.rotate_right($s0a) ^ x.rotate_right($s0b) ^ (x >> $s0s)
            }

            const fn small1(x: $word) -> $word {
                x.rotate_right($s1a) ^ x.rotate_right($s1b) ^ (x >> $s1s)
            }

            const fn load(bytes: &[u8], at: usize) -> $word {
                let mut word: $word = 0;
                let mut i = 0;
                while i < WORD_BYTES {
                    word = (word << 8) | bytes[at + i] as $word;
                    i += 1;
                }
                word
            }

            /// Expands one block into its schedule with round constants added.
            pub const fn schedule(block: &[u8; BLOCK_BYTES]) -> [$word; 80] {
                let mut w = [0 as $word; 80];
                let mut i = 0;
                while i < 16 {
                    w[i] = load(block, i * WORD_BYTES);
                    i += 1;
                }
                while i < ROUNDS {
                    w[i] = small1(w[i - 2])
                        .wrapping_add(w[i - 7])
                        .wrapping_add(small0(w[i - 15]))
                        .wrapping_add(w[i - 16]);
                    i += 1;
                }
                i = 0;
                while i < ROUNDS {
                    w[i] = w[i].wrapping_add($k[i]);
                    i += 1;
                }
                w
            }

            /// Runs every round over `state` and adds the result back in.
            pub const fn compress(state: [$word; 8], schedule: &[$word; 80]) -> [$word; 8] {
                let mut a = state[0];
                let mut b = state[1];
                let mut c = state[2];
                let mut d = state[3];
                let mut e = state[4];
                let mut f = state[5];
                let mut g = state[6];
                let mut h = state[7];
                let mut i = 0;
                while i < ROUNDS {
                    let t1 = h
                        .wrapping_add(big1(e))
                        .wrapping_add((e & f) ^ (!e & g))
                        .wrapping_add(schedule[i]);
                    let t2 = big0(a).wrapping_add((a & b) ^ (a & c) ^ (b & c));
                    h = g;
                    g = f;
                    f = e;
                    e = d.wrapping_add(t1);
                    d = c;
                    c = b;
                    b = a;
                    a = t1.wrapping_add(t2);
                    i += 1;
                }
                [
                    state[0].wrapping_add(a),
                    state[1].wrapping_add(b),
                    state[2].wrapping_add(c),
                    state[3].wrapping_add(d),
                    state[4].wrapping_add(e),
                    state[5].wrapping_add(f),
                    state[6].wrapping_add(g),
                    state[7].wrapping_add(h),
                ]
            }

            /// Writes `bits` into the trailing length field, saturating.
            const fn write_length(block: &mut [u8; BLOCK_BYTES], bits: u128) {
                let max = u128::MAX >> (128 - LENGTH_BYTES * 8);
                let bits = if bits > max { max } else { bits };
                let mut i = 0;
                while i < LENGTH_BYTES {
                    block[BLOCK_BYTES - 1 - i] = (bits >> (8 * i)) as u8;
                    i += 1;
                }
            }

            /// The synthetic block that follows a message of `blocks` whole blocks.
            pub const fn pad_block(blocks: u64) -> [u8; BLOCK_BYTES] {
                let mut block = [0u8; BLOCK_BYTES];
                block[0] = 0x80;
                let bits = (blocks as u128).saturating_mul((BLOCK_BYTES * 8) as u128);
                write_length(&mut block, bits);
                block
            }

            /// Schedule of [`pad_block`].
            pub const fn pad_schedule(blocks: u64) -> [$word; 80] {
                schedule(&pad_block(blocks))
            }

            /// Serializes a state big-endian.
            pub const fn normalize(state: [$word; 8]) -> [u8; DIGEST_BYTES] {
                let mut out = [0u8; DIGEST_BYTES];
                let mut i = 0;
                while i < DIGEST_BYTES {
                    let word = state[i / WORD_BYTES];
                    let shift = 8 * (WORD_BYTES - 1 - i % WORD_BYTES);
                    out[i] = (word >> shift) as u8;
                    i += 1;
                }
                out
            }

            /// Hashes an arbitrary message.
            pub const fn hash(data: &[u8]) -> [u8; DIGEST_BYTES] {
                let mut state = $h;
                let mut offset = 0;
                while offset + BLOCK_BYTES <= data.len() {
                    let mut block = [0u8; BLOCK_BYTES];
                    let mut i = 0;
                    while i < BLOCK_BYTES {
                        block[i] = data[offset + i];
                        i += 1;
                    }
                    state = compress(state, &schedule(&block));
                    offset += BLOCK_BYTES;
                }

                let tail = data.len() - offset;
                let mut last = [0u8; BLOCK_BYTES];
                let mut i = 0;
                while i < tail {
                    last[i] = data[offset + i];
                    i += 1;
                }
                last[tail] = 0x80;
                if tail + 1 + LENGTH_BYTES > BLOCK_BYTES {
                    state = compress(state, &schedule(&last));
                    last = [0u8; BLOCK_BYTES];
                }
                write_length(&mut last, (data.len() as u128).saturating_mul(8));
                state = compress(state, &schedule(&last));
                normalize(state)
            }
        }
    };
}

sha2_reference! {
    /// SHA-256 reference path.
    sha256 {
        word: u32,
        rounds: 64,
        k: crate::constants::SHA256_K,
        h: crate::constants::SHA256_H,
        big0: (2, 13, 22),
        big1: (6, 11, 25),
        small0: (7, 18, 3),
        small1: (17, 19, 10),
    }
}

sha2_reference! {
    /// SHA-512 reference path.
    sha512 {
        word: u64,
        rounds: 80,
        k: crate::constants::SHA512_K,
        h: crate::constants::SHA512_H,
        big0: (28, 34, 39),
        big1: (14, 18, 41),
        small0: (1, 8, 7),
        small1: (19, 61, 6),
    }
}
