//! SHA-1 reference path.

use crate::constants::{SHA1_H, SHA1_K};

/// Block size in bytes.
pub const BLOCK_BYTES: usize = 64;
/// Digest size in bytes.
pub const DIGEST_BYTES: usize = 20;

const fn load(bytes: &[u8], at: usize) -> u32 {
    ((bytes[at] as u32) << 24)
        | ((bytes[at + 1] as u32) << 16)
        | ((bytes[at + 2] as u32) << 8)
        | bytes[at + 3] as u32
}

/// Expands one block into its schedule with round constants added.
pub const fn schedule(block: &[u8; BLOCK_BYTES]) -> [u32; 80] {
    let mut w = [0u32; 80];
    let mut i = 0;
    while i < 16 {
        w[i] = load(block, i * 4);
        i += 1;
    }
    while i < 80 {
        w[i] = (w[i - 3] ^ w[i - 8] ^ w[i - 14] ^ w[i - 16]).rotate_left(1);
        i += 1;
    }
    i = 0;
    while i < 80 {
        w[i] = w[i].wrapping_add(SHA1_K[i]);
        i += 1;
    }
    w
}

/// Runs all eighty rounds over `state` and adds the result back in.
pub const fn compress(state: [u32; 5], schedule: &[u32; 80]) -> [u32; 5] {
    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];
    let mut e = state[4];
    let mut i = 0;
    while i < 80 {
        let f = match i / 20 {
            0 => (b & c) | (!b & d),
            2 => (b & c) | (b & d) | (c & d),
            _ => b ^ c ^ d,
        };
        let t = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(schedule[i]);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = t;
        i += 1;
    }
    [
        state[0].wrapping_add(a),
        state[1].wrapping_add(b),
        state[2].wrapping_add(c),
        state[3].wrapping_add(d),
        state[4].wrapping_add(e),
    ]
}

const fn write_length(block: &mut [u8; BLOCK_BYTES], bits: u128) {
    let bits = if bits > u64::MAX as u128 {
        u64::MAX
    } else {
        bits as u64
    };
    let mut i = 0;
    while i < 8 {
        block[BLOCK_BYTES - 1 - i] = (bits >> (8 * i)) as u8;
        i += 1;
    }
}

/// The synthetic block that follows a message of `blocks` whole blocks.
pub const fn pad_block(blocks: u64) -> [u8; BLOCK_BYTES] {
    let mut block = [0u8; BLOCK_BYTES];
    block[0] = 0x80;
    write_length(
        &mut block,
        (blocks as u128).saturating_mul((BLOCK_BYTES * 8) as u128),
    );
    block
}

/// Schedule of [`pad_block`].
pub const fn pad_schedule(blocks: u64) -> [u32; 80] {
    schedule(&pad_block(blocks))
}

/// Serializes a state big-endian.
pub const fn normalize(state: [u32; 5]) -> [u8; DIGEST_BYTES] {
    let mut out = [0u8; DIGEST_BYTES];
    let mut i = 0;
    while i < DIGEST_BYTES {
        out[i] = (state[i / 4] >> (8 * (3 - i % 4))) as u8;
        i += 1;
    }
    out
}

/// Hashes an arbitrary message.
pub const fn hash(data: &[u8]) -> [u8; DIGEST_BYTES] {
    let mut state = SHA1_H;
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
    if tail + 9 > BLOCK_BYTES {
        state = compress(state, &schedule(&last));
        last = [0u8; BLOCK_BYTES];
    }
    write_length(&mut last, (data.len() as u128).saturating_mul(8));
    state = compress(state, &schedule(&last));
    normalize(state)
}
