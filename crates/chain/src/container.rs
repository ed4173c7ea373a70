//! Read cursor over a contiguous byte container.

use std::io::{self, BufRead, Read};

/// Sequential reader over any `AsRef<[u8]>` container.
///
/// Implements [`Read`] and [`BufRead`], and hands out whole blocks by
/// reference through [`next_block`](Self::next_block) so they can be fed to
/// the hash engine without copying.
#[derive(Clone, Debug)]
pub struct ContainerSource<C> {
    container: C,
    position: usize,
}

impl<C: AsRef<[u8]>> ContainerSource<C> {
    /// Starts reading at the beginning of `container`.
    pub const fn new(container: C) -> Self {
        Self {
            container,
            position: 0,
        }
    }

    /// Bytes consumed so far.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Unread bytes.
    pub fn remaining(&self) -> &[u8] {
        &self.container.as_ref()[self.position..]
    }

    /// Borrows the next `N` bytes as an array and advances past them.
    ///
    /// Returns `None` without advancing when fewer than `N` bytes remain.
    pub fn next_block<const N: usize>(&mut self) -> Option<&[u8; N]> {
        let start = self.position;
        let block = self.container.as_ref()[start..].first_chunk::<N>()?;
        self.position = start + N;
        Some(block)
    }

    /// Returns the container.
    pub fn into_inner(self) -> C {
        self.container
    }
}

impl<C: AsRef<[u8]>> Read for ContainerSource<C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        let count = remaining.len().min(buf.len());
        buf[..count].copy_from_slice(&remaining[..count]);
        self.position += count;
        Ok(count)
    }
}

impl<C: AsRef<[u8]>> BufRead for ContainerSource<C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.remaining())
    }

    fn consume(&mut self, amount: usize) {
        self.position = (self.position + amount).min(self.container.as_ref().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha_simd::{Sha256, hash, hash_block};

    #[test]
    fn read_drains_in_order() {
        let mut source = ContainerSource::new(vec![1u8, 2, 3, 4, 5]);
        let mut buf = [0u8; 2];
        assert_eq!(source.read(&mut buf).unwrap(), 2);
        assert_eq!(buf, [1, 2]);

        let mut rest = Vec::new();
        source.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, [3, 4, 5]);
        assert_eq!(source.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn buf_read_lines() {
        let source = ContainerSource::new("alpha\nbeta\n");
        let lines: Vec<String> = source.lines().map(Result::unwrap).collect();
        assert_eq!(lines, ["alpha", "beta"]);
    }

    #[test]
    fn consume_is_clamped() {
        let mut source = ContainerSource::new([0u8; 4]);
        source.consume(10);
        assert_eq!(source.position(), 4);
        assert!(source.fill_buf().unwrap().is_empty());
    }

    #[test]
    fn blocks_feed_the_engine() {
        let data: Vec<u8> = (0..150u8).collect();
        let mut source = ContainerSource::new(&data);

        let first = *source.next_block::<64>().unwrap();
        assert_eq!(hash_block::<Sha256>(&first), hash::<Sha256>(&data[..64]));
        assert!(source.next_block::<64>().is_some());
        assert!(source.next_block::<64>().is_none());
        assert_eq!(source.remaining(), &data[128..]);
    }
}
