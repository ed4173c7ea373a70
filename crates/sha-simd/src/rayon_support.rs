//! Rayon integration for parallel hashing.
//!
//! The engine itself is single-threaded. These helpers let a host shard
//! independent messages across rayon's pool and still batch them through
//! the SIMD lanes.

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::Path;

use crate::algorithm::Algorithm;
use crate::dispatcher;

/// Extension trait for hashing the items of a parallel iterator.
///
/// # Example
///
/// ```
/// use rayon::prelude::*;
/// use sha_simd::{ParallelDigest, Sha256};
///
/// let data: Vec<Vec<u8>> = vec![b"hello".to_vec(), b"world".to_vec(), b"test".to_vec()];
///
/// let digests = data.par_iter().sha_digest::<Sha256>();
/// assert_eq!(digests.len(), 3);
/// ```
pub trait ParallelDigest<T> {
    /// Digests every item, in iterator order, batching through SIMD lanes.
    fn sha_digest<A: Algorithm>(self) -> Vec<A::Digest>;
}

impl<I, T> ParallelDigest<T> for I
where
    I: ParallelIterator<Item = T>,
    T: AsRef<[u8]> + Send,
{
    fn sha_digest<A: Algorithm>(self) -> Vec<A::Digest> {
        let items: Vec<T> = self.collect();
        dispatcher::global().digest_batch::<A, T>(&items)
    }
}

/// Digests multiple files in parallel.
///
/// Files are read and hashed on rayon's thread pool. Results come back in
/// the order of `paths`.
///
/// # Example
///
/// ```no_run
/// use sha_simd::{Sha256, digest_files};
///
/// let paths = ["file1.bin", "file2.bin"];
/// for (path, result) in paths.iter().zip(digest_files::<Sha256, _>(&paths)) {
///     match result {
///         Ok(digest) => println!("{path}: {digest:02x?}"),
///         Err(e) => println!("{path}: error - {e}"),
///     }
/// }
/// ```
pub fn digest_files<A: Algorithm, P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<io::Result<A::Digest>> {
    paths
        .par_iter()
        .map(|path| {
            let data = fs::read(path.as_ref())?;
            Ok(dispatcher::global().digest::<A>(&data))
        })
        .collect()
}
