//! Every supported backend must agree bit for bit with the scalar path.

use std::hint::black_box;
use std::time::{Duration, Instant};

use sha_simd::batch;
use sha_simd::{
    Algorithm, Backend, BackendError, Chunked, Dispatcher, Sha1, Sha256, Sha512, double_hash_block,
    double_hash_pair, hash, hash_block,
};

fn supported() -> impl Iterator<Item = Dispatcher> {
    Backend::ALL
        .into_iter()
        .filter_map(|backend| Dispatcher::with_backend(backend).ok())
}

fn blocks<A: Algorithm>(count: usize) -> Vec<A::Block> {
    (0..count)
        .map(|n| {
            let mut block = A::ZERO_BLOCK;
            for (i, byte) in block.as_mut().iter_mut().enumerate() {
                *byte = (n * 131 + i * 7) as u8;
            }
            block
        })
        .collect()
}

fn hash_each_lane_counts<A: Algorithm>() {
    for dispatcher in supported() {
        let lanes = dispatcher.lanes::<A>();
        for count in [0, 1, lanes.saturating_sub(1), lanes, lanes + 1, 2 * lanes + 3] {
            let input = blocks::<A>(count);
            let expected: Vec<_> = input.iter().map(hash_block::<A>).collect();
            assert_eq!(
                dispatcher.hash_each::<A>(&input),
                expected,
                "{} count={count} on {}",
                A::NAME,
                dispatcher.backend()
            );
        }
    }
}

#[test]
fn hash_each_covers_partial_and_full_groups() {
    hash_each_lane_counts::<Sha1>();
    hash_each_lane_counts::<Sha256>();
    hash_each_lane_counts::<Sha512>();
}

fn double_lane_counts<A: Chunked>() {
    for dispatcher in supported() {
        let lanes = dispatcher.lanes::<A>();
        for count in [1, lanes, lanes + 1, 3 * lanes] {
            let input = blocks::<A>(count);
            let expected: Vec<_> = input.iter().map(double_hash_block::<A>).collect();
            assert_eq!(dispatcher.double_hash_each::<A>(&input), expected);

            let digests: Vec<_> = input.iter().map(hash_block::<A>).collect();
            let mut padded = digests.clone();
            if padded.len() % 2 == 1 {
                padded.push(*padded.last().unwrap());
            }
            let expected: Vec<_> = padded
                .chunks_exact(2)
                .map(|pair| double_hash_pair::<A>(&pair[0], &pair[1]))
                .collect();
            assert_eq!(dispatcher.double_hash_pairs::<A>(&padded), expected);
        }
    }
}

#[test]
fn double_hash_paths_agree() {
    double_lane_counts::<Sha256>();
    double_lane_counts::<Sha512>();
}

#[test]
fn schedules_and_long_messages_agree() {
    let data: Vec<u8> = (0..64 * 37 + 19).map(|i| (i * 13) as u8).collect();
    for dispatcher in supported() {
        for len in [0, 64, 64 * 17, data.len()] {
            let message = &data[..len];
            assert_eq!(
                batch::digest::<Sha256>(dispatcher.backend(), message),
                hash::<Sha256>(message)
            );
            assert_eq!(
                batch::digest::<Sha512>(dispatcher.backend(), message),
                hash::<Sha512>(message)
            );
        }
    }
}

#[test]
fn merkle_roots_agree_across_backends() {
    let leaves: Vec<[u8; 32]> = (0..45u8).map(|i| hash::<Sha256>(&[i])).collect();
    let expected = Dispatcher::scalar().merkle_root::<Sha256>(&leaves);
    for dispatcher in supported() {
        assert_eq!(dispatcher.merkle_root::<Sha256>(&leaves), expected);
    }
}

#[test]
fn scalar_is_always_available() {
    assert!(Backend::Scalar.is_supported());
    assert_eq!(Dispatcher::scalar().lanes::<Sha256>(), 1);
}

#[test]
fn unsupported_backend_is_an_error() {
    for backend in Backend::ALL {
        match Dispatcher::with_backend(backend) {
            Ok(dispatcher) => assert_eq!(dispatcher.backend(), backend),
            Err(err) => {
                assert!(!backend.is_supported());
                assert_eq!(err, BackendError::Unsupported { backend });
            }
        }
    }
}

/// Fastest of a few runs, to keep scheduler noise out of the comparison.
fn best_of(runs: usize, mut work: impl FnMut()) -> Duration {
    (0..runs)
        .map(|_| {
            let start = Instant::now();
            work();
            start.elapsed()
        })
        .min()
        .unwrap_or_default()
}

fn assert_not_slower(label: &str, mut work: impl FnMut(&Dispatcher)) {
    let detected = Dispatcher::detect();
    let scalar = Dispatcher::scalar();
    let wide = best_of(5, || work(&detected));
    let narrow = best_of(5, || work(&scalar));
    assert!(
        wide <= narrow + narrow / 4,
        "{label}: {} took {wide:?}, scalar took {narrow:?}",
        detected.backend()
    );
}

#[test]
#[ignore = "timing comparison; run with --release -- --ignored"]
fn detected_backend_is_not_slower_than_scalar() {
    let sha256 = blocks::<Sha256>(20_000);
    assert_not_slower("sha256 hash_each", |d| {
        black_box(d.hash_each::<Sha256>(black_box(&sha256)));
    });

    let sha512 = blocks::<Sha512>(10_000);
    assert_not_slower("sha512 hash_each", |d| {
        black_box(d.hash_each::<Sha512>(black_box(&sha512)));
    });

    let messages: Vec<Vec<u8>> = (0..4_000).map(|n| vec![n as u8; 1_000]).collect();
    assert_not_slower("sha256 digest_batch", |d| {
        black_box(d.digest_batch::<Sha256, _>(black_box(&messages)));
    });

    let seed = hash_block::<Sha256>(&sha256[0]);
    let leaves: Vec<[u8; 32]> = (0..8_192u32)
        .map(|n| {
            let mut leaf = seed;
            leaf[..4].copy_from_slice(&n.to_le_bytes());
            leaf
        })
        .collect();
    assert_not_slower("sha256 merkle_root", |d| {
        black_box(d.merkle_root::<Sha256>(black_box(&leaves)));
    });
}
