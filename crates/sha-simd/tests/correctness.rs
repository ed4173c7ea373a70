//! Correctness tests for the sha-simd public API.

use sha_simd::{
    Engine, Sha1, Sha256, Sha512, digest_batch, double_hash, double_hash_pair, hash, hash_pair,
    merkle_root,
};

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

const TWO_BLOCK: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

#[test]
fn single_digest_matches_fips180() {
    assert_eq!(
        to_hex(&hash::<Sha1>(b"")),
        "da39a3ee5e6b4b0d3255bfef95601890afd80709"
    );
    assert_eq!(
        to_hex(&hash::<Sha1>(b"abc")),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
    assert_eq!(
        to_hex(&hash::<Sha256>(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        to_hex(&hash::<Sha256>(b"abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        to_hex(&hash::<Sha256>(TWO_BLOCK)),
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    );
    assert_eq!(
        to_hex(&hash::<Sha512>(b"abc")),
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
         2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    );
}

#[test]
fn digest_matches_sha2_crates() {
    use sha1::Digest as _;

    for len in [0usize, 1, 55, 56, 63, 64, 111, 112, 127, 128, 1000, 4097] {
        let data: Vec<u8> = (0..len).map(|i| (i * 31 + 7) as u8).collect();
        assert_eq!(
            hash::<Sha1>(&data)[..],
            sha1::Sha1::digest(&data)[..],
            "sha1 len {len}"
        );
        assert_eq!(
            hash::<Sha256>(&data)[..],
            sha2::Sha256::digest(&data)[..],
            "sha256 len {len}"
        );
        assert_eq!(
            hash::<Sha512>(&data)[..],
            sha2::Sha512::digest(&data)[..],
            "sha512 len {len}"
        );
    }
}

#[test]
fn double_hash_is_hash_of_hash() {
    // Bitcoin's double SHA-256 of the empty string.
    assert_eq!(
        to_hex(&double_hash::<Sha256>(b"")),
        "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
    );
    assert_eq!(
        double_hash::<Sha512>(b"abc"),
        hash::<Sha512>(&hash::<Sha512>(b"abc"))
    );
}

#[test]
fn pair_hash_concatenates_halves() {
    let left = hash::<Sha256>(b"left");
    let right = hash::<Sha256>(b"right");
    let mut joined = left.to_vec();
    joined.extend_from_slice(&right);
    assert_eq!(hash_pair::<Sha256>(&left, &right), hash::<Sha256>(&joined));
    assert_eq!(
        double_hash_pair::<Sha256>(&left, &right),
        double_hash::<Sha256>(&joined)
    );
}

#[test]
fn merkle_root_of_three_duplicates_last() {
    let a = hash::<Sha256>(b"a");
    let b = hash::<Sha256>(b"b");
    let c = hash::<Sha256>(b"c");

    let ab = double_hash_pair::<Sha256>(&a, &b);
    let cc = double_hash_pair::<Sha256>(&c, &c);
    let expected = double_hash_pair::<Sha256>(&ab, &cc);

    assert_eq!(merkle_root::<Sha256>(&[a, b, c]), expected);
    assert_eq!(merkle_root::<Sha256>(&[a, b, c, c]), expected);
    assert_eq!(merkle_root::<Sha256>(&[]), [0u8; 32]);
}

#[test]
fn batch_digest_matches_sequential() {
    let inputs: Vec<Vec<u8>> = (0..40)
        .map(|i| format!("test input {i}").repeat(i % 7 + 1).into_bytes())
        .collect();

    let batch_results = digest_batch::<Sha256, _>(&inputs);
    let sequential_results: Vec<_> = inputs.iter().map(|i| hash::<Sha256>(i)).collect();

    assert_eq!(batch_results, sequential_results);
}

#[test]
fn batch_empty_returns_empty() {
    let empty: &[&[u8]] = &[];
    assert!(digest_batch::<Sha512, _>(empty).is_empty());
}

#[test]
fn batch_with_different_lengths() {
    let inputs: &[&[u8]] = &[
        b"",
        b"a",
        b"short",
        b"a medium length string for testing",
        &[0u8; 1000],
        TWO_BLOCK,
    ];

    let batch = digest_batch::<Sha1, _>(inputs);
    for (i, input) in inputs.iter().enumerate() {
        assert_eq!(batch[i], hash::<Sha1>(input), "Mismatch at index {i}");
    }
}

#[test]
fn streaming_matches_one_shot() {
    let data: Vec<u8> = (0..777u32).map(|i| (i ^ (i >> 3)) as u8).collect();
    let mut engine = Engine::<Sha512>::new();
    for piece in data.chunks(100) {
        engine.input(piece);
    }
    assert_eq!(engine.finalize(), hash::<Sha512>(&data));
}
