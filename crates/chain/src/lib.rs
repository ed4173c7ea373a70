//! Block chain collaborators for the SHA engine.
//!
//! The engine hashes bytes and knows nothing about blocks. This crate holds
//! the small pieces of chain vocabulary that sit next to it: the compact
//! target encoding, a chain [`Position`], bit and byte readers, a zero-copy
//! [`ContainerSource`] and a proof-of-work check built on the engine's double
//! SHA-256.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compact;
mod container;
mod position;
pub mod pow;
mod reader;
mod uint256;

pub use crate::compact::{Compact, CompactError};
pub use crate::container::ContainerSource;
pub use crate::position::Position;
pub use crate::pow::{PowError, check_proof_of_work, header_hash};
pub use crate::reader::{BitCursor, BitReader, ByteReader, ReadError};
pub use crate::uint256::Uint256;
