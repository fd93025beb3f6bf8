//! SHA-3 and Streebog Hash Functions
//!
//! This crate provides portable, pure Rust implementations of the SHA-3
//! hashing functions standardized in [FIPS 202] and of the Streebog hash
//! function standardized in [GOST R 34.11-2012] (RFC 6986).
//!
//! Both are streaming engines following a create, update, finalize, clean
//! life cycle:
//!
//! - [`Sha3Context`] absorbs input of any length in any number of calls.
//! - [`StreebogContext`] only absorbs whole 64-byte blocks; the final partial
//!   block is handed to its `finalize`.
//!
//! [`Hasher`] buffers input for either engine so that any chunking works, and
//! the types in [`Sha3_256`], [`Streebog256`] and friends plug the engines
//! into the RustCrypto [`digest`] traits.
//!
//! # Limitations
//!
//! The SHAKE extendable-output functions and SHA3-224 are not implemented.
//!
//! The Streebog length counter carries into its second 64-bit word only,
//! which limits messages to less than 2^125 bytes.
//!
//! # Example Usage
//! ```
//! # use keccak_streebog::{sha3_256, Algorithm, Hasher};
//! #
//! let message = b"your input bytes";
//! let hash: [u8; 32] = sha3_256(message);
//! let expected = "414d4b6d11a92aaeeebe35f9374942f563848d345631bf5537407252dca6b378";
//! assert_eq!(expected, hex::encode(hash));
//!
//! let algorithm: Algorithm = "streebog256".parse().unwrap();
//! let mut hasher = Hasher::from_algorithm(algorithm);
//! hasher.update(b"The quick brown fox ");
//! hasher.update(b"jumps over the lazy dog");
//! let expected = "3e7dea7f2384b6c5a3d0e24aaa29c05e89ddd762145030ec22c71a6db8b2c1f4";
//! assert_eq!(expected, hex::encode(hasher.finalize()));
//! ```
//!
//! [FIPS 202]: https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf
//! [GOST R 34.11-2012]: https://www.rfc-editor.org/rfc/rfc6986

mod compress;
mod digests;
mod endian;
mod engine;
mod error;
mod hasher;
mod lps;
mod permute;
pub mod selftest;
mod sponge;
mod streebog;
mod variant;

pub use digest;

pub use crate::{
    digests::{Sha3_256, Sha3_384, Sha3_512, Streebog256, Streebog512},
    engine::{AnyEngine, Engine},
    error::{Error, Result},
    hasher::{Hasher, MAX_BLOCK_SIZE},
    sponge::Sha3Context,
    streebog::StreebogContext,
    variant::{Algorithm, Sha3Variant, StreebogVariant},
};

/// SHA-3 Hash with 256 bits (32 bytes) output.
pub fn sha3_256(message: &[u8]) -> [u8; 32] {
    sha3(Sha3Variant::Sha3_256, message)
}

/// SHA-3 Hash with 384 bits (48 bytes) output.
pub fn sha3_384(message: &[u8]) -> [u8; 48] {
    sha3(Sha3Variant::Sha3_384, message)
}

/// SHA-3 Hash with 512 bits (64 bytes) output.
pub fn sha3_512(message: &[u8]) -> [u8; 64] {
    sha3(Sha3Variant::Sha3_512, message)
}

/// Streebog Hash with 256 bits (32 bytes) output.
pub fn streebog256(message: &[u8]) -> [u8; 32] {
    streebog(StreebogVariant::Streebog256, message)
}

/// Streebog Hash with 512 bits (64 bytes) output.
pub fn streebog512(message: &[u8]) -> [u8; 64] {
    streebog(StreebogVariant::Streebog512, message)
}

fn sha3<const N: usize>(variant: Sha3Variant, message: &[u8]) -> [u8; N] {
    let mut output = [0; N];
    let mut ctx = Sha3Context::new(variant);
    ctx.absorb(message);
    ctx.squeeze(&mut output);
    output
}

fn streebog<const N: usize>(variant: StreebogVariant, message: &[u8]) -> [u8; N] {
    let mut output = [0; N];
    let mut ctx = StreebogContext::new(variant);
    let (blocks, tail) = message.as_chunks();
    ctx.compress_blocks(blocks);
    ctx.finish(tail, &mut output);
    output
}
