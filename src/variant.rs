//! Variant selectors.
//!
//! Every context is bound to exactly one variant when it is created and keeps
//! that variant for its whole lifetime.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// Number of lanes of the KECCAK-f\[1600\] state.
const SPONGE_WORDS: usize = 25;

/// SHA-3 digest size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sha3Variant {
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl Sha3Variant {
    pub const ALL: [Sha3Variant; 3] = [Self::Sha3_256, Self::Sha3_384, Self::Sha3_512];

    /// Select a variant by its output size in bits (256, 384 or 512).
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            256 => Ok(Self::Sha3_256),
            384 => Ok(Self::Sha3_384),
            512 => Ok(Self::Sha3_512),
            bits => Err(Error::UnsupportedDigestSize {
                family: "SHA-3",
                bits,
            }),
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::Sha3_256 => 256,
            Self::Sha3_384 => 384,
            Self::Sha3_512 => 512,
        }
    }

    /// Digest size in bytes.
    pub const fn digest_size(self) -> usize {
        self.bits() as usize / 8
    }

    /// Lanes reserved as capacity: twice the output size.
    pub const fn capacity_words(self) -> usize {
        2 * self.bits() as usize / 64
    }

    /// Lanes forming the rate, i.e. absorbing input.
    pub const fn rate_words(self) -> usize {
        SPONGE_WORDS - self.capacity_words()
    }

    /// Rate in bytes.
    pub const fn rate(self) -> usize {
        8 * self.rate_words()
    }
}

/// GOST R 34.11-2012 digest size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreebogVariant {
    Streebog256,
    Streebog512,
}

impl StreebogVariant {
    pub const ALL: [StreebogVariant; 2] = [Self::Streebog256, Self::Streebog512];

    /// Both variants compress 512-bit blocks.
    pub const BLOCK_SIZE: usize = 64;

    /// Select a variant by its output size in bits (256 or 512).
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            256 => Ok(Self::Streebog256),
            512 => Ok(Self::Streebog512),
            bits => Err(Error::UnsupportedDigestSize {
                family: "Streebog",
                bits,
            }),
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::Streebog256 => 256,
            Self::Streebog512 => 512,
        }
    }

    /// Digest size in bytes.
    pub const fn digest_size(self) -> usize {
        self.bits() as usize / 8
    }

    /// Byte repeated over the whole initial chain value.
    pub(crate) const fn initial_chain_byte(self) -> u8 {
        match self {
            Self::Streebog256 => 0x01,
            Self::Streebog512 => 0x00,
        }
    }
}

/// A hash algorithm this crate implements.
///
/// Parses from and displays as the canonical names `sha3-256`, `sha3-384`,
/// `sha3-512`, `streebog256` and `streebog512`.
///
/// ```
/// # use keccak_streebog::{Algorithm, StreebogVariant};
/// let algorithm: Algorithm = "Streebog256".parse().unwrap();
/// assert_eq!(algorithm, Algorithm::Streebog(StreebogVariant::Streebog256));
/// assert_eq!(32, algorithm.digest_size());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha3(Sha3Variant),
    Streebog(StreebogVariant),
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Self::Sha3(Sha3Variant::Sha3_256),
        Self::Sha3(Sha3Variant::Sha3_384),
        Self::Sha3(Sha3Variant::Sha3_512),
        Self::Streebog(StreebogVariant::Streebog256),
        Self::Streebog(StreebogVariant::Streebog512),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha3(Sha3Variant::Sha3_256) => "sha3-256",
            Self::Sha3(Sha3Variant::Sha3_384) => "sha3-384",
            Self::Sha3(Sha3Variant::Sha3_512) => "sha3-512",
            Self::Streebog(StreebogVariant::Streebog256) => "streebog256",
            Self::Streebog(StreebogVariant::Streebog512) => "streebog512",
        }
    }

    /// Digest size in bytes.
    pub const fn digest_size(self) -> usize {
        match self {
            Self::Sha3(variant) => variant.digest_size(),
            Self::Streebog(variant) => variant.digest_size(),
        }
    }

    /// Number of bytes the engine consumes per compression.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Sha3(variant) => variant.rate(),
            Self::Streebog(_) => StreebogVariant::BLOCK_SIZE,
        }
    }
}

impl From<Sha3Variant> for Algorithm {
    fn from(variant: Sha3Variant) -> Self {
        Self::Sha3(variant)
    }
}

impl From<StreebogVariant> for Algorithm {
    fn from(variant: StreebogVariant) -> Self {
        Self::Streebog(variant)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == normalized)
            .ok_or_else(|| Error::UnknownAlgorithm(s.to_owned()))
    }
}
