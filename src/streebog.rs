//! GOST R 34.11-2012 "Streebog" hash function.
//!
//! The context absorbs whole 64-byte blocks only. A message ending in a
//! partial block passes that remainder to [`StreebogContext::finalize`], which
//! pads it and folds in the length counter and checksum.
use std::fmt;

use tracing::{debug, warn};

use crate::{
    compress::{Block, add_checksum, add_length, g},
    endian,
    error::{Error, Result},
    variant::StreebogVariant,
};

const BLOCK_SIZE: usize = StreebogVariant::BLOCK_SIZE;

/// Streaming Streebog state.
#[derive(Clone, PartialEq, Eq)]
pub struct StreebogContext {
    /// Chain value.
    h: Block,
    /// Number of processed bits.
    n: Block,
    /// Sum of all processed blocks modulo 2^512.
    sigma: Block,
    variant: StreebogVariant,
}

impl StreebogContext {
    pub fn new(variant: StreebogVariant) -> Self {
        debug!(bits = variant.bits(), "created Streebog context");
        Self::seeded(variant)
    }

    /// Create a context from a digest-size selector in bits.
    pub fn with_bits(bits: u32) -> Result<Self> {
        StreebogVariant::from_bits(bits)
            .map(Self::new)
            .inspect_err(|err| warn!(%err, "rejected Streebog selector"))
    }

    fn seeded(variant: StreebogVariant) -> Self {
        Self {
            h: [u64::from_le_bytes([variant.initial_chain_byte(); 8]); 8],
            n: [0; 8],
            sigma: [0; 8],
            variant,
        }
    }

    pub fn variant(&self) -> StreebogVariant {
        self.variant
    }

    /// Reset to the freshly created state of the bound variant.
    pub fn clean(&mut self) {
        *self = Self::seeded(self.variant);
    }

    /// Compress whole blocks.
    ///
    /// `data.len()` must be a multiple of 64, otherwise nothing is processed
    /// and [`Error::UnalignedUpdate`] is returned.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        let (blocks, rest) = data.as_chunks::<BLOCK_SIZE>();
        if !rest.is_empty() {
            let err = Error::UnalignedUpdate {
                len: data.len(),
                block_size: BLOCK_SIZE,
            };
            warn!(%err, "rejected Streebog update");
            return Err(err);
        }

        self.compress_blocks(blocks);
        Ok(())
    }

    /// Hash the final `tail` (shorter than a block) and write the digest.
    ///
    /// Works on a copy of the state: the context itself is left untouched and
    /// may keep absorbing blocks. At most `min(out.len(), digest size)` bytes
    /// are written; their number is returned.
    pub fn finalize(&self, tail: &[u8], out: &mut [u8]) -> Result<usize> {
        if tail.len() >= BLOCK_SIZE {
            let err = Error::TailTooLong {
                len: tail.len(),
                block_size: BLOCK_SIZE,
            };
            warn!(%err, "rejected Streebog finalize");
            return Err(err);
        }

        Ok(self.finish(tail, out))
    }

    pub(crate) fn compress_blocks(&mut self, blocks: &[[u8; BLOCK_SIZE]]) {
        for block in blocks {
            let m = endian::load_words::<8>(block);
            g(&mut self.h, Some(&self.n), &m);
            add_length(&mut self.n, 8 * BLOCK_SIZE as u64);
            add_checksum(&mut self.sigma, &m);
        }
    }

    /// Pad `tail`, which must be shorter than a block, and run the final
    /// compressions on a copy of the state.
    pub(crate) fn finish(&self, tail: &[u8], out: &mut [u8]) -> usize {
        debug_assert!(tail.len() < BLOCK_SIZE);
        let mut padded = [0; BLOCK_SIZE];
        padded[..tail.len()].copy_from_slice(tail);
        padded[tail.len()] = 0x01;
        let m = endian::load_words::<8>(&padded);

        let mut state = self.clone();
        g(&mut state.h, Some(&state.n), &m);
        add_length(&mut state.n, 8 * tail.len() as u64);
        add_checksum(&mut state.sigma, &m);
        g(&mut state.h, None, &state.n);
        g(&mut state.h, None, &state.sigma);

        // the 256-bit digest is the most significant half of h
        let digest = match self.variant {
            StreebogVariant::Streebog256 => &state.h[4..],
            StreebogVariant::Streebog512 => &state.h[..],
        };
        let len = out.len().min(self.variant.digest_size());
        endian::store_words(digest, &mut out[..len])
    }
}

impl fmt::Debug for StreebogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreebogContext")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}
