//! KECCAK sponge construction with incremental API, instantiated as SHA-3.
//!
//! Input is absorbed one 64-bit lane at a time. Bytes that do not yet complete
//! a lane are kept in a partial-lane accumulator until the next call, so the
//! final state does not depend on how the input is split across calls.
use std::{fmt, mem};

use tracing::{debug, warn};

use crate::{
    endian,
    error::{Error, Result},
    permute::{LANES, Lane, keccakf_1600_permute},
    variant::Sha3Variant,
};

/// Bits that are appended to the end of the input for domain separation and
/// padding. For SHA-3, this is the bit pattern 0b01 + the first 1 bit of the
/// pad10*1 padding, read from the least significant bit.
const DELIMITED_SUFFIX: u8 = 0b110;

/// Final 1 bit of the pad10*1 padding, the last bit of the rate.
const PADDING_END: Lane = 1 << 63;

/// Streaming SHA-3 state.
#[derive(Clone, PartialEq, Eq)]
pub struct Sha3Context {
    lanes: [Lane; LANES],
    /// Bytes of a lane that is not complete yet, low byte first.
    saved: Lane,
    /// Number of bytes held in `saved`, always below 8.
    byte_index: usize,
    /// Lane receiving the next complete word, always below the rate.
    word_index: usize,
    variant: Sha3Variant,
    finalized: bool,
}

impl Sha3Context {
    pub fn new(variant: Sha3Variant) -> Self {
        debug!(
            bits = variant.bits(),
            capacity_words = variant.capacity_words(),
            "created SHA-3 context"
        );
        Self::zeroed(variant)
    }

    /// Create a context from a digest-size selector in bits.
    pub fn with_bits(bits: u32) -> Result<Self> {
        Sha3Variant::from_bits(bits)
            .map(Self::new)
            .inspect_err(|err| warn!(%err, "rejected SHA-3 selector"))
    }

    fn zeroed(variant: Sha3Variant) -> Self {
        Self {
            lanes: [0; LANES],
            saved: 0,
            byte_index: 0,
            word_index: 0,
            variant,
            finalized: false,
        }
    }

    pub fn variant(&self) -> Sha3Variant {
        self.variant
    }

    /// `true` once the digest was produced and until the context is cleaned.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Reset to the freshly created state of the bound variant.
    pub fn clean(&mut self) {
        *self = Self::zeroed(self.variant);
    }

    /// Absorb an arbitrary number of bytes.
    ///
    /// Fails with [`Error::Finalized`] once [`Sha3Context::finalize`] ran.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            warn!(len = data.len(), "update of a finalized SHA-3 context");
            return Err(Error::Finalized);
        }

        self.absorb(data);
        Ok(())
    }

    /// Pad, permute and write the digest into `out`.
    ///
    /// At most `min(out.len(), digest size)` bytes are written; their number is
    /// returned. The context is terminal afterwards until it is cleaned.
    pub fn finalize(&mut self, out: &mut [u8]) -> Result<usize> {
        if self.finalized {
            warn!("second finalize of a SHA-3 context");
            return Err(Error::Finalized);
        }

        Ok(self.squeeze(out))
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        debug_assert!(!self.finalized);
        // bytes missing to complete the partial lane
        let missing = (8 - self.byte_index) % 8;
        if data.len() < missing {
            self.save_bytes(data);
            debug_assert!(self.byte_index < 8);
            return;
        }

        let (head, rest) = data.split_at(missing);
        if !head.is_empty() {
            self.save_bytes(head);
            self.byte_index = 0;
            let word = mem::take(&mut self.saved);
            self.absorb_word(word);
        }

        let (words, tail) = rest.as_chunks::<8>();
        for word in words {
            self.absorb_word(Lane::from_le_bytes(*word));
        }
        self.save_bytes(tail);
        debug_assert!(self.byte_index < 8);
    }

    /// Add domain separator and padding, permute and project the first
    /// `min(out.len(), digest size)` bytes of the lanes into `out`.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) -> usize {
        debug_assert!(!self.finalized);
        let padding = Lane::from(DELIMITED_SUFFIX) << (8 * self.byte_index);
        self.lanes[self.word_index] ^= self.saved ^ padding;
        self.lanes[self.variant.rate_words() - 1] ^= PADDING_END;
        keccakf_1600_permute(&mut self.lanes);
        self.saved = 0;
        self.byte_index = 0;
        self.word_index = 0;
        self.finalized = true;

        let len = out.len().min(self.variant.digest_size());
        endian::store_words(&self.lanes, &mut out[..len])
    }

    fn save_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.saved |= Lane::from(byte) << (8 * self.byte_index);
            self.byte_index += 1;
        }
    }

    fn absorb_word(&mut self, word: Lane) {
        self.lanes[self.word_index] ^= word;
        self.word_index += 1;
        if self.word_index == self.variant.rate_words() {
            keccakf_1600_permute(&mut self.lanes);
            self.word_index = 0;
        }
    }
}

impl fmt::Debug for Sha3Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sha3Context")
            .field("variant", &self.variant)
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::Sha3Context;
    use crate::{error::Error, variant::Sha3Variant};

    fn sha3_256_chunked(sizes: &[usize]) -> [u8; 32] {
        let mut ctx = Sha3Context::new(Sha3Variant::Sha3_256);
        for size in sizes {
            ctx.update(&vec![0; *size]).unwrap();
        }
        let mut output = [0; 32];
        assert_eq!(32, ctx.finalize(&mut output).unwrap());
        output
    }

    #[test]
    fn partial_absorb() {
        const RATE_SHA_256: usize = 136;
        let sizes: Vec<Vec<usize>> = vec![
            vec![0],
            vec![0, 0],
            vec![3, 4],
            vec![0, 30],
            vec![0, 30, 200],
            vec![30, 200],
            vec![RATE_SHA_256, 200],
            vec![40, RATE_SHA_256 - 40],
            vec![40, RATE_SHA_256 - 40, 30],
            vec![40, RATE_SHA_256 - 40, 30, 0, 20],
            vec![15, 20, 40, RATE_SHA_256 - 15 - 20 - 40, 20],
            vec![1, 1, 1, 1, 1, 1, 1, 1, 1],
        ];
        for msg_sizes in sizes {
            let complete_msg = vec![0; msg_sizes.iter().sum()];
            let expected = libcrux_sha3::sha256(&complete_msg);
            assert_eq!(expected, sha3_256_chunked(&msg_sizes), "{msg_sizes:?}");
        }
    }

    fn libcrux_digest(variant: Sha3Variant, msg: &[u8]) -> Vec<u8> {
        match variant {
            Sha3Variant::Sha3_256 => libcrux_sha3::sha256(msg).to_vec(),
            Sha3Variant::Sha3_384 => libcrux_sha3::sha384(msg).to_vec(),
            Sha3Variant::Sha3_512 => libcrux_sha3::sha512(msg).to_vec(),
        }
    }

    #[test]
    fn completing_a_partial_lane() {
        for sizes in [vec![3, 5], vec![1; 8], vec![7, 1, 7, 9], vec![5, 8, 3]] {
            let msg: Vec<u8> = (0..sizes.iter().sum::<usize>()).map(|i| i as u8).collect();
            for variant in Sha3Variant::ALL {
                let mut ctx = Sha3Context::new(variant);
                let mut rest = msg.as_slice();
                for size in &sizes {
                    let (head, tail) = rest.split_at(*size);
                    ctx.update(head).unwrap();
                    rest = tail;
                }
                let mut out = vec![0; variant.digest_size()];
                ctx.finalize(&mut out).unwrap();
                assert_eq!(libcrux_digest(variant, &msg), out, "{variant:?} {sizes:?}");
            }
        }
    }

    #[test]
    fn short_output_is_truncated() {
        let mut full = [0; 64];
        let mut ctx = Sha3Context::new(Sha3Variant::Sha3_512);
        ctx.update(b"abc").unwrap();
        assert_eq!(64, ctx.finalize(&mut full).unwrap());

        let mut short = [0xaa; 20];
        let mut ctx = Sha3Context::new(Sha3Variant::Sha3_512);
        ctx.update(b"abc").unwrap();
        assert_eq!(20, ctx.finalize(&mut short).unwrap());
        assert_eq!(full[..20], short);

        let mut long = [0xaa; 80];
        let mut ctx = Sha3Context::new(Sha3Variant::Sha3_512);
        ctx.update(b"abc").unwrap();
        assert_eq!(64, ctx.finalize(&mut long).unwrap());
        assert_eq!(full, long[..64]);
        assert_eq!([0xaa; 16], long[64..]);
    }

    #[test]
    fn finalized_context_is_rejected_until_cleaned() {
        let mut ctx = Sha3Context::new(Sha3Variant::Sha3_256);
        let mut first = [0; 32];
        ctx.finalize(&mut first).unwrap();

        let snapshot = ctx.clone();
        let mut out = [0; 32];
        assert_eq!(Err(Error::Finalized), ctx.update(b"more"));
        assert_eq!(Err(Error::Finalized), ctx.finalize(&mut out));
        assert_eq!(snapshot, ctx);

        ctx.clean();
        assert_eq!(Sha3Context::new(Sha3Variant::Sha3_256), ctx);
        ctx.finalize(&mut out).unwrap();
        assert_eq!(first, out);
    }

    #[test]
    fn rejects_unsupported_selector() {
        assert!(Sha3Context::with_bits(224).unwrap_err().is_invalid_value());
        assert_eq!(
            Sha3Variant::Sha3_384,
            Sha3Context::with_bits(384).unwrap().variant()
        );
    }

    proptest! {
        #[test]
        fn indices_stay_within_rate(
            bits in prop::sample::select(vec![256_u32, 384, 512]),
            chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..8),
        ) {
            let mut ctx = Sha3Context::with_bits(bits).unwrap();
            for chunk in &chunks {
                ctx.update(chunk).unwrap();
                prop_assert!(ctx.word_index < ctx.variant.rate_words());
                prop_assert!(ctx.byte_index < 8);
            }
        }

        #[test]
        fn unaligned_updates_match_libcrux(
            variant in prop::sample::select(Sha3Variant::ALL.to_vec()),
            msg in prop::collection::vec(any::<u8>(), 0..400),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..12),
        ) {
            let mut cuts: Vec<usize> = cuts.iter().map(|cut| cut.index(msg.len() + 1)).collect();
            cuts.sort_unstable();

            let mut ctx = Sha3Context::new(variant);
            let mut start = 0;
            for cut in cuts.into_iter().chain([msg.len()]) {
                ctx.update(&msg[start..cut]).unwrap();
                start = cut;
            }
            let mut out = vec![0; variant.digest_size()];
            ctx.finalize(&mut out).unwrap();
            prop_assert_eq!(libcrux_digest(variant, &msg), out);
        }
    }
}
