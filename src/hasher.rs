//! Buffering driver turning any [`Engine`] into an arbitrarily chunkable hash.
use std::io::{self, Read, Write};

use tracing::debug;

use crate::{
    engine::{AnyEngine, Engine},
    variant::Algorithm,
};

/// Largest block size of all engines, the SHA3-256 rate.
pub const MAX_BLOCK_SIZE: usize = 136;

/// Streaming hasher over an engine.
///
/// Input is buffered until a complete block is available, so `update` accepts
/// any chunking for every engine, including Streebog whose context only takes
/// whole blocks.
#[derive(Clone, Debug)]
pub struct Hasher<E: Engine> {
    engine: E,
    buffer: [u8; MAX_BLOCK_SIZE],
    /// Number of buffered bytes, always below the block size.
    filled: usize,
}

impl<E: Engine> Hasher<E> {
    pub fn new(engine: E) -> Self {
        debug_assert!(engine.block_size() <= MAX_BLOCK_SIZE);
        Self {
            engine,
            buffer: [0; MAX_BLOCK_SIZE],
            filled: 0,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn block_size(&self) -> usize {
        self.engine.block_size()
    }

    pub fn digest_size(&self) -> usize {
        self.engine.digest_size()
    }

    pub fn update(&mut self, mut data: &[u8]) {
        let block_size = self.engine.block_size();

        if self.filled > 0 {
            let take = data.len().min(block_size - self.filled);
            self.buffer[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];
            if self.filled < block_size {
                return;
            }
            self.engine.absorb_blocks(&self.buffer[..block_size]);
            self.filled = 0;
        }

        let aligned = data.len() - data.len() % block_size;
        let (blocks, rest) = data.split_at(aligned);
        if !blocks.is_empty() {
            self.engine.absorb_blocks(blocks);
        }
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.filled = rest.len();
    }

    /// Write `min(out.len(), digest size)` bytes of the digest into `out` and
    /// return their number. The hasher is reset afterwards.
    pub fn finalize_into(&mut self, out: &mut [u8]) -> usize {
        let written = self.engine.finish(&self.buffer[..self.filled], out);
        self.reset();
        written
    }

    pub fn finalize(mut self) -> Vec<u8> {
        let mut out = vec![0; self.digest_size()];
        self.finalize_into(&mut out);
        out
    }

    pub fn reset(&mut self) {
        self.engine.clean();
        self.filled = 0;
    }
}

impl Hasher<AnyEngine> {
    pub fn from_algorithm(algorithm: Algorithm) -> Self {
        Self::new(AnyEngine::new(algorithm))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.engine.algorithm()
    }
}

impl<E: Engine> Write for Hasher<E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Algorithm {
    /// Hash a complete message.
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        let mut hasher = Hasher::from_algorithm(self);
        hasher.update(data);
        hasher.finalize()
    }

    /// Hash everything `reader` yields until end of input.
    pub fn hash_reader(self, mut reader: impl Read) -> io::Result<Vec<u8>> {
        let mut hasher = Hasher::from_algorithm(self);
        let bytes = io::copy(&mut reader, &mut hasher)?;
        debug!(algorithm = %self, bytes, "hashed reader");
        Ok(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::Hasher;
    use crate::variant::{Algorithm, StreebogVariant};

    fn message(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn block_boundaries() {
        for algorithm in Algorithm::ALL {
            let block_size = algorithm.block_size();
            for len in [0, 1, block_size - 1, block_size, block_size + 1, 3 * block_size] {
                let msg = message(len);
                let expected = algorithm.hash(&msg);

                let mut bytewise = Hasher::from_algorithm(algorithm);
                for byte in &msg {
                    bytewise.update(std::slice::from_ref(byte));
                }
                assert_eq!(expected, bytewise.finalize(), "{algorithm} len {len}");
            }
        }
    }

    #[test]
    fn finalize_into_resets() {
        for algorithm in Algorithm::ALL {
            let mut hasher = Hasher::from_algorithm(algorithm);
            hasher.update(b"first message");
            let mut first = vec![0; algorithm.digest_size()];
            assert_eq!(first.len(), hasher.finalize_into(&mut first));
            assert_eq!(algorithm.hash(b"first message"), first);

            hasher.update(b"second");
            assert_eq!(algorithm.hash(b"second"), hasher.finalize());
        }
    }

    #[test]
    fn truncates_output() {
        let algorithm = Algorithm::Streebog(StreebogVariant::Streebog512);
        let full = algorithm.hash(b"abc");
        let mut hasher = Hasher::from_algorithm(algorithm);
        hasher.update(b"abc");
        let mut short = [0; 7];
        assert_eq!(7, hasher.finalize_into(&mut short));
        assert_eq!(full[..7], short);
    }

    #[test]
    fn reader() {
        let msg = message(10_000);
        for algorithm in Algorithm::ALL {
            let digest = algorithm.hash_reader(msg.as_slice()).unwrap();
            assert_eq!(algorithm.hash(&msg), digest);
        }
    }

    proptest! {
        #[test]
        fn chunking_invariance(
            msg in prop::collection::vec(any::<u8>(), 0..600),
            cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
            algorithm in prop::sample::select(Algorithm::ALL.to_vec()),
        ) {
            let mut cuts: Vec<usize> = cuts.iter().map(|cut| cut.index(msg.len() + 1)).collect();
            cuts.sort_unstable();

            let mut hasher = Hasher::from_algorithm(algorithm);
            let mut start = 0;
            for cut in cuts.into_iter().chain([msg.len()]) {
                hasher.update(&msg[start..cut]);
                start = cut;
            }
            prop_assert_eq!(algorithm.hash(&msg), hasher.finalize());
        }
    }
}
