//! Streaming contract shared by all engines.
use tracing::warn;

use crate::{
    sponge::Sha3Context,
    streebog::StreebogContext,
    variant::{Algorithm, StreebogVariant},
};

/// An iterated compression engine as driven by [`crate::Hasher`].
///
/// The methods of this trait have preconditions instead of error returns; the
/// driver upholds them. Code handing raw input to an engine should use the
/// checked `update` and `finalize` of [`Sha3Context`] and [`StreebogContext`].
pub trait Engine {
    /// Number of bytes the engine consumes per compression.
    fn block_size(&self) -> usize;

    /// Natural digest size in bytes.
    fn digest_size(&self) -> usize;

    /// Absorb `blocks`, whose length is a multiple of [`Engine::block_size`].
    fn absorb_blocks(&mut self, blocks: &[u8]);

    /// Absorb `tail`, shorter than [`Engine::block_size`], and write at most
    /// `min(out.len(), digest size)` bytes of the digest into `out`.
    ///
    /// Returns the number of bytes written. The engine must be cleaned before
    /// it is used again; a SHA-3 engine finished a second time writes nothing
    /// and returns 0.
    fn finish(&mut self, tail: &[u8], out: &mut [u8]) -> usize;

    /// Reset to the freshly created state of the bound variant.
    fn clean(&mut self);
}

impl Engine for Sha3Context {
    fn block_size(&self) -> usize {
        self.variant().rate()
    }

    fn digest_size(&self) -> usize {
        self.variant().digest_size()
    }

    fn absorb_blocks(&mut self, blocks: &[u8]) {
        if self.is_finalized() {
            warn!(bits = self.variant().bits(), "absorb into a finalized SHA-3 engine ignored");
            return;
        }
        self.absorb(blocks);
    }

    fn finish(&mut self, tail: &[u8], out: &mut [u8]) -> usize {
        if self.is_finalized() {
            warn!(bits = self.variant().bits(), "SHA-3 engine already finished");
            return 0;
        }
        self.absorb(tail);
        self.squeeze(out)
    }

    fn clean(&mut self) {
        Sha3Context::clean(self);
    }
}

impl Engine for StreebogContext {
    fn block_size(&self) -> usize {
        StreebogVariant::BLOCK_SIZE
    }

    fn digest_size(&self) -> usize {
        self.variant().digest_size()
    }

    fn absorb_blocks(&mut self, blocks: &[u8]) {
        let (blocks, rest) = blocks.as_chunks();
        debug_assert!(rest.is_empty());
        self.compress_blocks(blocks);
    }

    fn finish(&mut self, tail: &[u8], out: &mut [u8]) -> usize {
        StreebogContext::finish(self, tail, out)
    }

    fn clean(&mut self) {
        StreebogContext::clean(self);
    }
}

/// Engine selected at run time from an [`Algorithm`].
///
/// Finishing a SHA-3 engine twice without [`Engine::clean`] in between writes
/// nothing. A Streebog engine finishes on a copy and yields the same digest
/// again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyEngine {
    Sha3(Sha3Context),
    Streebog(StreebogContext),
}

impl AnyEngine {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Sha3(variant) => Self::Sha3(Sha3Context::new(variant)),
            Algorithm::Streebog(variant) => Self::Streebog(StreebogContext::new(variant)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Sha3(ctx) => Algorithm::Sha3(ctx.variant()),
            Self::Streebog(ctx) => Algorithm::Streebog(ctx.variant()),
        }
    }
}

impl From<Algorithm> for AnyEngine {
    fn from(algorithm: Algorithm) -> Self {
        Self::new(algorithm)
    }
}

impl Engine for AnyEngine {
    fn block_size(&self) -> usize {
        self.algorithm().block_size()
    }

    fn digest_size(&self) -> usize {
        self.algorithm().digest_size()
    }

    fn absorb_blocks(&mut self, blocks: &[u8]) {
        match self {
            Self::Sha3(ctx) => ctx.absorb_blocks(blocks),
            Self::Streebog(ctx) => ctx.absorb_blocks(blocks),
        }
    }

    fn finish(&mut self, tail: &[u8], out: &mut [u8]) -> usize {
        match self {
            Self::Sha3(ctx) => ctx.finish(tail, out),
            Self::Streebog(ctx) => Engine::finish(ctx, tail, out),
        }
    }

    fn clean(&mut self) {
        match self {
            Self::Sha3(ctx) => ctx.clean(),
            Self::Streebog(ctx) => ctx.clean(),
        }
    }
}
