//! Typed hashers implementing the RustCrypto [`digest`] traits.
//!
//! Each type is a thin wrapper around [`Hasher`] bound to one variant, so the
//! blanket [`digest::Digest`] implementation applies.
use std::fmt;

use digest::{
    FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update,
    consts::{U32, U48, U64, U72, U104, U136},
    core_api::{AlgorithmName, BlockSizeUser},
};

use crate::{
    hasher::Hasher,
    sponge::Sha3Context,
    streebog::StreebogContext,
    variant::{Sha3Variant, StreebogVariant},
};

macro_rules! impl_digest {
    (
        $(#[$meta:meta])*
        $name:ident, $engine:ty, $variant:expr, $name_str:literal, $block_size:ty, $output_size:ty
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(Hasher<$engine>);

        impl Default for $name {
            fn default() -> Self {
                Self(Hasher::new(<$engine>::new($variant)))
            }
        }

        impl HashMarker for $name {}

        impl BlockSizeUser for $name {
            type BlockSize = $block_size;
        }

        impl OutputSizeUser for $name {
            type OutputSize = $output_size;
        }

        impl Update for $name {
            fn update(&mut self, data: &[u8]) {
                self.0.update(data);
            }
        }

        impl FixedOutput for $name {
            fn finalize_into(mut self, out: &mut Output<Self>) {
                self.0.finalize_into(out);
            }
        }

        impl Reset for $name {
            fn reset(&mut self) {
                self.0.reset();
            }
        }

        impl FixedOutputReset for $name {
            fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
                // the driver resets itself after finalizing
                self.0.finalize_into(out);
            }
        }

        impl AlgorithmName for $name {
            fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($name_str)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), " { ... }"))
            }
        }
    };
}

impl_digest!(
    /// SHA3-256 as a [`digest::Digest`].
    Sha3_256, Sha3Context, Sha3Variant::Sha3_256, "SHA3-256", U136, U32
);
impl_digest!(
    /// SHA3-384 as a [`digest::Digest`].
    Sha3_384, Sha3Context, Sha3Variant::Sha3_384, "SHA3-384", U104, U48
);
impl_digest!(
    /// SHA3-512 as a [`digest::Digest`].
    Sha3_512, Sha3Context, Sha3Variant::Sha3_512, "SHA3-512", U72, U64
);
impl_digest!(
    /// Streebog-256 as a [`digest::Digest`].
    Streebog256, StreebogContext, StreebogVariant::Streebog256, "Streebog256", U64, U32
);
impl_digest!(
    /// Streebog-512 as a [`digest::Digest`].
    Streebog512, StreebogContext, StreebogVariant::Streebog512, "Streebog512", U64, U64
);
