//! Known-answer self tests.
//!
//! Every algorithm is checked against published vectors and against itself
//! when the same message is fed to the streaming driver in random pieces.
use hex_literal::hex;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    hasher::Hasher,
    variant::{Algorithm, Sha3Variant, StreebogVariant},
};

struct KnownAnswer {
    check: &'static str,
    message: &'static [u8],
    digest: &'static [u8],
}

const LAZY_DOG: &[u8] = b"The quick brown fox jumps over the lazy dog";

/// FIPS 202 example message: 1600 bits of 0xa3.
const FIPS_1600: &[u8] = &[0xa3; 200];

/// GOST R 34.11-2012, Annex A, example 1.
const GOST_M1: &[u8] = b"012345678901234567890123456789012345678901234567890123456789012";

/// GOST R 34.11-2012, Annex A, example 2.
const GOST_M2: &[u8] = &hex!(
    "d1e520e2e5f2f0e82c20d1f2f0e8e1eee6e820e2edf3f6e82c20e2e5fef2fa20f120eceef0ff20f1f2f0"
    "e5ebe0ece820ede020f5f0e0e1f0fbff20efebfaeafb20c8e3eef0e5e2fb"
);

const SHA3_256: &[KnownAnswer] = &[
    KnownAnswer {
        check: "empty message",
        message: b"",
        digest: &hex!("a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"),
    },
    KnownAnswer {
        check: "lazy dog",
        message: LAZY_DOG,
        digest: &hex!("69070dda01975c8c120c3aada1b282394e7f032fa9cf32f4cb2259a0897dfc04"),
    },
    KnownAnswer {
        check: "1600-bit message",
        message: FIPS_1600,
        digest: &hex!("79f38adec5c20307a98ef76e8324afbfd46cfd81b22e3973c65fa1bd9de31787"),
    },
];

const SHA3_384: &[KnownAnswer] = &[
    KnownAnswer {
        check: "empty message",
        message: b"",
        digest: &hex!(
            "0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2a"
            "c3713831264adb47fb6bd1e058d5f004"
        ),
    },
    KnownAnswer {
        check: "lazy dog",
        message: LAZY_DOG,
        digest: &hex!(
            "7063465e08a93bce31cd89d2e3ca8f602498696e253592ed26f07bf7e703cf32"
            "8581e1471a7ba7ab119b1a9ebdf8be41"
        ),
    },
    KnownAnswer {
        check: "1600-bit message",
        message: FIPS_1600,
        digest: &hex!(
            "1881de2ca7e41ef95dc4732b8f5f002b189cc1e42b74168ed1732649ce1dbcdd"
            "76197a31fd55ee989f2d7050dd473e8f"
        ),
    },
];

const SHA3_512: &[KnownAnswer] = &[
    KnownAnswer {
        check: "empty message",
        message: b"",
        digest: &hex!(
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6"
            "15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        ),
    },
    KnownAnswer {
        check: "lazy dog",
        message: LAZY_DOG,
        digest: &hex!(
            "01dedd5de4ef14642445ba5f5b97c15e47b9ad931326e4b0727cd94cefc44fff"
            "23f07bf543139939b49128caf436dc1bdee54fcb24023a08d9403f9b4bf0d450"
        ),
    },
    KnownAnswer {
        check: "1600-bit message",
        message: FIPS_1600,
        digest: &hex!(
            "e76dfad22084a8b1467fcf2ffa58361bec7628edf5f3fdc0e4805dc48caeeca8"
            "1b7c13c30adf52a3659584739a2df46be589c51ca1a4a8416df6545a1ce8ba00"
        ),
    },
];

const STREEBOG_256: &[KnownAnswer] = &[
    KnownAnswer {
        check: "GOST example 1",
        message: GOST_M1,
        digest: &hex!("9d151eefd8590b89daa6ba6cb74af9275dd051026bb149a452fd84e5e57b5500"),
    },
    KnownAnswer {
        check: "GOST example 2",
        message: GOST_M2,
        digest: &hex!("9dd2fe4e90409e5da87f53976d7405b0c0cac628fc669a741d50063c557e8f50"),
    },
    KnownAnswer {
        check: "lazy dog",
        message: LAZY_DOG,
        digest: &hex!("3e7dea7f2384b6c5a3d0e24aaa29c05e89ddd762145030ec22c71a6db8b2c1f4"),
    },
    KnownAnswer {
        check: "lazy dog with period",
        message: b"The quick brown fox jumps over the lazy dog.",
        digest: &hex!("36816a824dcbe7d6171aa58500741f2ea2757ae2e1784ab72c5c3c6c198d71da"),
    },
    KnownAnswer {
        check: "empty message",
        message: b"",
        digest: &hex!("3f539a213e97c802cc229d474c6aa32a825a360b2a933a949fd925208d9ce1bb"),
    },
];

const STREEBOG_512: &[KnownAnswer] = &[
    KnownAnswer {
        check: "GOST example 1",
        message: GOST_M1,
        digest: &hex!(
            "1b54d01a4af5b9d5cc3d86d68d285462b19abc2475222f35c085122be4ba1ffa"
            "00ad30f8767b3a82384c6574f024c311e2a481332b08ef7f41797891c1646f48"
        ),
    },
    KnownAnswer {
        check: "GOST example 2",
        message: GOST_M2,
        digest: &hex!(
            "1e88e62226bfca6f9994f1f2d51569e0daf8475a3b0fe61a5300eee46d961376"
            "035fe83549ada2b8620fcd7c496ce5b33f0cb9dddc2b6460143b03dabac9fb28"
        ),
    },
    KnownAnswer {
        check: "empty message",
        message: b"",
        digest: &hex!(
            "8e945da209aa869f0455928529bcae4679e9873ab707b55315f56ceb98bef0a7"
            "362f715528356ee83cda5f2aac4c6ad2ba3a715c1bcd81cb8e9f90bf4c1c1a8a"
        ),
    },
];

/// Length of the message hashed piecewise by the random walk check.
const RANDOM_WALK_LEN: usize = 512;

fn known_answers(algorithm: Algorithm) -> &'static [KnownAnswer] {
    match algorithm {
        Algorithm::Sha3(Sha3Variant::Sha3_256) => SHA3_256,
        Algorithm::Sha3(Sha3Variant::Sha3_384) => SHA3_384,
        Algorithm::Sha3(Sha3Variant::Sha3_512) => SHA3_512,
        Algorithm::Streebog(StreebogVariant::Streebog256) => STREEBOG_256,
        Algorithm::Streebog(StreebogVariant::Streebog512) => STREEBOG_512,
    }
}

/// Deterministic byte source for the random walk.
struct Lcg(u64);

impl Lcg {
    fn next_byte(&mut self) -> u8 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 56) as u8
    }
}

/// Hash a pseudo-random message at once and in pieces of 0 to 15 bytes.
fn random_walk(algorithm: Algorithm) -> bool {
    let mut rng = Lcg(0x5eed);
    let message: Vec<u8> = (0..RANDOM_WALK_LEN).map(|_| rng.next_byte()).collect();
    let expected = algorithm.hash(&message);

    let mut hasher = Hasher::from_algorithm(algorithm);
    let mut rest = message.as_slice();
    let mut steps = 0;
    while !rest.is_empty() {
        let len = usize::from(rng.next_byte() % 16).min(rest.len());
        let (piece, tail) = rest.split_at(len);
        hasher.update(piece);
        rest = tail;
        steps += 1;
    }
    debug!(%algorithm, steps, "random walk done");
    hasher.finalize() == expected
}

fn verify(algorithm: Algorithm, check: &'static str, passed: bool) -> Result<()> {
    if passed {
        debug!(%algorithm, check, "self test check passed");
        Ok(())
    } else {
        let err = Error::SelfTestFailed { algorithm, check };
        warn!(%err, "self test check failed");
        Err(err)
    }
}

/// Run all known-answer checks of `algorithm`, stopping at the first failure.
pub fn run(algorithm: Algorithm) -> Result<()> {
    for answer in known_answers(algorithm) {
        let passed = algorithm.hash(answer.message) == answer.digest;
        verify(algorithm, answer.check, passed)?;
    }
    verify(algorithm, "random walk", random_walk(algorithm))
}

/// Run the self tests of every supported algorithm.
pub fn run_all() -> Result<()> {
    Algorithm::ALL.into_iter().try_for_each(run)
}
