//! KECCAK-f\[1600\] permutation.
//!
//! The 1600-bit state is held as 25 lanes of 64 bits, `A[x + 5 * y]` being the
//! lane at coordinates `x` and `y`. The state is only ever viewed as bytes when
//! the digest is squeezed out, see [`crate::endian`].
#![allow(non_snake_case)]

// Section and algorithm numbers in the docs below are those of FIPS 202,
// https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf

/// Rounds of KECCAK-f\[1600\], `12 + 2 * log2(64)`.
const ROUNDS: usize = 24;

/// Number of lanes in the state.
pub(crate) const LANES: usize = 25;

/// Lane of the state array containing w = 64 bits.
pub(crate) type Lane = u64;

/// KECCAK-f\[1600\], i.e. KECCAK-p\[1600, 24\] of Section 3.4.
pub(crate) fn keccakf_1600_permute(A: &mut [Lane; LANES]) {
    for round_constant in KECCAK_ROUND_CONSTANTS {
        theta(A);
        rho_pi(A);
        chi(A);
        iota(A, round_constant);
    }
}

/// 3.2.1 Algorithm 1: θ(A)
fn theta(A: &mut [Lane; LANES]) {
    // one parity lane per sheet x
    let parity: [Lane; 5] = std::array::from_fn(|x| (0..5).fold(0, |acc, y| acc ^ A[x + 5 * y]));
    for (i, lane) in A.iter_mut().enumerate() {
        let x = i % 5;
        *lane ^= parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
    }
}

/// Rotation offsets of Table 2, listed in the order in which [`rho_pi`] visits
/// the lanes.
const KECCAK_RHO_OFFSETS: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Destination lane of π for each step of [`rho_pi`].
const KECCAK_PI_LANES: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// 3.2.2 Algorithm 2: ρ(A) followed by 3.2.3 Algorithm 3: π(A)
///
/// π moves the lanes along a single cycle through all positions but (0, 0).
/// Walking that cycle starting at lane 1, each lane is rotated by its ρ offset
/// and dropped into its π destination, whose previous content is carried to
/// the next step. Lane (0, 0) is neither rotated nor moved.
fn rho_pi(A: &mut [Lane; LANES]) {
    let mut carried = A[1];
    for (&lane, &offset) in KECCAK_PI_LANES.iter().zip(&KECCAK_RHO_OFFSETS) {
        let next = A[lane];
        A[lane] = carried.rotate_left(offset);
        carried = next;
    }
}

/// 3.2.4 Algorithm 4: χ(A)
///
/// The only non-linear step: every lane is combined with the two lanes to its
/// right in the same row.
fn chi(A: &mut [Lane; LANES]) {
    for row in A.as_chunks_mut::<5>().0 {
        let old = *row;
        for x in 0..5 {
            row[x] = old[x] ^ (!old[(x + 1) % 5] & old[(x + 2) % 5]);
        }
    }
}

/// Round constants RC\[ir\] of Algorithm 5, one per round, as listed in the
/// KECCAK reference code.
const KECCAK_ROUND_CONSTANTS: [Lane; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// 3.2.5 Algorithm 6: ι(A, ir)
///
/// Breaks the symmetry of the rounds by touching lane (0, 0) only.
fn iota(A: &mut [Lane; LANES], round_constant: Lane) {
    A[0] ^= round_constant;
}

#[cfg(test)]
mod tests {
    use super::{LANES, Lane, keccakf_1600_permute, rho_pi};

    /// Table 2 in row-major order starting with x = 0, y = 0.
    const RHO_OFFSETS_BY_POSITION: [u32; 25] = [
        0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56,
        14,
    ];

    fn position(x: usize, y: usize) -> usize {
        x % 5 + 5 * (y % 5)
    }

    fn sample_state() -> [Lane; LANES] {
        let mut state = [0; LANES];
        let mut x: Lane = 0x0123456789abcdef;
        for lane in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            *lane = x;
        }
        state
    }

    #[test]
    fn rho_pi_matches_coordinate_definition() {
        let state = sample_state();

        let rotated: [Lane; LANES] =
            std::array::from_fn(|i| state[i].rotate_left(RHO_OFFSETS_BY_POSITION[i]));
        let mut expected = rotated;
        for (x, y) in (0..5).flat_map(|x| (0..5).map(move |y| (x, y))) {
            expected[position(y, 2 * x + 3 * y)] = rotated[position(x, y)];
        }

        let mut actual = state;
        rho_pi(&mut actual);
        assert_eq!(expected, actual);
    }

    #[test]
    fn permute_zero_state() {
        let mut state = [0; LANES];
        keccakf_1600_permute(&mut state);
        assert_eq!(state[0], 0xf1258f7940e1dde7);
        assert_eq!(state[1], 0x84d5ccf933c0478a);
        assert_eq!(state[24], 0xeaf1ff7b5ceca249);
    }
}
