//! Streebog LPS transform.
//!
//! LPS applies, in order, the byte substitution S, the byte transposition P
//! and the linear map L over GF(2) to a 512-bit block. The three steps are
//! fused into eight lookup tables, one per input byte position, built at
//! compile time from the S-box and the matrix of L.

/// Byte substitution π of GOST R 34.11-2012, section 5.1.
pub(crate) const PI: [u8; 256] = [
    0xfc, 0xee, 0xdd, 0x11, 0xcf, 0x6e, 0x31, 0x16, 0xfb, 0xc4, 0xfa, 0xda, 0x23, 0xc5, 0x04, 0x4d,
    0xe9, 0x77, 0xf0, 0xdb, 0x93, 0x2e, 0x99, 0xba, 0x17, 0x36, 0xf1, 0xbb, 0x14, 0xcd, 0x5f, 0xc1,
    0xf9, 0x18, 0x65, 0x5a, 0xe2, 0x5c, 0xef, 0x21, 0x81, 0x1c, 0x3c, 0x42, 0x8b, 0x01, 0x8e, 0x4f,
    0x05, 0x84, 0x02, 0xae, 0xe3, 0x6a, 0x8f, 0xa0, 0x06, 0x0b, 0xed, 0x98, 0x7f, 0xd4, 0xd3, 0x1f,
    0xeb, 0x34, 0x2c, 0x51, 0xea, 0xc8, 0x48, 0xab, 0xf2, 0x2a, 0x68, 0xa2, 0xfd, 0x3a, 0xce, 0xcc,
    0xb5, 0x70, 0x0e, 0x56, 0x08, 0x0c, 0x76, 0x12, 0xbf, 0x72, 0x13, 0x47, 0x9c, 0xb7, 0x5d, 0x87,
    0x15, 0xa1, 0x96, 0x29, 0x10, 0x7b, 0x9a, 0xc7, 0xf3, 0x91, 0x78, 0x6f, 0x9d, 0x9e, 0xb2, 0xb1,
    0x32, 0x75, 0x19, 0x3d, 0xff, 0x35, 0x8a, 0x7e, 0x6d, 0x54, 0xc6, 0x80, 0xc3, 0xbd, 0x0d, 0x57,
    0xdf, 0xf5, 0x24, 0xa9, 0x3e, 0xa8, 0x43, 0xc9, 0xd7, 0x79, 0xd6, 0xf6, 0x7c, 0x22, 0xb9, 0x03,
    0xe0, 0x0f, 0xec, 0xde, 0x7a, 0x94, 0xb0, 0xbc, 0xdc, 0xe8, 0x28, 0x50, 0x4e, 0x33, 0x0a, 0x4a,
    0xa7, 0x97, 0x60, 0x73, 0x1e, 0x00, 0x62, 0x44, 0x1a, 0xb8, 0x38, 0x82, 0x64, 0x9f, 0x26, 0x41,
    0xad, 0x45, 0x46, 0x92, 0x27, 0x5e, 0x55, 0x2f, 0x8c, 0xa3, 0xa5, 0x7d, 0x69, 0xd5, 0x95, 0x3b,
    0x07, 0x58, 0xb3, 0x40, 0x86, 0xac, 0x1d, 0xf7, 0x30, 0x37, 0x6b, 0xe4, 0x88, 0xd9, 0xe7, 0x89,
    0xe1, 0x1b, 0x83, 0x49, 0x4c, 0x3f, 0xf8, 0xfe, 0x8d, 0x53, 0xaa, 0x90, 0xca, 0xd8, 0x85, 0x61,
    0x20, 0x71, 0x67, 0xa4, 0x2d, 0x2b, 0x09, 0x5b, 0xcb, 0x9b, 0x25, 0xd0, 0xbe, 0xe5, 0x6c, 0x52,
    0x59, 0xa6, 0x74, 0xd2, 0xe6, 0xf4, 0xb4, 0xc0, 0xd1, 0x66, 0xaf, 0xc2, 0x39, 0x4b, 0x63, 0xb6,
];

/// Matrix of the linear map L of GOST R 34.11-2012, section 5.4.
///
/// Row `k` is added to the result when bit `63 - k` of the input word is set.
pub(crate) const A: [u64; 64] = [
    0x8e20faa72ba0b470, 0x47107ddd9b505a38, 0xad08b0e0c3282d1c, 0xd8045870ef14980e,
    0x6c022c38f90a4c07, 0x3601161cf205268d, 0x1b8e0b0e798c13c8, 0x83478b07b2468764,
    0xa011d380818e8f40, 0x5086e740ce47c920, 0x2843fd2067adea10, 0x14aff010bdd87508,
    0x0ad97808d06cb404, 0x05e23c0468365a02, 0x8c711e02341b2d01, 0x46b60f011a83988e,
    0x90dab52a387ae76f, 0x486dd4151c3dfdb9, 0x24b86a840e90f0d2, 0x125c354207487869,
    0x092e94218d243cba, 0x8a174a9ec8121e5d, 0x4585254f64090fa0, 0xaccc9ca9328a8950,
    0x9d4df05d5f661451, 0xc0a878a0a1330aa6, 0x60543c50de970553, 0x302a1e286fc58ca7,
    0x18150f14b9ec46dd, 0x0c84890ad27623e0, 0x0642ca05693b9f70, 0x0321658cba93c138,
    0x86275df09ce8aaa8, 0x439da0784e745554, 0xafc0503c273aa42a, 0xd960281e9d1d5215,
    0xe230140fc0802984, 0x71180a8960409a42, 0xb60c05ca30204d21, 0x5b068c651810a89e,
    0x456c34887a3805b9, 0xac361a443d1c8cd2, 0x561b0d22900e4669, 0x2b838811480723ba,
    0x9bcf4486248d9f5d, 0xc3e9224312c8c1a0, 0xeffa11af0964ee50, 0xf97d86d98a327728,
    0xe4fa2054a80b329c, 0x727d102a548b194e, 0x39b008152acb8227, 0x9258048415eb419d,
    0x492c024284fbaec0, 0xaa16012142f35760, 0x550b8e9e21f7a530, 0xa48b474f9ef5dc18,
    0x70a6a56e2440598e, 0x3853dc371220a247, 0x1ca76e95091051ad, 0x0edd37c48a08a6d8,
    0x07e095624504536c, 0x8d70c431ac02a736, 0xc83862965601dd1b, 0x641c314b2b8ee083,
];

/// `LPS_TABLE[j][s]` is L applied to the word whose `j`-th byte (low byte
/// first) is `s` and whose other bytes are zero.
static LPS_TABLE: [[u64; 256]; 8] = expand_linear_map();

const fn expand_linear_map() -> [[u64; 256]; 8] {
    let mut table = [[0; 256]; 8];
    let mut j = 0;
    while j < 8 {
        let mut s = 0;
        while s < 256 {
            let mut acc = 0;
            let mut bit = 0;
            while bit < 8 {
                if (s >> bit) & 1 == 1 {
                    acc ^= A[63 - (8 * j + bit)];
                }
                bit += 1;
            }
            table[j][s] = acc;
            s += 1;
        }
        j += 1;
    }
    table
}

/// Apply LPS to a block of eight little-endian words.
///
/// P moves byte `i` of word `j` to byte `j` of word `i`, so output word `i`
/// collects byte `i` of every input word.
#[inline]
pub(crate) fn lps(block: &[u64; 8]) -> [u64; 8] {
    let mut result = [0; 8];
    for (i, word) in result.iter_mut().enumerate() {
        *word = block
            .iter()
            .zip(&LPS_TABLE)
            .fold(0, |acc, (input, table)| {
                let byte = (input >> (8 * i)) as u8;
                acc ^ table[usize::from(PI[usize::from(byte)])]
            });
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{A, PI, lps};

    /// S, P and L as three separate steps.
    fn lps_unfused(block: &[u64; 8]) -> [u64; 8] {
        let substituted = block.map(|word| {
            let bytes = word.to_le_bytes().map(|byte| PI[usize::from(byte)]);
            u64::from_le_bytes(bytes)
        });

        let mut transposed = [0_u64; 8];
        for (j, word) in substituted.iter().enumerate() {
            for (i, out) in transposed.iter_mut().enumerate() {
                *out |= ((word >> (8 * i)) & 0xff) << (8 * j);
            }
        }

        transposed.map(|word| {
            (0..64)
                .filter(|bit| (word >> bit) & 1 == 1)
                .fold(0, |acc, bit| acc ^ A[63 - bit])
        })
    }

    #[test]
    fn pi_is_a_permutation() {
        let mut seen = [false; 256];
        for &s in &PI {
            assert!(!seen[usize::from(s)], "{s:#04x} appears twice");
            seen[usize::from(s)] = true;
        }
    }

    #[test]
    fn fused_tables_match_separate_steps() {
        let mut block = [0_u64; 8];
        assert_eq!(lps_unfused(&block), lps(&block));

        let mut x = 0x9e3779b97f4a7c15_u64;
        for _ in 0..64 {
            for word in &mut block {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                *word = x;
            }
            assert_eq!(lps_unfused(&block), lps(&block));
        }
    }
}
