//! Canonical byte order for all multi-byte words.
//!
//! Both engines serialize 64-bit words low byte first, on absorption and on
//! digest emission alike. Words are assembled from and split into bytes
//! explicitly, so the result never depends on the host byte order.

/// Load `N` little-endian words from exactly `8 * N` bytes.
#[inline(always)]
pub(crate) fn load_words<const N: usize>(bytes: &[u8]) -> [u64; N] {
    debug_assert_eq!(bytes.len(), 8 * N);
    let (chunks, _) = bytes.as_chunks::<8>();
    let mut words = [0; N];
    words
        .iter_mut()
        .zip(chunks)
        .for_each(|(word, chunk)| *word = u64::from_le_bytes(*chunk));
    words
}

/// Write as many little-endian bytes of `words` as fit into `out`.
///
/// Returns the number of bytes written, i.e. `min(out.len(), 8 * words.len())`.
#[inline(always)]
pub(crate) fn store_words(words: &[u64], out: &mut [u8]) -> usize {
    let len = out.len().min(8 * words.len());
    out[..len]
        .iter_mut()
        .enumerate()
        .for_each(|(i, byte)| *byte = (words[i / 8] >> (8 * (i % 8))) as u8);
    len
}
