use crate::{Error, Result};

/// Length of the canonical hyphenated form (`8-4-4-4-12`).
pub const CANONICAL_LEN: usize = 36;

/// Length of the unhyphenated form.
pub const SIMPLE_LEN: usize = 32;

/// Length of the binary form.
pub const BYTES_LEN: usize = 16;

const ALPHABET: &[u8; 16] = b"0123456789abcdef";
const NO_VALUE: u8 = 255;

/// Offsets of the group separators in the canonical form.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Lookup table for hex decoding, both cases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 16 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[c.to_ascii_uppercase() as usize] = i;
        }
        i += 1;
    }
    lut
};

/// Writes the canonical lowercase `8-4-4-4-12` form of `bytes` into `buf`.
pub fn encode_canonical(bytes: &[u8; BYTES_LEN], buf: &mut [u8; CANONICAL_LEN]) {
    let mut out = 0;
    for (i, &b) in bytes.iter().enumerate() {
        // a separator precedes bytes 4, 6, 8 and 10
        if matches!(i, 4 | 6 | 8 | 10) {
            buf[out] = b'-';
            out += 1;
        }
        buf[out] = ALPHABET[(b >> 4) as usize];
        buf[out + 1] = ALPHABET[(b & 0x0F) as usize];
        out += 2;
    }
}

/// Writes the 32-character unhyphenated lowercase form of `bytes` into the
/// front of `buf`.
pub fn encode_simple(bytes: &[u8; BYTES_LEN], buf: &mut [u8]) {
    for (pair, &b) in buf.chunks_exact_mut(2).zip(bytes) {
        pair[0] = ALPHABET[(b >> 4) as usize];
        pair[1] = ALPHABET[(b & 0x0F) as usize];
    }
}

/// Decodes either the 36-character hyphenated or the 32-character plain form
/// into big-endian bytes. Hex digits are case-insensitive; separators must
/// sit exactly at the canonical offsets.
///
/// This is a structural decode only. Protocol markers are not checked here.
pub fn decode(encoded: &str) -> Result<[u8; BYTES_LEN]> {
    let input = encoded.as_bytes();
    let hyphenated = match input.len() {
        CANONICAL_LEN => true,
        SIMPLE_LEN => false,
        len => return Err(Error::BadLength { len }),
    };

    let mut bytes = [0_u8; BYTES_LEN];
    let mut nibble = 0;
    for (index, &byte) in input.iter().enumerate() {
        if hyphenated && HYPHENS.contains(&index) {
            if byte != b'-' {
                return Err(Error::InvalidHex { byte, index });
            }
            continue;
        }
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Error::InvalidHex { byte, index });
        }
        if nibble % 2 == 0 {
            bytes[nibble / 2] = val << 4;
        } else {
            bytes[nibble / 2] |= val;
        }
        nibble += 1;
    }

    Ok(bytes)
}
