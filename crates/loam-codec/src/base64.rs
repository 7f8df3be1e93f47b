//! RFC 4648 base64 over region allocations.
//!
//! Standard alphabet, `=` padding. Encoding is infallible; decoding is the
//! one recoverable operation in loam and reports the first byte outside
//! the alphabet or padding set.

use loam_region::Region;

use crate::error::CodecError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode `data`, returning a region-allocated string of
/// `4 * ceil(len / 3)` characters.
///
/// Empty input encodes to the empty string.
pub fn base64_encode<'r>(region: &'r Region<'_>, data: &[u8]) -> &'r str {
    if data.is_empty() {
        return "";
    }
    let encoded_len = 4 * data.len().div_ceil(3);
    let out = region.alloc(encoded_len);
    for (chunk, quad) in data.chunks(3).zip(out.chunks_mut(4)) {
        let b0 = chunk[0] as u32;
        let b1 = *chunk.get(1).unwrap_or(&0) as u32;
        let b2 = *chunk.get(2).unwrap_or(&0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;
        quad[0] = ALPHABET[(triple >> 18) as usize & 0x3F];
        quad[1] = ALPHABET[(triple >> 12) as usize & 0x3F];
        quad[2] = if chunk.len() > 1 {
            ALPHABET[(triple >> 6) as usize & 0x3F]
        } else {
            b'='
        };
        quad[3] = if chunk.len() > 2 {
            ALPHABET[triple as usize & 0x3F]
        } else {
            b'='
        };
    }
    std::str::from_utf8(out).expect("base64 output is ASCII")
}

/// Decode `text` into region-allocated bytes.
///
/// Trailing `=` padding shortens the output by one byte each; the empty
/// string decodes to a zero-length slice. Any byte outside the alphabet
/// and padding set fails with [`CodecError::InvalidBase64`].
pub fn base64_decode<'r>(region: &'r Region<'_>, text: &str) -> Result<&'r [u8], CodecError> {
    if text.is_empty() {
        return Ok(&[]);
    }
    let bytes = text.as_bytes();
    let pad = bytes
        .iter()
        .rev()
        .take(2)
        .take_while(|&&b| b == b'=')
        .count();

    let out = region.alloc(3 * bytes.len().div_ceil(4));
    let mut written = 0usize;
    for (group, chunk) in bytes.chunks(4).enumerate() {
        let mut triple = 0u32;
        let mut shift = 18i32;
        for (k, &byte) in chunk.iter().enumerate() {
            let value = if byte == b'=' {
                0
            } else {
                match sextet(byte) {
                    Some(value) => value,
                    None => {
                        return Err(CodecError::InvalidBase64 {
                            byte,
                            position: group * 4 + k,
                        })
                    }
                }
            };
            triple |= (value as u32) << shift;
            shift -= 6;
        }
        out[written] = (triple >> 16) as u8;
        out[written + 1] = (triple >> 8) as u8;
        out[written + 2] = triple as u8;
        written += 3;
    }
    Ok(&out[..written - pad])
}

fn sextet(byte: u8) -> Option<u8> {
    match byte {
        b'A'..=b'Z' => Some(byte - b'A'),
        b'a'..=b'z' => Some(byte - b'a' + 26),
        b'0'..=b'9' => Some(byte - b'0' + 52),
        b'+' => Some(62),
        b'/' => Some(63),
        _ => None,
    }
}
