//! CashAddr codec
//!
//! `prefix:payload` where the payload is the version byte and hash in 5-bit
//! groups followed by an 8-character (40-bit) polymod checksum computed over
//! the prefix. The version byte packs `type_code << 3 | size_code`, with the
//! top bit reserved as zero.
//!
//! Only the character table is shared with Bech32 (via [`Fe32`]); bit packing,
//! padding rules, prefix expansion and checksum are specific to CashAddr.

use crate::{Error, Result};
use bech32::Fe32;

/// Number of 5-bit checksum groups
const CHECKSUM_LEN: usize = 8;

/// Largest type code that fits in the version byte
pub const MAX_TYPE_CODE: u8 = 0x0f;

/// Payload lengths indexed by size code
const PAYLOAD_SIZES: [usize; 8] = [20, 24, 28, 32, 40, 48, 56, 64];

const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

fn size_code(len: usize) -> Option<u8> {
    PAYLOAD_SIZES
        .iter()
        .position(|&size| size == len)
        .map(|code| code as u8)
}

/// Pack bytes into 5-bit groups, zero-padding the final group.
fn bytes_to_groups(data: &[u8]) -> Vec<u8> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut groups = Vec::with_capacity(data.len() * 8 / 5 + 1);

    for &byte in data {
        acc = ((acc << 8) | byte as u32) & 0xfff;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            groups.push(((acc >> bits) & 0x1f) as u8);
        }
    }
    if bits > 0 {
        groups.push(((acc << (5 - bits)) & 0x1f) as u8);
    }

    groups
}

/// Unpack 5-bit groups into bytes. Leftover bits must be fewer than five and zero.
fn groups_to_bytes(groups: &[u8]) -> Result<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut bytes = Vec::with_capacity(groups.len() * 5 / 8);

    for &group in groups {
        acc = ((acc << 5) | group as u32) & 0xfff;
        bits += 5;
        while bits >= 8 {
            bits -= 8;
            bytes.push(((acc >> bits) & 0xff) as u8);
        }
    }

    if bits >= 5 || (acc & ((1 << bits) - 1)) != 0 {
        return Err(Error::DecodeMalformed(
            "CashAddr payload has invalid padding".to_string(),
        ));
    }

    Ok(bytes)
}

/// Lower five bits of every prefix character, then a zero separator.
fn expand_prefix(prefix: &str) -> Vec<u8> {
    let mut expanded: Vec<u8> = prefix.bytes().map(|b| b & 0x1f).collect();
    expanded.push(0);
    expanded
}

fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        for (i, generator) in GENERATORS.iter().enumerate() {
            if c0 & (1 << i) != 0 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// CashAddr-encode a payload under `prefix` with the given type code
pub fn encode(prefix: &str, type_code: u8, payload: &[u8]) -> Result<String> {
    if type_code > MAX_TYPE_CODE {
        return Err(Error::UnrecognizedVariantCode(format!(
            "CashAddr type code {type_code} does not fit the version byte"
        )));
    }
    let size = size_code(payload.len()).ok_or_else(|| {
        Error::DecodeMalformed(format!(
            "CashAddr cannot carry a {}-byte payload",
            payload.len()
        ))
    })?;

    let mut versioned = Vec::with_capacity(payload.len() + 1);
    versioned.push((type_code << 3) | size);
    versioned.extend_from_slice(payload);
    let groups = bytes_to_groups(&versioned);

    let mut checked = expand_prefix(prefix);
    checked.extend_from_slice(&groups);
    checked.extend_from_slice(&[0; CHECKSUM_LEN]);
    let checksum = polymod(&checked);

    let mut text = String::with_capacity(prefix.len() + 1 + groups.len() + CHECKSUM_LEN);
    text.push_str(prefix);
    text.push(':');
    let checksum_groups =
        (0..CHECKSUM_LEN).map(|i| ((checksum >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8);
    for group in groups.into_iter().chain(checksum_groups) {
        let fe = Fe32::try_from(group)
            .map_err(|_| Error::DecodeMalformed("invalid 5-bit value".to_string()))?;
        text.push(fe.to_char());
    }

    Ok(text)
}

/// CashAddr-decode text expected under `prefix`, returning `(type_code, payload)`
///
/// The `prefix:` part may be omitted, in which case `prefix` is implied.
pub fn decode(prefix: &str, text: &str) -> Result<(u8, Vec<u8>)> {
    let has_lower = text.chars().any(|c| c.is_lowercase());
    let has_upper = text.chars().any(|c| c.is_uppercase());
    if has_lower && has_upper {
        return Err(Error::DecodeMalformed(
            "CashAddr string is mixed case".to_string(),
        ));
    }
    let text = text.to_lowercase();

    let (found_prefix, data) = match text.split_once(':') {
        Some((p, rest)) => (p, rest),
        None => (prefix, text.as_str()),
    };
    if found_prefix != prefix {
        return Err(Error::DecodeMalformed(format!(
            "CashAddr prefix mismatch: expected {prefix}, got {found_prefix}"
        )));
    }

    let groups = data
        .chars()
        .map(|c| {
            Fe32::from_char(c)
                .map(Fe32::to_u8)
                .map_err(|_| Error::DecodeMalformed(format!("invalid CashAddr character {c:?}")))
        })
        .collect::<Result<Vec<u8>>>()?;
    if groups.len() <= CHECKSUM_LEN {
        return Err(Error::DecodeMalformed("CashAddr string too short".to_string()));
    }

    let mut checked = expand_prefix(prefix);
    checked.extend_from_slice(&groups);
    if polymod(&checked) != 0 {
        return Err(Error::DecodeMalformed("CashAddr checksum mismatch".to_string()));
    }

    let bytes = groups_to_bytes(&groups[..groups.len() - CHECKSUM_LEN])?;
    let (&version, payload) = bytes
        .split_first()
        .ok_or_else(|| Error::DecodeMalformed("CashAddr payload is empty".to_string()))?;

    if version & 0x80 != 0 {
        return Err(Error::DecodeMalformed(
            "CashAddr version byte has reserved bit set".to_string(),
        ));
    }
    let expected_len = PAYLOAD_SIZES[(version & 0x07) as usize];
    if payload.len() != expected_len {
        return Err(Error::DecodeMalformed(format!(
            "CashAddr payload is {} bytes, version byte declares {}",
            payload.len(),
            expected_len
        )));
    }

    Ok(((version >> 3) & MAX_TYPE_CODE, payload.to_vec()))
}
