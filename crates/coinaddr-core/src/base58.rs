//! Base58Check codec
//!
//! Payload followed by the first four bytes of its double SHA-256, rendered in
//! the Bitcoin Base58 alphabet. Leading zero bytes become leading `1`s.

use crate::hash::sha256d;
use crate::{Error, Result};
use zeroize::Zeroizing;

/// Checksum length in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Base58Check-encode a payload
///
/// The payload may be key material, so the checksummed copy is wiped on drop.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Zeroizing::new(Vec::with_capacity(payload.len() + CHECKSUM_LEN));
    data.extend_from_slice(payload);
    data.extend_from_slice(&sha256d(payload)[..CHECKSUM_LEN]);
    bs58::encode(data.as_slice()).into_string()
}

/// Base58Check-decode text into its payload
pub fn decode_check(text: &str) -> Result<Vec<u8>> {
    let data = Zeroizing::new(
        bs58::decode(text)
            .into_vec()
            .map_err(|e| Error::DecodeMalformed(format!("Base58 decode failed: {e}")))?,
    );

    if data.len() < CHECKSUM_LEN {
        return Err(Error::DecodeMalformed(format!(
            "Base58Check payload is {} bytes, shorter than its checksum",
            data.len()
        )));
    }

    let split = data.len() - CHECKSUM_LEN;
    let expected = sha256d(&data[..split]);
    if data[split..] != expected[..CHECKSUM_LEN] {
        return Err(Error::DecodeMalformed(
            "Base58Check checksum mismatch".to_string(),
        ));
    }

    Ok(data[..split].to_vec())
}
