//! Bech32 segwit codec for witness addresses

use crate::{Error, Result};
use bech32::{Fe32, Hrp};

/// Segwit-encode a witness program under `hrp` (lowercase output)
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String> {
    let hrp = Hrp::parse(hrp)
        .map_err(|e| Error::ConfigurationUnsupported(format!("invalid Bech32 HRP: {e}")))?;
    let version = Fe32::try_from(witness_version).map_err(|_| {
        Error::UnrecognizedVariantCode(format!("witness version {witness_version} out of range"))
    })?;

    bech32::segwit::encode(hrp, version, program)
        .map_err(|e| Error::DecodeMalformed(format!("segwit encode failed: {e}")))
}

/// Segwit-decode text expected under `hrp`, returning `(witness_version, program)`
pub fn decode(hrp: &str, text: &str) -> Result<(u8, Vec<u8>)> {
    let (found, version, program) = bech32::segwit::decode(text)
        .map_err(|e| Error::DecodeMalformed(format!("segwit decode failed: {e}")))?;

    let found = found.to_string();
    if !found.eq_ignore_ascii_case(hrp) {
        return Err(Error::DecodeMalformed(format!(
            "Bech32 HRP mismatch: expected {hrp}, got {found}"
        )));
    }

    Ok((version.to_u8(), program))
}
