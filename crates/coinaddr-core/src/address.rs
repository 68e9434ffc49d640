//! Address model and text codec
//!
//! An [`Address`] is one of four fixed-width hash variants tied to a borrowed
//! [`Network`] profile. The network decides which text encoding applies:
//!
//! - pubkey-hash and script-hash use CashAddr when the network has a CashAddr
//!   prefix and Base58Check otherwise;
//! - witness variants use Bech32 segwit (version 0) and require a Bech32 HRP.
//!
//! Decoding tries CashAddr, then segwit, then Base58Check, and returns the
//! first variant that decodes cleanly.
//!
//! # Equality and ordering
//!
//! Equality compares variant, hash bytes and network. Ordering compares only
//! the raw hash bytes, so a `PubKeyHash` and a `ScriptHash` over the same
//! 20 bytes are unequal yet `cmp` returns `Ordering::Equal`.
//!
//! Sorted containers see such pairs differently depending on how they are
//! filled. `BTreeSet::insert` and `BTreeMap::insert` locate keys by `cmp`, so
//! the second address finds the first one's slot and is not added.
//! `BTreeSet::from_iter` (and `collect`) sorts first and then drops adjacent
//! items only when they are `==`, so both addresses are kept.

use crate::hash::{hash160, sha256};
use crate::{base58, cashaddr, segwit, Error, Result};
use coinaddr_params::Network;
use serde::de::{DeserializeSeed, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Displayed in place of an address that the network cannot encode
pub const INVALID_ADDRESS: &str = "<invalid address>";

/// CashAddr type code for pubkey-hash payloads
const CASHADDR_PUBKEY_TYPE: u8 = 0;
/// CashAddr type code for script-hash payloads
const CASHADDR_SCRIPT_TYPE: u8 = 1;
/// The only witness version mapped to an address variant
const WITNESS_VERSION_0: u8 = 0;

/// The different types of addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressType {
    /// Pay to pubkey hash
    P2pkh,
    /// Pay to script hash
    P2sh,
    /// Pay to witness pubkey hash
    P2wpkh,
    /// Pay to witness script hash
    P2wsh,
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AddressType::P2pkh => "p2pkh",
            AddressType::P2sh => "p2sh",
            AddressType::P2wpkh => "p2wpkh",
            AddressType::P2wsh => "p2wsh",
        })
    }
}

impl FromStr for AddressType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "p2pkh" => Ok(AddressType::P2pkh),
            "p2sh" => Ok(AddressType::P2sh),
            "p2wpkh" => Ok(AddressType::P2wpkh),
            "p2wsh" => Ok(AddressType::P2wsh),
            _ => Err(Error::DecodeMalformed(format!("unknown address type {s:?}"))),
        }
    }
}

/// A payment address on some network
#[derive(Debug, Clone, Copy)]
pub enum Address<'n> {
    /// Pay to pubkey hash
    PubKeyHash {
        /// HASH160 of the public key
        hash160: [u8; 20],
        /// Network the address belongs to
        network: &'n Network,
    },
    /// Pay to script hash
    ScriptHash {
        /// HASH160 of the redeem script
        hash160: [u8; 20],
        /// Network the address belongs to
        network: &'n Network,
    },
    /// Pay to witness pubkey hash
    WitnessPubKeyHash {
        /// HASH160 of the public key
        hash160: [u8; 20],
        /// Network the address belongs to
        network: &'n Network,
    },
    /// Pay to witness script hash
    WitnessScriptHash {
        /// SHA256 of the witness script
        hash256: [u8; 32],
        /// Network the address belongs to
        network: &'n Network,
    },
}

impl<'n> Address<'n> {
    /// Pay-to-pubkey-hash address of a serialized public key
    pub fn p2pkh(network: &'n Network, pubkey: &[u8]) -> Self {
        Address::PubKeyHash {
            hash160: hash160(pubkey),
            network,
        }
    }

    /// Pay-to-script-hash address of a redeem script
    pub fn p2sh(network: &'n Network, redeem_script: &[u8]) -> Self {
        Address::ScriptHash {
            hash160: hash160(redeem_script),
            network,
        }
    }

    /// Pay-to-witness-pubkey-hash address of a serialized public key
    pub fn p2wpkh(network: &'n Network, pubkey: &[u8]) -> Self {
        Address::WitnessPubKeyHash {
            hash160: hash160(pubkey),
            network,
        }
    }

    /// Pay-to-witness-script-hash address of a witness script
    pub fn p2wsh(network: &'n Network, witness_script: &[u8]) -> Self {
        Address::WitnessScriptHash {
            hash256: sha256(witness_script),
            network,
        }
    }

    /// Network the address belongs to
    pub fn network(&self) -> &'n Network {
        match *self {
            Address::PubKeyHash { network, .. }
            | Address::ScriptHash { network, .. }
            | Address::WitnessPubKeyHash { network, .. }
            | Address::WitnessScriptHash { network, .. } => network,
        }
    }

    /// Kind of address
    pub fn address_type(&self) -> AddressType {
        match self {
            Address::PubKeyHash { .. } => AddressType::P2pkh,
            Address::ScriptHash { .. } => AddressType::P2sh,
            Address::WitnessPubKeyHash { .. } => AddressType::P2wpkh,
            Address::WitnessScriptHash { .. } => AddressType::P2wsh,
        }
    }

    /// Raw hash payload (20 or 32 bytes)
    pub fn hash_bytes(&self) -> &[u8] {
        match self {
            Address::PubKeyHash { hash160, .. }
            | Address::ScriptHash { hash160, .. }
            | Address::WitnessPubKeyHash { hash160, .. } => &hash160[..],
            Address::WitnessScriptHash { hash256, .. } => &hash256[..],
        }
    }

    /// Canonical text form under the address's network
    ///
    /// Fails with [`Error::ConfigurationUnsupported`] when the network cannot
    /// express this variant (a witness address on a network without an HRP).
    pub fn encode(&self) -> Result<String> {
        match *self {
            Address::PubKeyHash {
                ref hash160,
                network,
            } => encode_legacy(
                network,
                network.pubkey_hash_prefix,
                CASHADDR_PUBKEY_TYPE,
                hash160,
            ),
            Address::ScriptHash {
                ref hash160,
                network,
            } => encode_legacy(
                network,
                network.script_hash_prefix,
                CASHADDR_SCRIPT_TYPE,
                hash160,
            ),
            Address::WitnessPubKeyHash {
                ref hash160,
                network,
            } => encode_witness(network, hash160),
            Address::WitnessScriptHash {
                ref hash256,
                network,
            } => encode_witness(network, hash256),
        }
    }

    /// Recover the address that `text` denotes under `network`
    pub fn decode(network: &'n Network, text: &str) -> Result<Self> {
        let strategies: [(&str, fn(&'n Network, &str) -> Result<Address<'n>>); 3] = [
            ("cashaddr", decode_cashaddr),
            ("segwit", decode_segwit),
            ("base58check", decode_base58),
        ];

        let mut failure: Option<Error> = None;
        for (name, strategy) in strategies {
            match strategy(network, text) {
                Ok(address) => {
                    tracing::debug!(
                        "Decoded {} address on {} via {}",
                        address.address_type(),
                        network.name,
                        name
                    );
                    return Ok(address);
                }
                Err(e) => {
                    tracing::trace!("{} decode on {} fell through: {}", name, network.name, e);
                    failure = match failure {
                        Some(prev @ Error::UnrecognizedVariantCode(_)) => Some(prev),
                        _ => Some(e),
                    };
                }
            }
        }

        Err(failure.unwrap_or_else(|| {
            Error::DecodeMalformed(format!("not an address on {}", network.name))
        }))
    }
}

fn encode_legacy(
    network: &Network,
    prefix: u8,
    cashaddr_type: u8,
    hash: &[u8; 20],
) -> Result<String> {
    match network.cashaddr_prefix() {
        Some(cashaddr_prefix) => cashaddr::encode(cashaddr_prefix, cashaddr_type, hash),
        None => {
            let mut prefixed = [0u8; 21];
            prefixed[0] = prefix;
            prefixed[1..].copy_from_slice(hash);
            Ok(base58::encode_check(&prefixed))
        }
    }
}

fn encode_witness(network: &Network, program: &[u8]) -> Result<String> {
    let hrp = network.bech32_hrp().ok_or_else(|| {
        Error::ConfigurationUnsupported(format!(
            "{} has no Bech32 prefix for witness addresses",
            network.name
        ))
    })?;
    segwit::encode(hrp, WITNESS_VERSION_0, program)
}

fn fixed_width<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        Error::DecodeMalformed(format!("expected a {}-byte hash, got {} bytes", N, bytes.len()))
    })
}

fn decode_cashaddr<'n>(network: &'n Network, text: &str) -> Result<Address<'n>> {
    let prefix = network.cashaddr_prefix().ok_or_else(|| {
        Error::ConfigurationUnsupported(format!("{} has no CashAddr prefix", network.name))
    })?;
    let (type_code, payload) = cashaddr::decode(prefix, text)?;

    match type_code {
        CASHADDR_PUBKEY_TYPE => Ok(Address::PubKeyHash {
            hash160: fixed_width(&payload)?,
            network,
        }),
        CASHADDR_SCRIPT_TYPE => Ok(Address::ScriptHash {
            hash160: fixed_width(&payload)?,
            network,
        }),
        other => Err(Error::UnrecognizedVariantCode(format!(
            "CashAddr type code {other}"
        ))),
    }
}

fn decode_segwit<'n>(network: &'n Network, text: &str) -> Result<Address<'n>> {
    let hrp = network.bech32_hrp().ok_or_else(|| {
        Error::ConfigurationUnsupported(format!("{} has no Bech32 prefix", network.name))
    })?;
    let (version, program) = segwit::decode(hrp, text)?;

    if version != WITNESS_VERSION_0 {
        return Err(Error::UnrecognizedVariantCode(format!(
            "witness version {version}"
        )));
    }

    match program.len() {
        20 => Ok(Address::WitnessPubKeyHash {
            hash160: fixed_width(&program)?,
            network,
        }),
        32 => Ok(Address::WitnessScriptHash {
            hash256: fixed_width(&program)?,
            network,
        }),
        len => Err(Error::DecodeMalformed(format!(
            "witness v0 program of {len} bytes"
        ))),
    }
}

fn decode_base58<'n>(network: &'n Network, text: &str) -> Result<Address<'n>> {
    let data = base58::decode_check(text)?;
    let (&prefix, hash) = data
        .split_first()
        .ok_or_else(|| Error::DecodeMalformed("empty Base58Check payload".to_string()))?;

    if prefix == network.pubkey_hash_prefix {
        Ok(Address::PubKeyHash {
            hash160: fixed_width(hash)?,
            network,
        })
    } else if prefix == network.script_hash_prefix {
        Ok(Address::ScriptHash {
            hash160: fixed_width(hash)?,
            network,
        })
    } else {
        Err(Error::DecodeMalformed(format!(
            "Base58 prefix 0x{prefix:02x} is not an address prefix on {}",
            network.name
        )))
    }
}

impl PartialEq for Address<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.address_type() == other.address_type()
            && self.hash_bytes() == other.hash_bytes()
            && self.network() == other.network()
    }
}

impl Eq for Address<'_> {}

impl Hash for Address<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address_type().hash(state);
        self.hash_bytes().hash(state);
        self.network().hash(state);
    }
}

/// Orders by hash bytes alone; see the module docs.
impl PartialOrd for Address<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hash_bytes().cmp(other.hash_bytes())
    }
}

impl fmt::Display for Address<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encode() {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str(INVALID_ADDRESS),
        }
    }
}

impl Serialize for Address<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let text = self.encode().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

/// Deserializes an [`Address`] from its text form under a fixed network
#[derive(Debug, Clone, Copy)]
pub struct AddressSeed<'n> {
    /// Network to decode against
    pub network: &'n Network,
}

impl<'n> AddressSeed<'n> {
    /// Create a seed for `network`
    pub fn new(network: &'n Network) -> Self {
        Self { network }
    }
}

impl<'de, 'n> DeserializeSeed<'de> for AddressSeed<'n> {
    type Value = Address<'n>;

    fn deserialize<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> std::result::Result<Self::Value, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::decode(self.network, &text).map_err(serde::de::Error::custom)
    }
}

/// Text form of an address
pub fn address_to_text(address: &Address<'_>) -> Result<String> {
    address.encode()
}

/// Parse an address under `network`
pub fn text_to_address<'n>(network: &'n Network, text: &str) -> Result<Address<'n>> {
    Address::decode(network, text)
}

/// Pay-to-pubkey-hash address of a serialized public key
pub fn pubkey_to_address<'n>(network: &'n Network, pubkey: &[u8]) -> Address<'n> {
    Address::p2pkh(network, pubkey)
}
