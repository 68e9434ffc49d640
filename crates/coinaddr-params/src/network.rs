//! Network profile definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Longest human-readable part a Bech32 string may carry.
const MAX_HRP_LEN: usize = 83;

/// Network profile
///
/// Immutable parameter bundle for one chain variant. The presence of
/// `cashaddr_prefix` switches the legacy pubkey-hash and script-hash variants
/// from Base58Check to CashAddr, and the presence of `bech32_hrp` enables the
/// witness variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network {
    /// Registry name
    pub name: Cow<'static, str>,
    /// Base58Check prefix byte for pay-to-pubkey-hash addresses
    pub pubkey_hash_prefix: u8,
    /// Base58Check prefix byte for pay-to-script-hash addresses
    pub script_hash_prefix: u8,
    /// WIF prefix byte for private keys
    pub secret_key_prefix: u8,
    /// CashAddr prefix (e.g. `bitcoincash`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashaddr_prefix: Option<Cow<'static, str>>,
    /// Bech32 human-readable part (e.g. `bc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bech32_hrp: Option<Cow<'static, str>>,
}

impl Network {
    /// Bitcoin mainnet
    pub const fn bitcoin() -> Self {
        Self {
            name: Cow::Borrowed("bitcoin"),
            pubkey_hash_prefix: 0x00,
            script_hash_prefix: 0x05,
            secret_key_prefix: 0x80,
            cashaddr_prefix: None,
            bech32_hrp: Some(Cow::Borrowed("bc")),
        }
    }

    /// Bitcoin testnet
    pub const fn bitcoin_testnet() -> Self {
        Self {
            name: Cow::Borrowed("bitcoin-testnet"),
            pubkey_hash_prefix: 0x6f,
            script_hash_prefix: 0xc4,
            secret_key_prefix: 0xef,
            cashaddr_prefix: None,
            bech32_hrp: Some(Cow::Borrowed("tb")),
        }
    }

    /// Bitcoin regtest (local development)
    pub const fn bitcoin_regtest() -> Self {
        Self {
            name: Cow::Borrowed("bitcoin-regtest"),
            pubkey_hash_prefix: 0x6f,
            script_hash_prefix: 0xc4,
            secret_key_prefix: 0xef,
            cashaddr_prefix: None,
            bech32_hrp: Some(Cow::Borrowed("bcrt")),
        }
    }

    /// Bitcoin Cash mainnet
    pub const fn bitcoin_cash() -> Self {
        Self {
            name: Cow::Borrowed("bitcoincash"),
            pubkey_hash_prefix: 0x00,
            script_hash_prefix: 0x05,
            secret_key_prefix: 0x80,
            cashaddr_prefix: Some(Cow::Borrowed("bitcoincash")),
            bech32_hrp: None,
        }
    }

    /// Bitcoin Cash testnet
    pub const fn bitcoin_cash_testnet() -> Self {
        Self {
            name: Cow::Borrowed("bitcoincash-testnet"),
            pubkey_hash_prefix: 0x6f,
            script_hash_prefix: 0xc4,
            secret_key_prefix: 0xef,
            cashaddr_prefix: Some(Cow::Borrowed("bchtest")),
            bech32_hrp: None,
        }
    }

    /// Bitcoin Cash regtest
    pub const fn bitcoin_cash_regtest() -> Self {
        Self {
            name: Cow::Borrowed("bitcoincash-regtest"),
            pubkey_hash_prefix: 0x6f,
            script_hash_prefix: 0xc4,
            secret_key_prefix: 0xef,
            cashaddr_prefix: Some(Cow::Borrowed("bchreg")),
            bech32_hrp: None,
        }
    }

    /// Litecoin mainnet
    pub const fn litecoin() -> Self {
        Self {
            name: Cow::Borrowed("litecoin"),
            pubkey_hash_prefix: 0x30,
            script_hash_prefix: 0x32,
            secret_key_prefix: 0xb0,
            cashaddr_prefix: None,
            bech32_hrp: Some(Cow::Borrowed("ltc")),
        }
    }

    /// Litecoin testnet
    pub const fn litecoin_testnet() -> Self {
        Self {
            name: Cow::Borrowed("litecoin-testnet"),
            pubkey_hash_prefix: 0x6f,
            script_hash_prefix: 0x3a,
            secret_key_prefix: 0xef,
            cashaddr_prefix: None,
            bech32_hrp: Some(Cow::Borrowed("tltc")),
        }
    }

    /// Dogecoin mainnet (no segwit, no CashAddr)
    pub const fn dogecoin() -> Self {
        Self {
            name: Cow::Borrowed("dogecoin"),
            pubkey_hash_prefix: 0x1e,
            script_hash_prefix: 0x16,
            secret_key_prefix: 0x9e,
            cashaddr_prefix: None,
            bech32_hrp: None,
        }
    }

    /// Look up a built-in profile by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<&'static Network> {
        BUILTIN_NETWORKS
            .iter()
            .find(|net| net.name.eq_ignore_ascii_case(name))
    }

    /// Whether legacy variants are CashAddr-encoded on this network
    pub fn supports_cashaddr(&self) -> bool {
        self.cashaddr_prefix.is_some()
    }

    /// Whether witness variants can be encoded on this network
    pub fn supports_segwit(&self) -> bool {
        self.bech32_hrp.is_some()
    }

    /// CashAddr prefix, if configured
    pub fn cashaddr_prefix(&self) -> Option<&str> {
        self.cashaddr_prefix.as_deref()
    }

    /// Bech32 human-readable part, if configured
    pub fn bech32_hrp(&self) -> Option<&str> {
        self.bech32_hrp.as_deref()
    }

    /// Check the profile is usable by the codecs
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidNetwork("network name is empty".to_string()));
        }

        // Base58 decoding tells the legacy variants apart by prefix byte alone
        if self.cashaddr_prefix.is_none() && self.pubkey_hash_prefix == self.script_hash_prefix {
            return Err(Error::InvalidNetwork(format!(
                "{}: pubkey-hash and script-hash prefixes are both 0x{:02x}",
                self.name, self.pubkey_hash_prefix
            )));
        }

        if let Some(prefix) = self.cashaddr_prefix() {
            let well_formed = !prefix.is_empty()
                && prefix
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit());
            if !well_formed {
                return Err(Error::InvalidNetwork(format!(
                    "{}: CashAddr prefix {:?} must be lowercase alphanumeric",
                    self.name, prefix
                )));
            }
        }

        if let Some(hrp) = self.bech32_hrp() {
            if hrp.is_empty() || hrp.len() > MAX_HRP_LEN {
                return Err(Error::InvalidNetwork(format!(
                    "{}: Bech32 HRP must be 1 to {} characters",
                    self.name, MAX_HRP_LEN
                )));
            }
            if !hrp.bytes().all(|b| (33..=126).contains(&b)) {
                return Err(Error::InvalidNetwork(format!(
                    "{}: Bech32 HRP {:?} contains non-printable characters",
                    self.name, hrp
                )));
            }
            let has_lower = hrp.bytes().any(|b| b.is_ascii_lowercase());
            let has_upper = hrp.bytes().any(|b| b.is_ascii_uppercase());
            if has_lower && has_upper {
                return Err(Error::InvalidNetwork(format!(
                    "{}: Bech32 HRP {:?} is mixed case",
                    self.name, hrp
                )));
            }
        }

        Ok(())
    }
}

/// Profiles compiled into the crate
pub static BUILTIN_NETWORKS: &[Network] = &[
    Network::bitcoin(),
    Network::bitcoin_testnet(),
    Network::bitcoin_regtest(),
    Network::bitcoin_cash(),
    Network::bitcoin_cash_testnet(),
    Network::bitcoin_cash_regtest(),
    Network::litecoin(),
    Network::litecoin_testnet(),
    Network::dogecoin(),
];
