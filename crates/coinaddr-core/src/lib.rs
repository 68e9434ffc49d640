//! Multi-format cryptocurrency address codec
//!
//! This crate converts addresses between their in-memory form and the text
//! encodings used across chains (Base58Check, Bech32 segwit and CashAddr),
//! and encodes private keys in Wallet Import Format. Every operation is a
//! pure function of its inputs and a [`Network`] profile.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod base58;
pub mod cashaddr;
pub mod error;
pub mod hash;
pub mod script;
pub mod segwit;
pub mod wif;

pub use address::{
    address_to_text, pubkey_to_address, text_to_address, Address, AddressSeed, AddressType,
    INVALID_ADDRESS,
};
pub use coinaddr_params;
pub use coinaddr_params::{Network, NetworkRegistry};
pub use error::{Error, ErrorCategory, Result};
pub use wif::{wif_decode, wif_encode, PrivateKey};
