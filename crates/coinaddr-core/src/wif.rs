//! Wallet Import Format private keys
//!
//! WIF is Base58Check over `[secret_key_prefix] ++ secret(32) ++ [0x01]?`,
//! where the trailing `0x01` marks a key whose public key is serialized
//! compressed.

use crate::address::Address;
use crate::{base58, Error, Result};
use coinaddr_params::Network;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroizing;

/// Secret scalar length
pub const SECRET_KEY_LEN: usize = 32;

/// Trailing byte marking a compressed-pubkey key
const COMPRESSED_FLAG: u8 = 0x01;

/// A secret key together with its WIF metadata
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey<'n> {
    /// Secret scalar
    pub secret: SecretKey,
    /// Whether the public key is serialized compressed
    pub compressed: bool,
    /// Network the key is encoded for
    pub network: &'n Network,
}

impl<'n> PrivateKey<'n> {
    /// Create a private key
    pub fn new(network: &'n Network, secret: SecretKey, compressed: bool) -> Self {
        Self {
            secret,
            compressed,
            network,
        }
    }

    /// Encode as WIF
    pub fn to_wif(&self) -> String {
        wif_encode(self.network, &self.secret.secret_bytes(), self.compressed)
    }

    /// Decode from WIF under `network`
    pub fn from_wif(network: &'n Network, text: &str) -> Result<Self> {
        let (secret, compressed) = decode_secret(network, text)?;
        Ok(Self::new(network, secret, compressed))
    }

    /// Serialized public key (33 bytes compressed, 65 uncompressed)
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let secp = Secp256k1::signing_only();
        let public = PublicKey::from_secret_key(&secp, &self.secret);
        if self.compressed {
            public.serialize().to_vec()
        } else {
            public.serialize_uncompressed().to_vec()
        }
    }

    /// Pay-to-pubkey-hash address of this key
    pub fn to_address(&self) -> Address<'n> {
        Address::p2pkh(self.network, &self.public_key_bytes())
    }
}

impl std::fmt::Debug for PrivateKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("secret", &"<redacted>")
            .field("compressed", &self.compressed)
            .field("network", &self.network.name)
            .finish()
    }
}

/// Encode a 32-byte secret as WIF
pub fn wif_encode(network: &Network, secret: &[u8; SECRET_KEY_LEN], compressed: bool) -> String {
    let mut payload = Zeroizing::new(Vec::with_capacity(SECRET_KEY_LEN + 2));
    payload.push(network.secret_key_prefix);
    payload.extend_from_slice(secret);
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }
    base58::encode_check(&payload)
}

/// Decode WIF into its 32-byte secret and compression flag
pub fn wif_decode(
    network: &Network,
    text: &str,
) -> Result<(Zeroizing<[u8; SECRET_KEY_LEN]>, bool)> {
    let (secret, compressed) = decode_secret(network, text)?;
    Ok((Zeroizing::new(secret.secret_bytes()), compressed))
}

fn decode_secret(network: &Network, text: &str) -> Result<(SecretKey, bool)> {
    let data = Zeroizing::new(base58::decode_check(text)?);

    let (&prefix, body) = data
        .split_first()
        .ok_or_else(|| Error::DecodeMalformed("empty WIF payload".to_string()))?;
    if prefix != network.secret_key_prefix {
        return Err(Error::DecodeMalformed(format!(
            "WIF prefix 0x{prefix:02x} is not the {} secret key prefix",
            network.name
        )));
    }

    let (secret, compressed) = match body.len() {
        SECRET_KEY_LEN => (body, false),
        len if len == SECRET_KEY_LEN + 1 => {
            if body[SECRET_KEY_LEN] != COMPRESSED_FLAG {
                return Err(Error::DecodeMalformed(format!(
                    "WIF compression flag is 0x{:02x}",
                    body[SECRET_KEY_LEN]
                )));
            }
            (&body[..SECRET_KEY_LEN], true)
        }
        len => {
            return Err(Error::DecodeMalformed(format!(
                "WIF payload is {} bytes, expected 33 or 34",
                len + 1
            )))
        }
    };

    let secret = SecretKey::from_slice(secret)
        .map_err(|e| Error::KeyValidationFailed(e.to_string()))?;

    Ok((secret, compressed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> [u8; 32] {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        secret
    }

    #[test]
    fn test_known_vectors() {
        let net = Network::bitcoin();
        assert_eq!(
            wif_encode(&net, &one(), false),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
        assert_eq!(
            wif_encode(&net, &one(), true),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
    }

    #[test]
    fn test_decode_known_vectors() {
        let net = Network::bitcoin();
        let (secret, compressed) =
            wif_decode(&net, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        assert_eq!(*secret, one());
        assert!(compressed);

        let (secret, compressed) =
            wif_decode(&net, "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf").unwrap();
        assert_eq!(*secret, one());
        assert!(!compressed);
    }

    #[test]
    fn test_private_key_address() {
        let net = Network::bitcoin();
        let key = PrivateKey::from_wif(&net, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn")
            .unwrap();
        assert_eq!(key.public_key_bytes().len(), 33);
        assert_eq!(key.to_address().to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");

        let uncompressed = PrivateKey::new(&net, key.secret, false);
        assert_eq!(uncompressed.public_key_bytes().len(), 65);
        assert_eq!(
            uncompressed.to_address().to_string(),
            "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm"
        );
    }

    #[test]
    fn test_wrong_prefix_rejected() {
        let mainnet_wif = wif_encode(&Network::bitcoin(), &one(), true);
        let result = wif_decode(&Network::bitcoin_testnet(), &mainnet_wif);
        assert!(matches!(result, Err(Error::DecodeMalformed(_))));
    }

    #[test]
    fn test_bad_flag_rejected() {
        let net = Network::bitcoin();
        let mut payload = vec![net.secret_key_prefix];
        payload.extend_from_slice(&one());
        payload.push(0x02);
        let result = wif_decode(&net, &base58::encode_check(&payload));
        assert!(matches!(result, Err(Error::DecodeMalformed(_))));
    }

    #[test]
    fn test_bad_lengths_rejected() {
        let net = Network::bitcoin();
        for body_len in [0usize, 1, 31, 34, 40] {
            let mut payload = vec![net.secret_key_prefix];
            payload.extend(std::iter::repeat(0x11).take(body_len));
            let result = wif_decode(&net, &base58::encode_check(&payload));
            assert!(matches!(result, Err(Error::DecodeMalformed(_))), "length {body_len}");
        }
    }

    #[test]
    fn test_invalid_scalar_rejected() {
        let net = Network::bitcoin();
        let result = wif_decode(&net, &wif_encode(&net, &[0u8; 32], true));
        assert!(matches!(result, Err(Error::KeyValidationFailed(_))));

        let result = wif_decode(&net, &wif_encode(&net, &[0xffu8; 32], false));
        assert!(matches!(result, Err(Error::KeyValidationFailed(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let net = Network::bitcoin();
        let key = PrivateKey::new(&net, SecretKey::from_slice(&one()).unwrap(), true);
        let debug = format!("{key:?}");
        assert!(debug.contains("redacted"));
        assert!(!debug.contains("0000000000000001"));
    }
}
