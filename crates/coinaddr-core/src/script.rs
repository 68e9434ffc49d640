//! Mapping between addresses and the standard locking scripts they pay to

use crate::address::Address;
use crate::{Error, Result};
use coinaddr_params::Network;

const OP_0: u8 = 0x00;
const OP_PUSHBYTES_20: u8 = 0x14;
const OP_PUSHBYTES_32: u8 = 0x20;
const OP_DUP: u8 = 0x76;
const OP_EQUAL: u8 = 0x87;
const OP_EQUALVERIFY: u8 = 0x88;
const OP_HASH160: u8 = 0xa9;
const OP_CHECKSIG: u8 = 0xac;

impl<'n> Address<'n> {
    /// Standard output script paying to this address
    pub fn script_pubkey(&self) -> Vec<u8> {
        match self {
            Address::PubKeyHash { hash160, .. } => {
                let mut script = Vec::with_capacity(25);
                script.extend_from_slice(&[OP_DUP, OP_HASH160, OP_PUSHBYTES_20]);
                script.extend_from_slice(hash160);
                script.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
                script
            }
            Address::ScriptHash { hash160, .. } => {
                let mut script = Vec::with_capacity(23);
                script.extend_from_slice(&[OP_HASH160, OP_PUSHBYTES_20]);
                script.extend_from_slice(hash160);
                script.push(OP_EQUAL);
                script
            }
            Address::WitnessPubKeyHash { hash160, .. } => {
                let mut script = Vec::with_capacity(22);
                script.extend_from_slice(&[OP_0, OP_PUSHBYTES_20]);
                script.extend_from_slice(hash160);
                script
            }
            Address::WitnessScriptHash { hash256, .. } => {
                let mut script = Vec::with_capacity(34);
                script.extend_from_slice(&[OP_0, OP_PUSHBYTES_32]);
                script.extend_from_slice(hash256);
                script
            }
        }
    }

    /// Recognise one of the four standard output templates
    pub fn from_script_pubkey(network: &'n Network, script: &[u8]) -> Result<Self> {
        let address = match script {
            [OP_DUP, OP_HASH160, OP_PUSHBYTES_20, hash @ .., OP_EQUALVERIFY, OP_CHECKSIG]
                if hash.len() == 20 =>
            {
                Address::PubKeyHash {
                    hash160: copy_hash(hash),
                    network,
                }
            }
            [OP_HASH160, OP_PUSHBYTES_20, hash @ .., OP_EQUAL] if hash.len() == 20 => {
                Address::ScriptHash {
                    hash160: copy_hash(hash),
                    network,
                }
            }
            [OP_0, OP_PUSHBYTES_20, hash @ ..] if hash.len() == 20 => Address::WitnessPubKeyHash {
                hash160: copy_hash(hash),
                network,
            },
            [OP_0, OP_PUSHBYTES_32, hash @ ..] if hash.len() == 32 => Address::WitnessScriptHash {
                hash256: copy_hash(hash),
                network,
            },
            _ => {
                return Err(Error::DecodeMalformed(format!(
                    "{}-byte script is not a standard address output",
                    script.len()
                )))
            }
        };

        Ok(address)
    }
}

/// Length is checked by the caller's slice pattern guard.
fn copy_hash<const N: usize>(bytes: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash20() -> [u8; 20] {
        hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6")
            .unwrap()
            .try_into()
            .unwrap()
    }

    #[test]
    fn test_p2pkh_script() {
        let net = Network::bitcoin();
        let addr = Address::PubKeyHash {
            hash160: hash20(),
            network: &net,
        };
        let script = addr.script_pubkey();
        assert_eq!(
            hex::encode(&script),
            "76a914751e76e8199196d454941c45d1b3a323f1433bd688ac"
        );
        assert_eq!(Address::from_script_pubkey(&net, &script).unwrap(), addr);
    }

    #[test]
    fn test_p2sh_script() {
        let net = Network::bitcoin();
        let addr = Address::ScriptHash {
            hash160: hash20(),
            network: &net,
        };
        let script = addr.script_pubkey();
        assert_eq!(hex::encode(&script), "a914751e76e8199196d454941c45d1b3a323f1433bd687");
        assert_eq!(Address::from_script_pubkey(&net, &script).unwrap(), addr);
    }

    #[test]
    fn test_witness_scripts() {
        let net = Network::bitcoin();
        let wpkh = Address::WitnessPubKeyHash {
            hash160: hash20(),
            network: &net,
        };
        assert_eq!(
            hex::encode(wpkh.script_pubkey()),
            "0014751e76e8199196d454941c45d1b3a323f1433bd6"
        );
        assert_eq!(
            Address::from_script_pubkey(&net, &wpkh.script_pubkey()).unwrap(),
            wpkh
        );

        let wsh = Address::WitnessScriptHash {
            hash256: [0x5a; 32],
            network: &net,
        };
        let script = wsh.script_pubkey();
        assert_eq!(script.len(), 34);
        assert_eq!(Address::from_script_pubkey(&net, &script).unwrap(), wsh);
    }

    #[test]
    fn test_nonstandard_scripts_rejected() {
        let net = Network::bitcoin();
        for script in [
            vec![],
            vec![0x6a, 0x04, 1, 2, 3, 4],
            vec![OP_0, OP_PUSHBYTES_20, 1, 2, 3],
            vec![OP_HASH160, OP_PUSHBYTES_20, 0, OP_EQUAL],
        ] {
            assert!(Address::from_script_pubkey(&net, &script).is_err());
        }

        // taproot output
        let mut v1 = vec![0x51, OP_PUSHBYTES_32];
        v1.extend_from_slice(&[7u8; 32]);
        assert!(Address::from_script_pubkey(&net, &v1).is_err());
    }
}
