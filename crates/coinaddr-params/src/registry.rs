//! Network profile registry and JSON profile loading

use crate::network::{Network, BUILTIN_NETWORKS};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk profile document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    /// Profiles, in registration order
    pub networks: Vec<Network>,
}

/// Named collection of network profiles
///
/// Profiles are validated on insertion and are never handed out mutably.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: Vec<Network>,
}

static BUILTIN: Lazy<NetworkRegistry> = Lazy::new(NetworkRegistry::with_builtin);

impl NetworkRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the compiled-in profiles
    pub fn with_builtin() -> Self {
        Self {
            networks: BUILTIN_NETWORKS.to_vec(),
        }
    }

    /// Shared registry of compiled-in profiles
    pub fn builtin() -> &'static NetworkRegistry {
        &BUILTIN
    }

    /// Parse a profile document into a fresh registry
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut registry = Self::new();
        registry.extend_from_json_str(json)?;
        Ok(registry)
    }

    /// Load a profile document from disk into a fresh registry
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut registry = Self::new();
        registry.extend_from_file(path)?;
        Ok(registry)
    }

    /// Add every profile of a JSON document
    ///
    /// Either all profiles are added or, on the first invalid or duplicate
    /// one, none are and the registry is left as it was.
    pub fn extend_from_json_str(&mut self, json: &str) -> Result<usize> {
        let file: NetworkFile = serde_json::from_str(json)?;
        let count = file.networks.len();
        let mut staged = self.clone();
        for network in file.networks {
            staged.insert(network)?;
        }
        *self = staged;
        Ok(count)
    }

    /// Add every profile of a JSON document on disk
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let count = self.extend_from_json_str(&contents)?;
        tracing::info!("Loaded {} network profiles from {}", count, path.display());
        Ok(count)
    }

    /// Register a profile
    pub fn insert(&mut self, network: Network) -> Result<()> {
        if let Err(e) = network.validate() {
            tracing::warn!("Rejected network profile {}: {}", network.name, e);
            return Err(e);
        }
        if self.get(&network.name).is_some() {
            return Err(Error::DuplicateNetwork(network.name.into_owned()));
        }
        self.networks.push(network);
        Ok(())
    }

    /// Get profile by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&Network> {
        self.networks
            .iter()
            .find(|net| net.name.eq_ignore_ascii_case(name))
    }

    /// Get profile by name, failing if unknown
    pub fn require(&self, name: &str) -> Result<&Network> {
        self.get(name)
            .ok_or_else(|| Error::UnknownNetwork(name.to_string()))
    }

    /// Iterate profiles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Network> {
        self.networks.iter()
    }

    /// Get profile count
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CUSTOM: &str = r#"{
        "networks": [
            {
                "name": "examplecoin",
                "pubkey_hash_prefix": 28,
                "script_hash_prefix": 50,
                "secret_key_prefix": 156,
                "bech32_hrp": "ex"
            },
            {
                "name": "examplecash",
                "pubkey_hash_prefix": 0,
                "script_hash_prefix": 5,
                "secret_key_prefix": 128,
                "cashaddr_prefix": "excash"
            }
        ]
    }"#;

    #[test]
    fn test_builtin_registry() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(registry.len(), BUILTIN_NETWORKS.len());
        assert_eq!(registry.get("bitcoin"), Some(&Network::bitcoin()));
        assert!(registry.require("nope").is_err());
    }

    #[test]
    fn test_from_json() {
        let registry = NetworkRegistry::from_json_str(CUSTOM).unwrap();
        assert_eq!(registry.len(), 2);

        let coin = registry.require("examplecoin").unwrap();
        assert_eq!(coin.pubkey_hash_prefix, 28);
        assert_eq!(coin.bech32_hrp(), Some("ex"));
        assert!(!coin.supports_cashaddr());

        let cash = registry.require("ExampleCash").unwrap();
        assert_eq!(cash.cashaddr_prefix(), Some("excash"));
        assert!(!cash.supports_segwit());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = NetworkRegistry::with_builtin();
        let result = registry.insert(Network::bitcoin());
        assert!(matches!(result, Err(Error::DuplicateNetwork(_))));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let json = r#"{ "networks": [ {
            "name": "bad",
            "pubkey_hash_prefix": 0,
            "script_hash_prefix": 5,
            "secret_key_prefix": 128,
            "cashaddr_prefix": "Bad Prefix"
        } ] }"#;
        let result = NetworkRegistry::from_json_str(json);
        assert!(matches!(result, Err(Error::InvalidNetwork(_))));
    }

    #[test]
    fn test_shared_base58_prefix_rejected() {
        let json = r#"{ "networks": [ {
            "name": "samecoin",
            "pubkey_hash_prefix": 7,
            "script_hash_prefix": 7,
            "secret_key_prefix": 128
        } ] }"#;
        let result = NetworkRegistry::from_json_str(json);
        assert!(matches!(result, Err(Error::InvalidNetwork(_))));
    }

    #[test]
    fn test_failed_extend_leaves_registry_unchanged() {
        let json = r#"{ "networks": [
            {
                "name": "examplecoin",
                "pubkey_hash_prefix": 28,
                "script_hash_prefix": 50,
                "secret_key_prefix": 156
            },
            {
                "name": "bad",
                "pubkey_hash_prefix": 0,
                "script_hash_prefix": 5,
                "secret_key_prefix": 128,
                "cashaddr_prefix": "Bad Prefix"
            }
        ] }"#;
        let mut registry = NetworkRegistry::with_builtin();
        let result = registry.extend_from_json_str(json);
        assert!(matches!(result, Err(Error::InvalidNetwork(_))));
        assert_eq!(registry.len(), BUILTIN_NETWORKS.len());
        assert!(registry.get("examplecoin").is_none());

        // a name repeated inside one document fails the same way
        let mut registry = NetworkRegistry::new();
        let doubled = CUSTOM.replace("examplecash", "examplecoin");
        let result = registry.extend_from_json_str(&doubled);
        assert!(matches!(result, Err(Error::DuplicateNetwork(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let result = NetworkRegistry::from_json_str("{ \"networks\": 7 }");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_extend_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUSTOM.as_bytes()).unwrap();

        let mut registry = NetworkRegistry::with_builtin();
        let added = registry.extend_from_file(file.path()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(registry.len(), BUILTIN_NETWORKS.len() + 2);
        assert!(registry.get("examplecoin").is_some());
        assert!(registry.get("bitcoincash").is_some());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = NetworkRegistry::load_file(dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
