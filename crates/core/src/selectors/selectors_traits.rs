//! Collaborator seams for the selectors.

use std::collections::HashSet;

use crate::balances::ChainKey;

/// Chain ids of the public Ethereum test networks (Goerli, Sepolia, Linea
/// Goerli, Linea Sepolia, Holesky).
pub const DEFAULT_TEST_NETWORKS: [&str; 5] = ["0x5", "0xaa36a7", "0xe704", "0xe705", "0x4268"];

/// Tells test networks apart from production networks.
pub trait NetworkClassifier: Send + Sync {
    fn is_test_network(&self, chain_id: &str) -> bool;
}

impl<F> NetworkClassifier for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_test_network(&self, chain_id: &str) -> bool {
        self(chain_id)
    }
}

/// Classifier backed by a fixed set of chain ids, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct KnownTestNetworks {
    chain_ids: HashSet<ChainKey>,
}

impl KnownTestNetworks {
    pub fn new<I, S>(chain_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            chain_ids: chain_ids
                .into_iter()
                .map(|id| id.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Default for KnownTestNetworks {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_NETWORKS)
    }
}

impl NetworkClassifier for KnownTestNetworks {
    fn is_test_network(&self, chain_id: &str) -> bool {
        self.chain_ids.contains(&chain_id.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_networks() {
        let networks = KnownTestNetworks::default();
        assert!(networks.is_test_network("0xaa36a7"));
        assert!(networks.is_test_network("0xAA36A7"));
        assert!(!networks.is_test_network("0x1"));
    }

    #[test]
    fn test_closure_classifier() {
        let only_five = |chain_id: &str| chain_id == "0x5";
        assert!(only_five.is_test_network("0x5"));
        assert!(!only_five.is_test_network("0x1"));
    }
}
