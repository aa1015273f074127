//! Command-line and environment configuration for the node.

use clap::Parser;
use powchain_chain::BlockchainConfig;
use powchain_core::HashAlgorithm;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Parser)]
#[command(name = "powchain-server")]
#[command(about = "A single-node proof-of-work ledger served over HTTP", long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "POWCHAIN_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "POWCHAIN_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Identifier credited with mining rewards (random when omitted)
    #[arg(long, env = "POWCHAIN_NODE_ID")]
    pub node_id: Option<String>,

    /// Digest for block links and proofs: sha256 or blake3
    #[arg(long = "hash", env = "POWCHAIN_HASH", default_value = "sha256")]
    pub hash_algorithm: HashAlgorithm,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "POWCHAIN_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn blockchain_config(&self) -> BlockchainConfig {
        BlockchainConfig {
            hash_algorithm: self.hash_algorithm,
        }
    }

    /// The configured node identifier, or a fresh random one.
    pub fn resolve_node_id(&self) -> String {
        self.node_id.clone().unwrap_or_else(generate_node_id)
    }
}

/// 128 random bits as 32 lowercase hex characters.
pub fn generate_node_id() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["powchain-server"]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "powchain-server",
            "--host",
            "127.0.0.1",
            "-p",
            "8080",
            "--hash",
            "blake3",
            "--node-id",
            "miner-7",
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.blockchain_config().hash_algorithm, HashAlgorithm::Blake3);
        assert_eq!(config.resolve_node_id(), "miner-7");
    }

    #[test]
    fn test_unknown_hash_rejected() {
        assert!(Config::try_parse_from(["powchain-server", "--hash", "md5"]).is_err());
    }

    #[test]
    fn test_generated_node_id() {
        let id = generate_node_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_node_id());
    }
}
