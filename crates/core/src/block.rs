//! Blocks and the link between a block and its predecessor.

use crate::canonical::to_canonical_bytes;
use crate::hash::{Hash, HashAlgorithm};
use crate::transaction::Transaction;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// How the genesis block's `previous_hash` is written. It is a marker, not a digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Reference from a block to the block before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousHash {
    /// The genesis block has no predecessor.
    Genesis,
    /// Digest of the preceding block.
    Block(Hash),
}

impl From<Hash> for PreviousHash {
    fn from(hash: Hash) -> Self {
        PreviousHash::Block(hash)
    }
}

impl fmt::Display for PreviousHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviousHash::Genesis => f.write_str(GENESIS_PREVIOUS_HASH),
            PreviousHash::Block(hash) => write!(f, "{hash}"),
        }
    }
}

impl Serialize for PreviousHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PreviousHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == GENESIS_PREVIOUS_HASH {
            return Ok(PreviousHash::Genesis);
        }
        Hash::from_hex(&s)
            .map(PreviousHash::Block)
            .map_err(de::Error::custom)
    }
}

/// A sealed batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting at 1.
    pub index: u64,
    /// Seconds since the Unix epoch, with sub-second precision.
    pub timestamp: f64,
    /// Transactions in submission order.
    pub transactions: Vec<Transaction>,
    /// Proof-of-work nonce.
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl Block {
    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self {
            index,
            timestamp: current_timestamp(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Create the genesis block.
    pub fn genesis() -> Self {
        Self::new(1, Vec::new(), GENESIS_PROOF, PreviousHash::Genesis)
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 1 && self.previous_hash == PreviousHash::Genesis
    }

    /// Canonical encoding of the block, the input to its digest.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        to_canonical_bytes(self)
    }

    /// Digest of the block under the given algorithm.
    pub fn hash_with(&self, algorithm: HashAlgorithm) -> Hash {
        algorithm.digest(&self.canonical_bytes())
    }

    /// Digest of the block under the default algorithm.
    pub fn hash(&self) -> Hash {
        self.hash_with(HashAlgorithm::default())
    }

    /// Get the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_secs_f64()
}
