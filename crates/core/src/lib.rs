//! Core ledger primitives for powchain.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Hashing (SHA-256 by default, BLAKE3 optionally)
//! - Canonical encoding of records for hashing
//! - Transactions
//! - Blocks and the link to their predecessor

pub mod block;
pub mod canonical;
pub mod hash;
pub mod transaction;

// Re-export commonly used types at the crate root
pub use block::{current_timestamp, Block, PreviousHash, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
pub use canonical::{to_canonical_bytes, to_canonical_string};
pub use hash::{hash, Hash, HashAlgorithm, UnknownHashAlgorithm, H256};
pub use transaction::{Amount, Transaction, MINING_REWARD, REWARD_SENDER};
