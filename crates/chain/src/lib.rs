//! Ledger orchestration for powchain.
//!
//! This crate brings together the pieces of a single-node proof-of-work ledger:
//! - **Mempool**: transactions waiting for the next block
//! - **Blockchain**: the append-only chain and block sealing
//! - **Miner**: the proof search, reward and seal workflow over a shared ledger
//!
//! # Example
//!
//! ```rust,no_run
//! use powchain_chain::{shared, Blockchain, Miner};
//!
//! let ledger = shared(Blockchain::new());
//! ledger.lock().submit_transaction("bob", "sally", 5000).unwrap();
//!
//! let block = Miner::new("my-node").mine(&ledger).unwrap();
//! assert_eq!(block.index, 2);
//! ```

pub mod blockchain;
pub mod mempool;
pub mod miner;

// Re-export commonly used types
pub use blockchain::{Blockchain, BlockchainConfig, BlockchainError, BlockchainStats};
pub use mempool::{Mempool, MempoolStats};
pub use miner::{shared, Miner, SharedBlockchain};
