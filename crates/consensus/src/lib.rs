//! Proof-of-work consensus for powchain.
//!
//! This crate provides:
//! - The fixed-difficulty proof rule and the linear proof search
//! - Chain verification (indices, predecessor links, proofs)
//!
//! # Example
//!
//! ```rust,no_run
//! use powchain_consensus::ProofOfWork;
//!
//! let pow = ProofOfWork::default();
//! let proof = pow.search(100);
//! assert!(pow.verify(100, proof));
//! ```

pub mod pow;
pub mod validator;

// Re-export commonly used types
pub use pow::{LeadingZeros, ProofOfWork, ProofRule, DIFFICULTY_PREFIX};
pub use validator::{ChainValidator, ValidationError};
