//! Chain verification.
//!
//! Checks that a sequence of blocks obeys the ledger's structural rules:
//! 1-based consecutive indices, a genesis block at the front, each block
//! linked to the digest of its predecessor, and a valid proof for every
//! block after genesis.

use crate::pow::ProofRule;
use powchain_core::{Block, Hash, HashAlgorithm, PreviousHash};
use thiserror::Error;

/// Errors that can occur during validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("chain contains no blocks")]
    EmptyChain,

    #[error("first block is not a genesis block")]
    MissingGenesis,

    #[error("block index mismatch (expected {expected}, got {got})")]
    InvalidIndex { expected: u64, got: u64 },

    #[error("block {index} previous_hash mismatch (expected {expected}, got {got})")]
    InvalidPrevHash {
        index: u64,
        expected: Hash,
        got: PreviousHash,
    },

    #[error("block {index} has an invalid proof {proof} after {last_proof}")]
    InvalidProof {
        index: u64,
        last_proof: u64,
        proof: u64,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Block and chain validator.
pub struct ChainValidator;

impl ChainValidator {
    /// Validate that `block` correctly follows `parent`.
    pub fn validate_successor<R: ProofRule>(
        block: &Block,
        parent: &Block,
        algorithm: HashAlgorithm,
        rule: &R,
    ) -> Result<()> {
        let expected_index = parent.index + 1;
        if block.index != expected_index {
            return Err(ValidationError::InvalidIndex {
                expected: expected_index,
                got: block.index,
            });
        }

        let expected_hash = parent.hash_with(algorithm);
        if block.previous_hash != PreviousHash::Block(expected_hash) {
            return Err(ValidationError::InvalidPrevHash {
                index: block.index,
                expected: expected_hash,
                got: block.previous_hash,
            });
        }

        if !rule.is_valid(parent.proof, block.proof) {
            return Err(ValidationError::InvalidProof {
                index: block.index,
                last_proof: parent.proof,
                proof: block.proof,
            });
        }

        Ok(())
    }

    /// Validate a whole chain from genesis to tip.
    pub fn validate_chain<R: ProofRule>(
        blocks: &[Block],
        algorithm: HashAlgorithm,
        rule: &R,
    ) -> Result<()> {
        let genesis = blocks.first().ok_or(ValidationError::EmptyChain)?;
        if !genesis.is_genesis() {
            return Err(ValidationError::MissingGenesis);
        }

        for pair in blocks.windows(2) {
            Self::validate_successor(&pair[1], &pair[0], algorithm, rule)?;
        }

        Ok(())
    }
}
