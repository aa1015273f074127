//! The ledger: an append-only chain of blocks plus the pool of pending
//! transactions that goes into the next one.

use crate::mempool::{Mempool, MempoolStats};
use powchain_consensus::{ChainValidator, LeadingZeros, ProofOfWork, ValidationError};
use powchain_core::{Amount, Block, Hash, HashAlgorithm, PreviousHash, Transaction};
use thiserror::Error;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("chain has no blocks")]
    EmptyChain,

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, BlockchainError>;

/// Blockchain configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockchainConfig {
    /// Digest used for block links and proofs.
    pub hash_algorithm: HashAlgorithm,
}

/// Append-only chain of blocks and its transaction pool.
///
/// Every method that changes state takes `&mut self`, so sharing one ledger
/// between threads goes through a single lock (see [`crate::SharedBlockchain`]).
/// That keeps each seal atomic with respect to submissions and other seals.
#[derive(Debug)]
pub struct Blockchain {
    config: BlockchainConfig,
    chain: Vec<Block>,
    mempool: Mempool,
}

impl Blockchain {
    /// Create a ledger holding only the genesis block.
    pub fn new() -> Self {
        Self::with_config(BlockchainConfig::default())
    }

    /// Create a ledger with the given configuration.
    pub fn with_config(config: BlockchainConfig) -> Self {
        let mut blockchain = Self {
            config,
            chain: Vec::new(),
            mempool: Mempool::new(),
        };

        let genesis = Block::genesis();
        tracing::info!(
            hash = %genesis.hash_with(config.hash_algorithm),
            algorithm = %config.hash_algorithm,
            "created genesis block"
        );
        blockchain.chain.push(genesis);
        blockchain
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.config.hash_algorithm
    }

    /// Proof-of-work engine using this ledger's hash algorithm.
    pub fn proof_of_work(&self) -> ProofOfWork {
        ProofOfWork::with_algorithm(self.config.hash_algorithm)
    }

    /// All blocks, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Number of blocks in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Get a block by its 1-based index.
    pub fn get_block(&self, index: u64) -> Option<&Block> {
        let position = usize::try_from(index.checked_sub(1)?).ok()?;
        self.chain.get(position)
    }

    /// The most recently appended block.
    pub fn last_block(&self) -> Result<&Block> {
        self.chain.last().ok_or(BlockchainError::EmptyChain)
    }

    /// Digest of a block under this ledger's hash algorithm.
    pub fn hash_of(&self, block: &Block) -> Hash {
        block.hash_with(self.config.hash_algorithm)
    }

    /// Queue a transfer for the next block.
    ///
    /// Returns the index of the block the transaction will be sealed into.
    /// Sender, recipient and amount are taken as given.
    pub fn submit_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Amount>,
    ) -> Result<u64> {
        let sender: String = sender.into();
        let recipient: String = recipient.into();
        self.add_transaction(Transaction::new(sender, recipient, amount))
    }

    /// Queue an already built transaction for the next block.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<u64> {
        let next_index = self.last_block()?.index + 1;
        tracing::debug!(
            sender = %tx.sender,
            recipient = %tx.recipient,
            amount = %tx.amount,
            next_index,
            "queued transaction"
        );
        self.mempool.add(tx);
        Ok(next_index)
    }

    /// Pending transactions in submission order.
    pub fn pending_transactions(&self) -> &[Transaction] {
        self.mempool.pending()
    }

    /// Seal every pending transaction into a new block and append it.
    ///
    /// `previous_hash` of `None` links the block to the current last block;
    /// an explicit digest is used as given.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<Hash>) -> Result<Block> {
        let last = self.last_block()?;
        let index = last.index + 1;
        let previous_hash = previous_hash.unwrap_or_else(|| self.hash_of(last));

        let block = Block::new(
            index,
            self.mempool.drain(),
            proof,
            PreviousHash::Block(previous_hash),
        );

        tracing::info!(
            index,
            proof,
            transactions = block.tx_count(),
            previous_hash = %previous_hash,
            "sealed block"
        );

        self.chain.push(block.clone());
        Ok(block)
    }

    /// Check every link and proof in the chain.
    pub fn validate(&self) -> Result<()> {
        let rule = LeadingZeros::new(self.config.hash_algorithm);
        ChainValidator::validate_chain(&self.chain, self.config.hash_algorithm, &rule)?;
        Ok(())
    }

    /// Get blockchain statistics.
    pub fn stats(&self) -> Result<BlockchainStats> {
        let latest_block = self.last_block()?;

        Ok(BlockchainStats {
            length: self.len(),
            latest_block_hash: self.hash_of(latest_block),
            latest_timestamp: latest_block.timestamp,
            mempool: self.mempool.stats(),
            hash_algorithm: self.config.hash_algorithm,
        })
    }
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

/// Blockchain statistics.
#[derive(Debug, Clone)]
pub struct BlockchainStats {
    /// Number of blocks including genesis.
    pub length: usize,
    /// Hash of the latest block.
    pub latest_block_hash: Hash,
    /// Timestamp of the latest block.
    pub latest_timestamp: f64,
    /// Pending pool summary.
    pub mempool: MempoolStats,
    pub hash_algorithm: HashAlgorithm,
}
