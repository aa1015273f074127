//! The mine-a-block workflow over a shared ledger.

use crate::blockchain::{Blockchain, Result};
use parking_lot::Mutex;
use powchain_core::{Block, Transaction};
use std::sync::Arc;

/// A ledger shared between request handlers. All reads and writes go through
/// the one lock.
pub type SharedBlockchain = Arc<Mutex<Blockchain>>;

/// Wrap a ledger for sharing.
pub fn shared(blockchain: Blockchain) -> SharedBlockchain {
    Arc::new(Mutex::new(blockchain))
}

/// Mines blocks on behalf of one node and pays that node the reward.
#[derive(Debug, Clone)]
pub struct Miner {
    node_id: String,
}

impl Miner {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Find a proof for the current last block, then reward this node and seal
    /// the pool into a new block.
    ///
    /// The lock is released during the proof search. If another block was
    /// appended in the meantime the found proof no longer applies to the tip,
    /// so the search starts over from the new last block.
    pub fn mine(&self, ledger: &Mutex<Blockchain>) -> Result<Block> {
        loop {
            let (last_index, last_proof, last_hash, pow) = {
                let chain = ledger.lock();
                let last = chain.last_block()?;
                (
                    last.index,
                    last.proof,
                    chain.hash_of(last),
                    chain.proof_of_work(),
                )
            };

            tracing::debug!(last_index, last_proof, "searching for proof");
            let proof = pow.search(last_proof);

            let mut chain = ledger.lock();
            let tip = chain.last_block()?.index;
            if tip != last_index {
                tracing::warn!(
                    expected = last_index,
                    tip,
                    "chain advanced during proof search, retrying"
                );
                continue;
            }

            chain.add_transaction(Transaction::reward(self.node_id.as_str()))?;
            return chain.seal_block(proof, Some(last_hash));
        }
    }
}
