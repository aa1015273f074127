//! Pool of transactions waiting for the next block.
//!
//! Transactions are kept in submission order. Sealing a block takes the whole
//! pool at once via [`Mempool::drain`].

use powchain_core::Transaction;

/// Transaction mempool.
#[derive(Debug, Default)]
pub struct Mempool {
    transactions: Vec<Transaction>,
}

impl Mempool {
    /// Create an empty mempool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of transactions in the mempool.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Check if the mempool is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Append a transaction.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Pending transactions in submission order.
    pub fn pending(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Remove and return every pending transaction, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    /// Get mempool statistics.
    pub fn stats(&self) -> MempoolStats {
        MempoolStats {
            total_transactions: self.len(),
            rewards: self.transactions.iter().filter(|tx| tx.is_reward()).count(),
        }
    }
}

/// Mempool statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MempoolStats {
    /// Total number of transactions.
    pub total_transactions: usize,
    /// Number of pending mining rewards.
    pub rewards: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mempool_keeps_submission_order() {
        let mut mempool = Mempool::new();
        mempool.add(Transaction::new("a", "b", 1));
        mempool.add(Transaction::new("c", "d", 2));
        mempool.add(Transaction::new("a", "b", 1));

        assert_eq!(mempool.len(), 3);
        let senders: Vec<_> = mempool.pending().iter().map(|tx| tx.sender.as_str().unwrap()).collect();
        assert_eq!(senders, ["a", "c", "a"]);
    }

    #[test]
    fn test_drain_empties_pool() {
        let mut mempool = Mempool::new();
        mempool.add(Transaction::new("a", "b", 1));
        mempool.add(Transaction::reward("node"));

        let drained = mempool.drain();
        assert_eq!(drained.len(), 2);
        assert!(drained[1].is_reward());
        assert!(mempool.is_empty());
        assert!(mempool.drain().is_empty());
    }

    #[test]
    fn test_mempool_stats() {
        let mut mempool = Mempool::new();
        mempool.add(Transaction::new("a", "b", 1));
        mempool.add(Transaction::reward("node"));

        assert_eq!(
            mempool.stats(),
            MempoolStats {
                total_transactions: 2,
                rewards: 1,
            }
        );
    }
}
