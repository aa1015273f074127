//! Ledger transactions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transaction field as submitted. Any JSON value is accepted and kept
/// verbatim, so `5000` stays an integer and `"5"` stays a string.
pub type Amount = Value;

/// Sender used for the reward transaction that pays the miner of a block.
pub const REWARD_SENDER: &str = "0";

/// Amount paid to the miner of each block.
pub const MINING_REWARD: u64 = 1;

/// A value transfer waiting in the pool or sealed into a block.
///
/// Fields are not interpreted by the ledger; they are hashed and returned as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: Value,
    pub recipient: Value,
    pub amount: Amount,
}

impl Transaction {
    pub fn new(
        sender: impl Into<Value>,
        recipient: impl Into<Value>,
        amount: impl Into<Amount>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount: amount.into(),
        }
    }

    /// The transaction that rewards `node_id` for mining a block.
    pub fn reward(node_id: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, Value::String(node_id.into()), MINING_REWARD)
    }

    /// Check if this is a mining reward.
    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reward_transaction() {
        let tx = Transaction::reward("node-a");
        assert!(tx.is_reward());
        assert_eq!(tx.recipient, "node-a");
        assert_eq!(tx.amount, json!(1));
    }

    #[test]
    fn test_amount_keeps_its_form() {
        let tx = Transaction::new("bob", "sally", 5000);
        assert_eq!(
            serde_json::to_string(&tx).unwrap(),
            r#"{"sender":"bob","recipient":"sally","amount":5000}"#
        );

        let tx: Transaction =
            serde_json::from_str(r#"{"sender":"a","recipient":"b","amount":-0.25}"#).unwrap();
        assert_eq!(tx.amount.as_f64(), Some(-0.25));
        assert!(!tx.is_reward());
    }

    #[test]
    fn test_any_json_value_is_kept() {
        let tx: Transaction =
            serde_json::from_str(r#"{"sender":7,"recipient":null,"amount":"5"}"#).unwrap();
        assert_eq!(tx.sender, json!(7));
        assert_eq!(tx.recipient, Value::Null);
        assert_eq!(tx.amount, json!("5"));
        assert!(!tx.is_reward());
    }
}
