use powchain_chain::{shared, Blockchain, Miner};
use powchain_core::{PreviousHash, Transaction};
use std::collections::HashSet;
use std::thread;

#[test]
fn test_submit_then_mine() {
    let ledger = shared(Blockchain::new());
    let miner = Miner::new("node-a");

    let index = ledger.lock().submit_transaction("bob", "sally", 5000).unwrap();
    assert_eq!(index, 2);

    let block = miner.mine(&ledger).unwrap();

    assert_eq!(block.index, 2);
    assert_eq!(
        block.transactions,
        vec![
            Transaction::new("bob", "sally", 5000),
            Transaction::reward("node-a"),
        ]
    );

    let chain = ledger.lock();
    let genesis = &chain.chain()[0];
    assert_eq!(block.previous_hash, PreviousHash::Block(chain.hash_of(genesis)));
    assert!(chain.pending_transactions().is_empty());
    assert!(chain.validate().is_ok());
}

#[test]
fn test_three_mines_without_submissions() {
    let ledger = shared(Blockchain::new());
    let miner = Miner::new("node-b");

    for _ in 0..3 {
        miner.mine(&ledger).unwrap();
    }

    let chain = ledger.lock();
    assert_eq!(chain.len(), 4);
    for block in &chain.chain()[1..] {
        assert_eq!(block.transactions, vec![Transaction::reward("node-b")]);
    }
    for pair in chain.chain().windows(2) {
        assert_eq!(
            pair[1].previous_hash,
            PreviousHash::Block(chain.hash_of(&pair[0]))
        );
        assert_eq!(pair[1].index, pair[0].index + 1);
    }
    assert!(chain.validate().is_ok());
}

#[test]
fn test_transactions_after_seal_go_to_next_block() {
    let ledger = shared(Blockchain::new());
    let miner = Miner::new("node-c");

    ledger.lock().submit_transaction("a", "b", 1).unwrap();
    let first = miner.mine(&ledger).unwrap();

    let index = ledger.lock().submit_transaction("c", "d", 2).unwrap();
    assert_eq!(index, 3);
    let second = miner.mine(&ledger).unwrap();

    assert!(first.transactions.contains(&Transaction::new("a", "b", 1)));
    assert!(!first.transactions.contains(&Transaction::new("c", "d", 2)));
    assert!(second.transactions.contains(&Transaction::new("c", "d", 2)));
    assert!(!second.transactions.contains(&Transaction::new("a", "b", 1)));
}

#[test]
fn test_concurrent_mining_and_submission() {
    let ledger = shared(Blockchain::new());

    let submitter = {
        let ledger = ledger.clone();
        thread::spawn(move || {
            for i in 0..200u64 {
                ledger
                    .lock()
                    .submit_transaction(format!("sender-{i}"), "sink", i)
                    .unwrap();
            }
        })
    };

    let miners: Vec<_> = (0..3)
        .map(|n| {
            let ledger = ledger.clone();
            thread::spawn(move || {
                let miner = Miner::new(format!("miner-{n}"));
                miner.mine(&ledger).unwrap();
            })
        })
        .collect();

    submitter.join().unwrap();
    for handle in miners {
        handle.join().unwrap();
    }

    let mut chain = ledger.lock();
    // Flush whatever arrived after the last seal.
    chain.seal_block(0, None).unwrap();

    assert_eq!(chain.len(), 5);
    assert!(chain.pending_transactions().is_empty());

    let mut seen = HashSet::new();
    let mut rewards = 0;
    for block in chain.chain() {
        for tx in &block.transactions {
            if tx.is_reward() {
                rewards += 1;
            } else {
                assert!(seen.insert(tx.sender.to_string()), "duplicate {}", tx.sender);
            }
        }
    }
    assert_eq!(rewards, 3);
    assert_eq!(seen.len(), 200);

    // All but the hand-sealed flush block carry valid proofs.
    let mined = &chain.chain()[..4];
    let pow = chain.proof_of_work();
    for pair in mined.windows(2) {
        assert!(pow.verify(pair[0].proof, pair[1].proof));
        assert_eq!(
            pair[1].previous_hash,
            PreviousHash::Block(chain.hash_of(&pair[0]))
        );
    }
}
