//! Proof-of-work search.
//!
//! A proof is valid for the previous block's proof when the digest of the two
//! numbers written in decimal back to back (previous first, no separator)
//! starts with four `'0'` hex characters. The difficulty is fixed.
//!
//! [`ProofOfWork::search`] scans candidates from zero upward with no bound.
//! Each candidate succeeds with probability 1/65536, so the scan terminates
//! with probability 1 after roughly 65 536 trials on average, but there is no
//! deterministic upper limit.

use powchain_core::HashAlgorithm;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Required prefix of the proof digest's hex form.
pub const DIFFICULTY_PREFIX: &str = "0000";

const PROGRESS_INTERVAL: u64 = 100_000;

/// Decides whether a candidate proof is acceptable after a previous proof.
pub trait ProofRule {
    fn is_valid(&self, last_proof: u64, proof: u64) -> bool;
}

/// The ledger's difficulty rule: leading zero hex digits in the digest of
/// `"{last_proof}{proof}"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadingZeros {
    algorithm: HashAlgorithm,
}

impl LeadingZeros {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

impl ProofRule for LeadingZeros {
    fn is_valid(&self, last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        self.algorithm
            .digest(guess.as_bytes())
            .to_hex()
            .starts_with(DIFFICULTY_PREFIX)
    }
}

/// Linear proof search over a [`ProofRule`].
#[derive(Debug, Clone)]
pub struct ProofOfWork<R = LeadingZeros> {
    rule: R,
}

impl Default for ProofOfWork<LeadingZeros> {
    fn default() -> Self {
        Self::new(LeadingZeros::default())
    }
}

impl ProofOfWork<LeadingZeros> {
    /// Proof-of-work with the standard rule over `algorithm`.
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self::new(LeadingZeros::new(algorithm))
    }
}

impl<R: ProofRule> ProofOfWork<R> {
    pub fn new(rule: R) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Check a single proof.
    pub fn verify(&self, last_proof: u64, proof: u64) -> bool {
        self.rule.is_valid(last_proof, proof)
    }

    /// Find the smallest valid proof after `last_proof`.
    ///
    /// Runs until a proof is found.
    pub fn search(&self, last_proof: u64) -> u64 {
        let never = AtomicBool::new(false);
        self.scan(last_proof, u64::MAX, &never)
            .expect("unbounded proof search cannot give up")
    }

    /// Like [`search`](Self::search) but gives up after `max_trials` candidates.
    pub fn search_bounded(&self, last_proof: u64, max_trials: u64) -> Option<u64> {
        let never = AtomicBool::new(false);
        self.scan(last_proof, max_trials, &never)
    }

    /// Like [`search`](Self::search) but stops early once `cancel` is set.
    pub fn search_cancellable(&self, last_proof: u64, cancel: &AtomicBool) -> Option<u64> {
        self.scan(last_proof, u64::MAX, cancel)
    }

    fn scan(&self, last_proof: u64, max_trials: u64, cancel: &AtomicBool) -> Option<u64> {
        let start = Instant::now();
        let mut proof = 0u64;

        loop {
            if proof == max_trials {
                tracing::debug!(last_proof, trials = proof, "proof search exhausted its budget");
                return None;
            }

            if self.rule.is_valid(last_proof, proof) {
                tracing::info!(
                    last_proof,
                    proof,
                    trials = proof + 1,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "found proof"
                );
                return Some(proof);
            }

            proof += 1;

            if proof % PROGRESS_INTERVAL == 0 {
                if cancel.load(Ordering::Relaxed) {
                    tracing::info!(last_proof, trials = proof, "proof search cancelled");
                    return None;
                }
                let secs = start.elapsed().as_secs_f64();
                tracing::debug!(
                    last_proof,
                    trials = proof,
                    "proof search progress ({:.1} KH/s)",
                    proof as f64 / secs.max(f64::EPSILON) / 1000.0
                );
            }
        }
    }
}
