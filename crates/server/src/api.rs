//! HTTP routes for the node.
//!
//! - `GET /mine`: find a proof, reward this node, seal the pool into a block
//! - `POST /transactions/new`: queue a transaction for the next block
//! - `GET /chain`: the full chain and its length
//! - `GET /health`: liveness and a short summary

use crate::error::{ApiError, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use powchain_chain::{Miner, SharedBlockchain};
use powchain_core::{Amount, Block, PreviousHash, Transaction};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub ledger: SharedBlockchain,
    pub miner: Arc<Miner>,
}

impl AppState {
    pub fn new(ledger: SharedBlockchain, miner: Miner) -> Self {
        Self {
            ledger,
            miner: Arc::new(miner),
        }
    }
}

/// Build the router with all node routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mine", get(mine))
        .route("/transactions/new", post(new_transaction))
        .route("/chain", get(full_chain))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub node_id: String,
    pub length: usize,
    pub latest_block_hash: String,
    pub pending_transactions: usize,
    pub hash_algorithm: String,
}

async fn mine(State(state): State<AppState>) -> Result<Json<MineResponse>> {
    let AppState { ledger, miner } = state;
    // The proof search is CPU-bound; keep it off the async workers.
    let block = tokio::task::spawn_blocking(move || miner.mine(&ledger)).await??;

    Ok(Json(MineResponse {
        message: "new block forged".to_string(),
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}

async fn new_transaction(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let request = NewTransaction::from_body(&body)?;
    let index = state.ledger.lock().add_transaction(request.into_transaction())?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("Transaction will be added to Block {index}"),
        }),
    ))
}

async fn full_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    let chain = state.ledger.lock().chain().to_vec();
    let length = chain.len();
    Json(ChainResponse { chain, length })
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let stats = state.ledger.lock().stats()?;
    Ok(Json(HealthResponse {
        status: "ok",
        node_id: state.miner.node_id().to_string(),
        length: stats.length,
        latest_block_hash: stats.latest_block_hash.to_hex(),
        pending_transactions: stats.mempool.total_transactions,
        hash_algorithm: stats.hash_algorithm.to_string(),
    }))
}

/// A transaction submission with all required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub sender: Value,
    pub recipient: Value,
    pub amount: Amount,
}

impl NewTransaction {
    const REQUIRED: [&'static str; 3] = ["sender", "recipient", "amount"];

    /// Parse a raw request body. Every field must be present; the values
    /// themselves are taken as given.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedRequest(format!("Invalid JSON body: {e}")))?;
        let Value::Object(mut object) = value else {
            return Err(ApiError::MalformedRequest("Expected a JSON object".to_string()));
        };

        if !Self::REQUIRED.iter().all(|key| object.contains_key(*key)) {
            return Err(ApiError::MalformedRequest("Missing values".to_string()));
        }

        let mut take = |key: &str| object.remove(key).unwrap_or(Value::Null);
        Ok(Self {
            sender: take("sender"),
            recipient: take("recipient"),
            amount: take("amount"),
        })
    }

    pub fn into_transaction(self) -> Transaction {
        Transaction::new(self.sender, self.recipient, self.amount)
    }
}
