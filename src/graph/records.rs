//! Typed records for the data this application visualizes.
//!
//! These structs mirror the JSON wire format produced by the chain indexer.
//! Untrusted input is first checked by the predicates in
//! [`crate::graph::validation`]; only values that pass are deserialized into
//! these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::export::ExportFormat;

/// Execution status of an on-chain transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Pending,
    Failed,
}

/// A single on-chain transaction as delivered by the indexer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub tx_hash: String,
    pub block_number: u64,
    /// Unix seconds.
    pub timestamp: i64,
    pub from: String,
    pub to: String,
    /// Decimal string; values exceed u64 range.
    pub value: String,
    pub gas_used: String,
    pub gas_price: String,
    pub status: TxStatus,
    pub chain_id: u64,
}

/// Status of a cross-chain transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossChainStatus {
    Pending,
    Completed,
    Failed,
}

/// A transfer spanning two chains, with its relayed messages.
///
/// The chain descriptors and message payloads vary by bridge protocol, so
/// they stay as raw JSON objects here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossChainTransactionRecord {
    pub tx_hash: String,
    pub source_chain: Value,
    pub destination_chain: Value,
    pub cross_chain_messages: Vec<Value>,
    pub status: CrossChainStatus,
    /// Unix seconds.
    pub timestamp: i64,
}

/// RPC endpoint description for one network.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEndpoint {
    pub rpc_url: String,
    pub chain_id: u64,
}

/// Mainnet/testnet endpoint pair the application can point at.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub mainnet: NetworkEndpoint,
    pub testnet: NetworkEndpoint,
}

/// The node-edge dataset handed to the rendering engine.
///
/// Element shape is the engine's concern; this layer only guarantees that
/// both sequences exist.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphDataset {
    pub nodes: Vec<Value>,
    pub edges: Vec<Value>,
}

impl GraphDataset {
    /// True when there is nothing to draw or export.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// One user-initiated export, created per request and discarded afterwards.
#[derive(Clone, Debug)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub requested_at: DateTime<Utc>,
}

impl ExportRequest {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            requested_at: Utc::now(),
        }
    }
}
