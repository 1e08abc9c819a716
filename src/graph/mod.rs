//! Graph module
//!
//! Data records, boundary validation, layout identifiers, and the rendering
//! engine capability the control panel talks to.

mod layout;
mod records;
mod service;
pub mod validation;

pub use layout::LayoutKind;
pub use records::{
    CrossChainStatus, CrossChainTransactionRecord, ExportRequest, GraphDataset, NetworkConfig,
    NetworkEndpoint, TransactionRecord, TxStatus,
};
pub use service::{CallbackGraphService, GraphService, ImageFuture, StructuredFuture};
