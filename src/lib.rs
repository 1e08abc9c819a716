//! Chainscope Library
//!
//! Control panel, validation layer, and export pipeline for the blockchain
//! transaction graph visualizer. The graph rendering engine is consumed
//! through the [`graph::GraphService`] capability and is not part of this
//! crate.

pub mod app;
pub mod export;
pub mod graph;
