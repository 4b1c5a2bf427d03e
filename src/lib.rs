//! Contraction hierarchies for static, weighted, directed graphs.
//!
//! [`preprocess`] contracts all vertices and returns a [`ContractedGraph`],
//! which answers point to point distance queries with a bidirectional search
//! that only ever climbs the hierarchy.

pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

pub use error::ChError;
pub use search::{
    ch::{contracted_graph::ContractedGraph, preprocess},
    PathFinding,
};
