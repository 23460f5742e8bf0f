use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a graph operation.
///
/// None of these are retried: the requested operation stops and the kind is handed back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("graph is empty")]
    GraphEmpty,

    #[error("vertex {vertex} not found, graph has {vertex_count} vertices")]
    VertexNotFound { vertex: i64, vertex_count: usize },

    #[error("graph file {} not found", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("graph file has wrong format at line {line}: {reason}")]
    FileFormat { line: usize, reason: String },

    #[error("could not write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Prim's algorithm ran out of reachable vertices before covering the graph.
    #[error("graph is disconnected, vertex {vertex} is unreachable from vertex 0")]
    Disconnected { vertex: usize },

    /// Ant tours need a positive weight between every ordered pair of distinct vertices.
    #[error("no positive-weight edge from {from} to {to}, tours need a complete graph")]
    IncompleteGraph { from: usize, to: usize },

    #[error("invalid ant colony configuration: {0}")]
    InvalidConfig(String),

    /// Internal invariant breach in tour construction.
    #[error("no unvisited vertex left to select from vertex {from}")]
    NoUnvisitedVertex { from: usize },
}
