//! Graph algorithms over a dense adjacency matrix: traversal, shortest paths,
//! minimum spanning trees and an ant colony heuristic for the traveling salesman problem.

mod error;
pub mod graph;
pub mod io;

pub use error::{Error, Result};
pub use graph::{
    mst::minimum_spanning_tree,
    shortest_path::{all_pairs_shortest_paths, shortest_path},
    traversal::{breadth_first, depth_first, traverse, Traversal},
    tsp::{solve_tsp, AntColonyConfig, RandomSource, Tour},
    Graph,
};
pub use io::{export_dot, load_graph};
