//! Clustered betweenness centrality on directed, positively-weighted graphs.
//!
//! Computes an approximate betweenness centrality (BC) vector by partitioning
//! the graph into communities (Louvain), computing exact intra-community BC
//! and border fingerprints per community, selecting a small representative
//! pivot set per topological-equivalence class (optionally aggregated
//! further by k-means++), and running a single-source Brandes pass from each
//! pivot over the whole graph, subtracting back out the intra-community
//! contribution already accounted for. An exact fallback (every vertex as
//! source) is provided for small graphs and for verifying the approximation.

pub mod cluster_evaluator;
pub mod data_structures;
pub mod driver;
pub mod error;
pub mod exact;
pub mod graph;
pub mod io;
pub mod louvain;
pub mod pivot;
pub mod single_source;
pub mod sssp;
pub mod subgraph;
pub mod vertex_info;

pub use driver::{clustered_bc, DriverOptions};
pub use error::{Error, Result};
pub use graph::{DegreeGraph, DirectedGraph, Graph};
pub use louvain::{CommunityDetector, Louvain};
pub use pivot::{aggregate_pivots_kmeans, select_pivots, PivotPolicy};
pub use subgraph::{SubGraph, SubGraphPolicy};
pub use vertex_info::VertexInfo;
