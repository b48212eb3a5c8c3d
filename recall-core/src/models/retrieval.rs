use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::graph::{GraphEdge, GraphNode, GraphPath};

/// Seed handed over by the upstream vector/lexical search. `score` is the
/// hybrid similarity in (0, 1] and becomes the seed's initial activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedInput {
    pub node_id: String,
    pub score: f64,
}

/// Outcome of looking up a seed node by id.
#[derive(Debug, Clone)]
pub struct SeedFetchResult {
    pub node: Option<GraphNode>,
    pub labels: Vec<String>,
    pub found: bool,
}

/// Projection of a frontier entry sent to the expansion query.
#[derive(Debug, Clone)]
pub struct FrontierInput {
    pub node_id: String,
    pub activation: f64,
}

/// One live branch during BFS expansion.
#[derive(Debug, Clone)]
pub struct FrontierNode {
    pub node_id: String,
    pub activation: f64,
    pub path: GraphPath,
}

/// One row of batched expansion output, already thresholded and sorted
/// by the store (per parent, transfer energy descending).
#[derive(Debug, Clone)]
pub struct ExpansionCandidate {
    pub parent_id: String,
    pub neighbor_node: GraphNode,
    pub edge: GraphEdge,
    pub transfer_energy: f64,
}

/// State delta produced by one frontier selection round.
#[derive(Debug, Default)]
pub struct FrontierUpdate {
    pub next_frontier: Vec<FrontierNode>,
    pub completed_paths: Vec<GraphPath>,
    pub newly_visited: HashSet<String>,
}

/// Why one seed's exploration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminatedReason {
    SeedNotFound,
    NoMorePaths,
    MaxDepth,
    Cancelled,
}

/// Final output of one seed's exploration.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalResult {
    pub seed: SeedInput,
    pub seed_node: Option<GraphNode>,
    pub paths: Vec<GraphPath>,
    pub max_depth_reached: usize,
    pub terminated_reason: TerminatedReason,
}
