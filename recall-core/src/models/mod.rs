pub mod graph;
pub mod retrieval;

pub use graph::{GraphEdge, GraphNode, GraphPath, GraphStep};
pub use retrieval::{
    ExpansionCandidate, FrontierInput, FrontierNode, FrontierUpdate, RetrievalResult,
    SeedFetchResult, SeedInput, TerminatedReason,
};
