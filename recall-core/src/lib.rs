pub mod config;
pub mod connector;
pub mod db;
pub mod error;
pub mod format;
pub mod models;
pub mod retriever;
pub mod tags;
pub mod traversal;

pub use config::{RecallConfig, RetrieverConfig, StoreConfig};
pub use connector::{GraphStore, Neo4jConnector};
pub use error::RecallError;
pub use models::{RetrievalResult, SeedInput, TerminatedReason};
pub use retriever::GraphRetriever;
