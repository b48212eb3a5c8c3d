//! Activation-energy graph retriever — concurrent multi-path exploration.
//!
//! One task per seed, each owning its own store calls; results stream out
//! through a bounded channel as each exploration finishes, so an early
//! finisher is surfaced while the others are still running. Transient store
//! failures are retried per call with exponential backoff; a seed whose
//! retries are exhausted surfaces as an error item without touching the
//! other seeds.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::RetryIf;

use crate::config::RetrieverConfig;
use crate::connector::{GraphStore, Neo4jConnector};
use crate::error::RecallError;
use crate::models::{RetrievalResult, SeedInput, TerminatedReason};
use crate::traversal::TraversalState;

/// One streamed item: a finished exploration, or the error that ended it.
pub type ExplorationOutcome = Result<RetrievalResult, RecallError>;

pub struct GraphRetriever {
    store: Arc<dyn GraphStore>,
    config: RetrieverConfig,
}

impl GraphRetriever {
    pub fn new(store: Arc<dyn GraphStore>, config: RetrieverConfig) -> Self {
        Self { store, config }
    }

    /// Wire the retriever straight to a pooled graph handle.
    pub fn with_graph(graph: neo4rs::Graph, config: RetrieverConfig) -> Self {
        let connector = Neo4jConnector::new(graph, &config);
        Self::new(Arc::new(connector), config)
    }

    /// Launch one exploration task per seed and stream results as each task
    /// finishes. Output order is completion order, not input order.
    ///
    /// Preconditions (config shape, seed scores) are checked synchronously;
    /// nothing is spawned on failure. Dropping the receiver cancels the
    /// remaining explorations at their next store call, and cancelled seeds
    /// emit nothing. Must be called from within a Tokio runtime.
    pub fn explore(
        &self,
        seeds: Vec<SeedInput>,
        query_tags: Vec<String>,
    ) -> Result<mpsc::Receiver<ExplorationOutcome>, RecallError> {
        self.config.validate()?;
        validate_seeds(&seeds)?;

        // One slot per seed: every task can finish without blocking even if
        // the consumer is slow.
        let (tx, rx) = mpsc::channel(seeds.len());

        for seed in seeds {
            let store = Arc::clone(&self.store);
            let config = self.config.clone();
            let query_tags = query_tags.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let seed_id = seed.node_id.clone();
                match explore_single(store, &config, seed, &query_tags, &tx).await {
                    Ok(result) => {
                        let _ = tx.send(Ok(result)).await;
                    }
                    Err(RecallError::Cancelled) => {
                        tracing::debug!(seed_id = %seed_id, "exploration cancelled");
                    }
                    Err(e) => {
                        tracing::error!(seed_id = %seed_id, error = %e, "graph exploration failed after all retries");
                        let _ = tx
                            .send(Err(RecallError::Exploration {
                                seed_id,
                                source: Box::new(e),
                            }))
                            .await;
                    }
                }
            });
        }

        Ok(rx)
    }
}

/// Execute one full multi-path BFS exploration from `seed`.
async fn explore_single(
    store: Arc<dyn GraphStore>,
    config: &RetrieverConfig,
    seed: SeedInput,
    query_tags: &[String],
    results: &mpsc::Sender<ExplorationOutcome>,
) -> Result<RetrievalResult, RecallError> {
    if results.is_closed() {
        return Err(RecallError::Cancelled);
    }

    let seed_fetch = with_retry(config.max_retries, || store.fetch_seed(&seed.node_id)).await?;
    let seed_node = match seed_fetch.node {
        Some(node) if seed_fetch.found => node,
        _ => {
            tracing::info!(seed_id = %seed.node_id, "seed node not found in graph");
            return Ok(RetrievalResult {
                seed,
                seed_node: None,
                paths: Vec::new(),
                max_depth_reached: 0,
                terminated_reason: TerminatedReason::SeedNotFound,
            });
        }
    };

    let mut traversal = TraversalState::new(seed_node.clone(), seed.score, config.max_branches);

    for _depth in 0..config.max_depth {
        if traversal.frontier_is_empty() {
            break;
        }
        if results.is_closed() {
            return Err(RecallError::Cancelled);
        }

        let frontier_inputs = traversal.build_frontier_inputs();
        let candidates = with_retry(config.max_retries, || {
            store.expand_frontier(&frontier_inputs, traversal.visited(), query_tags)
        })
        .await?;

        traversal.advance(candidates);
    }

    traversal.finalize_remaining();
    let paths = traversal.into_paths();

    let max_depth_reached = paths.iter().map(|p| p.len()).max().unwrap_or(0);
    let terminated_reason = if max_depth_reached == config.max_depth {
        TerminatedReason::MaxDepth
    } else {
        TerminatedReason::NoMorePaths
    };

    tracing::debug!(
        seed_id = %seed.node_id,
        paths = paths.len(),
        max_depth_reached,
        "exploration finished"
    );

    Ok(RetrievalResult {
        seed,
        seed_node: Some(seed_node),
        paths,
        max_depth_reached,
        terminated_reason,
    })
}

/// Retry a single store call on transient failures: 50 ms, 100 ms, 200 ms, …
async fn with_retry<T, F, Fut>(max_retries: usize, op: F) -> Result<T, RecallError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RecallError>>,
{
    let backoff = ExponentialBackoff::from_millis(2)
        .factor(25)
        .take(max_retries);
    RetryIf::spawn(backoff, op, |e: &RecallError| {
        let transient = e.is_transient();
        if transient {
            tracing::warn!(error = %e, "transient graph store failure");
        }
        transient
    })
    .await
}

fn validate_seeds(seeds: &[SeedInput]) -> Result<(), RecallError> {
    if seeds.is_empty() {
        return Err(RecallError::Precondition(
            "at least one seed is required".to_string(),
        ));
    }
    for seed in seeds {
        if seed.node_id.is_empty() {
            return Err(RecallError::Precondition(
                "seed node_id must be non-empty".to_string(),
            ));
        }
        if !seed.score.is_finite() || seed.score <= 0.0 || seed.score > 1.0 {
            return Err(RecallError::Precondition(format!(
                "seed {} has score {} outside (0, 1]",
                seed.node_id, seed.score
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(node_id: &str, score: f64) -> SeedInput {
        SeedInput {
            node_id: node_id.to_string(),
            score,
        }
    }

    #[test]
    fn test_validate_seeds_accepts_valid_input() {
        assert!(validate_seeds(&[seed("N1", 0.5), seed("N2", 1.0)]).is_ok());
    }

    #[test]
    fn test_validate_seeds_rejects_empty_list() {
        assert!(matches!(
            validate_seeds(&[]),
            Err(RecallError::Precondition(_))
        ));
    }

    #[test]
    fn test_validate_seeds_rejects_bad_scores() {
        for score in [0.0, -0.2, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    validate_seeds(&[seed("N1", score)]),
                    Err(RecallError::Precondition(_))
                ),
                "score {score} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_seeds_rejects_empty_node_id() {
        assert!(matches!(
            validate_seeds(&[seed("", 0.5)]),
            Err(RecallError::Precondition(_))
        ));
    }
}
