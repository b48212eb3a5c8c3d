//! Graph store connector — the two read-only Cypher queries behind retrieval.
//!
//! Transfer energy and tag similarity are computed inside the store so whole
//! neighborhoods never cross the wire; the result set comes back grouped by
//! parent and sorted by energy descending, which lets the traversal take
//! top-K per parent without re-sorting.

use std::collections::HashSet;

use async_trait::async_trait;
use neo4rs::{query, Graph, Row};
use serde_json::{Map, Value};

use crate::config::RetrieverConfig;
use crate::error::RecallError;
use crate::models::{ExpansionCandidate, FrontierInput, GraphEdge, GraphNode, SeedFetchResult};

/// Seed lookup by stored `id` property, any label.
const SEED_QUERY: &str = "
MATCH (n {id: $node_id})
RETURN properties(n) AS data, labels(n) AS labels
";

/// Batched frontier expansion. For each frontier entry (f, R) and each
/// RELATES edge from f to an unvisited neighbor:
///
///   T = (R * coalesce(weight, 0.01) / sqrt(degree(f))) * tag_sim
///
/// where degree is counted undirected at query time and tag_sim is the
/// floored Jaccard of edge tags against query tags. Rows below the
/// activation threshold are dropped in-store.
const EXPAND_QUERY: &str = "
UNWIND range(0, size($frontier_ids) - 1) AS i
WITH $frontier_ids[i] AS parent_id, $frontier_activations[i] AS activation
MATCH (current {id: parent_id})
WITH current, parent_id, activation,
     COUNT { (current)-[:RELATES]-() } AS degree

MATCH (current)-[r:RELATES]-(neighbor)
WHERE NOT neighbor.id IN $visited_ids

WITH parent_id, r, neighbor, activation, degree,
     coalesce(r.tags, []) AS eTags
WITH parent_id, r, neighbor, activation, degree, eTags,
     size([t IN eTags WHERE t IN $query_tags]) AS inter_count
WITH parent_id, r, neighbor, activation, degree, eTags, inter_count,
     CASE
         WHEN $query_tags_count = 0 THEN 1.0
         WHEN size(eTags) = 0       THEN $tag_sim_floor
         ELSE $tag_sim_floor
              + (1.0 - $tag_sim_floor)
              * toFloat(inter_count)
              / (size(eTags) + $query_tags_count - inter_count)
     END AS tag_sim

WITH parent_id, r, neighbor,
     (activation * coalesce(r.weight, 0.01) / sqrt(toFloat(degree))) * tag_sim
         AS transfer_energy

WHERE transfer_energy > $min_threshold

RETURN parent_id,
       properties(neighbor) AS neighbor_data,
       labels(neighbor)     AS neighbor_labels,
       neighbor.id          AS neighbor_id,
       properties(r)        AS edge_data,
       transfer_energy
ORDER BY parent_id, transfer_energy DESC
";

/// Read-only access to the property graph.
///
/// The production implementation is [`Neo4jConnector`]; tests swap in
/// in-memory fakes, the same seam the rest of the system uses for any
/// external collaborator.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Look up a seed node by id. Safe to call concurrently.
    async fn fetch_seed(&self, node_id: &str) -> Result<SeedFetchResult, RecallError>;

    /// Expand every frontier entry in one batched query. The returned list
    /// is grouped by `parent_id` and sorted by `transfer_energy` descending
    /// within each group.
    async fn expand_frontier(
        &self,
        frontier: &[FrontierInput],
        visited_ids: &HashSet<String>,
        query_tags: &[String],
    ) -> Result<Vec<ExpansionCandidate>, RecallError>;
}

/// Executes the two Cypher queries and parses rows into typed records.
/// No business logic, no BFS state.
pub struct Neo4jConnector {
    graph: Graph,
    tag_sim_floor: f64,
    min_activation: f64,
}

impl Neo4jConnector {
    pub fn new(graph: Graph, config: &RetrieverConfig) -> Self {
        Self {
            graph,
            tag_sim_floor: config.tag_sim_floor,
            min_activation: config.min_activation,
        }
    }
}

#[async_trait]
impl GraphStore for Neo4jConnector {
    async fn fetch_seed(&self, node_id: &str) -> Result<SeedFetchResult, RecallError> {
        let q = query(SEED_QUERY).param("node_id", node_id);
        let mut rows = self.graph.execute(q).await?;

        let Some(row) = rows.next().await? else {
            return Ok(SeedFetchResult {
                node: None,
                labels: Vec::new(),
                found: false,
            });
        };

        let data: Map<String, Value> = get_column(&row, "data")?;
        let labels: Vec<String> = get_column(&row, "labels")?;
        let id = data
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or(node_id)
            .to_string();

        Ok(SeedFetchResult {
            node: Some(GraphNode {
                id,
                labels: labels.clone(),
                properties: data,
            }),
            labels,
            found: true,
        })
    }

    async fn expand_frontier(
        &self,
        frontier: &[FrontierInput],
        visited_ids: &HashSet<String>,
        query_tags: &[String],
    ) -> Result<Vec<ExpansionCandidate>, RecallError> {
        if frontier.is_empty() {
            return Ok(Vec::new());
        }

        let frontier_ids: Vec<String> = frontier.iter().map(|f| f.node_id.clone()).collect();
        let frontier_activations: Vec<f64> = frontier.iter().map(|f| f.activation).collect();
        let visited: Vec<String> = visited_ids.iter().cloned().collect();

        let q = query(EXPAND_QUERY)
            .param("frontier_ids", frontier_ids)
            .param("frontier_activations", frontier_activations)
            .param("visited_ids", visited)
            .param("query_tags", query_tags.to_vec())
            .param("query_tags_count", query_tags.len() as i64)
            .param("tag_sim_floor", self.tag_sim_floor)
            .param("min_threshold", self.min_activation);

        let mut rows = self.graph.execute(q).await?;
        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            candidates.push(parse_candidate(&row)?);
        }
        Ok(candidates)
    }
}

fn parse_candidate(row: &Row) -> Result<ExpansionCandidate, RecallError> {
    let parent_id: String = get_column(row, "parent_id")?;
    let neighbor_id: Option<String> = get_column(row, "neighbor_id")?;
    let Some(neighbor_id) = neighbor_id else {
        return Err(RecallError::MalformedRecord(format!(
            "neighbor of {parent_id} is missing the id property"
        )));
    };

    let neighbor_data: Map<String, Value> = get_column(row, "neighbor_data")?;
    let neighbor_labels: Vec<String> = get_column(row, "neighbor_labels")?;
    let edge_data: Map<String, Value> = get_column(row, "edge_data")?;
    let transfer_energy: f64 = get_column(row, "transfer_energy")?;

    let (weight, tags) = edge_attributes(&edge_data);

    Ok(ExpansionCandidate {
        parent_id: parent_id.clone(),
        neighbor_node: GraphNode {
            id: neighbor_id.clone(),
            labels: neighbor_labels,
            properties: neighbor_data,
        },
        edge: GraphEdge {
            source_id: parent_id,
            target_id: neighbor_id,
            edge_type: "RELATES".to_string(),
            properties: edge_data,
            weight,
            tags,
        },
        transfer_energy,
    })
}

/// Pull `weight` and `tags` out of the edge property bag.
fn edge_attributes(edge_data: &Map<String, Value>) -> (Option<f64>, Vec<String>) {
    let weight = edge_data.get("weight").and_then(Value::as_f64);
    let tags = edge_data
        .get("tags")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    (weight, tags)
}

fn get_column<'a, T: serde::Deserialize<'a>>(row: &'a Row, key: &str) -> Result<T, RecallError> {
    row.get::<T>(key)
        .map_err(|e| RecallError::MalformedRecord(format!("column {key}: {e}")))
}
