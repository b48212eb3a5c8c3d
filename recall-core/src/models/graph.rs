use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node in the property graph, identified by its stored `id` property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub labels: Vec<String>,
    pub properties: Map<String, Value>,
}

/// A directed view of an underlying symmetric `RELATES` relationship,
/// oriented in the direction it was traversed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    pub edge_type: String,
    pub properties: Map<String, Value>,
    pub weight: Option<f64>,
    pub tags: Vec<String>,
}

/// One hop along a path, carrying the activation delivered to `to_node`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStep {
    pub from_node: GraphNode,
    pub edge: GraphEdge,
    pub to_node: GraphNode,
    pub transfer_energy: f64,
}

/// A contiguous sequence of steps from the seed to a leaf.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphPath {
    pub steps: Vec<GraphStep>,
}

impl GraphPath {
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// New path extending this one by a single step. The receiver is left
    /// untouched so sibling branches can share a prefix.
    pub fn with_step(&self, step: GraphStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn max_transfer_energy(&self) -> Option<f64> {
        self.steps
            .iter()
            .map(|s| s.transfer_energy)
            .reduce(f64::max)
    }

    pub fn min_transfer_energy(&self) -> Option<f64> {
        self.steps
            .iter()
            .map(|s| s.transfer_energy)
            .reduce(f64::min)
    }
}

// ============================================================================
// TESTS
// ============================================================================
