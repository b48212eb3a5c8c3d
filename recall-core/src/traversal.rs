//! Per-seed BFS bookkeeping: frontier, visited set, completed paths.
//!
//! Purely in-memory and total over well-formed input; the store is never
//! touched from here. Cycle avoidance rests entirely on the visited set:
//! a claimed neighbor joins `visited` at the depth it is claimed, so it can
//! never re-enter any future frontier, and therefore no node id repeats
//! within a path.

use std::collections::{HashMap, HashSet};

use crate::models::{
    ExpansionCandidate, FrontierInput, FrontierNode, FrontierUpdate, GraphNode, GraphPath,
    GraphStep,
};

pub struct TraversalState {
    seed_node: GraphNode,
    frontier: Vec<FrontierNode>,
    visited: HashSet<String>,
    completed_paths: Vec<GraphPath>,
    depth: usize,
    max_branches: usize,
}

impl TraversalState {
    pub fn new(seed_node: GraphNode, seed_activation: f64, max_branches: usize) -> Self {
        let seed_id = seed_node.id.clone();
        Self {
            frontier: vec![FrontierNode {
                node_id: seed_id.clone(),
                activation: seed_activation,
                path: GraphPath::empty(),
            }],
            visited: HashSet::from([seed_id]),
            completed_paths: Vec::new(),
            depth: 0,
            max_branches,
            seed_node,
        }
    }

    pub fn frontier_is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Project the current frontier for the expansion query.
    pub fn build_frontier_inputs(&self) -> Vec<FrontierInput> {
        self.frontier
            .iter()
            .map(|f| FrontierInput {
                node_id: f.node_id.clone(),
                activation: f.activation,
            })
            .collect()
    }

    /// Group a flat candidate list by parent, preserving per-parent order.
    pub fn group_by_parent(
        candidates: Vec<ExpansionCandidate>,
    ) -> HashMap<String, Vec<ExpansionCandidate>> {
        let mut grouped: HashMap<String, Vec<ExpansionCandidate>> = HashMap::new();
        for candidate in candidates {
            grouped
                .entry(candidate.parent_id.clone())
                .or_default()
                .push(candidate);
        }
        grouped
    }

    /// Select the next frontier from one depth's expansion output.
    ///
    /// Each parent proposes its first `max_branches` candidates (the store
    /// sorts groups by energy descending). A neighbor proposed by several
    /// parents goes to the highest transfer energy; on a tie the parent
    /// earlier in the frontier keeps it. A losing parent does not refill
    /// from beyond its top-K slice. Parents with a non-empty path and no
    /// surviving claim have their path completed.
    pub fn select_next_frontier(
        &self,
        candidates_by_parent: &HashMap<String, Vec<ExpansionCandidate>>,
    ) -> FrontierUpdate {
        // neighbor id -> (frontier index, candidate index) of the winning claim
        let mut claims: HashMap<String, (usize, usize)> = HashMap::new();
        for (f_idx, f_node) in self.frontier.iter().enumerate() {
            let Some(candidates) = candidates_by_parent.get(&f_node.node_id) else {
                continue;
            };
            for (c_idx, candidate) in candidates.iter().take(self.max_branches).enumerate() {
                let neighbor_id = &candidate.neighbor_node.id;
                match claims.get(neighbor_id) {
                    Some(&(held_f, held_c)) => {
                        let held =
                            &candidates_by_parent[&self.frontier[held_f].node_id][held_c];
                        if candidate.transfer_energy > held.transfer_energy {
                            claims.insert(neighbor_id.clone(), (f_idx, c_idx));
                        }
                    }
                    None => {
                        claims.insert(neighbor_id.clone(), (f_idx, c_idx));
                    }
                }
            }
        }

        let mut update = FrontierUpdate::default();
        for (f_idx, f_node) in self.frontier.iter().enumerate() {
            let mut surviving = 0usize;
            if let Some(candidates) = candidates_by_parent.get(&f_node.node_id) {
                for (c_idx, candidate) in candidates.iter().take(self.max_branches).enumerate() {
                    if claims.get(&candidate.neighbor_node.id) != Some(&(f_idx, c_idx)) {
                        continue;
                    }
                    surviving += 1;
                    update
                        .newly_visited
                        .insert(candidate.neighbor_node.id.clone());

                    let step = GraphStep {
                        from_node: self.resolve_from_node(f_node),
                        edge: candidate.edge.clone(),
                        to_node: candidate.neighbor_node.clone(),
                        transfer_energy: candidate.transfer_energy,
                    };
                    update.next_frontier.push(FrontierNode {
                        node_id: candidate.neighbor_node.id.clone(),
                        activation: candidate.transfer_energy,
                        path: f_node.path.with_step(step),
                    });
                }
            }

            // A zero-step path is the seed itself; it never completes here.
            if surviving == 0 && !f_node.path.is_empty() {
                update.completed_paths.push(f_node.path.clone());
            }
        }
        update
    }

    /// Apply one depth step: select, merge visited, collect completions,
    /// swap in the new frontier.
    pub fn advance(&mut self, candidates: Vec<ExpansionCandidate>) {
        let grouped = Self::group_by_parent(candidates);
        let update = self.select_next_frontier(&grouped);
        self.visited.extend(update.newly_visited);
        self.completed_paths.extend(update.completed_paths);
        self.frontier = update.next_frontier;
        self.depth += 1;
    }

    /// At loop exit, every remaining frontier path with at least one step
    /// is completed as-is.
    pub fn finalize_remaining(&mut self) {
        let remaining: Vec<GraphPath> = self
            .frontier
            .iter()
            .filter(|f| !f.path.is_empty())
            .map(|f| f.path.clone())
            .collect();
        self.completed_paths.extend(remaining);
        self.frontier.clear();
    }

    pub fn into_paths(self) -> Vec<GraphPath> {
        self.completed_paths
    }

    fn resolve_from_node(&self, f_node: &FrontierNode) -> GraphNode {
        f_node
            .path
            .steps
            .last()
            .map(|step| step.to_node.clone())
            .unwrap_or_else(|| self.seed_node.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================
