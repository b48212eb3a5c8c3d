//! Output formatting for retrieval results.
//!
//! Three pure views over a `RetrievalResult`: a node/edge graph for a
//! force-directed renderer, a paths-plus-attributes bundle for LLM prompts,
//! and Cypher reconstructions of every path for inspection in a graph
//! browser. None of them re-query the store or mutate their input.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::models::{GraphNode, GraphStep, RetrievalResult};

/// Node property keys surfaced ahead of the text body, label-specific first.
const NODE_DETAIL_FIELDS: [&str; 11] = [
    "parameter_field",
    "analysis_types",
    "metrics",
    "doc_pointer",
    "source_type",
    "relevant_parts",
    "start_date",
    "end_date",
    "user_role",
    "user_id",
    "preference_type",
];

const NODE_SHORT_FIELDS: [&str; 2] = ["conv_id", "status"];

const TIMESTAMP_FIELDS: [&str; 3] = ["update_time", "ingestion_time", "created_time"];

/// Cypher reconstructions of every retrieved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugQueries {
    pub paths_combined: String,
    pub individual_paths: Vec<String>,
}

/// Format a retrieval result for force-directed graph rendering.
///
/// Nodes and edges are deduplicated by id; the first occurrence's
/// attributes win, while `retrieval_activation` and `transfer_energy`
/// keep the running maximum across paths.
pub fn to_visualization(result: &RetrievalResult) -> Value {
    let seed_id = result_seed_id(result);
    let collected = collect_nodes(result);

    let mut edge_order: Vec<(&str, &str)> = Vec::new();
    let mut edges_by_key: HashMap<(&str, &str), (&GraphStep, f64)> = HashMap::new();
    for path in &result.paths {
        for step in &path.steps {
            let key = (step.edge.source_id.as_str(), step.edge.target_id.as_str());
            match edges_by_key.get_mut(&key) {
                Some((_, max_energy)) => {
                    *max_energy = max_energy.max(step.transfer_energy);
                }
                None => {
                    edge_order.push(key);
                    edges_by_key.insert(key, (step, step.transfer_energy));
                }
            }
        }
    }

    let nodes: Vec<Value> = collected
        .order
        .iter()
        .map(|id| {
            flattened_node(
                collected.by_id[id],
                collected.activation.get(id).copied(),
                Some(*id == seed_id),
            )
        })
        .collect();

    let edges: Vec<Value> = edge_order
        .iter()
        .map(|key| {
            let (step, max_energy) = edges_by_key[key];
            visualization_edge(step, max_energy)
        })
        .collect();

    json!({ "nodes": nodes, "edges": edges })
}

/// Format a retrieval result for LLM consumption: rendered path strings
/// plus flattened node and edge attribute tables.
pub fn to_llm_context(result: &RetrievalResult) -> Value {
    let seed_id = result_seed_id(result);

    let mut path_strings: Vec<String> = Vec::new();
    for (idx, path) in result.paths.iter().enumerate() {
        let mut parts: Vec<String> = Vec::new();
        for step in &path.steps {
            if parts.is_empty() {
                parts.push(llm_node(&step.from_node, step.from_node.id == seed_id));
            }
            parts.push(llm_edge(step));
            parts.push(llm_node(&step.to_node, false));
        }
        if !parts.is_empty() {
            path_strings.push(format!("Path {}: {}", idx + 1, parts.join(" -> ")));
        }
    }

    let collected = collect_nodes(result);
    let nodes: Vec<Value> = collected
        .order
        .iter()
        .map(|id| flattened_node(collected.by_id[id], collected.activation.get(id).copied(), None))
        .collect();

    json!({
        "paths": path_strings,
        "node_and_edge_attributes": {
            "nodes": nodes,
            "edges": llm_edges(result),
        },
    })
}

/// Rebuild each retrieved path as a Cypher pattern over literal node ids,
/// plus one combined multi-pattern query showing the whole exploration.
/// The contract is textual reconstructability; that the strings execute
/// against the store is incidental.
pub fn to_debug_queries(result: &RetrievalResult) -> DebugQueries {
    let seed_id = result_seed_id(result);

    let mut path_patterns: Vec<String> = Vec::new();
    for (path_idx, path) in result.paths.iter().enumerate() {
        let mut node_ids = vec![seed_id.to_string()];
        node_ids.extend(path.steps.iter().map(|step| step.to_node.id.clone()));
        let pattern = node_ids
            .iter()
            .enumerate()
            .map(|(node_idx, id)| cypher_node_pattern(&format!("n{path_idx}_{node_idx}"), id))
            .collect::<Vec<_>>()
            .join("-[:RELATES]-");
        path_patterns.push(pattern);
    }

    let individual_paths = path_patterns
        .iter()
        .enumerate()
        .map(|(idx, pattern)| format!("MATCH p{idx} = {pattern} RETURN p{idx}"))
        .collect();

    let paths_combined = if path_patterns.is_empty() {
        String::new()
    } else {
        let patterns = path_patterns
            .iter()
            .enumerate()
            .map(|(idx, pattern)| format!("p{idx} = {pattern}"))
            .collect::<Vec<_>>()
            .join(", ");
        let returns = (0..path_patterns.len())
            .map(|idx| format!("p{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("MATCH {patterns} RETURN {returns}")
    };

    DebugQueries {
        paths_combined,
        individual_paths,
    }
}

fn result_seed_id(result: &RetrievalResult) -> &str {
    result
        .seed_node
        .as_ref()
        .map(|node| node.id.as_str())
        .unwrap_or(result.seed.node_id.as_str())
}

/// Nodes gathered from all paths: order of first appearance, lookup by id,
/// and the maximum incoming activation per node (the seed gets its score).
struct CollectedNodes<'a> {
    order: Vec<&'a str>,
    by_id: HashMap<&'a str, &'a GraphNode>,
    activation: HashMap<&'a str, f64>,
}

fn collect_nodes(result: &RetrievalResult) -> CollectedNodes<'_> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_id: HashMap<&str, &GraphNode> = HashMap::new();
    let mut activation: HashMap<&str, f64> = HashMap::new();

    if let Some(seed_node) = &result.seed_node {
        order.push(&seed_node.id);
        by_id.insert(&seed_node.id, seed_node);
        activation.insert(&seed_node.id, result.seed.score);
    }

    for path in &result.paths {
        for step in &path.steps {
            for node in [&step.from_node, &step.to_node] {
                if !by_id.contains_key(node.id.as_str()) {
                    order.push(&node.id);
                    by_id.insert(&node.id, node);
                }
            }
            let entry = activation.entry(&step.to_node.id).or_insert(0.0);
            *entry = entry.max(step.transfer_energy);
        }
    }

    CollectedNodes {
        order,
        by_id,
        activation,
    }
}

/// Flatten a node's property bag: short fields first, text last. `is_seed`
/// is present only in the visualization view.
fn flattened_node(node: &GraphNode, activation: Option<f64>, is_seed: Option<bool>) -> Value {
    let props = &node.properties;
    let mut data = Map::new();
    data.insert("id".to_string(), json!(node.id));
    data.insert("label".to_string(), json!(primary_label(node)));
    if let Some(is_seed) = is_seed {
        data.insert("is_seed".to_string(), json!(is_seed));
    }

    for field in NODE_DETAIL_FIELDS {
        if let Some(value) = props.get(field) {
            data.insert(field.to_string(), value.clone());
        }
    }
    for field in NODE_SHORT_FIELDS {
        if let Some(value) = props.get(field) {
            data.insert(field.to_string(), value.clone());
        }
    }
    if let Some(tags) = props.get("tags") {
        data.insert("tags".to_string(), tags.clone());
    }
    if let Some(activation) = activation {
        data.insert(
            "retrieval_activation".to_string(),
            json!(round_to(activation, 3)),
        );
    }
    for field in TIMESTAMP_FIELDS {
        if let Some(value) = props.get(field) {
            data.insert(field.to_string(), value.clone());
        }
    }
    if let Some(text) = props.get("text").and_then(Value::as_str) {
        data.insert("text".to_string(), json!(clean_unicode_escapes(text)));
    }

    Value::Object(data)
}

fn visualization_edge(step: &GraphStep, transfer_energy: f64) -> Value {
    let props = &step.edge.properties;
    let mut data = Map::new();
    data.insert("source".to_string(), json!(step.edge.source_id));
    data.insert("target".to_string(), json!(step.edge.target_id));
    data.insert(
        "transfer_energy".to_string(),
        json!(round_to(transfer_energy, 3)),
    );
    if let Some(id) = props.get("id") {
        data.insert("edge_id".to_string(), id.clone());
    }
    if let Some(weight) = step.edge.weight {
        data.insert("weight".to_string(), json!(round_to(weight, 2)));
    }
    if let Some(tags) = props.get("tags") {
        data.insert("tags".to_string(), tags.clone());
    }
    if let Some(created) = props.get("created_time") {
        data.insert("created_time".to_string(), created.clone());
    }
    if let Some(text) = props.get("text").and_then(Value::as_str) {
        data.insert("text".to_string(), json!(clean_unicode_escapes(text)));
    }
    Value::Object(data)
}

/// Edge attribute table for the LLM view, keyed by the edge's `id`
/// property. Edges without one are left out.
fn llm_edges(result: &RetrievalResult) -> Vec<Value> {
    let mut order: Vec<String> = Vec::new();
    let mut edges_by_id: HashMap<String, Value> = HashMap::new();

    for path in &result.paths {
        for step in &path.steps {
            let Some(edge_id) = step.edge.properties.get("id").and_then(Value::as_str) else {
                continue;
            };

            if let Some(existing) = edges_by_id.get_mut(edge_id) {
                let current = existing
                    .get("transfer_energy")
                    .and_then(Value::as_f64)
                    .unwrap_or(0.0);
                let energy = round_to(step.transfer_energy, 3);
                if energy > current {
                    existing["transfer_energy"] = json!(energy);
                }
                continue;
            }

            let mut data = Map::new();
            data.insert("edge_id".to_string(), json!(edge_id));
            data.insert("source_node_id".to_string(), json!(step.edge.source_id));
            data.insert("target_node_id".to_string(), json!(step.edge.target_id));
            data.insert(
                "transfer_energy".to_string(),
                json!(round_to(step.transfer_energy, 3)),
            );
            if let Some(weight) = step.edge.weight {
                data.insert("weight".to_string(), json!(round_to(weight, 2)));
            }
            if let Some(tags) = step.edge.properties.get("tags") {
                data.insert("tags".to_string(), tags.clone());
            }
            if let Some(created) = step.edge.properties.get("created_time") {
                data.insert("created_time".to_string(), created.clone());
            }
            if let Some(text) = step.edge.properties.get("text").and_then(Value::as_str) {
                data.insert("text".to_string(), json!(clean_unicode_escapes(text)));
            }

            order.push(edge_id.to_string());
            edges_by_id.insert(edge_id.to_string(), Value::Object(data));
        }
    }

    order
        .into_iter()
        .filter_map(|id| edges_by_id.remove(&id))
        .collect()
}

/// Render a node for a path string: `[SEED] (Label Id: "first 12 words...")`.
fn llm_node(node: &GraphNode, is_seed: bool) -> String {
    let label = primary_label(node);
    let marker = if is_seed { "[SEED] " } else { "" };

    match pick_text(&node.properties) {
        Some(text) => {
            let text = clean_unicode_escapes(&text);
            let words: Vec<&str> = text.split_whitespace().collect();
            let short = words.iter().take(12).copied().collect::<Vec<_>>().join(" ");
            let ellipsis = if words.len() > 12 { "..." } else { "" };
            format!("{marker}({label} {}: \"{short}{ellipsis}\")", node.id)
        }
        None => format!("{marker}({label} {})", node.id),
    }
}

/// Render an edge for a path string: `[EdgeId "full text" weight=X.XX
/// activation_score=Y.YYY]`. Edge text is never truncated.
fn llm_edge(step: &GraphStep) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(id) = step.edge.properties.get("id").and_then(Value::as_str) {
        if !id.is_empty() {
            parts.push(id.to_string());
        }
    }
    if let Some(text) = step.edge.properties.get("text").and_then(Value::as_str) {
        if !text.is_empty() {
            parts.push(format!("\"{}\"", clean_unicode_escapes(text)));
        }
    }
    if let Some(weight) = step.edge.weight {
        parts.push(format!("weight={weight:.2}"));
    }
    parts.push(format!("activation_score={:.3}", step.transfer_energy));

    format!("[{}]", parts.join(" "))
}

fn primary_label(node: &GraphNode) -> &str {
    node.labels.first().map(String::as_str).unwrap_or("Node")
}

/// First non-blank display text among the usual property keys, capped at
/// 140 chars.
fn pick_text(props: &Map<String, Value>) -> Option<String> {
    for key in ["title", "name", "text", "summary", "description"] {
        if let Some(value) = props.get(key).and_then(Value::as_str) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(truncate(trimmed, 140));
            }
        }
    }
    None
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let cut: String = value.chars().take(limit - 3).collect();
    format!("{}...", cut.trim_end())
}

fn cypher_node_pattern(alias: &str, node_id: &str) -> String {
    format!("({alias} {{id: {}}})", quote_cypher_literal(node_id))
}

fn quote_cypher_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Decode escape sequences that commonly leak into stored text.
fn clean_unicode_escapes(text: &str) -> String {
    text.replace("\\u2013", "-")
        .replace("\\u2014", "--")
        .replace("\\u2019", "'")
        .replace("\\u201c", "\"")
        .replace("\\u201d", "\"")
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GraphEdge, GraphPath, SeedInput, TerminatedReason};

    fn node(id: &str, label: &str, text: Option<&str>) -> GraphNode {
        let mut properties = Map::new();
        properties.insert("id".to_string(), json!(id));
        if let Some(text) = text {
            properties.insert("text".to_string(), json!(text));
        }
        GraphNode {
            id: id.to_string(),
            labels: vec![label.to_string()],
            properties,
        }
    }

    fn edge(source: &str, target: &str, id: &str, text: &str, weight: f64) -> GraphEdge {
        let mut properties = Map::new();
        properties.insert("id".to_string(), json!(id));
        properties.insert("text".to_string(), json!(text));
        properties.insert("weight".to_string(), json!(weight));
        GraphEdge {
            source_id: source.to_string(),
            target_id: target.to_string(),
            edge_type: "RELATES".to_string(),
            properties,
            weight: Some(weight),
            tags: vec![],
        }
    }

    fn step(from: GraphNode, to: GraphNode, edge: GraphEdge, energy: f64) -> GraphStep {
        GraphStep {
            from_node: from,
            edge,
            to_node: to,
            transfer_energy: energy,
        }
    }

    fn pilot_result() -> RetrievalResult {
        let seed = node(
            "N3204",
            "AgentAction",
            Some("Design targeted 5% discount pilot for at-risk premium customers"),
        );
        let event = node(
            "N3201",
            "Event",
            Some("Targeted discount A/B pilot window for premium at-risk cohort"),
        );
        let hop = step(
            seed.clone(),
            event.clone(),
            edge(
                "N3204",
                "N3201",
                "E3423",
                "Pilot window triggers experimental design and simulation.",
                0.91,
            ),
            0.041,
        );

        RetrievalResult {
            seed: SeedInput {
                node_id: "N3204".to_string(),
                score: 0.87,
            },
            seed_node: Some(seed),
            paths: vec![GraphPath { steps: vec![hop] }],
            max_depth_reached: 1,
            terminated_reason: TerminatedReason::MaxDepth,
        }
    }

    // ========================================================================
    // TEST 1: LLM path string renders exactly
    // ========================================================================
    #[test]
    fn test_llm_path_string_format() {
        let context = to_llm_context(&pilot_result());
        let paths = context["paths"].as_array().unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0].as_str().unwrap(),
            "Path 1: [SEED] (AgentAction N3204: \"Design targeted 5% discount pilot for \
             at-risk premium customers\") -> [E3423 \"Pilot window triggers experimental \
             design and simulation.\" weight=0.91 activation_score=0.041] -> \
             (Event N3201: \"Targeted discount A/B pilot window for premium at-risk cohort\")"
        );
    }

    // ========================================================================
    // TEST 2: node text truncates to 12 words with trailing ellipsis
    // ========================================================================
    #[test]
    fn test_llm_node_truncates_to_twelve_words() {
        let long = node(
            "N1",
            "Event",
            Some("one two three four five six seven eight nine ten eleven twelve thirteen fourteen"),
        );
        let rendered = llm_node(&long, false);
        assert_eq!(
            rendered,
            "(Event N1: \"one two three four five six seven eight nine ten eleven twelve...\")"
        );

        let short = node("N2", "Event", Some("just a few words"));
        assert_eq!(llm_node(&short, false), "(Event N2: \"just a few words\")");
    }

    #[test]
    fn test_llm_node_without_text() {
        let bare = GraphNode {
            id: "N9".to_string(),
            labels: vec!["DataSource".to_string()],
            properties: Map::new(),
        };
        assert_eq!(llm_node(&bare, true), "[SEED] (DataSource N9)");
    }

    // ========================================================================
    // TEST 3: edge rendering omits absent fields, keeps text untruncated
    // ========================================================================
    #[test]
    fn test_llm_edge_without_weight_or_id() {
        let mut e = edge("A", "B", "", "", 0.5);
        e.properties = Map::new();
        e.weight = None;
        let s = step(node("A", "Node", None), node("B", "Node", None), e, 0.1234);
        assert_eq!(llm_edge(&s), "[activation_score=0.123]");
    }

    // ========================================================================
    // TEST 4: visualization nodes dedupe by id, seed flagged, energies max
    // ========================================================================
    #[test]
    fn test_visualization_shape() {
        let seed = node("S", "UserRequest", Some("seed text"));
        let a = node("A", "Event", None);
        let b = node("B", "DataSource", None);

        let path_one = GraphPath {
            steps: vec![
                step(seed.clone(), a.clone(), edge("S", "A", "E1", "t", 0.8), 0.4),
                step(a.clone(), b.clone(), edge("A", "B", "E2", "t", 0.6), 0.2),
            ],
        };
        // Second path revisits the same first hop with lower energy.
        let path_two = GraphPath {
            steps: vec![step(
                seed.clone(),
                a.clone(),
                edge("S", "A", "E1", "t", 0.8),
                0.3,
            )],
        };

        let result = RetrievalResult {
            seed: SeedInput {
                node_id: "S".to_string(),
                score: 0.9,
            },
            seed_node: Some(seed),
            paths: vec![path_one, path_two],
            max_depth_reached: 2,
            terminated_reason: TerminatedReason::NoMorePaths,
        };

        let viz = to_visualization(&result);
        let nodes = viz["nodes"].as_array().unwrap();
        let edges = viz["edges"].as_array().unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0]["id"], "S");
        assert_eq!(nodes[0]["is_seed"], true);
        assert_eq!(nodes[0]["retrieval_activation"], 0.9);
        assert!(nodes[1..].iter().all(|n| n["is_seed"] == false));

        // A's activation is the max over both incoming steps.
        let a_node = nodes.iter().find(|n| n["id"] == "A").unwrap();
        assert_eq!(a_node["retrieval_activation"], 0.4);

        // S->A deduplicated with max energy; weight rounded to 2 decimals.
        assert_eq!(edges.len(), 2);
        let first = &edges[0];
        assert_eq!(first["source"], "S");
        assert_eq!(first["target"], "A");
        assert_eq!(first["transfer_energy"], 0.4);
        assert_eq!(first["weight"], 0.8);
        assert_eq!(first["edge_id"], "E1");
    }

    // ========================================================================
    // TEST 5: formatters are pure: identical inputs, identical outputs
    // ========================================================================
    #[test]
    fn test_formatters_are_pure() {
        let result = pilot_result();
        assert_eq!(to_visualization(&result), to_visualization(&result));
        assert_eq!(to_llm_context(&result), to_llm_context(&result));
        assert_eq!(to_debug_queries(&result), to_debug_queries(&result));
    }

    // ========================================================================
    // TEST 6: debug queries rebuild paths with literal ids
    // ========================================================================
    #[test]
    fn test_debug_queries_single_path() {
        let queries = to_debug_queries(&pilot_result());
        assert_eq!(
            queries.individual_paths,
            vec![
                "MATCH p0 = (n0_0 {id: \"N3204\"})-[:RELATES]-(n0_1 {id: \"N3201\"}) RETURN p0"
                    .to_string()
            ]
        );
        assert_eq!(
            queries.paths_combined,
            "MATCH p0 = (n0_0 {id: \"N3204\"})-[:RELATES]-(n0_1 {id: \"N3201\"}) RETURN p0"
        );
    }

    #[test]
    fn test_debug_queries_combined_multi_path() {
        let seed = node("S", "Event", None);
        let mk_path = |to: &str| GraphPath {
            steps: vec![step(
                seed.clone(),
                node(to, "Event", None),
                edge("S", to, "E", "t", 0.5),
                0.2,
            )],
        };
        let result = RetrievalResult {
            seed: SeedInput {
                node_id: "S".to_string(),
                score: 1.0,
            },
            seed_node: Some(seed.clone()),
            paths: vec![mk_path("A"), mk_path("B")],
            max_depth_reached: 1,
            terminated_reason: TerminatedReason::NoMorePaths,
        };

        let queries = to_debug_queries(&result);
        assert_eq!(queries.individual_paths.len(), 2);
        assert_eq!(
            queries.paths_combined,
            "MATCH p0 = (n0_0 {id: \"S\"})-[:RELATES]-(n0_1 {id: \"A\"}), \
             p1 = (n1_0 {id: \"S\"})-[:RELATES]-(n1_1 {id: \"B\"}) RETURN p0, p1"
        );
    }

    #[test]
    fn test_debug_queries_escapes_literals() {
        assert_eq!(quote_cypher_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_debug_queries_empty_paths() {
        let result = RetrievalResult {
            seed: SeedInput {
                node_id: "Z".to_string(),
                score: 0.9,
            },
            seed_node: None,
            paths: vec![],
            max_depth_reached: 0,
            terminated_reason: TerminatedReason::SeedNotFound,
        };
        let queries = to_debug_queries(&result);
        assert_eq!(queries.paths_combined, "");
        assert!(queries.individual_paths.is_empty());
    }

    // ========================================================================
    // TEST 7: flattening puts label-specific fields before text
    // ========================================================================
    #[test]
    fn test_flatten_field_order() {
        let mut properties = Map::new();
        properties.insert("text".to_string(), json!("body text"));
        properties.insert("source_type".to_string(), json!("parquet"));
        properties.insert("conv_id".to_string(), json!("c-17"));
        properties.insert("ingestion_time".to_string(), json!("2026-05-01T12:00:00"));
        properties.insert("tags".to_string(), json!(["pricing"]));
        let n = GraphNode {
            id: "D1".to_string(),
            labels: vec!["DataSource".to_string()],
            properties,
        };

        let flattened = flattened_node(&n, Some(0.25), None);
        let keys: Vec<&str> = flattened.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "id",
                "label",
                "source_type",
                "conv_id",
                "tags",
                "retrieval_activation",
                "ingestion_time",
                "text"
            ]
        );
    }

    // ========================================================================
    // TEST 8: unicode escape sequences are decoded in display text
    // ========================================================================
    #[test]
    fn test_clean_unicode_escapes() {
        assert_eq!(
            clean_unicode_escapes("A\\u2013B \\u2019quoted\\u2019"),
            "A-B 'quoted'"
        );
    }

    // ========================================================================
    // TEST 9: llm edge table keyed by edge id, missing ids skipped
    // ========================================================================
    #[test]
    fn test_llm_edges_skip_missing_ids() {
        let seed = node("S", "Event", None);
        let a = node("A", "Event", None);
        let mut bare_edge = edge("S", "A", "", "", 0.5);
        bare_edge.properties = Map::new();

        let result = RetrievalResult {
            seed: SeedInput {
                node_id: "S".to_string(),
                score: 1.0,
            },
            seed_node: Some(seed.clone()),
            paths: vec![GraphPath {
                steps: vec![step(seed, a, bare_edge, 0.3)],
            }],
            max_depth_reached: 1,
            terminated_reason: TerminatedReason::NoMorePaths,
        };

        let context = to_llm_context(&result);
        let edges = context["node_and_edge_attributes"]["edges"]
            .as_array()
            .unwrap();
        assert!(edges.is_empty());
    }
}
