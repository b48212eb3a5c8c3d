//! Floored Jaccard similarity between edge tags and query tags.
//!
//! The same arithmetic runs inside the expansion query (see `connector`), so
//! this function and the store agree to floating-point tolerance. It exists
//! host-side for tests and for anything that needs to re-derive an energy.

use std::collections::HashSet;

/// Mix edge-tag and query-tag sets into a similarity in `[floor, 1.0]`.
///
/// Empty query tags turn the filter off (returns exactly 1.0); empty edge
/// tags on a filtered query return exactly `floor`. Otherwise the Jaccard
/// overlap of the two sets is rescaled into `[floor, 1.0]`. Multiplicities
/// are ignored.
pub fn tag_sim(edge_tags: &[String], query_tags: &[String], floor: f64) -> f64 {
    if query_tags.is_empty() {
        return 1.0;
    }
    if edge_tags.is_empty() {
        return floor;
    }

    let edge: HashSet<&str> = edge_tags.iter().map(String::as_str).collect();
    let query: HashSet<&str> = query_tags.iter().map(String::as_str).collect();
    let inter = edge.intersection(&query).count();
    let union = edge.len() + query.len() - inter;

    floor + (1.0 - floor) * inter as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOOR: f64 = 0.15;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_query_tags_disable_filter() {
        assert_eq!(tag_sim(&tags(&["a", "b"]), &[], FLOOR), 1.0);
        assert_eq!(tag_sim(&[], &[], FLOOR), 1.0);
    }

    #[test]
    fn test_empty_edge_tags_hit_floor() {
        assert_eq!(tag_sim(&[], &tags(&["x"]), FLOOR), FLOOR);
    }

    #[test]
    fn test_disjoint_tags_hit_floor() {
        assert_eq!(tag_sim(&tags(&["a", "b"]), &tags(&["x", "y"]), FLOOR), FLOOR);
    }

    #[test]
    fn test_identical_sets_reach_one() {
        let sim = tag_sim(&tags(&["a", "b"]), &tags(&["b", "a"]), FLOOR);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_overlap() {
        // |{a,b} ∩ {b,c}| / |{a,b} ∪ {b,c}| = 1/3
        let sim = tag_sim(&tags(&["a", "b"]), &tags(&["b", "c"]), FLOOR);
        let expected = FLOOR + (1.0 - FLOOR) / 3.0;
        assert!((sim - expected).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric() {
        let left = tag_sim(&tags(&["a", "b", "c"]), &tags(&["b", "d"]), FLOOR);
        let right = tag_sim(&tags(&["b", "d"]), &tags(&["a", "b", "c"]), FLOOR);
        assert!((left - right).abs() < 1e-12);
    }

    #[test]
    fn test_multiplicities_ignored() {
        let with_dupes = tag_sim(&tags(&["a", "a", "b"]), &tags(&["a"]), FLOOR);
        let without = tag_sim(&tags(&["a", "b"]), &tags(&["a"]), FLOOR);
        assert!((with_dupes - without).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_hold() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["a"], &["a"]),
            (&["a"], &["b"]),
            (&["a", "b", "c"], &["c", "d"]),
        ];
        for (edge, query) in cases {
            let sim = tag_sim(&tags(edge), &tags(query), FLOOR);
            assert!((FLOOR..=1.0).contains(&sim), "sim {sim} out of bounds");
        }
    }
}
