//! Ordering and depth for the kept GO hierarchy.

use std::collections::{HashMap, VecDeque};

use crate::obo::OboSubset;

/// Kahn's algorithm over child -> parent edges: parents come before their
/// children. Terms caught in cycles (possible once `has_part` or regulation
/// edges are kept) are appended afterwards, sorted by id.
pub fn topo_order(subset: &OboSubset) -> Vec<String> {
    let mut indeg: HashMap<&str, usize> = HashMap::new();
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in &subset.edges {
        *indeg.entry(e.child.as_str()).or_default() += 1;
        children.entry(e.parent.as_str()).or_default().push(e.child.as_str());
    }

    let mut queue: VecDeque<&str> = subset
        .ids()
        .filter(|id| indeg.get(id).copied().unwrap_or(0) == 0)
        .collect();
    let mut order: Vec<String> = Vec::with_capacity(subset.nodes.len());

    while let Some(u) = queue.pop_front() {
        order.push(u.to_string());
        for &v in children.get(u).map(Vec::as_slice).unwrap_or(&[]) {
            if let Some(d) = indeg.get_mut(v) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(v);
                }
            }
        }
    }

    if order.len() < subset.nodes.len() {
        let mut remaining: Vec<String> = subset
            .ids()
            .filter(|id| indeg.get(id).copied().unwrap_or(0) > 0)
            .map(str::to_string)
            .collect();
        tracing::warn!(count = remaining.len(), "cycle in kept edges; appending terms by id");
        remaining.sort();
        order.extend(remaining);
    }
    order
}

/// Depth = BFS distance from the nearest root along parent -> child edges.
pub fn compute_depths(subset: &OboSubset) -> HashMap<String, usize> {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in &subset.edges {
        children.entry(e.parent.as_str()).or_default().push(e.child.as_str());
    }

    let mut depth: HashMap<String, usize> = HashMap::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    for r in &subset.roots {
        depth.insert(r.clone(), 0);
        queue.push_back(r.as_str());
    }

    while let Some(u) = queue.pop_front() {
        let d = depth.get(u).copied().unwrap_or(0);
        for &v in children.get(u).map(Vec::as_slice).unwrap_or(&[]) {
            let better = depth.get(v).is_none_or(|&dv| d + 1 < dv);
            if better {
                depth.insert(v.to_string(), d + 1);
                queue.push_back(v);
            }
        }
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obo::{OboEdge, OboNode};

    fn subset(ids: &[&str], edges: &[(&str, &str)]) -> OboSubset {
        let mut s = OboSubset::default();
        for id in ids {
            s.upsert(OboNode {
                id: id.to_string(),
                label: id.to_string(),
                namespace: None,
            });
        }
        s.edges = edges
            .iter()
            .map(|(c, p)| OboEdge {
                child: c.to_string(),
                parent: p.to_string(),
                predicate: "is_a".to_string(),
            })
            .collect();
        let children: Vec<&str> = edges.iter().map(|(c, _)| *c).collect();
        s.roots = ids.iter().filter(|id| !children.contains(id)).map(|id| id.to_string()).collect();
        s
    }

    #[test]
    fn parents_precede_children() {
        // Inserted child-first on purpose.
        let s = subset(&["leaf", "mid", "root"], &[("leaf", "mid"), ("mid", "root")]);
        assert_eq!(topo_order(&s), ["root", "mid", "leaf"]);
    }

    #[test]
    fn cycles_are_appended_sorted() {
        let s = subset(&["r", "b", "a"], &[("a", "b"), ("b", "a")]);
        assert_eq!(topo_order(&s), ["r", "a", "b"]);
    }

    #[test]
    fn depth_is_shortest_distance_from_a_root() {
        // `d` hangs off `a` directly and off `c` two levels down.
        let s = subset(
            &["a", "b", "c", "d"],
            &[("b", "a"), ("c", "b"), ("d", "c"), ("d", "a")],
        );
        let depth = compute_depths(&s);
        assert_eq!(depth["a"], 0);
        assert_eq!(depth["b"], 1);
        assert_eq!(depth["c"], 2);
        assert_eq!(depth["d"], 1);
    }

    #[test]
    fn cyclic_terms_have_no_depth() {
        let s = subset(&["r", "a", "b"], &[("a", "b"), ("b", "a")]);
        let depth = compute_depths(&s);
        assert_eq!(depth.len(), 1);
        assert!(!depth.contains_key("a"));
    }
}
