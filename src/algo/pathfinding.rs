//! Pathfinding algorithms
//!
//! Unweighted shortest path over the undirected adjacency view.

use crate::graph::{GraphError, GraphResult, GraphStore, NodeId};
use std::collections::{HashSet, VecDeque};
use tracing::trace;

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    /// Node ids from `source` to `target`, both included
    pub path: Vec<NodeId>,
    /// Number of edges walked
    pub hops: usize,
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Edges are followed in both directions. The first path to reach `target`
/// wins, so among equally short paths the one using earlier-added edges at
/// each step is returned. Nodes are marked visited when they are dequeued,
/// which means a node may sit in the queue more than once; only its first
/// dequeue expands it.
///
/// Returns `Err` if either endpoint is unknown and `Ok(None)` if the two
/// nodes are not connected.
pub fn shortest_path(
    store: &GraphStore,
    source: &str,
    target: &str,
) -> GraphResult<Option<PathResult>> {
    let source = store
        .get_node(source)
        .map(|node| node.id.clone())
        .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(source)))?;
    let target = store
        .get_node(target)
        .map(|node| node.id.clone())
        .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(target)))?;

    let mut queue: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::new();
    let mut visited: HashSet<NodeId> = HashSet::new();

    queue.push_back((source.clone(), vec![source.clone()]));

    while let Some((current, path)) = queue.pop_front() {
        if current == target {
            trace!("Path {} -> {} found after visiting {} nodes", source, target, visited.len());
            return Ok(Some(PathResult {
                source,
                target,
                hops: path.len() - 1,
                path,
            }));
        }

        if !visited.insert(current.clone()) {
            continue;
        }

        for edge_id in store.edge_ids_of(current.as_str()) {
            let Some(edge) = store.get_edge(*edge_id) else {
                continue;
            };

            let neighbor = edge.other_end(&current);
            if !visited.contains(neighbor) {
                let mut next = path.clone();
                next.push(neighbor.clone());
                queue.push_back((neighbor.clone(), next));
            }
        }
    }

    trace!("No path {} -> {} after visiting {} nodes", source, target, visited.len());
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(path: &[NodeId]) -> Vec<&str> {
        path.iter().map(NodeId::as_str).collect()
    }

    fn store_with(nodes: &[&str], edges: &[(&str, &str)]) -> GraphStore {
        let mut store = GraphStore::new();
        for id in nodes {
            store.add_node(*id, "Node");
        }
        for (a, b) in edges {
            store.add_edge(a, b, "link").unwrap();
        }
        store
    }

    #[test]
    fn test_bfs_chain() {
        let store = store_with(&["1", "2", "3", "4"], &[("1", "2"), ("2", "3"), ("3", "4")]);

        let result = shortest_path(&store, "1", "4").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["1", "2", "3", "4"]);
        assert_eq!(result.hops, 3);
        assert_eq!(result.source.as_str(), "1");
        assert_eq!(result.target.as_str(), "4");
    }

    #[test]
    fn test_bfs_ignores_edge_direction() {
        let store = store_with(&["1", "2", "3"], &[("2", "1"), ("3", "2")]);

        let result = shortest_path(&store, "1", "3").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_bfs_prefers_fewest_hops() {
        // 1-2-3-4 plus a shortcut 1-4 added last
        let store = store_with(
            &["1", "2", "3", "4"],
            &[("1", "2"), ("2", "3"), ("3", "4"), ("1", "4")],
        );

        let result = shortest_path(&store, "1", "4").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["1", "4"]);
        assert_eq!(result.hops, 1);
    }

    #[test]
    fn test_tie_break_follows_insertion_order() {
        let store = store_with(
            &["1", "2", "3", "4"],
            &[("1", "3"), ("1", "2"), ("2", "4"), ("3", "4")],
        );
        let result = shortest_path(&store, "1", "4").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["1", "3", "4"]);

        let store = store_with(
            &["1", "2", "3", "4"],
            &[("1", "2"), ("1", "3"), ("3", "4"), ("2", "4")],
        );
        let result = shortest_path(&store, "1", "4").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["1", "2", "4"]);
    }

    #[test]
    fn test_same_endpoint() {
        let store = store_with(&["x"], &[]);
        let result = shortest_path(&store, "x", "x").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["x"]);
        assert_eq!(result.hops, 0);
    }

    #[test]
    fn test_disconnected() {
        let store = store_with(&["1", "2"], &[]);
        assert_eq!(shortest_path(&store, "1", "2").unwrap(), None);
    }

    #[test]
    fn test_unknown_endpoint() {
        let store = store_with(&["1"], &[]);
        assert_eq!(
            shortest_path(&store, "1", "9"),
            Err(GraphError::NodeNotFound(NodeId::new("9")))
        );
        assert_eq!(
            shortest_path(&store, "9", "1"),
            Err(GraphError::NodeNotFound(NodeId::new("9")))
        );
    }

    #[test]
    fn test_cycles_and_self_loops_terminate() {
        let store = store_with(
            &["1", "2", "3", "4", "5"],
            &[("1", "1"), ("1", "2"), ("2", "3"), ("3", "1"), ("3", "3"), ("4", "5")],
        );

        let result = shortest_path(&store, "1", "3").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["1", "3"]);
        assert_eq!(shortest_path(&store, "1", "5").unwrap(), None);
    }

    #[test]
    fn test_parallel_edges_do_not_change_result() {
        let store = store_with(&["a", "b", "c"], &[("a", "b"), ("a", "b"), ("b", "c")]);
        let result = shortest_path(&store, "a", "c").unwrap().unwrap();
        assert_eq!(ids(&result.path), vec!["a", "b", "c"]);
    }
}
