//! Dijkstra's shortest paths on top of the indexed D-ary heap
//!
//! Vertices are dense ids `0..n`, which map one-to-one onto the key indices
//! of an [`IndexedMinDHeap`] sized to the graph. Every edge relaxation either
//! inserts the neighbor or calls [`decrease_key`](IndexedMinDHeap::decrease_key)
//! on it without checking first; a candidate that does not improve the
//! current tentative distance is a silent no-op.
//!
//! For graphs whose vertices are arbitrary values, [`LabeledGraph`] interns
//! labels into dense ids with a fast hash map (using FxHash).
//!
//! Edge costs must be non-negative.
//!
//! # Example
//!
//! ```rust
//! use indexed_dary_heap::pathfinding::{dijkstra, Graph};
//!
//! let mut graph = Graph::new(4);
//! graph.add_edge(0, 1, 4u32).unwrap();
//! graph.add_edge(0, 2, 1).unwrap();
//! graph.add_edge(2, 1, 2).unwrap();
//! graph.add_edge(1, 3, 5).unwrap();
//!
//! let paths = dijkstra(&graph, 0, 4).unwrap();
//! assert_eq!(paths.distance(3), Some(8));
//! assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
//! ```

use crate::dary::IndexedMinDHeap;
use crate::traits::HeapError;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as edge costs.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` must be the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Directed graph stored as adjacency lists over vertex ids `0..vertex_count()`
#[derive(Debug, Clone)]
pub struct Graph<C> {
    adjacency: Vec<Vec<(usize, C)>>,
}

impl<C: Cost> Graph<C> {
    /// Creates a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Graph {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Adds a vertex and returns its id
    pub fn add_vertex(&mut self) -> usize {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    /// Adds a directed edge `from -> to`
    ///
    /// # Errors
    /// [`HeapError::KeyOutOfBounds`] if either endpoint is not a vertex.
    pub fn add_edge(&mut self, from: usize, to: usize, cost: C) -> Result<(), HeapError> {
        let vertex_count = self.vertex_count();
        for vertex in [from, to] {
            if vertex >= vertex_count {
                return Err(HeapError::KeyOutOfBounds {
                    index: vertex,
                    capacity: vertex_count,
                });
            }
        }
        self.adjacency[from].push((to, cost));
        Ok(())
    }

    /// Outgoing edges of `vertex` as `(target, cost)` pairs
    pub fn neighbors(&self, vertex: usize) -> &[(usize, C)] {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Single-source result of [`dijkstra`]
#[derive(Debug, Clone)]
pub struct ShortestPaths<C> {
    source: usize,
    distance: Vec<Option<C>>,
    previous: Vec<Option<usize>>,
}

impl<C: Cost> ShortestPaths<C> {
    pub fn source(&self) -> usize {
        self.source
    }

    /// Shortest distance from the source, or `None` if `vertex` is unreachable
    pub fn distance(&self, vertex: usize) -> Option<C> {
        self.distance.get(vertex).copied().flatten()
    }

    /// Vertices on a shortest path from the source to `vertex`, both inclusive
    pub fn path_to(&self, vertex: usize) -> Option<Vec<usize>> {
        self.distance(vertex)?;

        let mut path = vec![vertex];
        let mut current = vertex;
        while let Some(prev) = self.previous[current] {
            path.push(prev);
            current = prev;
        }

        path.reverse();
        Some(path)
    }

    /// Number of vertices reachable from the source, the source included
    pub fn reachable_count(&self) -> usize {
        self.distance.iter().filter(|d| d.is_some()).count()
    }
}

/// Runs Dijkstra's algorithm from `source` over the whole graph.
///
/// `degree` is the branching factor of the underlying heap. Dense graphs
/// benefit from a larger degree because decrease-key only walks upward.
///
/// # Errors
/// - [`HeapError::Config`] if the graph has no vertices
/// - [`HeapError::KeyOutOfBounds`] if `source` is not a vertex
pub fn dijkstra<C: Cost>(
    graph: &Graph<C>,
    source: usize,
    degree: usize,
) -> Result<ShortestPaths<C>, HeapError> {
    search(graph, source, None, degree)
}

/// Runs Dijkstra's algorithm from `source`, stopping once `target` is settled.
///
/// Returns the path (both endpoints inclusive) and its cost, or `None` if
/// `target` is unreachable.
pub fn shortest_path<C: Cost>(
    graph: &Graph<C>,
    source: usize,
    target: usize,
    degree: usize,
) -> Result<Option<(Vec<usize>, C)>, HeapError> {
    if target >= graph.vertex_count() {
        return Err(HeapError::KeyOutOfBounds {
            index: target,
            capacity: graph.vertex_count(),
        });
    }

    let paths = search(graph, source, Some(target), degree)?;
    Ok(paths
        .distance(target)
        .and_then(|cost| paths.path_to(target).map(|path| (path, cost))))
}

fn search<C: Cost>(
    graph: &Graph<C>,
    source: usize,
    target: Option<usize>,
    degree: usize,
) -> Result<ShortestPaths<C>, HeapError> {
    let vertex_count = graph.vertex_count();
    let mut heap = IndexedMinDHeap::new(degree, vertex_count)?;
    let mut distance = vec![None; vertex_count];
    let mut previous = vec![None; vertex_count];
    let mut settled = vec![false; vertex_count];

    heap.insert(source, C::default())?;
    distance[source] = Some(C::default());

    let mut settled_count = 0usize;
    while let Ok((current, current_cost)) = heap.poll_min() {
        settled[current] = true;
        settled_count += 1;
        log::trace!("settled vertex {}", current);

        if target == Some(current) {
            break;
        }

        for &(neighbor, edge_cost) in graph.neighbors(current) {
            if settled[neighbor] {
                continue;
            }

            let tentative = current_cost + edge_cost;
            let improved = if heap.contains(neighbor)? {
                heap.decrease_key(neighbor, tentative)?
            } else {
                heap.insert(neighbor, tentative)?;
                true
            };

            if improved {
                distance[neighbor] = Some(tentative);
                previous[neighbor] = Some(current);
            }
        }
    }

    log::debug!(
        "dijkstra from {} settled {} of {} vertices",
        source,
        settled_count,
        vertex_count
    );

    Ok(ShortestPaths {
        source,
        distance,
        previous,
    })
}

/// A directed graph over arbitrary hashable node labels
///
/// Labels are interned into dense vertex ids on first use, so the search
/// itself runs on a plain [`Graph`] and an indexed heap of matching size.
#[derive(Debug, Clone)]
pub struct LabeledGraph<N, C> {
    graph: Graph<C>,
    labels: Vec<N>,
    ids: FxHashMap<N, usize>,
}

impl<N, C> LabeledGraph<N, C>
where
    N: Eq + Hash + Clone,
    C: Cost,
{
    pub fn new() -> Self {
        LabeledGraph {
            graph: Graph::new(0),
            labels: Vec::new(),
            ids: FxHashMap::default(),
        }
    }

    /// Returns the dense id of `node`, adding it if it is new
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&id) = self.ids.get(&node) {
            return id;
        }
        let id = self.graph.add_vertex();
        self.labels.push(node.clone());
        self.ids.insert(node, id);
        id
    }

    /// Adds a directed edge, creating either endpoint if needed
    pub fn add_edge(&mut self, from: N, to: N, cost: C) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.graph.adjacency[from].push((to, cost));
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn id_of(&self, node: &N) -> Option<usize> {
        self.ids.get(node).copied()
    }

    /// Shortest path between two labels and its cost
    ///
    /// Returns `None` if either label is unknown or `to` is unreachable.
    pub fn shortest_path(&self, from: &N, to: &N, degree: usize) -> Option<(Vec<N>, C)> {
        let source = self.id_of(from)?;
        let target = self.id_of(to)?;

        let (path, cost) = shortest_path(&self.graph, source, target, degree).ok()??;
        let labels = path.into_iter().map(|id| self.labels[id].clone()).collect();
        Some((labels, cost))
    }
}

impl<N, C> Default for LabeledGraph<N, C>
where
    N: Eq + Hash + Clone,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<u32> {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1, 1).unwrap();
        graph.add_edge(0, 2, 4).unwrap();
        graph.add_edge(1, 2, 2).unwrap();
        graph.add_edge(1, 3, 6).unwrap();
        graph.add_edge(2, 3, 3).unwrap();
        graph
    }

    #[test]
    fn test_diamond_distances() {
        let paths = dijkstra(&diamond(), 0, 2).unwrap();
        assert_eq!(paths.distance(0), Some(0));
        assert_eq!(paths.distance(1), Some(1));
        assert_eq!(paths.distance(2), Some(3));
        assert_eq!(paths.distance(3), Some(6));
        assert_eq!(paths.path_to(3), Some(vec![0, 1, 2, 3]));
        assert_eq!(paths.reachable_count(), 4);
    }

    #[test]
    fn test_unreachable_vertex() {
        let mut graph = diamond();
        let isolated = graph.add_vertex();
        let paths = dijkstra(&graph, 0, 3).unwrap();
        assert_eq!(paths.distance(isolated), None);
        assert_eq!(paths.path_to(isolated), None);
    }

    #[test]
    fn test_early_exit_matches_full_run() {
        let graph = diamond();
        assert_eq!(
            shortest_path(&graph, 0, 2, 2).unwrap(),
            Some((vec![0, 1, 2], 3))
        );
    }

    #[test]
    fn test_bad_endpoints() {
        let mut graph = diamond();
        assert_eq!(
            graph.add_edge(0, 9, 1),
            Err(HeapError::KeyOutOfBounds {
                index: 9,
                capacity: 4
            })
        );
        assert!(matches!(
            dijkstra(&graph, 7, 2),
            Err(HeapError::KeyOutOfBounds { index: 7, .. })
        ));
        assert!(matches!(
            dijkstra(&Graph::<u32>::new(0), 0, 2),
            Err(HeapError::Config { .. })
        ));
    }

    #[test]
    fn test_labeled_graph() {
        let mut graph = LabeledGraph::new();
        graph.add_edge("a", "b", 7u64);
        graph.add_edge("a", "c", 2);
        graph.add_edge("c", "b", 3);
        graph.add_edge("b", "d", 1);

        assert_eq!(graph.node_count(), 4);
        assert_eq!(
            graph.shortest_path(&"a", &"d", 3),
            Some((vec!["a", "c", "b", "d"], 6))
        );
        assert_eq!(graph.shortest_path(&"d", &"a", 3), None);
        assert_eq!(graph.shortest_path(&"a", &"z", 3), None);
    }
}
