use std::cmp::Reverse;

use sumo::{EdgeID, Network};

use crate::EdgeSet;

/// Groups edges that are reachable from each other ignoring direction. This is a simple flood
/// fill over junctions, not Tarjan's. The biggest groups come first; groups of the same size are
/// ordered by their smallest edge ID.
pub fn weakly_connected_components(network: &Network) -> Vec<EdgeSet> {
    let mut unvisited: EdgeSet = network.edge_ids();
    let mut components: Vec<EdgeSet> = Vec::new();

    while !unvisited.is_empty() {
        let mut queue: Vec<EdgeID> = unvisited.iter().take(1).cloned().collect();
        let mut current = EdgeSet::new();
        while let Some(id) = queue.pop() {
            if !unvisited.remove(&id) {
                continue;
            }
            if let Some(edge) = network.get_edge(&id) {
                queue.extend(
                    network
                        .adjacent_edges(edge)
                        .filter(|other| unvisited.contains(*other))
                        .cloned(),
                );
            }
            current.insert(id);
        }
        components.push(current);
    }

    components.sort_by_key(|edges| (Reverse(edges.len()), edges.iter().next().cloned()));
    components
}

/// Empty only if the network has no edges.
pub fn largest_component(network: &Network) -> EdgeSet {
    weakly_connected_components(network)
        .into_iter()
        .next()
        .unwrap_or_default()
}
