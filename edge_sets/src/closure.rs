//! When a set of edges is cut out of a network to isolate a sub-system, some other edges are
//! implied to be cut as well. These closures grow the cut set to a fixed point under a rule that
//! only looks at the two junctions of one edge at a time.

use std::collections::BTreeSet;

use anyhow::Result;

use sumo::{Edge, EdgeID, Network};

use crate::EdgeSet;

pub trait ClosureRule {
    /// Examines one edge of the frontier, adding every edge it forces into `found`. Rules may
    /// also add to `known` right away, so that later edges in the same pass see the update.
    fn visit(&self, network: &Network, edge: &Edge, known: &mut EdgeSet, found: &mut EdgeSet);
}

/// If traffic entering a junction has only one way to leave, cutting the way in also cuts the
/// way out, and vice versa.
///
/// The rule only counts edges, so a junction with one incoming and one outgoing edge that
/// aren't connected to each other (like a dead end with separate entry and exit edges) still
/// counts as continuous. Dead ends are excluded outright, but other junctions like that are
/// false positives.
pub struct Continuity;

impl ClosureRule for Continuity {
    fn visit(&self, network: &Network, edge: &Edge, known: &mut EdgeSet, found: &mut EdgeSet) {
        // With no outgoing edges, the junction is a sink and there's nothing downstream.
        let to = network.to_junction(edge);
        if to.incoming.len() <= 1 && to.outgoing.len() == 1 && !to.is_dead_end() {
            let next = &to.outgoing[0];
            if !known.contains(next) {
                found.insert(next.clone());
            }
        }

        let from = network.from_junction(edge);
        if from.incoming.len() == 1 && from.outgoing.len() <= 1 && !from.is_dead_end() {
            let prev = &from.incoming[0];
            if !known.contains(prev) {
                found.insert(prev.clone());
            }
        }
    }
}

/// If every edge at a junction but one is already known, the remaining one can be deduced.
pub struct Deducibility;

impl ClosureRule for Deducibility {
    fn visit(&self, network: &Network, edge: &Edge, known: &mut EdgeSet, found: &mut EdgeSet) {
        for junction in [network.to_junction(edge), network.from_junction(edge)] {
            let unknown: BTreeSet<&EdgeID> = junction
                .incident_edges()
                .filter(|id| !known.contains(*id))
                .collect();
            if unknown.len() == 1 {
                if let Some(id) = unknown.into_iter().next() {
                    known.insert(id.clone());
                    found.insert(id.clone());
                }
            }
        }
    }
}

/// Grows `known ∪ frontier` until the rule stops finding new edges. Every pass visits the
/// frontier in ID order, so the result is deterministic even for rules that update `known`
/// mid-pass.
pub fn expand<R: ClosureRule>(
    rule: &R,
    network: &Network,
    known: &EdgeSet,
    frontier: &EdgeSet,
) -> Result<EdgeSet> {
    let mut known: EdgeSet = known.union(frontier).cloned().collect();
    let mut frontier: EdgeSet = frontier.clone();
    let mut rounds = 0;
    while !frontier.is_empty() {
        let mut found = EdgeSet::new();
        for id in &frontier {
            let edge = network.edge(id)?;
            rule.visit(network, edge, &mut known, &mut found);
        }
        known.extend(found.iter().cloned());
        frontier = found;
        rounds += 1;
    }
    debug!("Closure reached a fixed point after {} rounds", rounds);
    Ok(known)
}

/// The continuity closure of a cut set.
pub fn continuous_edges(network: &Network, cut: &EdgeSet) -> Result<EdgeSet> {
    expand(&Continuity, network, &EdgeSet::new(), cut)
}

/// The deducibility closure of a cut set.
pub fn deducible_edges(network: &Network, cut: &EdgeSet) -> Result<EdgeSet> {
    expand(&Deducibility, network, &EdgeSet::new(), cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumo::NetworkBuilder;

    fn set(ids: &[&str]) -> EdgeSet {
        ids.iter().map(|id| EdgeID::from(*id)).collect()
    }

    #[test]
    fn test_chain() {
        let mut b = NetworkBuilder::new();
        b.edge("ab", "A", "B", "").edge("bc", "B", "C", "");
        let net = b.build().unwrap();
        assert_eq!(
            continuous_edges(&net, &set(&["ab"])).unwrap(),
            set(&["ab", "bc"])
        );
        // And backwards
        assert_eq!(
            continuous_edges(&net, &set(&["bc"])).unwrap(),
            set(&["ab", "bc"])
        );
    }

    #[test]
    fn test_long_chain_stops_at_branch() {
        // a -> b -> c -> d, and d splits to e and f
        let mut b = NetworkBuilder::new();
        b.edge("1", "a", "b", "")
            .edge("2", "b", "c", "")
            .edge("3", "c", "d", "")
            .edge("4", "d", "e", "")
            .edge("5", "d", "f", "");
        let net = b.build().unwrap();
        assert_eq!(
            continuous_edges(&net, &set(&["1"])).unwrap(),
            set(&["1", "2", "3"])
        );
        // From the branch, going upstream: d has one incoming and two outgoing, so nothing
        assert_eq!(continuous_edges(&net, &set(&["4"])).unwrap(), set(&["4"]));
    }

    #[test]
    fn test_dead_ends_stop_continuity() {
        let mut b = NetworkBuilder::new();
        b.edge("ab", "A", "B", "")
            .edge("bc", "B", "C", "")
            .junction("B", "dead_end", (0.0, 0.0));
        let net = b.build().unwrap();
        assert_eq!(continuous_edges(&net, &set(&["ab"])).unwrap(), set(&["ab"]));
    }

    #[test]
    fn test_merges_arent_continuous() {
        // Two roads merge at m and continue as one. m has two incoming edges, so cutting any one
        // of the three implies nothing.
        let mut b = NetworkBuilder::new();
        b.edge("in1", "x", "m", "")
            .edge("in2", "y", "m", "")
            .edge("out", "m", "z", "");
        let net = b.build().unwrap();
        assert_eq!(continuous_edges(&net, &set(&["in1"])).unwrap(), set(&["in1"]));
        assert_eq!(continuous_edges(&net, &set(&["out"])).unwrap(), set(&["out"]));
    }

    #[test]
    fn test_deducible() {
        // A junction j with 3 edges. Knowing 2 of them deduces the third.
        let mut b = NetworkBuilder::new();
        b.edge("1", "a", "j", "")
            .edge("2", "j", "b", "")
            .edge("3", "j", "c", "");
        let net = b.build().unwrap();
        assert_eq!(
            deducible_edges(&net, &set(&["1", "2"])).unwrap(),
            set(&["1", "2", "3"])
        );
        // Knowing just one of them isn't enough at j, but the far ends of each edge only have
        // that edge, so there's nothing to deduce there either.
        assert_eq!(deducible_edges(&net, &set(&["1"])).unwrap(), set(&["1"]));
    }

    #[test]
    fn test_deducible_cascades() {
        // j1 has edges 1, 2, 3. j2 has edges 3, 4, 5. Knowing 1 and 2 deduces 3, which together
        // with 4 deduces 5.
        let mut b = NetworkBuilder::new();
        b.edge("1", "a", "j1", "")
            .edge("2", "j1", "b", "")
            .edge("3", "j1", "j2", "")
            .edge("4", "j2", "c", "")
            .edge("5", "d", "j2", "");
        let net = b.build().unwrap();
        assert_eq!(
            deducible_edges(&net, &set(&["1", "2", "4"])).unwrap(),
            set(&["1", "2", "3", "4", "5"])
        );
        assert_eq!(
            deducible_edges(&net, &set(&["1", "2"])).unwrap(),
            set(&["1", "2", "3"])
        );
    }

    #[test]
    fn test_unknown_seed() {
        let mut b = NetworkBuilder::new();
        b.edge("ab", "A", "B", "");
        let net = b.build().unwrap();
        assert!(continuous_edges(&net, &set(&["nope"])).is_err());
        assert!(deducible_edges(&net, &set(&["nope"])).is_err());
    }

    #[test]
    fn test_empty_seed() {
        let mut b = NetworkBuilder::new();
        b.edge("ab", "A", "B", "");
        let net = b.build().unwrap();
        assert!(continuous_edges(&net, &EdgeSet::new()).unwrap().is_empty());
        assert!(deducible_edges(&net, &EdgeSet::new()).unwrap().is_empty());
    }
}
