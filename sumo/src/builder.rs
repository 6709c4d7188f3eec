//! Assembles a `Network` from loose edges and junctions, filling in the incidence lists.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Result};

use crate::{Edge, EdgeID, Junction, Location, Network, NodeID};

/// Junctions that an edge mentions before they're declared get this type.
const DEFAULT_JUNCTION_TYPE: &str = "priority";

pub struct NetworkBuilder {
    location: Location,
    edges: Vec<Edge>,
    junctions: BTreeMap<NodeID, Junction>,
}

impl NetworkBuilder {
    pub fn new() -> NetworkBuilder {
        NetworkBuilder {
            location: Location::default(),
            edges: Vec::new(),
            junctions: BTreeMap::new(),
        }
    }

    pub fn location(&mut self, location: Location) -> &mut Self {
        self.location = location;
        self
    }

    /// Declares a junction, replacing any placeholder created by `edge`.
    pub fn junction(&mut self, id: &str, junction_type: &str, pt: (f64, f64)) -> &mut Self {
        self.junctions.insert(
            NodeID::from(id),
            Junction {
                id: NodeID::from(id),
                junction_type: junction_type.to_string(),
                x: pt.0,
                y: pt.1,
                incoming: Vec::new(),
                outgoing: Vec::new(),
            },
        );
        self
    }

    /// Adds an unnamed single-lane edge. Junctions that haven't been declared yet are created as
    /// ordinary junctions at the origin.
    pub fn edge(&mut self, id: &str, from: &str, to: &str, edge_type: &str) -> &mut Self {
        self.named_edge(id, from, to, edge_type, "")
    }

    pub fn named_edge(
        &mut self,
        id: &str,
        from: &str,
        to: &str,
        edge_type: &str,
        name: &str,
    ) -> &mut Self {
        for node in [from, to] {
            if !self.junctions.contains_key(&NodeID::from(node)) {
                self.junction(node, DEFAULT_JUNCTION_TYPE, (0.0, 0.0));
            }
        }
        self.push_edge(Edge {
            id: EdgeID::from(id),
            from: NodeID::from(from),
            to: NodeID::from(to),
            edge_type: edge_type.to_string(),
            name: name.to_string(),
        })
    }

    /// Adds a fully specified edge. Its junctions must be declared before `build`.
    pub fn push_edge(&mut self, edge: Edge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    pub fn build(self) -> Result<Network> {
        let mut junctions = self.junctions;
        for j in junctions.values_mut() {
            j.incoming.clear();
            j.outgoing.clear();
        }

        let mut edges = BTreeMap::new();
        let mut seen = BTreeSet::new();
        for edge in self.edges {
            if !seen.insert(edge.id.clone()) {
                bail!("Duplicate edge {}", edge.id);
            }
            match junctions.get_mut(&edge.from) {
                Some(j) => j.outgoing.push(edge.id.clone()),
                None => bail!("Edge {} starts at unknown junction {}", edge.id, edge.from),
            }
            match junctions.get_mut(&edge.to) {
                Some(j) => j.incoming.push(edge.id.clone()),
                None => bail!("Edge {} ends at unknown junction {}", edge.id, edge.to),
            }
            edges.insert(edge.id.clone(), edge);
        }

        Ok(Network {
            location: self.location,
            edges,
            junctions,
        })
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        NetworkBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_junctions() {
        let mut b = NetworkBuilder::new();
        b.junction("a", "dead_end", (1.0, 2.0))
            .edge("ab", "a", "b", "highway.primary")
            .junction("b", "traffic_light", (3.0, 4.0));
        let net = b.build().unwrap();
        // Declaring "a" first means the edge doesn't clobber it
        let a = net.get_junction(&"a".into()).unwrap();
        assert!(a.is_dead_end());
        assert_eq!(a.outgoing, vec![EdgeID::from("ab")]);
        let b = net.get_junction(&"b".into()).unwrap();
        assert_eq!(b.junction_type, "traffic_light");
        assert_eq!(b.incoming, vec![EdgeID::from("ab")]);
    }

    #[test]
    fn test_loop_edge() {
        let mut b = NetworkBuilder::new();
        b.edge("loop", "a", "a", "");
        let net = b.build().unwrap();
        let a = net.get_junction(&"a".into()).unwrap();
        assert_eq!(a.incident_edges().count(), 2);
    }

    #[test]
    fn test_errors() {
        let mut b = NetworkBuilder::new();
        b.edge("x", "a", "b", "").edge("x", "b", "a", "");
        assert!(b.build().is_err());

        let mut b = NetworkBuilder::new();
        b.push_edge(Edge {
            id: "x".into(),
            from: "a".into(),
            to: "b".into(),
            edge_type: String::new(),
            name: String::new(),
        });
        assert!(b.build().is_err());
    }
}
