//! This crate provides a Rust interface to the parts of the [SUMO](https://www.eclipse.org/sumo/)
//! traffic simulator that the VCI tools need: reading the road graph out of a .net.xml file, and
//! driving `netconvert` to physically cut or filter networks.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

pub use self::builder::NetworkBuilder;
pub use self::netconvert::Netconvert;

mod builder;
mod netconvert;
mod reader;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeID(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeID(pub String);

impl fmt::Display for EdgeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeID {
    fn from(id: &str) -> EdgeID {
        EdgeID(id.to_string())
    }
}

impl From<&str> for NodeID {
    fn from(id: &str) -> NodeID {
        NodeID(id.to_string())
    }
}

/// An immutable snapshot of the normal (non-internal) edges and junctions of a SUMO
/// [network](https://sumo.dlr.de/docs/Networks/SUMO_Road_Networks.html). Edges and junctions
/// refer to each other by ID; the incidence lists on every junction are built once when the
/// network is constructed and never change afterwards.
#[derive(Debug)]
pub struct Network {
    pub location: Location,
    edges: BTreeMap<EdgeID, Edge>,
    junctions: BTreeMap<NodeID, Junction>,
}

/// See https://sumo.dlr.de/docs/Networks/SUMO_Road_Networks.html#network_location
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Location {
    pub net_offset: (f64, f64),
}

impl Location {
    /// Undoes the offset netconvert applies to every coordinate. For networks written with
    /// plain-geo output, this is longitude and latitude.
    pub fn to_original(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.net_offset.0, y - self.net_offset.1)
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub id: EdgeID,
    pub from: NodeID,
    pub to: NodeID,
    /// Hierarchial, like "highway.motorway". Empty if the network doesn't specify one.
    pub edge_type: String,
    /// Empty if the network doesn't specify one.
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct Junction {
    pub id: NodeID,
    pub junction_type: String,
    pub x: f64,
    pub y: f64,
    /// In the order the edges were read from the file
    pub incoming: Vec<EdgeID>,
    pub outgoing: Vec<EdgeID>,
}

impl Junction {
    /// Dead ends are where the network was cut off; vehicles enter or leave the system here.
    pub fn is_dead_end(&self) -> bool {
        self.junction_type == "dead_end"
    }

    /// Incoming edges, then outgoing. A loop edge appears in both lists.
    pub fn incident_edges(&self) -> impl Iterator<Item = &EdgeID> {
        self.incoming.iter().chain(self.outgoing.iter())
    }
}

impl Network {
    pub fn get_edge(&self, id: &EdgeID) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Like `get_edge`, but an unknown ID is an error.
    pub fn edge(&self, id: &EdgeID) -> Result<&Edge> {
        self.edges
            .get(id)
            .ok_or_else(|| anyhow!("unknown edge {}", id))
    }

    pub fn get_junction(&self, id: &NodeID) -> Option<&Junction> {
        self.junctions.get(id)
    }

    pub fn from_junction(&self, edge: &Edge) -> &Junction {
        &self.junctions[&edge.from]
    }

    pub fn to_junction(&self, edge: &Edge) -> &Junction {
        &self.junctions[&edge.to]
    }

    /// Edges are ordered by ID.
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn all_junctions(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.values()
    }

    pub fn edge_ids(&self) -> BTreeSet<EdgeID> {
        self.edges.keys().cloned().collect()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_junctions(&self) -> usize {
        self.junctions.len()
    }

    /// Every edge sharing a junction with this one, excluding the edge itself. May contain
    /// duplicates when two edges share both junctions.
    pub fn adjacent_edges<'a>(&'a self, edge: &'a Edge) -> impl Iterator<Item = &'a EdgeID> {
        self.from_junction(edge)
            .incident_edges()
            .chain(self.to_junction(edge).incident_edges())
            .filter(move |id| **id != edge.id)
    }

    /// A new network with only the edges passing the filter. Junctions left without any edges
    /// are dropped, as netconvert does.
    pub fn retain_edges<F: Fn(&Edge) -> bool>(&self, keep: F) -> Result<Network> {
        let mut builder = NetworkBuilder::new();
        builder.location(self.location.clone());
        let mut used = BTreeSet::new();
        for edge in self.edges.values().filter(|e| keep(e)) {
            used.insert(edge.from.clone());
            used.insert(edge.to.clone());
            builder.push_edge(edge.clone());
        }
        for id in used {
            let j = &self.junctions[&id];
            builder.junction(&j.id.0, &j.junction_type, (j.x, j.y));
        }
        builder.build()
    }
}
